//! Host services the page relies on: the system clipboard and a way to
//! open links in a new browsing context.
//!
//! Both are traits so the controller can run against real terminals and
//! against in-memory doubles in tests.

use crate::error::ClipboardError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use tracing::{debug, info};

// ── Clipboard ────────────────────────────────────────────────────────────

pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

impl<C: Clipboard + ?Sized> Clipboard for Rc<C> {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text)
    }
}

/// Clipboard over the OSC 52 terminal escape sequence.
///
/// Most modern terminals (and tmux with `set-clipboard on`) put the payload
/// on the system clipboard, including over SSH.
pub struct Osc52Clipboard<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl Osc52Clipboard<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

/// The escape sequence that sets the clipboard selection to `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut out = self.out.borrow_mut();
        out.write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| out.flush())
            .map_err(|source| ClipboardError::WriteFailed { source })?;
        debug!("copied {} bytes via OSC 52", text.len());
        Ok(())
    }
}

/// In-memory clipboard. `unavailable()` builds one that rejects writes.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: RefCell<Option<String>>,
    writes: RefCell<usize>,
    unavailable: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    pub fn writes(&self) -> usize {
        *self.writes.borrow()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.unavailable {
            return Err(ClipboardError::Unavailable);
        }
        *self.contents.borrow_mut() = Some(text.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

// ── Links ────────────────────────────────────────────────────────────────

/// Opens a URL in a new browsing context.
pub trait LinkOpener {
    fn open(&self, url: &str) -> io::Result<()>;
}

impl<O: LinkOpener + ?Sized> LinkOpener for Rc<O> {
    fn open(&self, url: &str) -> io::Result<()> {
        (**self).open(url)
    }
}

/// Prints the URL for the user to follow; terminals make it clickable.
pub struct PrintLinkOpener<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> PrintLinkOpener<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl PrintLinkOpener<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LinkOpener for PrintLinkOpener<W> {
    fn open(&self, url: &str) -> io::Result<()> {
        info!("opening {}", url);
        writeln!(self.out.borrow_mut(), "{url}")
    }
}

/// Records every opened URL.
#[derive(Debug, Default)]
pub struct RecordingLinkOpener {
    opened: RefCell<Vec<String>>,
}

impl RecordingLinkOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl LinkOpener for RecordingLinkOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}
