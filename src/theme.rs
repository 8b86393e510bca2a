//! Theme preference: the only state that outlives a session.
//!
//! The preference is a single string under [`THEME_KEY`] in a
//! [`PreferenceStore`]. It is read once at startup, falling back to the
//! system colour scheme when unset or unrecognised, and written on every
//! toggle. Write failures are logged at debug level and otherwise ignored.

use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;
use tracing::debug;

/// Key under which the theme is stored.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

// ── Stores ───────────────────────────────────────────────────────────────

/// A string key-value store for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        (**self).set(key, value)
    }
}

/// Preferences kept as a flat JSON object in one file.
///
/// Writes go to a temp file in the same directory and are renamed into
/// place, so a crash never leaves a half-written file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            debug!("ignoring unreadable preferences {}: {}", self.path.display(), e);
            BTreeMap::new()
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut map = self.load();
        map.insert(key.to_string(), value.to_string());

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, &map)?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// In-process store, optionally failing every write.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RefCell<BTreeMap<String, String>>,
    fail_writes: bool,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose `set` always fails, like storage in a locked-down
    /// private window.
    pub fn read_only() -> Self {
        Self {
            values: RefCell::default(),
            fail_writes: true,
        }
    }

    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "preference store is read-only",
            ));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ── Startup / toggle ─────────────────────────────────────────────────────

/// Stored theme if valid, otherwise `system`.
pub fn load_theme(store: &dyn PreferenceStore, system: Theme) -> Theme {
    match store.get(THEME_KEY) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            debug!("{}; using system preference", e);
            system
        }),
        None => system,
    }
}

/// Flip `current`, persist the result, and return it. Persist failures are
/// not reported.
pub fn toggle_theme(current: Theme, store: &dyn PreferenceStore) -> Theme {
    let next = current.toggled();
    if let Err(e) = store.set(THEME_KEY, next.as_str()) {
        debug!("could not persist theme preference: {}", e);
    }
    next
}

/// System colour-scheme preference of the terminal.
///
/// Reads `COLORFGBG` (`"fg;bg"`, set by rxvt, Konsole, iTerm2 and others).
/// Background colours 0–6 and 8 are dark.
pub fn system_theme() -> Theme {
    system_theme_from(std::env::var("COLORFGBG").ok().as_deref())
}

pub fn system_theme_from(colorfgbg: Option<&str>) -> Theme {
    let bg = colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match bg {
        Some(0..=6) | Some(8) => Theme::Dark,
        _ => Theme::Light,
    }
}
