//! The page model: every element the controller reads or writes.
//!
//! Every element is an explicit field, created once by [`Page::new`]. All
//! mutation happens synchronously inside an event handler, so plain fields
//! suffice. The one exception is the loading indicator, which is shared with the in-flight
//! request task through a [`LoadingGuard`].

use super::badge::{BadgeTier, Standing, PLACEHOLDER};
use super::sections::{Section, SectionId};
use crate::observer::{NoopObserver, Observer};
use crate::theme::Theme;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Resting label of a copy button.
pub const COPY_LABEL: &str = "Copy";

// ── Loading indicator ────────────────────────────────────────────────────

/// Visibility flag of the loading indicator.
///
/// Cloning shares the flag; the request task holds a clone inside its
/// [`LoadingGuard`].
#[derive(Clone)]
pub struct LoadingIndicator {
    visible: Rc<Cell<bool>>,
    observer: Observer,
}

impl LoadingIndicator {
    fn new(observer: Observer) -> Self {
        Self {
            visible: Rc::new(Cell::new(false)),
            observer,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Show the indicator until the returned guard is dropped.
    #[must_use = "the indicator hides as soon as the guard is dropped"]
    pub fn show(&self) -> LoadingGuard {
        self.set(true);
        LoadingGuard {
            indicator: self.clone(),
        }
    }

    fn set(&self, visible: bool) {
        if self.visible.replace(visible) != visible {
            self.observer.on_loading_changed(visible);
        }
    }
}

impl fmt::Debug for LoadingIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingIndicator")
            .field("visible", &self.visible.get())
            .finish()
    }
}

/// Hides the loading indicator on drop, whether the request succeeded,
/// failed, or the task unwound.
#[derive(Debug)]
pub struct LoadingGuard {
    indicator: LoadingIndicator,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.indicator.set(false);
    }
}

// ── Score badge ──────────────────────────────────────────────────────────

/// Marker class that plays the pulse animation on the score.
///
/// Re-adding an already present class does not replay a CSS animation, so
/// [`restart`](Self::restart) removes it, forces a layout pass, then adds it
/// back. `restarts` counts completed cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PulseMarker {
    pub active: bool,
    pub layout_passes: u64,
    pub restarts: u64,
}

impl PulseMarker {
    pub fn restart(&mut self) {
        self.active = false;
        self.force_layout();
        self.active = true;
        self.restarts += 1;
    }

    fn force_layout(&mut self) {
        self.layout_passes += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBadge {
    pub text: String,
    /// `None` until a numeric score has been rendered.
    pub tier: Option<BadgeTier>,
    pub pulse: PulseMarker,
}

impl Default for ScoreBadge {
    fn default() -> Self {
        Self {
            text: PLACEHOLDER.to_string(),
            tier: None,
            pulse: PulseMarker::default(),
        }
    }
}

// ── Stats / actions ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStats {
    pub visible: bool,
    pub connections: String,
    pub followers: String,
}

impl Default for ProfileStats {
    fn default() -> Self {
        Self {
            visible: false,
            connections: PLACEHOLDER.to_string(),
            followers: PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateAction {
    pub url: String,
    pub standing: Standing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyButton {
    pub label: String,
    /// Bumped on every confirmation; a revert only applies to its own.
    pub generation: u64,
}

impl Default for CopyButton {
    fn default() -> Self {
        Self {
            label: COPY_LABEL.to_string(),
            generation: 0,
        }
    }
}

// ── Page ─────────────────────────────────────────────────────────────────

/// Everything visible on the review page.
pub struct Page {
    pub loading: LoadingIndicator,
    error: Option<String>,
    pub result_visible: bool,
    pub score: ScoreBadge,
    pub stats: ProfileStats,
    pub certificate: Option<CertificateAction>,
    pub share_url: Option<String>,
    sections: BTreeMap<SectionId, Section>,
    copy_buttons: BTreeMap<SectionId, CopyButton>,
    pub theme: Theme,
    observer: Observer,
}

impl Page {
    pub fn new(theme: Theme, observer: Observer) -> Self {
        let copy_buttons = SectionId::ALL
            .into_iter()
            .filter(|id| id.is_copyable())
            .map(|id| (id, CopyButton::default()))
            .collect();
        Self {
            loading: LoadingIndicator::new(Arc::clone(&observer)),
            error: None,
            result_visible: false,
            score: ScoreBadge::default(),
            stats: ProfileStats::default(),
            certificate: None,
            share_url: None,
            sections: BTreeMap::new(),
            copy_buttons,
            theme,
            observer,
        }
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    // ── Error region ─────────────────────────────────────────────────────

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.observer.on_error(&message);
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ── Sections ─────────────────────────────────────────────────────────

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(&id)
    }

    pub fn sections(&self) -> impl Iterator<Item = (SectionId, &Section)> {
        self.sections.iter().map(|(id, s)| (*id, s))
    }

    pub fn set_section(&mut self, id: SectionId, section: Section) {
        self.sections.insert(id, section);
    }

    // ── Copy buttons ─────────────────────────────────────────────────────

    pub fn copy_button(&self, id: SectionId) -> Option<&CopyButton> {
        self.copy_buttons.get(&id)
    }

    /// Swap the button label to `label`; returns the generation to pass to
    /// [`revert_copy_label`](Self::revert_copy_label).
    pub fn confirm_copy(&mut self, id: SectionId, label: &str) -> Option<u64> {
        let button = self.copy_buttons.get_mut(&id)?;
        button.label = label.to_string();
        button.generation += 1;
        self.observer.on_copy_label_changed(id, label);
        Some(button.generation)
    }

    pub fn revert_copy_label(&mut self, id: SectionId, generation: u64) {
        if let Some(button) = self.copy_buttons.get_mut(&id) {
            if button.generation == generation && button.label != COPY_LABEL {
                button.label = COPY_LABEL.to_string();
                self.observer.on_copy_label_changed(id, COPY_LABEL);
            }
        }
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("loading", &self.loading)
            .field("error", &self.error)
            .field("result_visible", &self.result_visible)
            .field("score", &self.score)
            .field("stats", &self.stats)
            .field("certificate", &self.certificate)
            .field("share_url", &self.share_url)
            .field("sections", &self.sections)
            .field("copy_buttons", &self.copy_buttons)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Theme::default(), Arc::new(NoopObserver))
    }
}
