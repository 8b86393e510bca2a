//! Observer trait for page events.
//!
//! Hosts inject an [`Arc<dyn UiObserver>`] to mirror page state somewhere
//! else: the CLI drives a spinner from `on_loading_changed`, a GUI shell
//! could repaint on `on_rendered`. All methods default to no-ops.
//!
//! Events fire synchronously from inside the controller's event handler
//! (or, for loading changes, from the request task on the same thread).

use crate::theme::Theme;
use crate::view::page::Page;
use crate::view::sections::SectionId;
use std::sync::Arc;

pub trait UiObserver: Send + Sync {
    /// The loading indicator was shown (`true`) or hidden (`false`).
    fn on_loading_changed(&self, visible: bool) {
        let _ = visible;
    }

    /// A message was placed in the error region.
    fn on_error(&self, message: &str) {
        let _ = message;
    }

    /// A review was rendered and the result container revealed.
    fn on_rendered(&self, page: &Page) {
        let _ = page;
    }

    /// A copy button's label changed (confirmation or revert).
    fn on_copy_label_changed(&self, section: SectionId, label: &str) {
        let _ = (section, label);
    }

    fn on_theme_changed(&self, theme: Theme) {
        let _ = theme;
    }
}

/// Default observer when the host does not need events.
pub struct NoopObserver;

impl UiObserver for NoopObserver {}

/// The type stored by [`Page`] and the controller.
pub type Observer = Arc<dyn UiObserver>;
