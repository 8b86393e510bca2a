//! The UI controller: owns the page and dispatches events.
//!
//! ## Execution model
//!
//! Everything runs on one thread. The controller must be driven from inside
//! a [`tokio::task::LocalSet`]: a submission spawns the request as a local
//! task that posts [`UiEvent::ReviewFinished`] back through the event
//! channel, and copy confirmations schedule their revert the same way.
//! Page mutation only ever happens inside [`UiController::handle`].
//!
//! ```text
//!  Submit ──▶ validate ──▶ show loading ──▶ spawn_local(request)
//!                                                │
//!  ReviewFinished ◀── guard drops (loading off) ◀┘
//!       │
//!       └─▶ render + reveal result   or   show error
//! ```
//!
//! Overlapping submissions are not prevented; each one renders when it
//! finishes.

use crate::config::ClientConfig;
use crate::error::{ReviewError, OPEN_LINK_FAILED_MESSAGE};
use crate::observer::{NoopObserver, Observer};
use crate::platform::{Clipboard, LinkOpener, MemoryClipboard, RecordingLinkOpener};
use crate::review::ReviewResult;
use crate::theme::{load_theme, toggle_theme, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Theme};
use crate::upload::{ReviewClient, UploadForm};
use crate::view::page::{LoadingGuard, Page};
use crate::view::render::render_review;
use crate::view::sections::SectionId;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

/// Everything the page reacts to.
#[derive(Debug)]
pub enum UiEvent {
    /// The form was submitted.
    Submit(UploadForm),
    /// A request spawned by `Submit` completed.
    ReviewFinished(Result<ReviewResult, ReviewError>),
    /// A copy button was activated.
    Copy(SectionId),
    /// The copy confirmation delay elapsed.
    RevertCopyLabel { section: SectionId, generation: u64 },
    /// The certificate action was activated.
    OpenCertificate,
    ToggleTheme,
}

pub type EventSender = UnboundedSender<UiEvent>;
pub type EventReceiver = UnboundedReceiver<UiEvent>;

pub struct UiController {
    config: ClientConfig,
    client: ReviewClient,
    page: Page,
    review: Option<ReviewResult>,
    clipboard: Box<dyn Clipboard>,
    opener: Box<dyn LinkOpener>,
    preferences: Box<dyn PreferenceStore>,
    events: EventSender,
    in_flight: usize,
}

impl UiController {
    pub fn builder(config: ClientConfig) -> UiControllerBuilder {
        UiControllerBuilder {
            config,
            clipboard: None,
            opener: None,
            preferences: None,
            observer: None,
            system_theme: Theme::default(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The review behind the current render, if the last submission
    /// succeeded.
    pub fn review(&self) -> Option<&ReviewResult> {
        self.review.as_ref()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// A handle for posting events to this controller.
    pub fn sender(&self) -> EventSender {
        self.events.clone()
    }

    /// Number of submissions whose request has not finished yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Dispatch one event. Synchronous: page state is final on return.
    pub fn handle(&mut self, event: UiEvent) {
        match event {
            UiEvent::Submit(form) => self.on_submit(form),
            UiEvent::ReviewFinished(outcome) => self.on_review_finished(outcome),
            UiEvent::Copy(section) => self.on_copy(section),
            UiEvent::RevertCopyLabel {
                section,
                generation,
            } => self.page.revert_copy_label(section, generation),
            UiEvent::OpenCertificate => self.on_open_certificate(),
            UiEvent::ToggleTheme => self.on_toggle_theme(),
        }
    }

    /// Process events until no submission is in flight and the queue is
    /// empty. Pending copy-label reverts are not waited for.
    pub async fn run_until_settled(&mut self, events: &mut EventReceiver) {
        loop {
            let next = if self.in_flight > 0 {
                events.recv().await
            } else {
                events.try_recv().ok()
            };
            match next {
                Some(event) => self.handle(event),
                None => break,
            }
        }
    }

    // ── Handlers ─────────────────────────────────────────────────────────

    fn on_submit(&mut self, form: UploadForm) {
        self.page.clear_error();

        let UploadForm { pdf, target_role } = form;
        let Some(pdf) = pdf else {
            debug!("submit without a file");
            self.page.show_error(ReviewError::NoFileSelected.user_message());
            return;
        };

        self.page.result_visible = false;
        self.review = None;
        let completion = self.begin_request();
        let client = self.client.clone();

        tokio::task::spawn_local(async move {
            let outcome = client.send(&pdf, &target_role).await;
            completion.finish(outcome);
        });
    }

    /// Show loading and count the request as in flight. The returned
    /// completion posts `ReviewFinished` when it is finished or dropped.
    fn begin_request(&mut self) -> ReviewCompletion {
        self.in_flight += 1;
        ReviewCompletion {
            events: self.events.clone(),
            loading: Some(self.page.loading.show()),
            outcome: None,
        }
    }

    fn on_review_finished(&mut self, outcome: Result<ReviewResult, ReviewError>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome {
            Ok(review) => {
                render_review(&mut self.page, &review, &self.config);
                self.page.result_visible = true;
                self.review = Some(review);
                info!("rendered review (score: {})", self.page.score.text);
                let observer = Arc::clone(self.page.observer());
                observer.on_rendered(&self.page);
            }
            Err(e) => self.page.show_error(e.user_message()),
        }
    }

    fn on_copy(&mut self, section: SectionId) {
        if !self.page.result_visible {
            debug!("copy ignored: no visible result");
            return;
        }
        let Some(text) = self.page.section(section).and_then(|s| s.copy_text()) else {
            debug!("nothing to copy in {}", section);
            return;
        };
        if self.page.copy_button(section).is_none() {
            return;
        }

        if let Err(e) = self.clipboard.write_text(&text) {
            warn!("copy from {} failed: {}", section, e);
            self.page.show_error(e.user_message());
            return;
        }

        let label = self.config.copy_feedback_label.clone();
        if let Some(generation) = self.page.confirm_copy(section, &label) {
            let delay = Duration::from_millis(self.config.copy_feedback_ms);
            let events = self.events.clone();
            tokio::task::spawn_local(async move {
                sleep(delay).await;
                let _ = events.send(UiEvent::RevertCopyLabel {
                    section,
                    generation,
                });
            });
        }
    }

    fn on_open_certificate(&mut self) {
        let Some(cert) = self.page.certificate.as_ref().filter(|_| self.page.result_visible) else {
            debug!("no visible certificate to open");
            return;
        };
        if let Err(e) = self.opener.open(&cert.url) {
            warn!("could not open certificate link: {}", e);
            self.page.show_error(OPEN_LINK_FAILED_MESSAGE);
        }
    }

    fn on_toggle_theme(&mut self) {
        self.page.theme = toggle_theme(self.page.theme, self.preferences.as_ref());
        self.page.observer().on_theme_changed(self.page.theme);
    }
}

/// Reports a request's outcome to the controller exactly once.
///
/// Dropping it unfinished (task cancelled or panicked) posts a transport
/// failure, so `in_flight` always comes back down.
struct ReviewCompletion {
    events: EventSender,
    loading: Option<LoadingGuard>,
    outcome: Option<Result<ReviewResult, ReviewError>>,
}

impl ReviewCompletion {
    fn finish(mut self, outcome: Result<ReviewResult, ReviewError>) {
        self.outcome = Some(outcome);
    }
}

impl Drop for ReviewCompletion {
    fn drop(&mut self) {
        // Loading goes off before the outcome is visible to the controller.
        drop(self.loading.take());
        let outcome = self.outcome.take().unwrap_or_else(|| {
            warn!("review request ended without an outcome");
            Err(ReviewError::Transport {
                message: String::new(),
            })
        });
        if self.events.send(UiEvent::ReviewFinished(outcome)).is_err() {
            debug!("controller dropped before the review finished");
        }
    }
}

/// Builder for [`UiController`]. Host services default to in-memory
/// doubles; the CLI swaps in terminal-backed ones.
pub struct UiControllerBuilder {
    config: ClientConfig,
    clipboard: Option<Box<dyn Clipboard>>,
    opener: Option<Box<dyn LinkOpener>>,
    preferences: Option<Box<dyn PreferenceStore>>,
    observer: Option<Observer>,
    system_theme: Theme,
}

impl UiControllerBuilder {
    pub fn clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Some(Box::new(clipboard));
        self
    }

    pub fn link_opener(mut self, opener: impl LinkOpener + 'static) -> Self {
        self.opener = Some(Box::new(opener));
        self
    }

    pub fn preferences(mut self, store: impl PreferenceStore + 'static) -> Self {
        self.preferences = Some(Box::new(store));
        self
    }

    pub fn observer(mut self, observer: Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Theme used when no valid preference is stored.
    pub fn system_theme(mut self, theme: Theme) -> Self {
        self.system_theme = theme;
        self
    }

    /// Build the controller and the receiving end of its event channel.
    pub fn build(self) -> Result<(UiController, EventReceiver), ReviewError> {
        let client = ReviewClient::new(&self.config)?;
        let preferences: Box<dyn PreferenceStore> = match (self.preferences, &self.config.preferences_path) {
            (Some(store), _) => store,
            (None, Some(path)) => Box::new(FilePreferenceStore::new(path)),
            (None, None) => Box::new(MemoryPreferenceStore::new()),
        };
        let theme = load_theme(preferences.as_ref(), self.system_theme);
        let observer = self.observer.unwrap_or_else(|| Arc::new(NoopObserver));
        let (events, receiver) = mpsc::unbounded_channel();

        debug!("controller ready: endpoint {}, theme {}", client.endpoint(), theme);

        let controller = UiController {
            page: Page::new(theme, observer),
            review: None,
            client,
            clipboard: self
                .clipboard
                .unwrap_or_else(|| Box::new(MemoryClipboard::new())),
            opener: self
                .opener
                .unwrap_or_else(|| Box::new(RecordingLinkOpener::new())),
            preferences,
            events,
            in_flight: 0,
            config: self.config,
        };
        Ok((controller, receiver))
    }
}
