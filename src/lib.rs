//! # profile-review
//!
//! Client for a profile-review service: upload a PDF profile export, get
//! back a structured review, and render it.
//!
//! ## Why this crate?
//!
//! The review service answers with JSON produced by a language model, so
//! any field can be missing or of the wrong type. This crate decodes that
//! payload leniently, escapes every string before it reaches markup, and
//! keeps the whole page (score badge, stats, suggestion sections, copy
//! buttons, certificate and share links) as an explicit value that hosts
//! and tests can inspect.
//!
//! ## Flow
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Submit   UiEvent::Submit ─▶ validate ─▶ loading on
//!  ├─ 2. Upload   POST /review (multipart: pdf, target_role)
//!  ├─ 3. Decode   interpret_response ─▶ ReviewResult (lenient)
//!  ├─ 4. Render   badge, stats, links, escaped sections ─▶ Page
//!  └─ 5. Act      copy section, open certificate, toggle theme
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use profile_review::{review_file, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .server_url("http://127.0.0.1:5000")
//!         .build()?;
//!     let review = review_file("Profile.pdf", "Backend Engineer", &config).await?;
//!     println!("score: {:?}", review.score);
//!     Ok(())
//! }
//! ```
//!
//! Interactive hosts drive a [`UiController`] instead; see the
//! [`controller`] module for the execution model.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `profile-review` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! ```toml
//! profile-review = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod controller;
pub mod error;
pub mod observer;
pub mod platform;
pub mod review;
pub mod theme;
pub mod upload;
pub mod view;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ClientConfig, ClientConfigBuilder};
pub use controller::{UiController, UiControllerBuilder, UiEvent};
pub use error::{ClipboardError, ReviewError};
pub use observer::{NoopObserver, Observer, UiObserver};
pub use review::{ExperienceTip, MissingSkills, ReviewResult, Skills, Suggestion};
pub use theme::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Theme};
pub use upload::{interpret_response, review_file, review_file_sync, PdfUpload, ReviewClient, UploadForm};
pub use view::page::Page;
pub use view::sections::SectionId;
