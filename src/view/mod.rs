//! Review rendering: from a decoded [`ReviewResult`] to page content.
//!
//! The rendered page is an explicit [`page::Page`] value. Rendering is a
//! pure, synchronous update of that value; no stage here touches the
//! network or the clipboard.
//!
//! ## Data Flow
//!
//! ```text
//! ReviewResult ──▶ badge ──▶ links ──▶ sections ──▶ page
//!                 (tier)   (cert/share) (escaped HTML)
//! ```
//!
//! 1. [`badge`]   : score text, severity tier, certificate standing
//! 2. [`links`]   : certificate and share URLs, only for numeric scores
//! 3. [`sections`]: HTML fragments for each suggestion section; every
//!    server string passes through [`escape::escape_html`]
//! 4. [`render`]  : applies all of the above to a [`page::Page`]
//! 5. [`document`]: optional standalone HTML document of a rendered page
//!
//! [`ReviewResult`]: crate::review::ReviewResult

pub mod badge;
pub mod document;
pub mod escape;
pub mod links;
pub mod page;
pub mod render;
pub mod sections;
