//! Error types for the profile-review library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ReviewError`]: **terminal for a submission**. The upload could not
//!   produce a review (no file, network failure, server-reported error,
//!   unreadable response). The page shows exactly one message and nothing
//!   from the failed attempt is rendered.
//!
//! * [`ClipboardError`]: **independent and non-fatal**. A copy action failed.
//!   It is reported in the same error region but never touches review state.
//!
//! Both expose `user_message()`, the exact string placed in the page's error
//! region. `Display` carries the same text so logs and UI agree.

use std::path::PathBuf;
use thiserror::Error;

/// Shown when nothing was selected for upload.
pub const NO_FILE_MESSAGE: &str = "Please select a PDF file to review.";

/// Shown for a non-OK status whose body carries no usable `error` field.
pub const REVIEW_FAILED_MESSAGE: &str = "Review failed. Please try again.";

/// Shown when a 2xx response body is not the expected JSON.
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server.";

/// Shown for transport failures that carry no message of their own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Shown when writing to the clipboard fails.
pub const COPY_FAILED_MESSAGE: &str = "Could not copy to clipboard.";

/// Shown when the certificate link cannot be opened.
pub const OPEN_LINK_FAILED_MESSAGE: &str = "Could not open the certificate link.";

/// Every way a single review submission can fail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewError {
    // ── Local validation ──────────────────────────────────────────────────
    /// Submission without a selected file. No request is made.
    #[error("{}", NO_FILE_MESSAGE)]
    NoFileSelected,

    /// The selected file could not be read from disk. No request is made.
    #[error("Could not read '{}': {reason}", .path.display())]
    FileUnreadable { path: PathBuf, reason: String },

    // ── Transport ─────────────────────────────────────────────────────────
    /// The request never produced a response (DNS, connect, TLS, body read).
    ///
    /// `message` may be empty, in which case the generic fallback is shown.
    #[error("{}", display_or_fallback(.message))]
    Transport { message: String },

    // ── Server-reported ───────────────────────────────────────────────────
    /// Non-OK status with a JSON `{error, details?}` body.
    ///
    /// `details` is already truncated to the configured limit.
    #[error("{}", join_details(.message, .details.as_deref()))]
    Server {
        status: u16,
        message: String,
        details: Option<String>,
    },

    /// Non-OK status whose body was not a usable error object.
    #[error("{}", REVIEW_FAILED_MESSAGE)]
    ReviewFailed { status: u16 },

    // ── Response parsing ──────────────────────────────────────────────────
    /// 2xx status but the body was not JSON, or carried no `review` value.
    #[error("{}", INVALID_RESPONSE_MESSAGE)]
    InvalidResponse { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },
}

impl ReviewError {
    /// The single string shown in the page's error region.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// True for errors raised before any network activity.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ReviewError::NoFileSelected | ReviewError::FileUnreadable { .. }
        )
    }
}

/// A failed copy-to-clipboard action.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The clipboard backend rejected the write.
    #[error("{}", COPY_FAILED_MESSAGE)]
    WriteFailed {
        #[source]
        source: std::io::Error,
    },

    /// No clipboard is reachable from this process.
    #[error("{}", COPY_FAILED_MESSAGE)]
    Unavailable,
}

impl ClipboardError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

fn display_or_fallback(message: &str) -> &str {
    if message.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE
    } else {
        message
    }
}

fn join_details(message: &str, details: Option<&str>) -> String {
    match details {
        Some(d) if !d.is_empty() => format!("{message}: {d}"),
        _ => message.to_string(),
    }
}

/// Keep at most `limit` characters of `details`, on a char boundary.
pub(crate) fn truncate_details(details: &str, limit: usize) -> String {
    details.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_with_details() {
        let e = ReviewError::Server {
            status: 500,
            message: "Failed to parse PDF.".into(),
            details: Some("xref table broken".into()),
        };
        assert_eq!(e.user_message(), "Failed to parse PDF.: xref table broken");
    }

    #[test]
    fn server_error_without_details() {
        let e = ReviewError::Server {
            status: 400,
            message: "No file uploaded.".into(),
            details: None,
        };
        assert_eq!(e.user_message(), "No file uploaded.");
    }

    #[test]
    fn transport_error_uses_fallback_when_blank() {
        let e = ReviewError::Transport {
            message: "  ".into(),
        };
        assert_eq!(e.user_message(), GENERIC_FAILURE_MESSAGE);

        let e = ReviewError::Transport {
            message: "connection refused".into(),
        };
        assert_eq!(e.user_message(), "connection refused");
    }

    #[test]
    fn fixed_messages() {
        assert_eq!(ReviewError::NoFileSelected.user_message(), NO_FILE_MESSAGE);
        assert_eq!(
            ReviewError::ReviewFailed { status: 502 }.user_message(),
            REVIEW_FAILED_MESSAGE
        );
        assert_eq!(
            ReviewError::InvalidResponse {
                detail: "expected value".into()
            }
            .user_message(),
            INVALID_RESPONSE_MESSAGE
        );
    }

    #[test]
    fn local_errors() {
        assert!(ReviewError::NoFileSelected.is_local());
        assert!(!ReviewError::ReviewFailed { status: 500 }.is_local());
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let long = "é".repeat(400);
        let t = truncate_details(&long, 300);
        assert_eq!(t.chars().count(), 300);
        assert_eq!(truncate_details("short", 300), "short");
    }

    #[test]
    fn clipboard_error_message() {
        assert_eq!(
            ClipboardError::Unavailable.user_message(),
            COPY_FAILED_MESSAGE
        );
    }
}
