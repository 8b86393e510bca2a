//! Upload controller: send a PDF to the review endpoint and interpret the
//! reply.
//!
//! ## Response handling
//!
//! The outcome of a request is decided by [`interpret_response`], a pure
//! function of status and body so each branch is testable without a
//! server:
//!
//! | Status | Body | Outcome |
//! |--------|------|---------|
//! | 2xx    | `{review: <any non-null>}` | `Ok(ReviewResult)` |
//! | 2xx    | not JSON, or `review` missing/null | [`ReviewError::InvalidResponse`] |
//! | other  | `{error: "<non-blank>", details?}` | [`ReviewError::Server`] |
//! | other  | anything else | [`ReviewError::ReviewFailed`] |
//!
//! A `review` of the wrong JSON type still renders, as placeholders.
//!
//! Transport failures (connect, TLS, body read) become
//! [`ReviewError::Transport`]. Nothing is retried.

use crate::config::ClientConfig;
use crate::error::{truncate_details, ReviewError};
use crate::review::ReviewResult;
use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

/// A selected PDF, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PdfUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a file from disk. The content is not inspected.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ReviewError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ReviewError::FileUnreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "profile.pdf".to_string());
        debug!("read {} ({} bytes)", path.display(), bytes.len());
        Ok(Self::new(file_name, bytes))
    }
}

/// The submitted form: an optional file and the target role text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub pdf: Option<PdfUpload>,
    /// May be empty; sent as-is.
    pub target_role: String,
}

impl UploadForm {
    pub fn new(pdf: Option<PdfUpload>, target_role: impl Into<String>) -> Self {
        Self {
            pdf,
            target_role: target_role.into(),
        }
    }
}

/// HTTP client for the review endpoint.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ReviewClient {
    http: reqwest::Client,
    endpoint: Url,
    details_limit: usize,
}

impl ReviewClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ReviewError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ReviewError::InvalidConfig {
                detail: format!("HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            endpoint: config.review_url(),
            details_limit: config.details_limit,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Validate the form and send it.
    ///
    /// A form without a file fails with [`ReviewError::NoFileSelected`]
    /// before any network activity.
    pub async fn submit(&self, form: &UploadForm) -> Result<ReviewResult, ReviewError> {
        let pdf = form.pdf.as_ref().ok_or(ReviewError::NoFileSelected)?;
        self.send(pdf, &form.target_role).await
    }

    /// `POST` the multipart body `{pdf, target_role}` and interpret the reply.
    pub async fn send(&self, pdf: &PdfUpload, target_role: &str) -> Result<ReviewResult, ReviewError> {
        info!(
            "submitting '{}' ({} bytes) to {}",
            pdf.file_name,
            pdf.bytes.len(),
            self.endpoint
        );

        let part = Part::bytes(pdf.bytes.clone())
            .file_name(pdf.file_name.clone())
            .mime_str("application/pdf")
            .map_err(transport)?;
        let form = Form::new()
            .part("pdf", part)
            .text("target_role", target_role.to_string());

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;
        debug!("review endpoint answered {} with {} bytes", status, body.len());

        let outcome = interpret_response(status, &body, self.details_limit);
        if let Err(ref e) = outcome {
            warn!("review failed: {}", e);
        }
        outcome
    }
}

fn transport(e: reqwest::Error) -> ReviewError {
    ReviewError::Transport {
        message: e.to_string(),
    }
}

/// Decide the outcome of a response from its status and raw body.
pub fn interpret_response(
    status: StatusCode,
    body: &[u8],
    details_limit: usize,
) -> Result<ReviewResult, ReviewError> {
    let parsed = serde_json::from_slice::<Value>(body);

    if !status.is_success() {
        let Ok(Value::Object(obj)) = parsed else {
            return Err(ReviewError::ReviewFailed {
                status: status.as_u16(),
            });
        };
        let Some(message) = obj
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
        else {
            return Err(ReviewError::ReviewFailed {
                status: status.as_u16(),
            });
        };
        let details = obj
            .get("details")
            .and_then(Value::as_str)
            .map(|d| truncate_details(d, details_limit))
            .filter(|d| !d.is_empty());
        return Err(ReviewError::Server {
            status: status.as_u16(),
            message: message.to_string(),
            details,
        });
    }

    let data = parsed.map_err(|e| ReviewError::InvalidResponse {
        detail: e.to_string(),
    })?;
    match data.get("review") {
        None | Some(Value::Null) => Err(ReviewError::InvalidResponse {
            detail: "response has no 'review' field".into(),
        }),
        Some(review) => Ok(ReviewResult::from_value(review)),
    }
}

/// One-shot review of a file on disk.
///
/// # Example
/// ```rust,no_run
/// use profile_review::{review_file, ClientConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let review = review_file("Profile.pdf", "Data Engineer", &ClientConfig::default()).await?;
/// println!("score: {:?}", review.score);
/// # Ok(())
/// # }
/// ```
pub async fn review_file(
    path: impl AsRef<Path>,
    target_role: &str,
    config: &ClientConfig,
) -> Result<ReviewResult, ReviewError> {
    let pdf = PdfUpload::from_path(path).await?;
    ReviewClient::new(config)?.send(&pdf, target_role).await
}

/// Synchronous wrapper around [`review_file`].
///
/// Creates a temporary tokio runtime internally.
pub fn review_file_sync(
    path: impl AsRef<Path>,
    target_role: &str,
    config: &ClientConfig,
) -> Result<ReviewResult, ReviewError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ReviewError::Transport {
            message: format!("failed to create tokio runtime: {e}"),
        })?
        .block_on(review_file(path, target_role, config))
}
