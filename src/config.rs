//! Client configuration.
//!
//! Everything the upload controller and renderer need to know about the
//! service lives in [`ClientConfig`], built via [`ClientConfigBuilder`].
//! The server URL doubles as the page origin embedded in share links.

use crate::error::ReviewError;
use reqwest::Url;
use std::path::PathBuf;

/// Default service address (the review server's development port).
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Name printed on certificates when the review carries no usable `full_name`.
pub const DEFAULT_DISPLAY_NAME: &str = "LinkedIn User";

/// Configuration for a review client.
///
/// # Example
/// ```rust
/// use profile_review::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .server_url("https://review.example.com")
///     .copy_feedback_ms(800)
///     .build()
///     .unwrap();
/// assert_eq!(config.origin(), "https://review.example.com");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the review service. Default: `http://127.0.0.1:5000`.
    pub server_url: Url,

    /// Path of the review endpoint. Default: `/review`.
    pub review_path: String,

    /// Path of the certificate endpoint. Default: `/certificate`.
    pub certificate_path: String,

    /// Certificate name used when `full_name` is blank or absent.
    pub default_display_name: String,

    /// Maximum characters of server `details` appended to an error. Default: 300.
    pub details_limit: usize,

    /// Label a copy button shows after a successful copy. Default: "Copied!".
    pub copy_feedback_label: String,

    /// How long the copy confirmation stays before reverting. Default: 1300 ms.
    pub copy_feedback_ms: u64,

    /// Where the theme preference is persisted. `None` keeps it in memory.
    pub preferences_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            review_path: "/review".to_string(),
            certificate_path: "/certificate".to_string(),
            default_display_name: DEFAULT_DISPLAY_NAME.to_string(),
            details_limit: 300,
            copy_feedback_label: "Copied!".to_string(),
            copy_feedback_ms: 1300,
            preferences_path: None,
        }
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
            server_url: None,
        }
    }

    /// Absolute URL of the review endpoint.
    pub fn review_url(&self) -> Url {
        join_path(&self.server_url, &self.review_path)
    }

    /// Absolute URL of the certificate endpoint, without query.
    pub fn certificate_url(&self) -> Url {
        join_path(&self.server_url, &self.certificate_path)
    }

    /// Scheme + host + port of the service, e.g. `https://review.example.com`.
    pub fn origin(&self) -> String {
        self.server_url.origin().ascii_serialization()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
    server_url: Option<String>,
}

impl ClientConfigBuilder {
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    pub fn review_path(mut self, path: impl Into<String>) -> Self {
        self.config.review_path = path.into();
        self
    }

    pub fn certificate_path(mut self, path: impl Into<String>) -> Self {
        self.config.certificate_path = path.into();
        self
    }

    pub fn default_display_name(mut self, name: impl Into<String>) -> Self {
        self.config.default_display_name = name.into();
        self
    }

    pub fn details_limit(mut self, n: usize) -> Self {
        self.config.details_limit = n;
        self
    }

    pub fn copy_feedback_label(mut self, label: impl Into<String>) -> Self {
        self.config.copy_feedback_label = label.into();
        self
    }

    pub fn copy_feedback_ms(mut self, ms: u64) -> Self {
        self.config.copy_feedback_ms = ms;
        self
    }

    pub fn preferences_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.preferences_path = Some(path.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(mut self) -> Result<ClientConfig, ReviewError> {
        if let Some(raw) = self.server_url.take() {
            let url = Url::parse(raw.trim()).map_err(|e| ReviewError::InvalidConfig {
                detail: format!("server URL '{raw}' is not valid: {e}"),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ReviewError::InvalidConfig {
                    detail: format!("server URL must be http or https, got '{}'", url.scheme()),
                });
            }
            self.config.server_url = url;
        }
        for (field, path) in [
            ("review path", &self.config.review_path),
            ("certificate path", &self.config.certificate_path),
        ] {
            if !path.starts_with('/') {
                return Err(ReviewError::InvalidConfig {
                    detail: format!("{field} must start with '/', got '{path}'"),
                });
            }
        }
        if self.config.default_display_name.trim().is_empty() {
            return Err(ReviewError::InvalidConfig {
                detail: "default display name must not be blank".into(),
            });
        }
        Ok(self.config)
    }
}

fn default_server_url() -> Url {
    Url::parse(DEFAULT_SERVER_URL).expect("default server URL is valid")
}

/// Append an absolute endpoint path to the base URL, keeping any base path
/// prefix (`https://host/app` + `/review` → `https://host/app/review`).
fn join_path(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let prefix = base.path().trim_end_matches('/');
    url.set_path(&format!("{prefix}{path}"));
    url.set_query(None);
    url
}
