//! Certificate and share links derived from a numeric score.
//!
//! Both are only offered when the review carries a score; the renderer
//! checks that before calling in here.

use super::badge::format_score;
use crate::config::ClientConfig;

/// Share-intent endpoint of the social network; the sentence is appended
/// URL-encoded.
pub const SHARE_INTENT_URL: &str = "https://www.linkedin.com/feed/?shareActive=true&text=";

/// `GET {certificate}?score=<n>&name=<s>` with both values URL-encoded.
///
/// A blank or missing `name` falls back to the configured default.
pub fn certificate_link(config: &ClientConfig, score: f64, name: Option<&str>) -> String {
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(config.default_display_name.as_str());
    format!(
        "{}?score={}&name={}",
        config.certificate_url(),
        urlencoding::encode(&format_score(score)),
        urlencoding::encode(name)
    )
}

/// The sentence posted by the share action.
pub fn share_sentence(score: f64, origin: &str) -> String {
    format!(
        "I just scored {}/100 on my LinkedIn profile review! Get your own review at {}",
        format_score(score),
        origin
    )
}

pub fn share_link(score: f64, origin: &str) -> String {
    format!(
        "{}{}",
        SHARE_INTENT_URL,
        urlencoding::encode(&share_sentence(score, origin))
    )
}
