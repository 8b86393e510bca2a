//! Apply a [`ReviewResult`] to a [`Page`].
//!
//! Rendering never fails: every absent or wrong-typed field was already
//! reduced to `None`/empty by the decoder, and each one maps to a neutral
//! placeholder here.

use super::badge::{score_text, BadgeTier, Standing, PLACEHOLDER};
use super::links::{certificate_link, share_link};
use super::page::{CertificateAction, Page};
use super::sections::{
    experience_section, keywords_section, skills_section, suggestion_section, summary_section,
    SectionId,
};
use crate::config::ClientConfig;
use crate::review::ReviewResult;
use tracing::debug;

/// Render `review` into `page`.
///
/// Does not toggle the result container or the loading indicator; those
/// belong to the submission flow.
pub fn render_review(page: &mut Page, review: &ReviewResult, config: &ClientConfig) {
    // ── Score badge ──────────────────────────────────────────────────────
    page.score.text = score_text(review.score);
    page.score.tier = review.score.map(BadgeTier::from_score);
    page.score.pulse.restart();

    // ── Derived actions ──────────────────────────────────────────────────
    match review.score {
        Some(score) => {
            page.certificate = Some(CertificateAction {
                url: certificate_link(config, score, review.display_name()),
                standing: Standing::for_score(score),
            });
            page.share_url = Some(share_link(score, &config.origin()));
        }
        None => {
            debug!("review has no numeric score; hiding certificate and share actions");
            page.certificate = None;
            page.share_url = None;
        }
    }

    // ── Profile stats ────────────────────────────────────────────────────
    page.stats.connections = stat_text(review.connections);
    page.stats.followers = stat_text(review.followers);
    page.stats.visible = true;

    // ── Sections ─────────────────────────────────────────────────────────
    page.set_section(SectionId::Headline, suggestion_section(&review.headline));
    page.set_section(SectionId::About, suggestion_section(&review.about));
    page.set_section(SectionId::Experience, experience_section(&review.experience));
    page.set_section(SectionId::Skills, skills_section(&review.skills));
    page.set_section(SectionId::Keywords, keywords_section(&review.keywords));
    page.set_section(SectionId::Summary, summary_section(review.summary.as_deref()));
}

fn stat_text(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v}"))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: serde_json::Value) -> Page {
        let mut page = Page::default();
        let review = ReviewResult::from_value(&value);
        render_review(&mut page, &review, &ClientConfig::default());
        page
    }

    #[test]
    fn empty_review_uses_placeholders() {
        let page = render(json!({}));
        assert_eq!(page.score.text, PLACEHOLDER);
        assert_eq!(page.score.tier, None);
        assert!(page.certificate.is_none());
        assert!(page.share_url.is_none());
        assert!(page.stats.visible);
        assert_eq!(page.stats.connections, PLACEHOLDER);
        assert_eq!(page.stats.followers, PLACEHOLDER);
        let skills = page.section(SectionId::Skills).unwrap();
        assert!(skills.html.contains("Not specified"));
        for (_, section) in page.sections() {
            assert!(!section.html.contains("undefined"));
            assert!(!section.html.contains("null"));
        }
    }

    #[test]
    fn scored_review_offers_actions() {
        let page = render(json!({"score": 85, "full_name": "Jane Doe", "connections": 500}));
        assert_eq!(page.score.text, "85");
        assert_eq!(page.score.tier, Some(BadgeTier::Good));
        let cert = page.certificate.unwrap();
        assert!(cert.url.contains("score=85"));
        assert!(cert.url.contains("name=Jane%20Doe"));
        assert_eq!(cert.standing.rank, "A (Excellent)");
        assert!(page.share_url.unwrap().contains("85%2F100"));
        assert_eq!(page.stats.connections, "500");
        assert_eq!(page.stats.followers, PLACEHOLDER);
    }

    #[test]
    fn injection_is_escaped_everywhere() {
        let evil = "<img src=x onerror=\"alert('x')\"> & co";
        let page = render(json!({
            "headline": {"suggestion": evil, "explanation": evil},
            "about": {"suggestion": evil},
            "experience": [{"role": evil, "tips": evil}],
            "skills": {"missing": [evil], "notes": evil},
            "keywords": [evil],
            "summary": evil
        }));
        for (id, section) in page.sections() {
            assert!(!section.html.contains("<img"), "{id} leaked markup");
            assert!(!section.html.contains("'x'"), "{id} leaked quote");
            assert!(section.html.contains("&lt;img"), "{id} missing escape");
            assert!(section.html.contains("&amp; co"), "{id} missing &amp;");
        }
    }

    #[test]
    fn each_render_restarts_pulse() {
        let mut page = Page::default();
        let review = ReviewResult::from_value(&json!({"score": 70}));
        let config = ClientConfig::default();
        render_review(&mut page, &review, &config);
        render_review(&mut page, &review, &config);
        assert_eq!(page.score.pulse.restarts, 2);
        assert!(page.score.pulse.active);
    }

    #[test]
    fn later_render_without_score_clears_actions() {
        let mut page = Page::default();
        let config = ClientConfig::default();
        render_review(&mut page, &ReviewResult::from_value(&json!({"score": 95})), &config);
        assert!(page.certificate.is_some());
        render_review(&mut page, &ReviewResult::from_value(&json!({"score": "n/a"})), &config);
        assert!(page.certificate.is_none());
        assert_eq!(page.score.tier, None);
    }
}
