//! HTML fragments for the suggestion sections.
//!
//! Every server-supplied string is escaped before insertion. Missing text
//! renders as an empty string, never as a literal like "undefined" or
//! "None".

use super::escape::{escape_html, text_content};
use crate::review::{ExperienceTip, MissingSkills, Skills, Suggestion};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Shown in the experience section when the review has no entries.
pub const NO_EXPERIENCE_MESSAGE: &str = "No role-specific suggestions were returned for this profile.";

/// Shown when `skills.missing` is neither a list nor a string.
pub const NOT_SPECIFIED: &str = "Not specified";

/// The suggestion sections of a rendered review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Headline,
    About,
    Experience,
    Skills,
    Keywords,
    Summary,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Headline,
        SectionId::About,
        SectionId::Experience,
        SectionId::Skills,
        SectionId::Keywords,
        SectionId::Summary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Headline => "headline",
            SectionId::About => "about",
            SectionId::Experience => "experience",
            SectionId::Skills => "skills",
            SectionId::Keywords => "keywords",
            SectionId::Summary => "summary",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionId::Headline => "Headline",
            SectionId::About => "About",
            SectionId::Experience => "Experience",
            SectionId::Skills => "Skills",
            SectionId::Keywords => "Keywords",
            SectionId::Summary => "Summary",
        }
    }

    /// Sections that expose a copy button.
    pub fn is_copyable(self) -> bool {
        matches!(
            self,
            SectionId::Headline | SectionId::About | SectionId::Keywords | SectionId::Summary
        )
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown section '{s}' (expected one of: {})",
                    SectionId::ALL.map(SectionId::as_str).join(", ")
                )
            })
    }
}

/// One rendered section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Escaped HTML fragment.
    pub html: String,
    /// Fragment of the element a copy button targets, if any.
    pub copy_target: Option<String>,
}

impl Section {
    /// Trimmed text content of the copy target; `None` when there is
    /// nothing to copy.
    pub fn copy_text(&self) -> Option<String> {
        let target = self.copy_target.as_deref()?;
        let text = text_content(target);
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

fn esc(value: Option<&str>) -> String {
    escape_html(value.unwrap_or_default())
}

/// Headline and About share a layout: the suggestion (copy target) and the
/// explanation underneath.
pub fn suggestion_section(s: &Suggestion) -> Section {
    let target = format!(
        "<p class=\"suggestion\">{}</p>",
        esc(s.suggestion.as_deref())
    );
    let html = format!(
        "{target}\n<p class=\"explanation\">{}</p>",
        esc(s.explanation.as_deref())
    );
    Section {
        html,
        copy_target: Some(target),
    }
}

pub fn experience_section(entries: &[ExperienceTip]) -> Section {
    if entries.is_empty() {
        return Section {
            html: format!("<p class=\"placeholder\">{NO_EXPERIENCE_MESSAGE}</p>"),
            copy_target: None,
        };
    }
    let html = entries
        .iter()
        .map(|e| {
            format!(
                "<div class=\"experience-item\">\n  <h4>{}</h4>\n  <p>{}</p>\n</div>",
                escape_html(&e.role),
                escape_html(&e.tips)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    Section {
        html,
        copy_target: None,
    }
}

/// Display text of `skills.missing`, unescaped.
pub fn missing_skills_text(missing: &MissingSkills) -> String {
    match missing {
        MissingSkills::List(items) => items.join(", "),
        MissingSkills::Text(s) => s.clone(),
        MissingSkills::Unspecified => NOT_SPECIFIED.to_string(),
    }
}

pub fn skills_section(skills: &Skills) -> Section {
    let html = format!(
        "<p><strong>Missing:</strong> {}</p>\n<p class=\"notes\">{}</p>",
        escape_html(&missing_skills_text(&skills.missing)),
        esc(skills.notes.as_deref())
    );
    Section {
        html,
        copy_target: None,
    }
}

pub fn keywords_section(keywords: &[String]) -> Section {
    let chips = keywords
        .iter()
        .map(|k| format!("<span class=\"keyword\">{}</span>", escape_html(k)))
        .collect::<Vec<_>>()
        .join(" ");
    let html = format!("<div class=\"keywords\">{chips}</div>");
    Section {
        copy_target: Some(html.clone()),
        html,
    }
}

pub fn summary_section(summary: Option<&str>) -> Section {
    let html = format!("<p class=\"summary\">{}</p>", esc(summary));
    Section {
        copy_target: Some(html.clone()),
        html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_suggestion_renders_empty() {
        let s = suggestion_section(&Suggestion::default());
        assert_eq!(
            s.html,
            "<p class=\"suggestion\"></p>\n<p class=\"explanation\"></p>"
        );
        assert!(!s.html.contains("undefined"));
        assert!(!s.html.contains("None"));
        assert_eq!(s.copy_text(), None);
    }

    #[test]
    fn suggestion_copy_text_is_the_suggestion_only() {
        let s = suggestion_section(&Suggestion {
            suggestion: Some("  Staff Engineer | Rust & Go  ".into()),
            explanation: Some("Names the stack".into()),
        });
        assert!(s.html.contains("Rust &amp; Go"));
        assert_eq!(s.copy_text().as_deref(), Some("Staff Engineer | Rust & Go"));
    }

    #[test]
    fn empty_experience_has_single_placeholder() {
        let s = experience_section(&[]);
        assert_eq!(s.html.matches("<p").count(), 1);
        assert!(s.html.contains(NO_EXPERIENCE_MESSAGE));
    }

    #[test]
    fn experience_blocks_per_entry() {
        let s = experience_section(&[
            ExperienceTip { role: "Engineer".into(), tips: "Quantify".into() },
            ExperienceTip { role: "<b>Lead</b>".into(), tips: String::new() },
        ]);
        assert_eq!(s.html.matches("experience-item").count(), 2);
        assert!(s.html.contains("&lt;b&gt;Lead&lt;/b&gt;"));
    }

    #[test]
    fn missing_skills_variants() {
        assert_eq!(
            missing_skills_text(&MissingSkills::List(vec!["SQL".into(), "Go".into()])),
            "SQL, Go"
        );
        assert_eq!(missing_skills_text(&MissingSkills::Text("SQL".into())), "SQL");
        assert_eq!(missing_skills_text(&MissingSkills::Unspecified), NOT_SPECIFIED);
    }

    #[test]
    fn keywords_are_escaped_chips() {
        let s = keywords_section(&["c++".into(), "<ml>".into()]);
        assert!(s.html.contains("<span class=\"keyword\">&lt;ml&gt;</span>"));
        assert_eq!(s.copy_text().as_deref(), Some("c++ <ml>"));
    }

    #[test]
    fn whitespace_summary_is_not_copyable() {
        assert_eq!(summary_section(Some("   \n ")).copy_text(), None);
        assert_eq!(summary_section(None).copy_text(), None);
    }

    #[test]
    fn section_ids_parse() {
        assert_eq!("Headline".parse::<SectionId>(), Ok(SectionId::Headline));
        assert!("footer".parse::<SectionId>().is_err());
    }
}
