//! The review returned by the service, decoded at the boundary.
//!
//! The server forwards whatever its language model produced, so every field
//! is untrusted: it may be missing, `null`, or of the wrong JSON type.
//! [`ReviewResult::from_value`] inspects the payload field by field and keeps
//! only values of the expected type. Anything else becomes "absent" and the
//! renderer substitutes a neutral placeholder for it. Decoding never fails.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// A structured profile review.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReviewResult {
    /// Overall strength, nominally 0–100.
    pub score: Option<f64>,
    /// Profile owner's name, used on the certificate.
    pub full_name: Option<String>,
    pub connections: Option<f64>,
    pub followers: Option<f64>,
    pub headline: Suggestion,
    pub about: Suggestion,
    pub experience: Vec<ExperienceTip>,
    pub skills: Skills,
    pub keywords: Vec<String>,
    pub summary: Option<String>,
}

/// A ready-to-paste suggestion plus the reasoning behind it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub suggestion: Option<String>,
    pub explanation: Option<String>,
}

/// Phrasing tips for one role in the experience list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExperienceTip {
    pub role: String,
    pub tips: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Skills {
    pub missing: MissingSkills,
    pub notes: Option<String>,
}

/// The `skills.missing` field arrives either as a list or as prose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MissingSkills {
    List(Vec<String>),
    Text(String),
    #[default]
    Unspecified,
}

impl MissingSkills {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Array(items)) => MissingSkills::List(strings(items)),
            Some(Value::String(s)) => MissingSkills::Text(s.clone()),
            _ => MissingSkills::Unspecified,
        }
    }
}

impl ReviewResult {
    /// Decode an untrusted JSON value. Non-object input yields an empty review.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            debug!("review payload is not an object; rendering placeholders");
            return Self::default();
        };

        let skills = match obj.get("skills") {
            Some(Value::Object(s)) => Skills {
                missing: MissingSkills::from_value(s.get("missing")),
                notes: string_field(s, "notes"),
            },
            _ => Skills::default(),
        };

        Self {
            score: number_field(obj, "score"),
            full_name: string_field(obj, "full_name"),
            connections: number_field(obj, "connections"),
            followers: number_field(obj, "followers"),
            headline: suggestion_field(obj, "headline"),
            about: suggestion_field(obj, "about"),
            experience: experience_field(obj),
            skills,
            keywords: match obj.get("keywords") {
                Some(Value::Array(items)) => strings(items),
                _ => Vec::new(),
            },
            summary: string_field(obj, "summary"),
        }
    }

    /// The certificate name: `full_name` when it has visible content.
    pub fn display_name(&self) -> Option<&str> {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

fn number_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()),
        Some(Value::Null) | None => None,
        Some(other) => {
            debug!("ignoring non-numeric '{}': {}", key, other);
            None
        }
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn suggestion_field(obj: &Map<String, Value>, key: &str) -> Suggestion {
    match obj.get(key) {
        Some(Value::Object(s)) => Suggestion {
            suggestion: string_field(s, "suggestion"),
            explanation: string_field(s, "explanation"),
        },
        _ => Suggestion::default(),
    }
}

fn experience_field(obj: &Map<String, Value>) -> Vec<ExperienceTip> {
    let Some(Value::Array(items)) = obj.get("experience") else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| ExperienceTip {
            role: string_field(entry, "role").unwrap_or_default(),
            tips: string_field(entry, "tips").unwrap_or_default(),
        })
        .collect()
}

fn strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect()
}
