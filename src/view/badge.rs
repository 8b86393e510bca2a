//! Score badge: display text, severity tier and certificate standing.

use serde::Serialize;
use std::fmt;

/// Shown wherever a numeric value is absent.
pub const PLACEHOLDER: &str = "—";

/// Severity class applied to the score badge.
///
/// Thresholds are inclusive lower bounds checked from the top, so every
/// finite score maps to exactly one tier:
///
/// | Tier | Score |
/// |------|-------|
/// | `excellent` | ≥ 90 |
/// | `good`      | ≥ 80 |
/// | `average`   | ≥ 70 |
/// | `weak`      | ≥ 50 |
/// | `poor`      | below 50 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTier {
    Excellent,
    Good,
    Average,
    Weak,
    Poor,
}

impl BadgeTier {
    pub const ALL: [BadgeTier; 5] = [
        BadgeTier::Excellent,
        BadgeTier::Good,
        BadgeTier::Average,
        BadgeTier::Weak,
        BadgeTier::Poor,
    ];

    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            BadgeTier::Excellent
        } else if score >= 80.0 {
            BadgeTier::Good
        } else if score >= 70.0 {
            BadgeTier::Average
        } else if score >= 50.0 {
            BadgeTier::Weak
        } else {
            BadgeTier::Poor
        }
    }

    /// CSS class name of the tier.
    pub fn class_name(self) -> &'static str {
        match self {
            BadgeTier::Excellent => "excellent",
            BadgeTier::Good => "good",
            BadgeTier::Average => "average",
            BadgeTier::Weak => "weak",
            BadgeTier::Poor => "poor",
        }
    }
}

impl fmt::Display for BadgeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Score as display text: integers without a fractional part.
pub fn format_score(score: f64) -> String {
    format!("{score}")
}

/// Badge text for an optional score.
pub fn score_text(score: Option<f64>) -> String {
    score.map(format_score).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Estimated standing printed next to the certificate action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub rank: &'static str,
    /// The profile is estimated to sit in the top `percentile` percent.
    pub percentile: u8,
}

impl Standing {
    pub fn for_score(score: f64) -> Self {
        let (rank, percentile) = if score >= 95.0 {
            ("S (Elite)", 99)
        } else if score >= 90.0 {
            ("A+ (Exceptional)", 95)
        } else if score >= 80.0 {
            ("A (Excellent)", 88)
        } else if score >= 70.0 {
            ("B (Strong)", 74)
        } else if score >= 60.0 {
            ("C (Average)", 63)
        } else {
            ("D (Needs Improvement)", 35)
        };
        Self { rank, percentile }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rank: {} • Approx. top {}% profiles", self.rank, self.percentile)
    }
}
