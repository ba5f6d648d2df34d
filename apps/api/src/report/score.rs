use serde::{Deserialize, Serialize};

use crate::report::sections::find_ignore_ascii_case;

/// The two labeled metrics a report may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorePattern {
    /// `Resume Score: <int>`
    ResumeScore,
    /// `JD Match Percentage: <int>%`
    JdMatchPercent,
}

impl ScorePattern {
    pub fn label(self) -> &'static str {
        match self {
            ScorePattern::ResumeScore => "Resume Score:",
            ScorePattern::JdMatchPercent => "JD Match Percentage:",
        }
    }

    fn requires_percent(self) -> bool {
        matches!(self, ScorePattern::JdMatchPercent)
    }
}

/// Presentation band for a 0–100 score. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Low,
    Medium,
    High,
}

impl ScoreBand {
    /// high ≥ 80, medium 60–79, low < 60
    pub fn classify(score: u32) -> Self {
        if score >= 80 {
            ScoreBand::High
        } else if score >= 60 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

/// Finds the first `<label> <digits>` occurrence (label matched case-insensitively) and returns
/// its value. Occurrences whose digits are missing, overflow, or lack a required `%` are
/// skipped; no match at all is `None`.
pub fn parse_score(text: &str, pattern: ScorePattern) -> Option<u32> {
    let label = pattern.label();
    let mut offset = 0;
    while let Some(idx) = find_ignore_ascii_case(&text[offset..], label) {
        let after = offset + idx + label.len();
        if let Some(value) = read_value(&text[after..], pattern.requires_percent()) {
            return Some(value);
        }
        offset = after;
    }
    None
}

fn read_value(rest: &str, requires_percent: bool) -> Option<u32> {
    let rest = rest.trim_start();
    let digits_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_len == 0 {
        return None;
    }
    if requires_percent && !rest[digits_len..].starts_with('%') {
        return None;
    }
    rest[..digits_len].parse().ok()
}
