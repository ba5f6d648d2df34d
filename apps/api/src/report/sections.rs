//! Section segmentation: locating the four fixed markers and slicing the text between them.

use serde::{Deserialize, Serialize};

/// Content category a section's items are tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Strength,
    Missing,
    Example,
    Ats,
}

/// One of the four fixed section labels. Variant order is the canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionMarker {
    Strengths,
    MissingSkills,
    ImprovementSuggestions,
    AtsOptimizationTips,
}

static CANONICAL_ORDER: [SectionMarker; 4] = SectionMarker::ALL;

impl SectionMarker {
    pub const ALL: [SectionMarker; 4] = [
        SectionMarker::Strengths,
        SectionMarker::MissingSkills,
        SectionMarker::ImprovementSuggestions,
        SectionMarker::AtsOptimizationTips,
    ];

    /// The literal label as it appears in report text.
    pub fn label(self) -> &'static str {
        match self {
            SectionMarker::Strengths => "Strengths:",
            SectionMarker::MissingSkills => "Missing Skills:",
            SectionMarker::ImprovementSuggestions => "Improvement Suggestions:",
            SectionMarker::AtsOptimizationTips => "ATS Optimization Tips:",
        }
    }

    pub fn category(self) -> Category {
        match self {
            SectionMarker::Strengths => Category::Strength,
            SectionMarker::MissingSkills => Category::Missing,
            SectionMarker::ImprovementSuggestions => Category::Example,
            SectionMarker::AtsOptimizationTips => Category::Ats,
        }
    }

    /// Markers that come after this one in canonical order.
    pub fn later(self) -> &'static [SectionMarker] {
        let idx = CANONICAL_ORDER
            .iter()
            .position(|m| *m == self)
            .unwrap_or(CANONICAL_ORDER.len());
        &CANONICAL_ORDER[(idx + 1).min(CANONICAL_ORDER.len())..]
    }
}

/// Byte range of one marker's body within the raw text. `start` is just past the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub marker: SectionMarker,
    pub start: usize,
    pub end: usize,
}

impl SectionSpan {
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Returns the text between the first `start_label` and the next `end_label`, trimmed.
///
/// A missing start label yields an empty string. A missing (or omitted) end label runs the
/// section to the end of the text.
pub fn extract_section(text: &str, start_label: &str, end_label: Option<&str>) -> String {
    let Some(from) = body_start(text, start_label) else {
        return String::new();
    };
    let to = end_label
        .and_then(|end| text[from..].find(end).map(|offset| from + offset))
        .unwrap_or(text.len());
    text[from..to].trim().to_string()
}

/// Scans the four markers in canonical order and returns the body span of each one present.
///
/// A span stops at the earliest later marker label found after its start, so a section never
/// swallows a following section's heading even when the immediate successor is missing.
pub fn section_spans(text: &str) -> Vec<SectionSpan> {
    SectionMarker::ALL
        .iter()
        .filter_map(|&marker| {
            let start = body_start(text, marker.label())?;
            let end = marker
                .later()
                .iter()
                .filter_map(|next| text[start..].find(next.label()).map(|offset| start + offset))
                .min()
                .unwrap_or(text.len());
            Some(SectionSpan { marker, start, end })
        })
        .collect()
}

fn body_start(text: &str, label: &str) -> Option<usize> {
    text.find(label).map(|idx| idx + label.len())
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
///
/// `needle` must be ASCII, which keeps every match on a char boundary.
pub(crate) fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let (h, n) = (haystack.as_bytes(), needle.as_bytes());
    if n.is_empty() {
        return Some(0);
    }
    h.windows(n.len()).position(|w| w.eq_ignore_ascii_case(n))
}
