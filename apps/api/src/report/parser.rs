use std::collections::BTreeMap;

use serde::Serialize;

use crate::report::normalize::{normalize, split_items};
use crate::report::score::{parse_score, ScoreBand, ScorePattern};
use crate::report::sections::{section_spans, Category, SectionMarker};

/// One normalized, bullet-stripped line of report content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayItem {
    pub text: String,
    pub category: Category,
}

/// Display-ready form of one analysis report.
///
/// Every marker has an entry in `sections`, possibly empty. Built once by [`parse`] and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedReport {
    resume_score: Option<u32>,
    jd_match_percent: Option<u32>,
    sections: BTreeMap<SectionMarker, Vec<DisplayItem>>,
}

impl ParsedReport {
    pub fn resume_score(&self) -> Option<u32> {
        self.resume_score
    }

    pub fn jd_match_percent(&self) -> Option<u32> {
        self.jd_match_percent
    }

    pub fn resume_band(&self) -> Option<ScoreBand> {
        self.resume_score.map(ScoreBand::classify)
    }

    pub fn jd_match_band(&self) -> Option<ScoreBand> {
        self.jd_match_percent.map(ScoreBand::classify)
    }

    /// Items for `marker`, in extraction order.
    pub fn section(&self, marker: SectionMarker) -> &[DisplayItem] {
        self.sections.get(&marker).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All sections in canonical marker order.
    pub fn sections(&self) -> impl Iterator<Item = (SectionMarker, &[DisplayItem])> + '_ {
        self.sections.iter().map(|(marker, items)| (*marker, items.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.resume_score.is_none()
            && self.jd_match_percent.is_none()
            && self.sections.values().all(Vec::is_empty)
    }
}

/// Parses raw analysis text. Never fails; anything unrecognized is simply absent.
///
/// Each section ends at the first later heading present in the text, not only at its direct
/// successor: with `Missing Skills:` absent, `Strengths:` stops at `Improvement Suggestions:`
/// rather than running to the end of the text.
pub fn parse(raw: &str) -> ParsedReport {
    let mut sections: BTreeMap<SectionMarker, Vec<DisplayItem>> = SectionMarker::ALL
        .iter()
        .map(|marker| (*marker, Vec::new()))
        .collect();

    for span in section_spans(raw) {
        let category = span.marker.category();
        let items = split_items(&normalize(span.slice(raw).trim()))
            .into_iter()
            .map(|text| DisplayItem { text, category })
            .collect();
        sections.insert(span.marker, items);
    }

    ParsedReport {
        resume_score: parse_score(raw, ScorePattern::ResumeScore),
        jd_match_percent: parse_score(raw, ScorePattern::JdMatchPercent),
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_A: &str = "Resume Score: 85\nJD Match Percentage: 70%\nStrengths:\n- Good communication\nMissing Skills:\n- Python\nImprovement Suggestions:\n- Add metrics\nATS Optimization Tips:\n- Use keywords";

    fn texts(report: &ParsedReport, marker: SectionMarker) -> Vec<&str> {
        report.section(marker).iter().map(|i| i.text.as_str()).collect()
    }

    #[test]
    fn test_scenario_full_report() {
        let report = parse(SCENARIO_A);
        assert_eq!(report.resume_score(), Some(85));
        assert_eq!(report.resume_band(), Some(ScoreBand::High));
        assert_eq!(report.jd_match_percent(), Some(70));
        assert_eq!(report.jd_match_band(), Some(ScoreBand::Medium));
        assert_eq!(texts(&report, SectionMarker::Strengths), vec!["Good communication"]);
        assert_eq!(texts(&report, SectionMarker::MissingSkills), vec!["Python"]);
        assert_eq!(
            texts(&report, SectionMarker::ImprovementSuggestions),
            vec!["Add metrics"]
        );
        assert_eq!(
            texts(&report, SectionMarker::AtsOptimizationTips),
            vec!["Use keywords"]
        );
        assert_eq!(
            report.section(SectionMarker::ImprovementSuggestions)[0].category,
            Category::Example
        );
    }

    #[test]
    fn test_scenario_unrecognized_text() {
        let report = parse("The service returned something unexpected.\n- stray bullet");
        assert_eq!(report.resume_score(), None);
        assert_eq!(report.jd_match_percent(), None);
        assert!(report.is_empty());
        assert_eq!(report.sections().count(), 4);
        for (_, items) in report.sections() {
            assert!(items.is_empty());
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_missing_marker_yields_empty_section() {
        let text = SCENARIO_A.replace("Missing Skills:\n- Python\n", "");
        let report = parse(&text);
        assert!(report.section(SectionMarker::MissingSkills).is_empty());
        assert_eq!(texts(&report, SectionMarker::Strengths), vec!["Good communication"]);
    }

    #[test]
    fn test_service_output_with_pointer_bullets() {
        let raw = "Resume Score: 65\n\nJD Match Percentage: 42%\n\nStrengths:\n👉 Clear project ownership\n\n👉 Solid SQL\n\nMissing Skills:\n👉 Kubernetes\n\nImprovement Suggestions:\n👉 Quantify impact, e.g. \"cut latency 30%\"\n\nATS Optimization Tips:\n👉 Mirror the job title\n\n👉 Avoid tables\n";
        let report = parse(raw);
        assert_eq!(report.resume_band(), Some(ScoreBand::Medium));
        assert_eq!(report.jd_match_band(), Some(ScoreBand::Low));
        assert_eq!(
            texts(&report, SectionMarker::Strengths),
            vec!["Clear project ownership", "Solid SQL"]
        );
        assert_eq!(
            texts(&report, SectionMarker::AtsOptimizationTips),
            vec!["Mirror the job title", "Avoid tables"]
        );
    }

    #[test]
    fn test_item_order_matches_source_order() {
        let raw = "Strengths:\n- c\n- a\n- b\n- a\nMissing Skills:\nx\ny\nImprovement Suggestions:\n\nATS Optimization Tips:\n- z";
        let report = parse(raw);
        assert_eq!(texts(&report, SectionMarker::Strengths), vec!["c", "a", "b", "a"]);
        assert_eq!(texts(&report, SectionMarker::MissingSkills), vec!["x", "y"]);
        assert!(report.section(SectionMarker::ImprovementSuggestions).is_empty());
        assert_eq!(texts(&report, SectionMarker::AtsOptimizationTips), vec!["z"]);
    }

    #[test]
    fn test_section_does_not_cross_later_heading() {
        let raw = "Strengths:\n- a\nATS Optimization Tips:\n- z";
        let report = parse(raw);
        assert_eq!(texts(&report, SectionMarker::Strengths), vec!["a"]);
        assert_eq!(texts(&report, SectionMarker::AtsOptimizationTips), vec!["z"]);
    }

    #[test]
    fn test_serializes_snake_case() {
        let value = serde_json::to_value(parse(SCENARIO_A)).unwrap();
        assert_eq!(value["resume_score"], 85);
        assert_eq!(value["sections"]["missing_skills"][0]["text"], "Python");
        assert_eq!(value["sections"]["missing_skills"][0]["category"], "missing");
    }
}
