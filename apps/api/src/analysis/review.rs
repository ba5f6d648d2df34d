//! Review pipeline: resume text + JD → the raw report text the client parses.

use tracing::info;

use crate::analysis::keywords::match_keywords;
use crate::analysis::prompts::{build_review_prompt, EMPTY_REVIEW_FALLBACK};
use crate::analysis::scoring::{compute_resume_score, ScoringRules};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;

/// Scores the resume, asks the model for the four review sections, and assembles the
/// report text with the two metrics on top.
pub async fn review_resume(
    resume_text: &str,
    jd_text: &str,
    generator: &dyn TextGenerator,
) -> Result<String, AppError> {
    let keyword_match = match_keywords(resume_text, jd_text);
    let jd_percentage = keyword_match.percentage();
    let score = compute_resume_score(resume_text, jd_percentage, &ScoringRules::default());
    info!(
        score,
        jd_percentage,
        matched = keyword_match.matched.len(),
        keywords = keyword_match.total,
        "Resume scored"
    );

    let prompt = build_review_prompt(score, jd_percentage, resume_text, jd_text);
    let review = generator
        .generate(&prompt)
        .await?
        .unwrap_or_else(|| EMPTY_REVIEW_FALLBACK.to_string());

    Ok(compose_report(score, jd_percentage, &review))
}

/// `Resume Score: <s>` / `JD Match Percentage: <p>%` header followed by the review body.
pub fn compose_report(score: u32, jd_percentage: u32, review: &str) -> String {
    format!("Resume Score: {score}\n\nJD Match Percentage: {jd_percentage}%\n\n{review}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::report::{parse, SectionMarker};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubGenerator {
        reply: Result<Option<&'static str>, u16>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubGenerator {
        fn new(reply: Result<Option<&'static str>, u16>) -> Self {
            Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, prompt: &str) -> Result<Option<String>, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.reply {
                Ok(text) => Ok(text.map(String::from)),
                Err(status) => Err(LlmError::Api {
                    status,
                    message: "Quota exceeded".to_string(),
                }),
            }
        }
    }

    const REVIEW: &str = "Strengths:\n👉 Shipped Rust services\n\nMissing Skills:\n👉 Kubernetes\n\nImprovement Suggestions:\n👉 Add latency numbers\n\nATS Optimization Tips:\n👉 Use the exact job title";

    #[test]
    fn test_compose_report_layout() {
        assert_eq!(
            compose_report(85, 70, "body"),
            "Resume Score: 85\n\nJD Match Percentage: 70%\n\nbody\n"
        );
    }

    #[tokio::test]
    async fn test_review_output_round_trips_through_parser() {
        let generator = StubGenerator::new(Ok(Some(REVIEW)));
        let report_text = review_resume(
            "Built Rust services handling 10k rps",
            "Rust services engineer",
            &generator,
        )
        .await
        .unwrap();

        let report = parse(&report_text);
        // "rust" and "services" match, "engineer" does not: 66% → +15, digits → +10
        assert_eq!(report.jd_match_percent(), Some(66));
        assert_eq!(report.resume_score(), Some(75));
        assert_eq!(report.section(SectionMarker::MissingSkills)[0].text, "Kubernetes");

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Resume Score is: 75"));
    }

    #[tokio::test]
    async fn test_empty_generation_uses_fallback_text() {
        let generator = StubGenerator::new(Ok(None));
        let report_text = review_resume("resume", "job", &generator).await.unwrap();
        assert!(report_text.contains(EMPTY_REVIEW_FALLBACK));
        assert!(parse(&report_text).resume_score().is_some());
    }

    #[tokio::test]
    async fn test_quota_error_maps_to_rate_limited() {
        let generator = StubGenerator::new(Err(429));
        let err = review_resume("resume", "job", &generator).await.unwrap_err();
        assert!(matches!(err, AppError::RateLimited(_)));
    }

    #[tokio::test]
    async fn test_other_llm_error_maps_to_llm() {
        let generator = StubGenerator::new(Err(500));
        let err = review_resume("resume", "job", &generator).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
