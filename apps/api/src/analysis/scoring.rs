use serde::{Deserialize, Serialize};

/// Tunables for the heuristic resume score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringRules {
    pub base: u32,
    /// Resumes longer than this many characters earn `length_bonus`.
    pub length_threshold: usize,
    pub length_bonus: u32,
    /// Awarded when the resume mentions any number (dates, metrics, team sizes).
    pub numbers_bonus: u32,
    /// `(minimum JD match percentage, bonus)`, highest threshold first. First hit wins.
    pub jd_match_tiers: Vec<(u32, u32)>,
    pub cap: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            base: 50,
            length_threshold: 1500,
            length_bonus: 10,
            numbers_bonus: 10,
            jd_match_tiers: vec![(80, 25), (60, 15), (40, 5)],
            cap: 95,
        }
    }
}

/// Computes the 0–100 resume score from the extracted text and the JD match percentage.
pub fn compute_resume_score(resume_text: &str, jd_match_percent: u32, rules: &ScoringRules) -> u32 {
    let mut score = rules.base;

    if resume_text.chars().count() > rules.length_threshold {
        score += rules.length_bonus;
    }

    if resume_text.chars().any(|c| c.is_ascii_digit()) {
        score += rules.numbers_bonus;
    }

    if let Some((_, bonus)) = rules
        .jd_match_tiers
        .iter()
        .find(|(threshold, _)| jd_match_percent >= *threshold)
    {
        score += bonus;
    }

    score.min(rules.cap)
}
