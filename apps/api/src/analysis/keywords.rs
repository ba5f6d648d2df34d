//! JD keyword extraction and whole-word matching against resume text.

use std::collections::{BTreeSet, HashSet};

const STOPWORDS: &[&str] = &[
    "the", "and", "or", "to", "a", "of", "in", "for", "with", "on", "at", "is", "are", "as",
    "an", "be", "by", "this", "that", "from", "using", "will", "must", "should", "required",
    "responsible",
];

/// Keywords shorter than this many characters are ignored.
const MIN_KEYWORD_LEN: usize = 4;

/// Lowercases, replaces everything outside `[a-z0-9]` and whitespace with a space, and
/// collapses whitespace runs to single spaces.
pub fn clean_text(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Distinct JD tokens of at least four characters that are not stopwords.
pub fn extract_keywords(jd_text: &str) -> BTreeSet<String> {
    clean_text(jd_text)
        .split(' ')
        .filter(|word| word.len() >= MIN_KEYWORD_LEN && !STOPWORDS.contains(word))
        .map(String::from)
        .collect()
}

/// Outcome of matching JD keywords against a resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    pub matched: BTreeSet<String>,
    pub total: usize,
}

impl KeywordMatch {
    /// `floor(matched * 100 / total)`, or 0 when the JD yielded no keywords.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.matched.len() * 100 / self.total) as u32
    }
}

/// Matches every JD keyword against the resume's cleaned tokens (whole words only).
pub fn match_keywords(resume_text: &str, jd_text: &str) -> KeywordMatch {
    let keywords = extract_keywords(jd_text);
    let cleaned = clean_text(resume_text);
    let tokens: HashSet<&str> = cleaned.split(' ').collect();

    let matched = keywords
        .iter()
        .filter(|kw| tokens.contains(kw.as_str()))
        .cloned()
        .collect();

    KeywordMatch {
        matched,
        total: keywords.len(),
    }
}
