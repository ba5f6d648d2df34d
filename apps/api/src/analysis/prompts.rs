// Resume review prompt. The two numbers are computed locally and pinned in the prompt so the
// model only writes the four text sections.

pub const REVIEW_PROMPT_TEMPLATE: &str = r#"
You are a professional resume reviewer.

IMPORTANT:
Resume Score is: {score}
JD Match Percentage is: {jd_percentage}%

DO NOT change these numbers.

Generate only:

Strengths:
👉 Point 1

👉 Point 2

Missing Skills:
👉 Point 1

👉 Point 2

Improvement Suggestions:
👉 Suggestion with example

👉 Suggestion with example

ATS Optimization Tips:
👉 Tip 1

👉 Tip 2

Use simple English.
Leave blank line between bullets.

RESUME:
{resume_text}

JOB DESCRIPTION:
{jd_text}
"#;

/// Text used in place of the review when the model returns nothing.
pub const EMPTY_REVIEW_FALLBACK: &str = "Could not generate analysis.";

pub fn build_review_prompt(
    score: u32,
    jd_percentage: u32,
    resume_text: &str,
    jd_text: &str,
) -> String {
    let score = score.to_string();
    let jd_percentage = jd_percentage.to_string();
    fill_template(
        REVIEW_PROMPT_TEMPLATE,
        &[
            ("{score}", score.as_str()),
            ("{jd_percentage}", jd_percentage.as_str()),
            ("{resume_text}", resume_text),
            ("{jd_text}", jd_text),
        ],
    )
}

/// Substitutes placeholders in a single left-to-right pass; inserted values are never rescanned.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    loop {
        let next = values
            .iter()
            .filter_map(|&(key, value)| rest.find(key).map(|idx| (idx, key, value)))
            .min_by_key(|&(idx, _, _)| idx);
        let Some((idx, key, value)) = next else {
            break;
        };
        out.push_str(&rest[..idx]);
        out.push_str(value);
        rest = &rest[idx + key.len()..];
    }
    out.push_str(rest);
    out
}
