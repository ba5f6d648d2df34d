// Analysis service: the producer side of the report text.
// PDF text extraction, JD keyword matching, heuristic resume score, LLM review.
// All LLM calls go through llm_client.

pub mod handlers;
pub mod keywords;
pub mod pdf;
pub mod prompts;
pub mod review;
pub mod scoring;
