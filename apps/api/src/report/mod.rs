//! Report Parser — turns the free-form analysis text into a display-ready `ParsedReport`.
//!
//! Pure and side-effect free. Malformed or partial input degrades to absent scores and
//! empty sections; nothing in this module returns an error.

pub mod normalize;
pub mod parser;
pub mod score;
pub mod sections;

pub use normalize::{normalize, split_items};
pub use parser::{parse, DisplayItem, ParsedReport};
pub use score::{parse_score, ScoreBand, ScorePattern};
pub use sections::{extract_section, section_spans, Category, SectionMarker, SectionSpan};
