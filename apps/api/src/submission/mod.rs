//! Submission Controller — sequences one analysis run from user submit to success or failure.
//!
//! The controller talks to the analysis service through [`AnalysisBoundary`] and reports
//! everything it does through [`PresentationSink`]; it never renders anything itself.

pub mod boundary;
pub mod controller;
pub mod sink;

pub use boundary::{AnalysisBoundary, AnalysisResponse, HttpAnalysisBoundary, TransportError};
pub use controller::{
    FailureKind, ResumeFile, Submission, SubmissionController, SubmissionError,
    SubmissionState, SubmitOutcome,
};
pub use sink::{NoopSink, PresentationSink};
