//! Observer interface for whatever presents a submission run to the user.

use async_trait::async_trait;

use crate::report::ParsedReport;
use crate::submission::controller::SubmissionState;

/// Receives every user-visible effect of a submission run.
///
/// Implementations own rendering: clearing stale results on a new run, staggered reveal of
/// items, score colouring via [`crate::report::ScoreBand`]. Items within one section must be
/// shown in the order they are handed over.
#[async_trait]
pub trait PresentationSink: Send + Sync {
    /// Called on every state transition, including the entry into `Validating`.
    async fn on_state_change(&self, state: SubmissionState);

    async fn on_validation_error(&self, message: &str);

    /// The analysis service answered with an explicit error (e.g. usage limit exhausted).
    async fn on_service_error(&self, message: &str);

    async fn on_transport_error(&self);

    /// Called once per successful run with the complete report.
    async fn on_parsed(&self, report: ParsedReport);
}

/// Sink that discards everything.
pub struct NoopSink;

#[async_trait]
impl PresentationSink for NoopSink {
    async fn on_state_change(&self, _state: SubmissionState) {}
    async fn on_validation_error(&self, _message: &str) {}
    async fn on_service_error(&self, _message: &str) {}
    async fn on_transport_error(&self) {}
    async fn on_parsed(&self, _report: ParsedReport) {}
}
