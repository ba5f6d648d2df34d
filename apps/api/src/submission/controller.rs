use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::report::{parse, ParsedReport};
use crate::submission::boundary::{AnalysisBoundary, TransportError};
use crate::submission::sink::PresentationSink;

const MISSING_INPUT_MESSAGE: &str = "Please upload a resume and paste the job description.";

/// The resume file a user attached.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// One user-initiated submit event.
#[derive(Debug, Clone)]
pub struct Submission {
    pub resume: Option<ResumeFile>,
    pub job_description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Service,
    Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    InFlight,
    Success,
    Failed(FailureKind),
}

impl SubmissionState {
    fn is_busy(self) -> bool {
        matches!(self, SubmissionState::Validating | SubmissionState::InFlight)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Service => write!(f, "service"),
            Self::Transport => write!(f, "transport"),
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Validating => write!(f, "validating"),
            Self::InFlight => write!(f, "in flight"),
            Self::Success => write!(f, "success"),
            Self::Failed(kind) => write!(f, "failed ({kind})"),
        }
    }
}

/// Terminal failure of one submission run. None of these is retried.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Analysis service error: {0}")]
    Service(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl SubmissionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SubmissionError::Validation(_) => FailureKind::Validation,
            SubmissionError::Service(_) => FailureKind::Service,
            SubmissionError::Transport(_) => FailureKind::Transport,
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// The report was parsed and handed to the sink.
    Succeeded,
    Failed(SubmissionError),
    /// Another run was still validating or in flight; nothing happened.
    Ignored,
}

/// Drives `Idle → Validating → InFlight → Success | Failed` for one workflow.
///
/// At most one run is active per controller. A finished run (either outcome) may be followed
/// by a fresh `submit`.
pub struct SubmissionController {
    boundary: Arc<dyn AnalysisBoundary>,
    sink: Arc<dyn PresentationSink>,
    state: Mutex<SubmissionState>,
}

impl SubmissionController {
    pub fn new(boundary: Arc<dyn AnalysisBoundary>, sink: Arc<dyn PresentationSink>) -> Self {
        Self {
            boundary,
            sink,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs one submission to completion. The only await on the boundary is the analysis call.
    pub async fn submit(&self, submission: Submission) -> SubmitOutcome {
        let Some(mut guard) = self.begin() else {
            warn!("Submission ignored: a run is already {}", self.state());
            return SubmitOutcome::Ignored;
        };
        self.sink.on_state_change(SubmissionState::Validating).await;

        match self.run(&mut guard, &submission).await {
            Ok(report) => {
                self.settle(guard, SubmissionState::Success).await;
                self.sink.on_parsed(report).await;
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                warn!("Submission failed: {err}");
                self.settle(guard, SubmissionState::Failed(err.kind())).await;
                match &err {
                    SubmissionError::Validation(message) => {
                        self.sink.on_validation_error(message).await
                    }
                    SubmissionError::Service(message) => self.sink.on_service_error(message).await,
                    SubmissionError::Transport(_) => self.sink.on_transport_error().await,
                }
                SubmitOutcome::Failed(err)
            }
        }
    }

    async fn run(
        &self,
        guard: &mut RunGuard<'_>,
        submission: &Submission,
    ) -> Result<ParsedReport, SubmissionError> {
        let resume = validate(submission)?;

        guard.set(SubmissionState::InFlight);
        self.sink.on_state_change(SubmissionState::InFlight).await;
        let response = self
            .boundary
            .analyze(resume, &submission.job_description)
            .await?;

        if let Some(message) = response.error.filter(|m| !m.is_empty()) {
            return Err(SubmissionError::Service(message));
        }

        let report = parse(response.result.as_deref().unwrap_or_default());
        info!(
            resume_score = ?report.resume_score(),
            jd_match_percent = ?report.jd_match_percent(),
            "Analysis report parsed"
        );
        Ok(report)
    }

    /// Atomically claims the controller for a new run.
    fn begin(&self) -> Option<RunGuard<'_>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.is_busy() {
            return None;
        }
        *state = SubmissionState::Validating;
        debug!("Submission state -> {}", SubmissionState::Validating);
        Some(RunGuard {
            state: &self.state,
            armed: true,
        })
    }

    /// Stores the terminal state, releases the run, then notifies the sink.
    async fn settle(&self, mut guard: RunGuard<'_>, next: SubmissionState) {
        guard.set(next);
        guard.armed = false;
        drop(guard);
        self.sink.on_state_change(next).await;
    }
}

/// Claim on the controller held by the active run.
///
/// A run whose `submit` future is dropped before settling (timeout, `select!`, aborted task)
/// leaves the controller in `Failed(Transport)` instead of busy forever.
struct RunGuard<'a> {
    state: &'a Mutex<SubmissionState>,
    armed: bool,
}

impl RunGuard<'_> {
    fn set(&mut self, next: SubmissionState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
        debug!("Submission state -> {next}");
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Submission dropped before completion; releasing controller");
            self.set(SubmissionState::Failed(FailureKind::Transport));
        }
    }
}

fn validate(submission: &Submission) -> Result<&ResumeFile, SubmissionError> {
    let resume = submission
        .resume
        .as_ref()
        .filter(|file| !file.file_name.trim().is_empty())
        .ok_or_else(|| SubmissionError::Validation(MISSING_INPUT_MESSAGE.to_string()))?;
    if submission.job_description.trim().is_empty() {
        return Err(SubmissionError::Validation(MISSING_INPUT_MESSAGE.to_string()));
    }
    Ok(resume)
}
