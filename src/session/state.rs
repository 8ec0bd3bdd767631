//! # Session State
//!
//! Lifecycle values exposed to presentation code: status, last result,
//! last error and request timing.

use serde::Serialize;
use std::time::{Duration, Instant};

use crate::analysis::{AnalysisError, AnalysisResult};
use crate::gateway::ErrorKind;

/// Lifecycle of the latest dispatch in a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Normalized failure stored for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionError {
    pub kind: ErrorKind,
    pub status: u16,
    pub message: String,
}

impl From<&AnalysisError> for SessionError {
    fn from(error: &AnalysisError) -> Self {
        let message = match error {
            AnalysisError::Api(failure) => failure.detail.clone(),
            other => other.to_string(),
        };
        Self {
            kind: error.kind(),
            status: error.status(),
            message,
        }
    }
}

impl From<AnalysisError> for SessionError {
    fn from(error: AnalysisError) -> Self {
        Self::from(&error)
    }
}

/// Request timing information
#[derive(Debug, Clone, Default)]
pub struct RequestTiming {
    pub start_time: Option<Instant>,
    pub duration: Option<Duration>,
}

impl RequestTiming {
    /// Mark the start of a dispatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.duration = None;
    }

    /// Mark the end of a dispatch and calculate duration
    pub fn finish(&mut self) {
        if let Some(start) = self.start_time {
            self.duration = Some(start.elapsed());
        }
    }

    pub fn duration_ms(&self) -> Option<u64> {
        self.duration.map(|d| d.as_millis() as u64)
    }
}

/// Point-in-time copy of a session's state
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub status: RequestStatus,
    pub result: Option<AnalysisResult>,
    pub error: Option<SessionError>,
    /// Generation of the most recently started dispatch
    pub generation: u64,
    pub duration_ms: Option<u64>,
}

impl SessionSnapshot {
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// One-line summary for status displays
    pub fn summary(&self) -> String {
        match (&self.status, &self.result, &self.error) {
            (RequestStatus::Idle, _, _) => "Idle".to_string(),
            (RequestStatus::Pending, _, _) => "Analyzing...".to_string(),
            (RequestStatus::Succeeded, Some(result), _) => {
                let duration = self
                    .duration_ms
                    .map(|ms| format!(" ({ms}ms)"))
                    .unwrap_or_default();
                format!(
                    "{} letters, {} words, abjad {}{duration}",
                    result.letter_count, result.word_count, result.abjad_value
                )
            }
            (RequestStatus::Failed, _, Some(error)) => {
                format!("Error [{}]: {}", error.kind, error.message)
            }
            _ => "No result".to_string(),
        }
    }
}
