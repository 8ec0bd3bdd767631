//! # Gateway Failures
//!
//! Stable error taxonomy for backend calls. Classification depends only on
//! the HTTP status; the response body only contributes the detail text.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Stable failure categories surfaced to presentation code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No response was received (status 0)
    Network,
    /// 422: the backend rejected the request parameters
    Validation,
    /// 404: unknown verse or surah
    NotFound,
    /// 429
    RateLimited,
    /// Any other non-success status or unexpected payload
    Unknown,
    /// Rejected locally before any network call
    InvalidRequest,
}

impl ErrorKind {
    /// Classify an HTTP status code. Never yields `InvalidRequest`.
    pub fn from_status(status: u16) -> Self {
        match status {
            0 => Self::Network,
            404 => Self::NotFound,
            422 => Self::Validation,
            429 => Self::RateLimited,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::Unknown => "unknown",
            Self::InvalidRequest => "invalid_request",
        }
    }

    /// Whether the same request may succeed if sent again later
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network | Self::RateLimited)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure raised by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error (status {status}): {detail}")]
pub struct ApiFailure {
    pub kind: ErrorKind,
    pub status: u16,
    pub detail: String,
}

impl ApiFailure {
    pub fn new(kind: ErrorKind, status: u16, detail: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            detail: detail.into(),
        }
    }

    /// Transport-level failure: nothing came back from the server
    pub fn network(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, 0, detail)
    }

    /// Build a failure from a non-success response.
    ///
    /// The body is parsed best-effort; any shape that yields no message
    /// falls back to a generic detail carrying the raw status.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| extract_detail(&value))
            .unwrap_or_else(|| generic_detail(status));

        Self::new(ErrorKind::from_status(status), status, detail)
    }
}

fn generic_detail(status: u16) -> String {
    match reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
    {
        Some(reason) => format!("request failed with status {status} ({reason})"),
        None => format!("request failed with status {status}"),
    }
}

fn extract_detail(value: &Value) -> Option<String> {
    let object = value.as_object()?;

    if let Some(detail) = object.get("detail") {
        match detail {
            Value::String(text) if !text.is_empty() => return Some(text.clone()),
            Value::Array(items) => {
                let messages: Vec<String> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(text) => Some(text.clone()),
                        other => other.get("msg").and_then(Value::as_str).map(str::to_string),
                    })
                    .collect();
                if !messages.is_empty() {
                    return Some(messages.join("; "));
                }
            }
            _ => {}
        }
    }

    ["message", "error"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
