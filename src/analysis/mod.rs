//! # Analysis
//!
//! Request/result model, the local text analyzer and the dispatcher that
//! chooses between the verse-reference and free-text paths.

pub mod breakdown;
pub mod dispatcher;
pub mod text;
pub mod types;

pub use dispatcher::Dispatcher;
pub use text::{count_letters, count_words};
pub use types::{
    AbjadSystem, AnalysisRequest, AnalysisResult, LetterBreakdown, LetterCountMethod,
    ResultMetadata, ResultSource, SURAH_COUNT,
};

use crate::gateway::{ApiFailure, ErrorKind};
use thiserror::Error;

/// Failure of a single analysis dispatch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Classified failure forwarded unchanged from the gateway
    #[error(transparent)]
    Api(#[from] ApiFailure),

    /// Neither mode of the request is satisfiable
    #[error("invalid analysis request: {0}")]
    InvalidRequest(String),
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api(failure) => failure.kind,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// HTTP status of the failed call; 0 when nothing was sent or received
    pub fn status(&self) -> u16 {
        match self {
            Self::Api(failure) => failure.status,
            Self::InvalidRequest(_) => 0,
        }
    }
}
