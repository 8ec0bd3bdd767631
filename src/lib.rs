//! # Mizan - Quranic Text Analysis Client
//!
//! Client-side core for a letter, word and Abjad analysis backend: request
//! dispatch, result shaping, async request state and a persisted history of
//! past analyses.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  analyze   ┌──────────────┐   HTTP    ┌──────────────┐
//! │   Session    │───────────►│  Dispatcher  │──────────►│   Gateway    │
//! │              │            │              │           │              │
//! │ - Status     │◄───────────│ - Verse path │◄──────────│ - Endpoints  │
//! │ - Generation │   result   │ - Text path  │  payloads │ - Errors     │
//! └──────────────┘            └──────────────┘           └──────────────┘
//!        │ success
//!        ▼
//! ┌──────────────┐  snapshot  ┌──────────────┐
//! │ HistoryCache │───────────►│   Storage    │
//! │ - Newest 50  │            │ - JSON file  │
//! └──────────────┘            └──────────────┘
//! ```
//!
//! The session never fails outward: errors are classified by the gateway
//! and stored on the session for presentation code to read.

pub mod analysis;
pub mod app;
pub mod cmd_args;
pub mod config;
pub mod gateway;
pub mod history;
pub mod output;
pub mod session;

// Re-export main types for easy access
pub use analysis::{
    AbjadSystem, AnalysisError, AnalysisRequest, AnalysisResult, Dispatcher, LetterBreakdown,
    LetterCountMethod, ResultMetadata, ResultSource,
};
pub use app::App;
pub use cmd_args::CommandLineArgs;
pub use gateway::{ApiClient, ApiFailure, ErrorKind};
pub use history::{FileStorage, HistoryCache, HistoryEntry, KeyValueStorage, MemoryStorage};
pub use session::{AnalysisSession, RequestStatus, SessionSnapshot};
