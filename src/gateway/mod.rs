//! # Remote Endpoint Gateway
//!
//! Shapes URLs and headers for the analysis backend, deserializes its JSON
//! payloads and turns every non-success outcome into a classified
//! [`ApiFailure`].

pub mod client;
pub mod error;
pub mod payloads;

pub use client::{ApiClient, API_PREFIX};
pub use error::{ApiFailure, ErrorKind};
pub use payloads::{
    AbjadBreakdownItem, AbjadResult, CountResult, FrequencySection, HealthStatus, LetterFrequency,
    SearchHit, SearchResults, SurahDetail, SurahSummary, SurahVerses, Verse, VerseAnalysis,
    VerseSummary,
};
