//! # API Client
//!
//! Typed wrapper around the analysis backend's REST surface.
//!
//! Every call is a single round trip with JSON `Accept` and `Content-Type`
//! headers. There is no retry and no client-side timeout: both are left to
//! the transport configuration supplied at construction.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use super::error::{ApiFailure, ErrorKind};
use super::payloads::{
    AbjadResult, CountResult, HealthStatus, LetterFrequency, SearchResults, SurahDetail,
    SurahSummary, SurahVerses, Verse, VerseAnalysis,
};
use crate::analysis::AbjadSystem;

/// Path prefix of every versioned endpoint
pub const API_PREFIX: &str = "/api/v1";

const JSON: &str = "application/json";

/// Query parameters for a single call
type Query = Vec<(&'static str, String)>;

/// Client for the analysis backend.
///
/// Cheap to clone; clones share the underlying connection pool. Construct
/// one per backend and hand it to whatever needs it.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8000`)
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiFailure> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiFailure::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_http_client(http, base_url))
    }

    /// Create a client around a preconfigured `reqwest::Client`
    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!("API client configured for {base_url}");
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: Query) -> Result<T, ApiFailure> {
        let url = self.endpoint(path);
        tracing::debug!("GET {url} {query:?}");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("GET {url} failed before a response: {e}");
                ApiFailure::network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let failure = ApiFailure::from_response(status.as_u16(), &body);
            tracing::debug!("GET {url} -> {}: {}", failure.status, failure.detail);
            return Err(failure);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiFailure::network(format!("failed to read response body: {e}")))?;

        serde_json::from_str(&body).map_err(|e| {
            ApiFailure::new(
                ErrorKind::Unknown,
                status.as_u16(),
                format!("unexpected response body from {path}: {e}"),
            )
        })
    }

    /// Liveness and version check
    pub async fn health(&self) -> Result<HealthStatus, ApiFailure> {
        self.get_json("/health", Vec::new()).await
    }

    /// Fetch one verse with its text and metadata
    pub async fn get_verse(&self, surah: u16, ayah: u16) -> Result<Verse, ApiFailure> {
        self.get_json(&format!("/verses/{surah}/{ayah}"), Vec::new())
            .await
    }

    /// Fetch all verses of a surah
    pub async fn get_surah_verses(&self, surah: u16) -> Result<SurahVerses, ApiFailure> {
        self.get_json(&format!("/verses/{surah}"), Vec::new()).await
    }

    pub async fn list_surahs(&self) -> Result<Vec<SurahSummary>, ApiFailure> {
        self.get_json("/surahs", Vec::new()).await
    }

    pub async fn get_surah(&self, surah: u16) -> Result<SurahDetail, ApiFailure> {
        self.get_json(&format!("/surahs/{surah}"), Vec::new()).await
    }

    /// Combined letter, word and Abjad analysis of a stored verse
    pub async fn analyze_verse(&self, surah: u16, ayah: u16) -> Result<VerseAnalysis, ApiFailure> {
        self.get_json(&format!("/analysis/verse/{surah}/{ayah}"), Vec::new())
            .await
    }

    /// Remote letter count. Without a surah the whole text is counted.
    pub async fn count_letters(
        &self,
        surah: Option<u16>,
        verse: Option<u16>,
    ) -> Result<CountResult, ApiFailure> {
        self.get_json("/analysis/letters/count", scope_query(surah, verse))
            .await
    }

    /// Remote word count
    pub async fn count_words(
        &self,
        surah: Option<u16>,
        verse: Option<u16>,
    ) -> Result<CountResult, ApiFailure> {
        self.get_json("/analysis/words/count", scope_query(surah, verse))
            .await
    }

    /// Abjad value of arbitrary text, optionally with a per-letter breakdown
    pub async fn calculate_abjad(
        &self,
        text: &str,
        system: AbjadSystem,
        include_breakdown: bool,
    ) -> Result<AbjadResult, ApiFailure> {
        let query = vec![
            ("text", text.to_string()),
            ("system", system.as_str().to_string()),
            ("include_breakdown", include_breakdown.to_string()),
        ];
        self.get_json("/analysis/abjad", query).await
    }

    /// Letter frequency distribution for a scope
    pub async fn letter_frequency(
        &self,
        surah: Option<u16>,
        verse: Option<u16>,
    ) -> Result<LetterFrequency, ApiFailure> {
        self.get_json("/analysis/letters/frequency", scope_query(surah, verse))
            .await
    }

    /// Text search across the stored verses
    pub async fn search(
        &self,
        query: &str,
        surah: Option<u16>,
        limit: Option<u32>,
    ) -> Result<SearchResults, ApiFailure> {
        let mut params: Query = vec![("q", query.to_string())];
        if let Some(surah) = surah {
            params.push(("surah", surah.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        self.get_json("/search", params).await
    }
}

fn scope_query(surah: Option<u16>, verse: Option<u16>) -> Query {
    let mut query = Vec::new();
    if let Some(surah) = surah {
        query.push(("surah", surah.to_string()));
    }
    if let Some(verse) = verse {
        query.push(("verse", verse.to_string()));
    }
    query
}
