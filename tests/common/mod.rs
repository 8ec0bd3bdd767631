//! Common test utilities for integration tests
//!
//! Provides a mocked analysis backend and helpers for wiring a session
//! against it.

#![allow(dead_code)]

use std::time::Duration;

use mizan_client::{AnalysisSession, ApiClient, Dispatcher};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const FATIHA_1: &str = "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ";

/// Mocked backend serving a small, fixed corpus
pub struct Backend {
    pub server: MockServer,
}

impl Backend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.server.uri()).expect("client should build")
    }

    pub fn session(&self) -> AnalysisSession {
        AnalysisSession::new(Dispatcher::new(self.client()))
    }

    /// Serve verse 1:1 through both the combined analysis and verse endpoints
    pub async fn mount_fatiha_1(&self) {
        Mock::given(method("GET"))
            .and(path("/api/v1/analysis/verse/1/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "location": "1:1",
                "letters": {"count": 19, "methodology": "traditional"},
                "words": {"count": 4, "methodology": "whitespace"},
                "abjad": {
                    "value": 786,
                    "system": "mashriqi",
                    "is_prime": false,
                    "digital_root": 3,
                    "breakdown": [
                        {"letter": "ب", "value": 2},
                        {"letter": "س", "value": 60},
                        {"letter": "م", "value": 40},
                        {"letter": "ل", "value": 30},
                        {"letter": "ل", "value": 30},
                        {"letter": "ه", "value": 5}
                    ]
                }
            })))
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/verses/1/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "surah_number": 1,
                "verse_number": 1,
                "text_uthmani": FATIHA_1,
                "juz_number": 1,
                "page_number": 1,
                "is_sajdah": false,
                "word_count": 4,
                "letter_count": 19,
                "abjad_value": 786,
                "surah_name_arabic": "الفاتحة",
                "surah_name_english": "The Opening"
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve an Abjad value for one exact text, optionally after a delay
    pub async fn mount_abjad(&self, text: &str, value: u64, delay: Option<Duration>) {
        self.mount_abjad_breakdown(text, value, json!([]), delay)
            .await;
    }

    /// Serve an Abjad value and per-occurrence breakdown for one exact text
    pub async fn mount_abjad_breakdown(
        &self,
        text: &str,
        value: u64,
        breakdown: serde_json::Value,
        delay: Option<Duration>,
    ) {
        let mut response = ResponseTemplate::new(200).set_body_json(json!({
            "value": value,
            "system": "mashriqi",
            "text_analyzed": text,
            "breakdown": breakdown,
            "is_prime": false,
            "digital_root": 1
        }));
        if let Some(delay) = delay {
            response = response.set_delay(delay);
        }

        Mock::given(method("GET"))
            .and(path("/api/v1/analysis/abjad"))
            .and(query_param("text", text))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Answer requests to `route` with the given status and body
    pub async fn mount_failure(&self, route: &str, status: u16, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Serve verse 1:1 with the backend's letter-frequency table included
    pub async fn mount_fatiha_1_with_frequency(&self) {
        Mock::given(method("GET"))
            .and(path("/api/v1/analysis/verse/1/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "location": "1:1",
                "letters": {"count": 19},
                "words": {"count": 4},
                "abjad": {
                    "value": 786,
                    "system": "mashriqi",
                    "breakdown": [{"letter": "ل", "value": 30}, {"letter": "م", "value": 40}]
                },
                "letter_frequency": {
                    "frequency": {
                        "ب": 1, "س": 1, "م": 3, "ا": 3, "ل": 4, "ه": 1,
                        "ر": 2, "ح": 2, "ن": 1, "ي": 1
                    },
                    "total_letters": 19,
                    "unique_letters": 10
                }
            })))
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/verses/1/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "surah_number": 1,
                "verse_number": 1,
                "text_uthmani": FATIHA_1
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}
