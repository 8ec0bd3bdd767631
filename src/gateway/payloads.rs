//! # Backend Payloads
//!
//! Typed views of the JSON documents returned by the analysis backend.
//! Fields the client never reads are left out; optional fields default so
//! older or newer backends still deserialize.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `GET /api/v1/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    #[serde(default)]
    pub database: bool,
    #[serde(default)]
    pub cache: bool,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// `GET /api/v1/verses/{surah}/{ayah}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    pub surah_number: u16,
    pub verse_number: u16,
    pub text_uthmani: String,
    #[serde(default)]
    pub text_simple: Option<String>,
    #[serde(default)]
    pub juz_number: Option<u16>,
    #[serde(default)]
    pub page_number: Option<u16>,
    #[serde(default)]
    pub is_sajdah: bool,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub letter_count: u64,
    #[serde(default)]
    pub abjad_value: u64,
    #[serde(default)]
    pub surah_name_arabic: Option<String>,
    #[serde(default)]
    pub surah_name_english: Option<String>,
}

/// One verse inside a surah listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseSummary {
    pub number: u16,
    pub text: String,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub letter_count: u64,
}

/// `GET /api/v1/verses/{surah}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurahVerses {
    pub surah_number: u16,
    #[serde(default)]
    pub surah_name: Option<String>,
    pub verse_count: u16,
    pub verses: Vec<VerseSummary>,
}

/// `GET /api/v1/surahs` item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurahSummary {
    pub number: u16,
    pub name_arabic: String,
    pub name_english: String,
    #[serde(default)]
    pub name_transliteration: Option<String>,
    #[serde(default)]
    pub revelation_type: Option<String>,
    #[serde(default)]
    pub revelation_order: Option<u16>,
    pub verse_count: u16,
    #[serde(default)]
    pub word_count: u64,
    #[serde(default)]
    pub letter_count: u64,
    #[serde(default)]
    pub ruku_count: Option<u16>,
}

/// `GET /api/v1/surahs/{surah}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurahDetail {
    #[serde(flatten)]
    pub summary: SurahSummary,
    #[serde(default)]
    pub verses: Vec<Verse>,
}

/// `GET /api/v1/analysis/letters/count` and `/words/count`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountResult {
    #[serde(default)]
    pub count_type: Option<String>,
    pub count: u64,
    #[serde(default)]
    pub scope: serde_json::Value,
    #[serde(default)]
    pub methodology: Option<String>,
    #[serde(default)]
    pub breakdown: Option<HashMap<String, u64>>,
}

/// One item of an Abjad breakdown.
///
/// The backend emits one `{letter, value}` per occurrence; already
/// aggregated entries carry `count` as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbjadBreakdownItem {
    pub letter: String,
    #[serde(default, alias = "abjad_value", alias = "abjadValue")]
    pub value: Option<u64>,
    #[serde(default)]
    pub count: Option<u64>,
}

/// `GET /api/v1/analysis/abjad`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbjadResult {
    pub value: u64,
    pub system: String,
    #[serde(default)]
    pub text_analyzed: Option<String>,
    #[serde(default)]
    pub breakdown: Option<Vec<AbjadBreakdownItem>>,
    #[serde(default)]
    pub is_prime: bool,
    #[serde(default)]
    pub digital_root: Option<u64>,
}

/// `GET /api/v1/analysis/letters/frequency`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterFrequency {
    #[serde(default)]
    pub frequency_type: Option<String>,
    pub total_items: u64,
    pub unique_items: u64,
    pub distribution: HashMap<String, u64>,
    #[serde(default)]
    pub top_items: Vec<(String, u64)>,
}

/// Count section of a combined verse analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountSection {
    pub count: u64,
    #[serde(default)]
    pub methodology: Option<String>,
}

/// Frequency section of a combined verse analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencySection {
    #[serde(default)]
    pub frequency: HashMap<String, u64>,
    #[serde(default)]
    pub total_letters: u64,
    #[serde(default)]
    pub unique_letters: u64,
}

/// Abjad section of a combined verse analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbjadSection {
    pub value: u64,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub breakdown: Option<Vec<AbjadBreakdownItem>>,
    #[serde(default)]
    pub is_prime: bool,
    #[serde(default)]
    pub digital_root: Option<u64>,
}

/// `GET /api/v1/analysis/verse/{surah}/{ayah}`.
///
/// The backend does not echo the verse text here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseAnalysis {
    pub location: String,
    pub letters: CountSection,
    pub words: CountSection,
    pub abjad: AbjadSection,
    #[serde(default)]
    pub letter_frequency: Option<FrequencySection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub surah_number: u16,
    pub verse_number: u16,
    pub text: String,
    #[serde(default)]
    pub surah_name: Option<String>,
}

/// `GET /api/v1/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    #[serde(default)]
    pub normalized_query: Option<String>,
    pub total_results: u64,
    pub results: Vec<SearchHit>,
    #[serde(default)]
    pub methodology: Option<String>,
}
