//! # Analysis Types
//!
//! Request and result shapes shared by the dispatcher, the session state
//! machine and the history cache.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::AnalysisError;

/// Highest surah number in the mushaf
pub const SURAH_COUNT: u16 = 114;

/// Convention for which orthographic characters count as letters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterCountMethod {
    /// Base letters plus Alif Wasla
    #[default]
    Traditional,
    /// Base letters plus Alif Wasla and Alif Khanjariyya
    UthmaniFull,
    /// Base letters only
    NoWasla,
}

impl LetterCountMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Traditional => "traditional",
            Self::UthmaniFull => "uthmani_full",
            Self::NoWasla => "no_wasla",
        }
    }
}

impl fmt::Display for LetterCountMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterCountMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "traditional" => Ok(Self::Traditional),
            "uthmani_full" => Ok(Self::UthmaniFull),
            "no_wasla" => Ok(Self::NoWasla),
            other => Err(format!(
                "unknown letter method '{other}' (expected traditional, uthmani_full or no_wasla)"
            )),
        }
    }
}

/// Letter-to-number mapping convention for Abjad values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbjadSystem {
    /// Eastern ordering
    #[default]
    Mashriqi,
    /// Western / North African ordering
    Maghribi,
}

impl AbjadSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mashriqi => "mashriqi",
            Self::Maghribi => "maghribi",
        }
    }
}

impl fmt::Display for AbjadSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AbjadSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mashriqi" => Ok(Self::Mashriqi),
            "maghribi" => Ok(Self::Maghribi),
            other => Err(format!(
                "unknown abjad system '{other}' (expected mashriqi or maghribi)"
            )),
        }
    }
}

/// What the caller wants analyzed: free text or a stored verse, never both
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Text {
        text: String,
        letter_method: LetterCountMethod,
        abjad_system: AbjadSystem,
        include_breakdown: bool,
    },
    Verse {
        surah: u16,
        ayah: u16,
        abjad_system: AbjadSystem,
    },
}

impl AnalysisRequest {
    /// Free-text request with default method, system and a breakdown
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            letter_method: LetterCountMethod::default(),
            abjad_system: AbjadSystem::default(),
            include_breakdown: true,
        }
    }

    /// Verse-reference request with the default Abjad system
    pub fn verse(surah: u16, ayah: u16) -> Self {
        Self::Verse {
            surah,
            ayah,
            abjad_system: AbjadSystem::default(),
        }
    }

    /// Build a request from loosely supplied caller input.
    ///
    /// A complete verse reference wins over text. Fails with
    /// `InvalidRequest` when neither mode is satisfiable.
    pub fn from_parts(
        text: Option<String>,
        surah: Option<u16>,
        ayah: Option<u16>,
        letter_method: LetterCountMethod,
        abjad_system: AbjadSystem,
        include_breakdown: bool,
    ) -> Result<Self, AnalysisError> {
        match (surah, ayah, text) {
            (Some(surah), Some(ayah), _) => Ok(Self::Verse {
                surah,
                ayah,
                abjad_system,
            }),
            (_, _, Some(text)) if !text.trim().is_empty() => Ok(Self::Text {
                text,
                letter_method,
                abjad_system,
                include_breakdown,
            }),
            _ => Err(AnalysisError::InvalidRequest(
                "either text or both surah and ayah must be provided".to_string(),
            )),
        }
    }

    pub fn abjad_system(&self) -> AbjadSystem {
        match self {
            Self::Text { abjad_system, .. } | Self::Verse { abjad_system, .. } => *abjad_system,
        }
    }

    /// Reject requests that can never succeed, before any network call
    pub fn validate(&self) -> Result<(), AnalysisError> {
        match self {
            Self::Text { text, .. } if text.trim().is_empty() => Err(
                AnalysisError::InvalidRequest("text must not be empty".to_string()),
            ),
            Self::Verse { surah, .. } if !(1..=SURAH_COUNT).contains(surah) => {
                Err(AnalysisError::InvalidRequest(format!(
                    "surah must be between 1 and {SURAH_COUNT}, got {surah}"
                )))
            }
            Self::Verse { ayah: 0, .. } => Err(AnalysisError::InvalidRequest(
                "ayah must be 1 or greater".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Per-letter frequency and Abjad contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterBreakdown {
    pub letter: String,
    pub count: u64,
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abjad_value: Option<u64>,
}

/// Where an analysis result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    /// A verse stored by the backend
    Database,
    /// Caller-supplied free text
    Custom,
}

impl ResultSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surah: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ayah: Option<u16>,
    pub source: ResultSource,
    /// Letter and word counts were computed locally and may diverge from
    /// the backend's method-aware counting
    #[serde(default)]
    pub approximate_counts: bool,
}

/// Uniform analysis output, whichever request mode produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub text: String,
    pub letter_count: u64,
    pub word_count: u64,
    pub abjad_value: u64,
    pub letter_method: LetterCountMethod,
    pub abjad_system: AbjadSystem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<LetterBreakdown>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResultMetadata>,
}

impl AnalysisResult {
    pub fn source(&self) -> Option<ResultSource> {
        self.metadata.as_ref().map(|m| m.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ErrorKind;

    #[test]
    fn from_parts_should_prefer_verse_reference() {
        let request = AnalysisRequest::from_parts(
            Some("بسم".to_string()),
            Some(1),
            Some(1),
            LetterCountMethod::NoWasla,
            AbjadSystem::Maghribi,
            true,
        )
        .unwrap();

        assert_eq!(
            request,
            AnalysisRequest::Verse {
                surah: 1,
                ayah: 1,
                abjad_system: AbjadSystem::Maghribi,
            }
        );
    }

    #[test]
    fn from_parts_should_fall_back_to_text_for_incomplete_reference() {
        let request = AnalysisRequest::from_parts(
            Some("بسم".to_string()),
            Some(1),
            None,
            LetterCountMethod::default(),
            AbjadSystem::default(),
            false,
        )
        .unwrap();

        assert!(matches!(request, AnalysisRequest::Text { include_breakdown: false, .. }));
    }

    #[test]
    fn from_parts_should_reject_missing_input() {
        let err = AnalysisRequest::from_parts(
            None,
            None,
            Some(3),
            LetterCountMethod::default(),
            AbjadSystem::default(),
            true,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);

        let blank = AnalysisRequest::from_parts(
            Some("   ".to_string()),
            None,
            None,
            LetterCountMethod::default(),
            AbjadSystem::default(),
            true,
        );
        assert!(blank.is_err());
    }

    #[test]
    fn validate_should_reject_out_of_range_references() {
        assert!(AnalysisRequest::verse(0, 1).validate().is_err());
        assert!(AnalysisRequest::verse(115, 1).validate().is_err());
        assert!(AnalysisRequest::verse(2, 0).validate().is_err());
        assert!(AnalysisRequest::verse(114, 6).validate().is_ok());
        assert!(AnalysisRequest::text("").validate().is_err());
    }

    #[test]
    fn enums_should_parse_and_display_wire_names() {
        assert_eq!("uthmani_full".parse::<LetterCountMethod>(), Ok(LetterCountMethod::UthmaniFull));
        assert_eq!("Maghribi".parse::<AbjadSystem>(), Ok(AbjadSystem::Maghribi));
        assert!("western".parse::<AbjadSystem>().is_err());
        assert_eq!(LetterCountMethod::NoWasla.to_string(), "no_wasla");
        assert_eq!(
            serde_json::to_string(&LetterCountMethod::UthmaniFull).unwrap(),
            "\"uthmani_full\""
        );
    }

    #[test]
    fn analysis_result_should_serialize_camel_case() {
        let result = AnalysisResult {
            text: "بسم".to_string(),
            letter_count: 3,
            word_count: 1,
            abjad_value: 102,
            letter_method: LetterCountMethod::Traditional,
            abjad_system: AbjadSystem::Mashriqi,
            breakdown: None,
            metadata: Some(ResultMetadata {
                surah: None,
                ayah: None,
                source: ResultSource::Custom,
                approximate_counts: true,
            }),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["letterCount"], 3);
        assert_eq!(json["abjadSystem"], "mashriqi");
        assert_eq!(json["metadata"]["source"], "custom");
        assert_eq!(json["metadata"]["approximateCounts"], true);
        assert!(json.get("breakdown").is_none());
    }
}
