//! # History Entries
//!
//! Immutable records of past analyses.

use serde::{Deserialize, Serialize};

use crate::analysis::{AbjadSystem, AnalysisResult, LetterCountMethod, ResultSource};

/// Whether an entry came from a stored verse or caller-supplied text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    Verse,
    Custom,
}

impl From<ResultSource> for EntrySource {
    fn from(source: ResultSource) -> Self {
        match source {
            ResultSource::Database => Self::Verse,
            ResultSource::Custom => Self::Custom,
        }
    }
}

/// A recorded analysis. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub text: String,
    pub letter_count: u64,
    pub word_count: u64,
    pub abjad_value: u64,
    pub letter_method: LetterCountMethod,
    pub abjad_system: AbjadSystem,
    /// Creation time in epoch milliseconds
    pub timestamp: i64,
    pub source: EntrySource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surah: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ayah: Option<u16>,
}

impl HistoryEntry {
    /// Verse reference as `surah:ayah`, when the entry has one
    pub fn reference(&self) -> Option<String> {
        match (self.surah, self.ayah) {
            (Some(surah), Some(ayah)) => Some(format!("{surah}:{ayah}")),
            _ => None,
        }
    }
}

/// Everything a history entry holds except its id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryEntry {
    pub text: String,
    pub letter_count: u64,
    pub word_count: u64,
    pub abjad_value: u64,
    pub letter_method: LetterCountMethod,
    pub abjad_system: AbjadSystem,
    pub source: EntrySource,
    pub surah: Option<u16>,
    pub ayah: Option<u16>,
}

impl NewHistoryEntry {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let metadata = result.metadata.as_ref();
        let source = metadata
            .map(|m| EntrySource::from(m.source))
            .unwrap_or(EntrySource::Custom);

        Self {
            text: result.text.clone(),
            letter_count: result.letter_count,
            word_count: result.word_count,
            abjad_value: result.abjad_value,
            letter_method: result.letter_method,
            abjad_system: result.abjad_system,
            source,
            surah: metadata.and_then(|m| m.surah),
            ayah: metadata.and_then(|m| m.ayah),
        }
    }

    pub(crate) fn into_entry(self, id: String, timestamp: i64) -> HistoryEntry {
        HistoryEntry {
            id,
            text: self.text,
            letter_count: self.letter_count,
            word_count: self.word_count,
            abjad_value: self.abjad_value,
            letter_method: self.letter_method,
            abjad_system: self.abjad_system,
            timestamp,
            source: self.source,
            surah: self.surah,
            ayah: self.ayah,
        }
    }
}

impl From<&AnalysisResult> for NewHistoryEntry {
    fn from(result: &AnalysisResult) -> Self {
        Self::from_result(result)
    }
}
