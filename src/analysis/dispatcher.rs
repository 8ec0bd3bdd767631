//! # Analysis Dispatcher
//!
//! Turns an [`AnalysisRequest`] into backend calls and reshapes the
//! heterogeneous payloads into one [`AnalysisResult`].
//!
//! - Verse mode: combined verse analysis plus a verse fetch for the text
//!   (the analysis endpoint does not echo it).
//! - Text mode: one remote Abjad call; letter and word counts are computed
//!   locally and flagged as approximate.

use super::breakdown;
use super::text::{count_letters, count_words, letter_distribution};
use super::types::{
    AbjadSystem, AnalysisRequest, AnalysisResult, LetterCountMethod, ResultMetadata, ResultSource,
};
use super::AnalysisError;
use crate::gateway::{ApiClient, FrequencySection};

/// Routes analysis requests to the gateway and the local analyzer
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: ApiClient,
}

impl Dispatcher {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Analyze a request. Invalid requests fail before any network call.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        request.validate()?;

        match request {
            AnalysisRequest::Verse {
                surah,
                ayah,
                abjad_system,
            } => self.analyze_verse(*surah, *ayah, *abjad_system).await,
            AnalysisRequest::Text {
                text,
                letter_method,
                abjad_system,
                include_breakdown,
            } => {
                self.analyze_text(text, *letter_method, *abjad_system, *include_breakdown)
                    .await
            }
        }
    }

    async fn analyze_verse(
        &self,
        surah: u16,
        ayah: u16,
        abjad_system: AbjadSystem,
    ) -> Result<AnalysisResult, AnalysisError> {
        tracing::debug!("Dispatching verse analysis for {surah}:{ayah}");

        let analysis = self.client.analyze_verse(surah, ayah).await?;
        let verse = self.client.get_verse(surah, ayah).await?;

        let computed_system = analysis
            .abjad
            .system
            .as_deref()
            .and_then(|s| s.parse::<AbjadSystem>().ok())
            .unwrap_or_default();

        // the combined endpoint only computes the default system
        let (abjad_value, breakdown_items) = if computed_system == abjad_system {
            (analysis.abjad.value, analysis.abjad.breakdown)
        } else {
            tracing::debug!(
                "Verse {surah}:{ayah} analyzed as {computed_system}, recomputing as {abjad_system}"
            );
            let abjad = self
                .client
                .calculate_abjad(&verse.text_uthmani, abjad_system, true)
                .await?;
            (abjad.value, abjad.breakdown)
        };

        let letter_count = analysis.letters.count;
        let distribution = verse_distribution(
            &verse.text_uthmani,
            analysis.letter_frequency.as_ref(),
            letter_count,
        );
        let breakdown = breakdown::scaled(
            distribution,
            breakdown_items.as_deref().unwrap_or_default(),
            letter_count,
        );

        let result = AnalysisResult {
            text: verse.text_uthmani,
            letter_count,
            word_count: analysis.words.count,
            abjad_value,
            letter_method: LetterCountMethod::Traditional,
            abjad_system,
            breakdown,
            metadata: Some(ResultMetadata {
                surah: Some(surah),
                ayah: Some(ayah),
                source: ResultSource::Database,
                approximate_counts: false,
            }),
        };

        tracing::info!(
            "Analyzed verse {surah}:{ayah}: {} letters, {} words, abjad {}",
            result.letter_count,
            result.word_count,
            result.abjad_value
        );
        Ok(result)
    }

    async fn analyze_text(
        &self,
        text: &str,
        letter_method: LetterCountMethod,
        abjad_system: AbjadSystem,
        include_breakdown: bool,
    ) -> Result<AnalysisResult, AnalysisError> {
        tracing::debug!(
            "Dispatching text analysis ({} chars, {letter_method}, {abjad_system})",
            text.chars().count()
        );

        let abjad = self
            .client
            .calculate_abjad(text, abjad_system, include_breakdown)
            .await?;

        let breakdown = include_breakdown
            .then(|| breakdown::from_text(text, abjad.breakdown.as_deref().unwrap_or_default()));

        let result = AnalysisResult {
            text: text.to_string(),
            letter_count: count_letters(text),
            word_count: count_words(text),
            abjad_value: abjad.value,
            letter_method,
            abjad_system,
            breakdown,
            metadata: Some(ResultMetadata {
                surah: None,
                ayah: None,
                source: ResultSource::Custom,
                approximate_counts: true,
            }),
        };

        tracing::info!(
            "Analyzed text: {} letters (local), {} words (local), abjad {}",
            result.letter_count,
            result.word_count,
            result.abjad_value
        );
        Ok(result)
    }
}

/// Letter weights for a stored verse, in order of first appearance.
///
/// The backend's frequency table is used when it accounts for every
/// counted letter; otherwise the verse text is counted locally and the
/// breakdown is scaled to the backend's count.
fn verse_distribution(
    text: &str,
    frequency: Option<&FrequencySection>,
    letter_count: u64,
) -> Vec<(String, u64)> {
    let local: Vec<(String, u64)> = letter_distribution(text)
        .into_iter()
        .map(|(letter, count)| (letter.to_string(), count))
        .collect();

    let Some(frequency) = frequency.filter(|f| f.frequency.values().sum::<u64>() == letter_count)
    else {
        return local;
    };

    let mut ordered: Vec<(String, u64)> = local
        .iter()
        .filter_map(|(letter, _)| {
            frequency
                .frequency
                .get(letter)
                .map(|count| (letter.clone(), *count))
        })
        .collect();
    let mut rest: Vec<(String, u64)> = frequency
        .frequency
        .iter()
        .filter(|(letter, _)| !ordered.iter().any(|(seen, _)| seen == *letter))
        .map(|(letter, count)| (letter.clone(), *count))
        .collect();
    rest.sort();
    ordered.extend(rest);
    ordered
}
