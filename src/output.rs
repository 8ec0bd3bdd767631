//! # Output Formatting
//!
//! Plain-text and JSON renderings of results for the command line.

use anyhow::Result;
use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::analysis::AnalysisResult;
use crate::gateway::{ErrorKind, SurahSummary, Verse};
use crate::history::HistoryEntry;
use crate::session::SessionError;

/// Pretty-print any serializable value as JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn format_result(result: &AnalysisResult) -> String {
    let mut out = String::new();

    if let Some(reference) = result
        .metadata
        .as_ref()
        .and_then(|m| m.surah.zip(m.ayah))
        .map(|(surah, ayah)| format!("{surah}:{ayah}"))
    {
        out.push_str(&format!("Verse:   {reference}\n"));
    }
    out.push_str(&format!("Text:    {}\n", result.text));

    let approximate = result
        .metadata
        .as_ref()
        .is_some_and(|m| m.approximate_counts);
    let marker = if approximate { " (approximate)" } else { "" };
    out.push_str(&format!("Letters: {}{marker}\n", result.letter_count));
    out.push_str(&format!("Words:   {}{marker}\n", result.word_count));
    out.push_str(&format!(
        "Abjad:   {} ({})\n",
        result.abjad_value, result.abjad_system
    ));
    out.push_str(&format!("Method:  {}\n", result.letter_method));

    if let Some(breakdown) = result.breakdown.as_ref().filter(|b| !b.is_empty()) {
        out.push_str("\nLetter  Count  Percent  Abjad\n");
        for entry in breakdown {
            let abjad = entry
                .abjad_value
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "{:<6}  {:>5}  {:>6.2}%  {:>5}\n",
                entry.letter, entry.count, entry.percentage, abjad
            ));
        }
    }

    out
}

pub fn format_failure(error: &SessionError) -> String {
    let hint = if error.kind.is_retryable() {
        " (temporary, try again later)"
    } else {
        ""
    };
    format!("{} error: {}{hint}", error.kind, error.message)
}

/// Render an epoch-millisecond timestamp in local time
pub fn format_timestamp(timestamp: i64) -> String {
    match Local.timestamp_millis_opt(timestamp).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

pub fn format_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No analyses recorded.\n".to_string();
    }

    entries
        .iter()
        .map(|entry| {
            let label = entry.reference().unwrap_or_else(|| preview(&entry.text, 24));
            format!(
                "{}  {}  {:<24}  letters={} words={} abjad={} ({})\n",
                entry.id,
                format_timestamp(entry.timestamp),
                label,
                entry.letter_count,
                entry.word_count,
                entry.abjad_value,
                entry.abjad_system
            )
        })
        .collect()
}

pub fn format_surahs(surahs: &[SurahSummary]) -> String {
    surahs
        .iter()
        .map(|s| {
            format!(
                "{:>3}  {:<20}  {:<28}  {} verses\n",
                s.number, s.name_arabic, s.name_english, s.verse_count
            )
        })
        .collect()
}

pub fn format_verse(verse: &Verse) -> String {
    format!(
        "{}:{}  {}\nletters={} words={} abjad={}\n",
        verse.surah_number,
        verse.verse_number,
        verse.text_uthmani,
        verse.letter_count,
        verse.word_count,
        verse.abjad_value
    )
}

fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
