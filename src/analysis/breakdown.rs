//! Per-letter breakdowns whose counts always total the result's
//! `letter_count`.
//!
//! Counts come from a letter distribution; the backend's Abjad breakdown
//! only contributes each letter's numeric value.

use std::collections::HashMap;

use super::text::letter_distribution;
use super::types::LetterBreakdown;
use crate::gateway::AbjadBreakdownItem;

/// Abjad value of a single occurrence of each letter the backend reported.
///
/// Items are either one per occurrence or already aggregated with a
/// `count`; aggregated values are divided back down to one occurrence.
pub fn letter_values(items: &[AbjadBreakdownItem]) -> HashMap<String, u64> {
    let mut values = HashMap::new();
    for item in items {
        let Some(value) = item.value else { continue };
        let occurrences = item.count.unwrap_or(1).max(1);
        values
            .entry(item.letter.clone())
            .or_insert(value / occurrences);
    }
    values
}

/// Breakdown of text counted locally.
///
/// Counts are exactly the code points [`count_letters`] counts.
///
/// [`count_letters`]: super::text::count_letters
pub fn from_text(text: &str, items: &[AbjadBreakdownItem]) -> Vec<LetterBreakdown> {
    let counts: Vec<(String, u64)> = letter_distribution(text)
        .into_iter()
        .map(|(letter, count)| (letter.to_string(), count))
        .collect();
    let total = counts.iter().map(|(_, count)| count).sum();
    build(counts, &letter_values(items), total)
}

/// Breakdown scaled so its counts total `letter_count`.
///
/// `distribution` supplies the relative weight of each letter in display
/// order. Counts are apportioned by largest remainder, so they sum to
/// `letter_count` exactly. Returns `None` when there is nothing to scale
/// from but letters to account for.
pub fn scaled(
    distribution: Vec<(String, u64)>,
    items: &[AbjadBreakdownItem],
    letter_count: u64,
) -> Option<Vec<LetterBreakdown>> {
    let total: u64 = distribution.iter().map(|(_, weight)| weight).sum();
    if letter_count == 0 {
        return Some(Vec::new());
    }
    if total == 0 {
        return None;
    }

    let counts = apportion(distribution, total, letter_count);
    Some(build(counts, &letter_values(items), letter_count))
}

fn apportion(distribution: Vec<(String, u64)>, total: u64, target: u64) -> Vec<(String, u64)> {
    let mut shares: Vec<(String, u64, u128)> = distribution
        .into_iter()
        .map(|(letter, weight)| {
            let exact = weight as u128 * target as u128;
            let base = (exact / total as u128) as u64;
            (letter, base, exact % total as u128)
        })
        .collect();

    let assigned: u64 = shares.iter().map(|(_, base, _)| base).sum();
    let mut order: Vec<usize> = (0..shares.len()).collect();
    // stable: equal remainders favour earlier letters
    order.sort_by(|&a, &b| shares[b].2.cmp(&shares[a].2));
    for &index in order.iter().take((target - assigned) as usize) {
        shares[index].1 += 1;
    }

    shares
        .into_iter()
        .filter(|(_, count, _)| *count > 0)
        .map(|(letter, count, _)| (letter, count))
        .collect()
}

/// Ordered by count descending, ties keeping distribution order
fn build(
    counts: Vec<(String, u64)>,
    values: &HashMap<String, u64>,
    letter_count: u64,
) -> Vec<LetterBreakdown> {
    let mut letters: Vec<LetterBreakdown> = counts
        .into_iter()
        .map(|(letter, count)| LetterBreakdown {
            abjad_value: values.get(&letter).map(|value| value * count),
            percentage: round_percentage(count, letter_count),
            letter,
            count,
        })
        .collect();

    letters.sort_by(|a, b| b.count.cmp(&a.count));
    letters
}

fn round_percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 10_000.0).round() / 100.0
}
