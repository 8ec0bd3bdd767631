//! # Local Text Analyzer
//!
//! Letter and word counting computed directly from a text string.
//!
//! These are fallbacks for free text: the remote service owns the
//! authoritative, method-aware letter counting. The local letter count
//! always approximates a base-letter count (`no_wasla` style).

use std::ops::RangeInclusive;

/// Code points of the Arabic block (U+0600..=U+06FF)
const ARABIC_BLOCK: RangeInclusive<char> = '\u{0600}'..='\u{06FF}';

/// Harakat, tanween and other combining marks excluded from letter counts
const ARABIC_DIACRITICS: RangeInclusive<char> = '\u{064B}'..='\u{065F}';

/// Check whether a code point counts as a letter for local analysis
pub fn is_counted_letter(ch: char) -> bool {
    ARABIC_BLOCK.contains(&ch) && !ARABIC_DIACRITICS.contains(&ch)
}

/// Check whether a code point is an Arabic diacritic mark
pub fn is_diacritic(ch: char) -> bool {
    ARABIC_DIACRITICS.contains(&ch)
}

/// Count Arabic letters in `text`, ignoring diacritics.
///
/// Iterates by Unicode scalar value so combining sequences never inflate
/// the count.
pub fn count_letters(text: &str) -> u64 {
    text.chars().filter(|&ch| is_counted_letter(ch)).count() as u64
}

/// Occurrences of each counted letter, in order of first appearance.
///
/// Counts exactly the code points [`count_letters`] counts, so the total
/// always equals `count_letters(text)`.
pub fn letter_distribution(text: &str) -> Vec<(char, u64)> {
    let mut distribution: Vec<(char, u64)> = Vec::new();
    for ch in text.chars().filter(|&ch| is_counted_letter(ch)) {
        match distribution.iter_mut().find(|(letter, _)| *letter == ch) {
            Some((_, count)) => *count += 1,
            None => distribution.push((ch, 1)),
        }
    }
    distribution
}

/// Count whitespace-separated words in `text`
pub fn count_words(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}
