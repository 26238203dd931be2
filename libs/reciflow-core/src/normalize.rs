//! Text normalization applied to both recognized and reference text.
//!
//! Normalized text is the consonantal skeleton: vowel marks, Quranic
//! annotation signs and tatweel are removed, whitespace is collapsed, and a
//! leading basmala is dropped unless it opens al-Fatiha.

use crate::phrases::{OPENING_VARIANTS, PREAMBLE_VARIANTS, TRANSITION_VARIANTS};

/// Whether `c` is a diacritical mark (or elongation) rather than a letter.
pub fn is_diacritic(c: char) -> bool {
    matches!(c,
        '\u{0610}'..='\u{061A}' // honorific and small high signs
        | '\u{0640}'            // tatweel
        | '\u{064B}'..='\u{065F}' // tanween, harakat, shadda, sukun
        | '\u{0670}'            // superscript alef
        | '\u{06D6}'..='\u{06DC}'
        | '\u{06DF}'..='\u{06E8}'
        | '\u{06EA}'..='\u{06ED}')
}

/// Remove every diacritical mark from `text`.
pub fn strip_diacritics(text: &str) -> String {
    text.chars().filter(|c| !is_diacritic(*c)).collect()
}

/// Diacritic-free text with whitespace trimmed and collapsed.
fn canonical(text: &str) -> String {
    strip_diacritics(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize text for comparison.
pub fn normalize(text: &str) -> String {
    let mut current = canonical(text);
    while let Some(rest) = strip_preamble(&current) {
        current = rest.to_string();
    }
    current
}

/// Strip one leading basmala if it is a strict, word-bounded prefix that is
/// not followed by the opening of al-Fatiha.
fn strip_preamble(text: &str) -> Option<&str> {
    for variant in PREAMBLE_VARIANTS {
        let preamble = canonical(variant);
        let Some(rest) = text.strip_prefix(preamble.as_str()) else {
            continue;
        };
        if !rest.starts_with(' ') {
            continue;
        }
        let rest = rest.trim_start();
        let opens_fatiha = OPENING_VARIANTS
            .iter()
            .any(|opening| rest.starts_with(canonical(opening).as_str()));
        if !opens_fatiha {
            return Some(rest);
        }
    }
    None
}

/// Whether the whole utterance is the basmala and nothing else.
pub fn is_preamble(text: &str) -> bool {
    let text = canonical(text);
    PREAMBLE_VARIANTS
        .iter()
        .any(|variant| canonical(variant) == text)
}

/// Whether the utterance contains a prayer transition phrase.
pub fn is_transition_phrase(text: &str) -> bool {
    let text = canonical(text);
    !text.is_empty()
        && TRANSITION_VARIANTS
            .iter()
            .any(|variant| text.contains(canonical(variant).as_str()))
}

/// Whether the whole utterance is a transition phrase and nothing else.
pub fn is_bare_transition_phrase(text: &str) -> bool {
    let text = canonical(text);
    TRANSITION_VARIANTS
        .iter()
        .any(|variant| canonical(variant) == text)
}
