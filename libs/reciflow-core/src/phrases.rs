//! Ritual phrases recognized around recitation.
//!
//! Variants are listed as they appear in the reference text and as the
//! recognizer spells them. Comparison always happens on the normalized form.

/// The basmala, recited before a chapter.
pub const PREAMBLE_VARIANTS: &[&str] = &[
    "بِسۡمِ ٱللَّهِ ٱلرَّحۡمَٰنِ ٱلرَّحِيمِ",
    "بسم الله الرحمن الرحيم",
];

/// Opening of al-Fatiha. When it directly follows the basmala the basmala is
/// part of the recited content and is kept.
pub const OPENING_VARIANTS: &[&str] = &[
    "ٱلحمد للّه ربّ ٱلعـٰلمين",
    "ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَـٰلَمِينَ",
    "الحمد لله رب العالمين",
];

/// Utterances that mark a change of prayer posture, ending the recitation.
pub const TRANSITION_VARIANTS: &[&str] = &[
    "سميع الله لمن حمده",
    "سمى الله لمن حمده",
    "الله اكبر",
    "الله أكبر",
    "سمى الله لمن هم",
];
