//! Tunable thresholds and pacing for a recitation session.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session configuration. Every value is tunable; defaults suit Google-style
/// Arabic recognition of a moderately paced reciter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Minimum similarity to commit to a starting passage.
    pub start_confidence: f64,
    /// Minimum similarity to confirm the next passage while in progress.
    pub match_threshold: f64,
    /// Best single score below which adjacent pairs are also scored.
    pub fallback_threshold: f64,
    /// Shorter utterances (in chars) are treated as noise.
    pub min_text_len: usize,
    /// Mismatches tolerated on one passage before the cursor is forced on.
    pub mismatch_cap: u32,
    /// Units recited in one full cycle.
    pub repetition_cap: u32,
    pub seconds_per_word: f64,
    /// Assumed utterance length, in words, while seeking the start.
    pub start_phrase_words: u32,
    pub max_wait_secs: u64,
    /// Units searched while seeking the start; the whole corpus when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_units: Option<Vec<u32>>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_confidence: 0.25,
            match_threshold: 0.38,
            fallback_threshold: 0.43,
            min_text_len: 5,
            mismatch_cap: 2,
            repetition_cap: 12,
            seconds_per_word: 0.45,
            start_phrase_words: 4,
            max_wait_secs: 35,
            start_units: None,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("start_confidence", self.start_confidence),
            ("match_threshold", self.match_threshold),
            ("fallback_threshold", self.fallback_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }

        if self.mismatch_cap == 0 {
            return Err(ConfigError::ZeroCap {
                name: "mismatch_cap",
            });
        }
        if self.repetition_cap == 0 {
            return Err(ConfigError::ZeroCap {
                name: "repetition_cap",
            });
        }
        if !self.seconds_per_word.is_finite() || self.seconds_per_word <= 0.0 {
            return Err(ConfigError::InvalidPacing {
                value: self.seconds_per_word,
            });
        }

        Ok(())
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_secs(self.max_wait_secs)
    }

    /// Listening budget for an utterance of `words` words.
    pub fn phrase_limit(&self, words: usize) -> Duration {
        Duration::from_secs_f64(words as f64 * self.seconds_per_word)
    }
}
