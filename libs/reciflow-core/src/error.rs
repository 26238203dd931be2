//! Error types for reciflow-core.

use thiserror::Error;

/// Errors raised while assembling a corpus.
#[derive(Debug, Error, PartialEq)]
pub enum CorpusError {
    #[error("duplicate passage {unit_id}:{sequence}")]
    DuplicatePassage { unit_id: u32, sequence: u32 },

    #[error("passage in unit {unit_id} has sequence number 0")]
    InvalidSequence { unit_id: u32 },

    #[error("unit {unit_id} skips from sequence {expected} to {found}")]
    SequenceGap {
        unit_id: u32,
        expected: u32,
        found: u32,
    },
}

/// Errors raised when a session configuration is unusable.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    #[error("{name} must be greater than zero")]
    ZeroCap { name: &'static str },

    #[error("seconds_per_word must be positive and finite, got {value}")]
    InvalidPacing { value: f64 },
}
