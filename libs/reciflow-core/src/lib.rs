//! Core recitation-following engine shared by recitation front ends.
//!
//! Provides:
//! - Arabic text normalization (diacritics, basmala preamble)
//! - Similarity scoring (Levenshtein distance)
//! - Verse matching with tie detection and cross-boundary fallback
//! - The recitation session state machine
//! - Shared types (Passage, Corpus, MatchOutcome, etc.)

pub mod collab;
pub mod config;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod phrases;
pub mod report;
pub mod session;
pub mod similarity;
pub mod types;

pub use collab::{CorpusStore, ListenRequest, Prompt, PromptDisplay, SpeechSource, Utterance};
pub use config::SessionConfig;
pub use error::{ConfigError, CorpusError};
pub use matcher::VerseMatcher;
pub use normalize::{
    is_bare_transition_phrase, is_preamble, is_transition_phrase, normalize, strip_diacritics,
};
pub use report::SessionReport;
pub use session::{Phase, RecitationSession, RunOutcome, SessionEvent, SessionState};
pub use similarity::{levenshtein_distance, score};
pub use types::{Corpus, MatchCandidate, MatchOutcome, Passage};
