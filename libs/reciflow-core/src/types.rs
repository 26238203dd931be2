//! Core types for the recitation engine.

use crate::error::CorpusError;
use serde::{Deserialize, Serialize};

/// A single numbered reference text (a verse) within a unit (a chapter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    pub unit_id: u32,
    /// 1-based, strictly increasing within a unit.
    pub sequence: u32,
    pub text: String,
}

impl Passage {
    pub fn new(unit_id: u32, sequence: u32, text: impl Into<String>) -> Self {
        Self {
            unit_id,
            sequence,
            text: text.into(),
        }
    }

    /// Number of whitespace-separated words in the passage text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Read-only, ordered collection of passages (by unit, then sequence).
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    passages: Vec<Passage>,
}

impl Corpus {
    /// Build a corpus, sorting the passages and rejecting duplicates.
    ///
    /// Sequence numbers within a unit must be contiguous; a unit may start
    /// at any non-zero sequence.
    pub fn new(mut passages: Vec<Passage>) -> Result<Self, CorpusError> {
        passages.sort_by_key(|p| (p.unit_id, p.sequence));

        for (idx, passage) in passages.iter().enumerate() {
            if passage.sequence == 0 {
                return Err(CorpusError::InvalidSequence {
                    unit_id: passage.unit_id,
                });
            }
            let Some(prev) = idx.checked_sub(1).map(|i| &passages[i]) else {
                continue;
            };
            if prev.unit_id != passage.unit_id {
                continue;
            }
            if prev.sequence == passage.sequence {
                return Err(CorpusError::DuplicatePassage {
                    unit_id: passage.unit_id,
                    sequence: passage.sequence,
                });
            }
            // Sorted and distinct, so prev.sequence < passage.sequence.
            if passage.sequence != prev.sequence + 1 {
                return Err(CorpusError::SequenceGap {
                    unit_id: passage.unit_id,
                    expected: prev.sequence + 1,
                    found: passage.sequence,
                });
            }
        }

        Ok(Self { passages })
    }

    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// All passages of one unit, in sequence order. Empty if the unit is unknown.
    pub fn unit(&self, unit_id: u32) -> &[Passage] {
        let start = self.passages.partition_point(|p| p.unit_id < unit_id);
        let end = self.passages.partition_point(|p| p.unit_id <= unit_id);
        &self.passages[start..end]
    }

    pub fn passage(&self, unit_id: u32, sequence: u32) -> Option<&Passage> {
        let unit = self.unit(unit_id);
        unit.binary_search_by_key(&sequence, |p| p.sequence)
            .ok()
            .map(|idx| &unit[idx])
    }

    pub fn last_sequence(&self, unit_id: u32) -> Option<u32> {
        self.unit(unit_id).last().map(|p| p.sequence)
    }

    /// Distinct unit ids in ascending order.
    pub fn unit_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.passages.iter().map(|p| p.unit_id).collect();
        ids.dedup();
        ids
    }

    /// Passages belonging to any of the given units, in corpus order.
    pub fn restrict_to(&self, units: &[u32]) -> Vec<Passage> {
        self.passages
            .iter()
            .filter(|p| units.contains(&p.unit_id))
            .cloned()
            .collect()
    }
}

/// Best-scoring candidate of one matching pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub unit_id: u32,
    pub start_seq: u32,
    /// Present only when two adjacent passages were matched as one utterance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_seq: Option<u32>,
    pub similarity: f64,
}

impl MatchCandidate {
    pub fn single(passage: &Passage, similarity: f64) -> Self {
        Self {
            unit_id: passage.unit_id,
            start_seq: passage.sequence,
            end_seq: None,
            similarity,
        }
    }

    pub fn pair(first: &Passage, second: &Passage, similarity: f64) -> Self {
        Self {
            unit_id: first.unit_id,
            start_seq: first.sequence,
            end_seq: Some(second.sequence),
            similarity,
        }
    }

    pub fn is_pair(&self) -> bool {
        self.end_seq.is_some()
    }

    /// Sequence number of the last passage covered by this candidate.
    pub fn last_seq(&self) -> u32 {
        self.end_seq.unwrap_or(self.start_seq)
    }
}

/// Result of matching recognized text against a candidate window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub candidate: Option<MatchCandidate>,
    /// Two or more candidates share the best score.
    pub tied: bool,
}

impl MatchOutcome {
    /// Best similarity, or 0.0 when there was nothing to match against.
    pub fn similarity(&self) -> f64 {
        self.candidate.as_ref().map_or(0.0, |c| c.similarity)
    }
}
