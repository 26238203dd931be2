//! Matching recognized speech against a window of candidate passages.

use crate::normalize::normalize;
use crate::similarity::score;
use crate::types::{MatchCandidate, MatchOutcome, Passage};
use tracing::debug;

/// Default best-single score below which adjacent pairs are also tried.
pub const DEFAULT_FALLBACK_THRESHOLD: f64 = 0.43;

/// Running best candidate plus the tie flag.
///
/// A strictly higher score replaces the best and clears the flag. An equal
/// score sets the flag, and only a later strictly higher score clears it.
#[derive(Debug, Default)]
struct TieReducer {
    best: Option<MatchCandidate>,
    tied: bool,
}

impl TieReducer {
    fn observe(&mut self, candidate: MatchCandidate) {
        match &self.best {
            Some(best) if candidate.similarity < best.similarity => {}
            Some(best) if candidate.similarity == best.similarity => self.tied = true,
            _ => {
                self.best = Some(candidate);
                self.tied = false;
            }
        }
    }

    /// Replace only on a strictly higher score; equal scores are ignored.
    fn observe_strict(&mut self, candidate: MatchCandidate) {
        if self
            .best
            .as_ref()
            .map_or(true, |best| candidate.similarity > best.similarity)
        {
            self.best = Some(candidate);
            self.tied = false;
        }
    }

    fn best_score(&self) -> Option<f64> {
        self.best.as_ref().map(|b| b.similarity)
    }

    fn finish(self) -> MatchOutcome {
        MatchOutcome {
            candidate: self.best,
            tied: self.tied,
        }
    }
}

/// Finds the passage (or adjacent pair of passages) closest to an utterance.
#[derive(Debug, Clone)]
pub struct VerseMatcher {
    fallback_threshold: f64,
}

impl Default for VerseMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_THRESHOLD)
    }
}

impl VerseMatcher {
    pub fn new(fallback_threshold: f64) -> Self {
        Self { fallback_threshold }
    }

    pub fn fallback_threshold(&self) -> f64 {
        self.fallback_threshold
    }

    /// Score `recognized` against every candidate, in order.
    ///
    /// When the best single passage scores below the fallback threshold,
    /// consecutive passages of the same unit are joined with a space and
    /// scored as one, to catch utterances that run across a verse boundary.
    pub fn find_best(&self, recognized: &str, candidates: &[Passage]) -> MatchOutcome {
        let recognized = normalize(recognized);
        let mut reducer = TieReducer::default();

        for passage in candidates {
            let similarity = score(&recognized, &normalize(&passage.text));
            reducer.observe(MatchCandidate::single(passage, similarity));
        }

        if reducer
            .best_score()
            .is_some_and(|best| best < self.fallback_threshold)
        {
            for window in candidates.windows(2) {
                let (first, second) = (&window[0], &window[1]);
                if first.unit_id != second.unit_id
                    || first.sequence.checked_add(1) != Some(second.sequence)
                {
                    continue;
                }
                let joined = format!("{} {}", first.text, second.text);
                let similarity = score(&recognized, &normalize(&joined));
                reducer.observe_strict(MatchCandidate::pair(first, second, similarity));
            }
        }

        let outcome = reducer.finish();
        debug!(
            candidates = candidates.len(),
            best = ?outcome.candidate,
            tied = outcome.tied,
            "matched utterance"
        );
        outcome
    }
}
