//! Recitation progression: finds where the reciter started, then follows
//! them passage by passage through a unit, cycling through repetitions.
//!
//! # Phases
//! ```text
//! SeekingStart -> InProgress -> UnitComplete -> SeekingStart (next repetition)
//!                                            -> CycleComplete
//! ```
//! A transition phrase in SeekingStart or InProgress ends the current unit
//! and counts as a completed repetition. A listening timeout ends the current
//! attempt without counting it.

use crate::collab::{ListenRequest, Prompt, PromptDisplay, SpeechSource, Utterance};
use crate::config::SessionConfig;
use crate::error::ConfigError;
use crate::matcher::VerseMatcher;
use crate::normalize::{is_bare_transition_phrase, is_preamble, is_transition_phrase};
use crate::report::SessionReport;
use crate::types::{Corpus, MatchOutcome, Passage};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    SeekingStart,
    InProgress,
    UnitComplete,
    CycleComplete,
}

/// Mutable progress of one session. Owned by its [`RecitationSession`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub unit_id: Option<u32>,
    /// Last passage the reciter has completed.
    pub cursor_seq: u32,
    pub mismatch_count: u32,
    pub repetition_index: u32,
    pub phase: Phase,
    /// Passages the cursor was forced past without a confirmed match.
    pub unresolved: Vec<u32>,
}

impl SessionState {
    fn reset_unit(&mut self) {
        self.unit_id = None;
        self.cursor_seq = 0;
        self.mismatch_count = 0;
        self.unresolved.clear();
        self.phase = Phase::SeekingStart;
    }
}

/// What processing one utterance (or completing a unit) did.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Nothing usable was heard; listen again.
    Noise,
    PreambleAcknowledged,
    /// The wait window elapsed; the current attempt was abandoned.
    ListeningTimedOut,
    /// The candidate window was empty.
    NoCandidates,
    LowConfidence { similarity: f64 },
    /// Several passages matched equally well.
    Ambiguous { similarity: f64 },
    Started { unit_id: u32, cursor_seq: u32 },
    Mismatch { cursor_seq: u32, mismatch_count: u32 },
    Advanced { cursor_seq: u32 },
    /// The mismatch cap was exceeded and the cursor moved on regardless.
    AdvancedWithUnresolvedMismatch { cursor_seq: u32 },
    TransitionDetected { repetition_index: u32 },
    UnitCompleted { unit_id: u32, repetition_index: u32 },
    /// The cycle is already complete.
    Finished,
}

/// Why [`RecitationSession::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    CycleComplete,
    /// The recognizer stopped delivering input.
    InputExhausted,
    NoCandidates,
}

/// A recitation session over a read-only corpus.
pub struct RecitationSession<'c> {
    corpus: &'c Corpus,
    config: SessionConfig,
    matcher: VerseMatcher,
    start_window: Cow<'c, [Passage]>,
    state: SessionState,
    report: SessionReport,
}

impl<'c> RecitationSession<'c> {
    pub fn new(corpus: &'c Corpus, config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let start_window = match &config.start_units {
            Some(units) => Cow::Owned(corpus.restrict_to(units)),
            None => Cow::Borrowed(corpus.passages()),
        };

        Ok(Self {
            corpus,
            matcher: VerseMatcher::new(config.fallback_threshold),
            config,
            start_window,
            state: SessionState::default(),
            report: SessionReport::new(Utc::now()),
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn report(&self) -> &SessionReport {
        &self.report
    }

    pub fn is_finished(&self) -> bool {
        self.state.phase == Phase::CycleComplete
    }

    /// Passages the next utterance is matched against.
    ///
    /// While seeking, the whole corpus (or the configured units). While in
    /// progress, the passage at the cursor and the one after it.
    pub fn candidates(&self) -> &[Passage] {
        match (self.state.phase, self.state.unit_id) {
            (Phase::SeekingStart, _) => &self.start_window[..],
            (Phase::InProgress, Some(unit_id)) => {
                let unit = self.corpus.unit(unit_id);
                match unit
                    .iter()
                    .position(|p| p.sequence == self.state.cursor_seq)
                {
                    Some(idx) => &unit[idx..(idx + 2).min(unit.len())],
                    None => &[],
                }
            }
            _ => &[],
        }
    }

    /// Listening limits for the next utterance, paced on the expected passage.
    pub fn listen_request(&self) -> ListenRequest {
        let words = match (self.state.phase, self.state.unit_id) {
            (Phase::InProgress, Some(unit_id)) => self
                .corpus
                .passage(unit_id, self.state.cursor_seq + 1)
                .map(Passage::word_count),
            _ => None,
        }
        .unwrap_or(self.config.start_phrase_words as usize);

        ListenRequest {
            max_wait: self.config.max_wait(),
            max_phrase: self.config.phrase_limit(words),
        }
    }

    /// Current prompt, once a unit has been identified.
    pub fn prompt(&self) -> Option<Prompt<'_>> {
        let unit_id = self.state.unit_id?;
        Some(Prompt {
            unit_id,
            passages: self.corpus.unit(unit_id),
            highlight_seq: self.state.cursor_seq + 1,
            mismatch_count: self.state.mismatch_count,
            unresolved: &self.state.unresolved,
        })
    }

    /// Process exactly one utterance.
    ///
    /// In `UnitComplete` the utterance is discarded and the unit is completed
    /// instead; callers that drive the session by hand should call
    /// [`complete_unit`](Self::complete_unit) before listening again.
    pub fn handle(&mut self, utterance: Utterance) -> SessionEvent {
        let event = self.process(utterance);
        debug!(
            ?event,
            phase = ?self.state.phase,
            cursor = self.state.cursor_seq,
            "handled utterance"
        );
        self.record(&event);
        event
    }

    /// Close out a finished unit: count the repetition and either seek the
    /// next unit or finish the cycle. `None` unless in `UnitComplete`.
    pub fn complete_unit(&mut self) -> Option<SessionEvent> {
        let event = self.close_unit()?;
        self.record(&event);
        Some(event)
    }

    /// Drive the session until the cycle completes or input runs out.
    pub fn run<S, D>(&mut self, mut speech: S, mut display: D) -> RunOutcome
    where
        S: SpeechSource,
        D: PromptDisplay,
    {
        loop {
            match self.state.phase {
                Phase::CycleComplete => return RunOutcome::CycleComplete,
                Phase::UnitComplete => {
                    self.complete_unit();
                    continue;
                }
                Phase::SeekingStart | Phase::InProgress => {}
            }

            if let Some(prompt) = self.prompt() {
                display.render(&prompt);
            }

            let utterance = speech.next_utterance(self.listen_request());
            match self.handle(utterance) {
                SessionEvent::ListeningTimedOut => return RunOutcome::InputExhausted,
                SessionEvent::NoCandidates => return RunOutcome::NoCandidates,
                _ => {}
            }

            // Show the finished unit before it is closed.
            if self.state.phase == Phase::UnitComplete {
                if let Some(prompt) = self.prompt() {
                    display.render(&prompt);
                }
            }
        }
    }

    fn process(&mut self, utterance: Utterance) -> SessionEvent {
        match self.state.phase {
            Phase::CycleComplete => return SessionEvent::Finished,
            Phase::UnitComplete => {
                debug!("utterance discarded while completing unit");
                return self.close_unit().unwrap_or(SessionEvent::Finished);
            }
            Phase::SeekingStart | Phase::InProgress => {}
        }

        let text = match utterance {
            Utterance::Timeout => {
                info!(phase = ?self.state.phase, "listening timed out, ending attempt");
                self.state.reset_unit();
                return SessionEvent::ListeningTimedOut;
            }
            Utterance::NoSpeech => return SessionEvent::Noise,
            Utterance::Text(text) => text,
        };

        if is_preamble(&text) {
            return SessionEvent::PreambleAcknowledged;
        }
        let transition = match self.state.phase {
            // Mid-unit, the phrase may be part of the recited text.
            Phase::InProgress => is_bare_transition_phrase(&text),
            _ => is_transition_phrase(&text),
        };
        if transition {
            let repetition_index = self.advance_repetition();
            info!(repetition_index, "transition phrase detected");
            return SessionEvent::TransitionDetected { repetition_index };
        }
        if text.trim().chars().count() < self.config.min_text_len {
            return SessionEvent::Noise;
        }

        let window = self.candidates();
        if window.is_empty() {
            warn!(phase = ?self.state.phase, "no candidate passages to match against");
            return SessionEvent::NoCandidates;
        }
        let outcome = self.matcher.find_best(&text, window);

        match self.state.phase {
            Phase::InProgress => self.follow(outcome),
            _ => self.seek(outcome),
        }
    }

    fn seek(&mut self, outcome: MatchOutcome) -> SessionEvent {
        let Some(candidate) = outcome.candidate else {
            return SessionEvent::NoCandidates;
        };
        if candidate.similarity < self.config.start_confidence {
            return SessionEvent::LowConfidence {
                similarity: candidate.similarity,
            };
        }
        if outcome.tied {
            return SessionEvent::Ambiguous {
                similarity: candidate.similarity,
            };
        }

        self.state.unit_id = Some(candidate.unit_id);
        self.state.cursor_seq = candidate.last_seq();
        self.state.mismatch_count = 0;
        self.state.unresolved.clear();
        self.state.phase = Phase::InProgress;
        info!(
            unit_id = candidate.unit_id,
            cursor_seq = self.state.cursor_seq,
            similarity = candidate.similarity,
            "recitation start identified"
        );
        self.check_unit_end();

        SessionEvent::Started {
            unit_id: candidate.unit_id,
            cursor_seq: self.state.cursor_seq,
        }
    }

    fn follow(&mut self, outcome: MatchOutcome) -> SessionEvent {
        let cursor = self.state.cursor_seq;
        let confirmed = outcome.candidate.as_ref().is_some_and(|c| {
            // A pair must start on the passage just finished: the reciter
            // repeated its tail and ran into the next one.
            let in_position = if c.is_pair() {
                c.start_seq == cursor
            } else {
                c.start_seq == cursor + 1
            };
            in_position && c.similarity >= self.config.match_threshold
        });

        if confirmed {
            self.advance();
            return SessionEvent::Advanced {
                cursor_seq: self.state.cursor_seq,
            };
        }

        if self.state.mismatch_count >= self.config.mismatch_cap {
            warn!(
                passage = cursor + 1,
                mismatches = self.state.mismatch_count,
                "mismatch cap exceeded, moving on"
            );
            self.state.unresolved.push(cursor + 1);
            self.advance();
            return SessionEvent::AdvancedWithUnresolvedMismatch {
                cursor_seq: self.state.cursor_seq,
            };
        }

        self.state.mismatch_count += 1;
        debug!(
            expected = cursor + 1,
            best = ?outcome.candidate,
            mismatches = self.state.mismatch_count,
            "mismatch"
        );
        SessionEvent::Mismatch {
            cursor_seq: cursor,
            mismatch_count: self.state.mismatch_count,
        }
    }

    fn close_unit(&mut self) -> Option<SessionEvent> {
        if self.state.phase != Phase::UnitComplete {
            return None;
        }
        let unit_id = self.state.unit_id.unwrap_or_default();
        let repetition_index = self.advance_repetition();
        info!(unit_id, repetition_index, "unit complete");

        Some(SessionEvent::UnitCompleted {
            unit_id,
            repetition_index,
        })
    }

    fn advance(&mut self) {
        self.state.cursor_seq += 1;
        self.state.mismatch_count = 0;
        self.check_unit_end();
    }

    fn check_unit_end(&mut self) {
        let last = self
            .state
            .unit_id
            .and_then(|unit_id| self.corpus.last_sequence(unit_id));
        if last.is_some_and(|last| self.state.cursor_seq >= last) {
            self.state.phase = Phase::UnitComplete;
        }
    }

    /// Count one repetition and move to the next unit or finish the cycle.
    fn advance_repetition(&mut self) -> u32 {
        self.state.repetition_index =
            (self.state.repetition_index + 1).min(self.config.repetition_cap);
        self.state.reset_unit();
        if self.state.repetition_index >= self.config.repetition_cap {
            self.state.phase = Phase::CycleComplete;
            info!(repetitions = self.state.repetition_index, "cycle complete");
        }
        self.state.repetition_index
    }

    fn record(&mut self, event: &SessionEvent) {
        self.report.record(event);
        if self.state.phase == Phase::CycleComplete && self.report.finished_at.is_none() {
            self.report.finish(Utc::now());
        }
    }
}
