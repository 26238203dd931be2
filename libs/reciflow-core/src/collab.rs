//! Interfaces to the collaborators around the engine: speech recognition,
//! the corpus store and the prompt display.

use crate::types::Passage;
use std::time::Duration;

/// Listening limits for one utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenRequest {
    /// How long to wait for speech to begin.
    pub max_wait: Duration,
    /// How long a single phrase may run once speech has begun.
    pub max_phrase: Duration,
}

/// One event from the speech recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Utterance {
    Text(String),
    /// Audio was heard but nothing could be transcribed.
    NoSpeech,
    /// Nothing was heard within the wait window.
    Timeout,
}

/// Blocking source of recognized utterances.
pub trait SpeechSource {
    fn next_utterance(&mut self, request: ListenRequest) -> Utterance;
}

impl<S: SpeechSource + ?Sized> SpeechSource for &mut S {
    fn next_utterance(&mut self, request: ListenRequest) -> Utterance {
        (**self).next_utterance(request)
    }
}

/// Read-only reference text store, loaded once per session.
pub trait CorpusStore {
    type Error;

    fn load_all(&self) -> Result<Vec<Passage>, Self::Error>;
}

/// What the prompt display should show after an update.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt<'a> {
    pub unit_id: u32,
    pub passages: &'a [Passage],
    /// The passage the reciter is expected to say next.
    pub highlight_seq: u32,
    pub mismatch_count: u32,
    /// Passages skipped past after an unresolved mismatch.
    pub unresolved: &'a [u32],
}

/// Side-effecting sink for prompt updates.
pub trait PromptDisplay {
    fn render(&mut self, prompt: &Prompt<'_>);
}

impl<D: PromptDisplay + ?Sized> PromptDisplay for &mut D {
    fn render(&mut self, prompt: &Prompt<'_>) {
        (**self).render(prompt)
    }
}
