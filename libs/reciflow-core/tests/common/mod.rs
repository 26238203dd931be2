//! Scripted collaborators for driving a session end to end.

use reciflow_core::{ListenRequest, Passage, Prompt, PromptDisplay, SpeechSource, Utterance};
use std::collections::VecDeque;

/// Replays a fixed list of utterances, then times out.
#[derive(Default)]
pub struct ScriptedSpeech {
    script: VecDeque<Utterance>,
    pub requests: Vec<ListenRequest>,
}

impl ScriptedSpeech {
    pub fn new(script: Vec<Utterance>) -> Self {
        Self {
            script: script.into(),
            requests: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SpeechSource for ScriptedSpeech {
    fn next_utterance(&mut self, request: ListenRequest) -> Utterance {
        self.requests.push(request);
        self.script.pop_front().unwrap_or(Utterance::Timeout)
    }
}

/// One captured prompt update.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub unit_id: u32,
    pub highlight_seq: u32,
    pub mismatch_count: u32,
    pub unresolved: Vec<u32>,
}

#[derive(Default)]
pub struct RecordingDisplay {
    pub frames: Vec<Frame>,
}

impl PromptDisplay for RecordingDisplay {
    fn render(&mut self, prompt: &Prompt<'_>) {
        self.frames.push(Frame {
            unit_id: prompt.unit_id,
            highlight_seq: prompt.highlight_seq,
            mismatch_count: prompt.mismatch_count,
            unresolved: prompt.unresolved.to_vec(),
        });
    }
}

pub fn say(text: &str) -> Utterance {
    Utterance::Text(text.to_string())
}

/// Surah al-Ikhlas (112), with full diacritics.
pub fn ikhlas() -> Vec<Passage> {
    vec![
        Passage::new(112, 1, "قُلْ هُوَ ٱللَّهُ أَحَدٌ"),
        Passage::new(112, 2, "ٱللَّهُ ٱلصَّمَدُ"),
        Passage::new(112, 3, "لَمْ يَلِدْ وَلَمْ يُولَدْ"),
        Passage::new(112, 4, "وَلَمْ يَكُن لَّهُۥ كُفُوًا أَحَدٌۢ"),
    ]
}

/// Surah al-Asr (103), in plain script.
pub fn asr() -> Vec<Passage> {
    vec![
        Passage::new(103, 1, "والعصر"),
        Passage::new(103, 2, "إن الإنسان لفي خسر"),
        Passage::new(
            103,
            3,
            "إلا الذين آمنوا وعملوا الصالحات وتواصوا بالحق وتواصوا بالصبر",
        ),
    ]
}
