//! Transcript source fed by an external speech recognizer.
//!
//! Each line of input is one recognized utterance. Recognizer bridges that
//! report failures in-band use the `UV ERROR` and `TIME ERROR` markers.

use reciflow_core::{ListenRequest, SpeechSource, Utterance};
use std::io::BufRead;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::thread;

const NO_SPEECH_MARKER: &str = "UV ERROR";
const TIMEOUT_MARKER: &str = "TIME ERROR";

/// Map one transcript line to an utterance.
pub fn parse_line(line: &str) -> Utterance {
    match line.trim() {
        "" | NO_SPEECH_MARKER => Utterance::NoSpeech,
        TIMEOUT_MARKER => Utterance::Timeout,
        text => Utterance::Text(text.to_string()),
    }
}

/// Reads transcript lines on a background thread so that waiting for the
/// next one can time out.
pub struct StdinTranscriptSource {
    rx: Receiver<String>,
}

impl StdinTranscriptSource {
    /// Start reading `reader` line by line. End of input counts as a timeout.
    pub fn spawn<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = channel();

        thread::spawn(move || {
            for line in reader.lines() {
                let Ok(line) = line else {
                    tracing::warn!("failed to read transcript line, closing input");
                    break;
                };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl SpeechSource for StdinTranscriptSource {
    fn next_utterance(&mut self, request: ListenRequest) -> Utterance {
        tracing::debug!(
            max_wait = ?request.max_wait,
            max_phrase = ?request.max_phrase,
            "listening"
        );

        match self.rx.recv_timeout(request.max_wait) {
            Ok(line) => {
                let utterance = parse_line(&line);
                tracing::debug!(?utterance, "recognized");
                utterance
            }
            Err(RecvTimeoutError::Timeout) => Utterance::Timeout,
            Err(RecvTimeoutError::Disconnected) => {
                tracing::debug!("transcript input closed");
                Utterance::Timeout
            }
        }
    }
}
