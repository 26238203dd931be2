//! Plain-text prompt rendering.

use reciflow_core::{Prompt, PromptDisplay};
use std::io::Write;

const MARK_NEXT: &str = ">>";
const MARK_RETRY: &str = "!!";
const MARK_UNRESOLVED: &str = " ?";
const MARK_NONE: &str = "  ";

/// Writes the current unit to a terminal, marking the expected passage.
pub struct TerminalPrompt<W: Write> {
    out: W,
}

impl<W: Write> TerminalPrompt<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_prompt(&mut self, prompt: &Prompt<'_>) -> std::io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "== Chapter {} ==", prompt.unit_id)?;

        for passage in prompt.passages {
            let marker = if passage.sequence == prompt.highlight_seq {
                if prompt.mismatch_count > 0 {
                    MARK_RETRY
                } else {
                    MARK_NEXT
                }
            } else if prompt.unresolved.contains(&passage.sequence) {
                MARK_UNRESOLVED
            } else {
                MARK_NONE
            };
            writeln!(
                self.out,
                "{} {}, {}: {}",
                marker, passage.unit_id, passage.sequence, passage.text
            )?;
        }

        self.out.flush()
    }
}

impl<W: Write> PromptDisplay for TerminalPrompt<W> {
    fn render(&mut self, prompt: &Prompt<'_>) {
        if let Err(e) = self.write_prompt(prompt) {
            tracing::warn!(error = %e, "failed to render prompt");
        }
    }
}
