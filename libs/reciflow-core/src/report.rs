//! Summary of what happened during a session run.

use crate::session::SessionEvent;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    pub repetitions_completed: u32,
    pub passages_confirmed: u32,
    pub forced_advances: u32,
    pub mismatches: u32,
    pub transitions: u32,
    pub timeouts: u32,
}

impl SessionReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            finished_at: None,
            repetitions_completed: 0,
            passages_confirmed: 0,
            forced_advances: 0,
            mismatches: 0,
            transitions: 0,
            timeouts: 0,
        }
    }

    /// Fold one session event into the counters.
    pub fn record(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Started { .. } | SessionEvent::Advanced { .. } => {
                self.passages_confirmed += 1;
            }
            SessionEvent::AdvancedWithUnresolvedMismatch { .. } => self.forced_advances += 1,
            SessionEvent::Mismatch { .. } => self.mismatches += 1,
            SessionEvent::TransitionDetected { .. } => self.transitions += 1,
            SessionEvent::UnitCompleted { .. } => self.repetitions_completed += 1,
            SessionEvent::ListeningTimedOut => self.timeouts += 1,
            _ => {}
        }
    }

    pub fn finish(&mut self, at: DateTime<Utc>) {
        self.finished_at = Some(at);
    }
}
