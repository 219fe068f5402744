use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Every state change of the timer produces an Event.
/// The host prints them; displays rebuild from `StateSnapshot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        from: Mode,
        to: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A countdown reached zero and the engine moved to the next mode.
    SegmentCompleted {
        previous_mode: Mode,
        next_mode: Mode,
        completed_focus_sessions: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        remaining_secs: u64,
        total_secs: u64,
        running: bool,
        completed_focus_sessions: u32,
        progress: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::TimerStarted { at, .. }
            | Event::TimerPaused { at, .. }
            | Event::TimerReset { at, .. }
            | Event::ModeSwitched { at, .. }
            | Event::SegmentCompleted { at, .. }
            | Event::StateSnapshot { at, .. } => *at,
        }
    }

    pub fn is_completion(&self) -> bool {
        matches!(self, Event::SegmentCompleted { .. })
    }
}
