//! Timer engine implementation.
//!
//! The engine is a tick-driven state machine. It owns no clock and no
//! thread: a host (or [`TimerDriver`](super::TimerDriver)) calls `tick()`
//! once per second while the timer is running.
//!
//! ## Mode Cycle
//!
//! ```text
//! Focus -> ShortBreak -> Focus -> ... -> Focus -> LongBreak -> Focus
//!                                  (every Nth completed focus session)
//! ```
//!
//! ## Usage
//!
//! ```
//! use fanb_core::timer::{Mode, TimerConfig, TimerEngine};
//!
//! let mut engine = TimerEngine::new(TimerConfig::new(3)).unwrap();
//! engine.start();
//! for _ in 0..3 {
//!     engine.tick();
//! }
//! assert_eq!(engine.mode(), Mode::ShortBreak);
//! ```

use chrono::Utc;

use super::schedule::{Mode, TimerConfig};
use crate::error::Result;
use crate::events::Event;

/// Callback fired synchronously when a segment completes, with the mode
/// that just finished.
pub type SegmentCallback = Box<dyn FnMut(Mode) + Send + 'static>;

/// Mutable countdown state, owned by exactly one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub mode: Mode,
    pub remaining_secs: u64,
    pub running: bool,
    pub completed_focus_sessions: u32,
}

/// Core timer engine.
pub struct TimerEngine {
    config: TimerConfig,
    state: TimerState,
    on_segment_complete: Option<SegmentCallback>,
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("on_segment_complete", &self.on_segment_complete.is_some())
            .finish()
    }
}

impl TimerEngine {
    /// Create an engine in `Focus`, stopped, with a full focus countdown.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any duration or the long-break
    /// cadence is zero.
    pub fn new(config: TimerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: TimerState {
                mode: Mode::Focus,
                remaining_secs: config.focus_duration_secs,
                running: false,
                completed_focus_sessions: 0,
            },
            config,
            on_segment_complete: None,
        })
    }

    /// Register the completion callback.
    pub fn with_on_segment_complete<F>(mut self, callback: F) -> Self
    where
        F: FnMut(Mode) + Send + 'static,
    {
        self.on_segment_complete = Some(Box::new(callback));
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.state.remaining_secs
    }

    /// Remaining time split for a `mm:ss` display.
    pub fn minutes_seconds(&self) -> (u64, u64) {
        (self.state.remaining_secs / 60, self.state.remaining_secs % 60)
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn completed_focus_sessions(&self) -> u32 {
        self.state.completed_focus_sessions
    }

    pub fn duration_for(&self, mode: Mode) -> u64 {
        self.config.duration_for(mode)
    }

    pub fn total_secs(&self) -> u64 {
        self.duration_for(self.state.mode)
    }

    /// 0.0 .. 1.0 progress within the current segment.
    pub fn progress_fraction(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.state.remaining_secs);
        (elapsed as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.state.mode,
            remaining_secs: self.state.remaining_secs,
            total_secs: self.total_secs(),
            running: self.state.running,
            completed_focus_sessions: self.state.completed_focus_sessions,
            progress: self.progress_fraction(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Returns `None` when already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.state.running {
            return None;
        }
        self.state.running = true;
        tracing::debug!(mode = %self.state.mode, remaining = self.state.remaining_secs, "timer started");
        Some(Event::TimerStarted {
            mode: self.state.mode,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Returns `None` when already paused.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.running = false;
        tracing::debug!(mode = %self.state.mode, remaining = self.state.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            mode: self.state.mode,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and refill the current segment. Mode and session count are kept.
    pub fn reset(&mut self) -> Event {
        self.state.running = false;
        self.state.remaining_secs = self.total_secs();
        tracing::debug!(mode = %self.state.mode, "timer reset");
        Event::TimerReset {
            mode: self.state.mode,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Manual override. Does not touch the session count.
    pub fn switch_mode(&mut self, target: Mode) -> Event {
        let from = self.state.mode;
        self.state.running = false;
        self.state.mode = target;
        self.state.remaining_secs = self.duration_for(target);
        tracing::debug!(%from, to = %target, "mode switched");
        Event::ModeSwitched {
            from,
            to: target,
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        }
    }

    /// Advance one second. Returns `Some(Event::SegmentCompleted)` when the
    /// countdown hits zero; the next mode is loaded and the timer stops.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        if self.state.remaining_secs == 0 {
            return Some(self.complete_segment());
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_segment(&mut self) -> Event {
        let previous_mode = self.state.mode;
        let next_mode = match previous_mode {
            Mode::Focus => {
                self.state.completed_focus_sessions += 1;
                self.config.break_after(self.state.completed_focus_sessions)
            }
            Mode::ShortBreak | Mode::LongBreak => Mode::Focus,
        };

        self.state.mode = next_mode;
        self.state.remaining_secs = self.duration_for(next_mode);
        self.state.running = false;

        tracing::info!(
            previous = %previous_mode,
            next = %next_mode,
            sessions = self.state.completed_focus_sessions,
            "segment completed"
        );

        if let Some(callback) = self.on_segment_complete.as_mut() {
            callback(previous_mode);
        }

        Event::SegmentCompleted {
            previous_mode,
            next_mode,
            completed_focus_sessions: self.state.completed_focus_sessions,
            at: Utc::now(),
        }
    }
}
