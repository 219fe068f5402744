//! Couples an engine with a tick source.
//!
//! The driver is the only place that starts and stops the source, so the
//! source is active exactly while the engine is running.

use super::engine::TimerEngine;
use super::schedule::Mode;
use super::ticker::TickSource;
use crate::events::Event;

#[derive(Debug)]
pub struct TimerDriver<S> {
    engine: TimerEngine,
    source: S,
}

impl<S: TickSource> TimerDriver<S> {
    pub fn new(engine: TimerEngine, source: S) -> Self {
        Self { engine, source }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_parts(self) -> (TimerEngine, S) {
        (self.engine, self.source)
    }

    pub fn start(&mut self) -> Option<Event> {
        let event = self.engine.start();
        if self.engine.is_running() {
            self.source.start();
        }
        event
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.source.stop();
        self.engine.pause()
    }

    /// Start when paused, pause when running.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.engine.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Event {
        self.source.stop();
        self.engine.reset()
    }

    pub fn switch_mode(&mut self, target: Mode) -> Event {
        self.source.stop();
        self.engine.switch_mode(target)
    }

    /// Wait for one tick and apply it. Returns the completion event, if any.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.source.next_tick().await;
        let event = self.engine.tick();
        if !self.engine.is_running() {
            self.source.stop();
        }
        event
    }

    /// Tick until the current segment completes or the engine stops.
    pub async fn run_segment(&mut self) -> Option<Event> {
        while self.engine.is_running() {
            if let Some(event) = self.next_event().await {
                return Some(event);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{ManualTicker, TimerConfig};

    fn driver(focus: u64) -> TimerDriver<ManualTicker> {
        let engine = TimerEngine::new(TimerConfig::new(focus).with_short_break(2)).unwrap();
        TimerDriver::new(engine, ManualTicker::new())
    }

    #[tokio::test]
    async fn run_segment_completes_focus() {
        let mut driver = driver(5);
        driver.start();
        assert!(driver.source().is_active());

        let event = driver.run_segment().await;
        assert!(matches!(
            event,
            Some(Event::SegmentCompleted { previous_mode: Mode::Focus, .. })
        ));
        assert_eq!(driver.source().ticks(), 5);
        assert!(!driver.source().is_active());
        assert_eq!(driver.engine().mode(), Mode::ShortBreak);
    }

    #[tokio::test]
    async fn run_segment_returns_none_when_not_started() {
        let mut driver = driver(5);
        assert!(driver.run_segment().await.is_none());
        assert_eq!(driver.source().ticks(), 0);
    }

    #[tokio::test]
    async fn pause_stops_source() {
        let mut driver = driver(5);
        driver.start();
        driver.next_event().await;
        driver.pause();
        assert!(!driver.source().is_active());
        assert_eq!(driver.engine().remaining_secs(), 4);

        // A stray tick while paused changes nothing.
        driver.next_event().await;
        assert_eq!(driver.engine().remaining_secs(), 4);
    }

    #[tokio::test]
    async fn toggle_flips_running() {
        let mut driver = driver(5);
        driver.toggle();
        assert!(driver.engine().is_running());
        driver.toggle();
        assert!(!driver.engine().is_running());
    }

    #[tokio::test]
    async fn switch_mode_and_reset_stop_source() {
        let mut driver = driver(5);
        driver.start();
        driver.switch_mode(Mode::LongBreak);
        assert!(!driver.source().is_active());
        driver.start();
        driver.reset();
        assert!(!driver.source().is_active());
        assert_eq!(driver.engine().mode(), Mode::LongBreak);
    }
}
