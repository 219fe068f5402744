//! Timing sources for the engine.
//!
//! The engine never owns a clock. A [`TickSource`] is started and stopped by
//! whoever drives the engine and yields one tick per period while active.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Something that can be awaited for the next one-second tick.
pub trait TickSource {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_active(&self) -> bool;
    /// Resolves at the next tick. A stopped wall-clock source never resolves.
    fn next_tick(&mut self) -> impl Future<Output = ()> + Send;
}

/// Wall-clock ticks backed by `tokio::time::interval`.
///
/// `start` must be called from inside a tokio runtime.
#[derive(Debug)]
pub struct IntervalTicker {
    period: Duration,
    interval: Option<Interval>,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl TickSource for IntervalTicker {
    fn start(&mut self) {
        if self.interval.is_some() {
            return;
        }
        // First tick lands one full period after start, not immediately.
        let mut interval = tokio::time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn stop(&mut self) {
        self.interval = None;
    }

    fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    async fn next_tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

/// Ticks that resolve immediately. Deterministic runs and tests.
#[derive(Debug, Default, Clone)]
pub struct ManualTicker {
    active: bool,
    ticks: u64,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks handed out so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl TickSource for ManualTicker {
    fn start(&mut self) {
        self.active = true;
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    async fn next_tick(&mut self) {
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn manual_ticker_counts_ticks() {
        let mut ticker = ManualTicker::new();
        ticker.start();
        ticker.next_tick().await;
        ticker.next_tick().await;
        assert_eq!(ticker.ticks(), 2);
        assert!(ticker.is_active());
        ticker.stop();
        assert!(!ticker.is_active());
    }

    #[tokio::test]
    async fn interval_ticker_yields_after_period() {
        let mut ticker = IntervalTicker::new(Duration::from_millis(5));
        assert!(!ticker.is_active());
        ticker.start();
        assert!(ticker.is_active());
        let started = Instant::now();
        ticker.next_tick().await;
        assert!(started.elapsed() >= Duration::from_millis(4));
    }

    #[tokio::test]
    async fn stopped_interval_ticker_never_resolves() {
        let mut ticker = IntervalTicker::new(Duration::from_millis(1));
        let result = tokio::time::timeout(Duration::from_millis(20), ticker.next_tick()).await;
        assert!(result.is_err());
    }
}
