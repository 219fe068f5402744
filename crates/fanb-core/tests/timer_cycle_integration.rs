//! Integration tests for the focus/break cycle.
//!
//! These drive a full engine through realistic sequences: long-break
//! cadence, the classic 25/5/15 configuration, manual overrides, and the
//! async driver with a manual tick source.

use std::sync::{Arc, Mutex};

use fanb_core::timer::{ManualTicker, Mode, TimerConfig, TimerDriver, TimerEngine};
use fanb_core::{ConfigError, CoreError, Event};

fn classic() -> TimerConfig {
    TimerConfig::new(1500)
        .with_short_break(300)
        .with_long_break(900)
        .with_sessions_before_long_break(4)
}

/// Start the engine and tick until the segment completes.
fn complete_segment(engine: &mut TimerEngine) -> (Mode, Mode) {
    engine.start();
    loop {
        if let Some(Event::SegmentCompleted {
            previous_mode,
            next_mode,
            ..
        }) = engine.tick()
        {
            return (previous_mode, next_mode);
        }
    }
}

#[test]
fn test_fourth_focus_earns_long_break() {
    let mut engine = TimerEngine::new(TimerConfig::new(3).with_short_break(1).with_long_break(2)).unwrap();
    let mut breaks = Vec::new();

    for _ in 0..4 {
        let (finished, next) = complete_segment(&mut engine);
        assert_eq!(finished, Mode::Focus);
        breaks.push(next);

        let (finished, next) = complete_segment(&mut engine);
        assert_eq!(Some(&finished), breaks.last());
        assert_eq!(next, Mode::Focus);
    }

    assert_eq!(
        breaks,
        vec![Mode::ShortBreak, Mode::ShortBreak, Mode::ShortBreak, Mode::LongBreak]
    );
    assert_eq!(engine.completed_focus_sessions(), 4);
}

#[test]
fn test_classic_focus_segment_after_1500_ticks() {
    let fired = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&fired);
    let mut engine = TimerEngine::new(classic())
        .unwrap()
        .with_on_segment_complete(move |mode| sink.lock().unwrap().push(mode));

    engine.start();
    let mut completions = 0;
    for _ in 0..1500 {
        if engine.tick().is_some() {
            completions += 1;
        }
    }

    assert_eq!(completions, 1);
    assert_eq!(*fired.lock().unwrap(), vec![Mode::Focus]);
    assert_eq!(engine.mode(), Mode::ShortBreak);
    assert_eq!(engine.remaining_secs(), 300);
    assert_eq!(engine.completed_focus_sessions(), 1);
    assert!(!engine.is_running());
}

#[test]
fn test_one_tick_short_of_completion() {
    let mut engine = TimerEngine::new(classic()).unwrap();
    engine.start();
    for _ in 0..1499 {
        assert!(engine.tick().is_none());
    }
    assert_eq!(engine.mode(), Mode::Focus);
    assert_eq!(engine.remaining_secs(), 1);
    assert!(engine.progress_fraction() < 1.0);
}

#[test]
fn test_manual_switch_to_long_break() {
    let mut engine = TimerEngine::new(classic()).unwrap();
    engine.switch_mode(Mode::LongBreak);
    assert_eq!(engine.mode(), Mode::LongBreak);
    assert_eq!(engine.remaining_secs(), 900);
    assert!(!engine.is_running());
    assert_eq!(engine.completed_focus_sessions(), 0);
}

#[test]
fn test_counter_survives_switch_and_reset() {
    let mut engine = TimerEngine::new(TimerConfig::new(2).with_short_break(1)).unwrap();
    complete_segment(&mut engine);
    engine.switch_mode(Mode::Focus);
    engine.reset();
    engine.switch_mode(Mode::LongBreak);
    assert_eq!(engine.completed_focus_sessions(), 1);

    // A completed long break reached by override still returns to focus
    // without counting.
    complete_segment(&mut engine);
    assert_eq!(engine.mode(), Mode::Focus);
    assert_eq!(engine.completed_focus_sessions(), 1);
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = TimerEngine::new(classic().with_sessions_before_long_break(0)).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Config(ConfigError::InvalidValue { ref key, .. }) if key == "sessions_before_long_break"
    ));
}

#[tokio::test]
async fn test_driver_runs_full_cycle() {
    let engine = TimerEngine::new(TimerConfig::new(4).with_short_break(2)).unwrap();
    let mut driver = TimerDriver::new(engine, ManualTicker::new());

    driver.start();
    let focus_done = driver.run_segment().await;
    assert!(matches!(
        focus_done,
        Some(Event::SegmentCompleted { previous_mode: Mode::Focus, next_mode: Mode::ShortBreak, .. })
    ));

    driver.start();
    let break_done = driver.run_segment().await;
    assert!(matches!(
        break_done,
        Some(Event::SegmentCompleted { previous_mode: Mode::ShortBreak, next_mode: Mode::Focus, .. })
    ));

    let (engine, ticker) = driver.into_parts();
    assert_eq!(ticker.ticks(), 6);
    assert_eq!(engine.completed_focus_sessions(), 1);
}
