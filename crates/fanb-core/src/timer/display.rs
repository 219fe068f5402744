//! Text rendering of timer state.

use super::engine::TimerEngine;

/// `mm:ss`, minutes keep growing past 99.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Fixed-width bar, `fraction` clamped to 0..=1.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    let filled = (fraction * width as f64).round() as usize;
    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat('█').take(filled));
    bar.extend(std::iter::repeat('░').take(width - filled));
    bar
}

/// One status line for the terminal.
pub fn status_line(engine: &TimerEngine) -> String {
    let progress = engine.progress_fraction();
    format!(
        "{:<11} {}  [{}] {:>3}%  sessions: {}  {}",
        engine.mode().label(),
        format_clock(engine.remaining_secs()),
        progress_bar(progress, 20),
        (progress * 100.0).round() as u32,
        engine.completed_focus_sessions(),
        if engine.is_running() { "running" } else { "paused" },
    )
}

/// Label for the start/pause control.
pub fn toggle_label(engine: &TimerEngine) -> &'static str {
    if engine.is_running() {
        "Pause"
    } else {
        "Start"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerConfig;

    #[test]
    fn format_clock_pads() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[test]
    fn progress_bar_bounds() {
        assert_eq!(progress_bar(0.0, 4), "░░░░");
        assert_eq!(progress_bar(0.5, 4), "██░░");
        assert_eq!(progress_bar(1.0, 4), "████");
        assert_eq!(progress_bar(7.0, 4), "████");
        assert_eq!(progress_bar(f64::NAN, 2), "░░");
    }

    #[test]
    fn status_line_reflects_engine() {
        let mut engine = TimerEngine::new(TimerConfig::new(100)).unwrap();
        assert_eq!(toggle_label(&engine), "Start");
        engine.start();
        for _ in 0..50 {
            engine.tick();
        }
        let line = status_line(&engine);
        assert!(line.starts_with("Focus"));
        assert!(line.contains("00:50"));
        assert!(line.contains(" 50%"));
        assert!(line.ends_with("running"));
        assert_eq!(toggle_label(&engine), "Pause");
    }
}
