use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Segment type the engine is counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Focus, Mode::ShortBreak, Mode::LongBreak];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, Mode::Focus)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "focus" => Ok(Mode::Focus),
            "short" | "short_break" => Ok(Mode::ShortBreak),
            "long" | "long_break" => Ok(Mode::LongBreak),
            other => Err(ConfigError::invalid(
                "mode",
                format!("expected focus, short or long, got '{other}'"),
            )),
        }
    }
}

pub const DEFAULT_FOCUS_SECS: u64 = 25 * 60;
pub const DEFAULT_SHORT_BREAK_SECS: u64 = 5 * 60;
pub const DEFAULT_LONG_BREAK_SECS: u64 = 15 * 60;
pub const DEFAULT_SESSIONS_BEFORE_LONG_BREAK: u32 = 4;

/// Segment durations and the long-break cadence.
///
/// Immutable once handed to an engine. Build one with [`TimerConfig::new`]
/// and the `with_*` setters, then [`validate`](TimerConfig::validate) (the
/// engine constructor does this for you).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub focus_duration_secs: u64,
    #[serde(default = "default_short_break")]
    pub short_break_duration_secs: u64,
    #[serde(default = "default_long_break")]
    pub long_break_duration_secs: u64,
    #[serde(default = "default_sessions_before_long_break")]
    pub sessions_before_long_break: u32,
}

fn default_short_break() -> u64 {
    DEFAULT_SHORT_BREAK_SECS
}
fn default_long_break() -> u64 {
    DEFAULT_LONG_BREAK_SECS
}
fn default_sessions_before_long_break() -> u32 {
    DEFAULT_SESSIONS_BEFORE_LONG_BREAK
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_SECS)
    }
}

impl TimerConfig {
    /// Config with the given focus length and default breaks.
    pub fn new(focus_duration_secs: u64) -> Self {
        Self {
            focus_duration_secs,
            short_break_duration_secs: DEFAULT_SHORT_BREAK_SECS,
            long_break_duration_secs: DEFAULT_LONG_BREAK_SECS,
            sessions_before_long_break: DEFAULT_SESSIONS_BEFORE_LONG_BREAK,
        }
    }

    pub fn with_short_break(mut self, secs: u64) -> Self {
        self.short_break_duration_secs = secs;
        self
    }

    pub fn with_long_break(mut self, secs: u64) -> Self {
        self.long_break_duration_secs = secs;
        self
    }

    pub fn with_sessions_before_long_break(mut self, sessions: u32) -> Self {
        self.sessions_before_long_break = sessions;
        self
    }

    /// Duration of a segment in seconds.
    pub fn duration_for(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Focus => self.focus_duration_secs,
            Mode::ShortBreak => self.short_break_duration_secs,
            Mode::LongBreak => self.long_break_duration_secs,
        }
    }

    /// Reject zero durations and a zero long-break cadence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("focus_duration_secs", self.focus_duration_secs),
            ("short_break_duration_secs", self.short_break_duration_secs),
            ("long_break_duration_secs", self.long_break_duration_secs),
        ];
        for (key, secs) in durations {
            if secs == 0 {
                return Err(ConfigError::invalid(key, "duration must be greater than zero"));
            }
        }
        if self.sessions_before_long_break == 0 {
            return Err(ConfigError::invalid(
                "sessions_before_long_break",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Break that follows the `completed`-th focus session.
    pub fn break_after(&self, completed: u32) -> Mode {
        if self.sessions_before_long_break > 0 && completed % self.sessions_before_long_break == 0 {
            Mode::LongBreak
        } else {
            Mode::ShortBreak
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_pomodoro() {
        let cfg = TimerConfig::default();
        assert_eq!(cfg.duration_for(Mode::Focus), 1500);
        assert_eq!(cfg.duration_for(Mode::ShortBreak), 300);
        assert_eq!(cfg.duration_for(Mode::LongBreak), 900);
        assert_eq!(cfg.sessions_before_long_break, 4);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_durations() {
        let err = TimerConfig::new(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "focus_duration_secs"));

        let err = TimerConfig::new(60).with_short_break(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "short_break_duration_secs"));

        let err = TimerConfig::new(60).with_long_break(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "long_break_duration_secs"));

        let err = TimerConfig::new(60)
            .with_sessions_before_long_break(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "sessions_before_long_break"));
    }

    #[test]
    fn break_after_follows_cadence() {
        let cfg = TimerConfig::default();
        let breaks: Vec<Mode> = (1..=8).map(|n| cfg.break_after(n)).collect();
        assert_eq!(
            breaks,
            vec![
                Mode::ShortBreak,
                Mode::ShortBreak,
                Mode::ShortBreak,
                Mode::LongBreak,
                Mode::ShortBreak,
                Mode::ShortBreak,
                Mode::ShortBreak,
                Mode::LongBreak,
            ]
        );
    }

    #[test]
    fn cadence_of_one_always_long() {
        let cfg = TimerConfig::new(60).with_sessions_before_long_break(1);
        assert_eq!(cfg.break_after(1), Mode::LongBreak);
        assert_eq!(cfg.break_after(2), Mode::LongBreak);
    }

    #[test]
    fn mode_parses_aliases() {
        assert_eq!("focus".parse::<Mode>().unwrap(), Mode::Focus);
        assert_eq!("Short".parse::<Mode>().unwrap(), Mode::ShortBreak);
        assert_eq!("long-break".parse::<Mode>().unwrap(), Mode::LongBreak);
        assert!("nap".parse::<Mode>().is_err());
    }

    #[test]
    fn partial_config_uses_default_breaks() {
        let cfg: TimerConfig = serde_json::from_str(r#"{"focus_duration_secs": 600}"#).unwrap();
        assert_eq!(cfg.short_break_duration_secs, 300);
        assert_eq!(cfg.long_break_duration_secs, 900);
        assert_eq!(cfg.sessions_before_long_break, 4);
    }
}
