mod driver;
pub mod display;
mod engine;
mod schedule;
mod ticker;

pub use driver::TimerDriver;
pub use engine::{SegmentCallback, TimerEngine, TimerState};
pub use schedule::{
    Mode, TimerConfig, DEFAULT_FOCUS_SECS, DEFAULT_LONG_BREAK_SECS, DEFAULT_SESSIONS_BEFORE_LONG_BREAK,
    DEFAULT_SHORT_BREAK_SECS,
};
pub use ticker::{IntervalTicker, ManualTicker, TickSource};
