//! # FANB Core Library
//!
//! Focus, Arrange, Notify, Balance: the business logic behind the `fanb`
//! CLI. Every widget owns its own ephemeral state; nothing here is shared
//! between widgets, and nothing but the configuration file is persisted.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven focus/break state machine. The caller
//!   supplies the clock through a [`TickSource`](timer::TickSource).
//! - **Widgets**: task list, notification feed and balance tracker, all
//!   plain in-memory collections.
//! - **Storage**: TOML configuration holding timer durations and the theme flag.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`TimerDriver`]: Engine plus tick source
//! - [`Config`]: Application configuration management

pub mod balance;
pub mod error;
pub mod events;
pub mod notify;
pub mod storage;
pub mod tasks;
pub mod theme;
pub mod timer;

pub use balance::{BalanceTracker, Period, Rating};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use notify::{Notification, NotificationFeed, NotificationKind};
pub use storage::Config;
pub use tasks::{Priority, Task, TaskList};
pub use theme::Theme;
pub use timer::{Mode, TimerConfig, TimerDriver, TimerEngine, TimerState};
