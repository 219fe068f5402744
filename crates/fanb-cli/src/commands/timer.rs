use std::io::Write;
use std::time::Duration;

use clap::{Args, Subcommand};
use fanb_core::storage::data_dir;
use fanb_core::timer::{IntervalTicker, ManualTicker, TimerConfig, TimerDriver, TimerEngine};
use fanb_core::{Config, Event};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::session::{parse_command, Outcome, Session, HELP};

/// Overrides on top of the `[timer]` config section.
#[derive(Args, Debug, Clone, Default)]
pub struct DurationArgs {
    /// Focus length
    #[arg(long)]
    focus: Option<u64>,
    /// Short break length
    #[arg(long)]
    short: Option<u64>,
    /// Long break length
    #[arg(long)]
    long: Option<u64>,
    /// Focus sessions before a long break
    #[arg(long)]
    sessions: Option<u32>,
    /// Read --focus/--short/--long as seconds instead of minutes
    #[arg(long)]
    seconds: bool,
}

impl DurationArgs {
    fn apply(&self, base: TimerConfig) -> TimerConfig {
        let scale = if self.seconds { 1 } else { 60 };
        let secs = |v: Option<u64>, fallback: u64| v.map_or(fallback, |v| v.saturating_mul(scale));
        TimerConfig {
            focus_duration_secs: secs(self.focus, base.focus_duration_secs),
            short_break_duration_secs: secs(self.short, base.short_break_duration_secs),
            long_break_duration_secs: secs(self.long, base.long_break_duration_secs),
            sessions_before_long_break: self.sessions.unwrap_or(base.sessions_before_long_break),
        }
    }
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Interactive focus session (type 'help' once running)
    Run {
        #[command(flatten)]
        durations: DurationArgs,
        /// Tick period in milliseconds
        #[arg(long, default_value = "1000")]
        tick_ms: u64,
    },
    /// Run N ticks instantly and print the events as JSON
    Simulate {
        #[command(flatten)]
        durations: DurationArgs,
        /// Number of ticks to apply
        #[arg(long)]
        ticks: u64,
        /// Start the next segment automatically after each completion
        #[arg(long)]
        auto_start: bool,
    },
    /// Print the initial timer state as JSON
    Show {
        #[command(flatten)]
        durations: DurationArgs,
    },
}

fn build_engine(config: &Config, durations: &DurationArgs) -> Result<TimerEngine, Box<dyn std::error::Error>> {
    let timer_config = durations.apply(config.timer_config()?);
    Ok(TimerEngine::new(timer_config)?)
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { durations, tick_ms } => {
            // The session saves theme changes back, so a broken file must
            // stop here instead of being replaced by defaults.
            let config = Config::load()?;
            let bell = config.notifications.enabled && config.notifications.bell;
            let engine = build_engine(&config, &durations)?.with_on_segment_complete(move |mode| {
                tracing::debug!(%mode, "completion callback");
                if bell {
                    eprint!("\x07");
                }
            });
            let ticker = IntervalTicker::new(Duration::from_millis(tick_ms.max(1)));
            let config_path = Some(data_dir()?.join("config.toml"));
            let session = Session::new(TimerDriver::new(engine, ticker), config, config_path);

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_interactive(session))?;
        }
        TimerAction::Simulate {
            durations,
            ticks,
            auto_start,
        } => {
            let engine = build_engine(&Config::load_or_default(), &durations)?;
            let runtime = tokio::runtime::Builder::new_current_thread().build()?;
            let events = runtime.block_on(simulate(engine, ticks, auto_start));
            for event in events {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        TimerAction::Show { durations } => {
            let engine = build_engine(&Config::load_or_default(), &durations)?;
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
    }
    Ok(())
}

/// Start, apply `ticks` ticks, and return every event plus a final snapshot.
async fn simulate(engine: TimerEngine, ticks: u64, auto_start: bool) -> Vec<Event> {
    let mut driver = TimerDriver::new(engine, ManualTicker::new());
    let mut events: Vec<Event> = driver.start().into_iter().collect();

    for _ in 0..ticks {
        if let Some(event) = driver.next_event().await {
            events.push(event);
            if auto_start {
                events.extend(driver.start());
            }
        }
    }

    events.push(driver.engine().snapshot());
    events
}

async fn run_interactive(
    mut session: Session<IntervalTicker>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    println!("FANB focus timer [{} theme] -- type 'help' for commands", session.theme());
    println!("{}", session.status());

    loop {
        tokio::select! {
            event = session.driver.next_event() => {
                match event {
                    Some(event) => {
                        print!("\r\x1b[2K");
                        for line in session.on_event(&event) {
                            println!("{line}");
                        }
                    }
                    None => print!("\r\x1b[2K{}", session.status()),
                }
                stdout.flush()?;
            }
            line = stdin.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(command) => match session.apply(command) {
                        Outcome::Lines(lines) => {
                            for line in lines {
                                println!("{line}");
                            }
                        }
                        Outcome::Quit => break,
                    },
                    Err(message) => println!("{message}\n{HELP}"),
                }
            }
        }
    }

    println!();
    Ok(())
}
