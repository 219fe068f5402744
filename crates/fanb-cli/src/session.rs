//! Interactive host shell.
//!
//! Owns one timer driver and the three widgets, turns typed lines into
//! commands, and wires segment completions into the notification feed and
//! the balance tracker.

use std::path::PathBuf;

use fanb_core::balance::{self, format_minutes, Period};
use fanb_core::timer::display::{format_clock, status_line, toggle_label};
use fanb_core::timer::{Mode, TickSource, TimerDriver};
use fanb_core::{
    BalanceTracker, Config, Event, Notification, NotificationFeed, Priority, TaskList, Theme,
};

pub const HELP: &str = "\
commands:
  start | pause | toggle | reset      timer controls (s, p, t, r)
  focus | short | long                switch mode
  status                              show the timer
  task add [low|medium|high] TEXT     add a task
  task done N | task rm N             toggle / remove task N
  tasks                               list tasks
  notes | read N | read all           notifications
  dismiss N                           remove notification N
  balance                             time balance
  period day|week|month               balance period
  theme                               toggle light/dark
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Toggle,
    Reset,
    Switch(Mode),
    Status,
    TaskAdd { priority: Priority, text: String },
    TaskDone(usize),
    TaskRemove(usize),
    Tasks,
    Notes,
    /// `None` marks everything read.
    Read(Option<usize>),
    Dismiss(usize),
    Balance,
    Period(Period),
    Theme,
    Help,
    Quit,
}

pub enum Outcome {
    Lines(Vec<String>),
    Quit,
}

fn parse_position(arg: Option<&str>, what: &str) -> Result<usize, String> {
    let raw = arg.ok_or_else(|| format!("{what} needs a number"))?;
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("'{raw}' is not a {what} number")),
    }
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Command::Status);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "start" | "s" => Command::Start,
        "pause" | "p" => Command::Pause,
        "toggle" | "t" => Command::Toggle,
        "reset" | "r" => Command::Reset,
        "focus" => Command::Switch(Mode::Focus),
        "short" => Command::Switch(Mode::ShortBreak),
        "long" => Command::Switch(Mode::LongBreak),
        "status" | "st" => Command::Status,
        "tasks" => Command::Tasks,
        "notes" => Command::Notes,
        "balance" => Command::Balance,
        "theme" => Command::Theme,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        "period" => {
            let raw = words.next().ok_or("period needs day, week or month")?;
            Command::Period(raw.parse().map_err(|e: fanb_core::ValidationError| e.to_string())?)
        }
        "dismiss" => Command::Dismiss(parse_position(words.next(), "notification")?),
        "read" => match words.next() {
            Some("all") => Command::Read(None),
            other => Command::Read(Some(parse_position(other, "notification")?)),
        },
        "task" => match words.next() {
            Some("add") => {
                let rest: Vec<&str> = words.collect();
                let (priority, text) = match rest.split_first() {
                    Some((first, tail)) if !tail.is_empty() => match first.parse::<Priority>() {
                        Ok(priority) => (priority, tail.join(" ")),
                        Err(_) => (Priority::default(), rest.join(" ")),
                    },
                    _ => (Priority::default(), rest.join(" ")),
                };
                Command::TaskAdd { priority, text }
            }
            Some("done") => Command::TaskDone(parse_position(words.next(), "task")?),
            Some("rm") => Command::TaskRemove(parse_position(words.next(), "task")?),
            _ => return Err("usage: task add|done|rm ...".to_string()),
        },
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(command)
}

pub struct Session<S> {
    pub driver: TimerDriver<S>,
    tasks: TaskList,
    feed: NotificationFeed,
    balance: BalanceTracker,
    config: Config,
    config_path: Option<PathBuf>,
}

impl<S: TickSource> Session<S> {
    /// `config_path` is where theme changes are saved; `None` keeps them
    /// in memory.
    pub fn new(driver: TimerDriver<S>, config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            driver,
            tasks: TaskList::new(),
            feed: NotificationFeed::new(),
            balance: BalanceTracker::with_default_categories(),
            config,
            config_path,
        }
    }

    pub fn theme(&self) -> Theme {
        self.config.theme()
    }

    pub fn status(&self) -> String {
        let engine = self.driver.engine();
        format!("{}  ({})", status_line(engine), toggle_label(engine))
    }

    /// React to an engine event. Returns lines to print.
    pub fn on_event(&mut self, event: &Event) -> Vec<String> {
        let (previous_mode, next_mode) = match event {
            Event::SegmentCompleted {
                previous_mode,
                next_mode,
                ..
            } => (*previous_mode, *next_mode),
            _ => return Vec::new(),
        };

        let secs = self.driver.engine().duration_for(previous_mode);
        let category = if previous_mode.is_break() {
            balance::REST
        } else {
            balance::WORK
        };
        self.balance.add_minutes(category, secs.div_ceil(60));

        let mut lines = Vec::new();
        if self.config.notifications.enabled {
            let notice = Notification::for_segment(previous_mode, next_mode);
            lines.push(format!(
                "[{}] {} {}: {}",
                event.at().format("%H:%M"),
                notice.kind.icon(),
                notice.title,
                notice.message
            ));
            self.feed.push(notice);
        }
        lines.push(self.status());
        lines
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        let mut lines = Vec::new();
        match command {
            Command::Start => {
                self.driver.start();
                lines.push(self.status());
            }
            Command::Pause => {
                self.driver.pause();
                lines.push(self.status());
            }
            Command::Toggle => {
                self.driver.toggle();
                lines.push(self.status());
            }
            Command::Reset => {
                self.driver.reset();
                lines.push(self.status());
            }
            Command::Switch(mode) => {
                self.driver.switch_mode(mode);
                lines.push(self.status());
            }
            Command::Status => lines.push(self.status()),
            Command::TaskAdd { priority, text } => match self.tasks.add(&text, priority) {
                Ok(task) => lines.push(format!("added [{}] {}", task.priority, task.text)),
                Err(e) => lines.push(format!("error: {e}")),
            },
            Command::TaskDone(n) => match self.tasks.nth(n).map(|t| t.id) {
                Some(id) => match self.tasks.toggle(id) {
                    Ok(true) => lines.push(format!("task {n} done")),
                    Ok(false) => lines.push(format!("task {n} reopened")),
                    Err(e) => lines.push(format!("error: {e}")),
                },
                None => lines.push(format!("no task {n}")),
            },
            Command::TaskRemove(n) => match self.tasks.nth(n).map(|t| t.id) {
                Some(id) => match self.tasks.remove(id) {
                    Ok(task) => lines.push(format!("removed {}", task.text)),
                    Err(e) => lines.push(format!("error: {e}")),
                },
                None => lines.push(format!("no task {n}")),
            },
            Command::Tasks => lines.extend(self.render_tasks()),
            Command::Notes => lines.extend(self.render_notes()),
            Command::Read(None) => {
                self.feed.mark_all_read();
                lines.push(self.feed.summary());
            }
            Command::Read(Some(n)) => match self.feed.nth(n).map(|item| item.id) {
                Some(id) => {
                    if let Err(e) = self.feed.mark_read(id) {
                        lines.push(format!("error: {e}"));
                    }
                    lines.push(self.feed.summary());
                }
                None => lines.push(format!("no notification {n}")),
            },
            Command::Dismiss(n) => match self.feed.nth(n).map(|item| item.id) {
                Some(id) => {
                    if let Err(e) = self.feed.remove(id) {
                        lines.push(format!("error: {e}"));
                    }
                    lines.push(self.feed.summary());
                }
                None => lines.push(format!("no notification {n}")),
            },
            Command::Balance => lines.extend(self.render_balance()),
            Command::Period(period) => {
                self.balance.set_period(period);
                lines.extend(self.render_balance());
            }
            Command::Theme => {
                let theme = self.config.theme().toggle();
                self.config.set_theme(theme);
                if let Some(path) = &self.config_path {
                    if let Err(e) = self.config.save_to(path) {
                        lines.push(format!("error: {e}"));
                    }
                }
                lines.push(format!("theme: {theme}"));
            }
            Command::Help => lines.push(HELP.to_string()),
            Command::Quit => return Outcome::Quit,
        }
        Outcome::Lines(lines)
    }

    fn render_tasks(&self) -> Vec<String> {
        if self.tasks.is_empty() {
            return vec!["no tasks".to_string()];
        }
        let mut lines: Vec<String> = self
            .tasks
            .tasks()
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let mark = if t.completed { "x" } else { " " };
                format!("{:>2}. [{mark}] {:<6} {}", i + 1, t.priority, t.text)
            })
            .collect();
        lines.push(format!(
            "{} pending, {} done",
            self.tasks.pending_count(),
            self.tasks.completed_count()
        ));
        lines
    }

    fn render_notes(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .feed
            .items()
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let unread = if n.read { " " } else { "*" };
                format!(
                    "{:>2}.{unread} {} {} -- {} ({})",
                    i + 1,
                    n.kind.icon(),
                    n.title,
                    n.message,
                    n.created_at.format("%H:%M")
                )
            })
            .collect();
        lines.push(self.feed.summary());
        lines
    }

    fn render_balance(&self) -> Vec<String> {
        let mut lines = vec![format!("{} balance", self.balance.period())];
        for (category, (_, pct)) in self
            .balance
            .categories()
            .iter()
            .zip(self.balance.percentages())
        {
            lines.push(format!(
                "  {} {:<8} {:>3}%  {}",
                swatch(&category.color),
                category.name,
                pct,
                format_minutes(category.minutes)
            ));
        }
        match (self.balance.balance_score(), self.balance.rating()) {
            (Some(score), Some(rating)) => {
                lines.push(format!("score: {score:.0} ({rating:?})"));
            }
            _ => lines.push(format!(
                "nothing tracked yet, finish a {} segment",
                format_clock(self.driver.engine().duration_for(Mode::Focus))
            )),
        }
        lines
    }
}

/// A block in the category colour, plain when the colour is not `#rrggbb`.
fn swatch(color: &str) -> String {
    let rgb = color
        .strip_prefix('#')
        .filter(|hex| hex.len() == 6)
        .and_then(|hex| u32::from_str_radix(hex, 16).ok());
    match rgb {
        Some(rgb) => format!(
            "\x1b[38;2;{};{};{}m■\x1b[0m",
            rgb >> 16,
            (rgb >> 8) & 0xff,
            rgb & 0xff
        ),
        None => "■".to_string(),
    }
}
