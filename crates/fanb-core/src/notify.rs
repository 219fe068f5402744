//! Notify: an in-memory notification feed, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::timer::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Reminder,
}

impl NotificationKind {
    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::Info => "i",
            NotificationKind::Success => "✓",
            NotificationKind::Warning => "!",
            NotificationKind::Reminder => "⏰",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
            created_at: Utc::now(),
            read: false,
            kind,
        }
    }

    /// Notice shown when a timer segment finishes.
    pub fn for_segment(finished: Mode, next: Mode) -> Self {
        let title = match finished {
            Mode::Focus => "Focus session complete",
            Mode::ShortBreak | Mode::LongBreak => "Break over",
        };
        Self::new(
            NotificationKind::Reminder,
            title,
            format!("{finished} finished, {next} is up next"),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationFeed {
    items: Vec<Notification>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) -> Uuid {
        let id = notification.id;
        self.items.insert(0, notification);
        id
    }

    pub fn mark_read(&mut self, id: Uuid) -> Result<()> {
        let item = self
            .items
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| ValidationError::not_found("notifications", id))?;
        item.read = true;
        Ok(())
    }

    pub fn mark_all_read(&mut self) {
        for item in &mut self.items {
            item.read = true;
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Notification> {
        let index = self
            .items
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| ValidationError::not_found("notifications", id))?;
        Ok(self.items.remove(index))
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Notification at a 1-based position, as shown in listings.
    pub fn nth(&self, position: usize) -> Option<&Notification> {
        position.checked_sub(1).and_then(|i| self.items.get(i))
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn summary(&self) -> String {
        match self.unread_count() {
            0 => "All caught up".to_string(),
            n => format!("{n} unread"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_puts_newest_first() {
        let mut feed = NotificationFeed::new();
        feed.push(Notification::new(NotificationKind::Info, "first", ""));
        feed.push(Notification::new(NotificationKind::Info, "second", ""));
        assert_eq!(feed.items()[0].title, "second");
        assert_eq!(feed.nth(2).map(|n| n.title.as_str()), Some("first"));
    }

    #[test]
    fn read_tracking() {
        let mut feed = NotificationFeed::new();
        let a = feed.push(Notification::new(NotificationKind::Success, "a", ""));
        feed.push(Notification::new(NotificationKind::Warning, "b", ""));
        assert_eq!(feed.summary(), "2 unread");

        feed.mark_read(a).unwrap();
        assert_eq!(feed.unread_count(), 1);

        feed.mark_all_read();
        assert_eq!(feed.summary(), "All caught up");
    }

    #[test]
    fn remove_and_missing_ids() {
        let mut feed = NotificationFeed::new();
        let a = feed.push(Notification::new(NotificationKind::Info, "a", ""));
        assert_eq!(feed.remove(a).unwrap().title, "a");
        assert!(feed.remove(a).is_err());
        assert!(feed.mark_read(a).is_err());
    }

    #[test]
    fn segment_notice_is_a_reminder() {
        let n = Notification::for_segment(Mode::Focus, Mode::ShortBreak);
        assert_eq!(n.kind, NotificationKind::Reminder);
        assert_eq!(n.title, "Focus session complete");
        assert_eq!(n.message, "Focus finished, Short Break is up next");
        assert!(!n.read);
    }
}
