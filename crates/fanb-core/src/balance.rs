//! Balance: how tracked time splits across life categories.
//!
//! The balance score is 100 when every category has the same share and
//! drops by half the summed deviation from that ideal share.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Period::Day => "Day",
            Period::Week => "Week",
            Period::Month => "Month",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Period {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(ValidationError::InvalidValue {
                field: "period".into(),
                message: format!("expected day, week or month, got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Balanced,
    Fair,
    Unbalanced,
}

impl Rating {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Rating::Balanced
        } else if score >= 60.0 {
            Rating::Fair
        } else {
            Rating::Unbalanced
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: String,
    pub minutes: u64,
}

pub const WORK: &str = "Work";
pub const STUDY: &str = "Study";
pub const REST: &str = "Rest";
pub const SOCIAL: &str = "Social";
pub const OTHER: &str = "Other";

const DEFAULT_CATEGORIES: [(&str, &str); 5] = [
    (WORK, "#4f46e5"),
    (STUDY, "#0ea5e9"),
    (REST, "#22c55e"),
    (SOCIAL, "#f97316"),
    (OTHER, "#8b5cf6"),
];

const FALLBACK_COLOR: &str = "#64748b";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceTracker {
    period: Period,
    categories: Vec<Category>,
}

impl BalanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Work, Study, Rest, Social and Other, all at zero.
    pub fn with_default_categories() -> Self {
        Self {
            period: Period::default(),
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|(name, color)| Category {
                    name: (*name).to_string(),
                    color: (*color).to_string(),
                    minutes: 0,
                })
                .collect(),
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn set_period(&mut self, period: Period) {
        self.period = period;
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Credit minutes to a category, creating it on first use.
    /// Names match case-insensitively.
    pub fn add_minutes(&mut self, category: &str, minutes: u64) {
        let name = category.trim();
        match self
            .categories
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(name))
        {
            Some(existing) => existing.minutes = existing.minutes.saturating_add(minutes),
            None => self.categories.push(Category {
                name: name.to_string(),
                color: FALLBACK_COLOR.to_string(),
                minutes,
            }),
        }
    }

    pub fn total_minutes(&self) -> u64 {
        self.categories.iter().map(|c| c.minutes).sum()
    }

    fn shares(&self) -> Vec<f64> {
        let total = self.total_minutes();
        self.categories
            .iter()
            .map(|c| {
                if total == 0 {
                    0.0
                } else {
                    c.minutes as f64 * 100.0 / total as f64
                }
            })
            .collect()
    }

    /// Rounded percentage per category, in category order.
    pub fn percentages(&self) -> Vec<(String, u32)> {
        self.categories
            .iter()
            .zip(self.shares())
            .map(|(c, share)| (c.name.clone(), share.round() as u32))
            .collect()
    }

    /// `None` until some time has been tracked.
    pub fn balance_score(&self) -> Option<f64> {
        if self.categories.is_empty() || self.total_minutes() == 0 {
            return None;
        }
        let ideal = 100.0 / self.categories.len() as f64;
        let deviation: f64 = self.shares().iter().map(|s| (s - ideal).abs()).sum();
        Some((100.0 - deviation / 2.0).max(0.0))
    }

    pub fn rating(&self) -> Option<Rating> {
        self.balance_score().map(Rating::from_score)
    }
}

/// `"Xh Ym"`.
pub fn format_minutes(minutes: u64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}
