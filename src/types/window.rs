//! Date windows used to select measurement rows.
//!
//! Bounds are kept as strings and compared lexicographically against the
//! stored `date` column. ISO dates sort correctly as text, and request input
//! is never parsed, so a malformed bound simply selects whatever the text
//! comparison selects (usually nothing).

use chrono::{NaiveDate, TimeDelta};
use std::fmt;
use std::fmt::{Display, Formatter};

/// The fixed "today" of the dataset. Trailing-year windows end here.
pub const ANCHOR_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2017, 8, 23) {
    Some(date) => date,
    None => panic!("anchor date is not a valid calendar date"),
};

/// Length of the trailing window ending at [`ANCHOR_DATE`].
pub const TRAILING_WINDOW_DAYS: i64 = 365;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateWindow {
    /// `start <= date < end`
    HalfOpen { start: String, end: String },
    /// `start <= date <= end`
    Inclusive { start: String, end: String },
    /// `date >= start`
    Since { start: String },
}

impl DateWindow {
    /// The year before the anchor date: `[ANCHOR_DATE - 365 days, ANCHOR_DATE)`.
    pub fn trailing_year() -> Self {
        let start = ANCHOR_DATE - TimeDelta::days(TRAILING_WINDOW_DAYS);
        DateWindow::HalfOpen {
            start: start.format(DATE_FORMAT).to_string(),
            end: ANCHOR_DATE.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn since(start: impl Into<String>) -> Self {
        DateWindow::Since {
            start: start.into(),
        }
    }

    /// Both ends inclusive. No check is made that `start <= end`.
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        DateWindow::Inclusive {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Same comparison the query engine applies, for a single date string.
    pub fn contains(&self, date: &str) -> bool {
        match self {
            DateWindow::HalfOpen { start, end } => date >= start.as_str() && date < end.as_str(),
            DateWindow::Inclusive { start, end } => {
                date >= start.as_str() && date <= end.as_str()
            }
            DateWindow::Since { start } => date >= start.as_str(),
        }
    }
}

impl Display for DateWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DateWindow::HalfOpen { start, end } => write!(f, "[{}, {})", start, end),
            DateWindow::Inclusive { start, end } => write!(f, "[{}, {}]", start, end),
            DateWindow::Since { start } => write!(f, "[{}, ..)", start),
        }
    }
}
