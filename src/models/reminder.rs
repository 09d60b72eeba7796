use crate::error::AppError;
use crate::validation::validate_time_format;
use chrono::{NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

/// Time of day a daily reminder fires, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReminderTime(NaiveTime);

impl ReminderTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// The first instant strictly after `now` at this time of day:
    /// today if still ahead, otherwise tomorrow.
    pub fn next_occurrence(self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let today = now.date().and_time(self.0);
        if today > now {
            return Some(today);
        }
        now.date().succ_opt().map(|d| d.and_time(self.0))
    }
}

impl FromStr for ReminderTime {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_time_format(s.trim()).map(Self)
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}
