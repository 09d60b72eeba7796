use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Consecutive-day completion counter.
///
/// Stored as `{"count": 3, "lastDate": "2024-05-01"}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub count: u32,
    #[serde(rename = "lastDate")]
    pub last_date: Option<NaiveDate>,
}

/// What a "mark day complete" call did to the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakOutcome {
    /// Today was already recorded; nothing changed.
    AlreadyCompleted,
    /// Yesterday was recorded, so the count went up by one.
    Extended,
    /// First completion, or a day was skipped; the count restarted at 1.
    Started,
}

impl StreakOutcome {
    pub fn changed(self) -> bool {
        match self {
            Self::AlreadyCompleted => false,
            Self::Extended | Self::Started => true,
        }
    }
}

impl Streak {
    pub fn new(count: u32, last_date: Option<NaiveDate>) -> Self {
        Self { count, last_date }
    }

    /// Apply a completion on `today`.
    ///
    /// Same-day calls are no-ops. Any non-no-op call stamps `last_date = today`.
    pub fn record_completion(self, today: NaiveDate) -> (Self, StreakOutcome) {
        match self.last_date {
            Some(last) if last == today => (self, StreakOutcome::AlreadyCompleted),
            Some(last) if today.pred_opt() == Some(last) => (
                Self::new(self.count.saturating_add(1), Some(today)),
                StreakOutcome::Extended,
            ),
            Some(_) | None => (Self::new(1, Some(today)), StreakOutcome::Started),
        }
    }

    /// Human-readable form, e.g. "Streak: 1 day" / "Streak: 4 days".
    pub fn label(&self) -> String {
        let plural = if self.count == 1 { "" } else { "s" };
        format!("Streak: {} day{plural}", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + chrono::Days::new(u64::from(n))
    }

    #[test]
    fn test_first_completion_starts_at_one() {
        let (streak, outcome) = Streak::default().record_completion(day(0));
        assert_eq!(streak, Streak::new(1, Some(day(0))));
        assert_eq!(outcome, StreakOutcome::Started);
    }

    #[test]
    fn test_same_day_is_idempotent() {
        let (once, _) = Streak::new(4, Some(day(9))).record_completion(day(10));
        let (twice, outcome) = once.record_completion(day(10));
        assert_eq!(once, twice);
        assert_eq!(twice.count, 5);
        assert_eq!(outcome, StreakOutcome::AlreadyCompleted);
        assert!(!outcome.changed());
    }

    #[test]
    fn test_consecutive_day_increments_by_one() {
        let (streak, outcome) = Streak::new(7, Some(day(3))).record_completion(day(4));
        assert_eq!(streak.count, 8);
        assert_eq!(streak.last_date, Some(day(4)));
        assert_eq!(outcome, StreakOutcome::Extended);
    }

    #[test]
    fn test_gap_resets_to_one() {
        let (streak, outcome) = Streak::new(7, Some(day(3))).record_completion(day(5));
        assert_eq!(streak, Streak::new(1, Some(day(5))));
        assert_eq!(outcome, StreakOutcome::Started);

        let (streak, _) = Streak::new(30, Some(day(0))).record_completion(day(20));
        assert_eq!(streak.count, 1);
    }

    #[test]
    fn test_last_date_in_future_resets() {
        let (streak, outcome) = Streak::new(3, Some(day(8))).record_completion(day(5));
        assert_eq!(streak, Streak::new(1, Some(day(5))));
        assert_eq!(outcome, StreakOutcome::Started);
    }

    #[test]
    fn test_month_boundary_counts_as_consecutive() {
        let feb_29 = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let mar_1 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let (streak, _) = Streak::new(2, Some(feb_29)).record_completion(mar_1);
        assert_eq!(streak.count, 3);
    }

    #[test]
    fn test_json_shape() {
        let streak = Streak::new(2, Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
        let json = serde_json::to_string(&streak).unwrap();
        assert_eq!(json, r#"{"count":2,"lastDate":"2024-05-01"}"#);

        let empty: Streak = serde_json::from_str(r#"{"count":0,"lastDate":null}"#).unwrap();
        assert_eq!(empty, Streak::default());
    }

    #[test]
    fn test_label() {
        assert_eq!(Streak::new(1, None).label(), "Streak: 1 day");
        assert_eq!(Streak::new(0, None).label(), "Streak: 0 days");
        assert_eq!(Streak::new(12, None).label(), "Streak: 12 days");
    }
}
