//! Streak, daily and weekly progress, persisted per key.

use crate::constants::{keys, MAX_PERCENT};
use crate::error::AppError;
use crate::models::{DayKey, Percent, Streak, StreakOutcome, WeeklyInsights, WeeklySummary};
use crate::platform::{cues, Host};
use crate::store::{load_json, load_parsed, save_json, KeyValueStore};
use crate::validation::{parse_percent, validate_percent};
use log::info;
use rand::Rng;
use std::sync::Arc;

pub struct ProgressTracker {
    store: Arc<dyn KeyValueStore>,
    host: Host,
}

impl ProgressTracker {
    pub fn new(store: Arc<dyn KeyValueStore>, host: Host) -> Self {
        Self { store, host }
    }

    pub fn streak(&self) -> Result<Streak, AppError> {
        Ok(load_json(self.store.as_ref(), keys::STREAK)?.unwrap_or_default())
    }

    /// Record today's workout. Repeated calls on the same day change nothing.
    pub fn mark_day_complete(&self) -> Result<(Streak, StreakOutcome), AppError> {
        let today = self.host.clock.today();
        let (streak, outcome) = self.streak()?.record_completion(today);

        match outcome {
            StreakOutcome::AlreadyCompleted => {
                info!("Day {today} already completed");
                self.host.play(cues::ALREADY_COMPLETED);
            }
            StreakOutcome::Extended | StreakOutcome::Started => {
                save_json(self.store.as_ref(), keys::STREAK, &streak)?;
                info!("Marked {today} complete: {}", streak.label());
                self.host.play(cues::DAY_COMPLETED);
            }
        }
        Ok((streak, outcome))
    }

    pub fn daily(&self) -> Result<Option<Percent>, AppError> {
        let stored: Option<i64> = load_parsed(self.store.as_ref(), keys::DAILY)?;
        Ok(stored.and_then(|v| validate_percent("daily_progress", v).ok()))
    }

    /// Store today's completion from user-entered text.
    ///
    /// Rejected input leaves the stored value untouched.
    pub fn set_daily(&self, input: &str) -> Result<Percent, AppError> {
        let value = parse_percent("daily_progress", input)?;
        self.store_daily(value)
    }

    pub fn set_daily_percent(&self, value: i64) -> Result<Percent, AppError> {
        let value = validate_percent("daily_progress", value)?;
        self.store_daily(value)
    }

    fn store_daily(&self, value: Percent) -> Result<Percent, AppError> {
        self.store.set(keys::DAILY, &value.value().to_string())?;
        info!("Daily progress set to {value}");
        self.host.play(cues::daily_updated(value.value()));
        Ok(value)
    }

    /// Fill every weekday with a uniform random value in `0..=100` and store it.
    pub fn randomize_weekly<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<WeeklySummary, AppError> {
        let insights: WeeklyInsights = DayKey::ALL
            .iter()
            .filter_map(|day| Percent::new(rng.gen_range(0..=MAX_PERCENT)).map(|p| (*day, p)))
            .collect();
        let average = insights
            .average()
            .ok_or_else(|| AppError::Internal("weekly insights are empty".into()))?;

        save_json(self.store.as_ref(), keys::WEEKLY, &insights)?;
        self.store.set(keys::WEEKLY_AVG, &average.value().to_string())?;
        info!("Weekly insights refreshed, average {average}");
        self.host.play(cues::WEEKLY_REFRESHED);

        Ok(WeeklySummary {
            insights: Some(insights),
            average,
        })
    }

    /// Restore the weekly view.
    ///
    /// The mean is recomputed from the stored mapping and cached; without a
    /// mapping the cached mean is used as-is.
    pub fn load_weekly(&self) -> Result<Option<WeeklySummary>, AppError> {
        let insights: Option<WeeklyInsights> = load_json(self.store.as_ref(), keys::WEEKLY)?;

        if let Some(insights) = insights {
            if let Some(average) = insights.average() {
                self.store.set(keys::WEEKLY_AVG, &average.value().to_string())?;
                return Ok(Some(WeeklySummary {
                    insights: Some(insights),
                    average,
                }));
            }
        }

        let cached: Option<i64> = load_parsed(self.store.as_ref(), keys::WEEKLY_AVG)?;
        Ok(cached
            .and_then(|v| validate_percent("weekly_average", v).ok())
            .map(|average| WeeklySummary {
                insights: None,
                average,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::types::Clock;
    use crate::platform::{FixedClock, RecordingFeedback, RecordingNotifier};
    use crate::test_utils::{datetime, memory_store, test_host};
    use chrono::TimeDelta;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tracker() -> (ProgressTracker, Arc<FixedClock>, Arc<dyn KeyValueStore>) {
        let store = memory_store();
        let (host, clock, _) = test_host(datetime(2024, 4, 10, 19, 30));
        (ProgressTracker::new(Arc::clone(&store), host), clock, store)
    }

    #[test]
    fn test_streak_starts_empty() {
        let (tracker, _, _) = tracker();
        assert_eq!(tracker.streak().unwrap(), Streak::default());
    }

    #[test]
    fn test_mark_complete_twice_same_day() {
        let (tracker, _, _) = tracker();

        let (first, outcome) = tracker.mark_day_complete().unwrap();
        assert_eq!(outcome, StreakOutcome::Started);
        let (second, outcome) = tracker.mark_day_complete().unwrap();
        assert_eq!(outcome, StreakOutcome::AlreadyCompleted);

        assert_eq!(first, second);
        assert_eq!(tracker.streak().unwrap().count, 1);
    }

    #[test]
    fn test_mark_complete_consecutive_days() {
        let (tracker, clock, _) = tracker();

        tracker.mark_day_complete().unwrap();
        clock.advance(TimeDelta::days(1));
        tracker.mark_day_complete().unwrap();
        clock.advance(TimeDelta::days(1));
        let (streak, outcome) = tracker.mark_day_complete().unwrap();

        assert_eq!(outcome, StreakOutcome::Extended);
        assert_eq!(streak.count, 3);
        assert_eq!(streak.last_date, Some(clock.today()));
    }

    #[test]
    fn test_mark_complete_after_gap_resets() {
        let (tracker, clock, _) = tracker();

        tracker.mark_day_complete().unwrap();
        clock.advance(TimeDelta::days(1));
        tracker.mark_day_complete().unwrap();
        clock.advance(TimeDelta::days(2));
        let (streak, outcome) = tracker.mark_day_complete().unwrap();

        assert_eq!(outcome, StreakOutcome::Started);
        assert_eq!(streak.count, 1);
    }

    #[test]
    fn test_streak_persists_across_trackers() {
        let store = memory_store();
        let (host, _, _) = test_host(datetime(2024, 4, 10, 8, 0));
        ProgressTracker::new(Arc::clone(&store), host.clone())
            .mark_day_complete()
            .unwrap();

        let reloaded = ProgressTracker::new(store, host).streak().unwrap();
        assert_eq!(reloaded.count, 1);
    }

    #[test]
    fn test_set_daily_accepts_bounds() {
        let (tracker, _, _) = tracker();
        for value in [0, 1, 50, 99, 100] {
            assert_eq!(tracker.set_daily_percent(value).unwrap().value(), u8::try_from(value).unwrap());
            assert_eq!(tracker.daily().unwrap().unwrap().value(), u8::try_from(value).unwrap());
        }
    }

    #[test]
    fn test_set_daily_rejects_and_keeps_previous() {
        let (tracker, _, store) = tracker();
        tracker.set_daily("40").unwrap();

        for bad in ["-1", "101", "50.5", "abc", ""] {
            let err = tracker.set_daily(bad).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput { .. }), "input {bad:?}");
        }
        assert!(tracker.set_daily_percent(-1).is_err());
        assert!(tracker.set_daily_percent(101).is_err());

        assert_eq!(store.get(keys::DAILY).unwrap().as_deref(), Some("40"));
        assert_eq!(tracker.daily().unwrap().unwrap().value(), 40);
    }

    #[test]
    fn test_daily_ignores_corrupt_value() {
        let (tracker, _, store) = tracker();
        store.set(keys::DAILY, "250").unwrap();
        assert!(tracker.daily().unwrap().is_none());
    }

    #[test]
    fn test_randomize_weekly_values_and_average() {
        let (tracker, _, _) = tracker();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let summary = tracker.randomize_weekly(&mut rng).unwrap();
            let insights = summary.insights.unwrap();
            assert_eq!(insights.len(), 7);

            let total: u32 = insights.iter().map(|(_, p)| u32::from(p.value())).sum();
            assert!(insights.iter().all(|(_, p)| p.value() <= 100));
            let expected = (f64::from(total) / 7.0).round();
            assert!((f64::from(summary.average.value()) - expected).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_randomize_weekly_persists() {
        let (tracker, _, store) = tracker();
        let mut rng = StdRng::seed_from_u64(1);
        let summary = tracker.randomize_weekly(&mut rng).unwrap();

        let loaded = tracker.load_weekly().unwrap().unwrap();
        assert_eq!(loaded, summary);
        assert_eq!(
            store.get(keys::WEEKLY_AVG).unwrap(),
            Some(summary.average.value().to_string())
        );
    }

    #[test]
    fn test_load_weekly_recomputes_mean() {
        let (tracker, _, store) = tracker();
        store.set(keys::WEEKLY, r#"{"mon":10,"tue":20,"wed":30}"#).unwrap();
        store.set(keys::WEEKLY_AVG, "99").unwrap();

        let summary = tracker.load_weekly().unwrap().unwrap();
        assert_eq!(summary.average.value(), 20);
        assert_eq!(store.get(keys::WEEKLY_AVG).unwrap().as_deref(), Some("20"));
    }

    #[test]
    fn test_load_weekly_falls_back_to_cached_mean() {
        let (tracker, _, store) = tracker();
        store.set(keys::WEEKLY_AVG, "63").unwrap();

        let summary = tracker.load_weekly().unwrap().unwrap();
        assert!(summary.insights.is_none());
        assert_eq!(summary.average.value(), 63);
    }

    #[test]
    fn test_load_weekly_nothing_stored() {
        let (tracker, _, _) = tracker();
        assert!(tracker.load_weekly().unwrap().is_none());
    }

    #[test]
    fn test_feedback_cues() {
        let feedback = Arc::new(RecordingFeedback::default());
        let mut host = Host::quiet(
            Arc::new(FixedClock::new(datetime(2024, 4, 10, 7, 0))),
            Arc::new(RecordingNotifier::granted()),
        );
        host.tone = Arc::<RecordingFeedback>::clone(&feedback);
        host.haptics = Arc::<RecordingFeedback>::clone(&feedback);
        let tracker = ProgressTracker::new(memory_store(), host);

        tracker.mark_day_complete().unwrap();
        tracker.mark_day_complete().unwrap();
        tracker.set_daily("30").unwrap();
        let _ = tracker.set_daily("300");

        let tones: Vec<u32> = feedback.tones().iter().map(|t| t.frequency_hz).collect();
        assert_eq!(tones, vec![660, 880, 550]);
        assert_eq!(feedback.vibrations().len(), 2);
    }
}
