pub mod plan;
pub mod progress;
pub mod reminder;
pub mod streak;
pub mod user;

pub use plan::{DayPlan, DayType, Exercise, Goal, Level, Location, RoutineCard, RoutineGoal};
pub use progress::{DayKey, GaugeReading, Percent, WeeklyInsights, WeeklySummary};
pub use reminder::ReminderTime;
pub use streak::{Streak, StreakOutcome};
pub use user::{Session, UserRecord};
