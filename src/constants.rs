// src/constants.rs

/// Storage keys in the shared key-value namespace.
pub mod keys {
    pub const USERS: &str = "users";
    pub const CURRENT_USER: &str = "currentUser";
    pub const REMEMBER_ME: &str = "synergyAuto";
    pub const STREAK: &str = "streak";
    pub const DAILY: &str = "dailyProgress";
    pub const WEEKLY: &str = "weeklyInsights";
    pub const WEEKLY_AVG: &str = "weeklyAvg";
    pub const REMINDER: &str = "reminderTime";

    /// Single-user record written by older builds.
    pub const LEGACY_USER: &str = "synergyUser";
    /// Date string paired with an integer `streak` in older builds.
    pub const LEGACY_LAST_WORKOUT: &str = "lastWorkout";
}

/// Upper bound of any completion percentage.
pub const MAX_PERCENT: u8 = 100;

/// Degrees of gauge sweep per percentage point.
pub const DEGREES_PER_PERCENT: f64 = 3.6;

/// Maximum length of a name, email or phone field.
pub const MAX_FIELD_LEN: usize = 254;

/// Maximum days a generated plan may span.
pub const MAX_PLAN_DAYS: u32 = 14;

/// Maximum session length accepted for plan generation.
pub const MAX_SESSION_MINUTES: u32 = 240;

/// Number of cards produced by the routine recommender.
pub const RECOMMENDED_ROUTINES: usize = 4;

/// Exercises drawn per recommended routine card.
pub const EXERCISES_PER_ROUTINE: usize = 3;
