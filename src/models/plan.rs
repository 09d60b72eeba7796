use crate::error::AppError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Where the workouts take place; selects the exercise table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Location {
    Gym,
    /// Home with some equipment (bands, chair, door frame).
    HomeMix,
    /// Bodyweight only.
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Strength,
    Hypertrophy,
    Endurance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Push,
    Pull,
    Legs,
}

impl DayType {
    /// Rotation order; day `n` (0-based) trains `CYCLE[n % 3]`.
    pub const CYCLE: [Self; 3] = [Self::Push, Self::Pull, Self::Legs];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pull => "pull",
            Self::Legs => "legs",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub name: &'static str,
    pub sets: u32,
    pub reps: &'static str,
}

/// One day of a generated plan. `day` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPlan {
    pub day: u32,
    pub day_type: DayType,
    pub exercises: Vec<Exercise>,
}

/// Goal categories used by the routine recommender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RoutineGoal {
    WeightLoss,
    MuscleGain,
    Endurance,
    Flexibility,
}

impl RoutineGoal {
    pub const ALL: [Self; 4] = [
        Self::WeightLoss,
        Self::MuscleGain,
        Self::Endurance,
        Self::Flexibility,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::WeightLoss => "Weight Loss",
            Self::MuscleGain => "Muscle Gain",
            Self::Endurance => "Endurance",
            Self::Flexibility => "Flexibility",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutineCard {
    pub goal: RoutineGoal,
    pub exercises: Vec<&'static str>,
}

fn normalized(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .collect::<String>()
        .to_lowercase()
}

impl FromStr for Location {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "gym" => Ok(Self::Gym),
            "homemix" => Ok(Self::HomeMix),
            "home" => Ok(Self::Home),
            other => Err(AppError::invalid(
                "location",
                format!("expected gym, home-mix or home, got '{other}'"),
            )),
        }
    }
}

impl FromStr for Goal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "strength" => Ok(Self::Strength),
            "hypertrophy" => Ok(Self::Hypertrophy),
            "endurance" => Ok(Self::Endurance),
            other => Err(AppError::invalid(
                "goal",
                format!("expected strength, hypertrophy or endurance, got '{other}'"),
            )),
        }
    }
}

impl FromStr for Level {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(AppError::invalid(
                "level",
                format!("expected beginner, intermediate or advanced, got '{other}'"),
            )),
        }
    }
}
