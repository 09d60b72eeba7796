//! Workout plan generation from static exercise tables.

use crate::constants::{EXERCISES_PER_ROUTINE, RECOMMENDED_ROUTINES};
use crate::models::{DayPlan, DayType, Exercise, Goal, Level, Location, RoutineCard, RoutineGoal};
use rand::seq::SliceRandom;
use rand::Rng;

/// Exercises for a given location and training day.
pub fn exercises_for(location: Location, day_type: DayType) -> &'static [&'static str] {
    match (location, day_type) {
        (Location::Gym, DayType::Push) => &[
            "Bench Press",
            "Incline Dumbbell Press",
            "Shoulder Press",
            "Tricep Pushdown",
            "Lateral Raises",
        ],
        (Location::Gym, DayType::Pull) => {
            &["Deadlift", "Pull-Ups", "Rows", "Face Pulls", "Bicep Curls"]
        }
        (Location::Gym, DayType::Legs) => &[
            "Squats",
            "Leg Press",
            "Romanian Deadlift",
            "Leg Curls",
            "Calf Raises",
        ],
        (Location::HomeMix, DayType::Push) => &[
            "Push-Ups",
            "Incline Push-Ups",
            "Resistance Band Press",
            "Dips on Chair",
        ],
        (Location::HomeMix, DayType::Pull) => {
            &["Resistance Band Row", "Back Extensions", "Doorway Rows"]
        }
        (Location::HomeMix, DayType::Legs) => {
            &["Bodyweight Squats", "Lunges", "Glute Bridges", "Jump Squats"]
        }
        (Location::Home, DayType::Push) => &["Push-Ups", "Decline Push-Ups", "Shoulder Taps"],
        (Location::Home, DayType::Pull) => &["Superman Pulls", "Towel Rows"],
        (Location::Home, DayType::Legs) => &["Air Squats", "Lunges", "Wall Sit", "Calf Raises"],
    }
}

/// Sets per exercise: a base from the session length, +1 for strength, +1 for advanced.
pub fn sets_for(minutes_per_session: u32, goal: Goal, level: Level) -> u32 {
    let base = match minutes_per_session {
        0..=30 => 2,
        31..=45 => 3,
        46..=60 => 4,
        61..=90 => 5,
        _ => 6,
    };
    let goal_bonus = u32::from(goal == Goal::Strength);
    let level_bonus = u32::from(level == Level::Advanced);
    base + goal_bonus + level_bonus
}

pub fn reps_label(goal: Goal) -> &'static str {
    match goal {
        Goal::Strength => "4-6 reps",
        Goal::Hypertrophy => "8-12 reps",
        Goal::Endurance => "15-20 reps",
    }
}

/// Build a `days`-long plan rotating push, pull, legs.
///
/// Inputs are expected to be validated by the caller; `days == 0` yields an empty plan.
pub fn generate_plan(
    location: Location,
    goal: Goal,
    level: Level,
    days: u32,
    minutes_per_session: u32,
) -> Vec<DayPlan> {
    let sets = sets_for(minutes_per_session, goal, level);
    let reps = reps_label(goal);

    (1..=days)
        .zip(DayType::CYCLE.iter().copied().cycle())
        .map(|(day, day_type)| DayPlan {
            day,
            day_type,
            exercises: exercises_for(location, day_type)
                .iter()
                .map(|&name| Exercise { name, sets, reps })
                .collect(),
        })
        .collect()
}

/// Exercise pool for a recommended routine goal.
pub fn routine_pool(goal: RoutineGoal) -> &'static [&'static str] {
    match goal {
        RoutineGoal::WeightLoss => &[
            "Burpees",
            "Jumping Jacks",
            "Mountain Climbers",
            "High Knees",
            "Skipping",
        ],
        RoutineGoal::MuscleGain => &["Push-ups", "Squats", "Pull-ups", "Deadlifts", "Bench Press"],
        RoutineGoal::Endurance => &["Running", "Cycling", "Rowing", "Jump Rope", "Sprints"],
        RoutineGoal::Flexibility => &[
            "Yoga",
            "Stretching",
            "Pilates",
            "Foam Rolling",
            "Mobility Drills",
        ],
    }
}

/// Draw the recommended routine cards: a random goal each, with distinct exercises.
pub fn recommend_routines<R: Rng + ?Sized>(rng: &mut R) -> Vec<RoutineCard> {
    (0..RECOMMENDED_ROUTINES)
        .filter_map(|_| {
            let goal = *RoutineGoal::ALL.choose(rng)?;
            let exercises = routine_pool(goal)
                .choose_multiple(rng, EXERCISES_PER_ROUTINE)
                .copied()
                .collect();
            Some(RoutineCard { goal, exercises })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_gym_strength_advanced_five_days() {
        let plan = generate_plan(Location::Gym, Goal::Strength, Level::Advanced, 5, 60);

        assert_eq!(plan.len(), 5);
        let types: Vec<DayType> = plan.iter().map(|d| d.day_type).collect();
        assert_eq!(
            types,
            vec![DayType::Push, DayType::Pull, DayType::Legs, DayType::Push, DayType::Pull]
        );
        for day in &plan {
            for exercise in &day.exercises {
                assert_eq!(exercise.sets, 6);
                assert_eq!(exercise.reps, "4-6 reps");
            }
        }
        assert_eq!(plan[0].day, 1);
        assert_eq!(plan[4].day, 5);
        assert_eq!(plan[0].exercises[0].name, "Bench Press");
    }

    #[test]
    fn test_sets_breakpoints() {
        let sets = |m| sets_for(m, Goal::Endurance, Level::Beginner);
        assert_eq!(sets(20), 2);
        assert_eq!(sets(30), 2);
        assert_eq!(sets(31), 3);
        assert_eq!(sets(45), 3);
        assert_eq!(sets(60), 4);
        assert_eq!(sets(90), 5);
        assert_eq!(sets(91), 6);
        assert_eq!(sets(180), 6);
    }

    #[test]
    fn test_sets_bonuses() {
        assert_eq!(sets_for(30, Goal::Strength, Level::Beginner), 3);
        assert_eq!(sets_for(30, Goal::Hypertrophy, Level::Advanced), 3);
        assert_eq!(sets_for(30, Goal::Strength, Level::Advanced), 4);
        assert_eq!(sets_for(30, Goal::Hypertrophy, Level::Intermediate), 2);
    }

    #[test]
    fn test_reps_labels() {
        assert_eq!(reps_label(Goal::Strength), "4-6 reps");
        assert_eq!(reps_label(Goal::Hypertrophy), "8-12 reps");
        assert_eq!(reps_label(Goal::Endurance), "15-20 reps");
    }

    #[test]
    fn test_exercise_lists_follow_location() {
        let plan = generate_plan(Location::Home, Goal::Hypertrophy, Level::Beginner, 3, 45);
        assert_eq!(plan[1].exercises.len(), 2);
        assert_eq!(plan[1].exercises[0].name, "Superman Pulls");
        assert_eq!(plan[2].exercises.len(), 4);
    }

    #[test]
    fn test_zero_days_is_empty() {
        assert!(generate_plan(Location::Gym, Goal::Strength, Level::Beginner, 0, 30).is_empty());
    }

    #[test]
    fn test_recommend_routines() {
        let mut rng = StdRng::seed_from_u64(7);
        let cards = recommend_routines(&mut rng);

        assert_eq!(cards.len(), RECOMMENDED_ROUTINES);
        for card in &cards {
            assert_eq!(card.exercises.len(), EXERCISES_PER_ROUTINE);
            let unique: HashSet<_> = card.exercises.iter().collect();
            assert_eq!(unique.len(), EXERCISES_PER_ROUTINE);
            let pool = routine_pool(card.goal);
            assert!(card.exercises.iter().all(|e| pool.contains(e)));
        }
    }
}
