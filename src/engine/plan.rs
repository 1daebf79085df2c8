use serde::Serialize;

use super::types::ExerciseFrequency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkoutDay {
    pub day: u8,
    pub workout: &'static str,
    pub is_rest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExercisePlan {
    pub name: &'static str,
    pub schedule: Vec<WorkoutDay>,
}

const SEDENTARY_WEEK: [&str; 7] = [
    "Full Body A",
    "Rest",
    "Rest",
    "Full Body B",
    "Rest",
    "Rest",
    "Rest",
];
const LIGHT_WEEK: [&str; 7] = ["Push", "Rest", "Pull", "Rest", "Legs", "Rest", "Rest"];
const MODERATE_WEEK: [&str; 7] = ["Upper", "Lower", "Rest", "Upper", "Lower", "Rest", "Cardio"];
const DAILY_WEEK: [&str; 7] = [
    "Push",
    "Pull",
    "Legs",
    "Chest + Back",
    "Arms + Shoulders",
    "Legs + Cardio",
    "Rest",
];

/// Plan name and 7-day split for a training frequency. No frequency gets the
/// 1-3 sessions plan.
pub fn exercise_plan(frequency: Option<ExerciseFrequency>) -> ExercisePlan {
    let (name, week) = match frequency.unwrap_or(ExerciseFrequency::Light) {
        ExerciseFrequency::Sedentary => ("Light", SEDENTARY_WEEK),
        ExerciseFrequency::Light => ("Moderate", LIGHT_WEEK),
        ExerciseFrequency::Moderate => ("High", MODERATE_WEEK),
        ExerciseFrequency::Daily => ("Very High", DAILY_WEEK),
    };

    let schedule = (1u8..)
        .zip(week)
        .map(|(day, workout)| WorkoutDay {
            day,
            workout,
            is_rest: workout == "Rest",
        })
        .collect();

    ExercisePlan { name, schedule }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_plan_spans_a_week() {
        for freq in [
            ExerciseFrequency::Sedentary,
            ExerciseFrequency::Light,
            ExerciseFrequency::Moderate,
            ExerciseFrequency::Daily,
        ] {
            let plan = exercise_plan(Some(freq));
            assert_eq!(plan.schedule.len(), 7);
            assert_eq!(plan.schedule[0].day, 1);
            assert_eq!(plan.schedule[6].day, 7);
        }
    }

    #[test]
    fn training_days_follow_frequency() {
        let training_days = |f| {
            exercise_plan(Some(f))
                .schedule
                .iter()
                .filter(|d| !d.is_rest)
                .count()
        };
        assert_eq!(training_days(ExerciseFrequency::Sedentary), 2);
        assert_eq!(training_days(ExerciseFrequency::Light), 3);
        assert_eq!(training_days(ExerciseFrequency::Moderate), 5);
        assert_eq!(training_days(ExerciseFrequency::Daily), 6);
    }

    #[test]
    fn unset_frequency_gets_moderate_plan() {
        let plan = exercise_plan(None);
        assert_eq!(plan.name, "Moderate");
        assert_eq!(plan, exercise_plan(Some(ExerciseFrequency::Light)));
    }

    #[test]
    fn serializes_rest_flag() {
        let json = serde_json::to_value(exercise_plan(Some(ExerciseFrequency::Daily))).unwrap();
        assert_eq!(json["name"], "Very High");
        assert_eq!(json["schedule"][6]["workout"], "Rest");
        assert_eq!(json["schedule"][6]["is_rest"], true);
    }
}
