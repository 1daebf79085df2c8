//! Daily calorie budget and macro gram targets.
//!
//! BMR uses the Mifflin-St Jeor equation on metric values converted from the
//! imperial units the profile stores. TDEE is BMR times an activity
//! multiplier; the goal then shifts TDEE by a fixed number of kcal.

use super::types::{
    round_half_up, DerivedTargets, ExerciseFrequency, Gender, Goal, MacroTargets, Profile,
};

/// Budget returned when weight, height or age is missing.
pub const FALLBACK_CALORIES: i64 = 2000;

pub const CM_PER_INCH: f64 = 2.54;
pub const KG_PER_POUND: f64 = 0.453592;

/// Multiplier used when no exercise frequency has been chosen yet.
pub const UNSET_ACTIVITY_MULTIPLIER: f64 = 1.375;

pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
pub const CARBS_KCAL_PER_GRAM: f64 = 4.0;
pub const FAT_KCAL_PER_GRAM: f64 = 9.0;

const PROTEIN_SHARE: f64 = 0.40;
const CARBS_SHARE: f64 = 0.30;
const FAT_SHARE: f64 = 0.30;

impl Gender {
    /// Sex-specific constant of the Mifflin-St Jeor equation.
    ///
    /// `Other` shares the female constant.
    pub fn bmr_offset(self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
            Gender::Other => -161.0,
        }
    }
}

impl ExerciseFrequency {
    pub fn activity_multiplier(self) -> f64 {
        match self {
            ExerciseFrequency::Sedentary => 1.2,
            ExerciseFrequency::Light => 1.375,
            ExerciseFrequency::Moderate => 1.6,
            ExerciseFrequency::Daily => 1.9,
        }
    }
}

impl Goal {
    /// kcal added to TDEE for this goal.
    pub fn calorie_adjustment(self) -> f64 {
        match self {
            Goal::LoseWeight => -400.0,
            Goal::MaintainWeight => 150.0,
            Goal::GainMuscleAndWeight => 500.0,
        }
    }
}

/// Basal metabolic rate in kcal/day, or `None` when weight, height or age is
/// missing or non-positive.
pub fn basal_metabolic_rate(profile: &Profile) -> Option<f64> {
    let body = profile.body_metrics()?;
    let height_cm = body.height_in * CM_PER_INCH;
    let weight_kg = body.weight_lb * KG_PER_POUND;
    // an unset gender falls through to the female constant
    let offset = profile.gender.unwrap_or(Gender::Female).bmr_offset();
    Some(10.0 * weight_kg + 6.25 * height_cm - 5.0 * body.age + offset)
}

/// Total daily energy expenditure: BMR scaled by activity.
pub fn total_daily_energy_expenditure(profile: &Profile) -> Option<f64> {
    let multiplier = profile
        .exercise_frequency
        .map_or(UNSET_ACTIVITY_MULTIPLIER, ExerciseFrequency::activity_multiplier);
    basal_metabolic_rate(profile).map(|bmr| bmr * multiplier)
}

/// Computes the daily calorie budget and macro targets for a profile.
///
/// Never fails: an incomplete profile yields [`FALLBACK_CALORIES`] with no
/// macro targets.
pub fn compute_daily_target(profile: &Profile) -> DerivedTargets {
    let Some(tdee) = total_daily_energy_expenditure(profile) else {
        return DerivedTargets {
            max_calories: FALLBACK_CALORIES,
            macros: None,
        };
    };

    let adjustment = profile.goal.map_or(150.0, Goal::calorie_adjustment);
    let max_calories = round_half_up(tdee + adjustment) as i64;

    DerivedTargets {
        max_calories,
        macros: Some(macro_split(max_calories)),
    }
}

/// 40/30/30 split of a calorie budget into grams. Each macro is rounded on
/// its own, so the gram calories may drift from the budget by a kcal or two.
pub fn macro_split(max_calories: i64) -> MacroTargets {
    let kcal = max_calories as f64;
    MacroTargets {
        protein_grams: round_half_up(kcal * PROTEIN_SHARE / PROTEIN_KCAL_PER_GRAM) as i64,
        carbs_grams: round_half_up(kcal * CARBS_SHARE / CARBS_KCAL_PER_GRAM) as i64,
        fat_grams: round_half_up(kcal * FAT_SHARE / FAT_KCAL_PER_GRAM) as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_profile() -> Profile {
        Profile {
            gender: Some(Gender::Male),
            height: Some(70.0),
            weight: Some(160.0),
            age: Some(25),
            goal: Some(Goal::MaintainWeight),
            exercise_frequency: Some(ExerciseFrequency::Light),
        }
    }

    #[test]
    fn reference_male_maintaining_gets_2511() {
        let targets = compute_daily_target(&reference_profile());
        assert_eq!(targets.max_calories, 2511);
        assert_eq!(
            targets.macros,
            Some(MacroTargets {
                protein_grams: 251,
                carbs_grams: 188,
                fat_grams: 84,
            })
        );
    }

    #[test]
    fn bmr_matches_hand_computation() {
        let bmr = basal_metabolic_rate(&reference_profile()).unwrap();
        assert!((bmr - 1716.9972).abs() < 1e-3, "bmr = {bmr}");
    }

    #[test]
    fn goal_shifts_the_budget() {
        let mut profile = reference_profile();
        let tdee = total_daily_energy_expenditure(&profile).unwrap();

        profile.goal = Some(Goal::LoseWeight);
        assert_eq!(
            compute_daily_target(&profile).max_calories,
            round_half_up(tdee - 400.0) as i64
        );

        profile.goal = Some(Goal::GainMuscleAndWeight);
        assert_eq!(
            compute_daily_target(&profile).max_calories,
            round_half_up(tdee + 500.0) as i64
        );

        profile.goal = None;
        assert_eq!(compute_daily_target(&profile).max_calories, 2511);
    }

    #[test]
    fn female_and_other_share_the_lower_constant() {
        let mut profile = reference_profile();
        profile.gender = Some(Gender::Female);
        let female = compute_daily_target(&profile);
        profile.gender = Some(Gender::Other);
        let other = compute_daily_target(&profile);
        profile.gender = None;
        let unset = compute_daily_target(&profile);

        assert_eq!(female, other);
        assert_eq!(female, unset);
        // (5 + 161) * 1.375 = 228.25 kcal below the male budget
        assert_eq!(2511 - female.max_calories, 228);
    }

    #[test]
    fn unset_frequency_uses_light_multiplier() {
        let mut profile = reference_profile();
        profile.exercise_frequency = None;
        assert_eq!(compute_daily_target(&profile).max_calories, 2511);

        profile.exercise_frequency = Some(ExerciseFrequency::Sedentary);
        let sedentary = compute_daily_target(&profile).max_calories;
        profile.exercise_frequency = Some(ExerciseFrequency::Daily);
        let daily = compute_daily_target(&profile).max_calories;
        assert!(sedentary < 2511 && 2511 < daily);
    }

    #[test]
    fn incomplete_profile_falls_back() {
        let fallback = DerivedTargets {
            max_calories: FALLBACK_CALORIES,
            macros: None,
        };

        let strips: [fn(&mut Profile); 5] = [
            |p: &mut Profile| p.weight = None,
            |p: &mut Profile| p.height = None,
            |p: &mut Profile| p.age = None,
            |p: &mut Profile| p.weight = Some(0.0),
            |p: &mut Profile| p.age = Some(-3),
        ];
        for strip in strips {
            let mut profile = reference_profile();
            strip(&mut profile);
            assert_eq!(compute_daily_target(&profile), fallback);
        }

        assert_eq!(compute_daily_target(&Profile::default()), fallback);
        assert_eq!(fallback.macros.unwrap_or_default(), MacroTargets::default());
    }

    #[test]
    fn computation_is_deterministic() {
        let profile = reference_profile();
        assert_eq!(compute_daily_target(&profile), compute_daily_target(&profile));
    }

    #[test]
    fn macro_split_rounds_each_macro_independently() {
        let split = macro_split(2000);
        assert_eq!(split.protein_grams, 200);
        assert_eq!(split.carbs_grams, 150);
        assert_eq!(split.fat_grams, 67);
        let kcal = split.protein_grams * 4 + split.carbs_grams * 4 + split.fat_grams * 9;
        assert!((kcal - 2000).abs() <= 3);
    }
}
