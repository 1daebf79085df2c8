use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo::{ProfilePatch, ProfileRow};
use crate::engine::{
    basal_metabolic_rate, height_from_feet_inches, DerivedTargets, ExercisePlan,
    ExerciseFrequency, Gender, Goal,
};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub gender: Option<Gender>,
    /// Total inches.
    pub height: Option<f64>,
    /// Pounds.
    pub weight: Option<f64>,
    pub age: Option<i32>,
    pub goal: Option<Goal>,
    pub exercise_frequency: Option<ExerciseFrequency>,
    /// Form labels for `goal` and `exercise_frequency`.
    pub goal_label: Option<&'static str>,
    pub exercise_frequency_label: Option<&'static str>,
    /// Weight, height and age are all set, so targets are personalised.
    pub onboarding_complete: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<ProfileRow> for ProfileResponse {
    fn from(row: ProfileRow) -> Self {
        let profile = row.to_profile();
        Self {
            onboarding_complete: basal_metabolic_rate(&profile).is_some(),
            first_name: row.first_name,
            last_name: row.last_name,
            username: row.username,
            gender: profile.gender,
            height: profile.height,
            weight: profile.weight,
            age: profile.age,
            goal: profile.goal,
            exercise_frequency: profile.exercise_frequency,
            goal_label: profile.goal.map(Goal::label),
            exercise_frequency_label: profile.exercise_frequency.map(ExerciseFrequency::label),
            updated_at: row.updated_at,
        }
    }
}

/// PATCH /profile body. Height is total inches here.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub gender: Option<Gender>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub age: Option<i32>,
    pub goal: Option<Goal>,
    pub exercise_frequency: Option<ExerciseFrequency>,
}

/// First onboarding step: body metrics, height split into feet and inches.
#[derive(Debug, Deserialize)]
pub struct OnboardingBodyRequest {
    pub gender: Gender,
    pub height_feet: u32,
    #[serde(default)]
    pub height_inches: u32,
    pub weight: f64,
    pub age: i32,
}

const MAX_HEIGHT_FEET: u32 = 8;

/// Second onboarding step.
#[derive(Debug, Deserialize)]
pub struct OnboardingGoalsRequest {
    pub goal: Goal,
    pub exercise_frequency: ExerciseFrequency,
}

/// Rejects non-positive or non-finite body metrics.
fn check_positive(name: &str, value: Option<f64>) -> Result<(), String> {
    match value {
        Some(v) if !(v.is_finite() && v > 0.0) => Err(format!("{} must be positive", name)),
        _ => Ok(()),
    }
}

impl UpdateProfileRequest {
    pub fn into_patch(self) -> Result<ProfilePatch, String> {
        check_positive("height", self.height)?;
        check_positive("weight", self.weight)?;
        check_positive("age", self.age.map(f64::from))?;
        Ok(ProfilePatch {
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            age: self.age,
            goal: self.goal,
            exercise_frequency: self.exercise_frequency,
        })
    }
}

impl OnboardingBodyRequest {
    pub fn into_patch(self) -> Result<ProfilePatch, String> {
        if self.height_feet > MAX_HEIGHT_FEET {
            return Err(format!("height_feet must be at most {}", MAX_HEIGHT_FEET));
        }
        if self.height_inches >= 12 {
            return Err("height_inches must be below 12".into());
        }
        UpdateProfileRequest {
            gender: Some(self.gender),
            height: Some(height_from_feet_inches(self.height_feet, self.height_inches)),
            weight: Some(self.weight),
            age: Some(self.age),
            ..UpdateProfileRequest::default()
        }
        .into_patch()
    }
}

impl From<OnboardingGoalsRequest> for ProfilePatch {
    fn from(req: OnboardingGoalsRequest) -> Self {
        ProfilePatch {
            goal: Some(req.goal),
            exercise_frequency: Some(req.exercise_frequency),
            ..ProfilePatch::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub goal: Option<Goal>,
    pub targets: DerivedTargets,
    /// kcal/day; absent until body metrics are complete.
    pub bmr: Option<f64>,
    pub tdee: Option<f64>,
    pub exercise_plan: ExercisePlan,
}
