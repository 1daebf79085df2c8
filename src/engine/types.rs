use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failed to read a stored or submitted enum label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognized {field}: {value:?}")]
pub struct ParseFieldError {
    pub field: &'static str,
    pub value: String,
}

impl ParseFieldError {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(ParseFieldError::new("gender", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    MaintainWeight,
    GainMuscleAndWeight,
}

impl Goal {
    pub fn as_str(self) -> &'static str {
        match self {
            Goal::LoseWeight => "lose_weight",
            Goal::MaintainWeight => "maintain_weight",
            Goal::GainMuscleAndWeight => "gain_muscle_and_weight",
        }
    }

    /// Human label as shown on the onboarding form.
    pub fn label(self) -> &'static str {
        match self {
            Goal::LoseWeight => "Lose weight",
            Goal::MaintainWeight => "Maintain weight",
            Goal::GainMuscleAndWeight => "Increase muscle mass and gain weight",
        }
    }
}

impl FromStr for Goal {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lose_weight" | "lose weight" => Ok(Goal::LoseWeight),
            "maintain_weight" | "maintain weight" => Ok(Goal::MaintainWeight),
            "gain_muscle_and_weight" | "increase muscle mass and gain weight" => {
                Ok(Goal::GainMuscleAndWeight)
            }
            _ => Err(ParseFieldError::new("goal", s)),
        }
    }
}

/// How often the user trains in a typical week.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseFrequency {
    /// Little to no exercise.
    Sedentary,
    /// 1-3 sessions a week.
    Light,
    /// 4-5 sessions a week.
    Moderate,
    Daily,
}

impl ExerciseFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseFrequency::Sedentary => "sedentary",
            ExerciseFrequency::Light => "light",
            ExerciseFrequency::Moderate => "moderate",
            ExerciseFrequency::Daily => "daily",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExerciseFrequency::Sedentary => "Little to none",
            ExerciseFrequency::Light => "1-3 times a week",
            ExerciseFrequency::Moderate => "4-5 times a week",
            ExerciseFrequency::Daily => "Daily",
        }
    }
}

impl FromStr for ExerciseFrequency {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" | "little to none" | "little to no exercise" => {
                Ok(ExerciseFrequency::Sedentary)
            }
            "light" | "1-3 times a week" | "1-3 times per week" => Ok(ExerciseFrequency::Light),
            "moderate" | "4-5 times a week" | "4-5 times per week" => {
                Ok(ExerciseFrequency::Moderate)
            }
            "daily" => Ok(ExerciseFrequency::Daily),
            _ => Err(ParseFieldError::new("exercise_frequency", s)),
        }
    }
}

/// Body profile snapshot the engine computes from. Every field may be unset
/// while onboarding is incomplete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub gender: Option<Gender>,
    /// Total inches.
    pub height: Option<f64>,
    /// Pounds.
    pub weight: Option<f64>,
    pub age: Option<i32>,
    pub goal: Option<Goal>,
    pub exercise_frequency: Option<ExerciseFrequency>,
}

/// Weight, height and age, all present and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BodyMetrics {
    pub weight_lb: f64,
    pub height_in: f64,
    pub age: f64,
}

impl Profile {
    pub(crate) fn body_metrics(&self) -> Option<BodyMetrics> {
        let weight_lb = self.weight.filter(|w| w.is_finite() && *w > 0.0)?;
        let height_in = self.height.filter(|h| h.is_finite() && *h > 0.0)?;
        let age = self.age.filter(|a| *a > 0)?;
        Some(BodyMetrics {
            weight_lb,
            height_in,
            age: f64::from(age),
        })
    }
}

/// Total height in inches from the feet/inches pair of the onboarding form.
pub fn height_from_feet_inches(feet: u32, inches: u32) -> f64 {
    f64::from(feet) * 12.0 + f64::from(inches)
}

/// Cumulative grams logged for one user on one calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fat_grams: f64,
}

/// One intake submission, already normalized to non-negative grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntakeEntry {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroGrams {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein_grams: i64,
    pub carbs_grams: i64,
    pub fat_grams: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedTargets {
    pub max_calories: i64,
    /// Absent when the profile is too incomplete to compute a real target.
    pub macros: Option<MacroTargets>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroPercentages {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedConsumption {
    pub calories_consumed: i64,
    pub remaining_calories: i64,
    pub macro_percentages: MacroPercentages,
}

/// Rounds half-way values toward positive infinity.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
