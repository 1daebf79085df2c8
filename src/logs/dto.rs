use serde::{Deserialize, Serialize};

use crate::engine::{DailyLog, DerivedConsumption, DerivedTargets, GramsInput, IntakeEntry};

/// Intake form. Each field may be a number, a numeric string, blank, or
/// missing; anything unreadable counts as 0 g.
#[derive(Debug, Default, Deserialize)]
pub struct IntakeRequest {
    pub protein: Option<GramsInput>,
    pub carbs: Option<GramsInput>,
    pub fat: Option<GramsInput>,
}

impl IntakeRequest {
    pub fn entry(&self) -> IntakeEntry {
        IntakeEntry::from_inputs(self.protein.as_ref(), self.carbs.as_ref(), self.fat.as_ref())
    }
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub date: String,
    pub log: DailyLog,
    /// Rounded kcal of the logged grams.
    pub total_calories: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub date: String,
    pub targets: DerivedTargets,
    pub log: DailyLog,
    pub consumption: DerivedConsumption,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intake_request_accepts_mixed_inputs() {
        let req: IntakeRequest = serde_json::from_value(serde_json::json!({
            "protein": "30",
            "carbs": 45.5,
            "fat": ""
        }))
        .unwrap();
        assert_eq!(
            req.entry(),
            IntakeEntry {
                protein: 30.0,
                carbs: 45.5,
                fat: 0.0,
            }
        );
    }

    #[test]
    fn empty_body_is_a_zero_entry() {
        let req: IntakeRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.entry(), IntakeEntry::default());
    }
}
