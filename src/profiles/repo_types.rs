use std::str::FromStr;

use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use crate::engine::{ExerciseFrequency, Gender, Goal, ParseFieldError, Profile};

#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub age: Option<i32>,
    pub goal: Option<String>,
    pub exercise_freq: Option<String>,
    pub updated_at: OffsetDateTime,
}

/// Fields an update may touch; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
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

fn parse_stored<T>(user_id: Uuid, raw: Option<&str>) -> Option<T>
where
    T: FromStr<Err = ParseFieldError>,
{
    let raw = raw.filter(|s| !s.trim().is_empty())?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(%user_id, error = %e, "ignoring stored profile value");
            None
        }
    }
}

impl ProfileRow {
    /// Engine view of the row. Unreadable enum labels count as unset.
    pub fn to_profile(&self) -> Profile {
        Profile {
            gender: parse_stored(self.user_id, self.gender.as_deref()),
            height: self.height,
            weight: self.weight,
            age: self.age,
            goal: parse_stored(self.user_id, self.goal.as_deref()),
            exercise_frequency: parse_stored(self.user_id, self.exercise_freq.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ProfileRow {
        ProfileRow {
            user_id: Uuid::new_v4(),
            first_name: None,
            last_name: None,
            username: None,
            gender: Some("Male".into()),
            height: Some(70.0),
            weight: Some(160.0),
            age: Some(25),
            goal: Some("Maintain weight".into()),
            exercise_freq: Some("1-3 times a week".into()),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn legacy_labels_map_to_engine_enums() {
        let p = row().to_profile();
        assert_eq!(p.gender, Some(Gender::Male));
        assert_eq!(p.goal, Some(Goal::MaintainWeight));
        assert_eq!(p.exercise_frequency, Some(ExerciseFrequency::Light));
    }

    #[test]
    fn unknown_or_blank_labels_read_as_unset() {
        let mut r = row();
        r.goal = Some("get shredded".into());
        r.exercise_freq = Some("".into());
        let p = r.to_profile();
        assert_eq!(p.goal, None);
        assert_eq!(p.exercise_frequency, None);
        assert_eq!(p.weight, Some(160.0));
    }
}
