use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::engine::DailyLog;

#[derive(Debug, Clone, FromRow)]
pub struct FoodLogRow {
    pub user_id: Uuid,
    pub date: Date,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fat_grams: f64,
    pub updated_at: OffsetDateTime,
}

impl From<&FoodLogRow> for DailyLog {
    fn from(r: &FoodLogRow) -> Self {
        Self {
            protein_grams: r.protein_grams,
            carbs_grams: r.carbs_grams,
            fat_grams: r.fat_grams,
        }
    }
}
