use super::targets::{CARBS_KCAL_PER_GRAM, FAT_KCAL_PER_GRAM, PROTEIN_KCAL_PER_GRAM};
use super::types::{
    round_half_up, DailyLog, DerivedConsumption, DerivedTargets, IntakeEntry, MacroGrams,
    MacroPercentages,
};

impl MacroGrams {
    pub fn calories(&self) -> f64 {
        self.protein * PROTEIN_KCAL_PER_GRAM
            + self.carbs * CARBS_KCAL_PER_GRAM
            + self.fat * FAT_KCAL_PER_GRAM
    }
}

impl DailyLog {
    /// kcal derived from the logged grams via Atwater factors, unrounded.
    pub fn calories(&self) -> f64 {
        self.protein_grams * PROTEIN_KCAL_PER_GRAM
            + self.carbs_grams * CARBS_KCAL_PER_GRAM
            + self.fat_grams * FAT_KCAL_PER_GRAM
    }

    pub fn rounded_calories(&self) -> i64 {
        round_half_up(self.calories()) as i64
    }

    pub fn total_grams(&self) -> f64 {
        self.protein_grams + self.carbs_grams + self.fat_grams
    }
}

/// Consumed/remaining kcal and macro share for one day. An absent log counts
/// as nothing eaten.
pub fn aggregate_daily_consumption(
    log: Option<&DailyLog>,
    targets: &DerivedTargets,
) -> DerivedConsumption {
    let log = log.copied().unwrap_or_default();
    let consumed = log.calories();
    let remaining = round_half_up(targets.max_calories as f64 - consumed).max(0.0);

    let total = log.total_grams();
    let share = |grams: f64| if total > 0.0 { grams / total * 100.0 } else { 0.0 };

    DerivedConsumption {
        calories_consumed: log.rounded_calories(),
        remaining_calories: remaining as i64,
        macro_percentages: MacroPercentages {
            protein: share(log.protein_grams),
            carbs: share(log.carbs_grams),
            fat: share(log.fat_grams),
        },
    }
}

/// Adds an intake entry to the day's running totals.
///
/// There is no deduplication key: submitting the same entry twice counts it
/// twice.
pub fn apply_intake_entry(existing: Option<&DailyLog>, entry: &IntakeEntry) -> DailyLog {
    let base = existing.copied().unwrap_or_default();
    DailyLog {
        protein_grams: base.protein_grams + entry.protein,
        carbs_grams: base.carbs_grams + entry.carbs,
        fat_grams: base.fat_grams + entry.fat,
    }
}
