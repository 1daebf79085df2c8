//! Energy and macro target engine: pure computations over profile and log
//! snapshots. Nothing in here touches storage or the clock.

mod consumption;
mod plan;
mod serving;
mod targets;
mod types;

pub use consumption::{aggregate_daily_consumption, apply_intake_entry};
pub use plan::{exercise_plan, ExercisePlan};
pub use serving::{scale_by_serving_size, GramsInput};
pub use targets::{basal_metabolic_rate, compute_daily_target, total_daily_energy_expenditure};
pub use types::{
    height_from_feet_inches, DailyLog, DerivedConsumption, DerivedTargets, ExerciseFrequency,
    Gender, Goal, IntakeEntry, MacroGrams, ParseFieldError, Profile,
};
