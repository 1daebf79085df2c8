mod client;
mod debounce;
mod dto;
pub mod handlers;

pub use client::{FoodLookup, UsdaClient};
pub use debounce::SearchGate;

#[cfg(test)]
pub use client::FoodLookupError;
#[cfg(test)]
pub use dto::{FoodNutrients, FoodSummary};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::food_routes()
}
