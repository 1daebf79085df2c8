use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{debug, instrument, warn};

use super::dto::{
    FoodNutrients, FoodNutrientsResponse, FoodSearchResponse, NutrientParams, SearchParams,
};
use crate::{auth::services::AuthUser, engine::scale_by_serving_size, state::AppState};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods/search", get(search_foods))
        .route("/foods/:id/nutrients", get(food_nutrients))
}

/// GET /foods/search?q=...
///
/// Debounced per user; a search overtaken by a newer one returns
/// `superseded: true` with no results. Lookup failures return no results.
#[instrument(skip(state))]
pub async fn search_foods(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<SearchParams>,
) -> Json<FoodSearchResponse> {
    let query = params.q.trim().to_string();
    let ticket = state.search_gate.begin(user_id);

    let superseded = |query: String| {
        debug!(%user_id, "food search superseded");
        Json(FoodSearchResponse {
            query,
            superseded: true,
            results: Vec::new(),
        })
    };

    if query.chars().count() < state.config.food_search.min_query_len {
        state.search_gate.finish(&ticket);
        return Json(FoodSearchResponse {
            query,
            superseded: false,
            results: Vec::new(),
        });
    }

    if !state.search_gate.settle(&ticket).await {
        return superseded(query);
    }

    let results = match state.foods.search_foods(&query).await {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, %user_id, "food search failed");
            Vec::new()
        }
    };

    // a newer search may have started while this one was in flight
    if !state.search_gate.finish(&ticket) {
        return superseded(query);
    }

    Json(FoodSearchResponse {
        query,
        superseded: false,
        results,
    })
}

/// GET /foods/:id/nutrients?serving=150
#[instrument(skip(state))]
pub async fn food_nutrients(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(food_id): Path<i64>,
    Query(params): Query<NutrientParams>,
) -> Json<FoodNutrientsResponse> {
    let nutrients = match state.foods.get_food_nutrients(food_id).await {
        Ok(n) => n,
        Err(e) => {
            warn!(error = %e, %user_id, food_id, "nutrient lookup failed");
            FoodNutrients::default()
        }
    };

    let per_100g = nutrients.per_100g();
    let serving = scale_by_serving_size(&per_100g, params.serving_input().as_ref());

    Json(FoodNutrientsResponse {
        food_id,
        per_100g,
        serving_calories: serving.calories(),
        serving,
    })
}
