use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{
        OnboardingBodyRequest, OnboardingGoalsRequest, PlanResponse, ProfileResponse,
        UpdateProfileRequest,
    },
    repo::{self, ProfilePatch, ProfileRow},
};
use crate::{
    auth::services::AuthUser,
    engine::{
        basal_metabolic_rate, compute_daily_target, exercise_plan, total_daily_energy_expenditure,
        DerivedTargets, Profile,
    },
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).patch(update_profile))
        .route("/onboarding/body", put(onboarding_body))
        .route("/onboarding/goals", put(onboarding_goals))
        .route("/targets", get(get_targets))
        .route("/plan", get(get_plan))
}

/// Loads the caller's profile row, 404 if there is none.
async fn load_profile(
    state: &AppState,
    user_id: Uuid,
) -> Result<ProfileRow, (StatusCode, String)> {
    match repo::get_profile(&state.db, user_id).await {
        Ok(Some(row)) => Ok(row),
        Ok(None) => {
            warn!(%user_id, "profile not found");
            Err((StatusCode::NOT_FOUND, "Profile not found".into()))
        }
        Err(e) => {
            error!(error = %e, %user_id, "get_profile failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Could not load profile".into()))
        }
    }
}

fn profile_or_default(user_id: Uuid, row: Option<ProfileRow>) -> Profile {
    match row {
        Some(row) => row.to_profile(),
        None => {
            debug!(%user_id, "no profile row, using default targets");
            Profile::default()
        }
    }
}

/// Engine view of the caller's profile. A missing row counts as an empty
/// profile, so targets fall back instead of failing.
pub(crate) async fn load_engine_profile(
    state: &AppState,
    user_id: Uuid,
) -> Result<Profile, (StatusCode, String)> {
    let row = repo::get_profile(&state.db, user_id).await.map_err(|e| {
        error!(error = %e, %user_id, "get_profile failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Could not load profile".to_string())
    })?;
    Ok(profile_or_default(user_id, row))
}

async fn save_patch(
    state: &AppState,
    user_id: Uuid,
    patch: ProfilePatch,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    match repo::update_profile(&state.db, user_id, &patch).await {
        Ok(Some(row)) => {
            info!(%user_id, "profile updated");
            Ok(Json(row.into()))
        }
        Ok(None) => Err((StatusCode::NOT_FOUND, "Profile not found".into())),
        Err(e) => {
            error!(error = %e, %user_id, "update_profile failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not save profile, please retry".into(),
            ))
        }
    }
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let row = load_profile(&state, user_id).await?;
    Ok(Json(row.into()))
}

#[instrument(skip(state, body))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let patch = body
        .into_patch()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;
    save_patch(&state, user_id, patch).await
}

#[instrument(skip(state, body))]
pub async fn onboarding_body(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<OnboardingBodyRequest>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let patch = body
        .into_patch()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;
    save_patch(&state, user_id, patch).await
}

#[instrument(skip(state, body))]
pub async fn onboarding_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<OnboardingGoalsRequest>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    save_patch(&state, user_id, body.into()).await
}

#[instrument(skip(state))]
pub async fn get_targets(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DerivedTargets>, (StatusCode, String)> {
    let profile = load_engine_profile(&state, user_id).await?;
    Ok(Json(compute_daily_target(&profile)))
}

#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PlanResponse>, (StatusCode, String)> {
    let profile = load_engine_profile(&state, user_id).await?;
    Ok(Json(PlanResponse {
        goal: profile.goal,
        targets: compute_daily_target(&profile),
        bmr: basal_metabolic_rate(&profile),
        tdee: total_daily_energy_expenditure(&profile),
        exercise_plan: exercise_plan(profile.exercise_frequency),
    }))
}
