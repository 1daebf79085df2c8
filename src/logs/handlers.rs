use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::Date;
use tracing::{error, info, instrument};

use super::{
    dto::{DashboardResponse, IntakeRequest, LogResponse},
    repo,
    services::{format_log_date, parse_log_date, record_intake},
};
use crate::{
    auth::services::AuthUser,
    engine::{aggregate_daily_consumption, compute_daily_target, DailyLog},
    profiles::handlers::load_engine_profile,
    state::AppState,
};

pub fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/logs/:date", get(get_log))
        .route("/logs/:date/entries", post(add_entry))
        .route("/dashboard/:date", get(get_dashboard))
}

fn date_param(raw: &str) -> Result<Date, (StatusCode, String)> {
    parse_log_date(raw).ok_or((
        StatusCode::BAD_REQUEST,
        "date must be YYYY-MM-DD".to_string(),
    ))
}

fn log_response(date: Date, log: DailyLog) -> LogResponse {
    LogResponse {
        date: format_log_date(date),
        total_calories: log.rounded_calories(),
        log,
    }
}

async fn load_log(
    state: &AppState,
    user_id: uuid::Uuid,
    date: Date,
) -> Result<Option<DailyLog>, (StatusCode, String)> {
    repo::get_log(&state.db, user_id, date)
        .await
        .map(|row| row.as_ref().map(DailyLog::from))
        .map_err(|e| {
            error!(error = %e, %user_id, %date, "get_log failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not load daily log".into(),
            )
        })
}

/// GET /logs/:date — zeroed totals when nothing was logged that day.
#[instrument(skip(state))]
pub async fn get_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<String>,
) -> Result<Json<LogResponse>, (StatusCode, String)> {
    let date = date_param(&date)?;
    let log = load_log(&state, user_id, date).await?.unwrap_or_default();
    Ok(Json(log_response(date, log)))
}

/// POST /logs/:date/entries — adds to the day's totals.
#[instrument(skip(state, body))]
pub async fn add_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<String>,
    Json(body): Json<IntakeRequest>,
) -> Result<(StatusCode, Json<LogResponse>), (StatusCode, String)> {
    let date = date_param(&date)?;
    let entry = body.entry();

    let row = record_intake(&state.db, user_id, date, &entry)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, %date, "record_intake failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not save intake, please retry".into(),
            )
        })?;

    info!(%user_id, %date, "intake added");
    Ok((StatusCode::CREATED, Json(log_response(date, DailyLog::from(&row)))))
}

/// GET /dashboard/:date — targets from the profile plus the day's consumption.
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<String>,
) -> Result<Json<DashboardResponse>, (StatusCode, String)> {
    let date = date_param(&date)?;
    let profile = load_engine_profile(&state, user_id).await?;
    let targets = compute_daily_target(&profile);
    let log = load_log(&state, user_id, date).await?;

    Ok(Json(DashboardResponse {
        date: format_log_date(date),
        consumption: aggregate_daily_consumption(log.as_ref(), &targets),
        log: log.unwrap_or_default(),
        targets,
    }))
}
