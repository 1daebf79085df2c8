use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{LoginRequest, PublicUser, RefreshRequest, RegisterRequest, SessionResponse},
        repo::{SignupNames, User},
        services::{hash_password, normalize_email, verify_password, AuthUser, MIN_PASSWORD_LEN},
        tokens::TokenKind,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn start_session(state: &AppState, user: User) -> Result<Json<SessionResponse>, (StatusCode, String)> {
    let tokens = state.jwt.issue(user.id).map_err(|e| {
        error!(error = %e, user_id = %user.id, "token issue failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Could not sign in".to_string())
    })?;
    Ok(Json(SessionResponse::new(tokens, user)))
}

fn email_or_400(raw: &str) -> Result<String, (StatusCode, String)> {
    normalize_email(raw).ok_or_else(|| {
        warn!(email = raw, "invalid email");
        (StatusCode::BAD_REQUEST, "Invalid email".to_string())
    })
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// POST /auth/register: creates the user and an empty profile.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>, (StatusCode, String)> {
    let email = email_or_400(&payload.email)?;
    if payload.password.len() < MIN_PASSWORD_LEN {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }

    match User::find_by_email(&state.db, &email).await {
        Ok(Some(_)) => {
            warn!(%email, "email already registered");
            return Err((StatusCode::CONFLICT, "Email already registered".into()));
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Could not register".into()));
        }
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Could not register".to_string())
    })?;

    let names = SignupNames {
        first_name: non_blank(payload.first_name),
        last_name: non_blank(payload.last_name),
        username: non_blank(payload.username),
    };

    let user = User::create_with_profile(&state.db, &email, &hash, &names)
        .await
        .map_err(|e| {
            error!(error = %e, %email, "create user failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Could not register".to_string())
        })?;

    info!(user_id = %user.id, "user registered");
    start_session(&state, user)
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, (StatusCode, String)> {
    let email = email_or_400(&payload.email)?;
    let invalid = || (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string());

    let user = match User::find_by_email(&state.db, &email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(%email, "login for unknown email");
            return Err(invalid());
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Could not sign in".into()));
        }
    };

    let matches = verify_password(&payload.password, &user.password_hash).map_err(|e| {
        error!(error = %e, user_id = %user.id, "verify_password failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Could not sign in".to_string())
    })?;
    if !matches {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(invalid());
    }

    info!(user_id = %user.id, "user logged in");
    start_session(&state, user)
}

/// POST /auth/refresh: a new pair for a valid refresh token whose user
/// still exists.
#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<SessionResponse>, (StatusCode, String)> {
    let user_id = state
        .jwt
        .verify(&payload.refresh_token, TokenKind::Refresh)
        .map_err(|e| (StatusCode::UNAUTHORIZED, e.to_string()))?;
    let user = load_user(&state, user_id).await?;
    start_session(&state, user)
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    Ok(Json(load_user(&state, user_id).await?.into()))
}

async fn load_user(state: &AppState, user_id: Uuid) -> Result<User, (StatusCode, String)> {
    match User::find_by_id(&state.db, user_id).await {
        Ok(Some(u)) => Ok(u),
        Ok(None) => {
            warn!(%user_id, "token for a missing user");
            Err((StatusCode::UNAUTHORIZED, "User not found".into()))
        }
        Err(e) => {
            error!(error = %e, %user_id, "find_by_id failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Could not load user".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use time::OffsetDateTime;
    use tower::ServiceExt;

    fn app(state: AppState) -> Router {
        auth_routes().merge(me_routes()).with_state(state)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn register_validates_before_touching_the_database() {
        let res = app(AppState::fake())
            .oneshot(post_json(
                "/auth/register",
                serde_json::json!({ "email": "not-an-email", "password": "long-enough" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = app(AppState::fake())
            .oneshot(post_json(
                "/auth/register",
                serde_json::json!({ "email": "jo@example.com", "password": "short" }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn refresh_rejects_an_access_token() {
        let state = AppState::fake();
        let access = state.jwt.issue(Uuid::new_v4()).unwrap().access_token;
        let res = app(state)
            .oneshot(post_json(
                "/auth/refresh",
                serde_json::json!({ "refresh_token": access }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn me_requires_a_token() {
        let res = app(AppState::fake())
            .oneshot(Request::get("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn session_response_hides_the_password_hash() {
        let tokens = crate::auth::tokens::TokenPair {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_in: 3600,
        };
        let user = User {
            id: Uuid::new_v4(),
            email: "jo@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(SessionResponse::new(tokens, user)).unwrap();
        assert_eq!(json["token_type"], "Bearer");
        assert_eq!(json["expires_in"], 3600);
        assert_eq!(json["user"]["email"], "jo@example.com");
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn blank_names_are_dropped() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some(" Sam ".into())), Some("Sam".into()));
        assert_eq!(non_blank(None), None);
    }
}
