use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Row of `users`. Never serialized; responses carry `PublicUser`.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Name fields captured at sign-up and stored on the profile row.
#[derive(Debug, Clone, Default)]
pub struct SignupNames {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
}
