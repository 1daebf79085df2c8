pub use super::repo_types::{ProfilePatch, ProfileRow};
use sqlx::PgPool;
use uuid::Uuid;

const PROFILE_COLUMNS: &str = "user_id, first_name, last_name, username, gender, height, weight, \
                               age, goal, exercise_freq, updated_at";

pub async fn get_profile(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<ProfileRow>> {
    let row = sqlx::query_as::<_, ProfileRow>(&format!(
        "SELECT {} FROM profiles WHERE user_id = $1",
        PROFILE_COLUMNS
    ))
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Applies the set fields of `patch`; returns `None` when the user has no
/// profile row.
pub async fn update_profile(
    db: &PgPool,
    user_id: Uuid,
    patch: &ProfilePatch,
) -> anyhow::Result<Option<ProfileRow>> {
    let row = sqlx::query_as::<_, ProfileRow>(&format!(
        r#"
        UPDATE profiles SET
            first_name    = COALESCE($2, first_name),
            last_name     = COALESCE($3, last_name),
            username      = COALESCE($4, username),
            gender        = COALESCE($5, gender),
            height        = COALESCE($6, height),
            weight        = COALESCE($7, weight),
            age           = COALESCE($8, age),
            goal          = COALESCE($9, goal),
            exercise_freq = COALESCE($10, exercise_freq),
            updated_at    = now()
        WHERE user_id = $1
        RETURNING {}
        "#,
        PROFILE_COLUMNS
    ))
    .bind(user_id)
    .bind(patch.first_name.as_deref())
    .bind(patch.last_name.as_deref())
    .bind(patch.username.as_deref())
    .bind(patch.gender.map(|g| g.as_str()))
    .bind(patch.height)
    .bind(patch.weight)
    .bind(patch.age)
    .bind(patch.goal.map(|g| g.as_str()))
    .bind(patch.exercise_frequency.map(|f| f.as_str()))
    .fetch_optional(db)
    .await?;
    Ok(row)
}
