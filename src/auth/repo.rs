pub use crate::auth::repo_types::{SignupNames, User};
use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, email, password_hash, created_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a user and its empty profile in one transaction.
    pub async fn create_with_profile(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        names: &SignupNames,
    ) -> anyhow::Result<User> {
        let mut tx = db.begin().await.context("begin tx")?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .context("insert user")?;

        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, first_name, last_name, username)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id)
        .bind(names.first_name.as_deref())
        .bind(names.last_name.as_deref())
        .bind(names.username.as_deref())
        .execute(&mut *tx)
        .await
        .context("insert profile")?;

        tx.commit().await.context("commit tx")?;
        Ok(user)
    }
}
