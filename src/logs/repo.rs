pub use super::repo_types::FoodLogRow;
use anyhow::Context;
use sqlx::{PgPool, Postgres, Transaction};
use time::Date;
use uuid::Uuid;

use crate::engine::DailyLog;

pub async fn get_log(db: &PgPool, user_id: Uuid, date: Date) -> anyhow::Result<Option<FoodLogRow>> {
    let row = sqlx::query_as::<_, FoodLogRow>(
        r#"
        SELECT user_id, date, protein_grams, carbs_grams, fat_grams, updated_at
          FROM food_logs
         WHERE user_id = $1 AND date = $2
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_optional(db)
    .await
    .context("get food log")?;
    Ok(row)
}

/// Makes sure the (user, date) row exists, then locks it for the rest of the
/// transaction and returns its current totals.
pub async fn lock_log_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    date: Date,
) -> anyhow::Result<DailyLog> {
    sqlx::query(
        r#"
        INSERT INTO food_logs (user_id, date)
        VALUES ($1, $2)
        ON CONFLICT (user_id, date) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(date)
    .execute(&mut **tx)
    .await
    .context("ensure food log")?;

    let row = sqlx::query_as::<_, FoodLogRow>(
        r#"
        SELECT user_id, date, protein_grams, carbs_grams, fat_grams, updated_at
          FROM food_logs
         WHERE user_id = $1 AND date = $2
           FOR UPDATE
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_one(&mut **tx)
    .await
    .context("lock food log")?;

    Ok(DailyLog::from(&row))
}

/// Writes the full gram triple for (user, date), replacing whatever was
/// stored. Callers pre-sum with the previous totals.
pub async fn upsert_log_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    date: Date,
    log: &DailyLog,
) -> anyhow::Result<FoodLogRow> {
    let row = sqlx::query_as::<_, FoodLogRow>(
        r#"
        INSERT INTO food_logs (user_id, date, protein_grams, carbs_grams, fat_grams)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id, date) DO UPDATE SET
            protein_grams = EXCLUDED.protein_grams,
            carbs_grams   = EXCLUDED.carbs_grams,
            fat_grams     = EXCLUDED.fat_grams,
            updated_at    = now()
        RETURNING user_id, date, protein_grams, carbs_grams, fat_grams, updated_at
        "#,
    )
    .bind(user_id)
    .bind(date)
    .bind(log.protein_grams)
    .bind(log.carbs_grams)
    .bind(log.fat_grams)
    .fetch_one(&mut **tx)
    .await
    .context("upsert food log")?;
    Ok(row)
}
