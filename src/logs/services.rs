use anyhow::Context;
use sqlx::PgPool;
use time::{macros::format_description, Date};
use tracing::debug;
use uuid::Uuid;

use super::repo::{self, FoodLogRow};
use crate::engine::{apply_intake_entry, IntakeEntry};

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_log_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

pub fn format_log_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Adds an entry to the (user, date) totals.
///
/// The row is locked for the read-add-write, so concurrent submissions for
/// the same day are applied one after another instead of overwriting each
/// other.
pub async fn record_intake(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
    entry: &IntakeEntry,
) -> anyhow::Result<FoodLogRow> {
    let mut tx = db.begin().await.context("begin tx")?;
    let current = repo::lock_log_tx(&mut tx, user_id, date).await?;
    let updated = apply_intake_entry(Some(&current), entry);
    let row = repo::upsert_log_tx(&mut tx, user_id, date, &updated).await?;
    tx.commit().await.context("commit tx")?;

    debug!(%user_id, %date, ?entry, "intake recorded");
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn parses_iso_dates() {
        let d = parse_log_date("2024-02-29").unwrap();
        assert_eq!(d.year(), 2024);
        assert_eq!(d.month(), Month::February);
        assert_eq!(d.day(), 29);
        assert_eq!(format_log_date(d), "2024-02-29");
    }

    #[test]
    fn rejects_malformed_dates() {
        for raw in ["2023-02-29", "2024-13-01", "2024-1-32", "today", ""] {
            assert!(parse_log_date(raw).is_none(), "{raw}");
        }
    }
}
