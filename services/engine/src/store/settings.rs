//! Rotating API-key pool for the football-data provider. Callers get
//! the least-used key for the day; usage counters reset daily.

use crate::error::EngineError;
use sqlx::PgPool;

/// Per-key daily request ceiling at the provider.
pub const DAILY_KEY_LIMIT: i64 = 100;

/// Picks the least-used key, resetting stale counters first, and
/// increments its usage. Returns `None` when every key is exhausted.
pub async fn next_api_key(pool: &PgPool) -> Result<Option<String>, EngineError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE api_keys SET usage = 0, last_reset = now()
         WHERE last_reset::date < now()::date",
    )
    .execute(&mut *tx)
    .await?;

    let picked: Option<(String, String)> = sqlx::query_as(
        "SELECT id, api_key FROM api_keys WHERE usage < $1
         ORDER BY usage ASC LIMIT 1 FOR UPDATE",
    )
    .bind(DAILY_KEY_LIMIT)
    .fetch_optional(&mut *tx)
    .await?;

    let Some((id, api_key)) = picked else {
        tx.commit().await?;
        return Ok(None);
    };

    sqlx::query("UPDATE api_keys SET usage = usage + 1 WHERE id = $1")
        .bind(&id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(Some(api_key))
}
