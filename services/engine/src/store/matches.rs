//! Match catalog: provider payload ingestion and public listings. The
//! external fetcher (or an admin) upserts fixtures here; nothing in
//! this module touches wallets or bets.

use crate::error::EngineError;
use crate::types::match_types::{MatchIngest, MatchRow};
use sqlx::PgPool;

/// Upserts a fixture from a provider payload. Score and statistics
/// only ever move forward; a processed match is left alone so a late
/// provider replay cannot un-settle it.
pub async fn ingest_match(pool: &PgPool, payload: &MatchIngest) -> Result<(), EngineError> {
    if payload.home_team.trim().is_empty() || payload.away_team.trim().is_empty() {
        return Err(EngineError::Invalid("Dados da partida incompletos.".into()));
    }

    sqlx::query(
        "INSERT INTO matches
             (id, home_team, away_team, league, kickoff, status, home_goals, away_goals,
              home_corners, away_corners, home_yellow, home_red, away_yellow, away_red, markets)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
         ON CONFLICT (id) DO UPDATE SET
             status = EXCLUDED.status,
             home_goals = EXCLUDED.home_goals,
             away_goals = EXCLUDED.away_goals,
             home_corners = EXCLUDED.home_corners,
             away_corners = EXCLUDED.away_corners,
             home_yellow = EXCLUDED.home_yellow,
             home_red = EXCLUDED.home_red,
             away_yellow = EXCLUDED.away_yellow,
             away_red = EXCLUDED.away_red,
             markets = EXCLUDED.markets
         WHERE matches.is_processed = FALSE",
    )
    .bind(payload.fixture_id)
    .bind(&payload.home_team)
    .bind(&payload.away_team)
    .bind(&payload.league)
    .bind(payload.kickoff)
    .bind(&payload.status)
    .bind(payload.home_goals)
    .bind(payload.away_goals)
    .bind(payload.home_corners)
    .bind(payload.away_corners)
    .bind(payload.home_yellow)
    .bind(payload.home_red)
    .bind(payload.away_yellow)
    .bind(payload.away_red)
    .bind(payload.markets.clone().unwrap_or_else(|| serde_json::json!([])))
    .execute(pool)
    .await?;

    Ok(())
}

/// Upcoming, not-yet-finished fixtures with their odds markets.
pub async fn list_open_matches(pool: &PgPool) -> Result<Vec<MatchRow>, EngineError> {
    let rows: Vec<MatchRow> = sqlx::query_as(
        "SELECT id, home_team, away_team, league, kickoff, status, home_goals, away_goals,
                home_corners, away_corners, home_yellow, home_red, away_yellow, away_red,
                markets, is_finished, is_processed
         FROM matches WHERE is_finished = FALSE ORDER BY kickoff ASC LIMIT 100",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_match(pool: &PgPool, fixture_id: i64) -> Result<Option<MatchRow>, EngineError> {
    let row: Option<MatchRow> = sqlx::query_as(
        "SELECT id, home_team, away_team, league, kickoff, status, home_goals, away_goals,
                home_corners, away_corners, home_yellow, home_red, away_yellow, away_red,
                markets, is_finished, is_processed
         FROM matches WHERE id = $1",
    )
    .bind(fixture_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
