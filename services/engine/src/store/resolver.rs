//! Match resolution: flips the match to processed, re-evaluates every
//! open bet touching the fixture and credits winners, all in one
//! transaction. A failure anywhere rolls the whole fixture back; the
//! sweep below isolates failures per fixture instead.

use crate::error::EngineError;
use crate::settlement::evaluate_selection;
use crate::store::bets::{combined_outcome, winnings_for};
use crate::store::wallet;
use crate::types::bet_types::{BetRow, BetSelection, BetStatus, STATUS_EM_ABERTO};
use crate::types::match_types::{FinalScore, MatchRow, STATUS_FULL_TIME};
use crate::types::wallet_types::TxType;
use log::{error, info};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize)]
pub struct ResolveOutcome {
    pub fixture_id: i64,
    pub settled: u64,
    pub already_processed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    pub processed: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub details: Vec<String>,
}

pub async fn resolve_match(pool: &PgPool, fixture_id: i64) -> Result<ResolveOutcome, EngineError> {
    let match_row: Option<MatchRow> = sqlx::query_as(
        "SELECT id, home_team, away_team, league, kickoff, status, home_goals, away_goals,
                home_corners, away_corners, home_yellow, home_red, away_yellow, away_red,
                markets, is_finished, is_processed
         FROM matches WHERE id = $1",
    )
    .bind(fixture_id)
    .fetch_optional(pool)
    .await?;

    let Some(match_row) = match_row else {
        return Err(EngineError::NotFound(format!(
            "Partida {fixture_id} não encontrada no banco de dados."
        )));
    };

    if match_row.is_processed {
        return Ok(ResolveOutcome {
            fixture_id,
            settled: 0,
            already_processed: true,
        });
    }

    if match_row.status != STATUS_FULL_TIME {
        return Err(EngineError::Rejected(format!(
            "A partida {fixture_id} ainda não foi finalizada (Status: {}).",
            match_row.status
        )));
    }

    let (Some(home), Some(away)) = (match_row.home_goals, match_row.away_goals) else {
        return Err(EngineError::Rejected(
            "Dados de gols ausentes no documento da partida.".into(),
        ));
    };

    let score = FinalScore { home, away };
    let stats = match_row.stats();

    let mut tx = pool.begin().await?;
    let mut settled: u64 = 0;

    // The processed flag flips inside the transaction so a rollback
    // leaves the fixture eligible for a retry.
    sqlx::query("UPDATE matches SET is_processed = TRUE, is_finished = TRUE WHERE id = $1")
        .bind(fixture_id)
        .execute(&mut *tx)
        .await?;

    let open_bets: Vec<BetRow> = sqlx::query_as(
        "SELECT b.id, b.user_id, b.stake, b.potential_winnings, b.total_odds, b.status,
                b.created_at, b.settled_at
         FROM bets b
         WHERE b.status = $1
           AND EXISTS (SELECT 1 FROM bet_selections s WHERE s.bet_id = b.id AND s.match_id = $2)
         FOR UPDATE",
    )
    .bind(STATUS_EM_ABERTO)
    .bind(fixture_id)
    .fetch_all(&mut *tx)
    .await?;

    for bet in &open_bets {
        let selections: Vec<BetSelection> = sqlx::query_as(
            "SELECT id, bet_id, match_id, market_name, selection, odd_value, status
             FROM bet_selections WHERE bet_id = $1",
        )
        .bind(bet.id)
        .fetch_all(&mut *tx)
        .await?;

        // Only this fixture's legs get a verdict; legs on other,
        // still-open fixtures are left untouched.
        let mut evaluated = Vec::with_capacity(selections.len());
        for sel in &selections {
            let status = if sel.match_id == fixture_id && sel.status == STATUS_EM_ABERTO {
                let verdict =
                    evaluate_selection(&sel.market_name, &sel.selection, &score, &stats);
                sqlx::query("UPDATE bet_selections SET status = $1 WHERE id = $2")
                    .bind(verdict.as_str())
                    .bind(sel.id)
                    .execute(&mut *tx)
                    .await?;
                verdict.as_str().to_string()
            } else {
                sel.status.clone()
            };
            evaluated.push((status, sel.odd_value));
        }

        let Some((final_status, final_odds)) = combined_outcome(&evaluated) else {
            // Parlay still waiting on other fixtures; partial updates
            // above stand, bet stays open.
            continue;
        };

        let mut winnings: i64 = 0;
        if final_status == BetStatus::Ganha {
            winnings = winnings_for(bet.stake, final_odds);
            let hex = bet.id.simple().to_string();
            let short_id = &hex[..6];
            wallet::credit(
                &mut tx,
                &bet.user_id,
                winnings,
                TxType::Premio,
                &format!("Ganhos da aposta #{short_id}"),
            )
            .await?;
        }

        sqlx::query(
            "UPDATE bets SET status = $1, potential_winnings = $2, settled_at = now() WHERE id = $3",
        )
        .bind(final_status.as_str())
        .bind(winnings)
        .bind(bet.id)
        .execute(&mut *tx)
        .await?;

        settled += 1;
    }

    tx.commit().await?;

    info!("resolved fixture {fixture_id}: {settled} bets settled");
    Ok(ResolveOutcome {
        fixture_id,
        settled,
        already_processed: false,
    })
}

/// Cron-style sweep over every full-time, unprocessed fixture. Each
/// fixture resolves in its own transaction; one failure does not stop
/// the rest.
pub async fn process_all_finished_matches(pool: &PgPool) -> Result<SweepSummary, EngineError> {
    let fixture_ids: Vec<i64> = sqlx::query_scalar(
        "SELECT id FROM matches WHERE status = $1 AND is_processed = FALSE ORDER BY id",
    )
    .bind(STATUS_FULL_TIME)
    .fetch_all(pool)
    .await?;

    let mut summary = SweepSummary {
        processed: fixture_ids.len() as u64,
        succeeded: 0,
        failed: 0,
        details: Vec::new(),
    };

    for fixture_id in fixture_ids {
        match resolve_match(pool, fixture_id).await {
            Ok(outcome) => {
                summary.succeeded += 1;
                summary.details.push(format!(
                    "Partida {fixture_id} resolvida. {} apostas foram finalizadas.",
                    outcome.settled
                ));
            }
            Err(err) => {
                summary.failed += 1;
                error!("failed to resolve fixture {fixture_id}: {err}");
                summary
                    .details
                    .push(format!("Falha ao resolver a partida {fixture_id}: {err}"));
            }
        }
    }

    Ok(summary)
}
