//! Crash game. The crash point is fixed server-side when the bet is
//! placed and is never trusted from the client; the stored value alone
//! decides whether a cash-out stands.

use crate::error::EngineError;
use crate::store::wallet;
use crate::types::cassino_types::{
    CashOutOutcome, CassinoBetPlaced, CassinoBetRow, CASSINO_CASHED_OUT, CASSINO_CRASHED,
    CASSINO_PLAYING,
};
use crate::types::wallet_types::TxType;
use log::info;
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

pub const HOUSE_EDGE: f64 = 0.03;

/// Inverse-CDF sample: most rounds crash low, rare high multipliers,
/// calibrated to the house edge. Never below 1.00.
pub fn crash_point_from(r: f64, house_edge: f64) -> f64 {
    let crash = (100.0 / (1.0 - r)).floor() / 100.0 * (1.0 - house_edge);
    crash.max(1.0)
}

pub fn sample_crash_point<R: Rng>(rng: &mut R) -> f64 {
    crash_point_from(rng.gen::<f64>(), HOUSE_EDGE)
}

pub async fn place_cassino_bet(
    pool: &PgPool,
    user_id: &str,
    stake: i64,
) -> Result<CassinoBetPlaced, EngineError> {
    if stake <= 0 {
        return Err(EngineError::Invalid("Valor da aposta inválido.".into()));
    }

    let crash_point = sample_crash_point(&mut rand::thread_rng());

    let mut tx = pool.begin().await?;

    // A stale `playing` bet from an abandoned session would lock the
    // user out; crash it before taking the new stake.
    let stale = sqlx::query(
        "UPDATE cassino_bets SET status = $1, settled_at = now()
         WHERE user_id = $2 AND status = $3",
    )
    .bind(CASSINO_CRASHED)
    .bind(user_id)
    .bind(CASSINO_PLAYING)
    .execute(&mut *tx)
    .await?;
    if stale.rows_affected() > 0 {
        info!("force-crashed {} stale cassino bet(s) for {user_id}", stale.rows_affected());
    }

    wallet::debit(&mut tx, user_id, stake, TxType::Aposta, "Jogo do Foguetinho").await?;

    let bet_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO cassino_bets (id, user_id, stake, crash_point, status)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(bet_id)
    .bind(user_id)
    .bind(stake)
    .bind(crash_point)
    .bind(CASSINO_PLAYING)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(CassinoBetPlaced {
        bet_id,
        stake,
        status: "playing",
    })
}

/// Whether a claimed cash-out multiplier beats the stored crash point.
pub fn cash_out_stands(claimed: f64, crash_point: f64) -> bool {
    claimed < crash_point
}

pub async fn cash_out_cassino(
    pool: &PgPool,
    user_id: &str,
    bet_id: Uuid,
    multiplier: f64,
) -> Result<CashOutOutcome, EngineError> {
    if multiplier < 1.0 {
        return Err(EngineError::Invalid("Multiplicador inválido.".into()));
    }

    let mut tx = pool.begin().await?;

    let bet: Option<CassinoBetRow> = sqlx::query_as(
        "SELECT id, user_id, stake, crash_point, status, winnings, cash_out_multiplier,
                created_at, settled_at
         FROM cassino_bets WHERE id = $1 AND user_id = $2 FOR UPDATE",
    )
    .bind(bet_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(bet) = bet else {
        return Err(EngineError::NotFound("Aposta não encontrada.".into()));
    };
    if bet.status != CASSINO_PLAYING {
        return Err(EngineError::Rejected(
            "Você já sacou ou o jogo acabou.".into(),
        ));
    }

    if !cash_out_stands(multiplier, bet.crash_point) {
        // The loss is a real settlement, not an error: commit it.
        sqlx::query(
            "UPDATE cassino_bets SET status = $1, settled_at = now() WHERE id = $2",
        )
        .bind(CASSINO_CRASHED)
        .bind(bet_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        return Ok(CashOutOutcome::Crashed {
            crash_point: bet.crash_point,
        });
    }

    let winnings = (bet.stake as f64 * multiplier).round() as i64;
    wallet::credit(
        &mut tx,
        user_id,
        winnings,
        TxType::Premio,
        &format!("Jogo do Foguetinho @ {multiplier:.2}x"),
    )
    .await?;

    sqlx::query(
        "UPDATE cassino_bets
         SET status = $1, winnings = $2, cash_out_multiplier = $3, settled_at = now()
         WHERE id = $4",
    )
    .bind(CASSINO_CASHED_OUT)
    .bind(winnings)
    .bind(multiplier)
    .bind(bet_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(CashOutOutcome::CashedOut {
        winnings,
        multiplier,
    })
}

/// Last crash points for the lobby ticker, oldest first.
pub async fn get_recent_crashes(pool: &PgPool, limit: i64) -> Result<Vec<f64>, EngineError> {
    let mut points: Vec<f64> = sqlx::query_scalar(
        "SELECT crash_point FROM cassino_bets
         WHERE status <> $1 AND settled_at IS NOT NULL
         ORDER BY settled_at DESC LIMIT $2",
    )
    .bind(CASSINO_PLAYING)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    points.reverse();
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn crash_point_never_below_one() {
        for r in [0.0, 0.01, 0.5, 0.9, 0.999] {
            assert!(crash_point_from(r, HOUSE_EDGE) >= 1.0, "r = {r}");
        }
    }

    #[test]
    fn low_r_crashes_immediately() {
        // r = 0 -> floor(100/1)/100 * 0.97 = 0.97, clamped to 1.00.
        assert_eq!(crash_point_from(0.0, HOUSE_EDGE), 1.0);
    }

    #[test]
    fn high_r_gives_high_multiplier() {
        let cp = crash_point_from(0.99, HOUSE_EDGE);
        assert!(cp > 90.0, "got {cp}");
    }

    #[test]
    fn house_edge_shaves_the_multiplier() {
        let fair = crash_point_from(0.5, 0.0);
        let edged = crash_point_from(0.5, HOUSE_EDGE);
        assert!(edged < fair);
    }

    #[test]
    fn sampled_points_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let cp = sample_crash_point(&mut rng);
            assert!(cp >= 1.0);
            assert!(cp.is_finite());
        }
    }

    #[test]
    fn cash_out_at_or_above_crash_point_never_stands() {
        assert!(!cash_out_stands(2.0, 2.0));
        assert!(!cash_out_stands(5.0, 2.0));
        assert!(cash_out_stands(1.99, 2.0));
    }
}
