//! Bet placement and read models, plus the pure parlay arithmetic the
//! resolver shares.

use crate::error::EngineError;
use crate::store::wallet;
use crate::types::bet_types::{
    BetRow, BetSelection, BetStatus, PlacedBet, SelectionInput, UserStats, STATUS_ANULADA,
    STATUS_EM_ABERTO, STATUS_GANHA, STATUS_PERDIDA,
};
use crate::types::wallet_types::TxType;
use sqlx::PgPool;
use uuid::Uuid;

/// Combined verdict for a set of selections. `None` while any leg is
/// still open. A single lost leg loses the bet; otherwise the bet wins
/// and void legs are excluded from the payout product.
pub fn combined_outcome(selections: &[(String, f64)]) -> Option<(BetStatus, f64)> {
    if selections
        .iter()
        .any(|(status, _)| status == STATUS_EM_ABERTO)
    {
        return None;
    }
    if selections.iter().any(|(status, _)| status == STATUS_PERDIDA) {
        return Some((BetStatus::Perdida, 0.0));
    }
    let odds = selections
        .iter()
        .map(|(status, odd)| if status == STATUS_ANULADA { 1.0 } else { *odd })
        .product();
    Some((BetStatus::Ganha, odds))
}

/// Payout in centavos, rounded to the nearest centavo.
pub fn winnings_for(stake: i64, odds: f64) -> i64 {
    (stake as f64 * odds).round() as i64
}

pub async fn place_bet(
    pool: &PgPool,
    user_id: &str,
    selections: &[SelectionInput],
    stake: i64,
) -> Result<PlacedBet, EngineError> {
    if selections.is_empty() || stake <= 0 {
        return Err(EngineError::Invalid("Aposta inválida.".into()));
    }
    if selections.iter().any(|s| s.odd_value < 1.0) {
        return Err(EngineError::Invalid("Cotação inválida.".into()));
    }

    let total_odds: f64 = selections.iter().map(|s| s.odd_value).product();
    let potential_winnings = winnings_for(stake, total_odds);
    let description = if selections.len() > 1 {
        format!("Múltipla ({} seleções)", selections.len())
    } else {
        format!(
            "{} - {}",
            selections[0].market_name, selections[0].selection
        )
    };

    let mut tx = pool.begin().await?;

    wallet::debit(&mut tx, user_id, stake, TxType::Aposta, &description).await?;

    let bet_id = Uuid::new_v4();
    let bet: BetRow = sqlx::query_as(
        "INSERT INTO bets (id, user_id, stake, potential_winnings, total_odds, status)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, user_id, stake, potential_winnings, total_odds, status, created_at, settled_at",
    )
    .bind(bet_id)
    .bind(user_id)
    .bind(stake)
    .bind(potential_winnings)
    .bind(total_odds)
    .bind(BetStatus::EmAberto.as_str())
    .fetch_one(&mut *tx)
    .await?;

    let mut rows = Vec::with_capacity(selections.len());
    for sel in selections {
        let row: BetSelection = sqlx::query_as(
            "INSERT INTO bet_selections (id, bet_id, match_id, market_name, selection, odd_value, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, bet_id, match_id, market_name, selection, odd_value, status",
        )
        .bind(Uuid::new_v4())
        .bind(bet_id)
        .bind(sel.match_id)
        .bind(&sel.market_name)
        .bind(&sel.selection)
        .bind(sel.odd_value)
        .bind(STATUS_EM_ABERTO)
        .fetch_one(&mut *tx)
        .await?;
        rows.push(row);
    }

    tx.commit().await?;

    Ok(PlacedBet {
        bet,
        selections: rows,
    })
}

pub async fn get_user_bets(pool: &PgPool, user_id: &str) -> Result<Vec<PlacedBet>, EngineError> {
    let bets: Vec<BetRow> = sqlx::query_as(
        "SELECT id, user_id, stake, potential_winnings, total_odds, status, created_at, settled_at
         FROM bets WHERE user_id = $1 ORDER BY created_at DESC LIMIT 100",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut out = Vec::with_capacity(bets.len());
    for bet in bets {
        let selections: Vec<BetSelection> = sqlx::query_as(
            "SELECT id, bet_id, match_id, market_name, selection, odd_value, status
             FROM bet_selections WHERE bet_id = $1",
        )
        .bind(bet.id)
        .fetch_all(pool)
        .await?;
        out.push(PlacedBet { bet, selections });
    }
    Ok(out)
}

pub async fn get_user_stats(pool: &PgPool, user_id: &str) -> Result<UserStats, EngineError> {
    let row: (i64, Option<i64>, Option<i64>, Option<i64>, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*),
                SUM(stake),
                SUM(potential_winnings) FILTER (WHERE status = $2),
                SUM(stake) FILTER (WHERE status = $3),
                COUNT(*) FILTER (WHERE status = $2),
                COUNT(*) FILTER (WHERE status = $3)
         FROM bets WHERE user_id = $1",
    )
    .bind(user_id)
    .bind(STATUS_GANHA)
    .bind(STATUS_PERDIDA)
    .fetch_one(pool)
    .await?;

    Ok(UserStats {
        total_bets: row.0,
        total_wagered: row.1.unwrap_or(0),
        total_winnings: row.2.unwrap_or(0),
        total_losses: row.3.unwrap_or(0),
        bets_won: row.4,
        bets_lost: row.5,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(status: &str, odd: f64) -> (String, f64) {
        (status.to_string(), odd)
    }

    #[test]
    fn open_leg_keeps_bet_open() {
        let legs = vec![leg(STATUS_GANHA, 2.0), leg(STATUS_EM_ABERTO, 1.5)];
        assert!(combined_outcome(&legs).is_none());
    }

    #[test]
    fn any_lost_leg_loses_the_bet() {
        let legs = vec![
            leg(STATUS_GANHA, 2.0),
            leg(STATUS_PERDIDA, 1.5),
            leg(STATUS_ANULADA, 3.0),
        ];
        assert_eq!(combined_outcome(&legs), Some((BetStatus::Perdida, 0.0)));
    }

    #[test]
    fn void_legs_multiply_as_one() {
        let legs = vec![leg(STATUS_GANHA, 2.0), leg(STATUS_ANULADA, 3.0)];
        let (status, odds) = combined_outcome(&legs).unwrap();
        assert_eq!(status, BetStatus::Ganha);
        assert!((odds - 2.0).abs() < 1e-9);
        assert_eq!(winnings_for(1000, odds), 2000);
    }

    #[test]
    fn all_void_pays_back_the_stake() {
        let legs = vec![leg(STATUS_ANULADA, 2.0), leg(STATUS_ANULADA, 4.0)];
        let (status, odds) = combined_outcome(&legs).unwrap();
        assert_eq!(status, BetStatus::Ganha);
        assert_eq!(winnings_for(500, odds), 500);
    }

    #[test]
    fn winnings_round_to_centavo() {
        // 333 * 1.33 = 442.89 -> 443
        assert_eq!(winnings_for(333, 1.33), 443);
    }
}
