use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_EM_ABERTO: &str = "Em Aberto";
pub const STATUS_GANHA: &str = "Ganha";
pub const STATUS_PERDIDA: &str = "Perdida";
pub const STATUS_ANULADA: &str = "Anulada";

/// Terminal verdict for a single selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionResult {
    Ganha,
    Perdida,
    Anulada,
}

impl SelectionResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionResult::Ganha => STATUS_GANHA,
            SelectionResult::Perdida => STATUS_PERDIDA,
            SelectionResult::Anulada => STATUS_ANULADA,
        }
    }
}

/// Overall status of a placed bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetStatus {
    EmAberto,
    Ganha,
    Perdida,
}

impl BetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetStatus::EmAberto => STATUS_EM_ABERTO,
            BetStatus::Ganha => STATUS_GANHA,
            BetStatus::Perdida => STATUS_PERDIDA,
        }
    }
}

/// One leg of a bet as persisted. `status` is one of the STATUS_*
/// strings; selections start `Em Aberto` and are mutated in place by
/// the resolver, never deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BetSelection {
    pub id: Uuid,
    pub bet_id: Uuid,
    pub match_id: i64,
    pub market_name: String,
    pub selection: String,
    pub odd_value: f64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BetRow {
    pub id: Uuid,
    pub user_id: String,
    pub stake: i64,
    pub potential_winnings: i64,
    pub total_odds: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacedBet {
    #[serde(flatten)]
    pub bet: BetRow,
    pub selections: Vec<BetSelection>,
}

/// A leg as submitted by the client when placing a bet.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectionInput {
    pub match_id: i64,
    pub market_name: String,
    pub selection: String,
    pub odd_value: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserStats {
    pub total_bets: i64,
    pub total_wagered: i64,
    pub total_winnings: i64,
    pub total_losses: i64,
    pub bets_won: i64,
    pub bets_lost: i64,
}
