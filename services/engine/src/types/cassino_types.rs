use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const CASSINO_PLAYING: &str = "playing";
pub const CASSINO_CASHED_OUT: &str = "cashed_out";
pub const CASSINO_CRASHED: &str = "crashed";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CassinoBetRow {
    pub id: Uuid,
    pub user_id: String,
    pub stake: i64,
    pub crash_point: f64,
    pub status: String,
    pub winnings: Option<i64>,
    pub cash_out_multiplier: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

/// What the client is told after placing a bet. The crash point stays
/// server-side until the round is over.
#[derive(Debug, Clone, Serialize)]
pub struct CassinoBetPlaced {
    pub bet_id: Uuid,
    pub stake: i64,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CashOutOutcome {
    /// Cashed out below the crash point; winnings already credited.
    CashedOut { winnings: i64, multiplier: f64 },
    /// Claimed multiplier reached the crash point first; stake lost.
    Crashed { crash_point: f64 },
}
