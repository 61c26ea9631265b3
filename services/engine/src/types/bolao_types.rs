use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const BOLAO_ABERTO: &str = "Aberto";
pub const BOLAO_CANCELADO: &str = "Cancelado";

/// Default entry fee in centavos (R$ 5,00).
pub const DEFAULT_ENTRY_FEE: i64 = 500;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BolaoRow {
    pub id: Uuid,
    pub match_id: i64,
    pub entry_fee: i64,
    pub prize_pool: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BolaoParticipant {
    pub bolao_id: Uuid,
    pub user_id: String,
    pub guess_home: i32,
    pub guess_away: i32,
    pub guessed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Bolao {
    #[serde(flatten)]
    pub bolao: BolaoRow,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub participants: Vec<BolaoParticipant>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScoreGuess {
    pub home: i32,
    pub away: i32,
}
