use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full-time status code from the football-data provider.
pub const STATUS_FULL_TIME: &str = "FT";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FinalScore {
    pub home: i32,
    pub away: i32,
}

/// Per-match statistics the settlement evaluator consumes. Missing
/// provider stats default to zero, as the original resolver did.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MatchStats {
    pub home_corners: i32,
    pub away_corners: i32,
    pub home_yellow: i32,
    pub home_red: i32,
    pub away_yellow: i32,
    pub away_red: i32,
}

impl MatchStats {
    pub fn total_corners(&self) -> i32 {
        self.home_corners + self.away_corners
    }

    pub fn total_cards(&self) -> i32 {
        self.home_yellow + self.home_red + self.away_yellow + self.away_red
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct MatchRow {
    pub id: i64,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub kickoff: i64,
    pub status: String,
    pub home_goals: Option<i32>,
    pub away_goals: Option<i32>,
    pub home_corners: Option<i32>,
    pub away_corners: Option<i32>,
    pub home_yellow: Option<i32>,
    pub home_red: Option<i32>,
    pub away_yellow: Option<i32>,
    pub away_red: Option<i32>,
    pub markets: serde_json::Value,
    pub is_finished: bool,
    pub is_processed: bool,
}

impl MatchRow {
    pub fn stats(&self) -> MatchStats {
        MatchStats {
            home_corners: self.home_corners.unwrap_or(0),
            away_corners: self.away_corners.unwrap_or(0),
            home_yellow: self.home_yellow.unwrap_or(0),
            home_red: self.home_red.unwrap_or(0),
            away_yellow: self.away_yellow.unwrap_or(0),
            away_red: self.away_red.unwrap_or(0),
        }
    }
}

/// Provider payload accepted by the ingestion endpoint. Mirrors what
/// the external fetcher writes: identity, clock, score, stats, odds.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchIngest {
    pub fixture_id: i64,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub kickoff: i64,
    pub status: String,
    pub home_goals: Option<i32>,
    pub away_goals: Option<i32>,
    #[serde(default)]
    pub home_corners: Option<i32>,
    #[serde(default)]
    pub away_corners: Option<i32>,
    #[serde(default)]
    pub home_yellow: Option<i32>,
    #[serde(default)]
    pub home_red: Option<i32>,
    #[serde(default)]
    pub away_yellow: Option<i32>,
    #[serde(default)]
    pub away_red: Option<i32>,
    #[serde(default)]
    pub markets: Option<serde_json::Value>,
}
