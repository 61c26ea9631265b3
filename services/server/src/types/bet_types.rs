use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Serialize, Debug)]
pub struct BetLegInput {
    pub match_id: i64,
    pub market_name: String,
    pub selection: String,
    pub odd_value: f64,
}

#[derive(Deserialize, Validate, Debug)]
pub struct PlaceBetInput {
    #[validate(range(min = 1, message = "Stake must be greater than 0"))]
    pub stake: i64,
    #[validate(length(min = 1, message = "At least one selection is required"))]
    pub selections: Vec<BetLegInput>,
}
