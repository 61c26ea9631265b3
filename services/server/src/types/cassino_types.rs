use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
pub struct CassinoBetInput {
    #[validate(range(min = 1, message = "Stake must be greater than 0"))]
    pub stake: i64,
}

#[derive(Deserialize, Validate, Debug)]
pub struct CashOutInput {
    #[validate(range(min = 1.0, message = "Multiplier must be at least 1.00"))]
    pub multiplier: f64,
}
