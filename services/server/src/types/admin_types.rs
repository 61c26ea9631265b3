use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
pub struct CreateBolaoInput {
    #[validate(range(min = 1, message = "Match ID must be greater than 0"))]
    pub match_id: i64,
}

#[derive(Deserialize, Validate, Debug)]
pub struct DepositInput {
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
    #[validate(range(min = 1, message = "Amount must be greater than 0"))]
    pub amount: i64,
    pub description: Option<String>,
}
