use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
pub struct PurchaseInput {
    #[validate(length(min = 1, message = "Item ID is required"))]
    pub item_id: String,
}

#[derive(Deserialize, Validate, Debug)]
pub struct RedeemInput {
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
}
