use serde::Deserialize;
use validator::Validate;

/// Token exchange for the Discord bot and the web frontend. The caller
/// proves itself with the shared bot secret and names the Discord user
/// it acts for.
#[derive(Deserialize, Validate, Debug)]
pub struct TokenRequest {
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "User name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Bot secret is required"))]
    pub bot_secret: String,
}
