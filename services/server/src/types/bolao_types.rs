use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
pub struct JoinBolaoInput {
    #[validate(range(min = 0, max = 99, message = "Home score must be between 0 and 99"))]
    pub guess_home: i32,
    #[validate(range(min = 0, max = 99, message = "Away score must be between 0 and 99"))]
    pub guess_away: i32,
}
