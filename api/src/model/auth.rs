use garde::Validate;
use kernel::model::{auth::AccessToken, id::UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[garde(required, email)]
    pub email: Option<String>,
    #[garde(required, length(min = 1))]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user_id: UserId,
}

impl AccessTokenResponse {
    pub fn new(user_id: UserId, access_token: AccessToken) -> Self {
        Self {
            access_token: access_token.0,
            token_type: "Bearer",
            user_id,
        }
    }
}
