use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use classdesk_core::serde::deserialize_optional_trimmed;

use crate::accounts::Account;

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    #[schema(example = "jdoe")]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: Account,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub user: Account,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
