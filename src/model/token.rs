use serde::{Deserialize, Serialize};

/// Access token issued to this service (client credentials grant).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenRecord {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
    pub scope: String,
}

/// Token issued to an end user (password / refresh grants).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserTokenInfo {
    pub access_token: String,
    pub token_type: String,
    #[serde(rename = "expires_in")]
    pub expires: i64,
    pub refresh_token: String,
    pub scope: String,
    pub user_id: String,
}
