use serde::{Deserialize, Serialize};

/// Legacy `/oauth2/verify` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyTokenResponse {
    pub user_id: String,
    pub client_id: String,
    pub expires_in: i64,
}

/// Extended `/oauth2/verify/v2` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyTokenInfo {
    pub user_id: String,
    pub business_id: String,
    pub user_code: String,
    pub client_id: String,
    pub expires_in: i64,
    pub service_code: String,
    pub service_addr: String,
}

/// What the verification cache remembers about a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifiedIdentity {
    Subject { user_id: String, client_id: String },
    Detailed(VerifyTokenInfo),
}
