//! End-user OAuth2 grants against `/oauth2/token`. These calls authenticate
//! with client basic auth and do not need the service token.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::Method;
use serde_json::{json, Map, Value};

use crate::authorize::handle::AuthorizeHandle;
use crate::dispatch::sink::Json;
use crate::error::error_result::ErrorResult;
use crate::model::params::PasswordRequest;
use crate::model::token::UserTokenInfo;
use crate::token::TokenProvider;
use crate::transport::Transport;
use crate::utils::constants::ROUTER_TOKEN;

/// login model used for token upgrades
const LOGIN_MODEL_UPGRADE: i32 = 9;
/// login model by phone / id card
const LOGIN_MODEL_PHONE: i32 = 1;

/// The `username` param carries the login descriptor as base64 encoded JSON.
fn encode_user_name(info: &Value) -> Result<String, ErrorResult> {
    let buf = serde_json::to_vec(info).map_err(ErrorResult::encode)?;
    Ok(STANDARD.encode(buf))
}

impl<T: Transport, P: TokenProvider> AuthorizeHandle<T, P> {
    /// Exchange a user's password for an upgraded token issued to another client.
    pub async fn get_upgrade_token(
        &self,
        password: &str,
        uid: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Map<String, Value>, ErrorResult> {
        let user_info = json!({
            "LoginModel": LOGIN_MODEL_UPGRADE,
            "UserName": uid,
            "ClientID": self.cfg.client_id,
            "ClientSecret": self.cfg.client_secret,
        });
        self.dispatcher
            .request::<Json<Map<String, Value>>, _, _>(ROUTER_TOKEN, Method::POST, |req| async move {
                Ok::<_, ErrorResult>(req
                    .basic_auth(client_id, client_secret)
                    .param("grant_type", "password")
                    .param("username", encode_user_name(&user_info)?)
                    .param("password", password))
            })
            .await
    }

    /// Password login for `service` using this client's credentials.
    pub async fn user_login_token(&self, user_name: &str, password: &str, service: &str) -> Result<UserTokenInfo, ErrorResult> {
        self.get_access_token_by_password(&PasswordRequest {
            client_id: self.cfg.client_id.clone(),
            client_secret: self.cfg.client_secret.clone(),
            login_model: LOGIN_MODEL_PHONE,
            user_name: user_name.to_owned(),
            service: service.to_owned(),
            password: password.to_owned(),
            ..Default::default()
        })
        .await
    }

    pub async fn get_access_token_by_password(&self, params: &PasswordRequest) -> Result<UserTokenInfo, ErrorResult> {
        self.dispatcher
            .request::<Json<UserTokenInfo>, _, _>(ROUTER_TOKEN, Method::POST, |req| async move {
                let info = json!({
                    "Service": params.service,
                    "LoginModel": params.login_model,
                    "UserName": params.user_name,
                    "University": params.university,
                });
                Ok::<_, ErrorResult>(req
                    .basic_auth(params.client_id.as_str(), params.client_secret.as_str())
                    .param("grant_type", "password")
                    .param("username", encode_user_name(&info)?)
                    .param("password", params.password.as_str()))
            })
            .await
    }

    pub async fn user_refresh_token(&self, refresh_token: &str) -> Result<UserTokenInfo, ErrorResult> {
        self.dispatcher
            .request::<Json<UserTokenInfo>, _, _>(ROUTER_TOKEN, Method::POST, |req| async move {
                Ok(req
                    .basic_auth(self.cfg.client_id.as_str(), self.cfg.client_secret.as_str())
                    .param("grant_type", "refresh_token")
                    .param("refresh_token", refresh_token))
            })
            .await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tests::common::{handle_with, ok_json, RecordingTransport, ScriptedTokens};
    use std::sync::Arc;

    fn decode_user_name(encoded: &str) -> Value {
        serde_json::from_slice(&STANDARD.decode(encoded).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn password_grant_encodes_login_descriptor() {
        let transport = Arc::new(RecordingTransport::replying(|_| {
            ok_json(json!({"access_token": "user-tok", "expires_in": 7200, "user_id": "u1"}))
        }));
        let tokens = Arc::new(ScriptedTokens::ok("svc"));
        let handle = handle_with(false, transport.clone(), tokens.clone());

        let info = handle.user_login_token("138000", "pw", "SVC").await.unwrap();
        assert_eq!(info.access_token, "user-tok");
        assert_eq!(info.expires, 7200);

        let request = transport.last_request().unwrap();
        assert!(request.url.ends_with(ROUTER_TOKEN));
        assert_eq!(request.basic_auth, Some(("client".to_owned(), "secret".to_owned())));
        assert_eq!(request.param_value("grant_type"), Some("password"));
        assert_eq!(request.param_value("password"), Some("pw"));
        assert!(request.json_body.is_none());
        assert_eq!(
            decode_user_name(request.param_value("username").unwrap()),
            json!({"Service": "SVC", "LoginModel": 1, "UserName": "138000", "University": ""})
        );
        // user grants never use the service token
        assert_eq!(tokens.calls(), 0);
    }

    #[tokio::test]
    async fn upgrade_token_uses_caller_client() {
        let transport = Arc::new(RecordingTransport::replying(|_| ok_json(json!({"access_token": "up"}))));
        let handle = handle_with(false, transport.clone(), Arc::new(ScriptedTokens::ok("svc")));

        let info = handle.get_upgrade_token("pw", "u1", "other", "other-secret").await.unwrap();
        assert_eq!(info["access_token"], "up");

        let request = transport.last_request().unwrap();
        assert_eq!(request.basic_auth, Some(("other".to_owned(), "other-secret".to_owned())));
        let descriptor = decode_user_name(request.param_value("username").unwrap());
        assert_eq!(descriptor["LoginModel"], 9);
        assert_eq!(descriptor["ClientID"], "client");
    }

    #[tokio::test]
    async fn refresh_grant_sends_refresh_token() {
        let transport = Arc::new(RecordingTransport::replying(|_| ok_json(json!({"access_token": "new"}))));
        let handle = handle_with(false, transport.clone(), Arc::new(ScriptedTokens::ok("svc")));

        let info = handle.user_refresh_token("r-1").await.unwrap();
        assert_eq!(info.access_token, "new");
        let request = transport.last_request().unwrap();
        assert_eq!(request.param_value("grant_type"), Some("refresh_token"));
        assert_eq!(request.param_value("refresh_token"), Some("r-1"));
    }
}
