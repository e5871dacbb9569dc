// Token acquisition failures abort authenticated calls before the network
// and reach the caller unchanged.

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::dispatch::sink::Json;
    use crate::error::error_result::{ErrorKind, ErrorResult};
    use crate::model::user::UserVersion;
    use crate::tests::common::{
        handle_with, json, ok_json, KeyedBody, RecordingTransport, ScriptedTokens, KEYED_ROUTER,
    };

    fn token_error() -> ErrorResult {
        ErrorResult::token("invalid_client").with_status(401)
    }

    #[tokio::test]
    async fn token_failure_makes_no_network_call() {
        let transport = Arc::new(RecordingTransport::replying(|_| ok_json(json!({}))));
        let handle = handle_with(true, transport.clone(), Arc::new(ScriptedTokens::failing(token_error())));

        let err = handle.get_user("u1").await.unwrap_err();
        assert_eq!(err, token_error());

        let err = handle
            .token_post::<Json<UserVersion>, _>(KEYED_ROUTER, &KeyedBody::new("fp", 60))
            .await
            .unwrap_err();
        assert_eq!(err, token_error());
        assert_eq!(err.kind, ErrorKind::Token);

        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn cache_hit_does_not_need_a_token() {
        let transport = Arc::new(RecordingTransport::replying(|_| ok_json(json!({"Version": 2}))));
        let tokens = Arc::new(ScriptedTokens::ok("t"));
        let handle = handle_with(true, transport.clone(), tokens.clone());
        let body = KeyedBody::new("fp-token", 60);

        handle.token_post::<Json<UserVersion>, _>(KEYED_ROUTER, &body).await.unwrap();
        handle.token_post::<Json<UserVersion>, _>(KEYED_ROUTER, &body).await.unwrap();

        assert_eq!(tokens.calls(), 1);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn token_operations_pass_provider_results_through() {
        let transport = Arc::new(RecordingTransport::replying(|_| ok_json(json!({}))));
        let handle = handle_with(false, transport.clone(), Arc::new(ScriptedTokens::ok("svc-token")));
        assert_eq!(handle.get_token().await.unwrap(), "svc-token");
        assert_eq!(handle.force_get_token().await.unwrap(), "svc-token");

        let handle = handle_with(false, transport.clone(), Arc::new(ScriptedTokens::failing(token_error())));
        assert_eq!(handle.get_token().await.unwrap_err(), token_error());
        assert_eq!(handle.force_get_token().await.unwrap_err(), token_error());
        assert_eq!(transport.calls(), 0);
    }
}
