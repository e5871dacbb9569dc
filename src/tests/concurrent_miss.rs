// Parallel callers racing on one cold cache key: no collapsing of in-flight
// requests, every caller gets a valid result and the cache ends up holding one.

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::dispatch::sink::Json;
    use crate::model::user::UserVersion;
    use crate::tests::common::{
        handle_with, json, ok_json, KeyedBody, RecordingTransport, ScriptedTokens, KEYED_ROUTER,
    };

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_misses_each_reach_the_network() {
        let sequence = Arc::new(AtomicUsize::new(0));
        let sequence_clone = sequence.clone();
        let transport = Arc::new(
            RecordingTransport::replying(move |_| {
                let n = sequence_clone.fetch_add(1, Ordering::SeqCst) as i32;
                ok_json(json!({"ClearAuth": 0, "Version": n, "Activate": 0}))
            })
            .with_delay(Duration::from_millis(50)),
        );
        let handle = handle_with(true, transport.clone(), Arc::new(ScriptedTokens::ok("t")));

        let mut tasks = Vec::new();
        for _ in 0..50 {
            let handle = handle.clone();
            tasks.push(tokio::spawn(async move {
                handle
                    .token_post::<Json<UserVersion>, _>(KEYED_ROUTER, &KeyedBody::new("fp-shared", 60))
                    .await
            }));
        }

        let mut versions = Vec::new();
        for task in tasks {
            versions.push(task.await.unwrap().unwrap().version);
        }

        let calls = transport.calls();
        assert!(calls >= 1 && calls <= 50);
        assert!(versions.iter().all(|v| (*v as usize) < calls));

        let cached = handle.router_cache.as_ref().unwrap().get("fp-shared").await.unwrap();
        let cached: UserVersion = serde_json::from_slice(&cached).unwrap();
        assert!((cached.version as usize) < calls);

        // warm now: no new network calls
        handle
            .token_post::<Json<UserVersion>, _>(KEYED_ROUTER, &KeyedBody::new("fp-shared", 60))
            .await
            .unwrap();
        assert_eq!(transport.calls(), calls);
    }
}
