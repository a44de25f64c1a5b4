mod common;

use async_trait::async_trait;
use axum_test::TestServer;
use locallinks::infrastructure::cache::{CacheResult, CacheService};
use locallinks::routes::router;
use locallinks::server::{Repositories, build_state};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;

/// Cache that stores nothing and counts invalidations.
#[derive(Default)]
struct CountingCache {
    invalidations: AtomicUsize,
}

#[async_trait]
impl CacheService for CountingCache {
    async fn get_profile(&self, _slug: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_profile(
        &self,
        _slug: &str,
        _profile_json: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _slug: &str) -> CacheResult<()> {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

fn make_server(cache: Arc<CountingCache>) -> TestServer {
    let (tx, _rx) = mpsc::channel(100);
    let state = build_state(&common::test_config(), &Repositories::memory(), cache, tx);
    TestServer::new(router(state, false)).unwrap()
}

#[tokio::test]
async fn test_reorder_invalidates_profile_only_when_order_changes() {
    let cache = Arc::new(CountingCache::default());
    let server = make_server(cache.clone());
    let token = common::signup(&server, "corner-cafe").await;
    let a = common::add_link(&server, &token, "A", "https://a.example").await;
    let b = common::add_link(&server, &token, "B", "https://b.example").await;
    let before = cache.invalidations.load(Ordering::SeqCst);

    for (source_id, target_id) in [(a, a), (a, 999)] {
        server
            .post("/api/links/reorder")
            .add_header("Authorization", common::bearer(&token))
            .json(&json!({ "source_id": source_id, "target_id": target_id }))
            .await
            .assert_status_ok();
    }
    assert_eq!(cache.invalidations.load(Ordering::SeqCst), before);

    server
        .post("/api/links/reorder")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "source_id": b, "target_id": a }))
        .await
        .assert_status_ok();
    assert_eq!(cache.invalidations.load(Ordering::SeqCst), before + 1);
}
