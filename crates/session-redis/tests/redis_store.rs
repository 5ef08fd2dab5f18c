//! End-to-end tests against a running Redis server.
//!
//! Ignored by default; run with a local server via:
//! `REDIS_URL=redis://127.0.0.1:6379 cargo test -p session-redis -- --ignored`

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use session_core::{Session, SessionError, SessionStore};
use session_redis::{connection::create_pool, RedisSessionStore};

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

fn store() -> RedisSessionStore {
    let pool = create_pool(&redis_url(), 4).expect("pool config");
    RedisSessionStore::new(pool).with_expiration(Duration::from_secs(30))
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

async fn ttl_of(id: &str) -> i64 {
    let pool = create_pool(&redis_url(), 1).expect("pool config");
    let mut conn = pool.get().await.expect("connection");
    redis::cmd("TTL")
        .arg(format!("sessid-{}", id))
        .query_async(&mut conn)
        .await
        .expect("TTL query")
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn generate_then_get_returns_matching_handle() {
    let store = store();
    let id = new_id();

    let generated = store.generate(&id).await.unwrap();
    assert_eq!(generated.id(), id);

    let fetched = store.get(&id).await.unwrap();
    assert_eq!(fetched.id(), id);

    store.remove(&id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn get_after_remove_is_not_found() {
    let store = store();
    let id = new_id();

    store.generate(&id).await.unwrap();
    store.remove(&id).await.unwrap();

    let err = store.get(&id).await.err().unwrap();
    assert!(err.is_not_found());

    // Removing again is still fine.
    store.remove(&id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn set_stores_the_caller_value() {
    let store = store();
    let id = new_id();

    let session = store.generate(&id).await.unwrap();
    session.set("color", "v1").await.unwrap();
    assert_eq!(session.get("color").await.unwrap(), "v1");

    session.set("color", "v2").await.unwrap();
    assert_eq!(session.get("color").await.unwrap(), "v2");

    let err = session.get("missing-field").await.unwrap_err();
    assert!(matches!(err, SessionError::FieldNotFound(f) if f == "missing-field"));

    store.remove(&id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn set_after_remove_is_session_not_found() {
    let store = store();
    let id = new_id();

    let session = store.generate(&id).await.unwrap();
    store.remove(&id).await.unwrap();

    let err = session.set("color", "v1").await.unwrap_err();
    assert!(err.is_not_found());

    // The gated write must not have recreated the record.
    assert!(store.get(&id).await.err().unwrap().is_not_found());
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn refresh_missing_is_not_found() {
    let store = store();
    let err = store.refresh(&new_id()).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn refresh_resets_ttl_and_keeps_attributes() {
    let store = store();
    let id = new_id();

    let session = store.generate(&id).await.unwrap();
    session.set("color", "v1").await.unwrap();

    // Shrink the TTL out-of-band, then refresh back to the configured 30s.
    let pool = create_pool(&redis_url(), 1).unwrap();
    let mut conn = pool.get().await.unwrap();
    let _: bool = redis::cmd("EXPIRE")
        .arg(format!("sessid-{}", id))
        .arg(5)
        .query_async(&mut conn)
        .await
        .unwrap();
    assert!(ttl_of(&id).await <= 5);

    store.refresh(&id).await.unwrap();
    assert!(ttl_of(&id).await > 5);
    assert_eq!(session.get("color").await.unwrap(), "v1");

    store.remove(&id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Redis"]
async fn concurrent_sets_never_resurrect_a_removed_record() {
    let store = store();
    let id = new_id();

    let session = Arc::new(store.generate(&id).await.unwrap());

    let mut writers = Vec::new();
    for i in 0..16 {
        let session = Arc::clone(&session);
        writers.push(tokio::spawn(
            async move { session.set("n", &i.to_string()).await },
        ));
    }
    store.remove(&id).await.unwrap();
    for writer in writers {
        match writer.await.unwrap() {
            Ok(()) => {}
            Err(err) => assert!(err.is_not_found()),
        }
    }

    // Writers that lost the race must not have recreated the hash.
    assert!(store.get(&id).await.err().unwrap().is_not_found());
}
