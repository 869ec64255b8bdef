//! Unit tests for mock session store implementation

use std::sync::Arc;

use chrono::Duration;

use crate::domain::entities::identity::Identity;
use crate::errors::SessionError;
use crate::repositories::session::{MockSessionStore, SessionStore};
use crate::services::token::{ManualClock, TokenService, TokenServiceConfig};

#[tokio::test]
async fn test_save_load_clear() {
    let store = MockSessionStore::new();
    assert_eq!(store.load().await.unwrap(), None);

    store.save("abc.def.ghi").await.unwrap();
    assert_eq!(store.load().await.unwrap().as_deref(), Some("abc.def.ghi"));

    store.save("jkl.mno.pqr").await.unwrap();
    assert_eq!(store.load().await.unwrap().as_deref(), Some("jkl.mno.pqr"));

    store.clear().await.unwrap();
    assert_eq!(store.load().await.unwrap(), None);

    // Clearing twice is fine
    store.clear().await.unwrap();
}

#[tokio::test]
async fn test_failed_write_keeps_previous_token() {
    let store = MockSessionStore::new();
    store.save("first").await.unwrap();

    store.set_fail_writes(true);
    assert!(matches!(store.save("second").await, Err(SessionError::Storage(_))));
    assert!(store.clear().await.is_err());

    assert_eq!(store.load().await.unwrap().as_deref(), Some("first"));
}

#[tokio::test]
async fn test_stored_token_still_verifies() {
    let clock = Arc::new(ManualClock::starting_now());
    let service =
        TokenService::with_clock(TokenServiceConfig::new("s3cr3t", 1), clock.clone()).unwrap();
    let store: Box<dyn SessionStore> = Box::new(MockSessionStore::new());

    let token = service.issue(&Identity::new(42, "alice", "alice@x.com")).unwrap();
    store.save(&token).await.unwrap();

    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(service.verify(&loaded).unwrap().user_id, 42);

    // The store keeps the token verbatim; expiry is decided by the service
    clock.advance(Duration::hours(2));
    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded, token);
    assert!(service.verify(&loaded).unwrap_err().is_expired());
}
