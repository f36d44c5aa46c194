use std::sync::Arc;

use jsonwebtoken::{EncodingKey, Header, encode};
use speakeasy_dev::config::{SessionConfig, TokenStorageKind};
use speakeasy_dev::session::{
    ApiClient, Claims, FileTokenStore, Identity, MemoryTokenStore, Session, TokenStore,
    token_store_for,
};

fn issue_token(email: &str, name: &str, user_id: i64) -> String {
    encode(
        &Header::default(),
        &Claims {
            sub: email.to_string(),
            name: name.to_string(),
            user_id,
            exp: Some(chrono::Utc::now().timestamp() + 3600),
            iat: None,
        },
        &EncodingKey::from_secret(b"integration-secret"),
    )
    .unwrap()
}

fn temp_token_path(tag: &str) -> std::path::PathBuf {
    std::env::temp_dir()
        .join("speakeasy-session-tests")
        .join(format!("{tag}-{}", std::process::id()))
}

#[tokio::test]
async fn restore_on_fresh_install_is_unauthenticated() {
    let session = Session::new(Arc::new(MemoryTokenStore::new()));

    assert!(session.restore().await.unwrap().is_none());
    assert!(!session.is_authenticated().await);
    assert!(session.current_identity().await.is_none());
}

#[tokio::test]
async fn login_then_restore_yields_the_same_identity() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let token = issue_token("red@example.com", "Red Ruby", 1);

    let session = Session::new(store.clone());
    session
        .login(
            Identity {
                email: "red@example.com".to_string(),
                name: "Red Ruby".to_string(),
                user_id: 1,
            },
            &token,
        )
        .await
        .unwrap();
    assert!(session.is_authenticated().await);

    // A new session over the same store simulates an app restart.
    let restarted = Session::new(store);
    let identity = restarted.restore().await.unwrap().expect("no identity");
    assert_eq!(identity.email, "red@example.com");
    assert_eq!(identity.name, "Red Ruby");
    assert_eq!(identity.user_id, 1);
}

#[tokio::test]
async fn logout_is_final_across_restarts() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let token = issue_token("red@example.com", "Red Ruby", 1);

    let session = Session::new(store.clone());
    session
        .login(
            Identity {
                email: "red@example.com".to_string(),
                name: "Red Ruby".to_string(),
                user_id: 1,
            },
            &token,
        )
        .await
        .unwrap();
    session.logout().await.unwrap();

    assert!(!session.is_authenticated().await);
    assert!(store.load().await.unwrap().is_none());

    let restarted = Session::new(store);
    assert!(restarted.restore().await.unwrap().is_none());
}

#[tokio::test]
async fn malformed_stored_token_is_discarded_not_surfaced() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    store.save("corrupted-blob").await.unwrap();

    let session = Session::new(store.clone());
    assert!(session.restore().await.unwrap().is_none());

    // The bad token must also be gone from storage.
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn expired_stored_token_is_discarded_on_restore() {
    let stale = encode(
        &Header::default(),
        &Claims {
            sub: "blue@example.com".to_string(),
            name: "Blue Sapphire".to_string(),
            user_id: 2,
            exp: Some(chrono::Utc::now().timestamp() - 7200),
            iat: None,
        },
        &EncodingKey::from_secret(b"integration-secret"),
    )
    .unwrap();

    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    store.save(&stale).await.unwrap();

    let session = Session::new(store.clone());
    assert!(session.restore().await.unwrap().is_none());
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn file_store_round_trips_across_instances() {
    let path = temp_token_path("roundtrip");
    let token = issue_token("green@example.com", "Green Emerald", 3);

    let store = FileTokenStore::new(path.clone());
    store.save(&token).await.unwrap();

    // A second instance over the same path sees the persisted token.
    let reopened = FileTokenStore::new(path.clone());
    assert_eq!(reopened.load().await.unwrap().as_deref(), Some(&*token));

    reopened.clear().await.unwrap();
    assert!(reopened.load().await.unwrap().is_none());

    // Clearing twice is a no-op, not an error.
    reopened.clear().await.unwrap();
}

#[tokio::test]
async fn api_client_attaches_bearer_only_when_token_stored() {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let client = ApiClient::new(&SessionConfig::default(), store.clone()).unwrap();

    // No stored token: the header is omitted, not sent empty.
    let request = client.get("/bookings").await.unwrap().build().unwrap();
    assert!(request.headers().get("authorization").is_none());
    assert_eq!(
        request.headers().get("content-type").unwrap(),
        "application/json"
    );

    // The token is read fresh per request, so a login between calls takes
    // effect without rebuilding the client.
    store.save("tok123").await.unwrap();
    let request = client.get("/bookings").await.unwrap().build().unwrap();
    assert_eq!(
        request.headers().get("authorization").unwrap(),
        "Bearer tok123"
    );

    // And a logout removes it again.
    store.clear().await.unwrap();
    let request = client.post("/bookings").await.unwrap().build().unwrap();
    assert!(request.headers().get("authorization").is_none());
}

#[tokio::test]
async fn config_selects_the_storage_variant() {
    let memory = token_store_for(&SessionConfig {
        storage: TokenStorageKind::Memory,
        ..SessionConfig::default()
    })
    .unwrap();
    assert!(memory.load().await.unwrap().is_none());

    let path = temp_token_path("configured");
    let file = token_store_for(&SessionConfig {
        storage: TokenStorageKind::File,
        token_path: Some(path.clone()),
        ..SessionConfig::default()
    })
    .unwrap();

    file.save("configured-token").await.unwrap();
    assert_eq!(
        file.load().await.unwrap().as_deref(),
        Some("configured-token")
    );
    file.clear().await.unwrap();
}
