use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use speakeasy_dev::config::Config;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    // A single connection keeps every request on the same in-memory database.
    config.database.max_connections = 1;
    config.database.min_connections = 1;

    let state = speakeasy_dev::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    speakeasy_dev::api::router(state)
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_status_reports_baseline_counts() {
    let app = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body_json = json_body(response).await;
    assert_eq!(body_json["status"], "connected");
    // Migration fixtures: three accounts, three bundles, nothing else yet.
    assert_eq!(body_json["counts"]["user_count"], 3);
    assert_eq!(body_json["counts"]["bundle_count"], 3);
    assert_eq!(body_json["counts"]["experience_count"], 0);
    assert_eq!(body_json["counts"]["booking_count"], 0);
    assert_eq!(body_json["counts"]["review_count"], 0);
}

#[tokio::test]
async fn test_seed_with_explicit_counts() {
    let app = spawn_app().await;

    let request_body = serde_json::json!({
        "userCount": 4,
        "bundleCount": 2,
        "experienceCount": 3,
        "bookingCount": 5,
        "reviewCount": 2
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/seed")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&request_body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body_json = json_body(response).await;
    assert_eq!(body_json["status"], "success");
    assert_eq!(
        body_json["message"],
        "Database seeded with 4 users, 2 bundles, 3 experiences"
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body_json = json_body(response).await;
    assert_eq!(body_json["counts"]["user_count"], 4);
    assert_eq!(body_json["counts"]["bundle_count"], 2);
    assert_eq!(body_json["counts"]["experience_count"], 3);
    assert_eq!(body_json["counts"]["booking_count"], 5);
    assert_eq!(body_json["counts"]["review_count"], 2);
}

#[tokio::test]
async fn test_seed_without_body_uses_config_defaults() {
    let app = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/seed")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body_json = json_body(response).await;
    assert_eq!(body_json["status"], "success");
    assert_eq!(
        body_json["message"],
        "Database seeded with 20 users, 10 bundles, 15 experiences"
    );
}

#[tokio::test]
async fn test_reset_restores_baseline_after_seed() {
    let app = spawn_app().await;

    let request_body = serde_json::json!({ "userCount": 8, "bookingCount": 0, "reviewCount": 0 });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/seed")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&request_body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/reset")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body_json = json_body(response).await;
    assert_eq!(body_json["status"], "success");
    assert_eq!(body_json["message"], "Database reset with baseline data");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body_json = json_body(response).await;
    assert_eq!(body_json["counts"]["user_count"], 3);
    assert_eq!(body_json["counts"]["bundle_count"], 3);
    assert_eq!(body_json["counts"]["experience_count"], 0);
}

#[tokio::test]
async fn test_create_test_user_defaults() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/seed/test-user")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body_json = json_body(response).await;
    assert_eq!(body_json["status"], "success");
    assert_eq!(body_json["message"], "Test user created");
    assert_eq!(body_json["user"]["email"], "test@example.com");
    assert_eq!(body_json["user"]["password"], "password123");
    assert!(body_json["user"]["id"].is_i64());

    // Additive: the three baseline users are still there.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body_json = json_body(response).await;
    assert_eq!(body_json["counts"]["user_count"], 4);
}

#[tokio::test]
async fn test_create_test_user_with_custom_credentials() {
    let app = spawn_app().await;

    let request_body = serde_json::json!({
        "email": "qa.runner@example.com",
        "password": "hunter2hunter2"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/seed/test-user")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&request_body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body_json = json_body(response).await;
    assert_eq!(body_json["user"]["email"], "qa.runner@example.com");
    assert_eq!(body_json["user"]["password"], "hunter2hunter2");
}
