//! HTTP surface tests: the api router in front of a fake valuation service.

use std::time::Duration;

use api::core::app_state::AppState;
use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use valuation_client::{ValuationClient, ValuationConfig};

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_api(remote_base: String, timeout: Duration) -> String {
    let cfg = ValuationConfig {
        timeout,
        ..ValuationConfig::with_base_url(remote_base)
    };
    let state = AppState::new(ValuationClient::new(cfg).unwrap());
    spawn(api::app(state)).await
}

fn fake_remote() -> Router {
    Router::new()
        .route(
            "/mcp/invoke",
            post(|Json(body): Json<Value>| async move {
                let payload = match body["tool"].as_str() {
                    Some("agent_executor") => json!({
                        "unicorn_hunter": {
                            "unicorn_score": 91,
                            "component_scores": { "community_momentum": 90 }
                        }
                    }),
                    Some("analyze_github_repository") => json!({ "metrics": { "stars": 7 } }),
                    _ => json!({ "unicorn_score": 33 }),
                };
                Json(json!({ "content": [{ "type": "text", "text": payload.to_string() }] }))
            }),
        )
        .route("/health", get(|| async { Json(json!({ "status": "healthy" })) }))
        .route(
            "/mcp/manifest",
            get(|| async { Json(json!({ "tools": ["unicorn_hunter"] })) }),
        )
}

#[tokio::test]
async fn analyze_returns_normalized_result() {
    let remote = spawn(fake_remote()).await;
    let base = spawn_api(remote, Duration::from_secs(5)).await;
    let http = reqwest::Client::new();

    let resp = http
        .post(format!("{base}/analyze"))
        .json(&json!({ "repository": "https://github.com/facebook/react" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["score"], 91.0);
    assert_eq!(body["data"]["status"], "Unicorn Potential");
    assert_eq!(body["data"]["componentScores"][0]["name"], "Community Momentum");

    let resp = http
        .post(format!("{base}/analyze"))
        .json(&json!({ "repository": "facebook/react", "include_deep_analysis": false }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["score"], 33.0);
    assert_eq!(body["data"]["metrics"]["stars"], 7);
}

#[tokio::test]
async fn invalid_repository_is_a_bad_request() {
    let remote = spawn(fake_remote()).await;
    let base = spawn_api(remote, Duration::from_secs(5)).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(&json!({ "repository": "not-a-repo" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INVALID_REPOSITORY_FORMAT");
    assert_eq!(body["error"]["details"][0]["path"], "repository");
}

#[tokio::test]
async fn malformed_body_is_wrapped_in_envelope() {
    let remote = spawn(fake_remote()).await;
    let base = spawn_api(remote, Duration::from_secs(5)).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(&json!({ "repo": "facebook/react" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    assert_eq!(body["error"]["details"][0]["path"], "repository");
}

#[tokio::test]
async fn upstream_failures_map_to_gateway_statuses() {
    let failing = Router::new().route(
        "/mcp/invoke",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "upstream internals") }),
    );
    let base = spawn_api(spawn(failing).await, Duration::from_secs(5)).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(&json!({ "repository": "facebook/react" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let text = resp.text().await.unwrap();
    assert!(!text.contains("upstream internals"));

    let slow = Router::new().route(
        "/mcp/invoke",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({}))
        }),
    );
    let base = spawn_api(spawn(slow).await, Duration::from_millis(200)).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(&json!({ "repository": "facebook/react" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "TIMEOUT");
}

#[tokio::test]
async fn health_reports_remote_and_timestamp() {
    let remote = spawn(fake_remote()).await;
    let base = spawn_api(remote, Duration::from_secs(5)).await;

    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["remote"]["ok"], true);
    let checked_at = body["data"]["checked_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(checked_at).is_ok());
}

#[tokio::test]
async fn manifest_is_passed_through() {
    let remote = spawn(fake_remote()).await;
    let base = spawn_api(remote, Duration::from_secs(5)).await;

    let body: Value = reqwest::get(format!("{base}/manifest"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!({ "success": true, "data": { "tools": ["unicorn_hunter"] } }));
}
