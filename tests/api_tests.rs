use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use yt_search_widget::{
    api::{create_router, AppState},
    config::Config,
    error::AppResult,
    models::SearchResult,
    services::providers::{SuggestionProvider, VideoSearchProvider},
};

struct FixedSearch(Vec<SearchResult>);

#[async_trait]
impl VideoSearchProvider for FixedSearch {
    async fn search_videos(&self, _query: &str) -> AppResult<Vec<SearchResult>> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

struct NoSuggestions;

#[async_trait]
impl SuggestionProvider for NoSuggestions {
    async fn suggest(&self, _query: &str) -> AppResult<Vec<String>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

fn result(id: &str) -> SearchResult {
    SearchResult {
        id: id.to_string(),
        title: format!("Track {}", id),
        artist: "Channel".to_string(),
    }
}

fn create_test_server(config: Config) -> TestServer {
    let state = AppState::with_providers(
        &config,
        Arc::new(FixedSearch(vec![result("a"), result("b")])),
        Arc::new(NoSuggestions),
    );
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn configured() -> Config {
    Config {
        youtube_api_key: "test-key".to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(configured());
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_placeholder_key_reports_configuration_error() {
    let server = create_test_server(Config::default());

    let response = server.get("/state").await;
    response.assert_status_ok();
    let snapshot: Value = response.json();
    assert_eq!(snapshot["error"]["kind"], "configuration");
    assert_eq!(snapshot["search_enabled"], false);
    assert_eq!(snapshot["player_area"]["status"], "see_error_above");

    // Submitting does nothing without a key
    let response = server.post("/search").json(&json!({ "query": "lofi" })).await;
    response.assert_status_ok();
    let snapshot: Value = response.json();
    assert_eq!(snapshot["results"].as_array().unwrap().len(), 0);
    assert_eq!(snapshot["error"]["kind"], "configuration");
}

#[tokio::test]
async fn test_blank_search_is_noop() {
    let server = create_test_server(configured());

    let response = server.post("/search").json(&json!({ "query": "   " })).await;
    response.assert_status_ok();
    let snapshot: Value = response.json();
    assert!(snapshot["last_search_term"].is_null());
    assert_eq!(snapshot["player_area"]["status"], "idle");
}

#[tokio::test]
async fn test_search_returns_results() {
    let server = create_test_server(configured());

    let response = server.post("/search").json(&json!({ "query": "lofi" })).await;
    response.assert_status_ok();
    let snapshot: Value = response.json();
    assert_eq!(snapshot["last_search_term"], "lofi");
    assert_eq!(snapshot["is_loading"], false);
    assert_eq!(snapshot["results"][0]["id"], "a");
    assert_eq!(
        snapshot["results"][0]["thumbnail_url"],
        "https://img.youtube.com/vi/a/mqdefault.jpg"
    );
    assert_eq!(snapshot["player_area"]["status"], "select_video");
}

#[tokio::test]
async fn test_unknown_result_is_not_found() {
    let server = create_test_server(configured());
    server.post("/search").json(&json!({ "query": "lofi" })).await;

    let response = server
        .post("/results/select")
        .json(&json!({ "id": "missing" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mount_rejects_empty_container() {
    let server = create_test_server(configured());

    let response = server
        .post("/player/mount")
        .json(&json!({ "container_id": "" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(configured());
    let response = server.get("/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_player_lifecycle_through_bridge() {
    let server = create_test_server(configured());

    server
        .post("/player/mount")
        .json(&json!({ "container_id": "yt-player" }))
        .await
        .assert_status_ok();

    let commands: Vec<Value> = server.get("/player/commands").await.json();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0]["command"], "inject_script");
    assert_eq!(commands[0]["src"], "https://www.youtube.com/iframe_api");

    server.post("/search").json(&json!({ "query": "lofi" })).await;
    let response = server
        .post("/results/select")
        .json(&json!({ "id": "a" }))
        .await;
    response.assert_status_ok();
    let snapshot: Value = response.json();
    assert_eq!(snapshot["player"]["phase"], "unbound");
    assert_eq!(snapshot["results"][0]["indicator"], "playing");

    // Nothing is created until the SDK is loaded
    let commands: Vec<Value> = server.get("/player/commands").await.json();
    assert!(commands.is_empty());

    let snapshot: Value = server.post("/player/sdk-ready").await.json();
    assert_eq!(snapshot["player"]["phase"], "creating");
    let handle = snapshot["player"]["handle"].clone();

    let commands: Vec<Value> = server.get("/player/commands").await.json();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0]["command"], "create");
    assert_eq!(commands[0]["container_id"], "yt-player");
    assert_eq!(commands[0]["options"]["video_id"], "a");

    let snapshot: Value = server
        .post("/player/events")
        .json(&json!({ "type": "ready", "handle": handle }))
        .await
        .json();
    assert_eq!(snapshot["player"]["phase"], "ready");
    assert_eq!(snapshot["player_area"]["status"], "now_playing");
    assert_eq!(snapshot["player_area"]["title"], "Track a");

    // The page reports a pause
    let snapshot: Value = server
        .post("/player/events")
        .json(&json!({ "type": "state_change", "handle": handle, "data": 2 }))
        .await
        .json();
    assert_eq!(snapshot["results"][0]["indicator"], "paused");
    assert_eq!(snapshot["now_playing"]["is_playing"], false);

    let snapshot: Value = server
        .post("/player/events")
        .json(&json!({ "type": "error", "handle": handle, "data": 150 }))
        .await
        .json();
    assert_eq!(snapshot["player"]["phase"], "errored");
    assert_eq!(snapshot["error"]["kind"], "playback");
    assert_eq!(
        snapshot["error"]["message"],
        "Player Error (150): Playback restricted."
    );
    assert!(snapshot["now_playing"].is_null());

    server.delete("/player").await.assert_status_ok();
    let commands: Vec<Value> = server.get("/player/commands").await.json();
    assert_eq!(commands.last().unwrap()["command"], "destroy");
}
