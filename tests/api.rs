use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    body::Body,
    extract::Query,
    http::{Request, StatusCode},
    routing::get,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use mirror_mirror::{AppState, cache::QueryCache, config::Config, disney::DisneyClient, router};

async fn serve_upstream(stub: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind upstream stub");
    let addr = listener.local_addr().expect("upstream stub addr");
    tokio::spawn(async move {
        axum::serve(listener, stub).await.expect("serve upstream stub");
    });
    addr
}

fn app_for(upstream: SocketAddr) -> Router {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("build http client");

    let base_url = format!("http://{upstream}");
    let disney = DisneyClient::new(http, base_url.clone(), 50);
    let cache = QueryCache::new(Arc::new(disney), None);

    let config = Arc::new(Config {
        addr: "127.0.0.1:0".parse().expect("addr"),
        disney_base_url: base_url,
        disney_rps: 50,
        api_stale_secs: 300,
        cache_max_entries: None,
    });

    router(Arc::new(AppState { config, cache }))
}

fn fixed_reply(payload: Value) -> Router {
    Router::new().route(
        "/character",
        get(move || {
            let payload = payload.clone();
            async move { Json(payload) }
        }),
    )
}

async fn get_response(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("route response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, bytes.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = get_response(app, uri).await;
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

async fn get_html(app: Router, uri: &str) -> (StatusCode, String) {
    let (status, bytes) = get_response(app, uri).await;
    (status, String::from_utf8(bytes).expect("utf-8 body"))
}

#[tokio::test]
async fn proxy_returns_characters_and_pagination() {
    let upstream = serve_upstream(fixed_reply(json!({
        "data": [
            { "_id": 112, "name": "Mickey Mouse", "films": ["Fantasia"] },
            { "_id": 113, "name": "Minnie Mouse" },
        ],
        "info": { "nextPage": "http://upstream/character?page=2" },
    })))
    .await;

    let (status, body) = get_json(app_for(upstream), "/api/character?page=1&name=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["characters"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["characters"][0]["name"], "Mickey Mouse");
    assert_eq!(body["hasMore"], true);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn proxy_wraps_a_single_object_match() {
    let upstream = serve_upstream(fixed_reply(json!({
        "data": { "name": "Mulan", "films": ["Mulan"] },
        "info": { "nextPage": null },
    })))
    .await;

    let (status, body) = get_json(app_for(upstream), "/api/character?page=1&name=Mulan").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["characters"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["characters"][0]["name"], "Mulan");
    assert_eq!(body["hasMore"], false);
}

#[tokio::test]
async fn proxy_reports_upstream_failure_as_data() {
    let stub =
        Router::new().route("/character", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let upstream = serve_upstream(stub).await;

    let (status, body) = get_json(app_for(upstream), "/api/character?page=1&name=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["characters"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["hasMore"], false);
    assert!(body["error"].as_str().expect("error field").contains("upstream"));
}

#[tokio::test]
async fn proxy_clamps_out_of_range_pages() {
    let upstream = serve_upstream(fixed_reply(json!({
        "data": [{ "name": "Stitch" }],
        "info": { "nextPage": null },
    })))
    .await;

    let (status, body) = get_json(app_for(upstream), "/api/character?page=-3&name=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["characters"][0]["name"], "Stitch");
}

#[tokio::test]
async fn list_page_renders_characters() {
    let upstream = serve_upstream(fixed_reply(json!({
        "data": [{ "name": "Stitch", "imageUrl": "http://img.example/stitch.png" }],
        "info": { "nextPage": "http://upstream/character?page=2" },
    })))
    .await;

    let (status, html) = get_html(app_for(upstream), "/characters?page=1").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Stitch"));
    assert!(html.contains("Next"));
}

#[tokio::test]
async fn list_page_shows_a_distinct_empty_state() {
    let upstream = serve_upstream(fixed_reply(json!({
        "data": [],
        "info": { "nextPage": null },
    })))
    .await;

    let (status, html) = get_html(app_for(upstream), "/characters?name=zzzz").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No characters found"));
    assert!(!html.contains("Error loading characters"));
}

#[tokio::test]
async fn list_page_shows_an_inline_error_state() {
    let stub =
        Router::new().route("/character", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let upstream = serve_upstream(stub).await;

    let (status, html) = get_html(app_for(upstream), "/characters").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Error loading characters"));
    assert!(!html.contains("No characters found"));
}

fn by_name_stub() -> Router {
    Router::new().route(
        "/character",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let payload = match params.get("name").map(String::as_str) {
                Some("Mickey Mouse") => json!({
                    "data": {
                        "name": "Mickey Mouse",
                        "films": ["A", "B", "C"],
                        "tvShows": ["D", "E"],
                        "videoGames": ["F", "G"],
                        "parkAttractions": ["H", "I"],
                    },
                    "info": { "nextPage": null },
                }),
                Some("Donald Duck") => json!({
                    "data": { "name": "Donald Duck", "films": ["A"], "parkAttractions": ["H"] },
                    "info": { "nextPage": null },
                }),
                _ => json!({ "data": [], "info": { "nextPage": null } }),
            };
            Json(payload)
        }),
    )
}

#[tokio::test]
async fn compare_page_declares_a_winner() {
    let upstream = serve_upstream(by_name_stub()).await;

    let (status, html) =
        get_html(app_for(upstream), "/compare?first=Mickey%20Mouse&second=Donald%20Duck").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Mickey Mouse wins!"));
    assert!(html.contains("Motion Diversity"));
    assert!(html.contains("Park Attractions"));
}

#[tokio::test]
async fn compare_page_surfaces_fetch_failures() {
    let stub =
        Router::new().route("/character", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let upstream = serve_upstream(stub).await;

    let (status, html) =
        get_html(app_for(upstream), "/compare?first=Mickey%20Mouse&second=Donald%20Duck").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("upstream request failed"));
}

#[tokio::test]
async fn compare_page_reports_a_missing_contender() {
    let upstream = serve_upstream(by_name_stub()).await;

    let (status, html) =
        get_html(app_for(upstream), "/compare?first=Mickey%20Mouse&second=Nobody").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No character found named"));
}

#[tokio::test]
async fn compare_without_both_names_renders_the_picker() {
    let upstream = serve_upstream(by_name_stub()).await;

    let (status, html) = get_html(app_for(upstream), "/compare?first=Mickey%20Mouse").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Compare two characters"));
}

#[tokio::test]
async fn detail_page_lists_category_sections() {
    let upstream = serve_upstream(by_name_stub()).await;

    let (status, html) = get_html(app_for(upstream), "/character/Mickey%20Mouse").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Mickey Mouse"));
    assert!(html.contains("Video Games"));
}
