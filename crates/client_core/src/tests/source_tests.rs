use super::*;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query as QueryParams, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tokio::{net::TcpListener, sync::Mutex};

fn request(raw: &str, page: u32, cursor: Option<&str>) -> PageRequest {
    PageRequest {
        query: Query::parse(raw).expect("query"),
        page: Page(page),
        cursor: cursor.map(|c| CursorToken(c.to_string())),
    }
}

#[test]
fn first_page_url_has_no_pagination_params() {
    let url = listing_url(DEFAULT_BASE_URL, &request("programming", 0, None)).expect("url");
    assert_eq!(url.as_str(), "https://old.reddit.com/r/programming.json");
}

#[test]
fn later_page_url_carries_count_and_cursor() {
    let url = listing_url(DEFAULT_BASE_URL, &request("programming", 1, Some("t3_abc"))).expect("url");
    assert_eq!(
        url.as_str(),
        "https://old.reddit.com/r/programming.json?count=25&after=t3_abc"
    );
}

#[test]
fn later_page_without_cursor_still_sends_count() {
    let url = listing_url(DEFAULT_BASE_URL, &request("rust", 2, None)).expect("url");
    assert_eq!(url.query(), Some("count=25"));
}

#[test]
fn url_percent_encodes_query_text() {
    let url = listing_url("http://localhost:8080", &request("ça?va", 0, None)).expect("url");
    assert_eq!(url.path(), "/r/%C3%A7a%3Fva.json");
    assert_eq!(url.query(), None);
}

#[test]
fn base_url_with_path_keeps_prefix() {
    let url = listing_url("http://localhost:8080/proxy/", &request("rust", 0, None)).expect("url");
    assert_eq!(url.as_str(), "http://localhost:8080/proxy/r/rust.json");
}

#[test]
fn rejects_unparseable_base_url() {
    let err = listing_url("not a url", &request("rust", 0, None)).expect_err("must fail");
    assert!(matches!(err, FetchError::InvalidUrl(_)));
}

#[derive(Clone, Default)]
struct StubState {
    seen: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
}

async fn listing(
    State(state): State<StubState>,
    Path(file): Path<String>,
    QueryParams(params): QueryParams<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    state.seen.lock().await.push((file.clone(), params));
    match file.as_str() {
        "rust.json" => Ok(Json(serde_json::json!({
            "kind": "Listing",
            "data": {
                "after": "t3_two",
                "children": [
                    {"kind": "t3", "data": {"name": "t3_one", "title": "One", "score": 5}},
                    {"kind": "t3", "data": {"name": "t3_two", "title": "Two", "score": 3}}
                ]
            }
        }))),
        "garbled.json" => Ok(Json(serde_json::json!({"unexpected": true}))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn spawn_listing_server() -> (String, StubState) {
    let state = StubState::default();
    let app = Router::new()
        .route("/r/:file", get(listing))
        .with_state(state.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{addr}"), state)
}

fn client(base_url: String) -> RedditListingClient {
    RedditListingClient::new(base_url, Duration::from_secs(5), "reader-tests").expect("client")
}

#[tokio::test]
async fn fetches_and_decodes_listing_in_order() {
    let (base_url, state) = spawn_listing_server().await;
    let client = client(base_url);

    let posts = client
        .fetch_page(&request("rust", 0, None))
        .await
        .expect("fetch");
    assert_eq!(
        posts.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec!["t3_one", "t3_two"]
    );

    let seen = state.seen.lock().await;
    assert_eq!(seen[0].0, "rust.json");
    assert!(seen[0].1.is_empty());
}

#[tokio::test]
async fn sends_pagination_params_for_later_pages() {
    let (base_url, state) = spawn_listing_server().await;
    let client = client(base_url);

    client
        .fetch_page(&request("rust", 1, Some("t3_two")))
        .await
        .expect("fetch");

    let seen = state.seen.lock().await;
    assert_eq!(seen[0].1.get("count").map(String::as_str), Some("25"));
    assert_eq!(seen[0].1.get("after").map(String::as_str), Some("t3_two"));
}

#[tokio::test]
async fn non_success_status_maps_to_status_error() {
    let (base_url, _state) = spawn_listing_server().await;
    let err = client(base_url)
        .fetch_page(&request("missing", 0, None))
        .await
        .expect_err("must fail");
    assert_eq!(err, FetchError::Status(404));
}

#[tokio::test]
async fn malformed_payload_maps_to_malformed_error() {
    let (base_url, _state) = spawn_listing_server().await;
    let err = client(base_url)
        .fetch_page(&request("garbled", 0, None))
        .await
        .expect_err("must fail");
    assert!(matches!(err, FetchError::Malformed(_)));
}

#[tokio::test]
async fn unreachable_upstream_maps_to_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client(format!("http://{addr}"))
        .fetch_page(&request("rust", 0, None))
        .await
        .expect_err("must fail");
    assert!(matches!(err, FetchError::Transport(_)));
}
