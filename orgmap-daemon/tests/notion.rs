//! Notion client integration tests.
//!
//! Runs the client against a local axum server that mimics the Notion
//! database endpoints, including cursor pagination and error responses.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use orgmap_core::{Collection, GraphError, RecordSource};
use orgmap_daemon::config::NotionConfig;
use orgmap_daemon::notion::NotionClient;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Notion server
// ============================================================================

#[derive(Default)]
struct Recorded {
    queries: Vec<(String, Value)>,
    auth: Vec<Option<String>>,
}

type Shared = Arc<Mutex<Recorded>>;

fn page(id: &str, name: &str) -> Value {
    json!({
        "object": "page",
        "id": id,
        "properties": {
            "Name": {"id": "title", "type": "title", "title": [{"plain_text": name}]}
        }
    })
}

async fn query(
    State(recorded): State<Shared>,
    Path(database): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    {
        let mut recorded = recorded.lock().unwrap();
        recorded.queries.push((database.clone(), body.clone()));
        recorded.auth.push(
            headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        );
    }

    match (database.as_str(), body.get("start_cursor").and_then(Value::as_str)) {
        ("circles-db", None) => (
            StatusCode::OK,
            Json(json!({
                "object": "list",
                "results": [page("c-1", "Land"), page("c-2", "Kitchen")],
                "has_more": true,
                "next_cursor": "cursor-2"
            })),
        ),
        ("circles-db", Some("cursor-2")) => (
            StatusCode::OK,
            Json(json!({
                "object": "list",
                "results": [page("c-3", "Orchard")],
                "has_more": false,
                "next_cursor": null
            })),
        ),
        ("people-db", _) => (
            StatusCode::OK,
            Json(json!({
                "object": "list",
                "results": [page("p-1", "Ana")],
                "has_more": true,
                "next_cursor": null
            })),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"object": "error", "message": "boom"})),
        ),
    }
}

async fn retrieve(Path(database): Path<String>) -> StatusCode {
    if database == "circles-db" {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    }
}

/// Start the mock server on an ephemeral port and return its base URL.
async fn start_mock() -> (String, Shared) {
    let recorded: Shared = Arc::default();
    let app = Router::new()
        .route("/databases/:id/query", post(query))
        .route("/databases/:id", get(retrieve))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), recorded)
}

fn config(api_base: &str, circles: &str, people: &str) -> NotionConfig {
    NotionConfig {
        api_base: api_base.to_string(),
        circles_database: circles.to_string(),
        people_database: people.to_string(),
        page_size: 2,
        ..Default::default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_follows_cursor() {
    let (base, recorded) = start_mock().await;
    let client =
        NotionClient::new(config(&base, "circles-db", "people-db"), Some("secret".into())).unwrap();

    let records = client.fetch_collection(Collection::Circles).await.unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["c-1", "c-2", "c-3"]);
    assert_eq!(records[2].text("Name"), "Orchard");

    let recorded = recorded.lock().unwrap();
    assert_eq!(recorded.queries.len(), 2);
    assert_eq!(recorded.queries[0].1, json!({"page_size": 2}));
    assert_eq!(
        recorded.queries[1].1,
        json!({"page_size": 2, "start_cursor": "cursor-2"})
    );
    assert!(recorded
        .auth
        .iter()
        .all(|a| a.as_deref() == Some("Bearer secret")));
}

#[tokio::test]
async fn test_fetch_stops_without_cursor() {
    let (base, recorded) = start_mock().await;
    let client = NotionClient::new(config(&base, "circles-db", "people-db"), None).unwrap();

    let records = client.fetch_collection(Collection::People).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(recorded.lock().unwrap().queries.len(), 1);
    assert_eq!(recorded.lock().unwrap().auth[0], None);
}

#[tokio::test]
async fn test_fetch_error_is_source_unavailable() {
    let (base, _) = start_mock().await;
    let client = NotionClient::new(config(&base, "unknown-db", "people-db"), None).unwrap();

    let err = client
        .fetch_collection(Collection::Circles)
        .await
        .unwrap_err();
    match err {
        GraphError::SourceUnavailable { status, message } => {
            assert_eq!(status, Some(500));
            assert!(message.contains("boom"));
        }
    }
}

#[tokio::test]
async fn test_build_graph_fails_when_people_fail() {
    let (base, _) = start_mock().await;
    let client = NotionClient::new(config(&base, "circles-db", "broken-db"), None).unwrap();

    let err = orgmap_core::build_graph(&client, &Default::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_probe() {
    let (base, _) = start_mock().await;

    let client = NotionClient::new(config(&base, "circles-db", "people-db"), None).unwrap();
    assert!(client.probe(Collection::Circles).await.unwrap());
    assert!(!client.probe(Collection::People).await.unwrap());
}

#[tokio::test]
async fn test_probe_unreachable() {
    // Bind then drop a listener to get a port nothing is serving.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = NotionClient::new(
        config(&format!("http://{}", addr), "circles-db", "people-db"),
        None,
    )
    .unwrap();
    let err = client.probe(Collection::Circles).await.unwrap_err();
    assert_eq!(err.status(), None);
}
