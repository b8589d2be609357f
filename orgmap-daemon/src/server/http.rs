//! HTTP routes and handlers for the OrgMap API.

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use super::state::AppState;

/// Create the main router with all routes.
///
/// Only GET requests from `allowed_origins` pass CORS.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin(allowed_origins))
        .allow_methods([Method::GET]);

    Router::new()
        .route("/", get(index))
        .route("/api/graph", get(graph))
        .route("/api/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// `"*"` anywhere in the list opens CORS to every origin.
fn allow_origin(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    AllowOrigin::list(origins)
}

// =============================================================================
// Response Types
// =============================================================================

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    notion: &'static str,
    timestamp: String,
    uptime_seconds: f64,
}

#[derive(Serialize)]
struct UnhealthyResponse {
    status: &'static str,
    error: String,
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// =============================================================================
// Handlers
// =============================================================================

async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "VdL Farm OrgMap API",
        "status": "running",
        "endpoints": {
            "/api/graph": "GET - graph data",
            "/api/health": "GET - health check"
        }
    }))
}

async fn graph(State(state): State<Arc<AppState>>) -> Response {
    match orgmap_core::build_graph(state.source.as_ref(), &state.options).await {
        Ok(graph) => (
            [(
                header::CACHE_CONTROL,
                format!("public, max-age={}", state.cache_max_age),
            )],
            Json(graph),
        )
            .into_response(),
        Err(e) => {
            error!("Graph build failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch graph data",
                    message: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn health(State(state): State<Arc<AppState>>) -> Response {
    match state.source.probe(state.health_collection).await {
        Ok(reachable) => Json(HealthResponse {
            status: "healthy",
            notion: if reachable { "connected" } else { "error" },
            timestamp: now_timestamp(),
            uptime_seconds: state.uptime_seconds(),
        })
        .into_response(),
        Err(e) => {
            error!("Health probe failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(UnhealthyResponse {
                    status: "unhealthy",
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
