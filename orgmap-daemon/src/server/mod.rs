//! HTTP server for the OrgMap daemon.
//!
//! Provides REST API for:
//! - Service description
//! - Organization graph (nodes, edges, meta)
//! - Health check against the record source

mod http;
pub mod state;

pub use http::create_router;
pub use state::AppState;
