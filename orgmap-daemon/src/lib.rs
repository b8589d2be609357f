//! OrgMap Daemon Library - serving the organization graph over HTTP.
//!
//! This library provides:
//! - Configuration loading (`orgmap.toml`)
//! - Notion record source for circles and people
//! - HTTP router exposing the graph and a health check

pub mod config;
pub mod notion;
pub mod server;
