//! Daemon configuration loading from `orgmap.toml`.
//!
//! Configuration is optional - the daemon falls back to defaults that point
//! at the VdL Farm Notion workspace if no config file exists.
//!
//! # Example Configuration
//!
//! ```toml
//! [notion]
//! api_base = "https://api.notion.com/v1"
//! version = "2022-06-28"
//! circles_database = "2de36f74-3758-8122-ac4a-000b520202bf"
//! people_database = "c2edc051-62cd-49cb-9805-38fa64d83a4f"
//! page_size = 100
//! timeout_secs = 30
//!
//! [server]
//! allowed_origins = ["https://ludwa6.github.io", "http://localhost:5173"]
//! cache_max_age = 60
//!
//! [graph]
//! placeholder_name = "Circle [Name]"
//! url_base = "https://notion.so/"
//! provenance = "Notion API - live query"
//! ```

use orgmap_core::graph::{DEFAULT_PROVENANCE, DEFAULT_URL_BASE};
use orgmap_core::nodes::PLACEHOLDER_CIRCLE_NAME;
use orgmap_core::GraphOptions;
use serde::Deserialize;
use std::path::Path;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "orgmap.toml";

/// Root configuration structure loaded from `orgmap.toml`.
///
/// All sections are optional and will use defaults if not specified.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct OrgMapConfig {
    /// Notion API access and database ids.
    #[serde(default)]
    pub notion: NotionConfig,

    /// HTTP service settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Graph assembly settings.
    #[serde(default)]
    pub graph: GraphConfig,
}

/// Notion API configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct NotionConfig {
    /// Base URL of the Notion REST API.
    pub api_base: String,

    /// Value sent in the `Notion-Version` header.
    pub version: String,

    /// Database holding circle pages.
    pub circles_database: String,

    /// Database holding people pages.
    pub people_database: String,

    /// Page size requested per query call (Notion caps this at 100).
    pub page_size: u32,

    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.notion.com/v1".to_string(),
            version: "2022-06-28".to_string(),
            circles_database: "2de36f74-3758-8122-ac4a-000b520202bf".to_string(),
            people_database: "c2edc051-62cd-49cb-9805-38fa64d83a4f".to_string(),
            page_size: 100,
            timeout_secs: 30,
        }
    }
}

/// HTTP service configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,

    /// `max-age` (seconds) of the `Cache-Control` header on graph responses.
    pub cache_max_age: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
            cache_max_age: 60,
        }
    }
}

/// Browser origins that may call the API by default.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://ludwa6.github.io",
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:8080",
];

/// Graph assembly configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
    /// Circle name marking an unfilled template page; such circles are dropped.
    pub placeholder_name: String,

    /// Prefix for each node's `notionUrl`.
    pub url_base: String,

    /// Label reported in `meta.source`.
    pub provenance: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            placeholder_name: PLACEHOLDER_CIRCLE_NAME.to_string(),
            url_base: DEFAULT_URL_BASE.to_string(),
            provenance: DEFAULT_PROVENANCE.to_string(),
        }
    }
}

impl OrgMapConfig {
    /// Load configuration from the given file.
    ///
    /// If the file doesn't exist or can't be parsed, returns defaults.
    /// Parse errors are logged as warnings but don't cause failures.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", path.display(), e);
                }
            }
        }
        Self::default()
    }

    /// Graph assembly options derived from the `[graph]` section.
    pub fn graph_options(&self) -> GraphOptions {
        GraphOptions {
            placeholder_name: self.graph.placeholder_name.clone(),
            url_base: self.graph.url_base.clone(),
            provenance: self.graph.provenance.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = OrgMapConfig::default();
        assert_eq!(config.notion.page_size, 100);
        assert_eq!(config.notion.version, "2022-06-28");
        assert_eq!(config.server.cache_max_age, 60);
        assert_eq!(config.server.allowed_origins.len(), 4);
        assert_eq!(config.graph_options(), GraphOptions::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[notion]
circles_database = "circles-db"
page_size = 25

[graph]
provenance = "Notion API - staging"
"#;

        let config: OrgMapConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.notion.circles_database, "circles-db");
        assert_eq!(config.notion.page_size, 25);
        assert_eq!(config.notion.api_base, "https://api.notion.com/v1");
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.graph.provenance, "Notion API - staging");
        assert_eq!(config.graph.placeholder_name, PLACEHOLDER_CIRCLE_NAME);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = OrgMapConfig::load(&dir.path().join(DEFAULT_CONFIG_FILE));
        assert_eq!(config, OrgMapConfig::default());
    }

    #[test]
    fn test_load_invalid_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "[server\ncache_max_age = ").unwrap();
        assert_eq!(OrgMapConfig::load(&path), OrgMapConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            "[server]\nallowed_origins = [\"https://example.org\"]\ncache_max_age = 5\n",
        )
        .unwrap();

        let config = OrgMapConfig::load(&path);
        assert_eq!(config.server.allowed_origins, vec!["https://example.org"]);
        assert_eq!(config.server.cache_max_age, 5);
    }
}
