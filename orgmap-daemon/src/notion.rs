//! Notion API record source.
//!
//! Queries the circles and people databases, following pagination cursors
//! until every page has been read. Any non-success response surfaces as
//! [`GraphError::SourceUnavailable`] carrying the upstream status and body.

use anyhow::{Context, Result};
use async_trait::async_trait;
use orgmap_core::{Collection, GraphError, RawRecord, RecordSource};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::NotionConfig;

/// Body of a database query request.
#[derive(Serialize)]
struct QueryRequest<'a> {
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
}

/// One page of database query results.
#[derive(Deserialize)]
struct QueryPage {
    #[serde(default)]
    results: Vec<RawRecord>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

/// Notion client bound to the circles and people databases.
#[derive(Clone)]
pub struct NotionClient {
    client: Client,
    config: NotionConfig,
    api_key: Option<String>,
}

impl NotionClient {
    /// Create a client; without an API key every request will be rejected upstream.
    pub fn new(config: NotionConfig, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Database id backing a collection.
    pub fn database_id(&self, collection: Collection) -> &str {
        match collection {
            Collection::Circles => &self.config.circles_database,
            Collection::People => &self.config.people_database,
        }
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Notion-Version", self.config.version.as_str());
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Query one page of a database.
    async fn query_page(&self, database_id: &str, cursor: Option<&str>) -> orgmap_core::Result<QueryPage> {
        let url = format!("{}/databases/{}/query", self.config.api_base, database_id);
        let body = QueryRequest {
            page_size: self.config.page_size,
            start_cursor: cursor,
        };

        let resp = self
            .with_headers(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| GraphError::transport(e.to_string()))?;

        let resp = ensure_success(resp).await?;
        resp.json::<QueryPage>()
            .await
            .map_err(|e| GraphError::transport(format!("Invalid query response: {}", e)))
    }
}

#[async_trait]
impl RecordSource for NotionClient {
    async fn fetch_collection(&self, collection: Collection) -> orgmap_core::Result<Vec<RawRecord>> {
        let database_id = self.database_id(collection);
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.query_page(database_id, cursor.as_deref()).await?;
            debug!(
                "Fetched {} {} records (has_more: {})",
                page.results.len(),
                collection,
                page.has_more
            );
            records.extend(page.results);

            match (page.has_more, page.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                (true, None) => {
                    warn!("Notion reported more {} records without a cursor", collection);
                    break;
                }
                (false, _) => break,
            }
        }

        Ok(records)
    }

    async fn probe(&self, collection: Collection) -> orgmap_core::Result<bool> {
        let url = format!(
            "{}/databases/{}",
            self.config.api_base,
            self.database_id(collection)
        );

        let resp = self
            .with_headers(self.client.get(&url))
            .send()
            .await
            .map_err(|e| GraphError::transport(e.to_string()))?;

        Ok(resp.status().is_success())
    }
}

/// Turn a non-success response into `SourceUnavailable`.
async fn ensure_success(resp: Response) -> orgmap_core::Result<Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }

    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    Err(GraphError::upstream(status.as_u16(), text))
}
