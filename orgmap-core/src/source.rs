//! The record source seam.
//!
//! The pipeline only needs two things from the outside world: the records
//! of a collection, and a cheap reachability check for health reporting.

use async_trait::async_trait;
use std::fmt;

use crate::error::Result;
use crate::record::RawRecord;

/// The collections the pipeline reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Circles,
    People,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Circles => "circles",
            Collection::People => "people",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A read-only source of raw records.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch every record of a collection, in source order.
    ///
    /// Fails with [`GraphError::SourceUnavailable`](crate::GraphError::SourceUnavailable)
    /// on any non-success response.
    async fn fetch_collection(&self, collection: Collection) -> Result<Vec<RawRecord>>;

    /// Issue one lightweight read against a collection.
    ///
    /// Returns `Ok(false)` when the source answered with a failure status and
    /// `Err` when it could not be reached at all.
    async fn probe(&self, collection: Collection) -> Result<bool>;
}
