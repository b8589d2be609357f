//! Shared application state for the server.

use orgmap_core::{Collection, GraphOptions, RecordSource};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state.
///
/// Holds no graph: every request rebuilds it from the source.
#[derive(Clone)]
pub struct AppState {
    /// Where circle and people records come from
    pub source: Arc<dyn RecordSource>,
    /// Graph assembly options
    pub options: GraphOptions,
    /// `max-age` for graph responses, in seconds
    pub cache_max_age: u64,
    /// Collection read by the health probe
    pub health_collection: Collection,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    pub fn new(source: Arc<dyn RecordSource>, options: GraphOptions, cache_max_age: u64) -> Self {
        Self {
            source,
            options,
            cache_max_age,
            health_collection: Collection::Circles,
            start_time: Instant::now(),
        }
    }

    /// Seconds since the server started.
    pub fn uptime_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}
