//! The graph build pipeline.
//!
//! Orchestrates:
//! 1. Fetching circles and people concurrently
//! 2. Building the node arenas
//! 3. Computing levels and deriving edges
//! 4. Assembling the public graph

use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::info;

use crate::error::Result;
use crate::graph::{assemble, Graph, GraphOptions};
use crate::nodes::NodeArena;
use crate::record::RawRecord;
use crate::resolver::{compute_levels, derive_edges};
use crate::source::{Collection, RecordSource};

/// Fetch both collections and build the graph.
///
/// Either fetch failing aborts the whole run; no partial graph is returned.
pub async fn build_graph(source: &dyn RecordSource, options: &GraphOptions) -> Result<Graph> {
    let start = Instant::now();

    let (circles, people) = tokio::try_join!(
        source.fetch_collection(Collection::Circles),
        source.fetch_collection(Collection::People),
    )?;

    info!(
        "Fetched {} circle records and {} person records",
        circles.len(),
        people.len()
    );

    let graph = build_graph_from_records(&circles, &people, options, Utc::now());

    info!(
        "Graph built: {} nodes, {} edges in {:?}",
        graph.node_count(),
        graph.edge_count(),
        start.elapsed()
    );

    Ok(graph)
}

/// Build the graph from already-fetched records.
///
/// Deterministic for a given input and timestamp.
pub fn build_graph_from_records(
    circles: &[RawRecord],
    people: &[RawRecord],
    options: &GraphOptions,
    generated_at: DateTime<Utc>,
) -> Graph {
    let arena = NodeArena::build(circles, people, &options.placeholder_name);
    let levels = compute_levels(&arena);
    let edges = derive_edges(&arena);
    assemble(&arena, &levels, edges, options, generated_at)
}
