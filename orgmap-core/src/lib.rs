//! OrgMap Core - Organization graph construction.
//!
//! Turns circle and people records (Notion-shaped, ID-keyed, relation-laden)
//! into a directed graph for visualization:
//!
//! - **Field extraction**: total, tag-dispatched reads of property values
//! - **Node building**: dense short ids (`circle-<i>`, `person-<i>`) over two arenas
//! - **Hierarchy**: circle levels inferred from the first super-circle reference
//! - **Edges**: subcircle, leads, represents and energizes, with membership
//!   suppressed where a lead or rep role already joins the pair
//!
//! # Usage
//!
//! ```rust,no_run
//! use orgmap_core::{build_graph, GraphOptions, RecordSource};
//!
//! async fn serve(source: &dyn RecordSource) -> orgmap_core::Result<()> {
//!     let graph = build_graph(source, &GraphOptions::default()).await?;
//!     println!("{}", serde_json::to_string(&graph).unwrap_or_default());
//!     Ok(())
//! }
//! ```

pub mod edges;
pub mod error;
pub mod extract;
pub mod graph;
pub mod nodes;
pub mod pipeline;
pub mod record;
pub mod resolver;
pub mod source;

pub use edges::{Edge, EdgeType};
pub use error::{GraphError, Result};
pub use graph::{Graph, GraphMeta, GraphNode, GraphOptions};
pub use nodes::{NodeArena, NodeId, NodeType};
pub use pipeline::{build_graph, build_graph_from_records};
pub use record::{PropertyValue, RawRecord};
pub use resolver::Level;
pub use source::{Collection, RecordSource};
