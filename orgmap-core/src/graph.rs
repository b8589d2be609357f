//! Graph assembly: the public, serializable view of the organization.
//!
//! Internal reference lists and source ids never leave this module; each
//! node instead carries a reference URL built from its source id.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::edges::Edge;
use crate::nodes::{NodeArena, NodeId, NodeType, PLACEHOLDER_CIRCLE_NAME};
use crate::resolver::Level;

/// Default base for node reference URLs.
pub const DEFAULT_URL_BASE: &str = "https://notion.so/";

/// Default provenance label stamped into `meta.source`.
pub const DEFAULT_PROVENANCE: &str = "Notion API - live query";

/// Knobs for graph assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOptions {
    /// Circle name marking an unfilled template record.
    pub placeholder_name: String,
    /// Prefix for node reference URLs.
    pub url_base: String,
    /// Label written to `meta.source`.
    pub provenance: String,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            placeholder_name: PLACEHOLDER_CIRCLE_NAME.to_string(),
            url_base: DEFAULT_URL_BASE.to_string(),
            provenance: DEFAULT_PROVENANCE.to_string(),
        }
    }
}

impl GraphOptions {
    /// Reference URL for a source id: the base plus the id without dashes.
    pub fn reference_url(&self, source_id: &str) -> String {
        format!("{}{}", self.url_base, source_id.replace('-', ""))
    }
}

/// A node as exposed to graph consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: NodeId,
    pub name: String,
    pub full_name: String,
    pub purpose: String,
    pub status: String,
    pub node_type: NodeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    pub notion_url: String,
}

/// Summary counts and provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMeta {
    pub circle_count: usize,
    pub person_count: usize,
    pub edge_count: usize,
    pub timestamp: String,
    pub source: String,
}

/// The assembled organization graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<Edge>,
    pub meta: GraphMeta,
}

impl Graph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Find a node by its short id.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Assemble the public graph from the arena, circle levels and edges.
///
/// `levels` is indexed like the circle arena.
pub fn assemble(
    arena: &NodeArena,
    levels: &[Level],
    edges: Vec<Edge>,
    options: &GraphOptions,
    generated_at: DateTime<Utc>,
) -> Graph {
    let circles = arena.circle_entries().map(|(id, circle)| GraphNode {
        id,
        name: circle.name.clone(),
        full_name: circle.name.clone(),
        purpose: circle.purpose.clone(),
        status: circle.status.clone(),
        node_type: NodeType::Circle,
        level: Some(levels.get(id.index).copied().unwrap_or(Level::Root)),
        notion_url: options.reference_url(&circle.source_id),
    });

    let people = arena.person_entries().map(|(id, person)| GraphNode {
        id,
        name: person.name.clone(),
        full_name: if person.full_name.is_empty() {
            person.name.clone()
        } else {
            person.full_name.clone()
        },
        purpose: String::new(),
        status: person.status.clone(),
        node_type: NodeType::Person,
        level: None,
        notion_url: options.reference_url(&person.source_id),
    });

    let nodes: Vec<GraphNode> = circles.chain(people).collect();

    let meta = GraphMeta {
        circle_count: count_type(&nodes, NodeType::Circle),
        person_count: count_type(&nodes, NodeType::Person),
        edge_count: edges.len(),
        timestamp: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        source: options.provenance.clone(),
    };

    Graph { nodes, edges, meta }
}

fn count_type(nodes: &[GraphNode], node_type: NodeType) -> usize {
    nodes.iter().filter(|n| n.node_type == node_type).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{circle_props, person_props};
    use crate::record::{PropertyValue, RawRecord};
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_reference_url_strips_dashes() {
        let options = GraphOptions::default();
        assert_eq!(
            options.reference_url("2de36f74-3758-8122-ac4a-000b520202bf"),
            "https://notion.so/2de36f7437588122ac4a000b520202bf"
        );
    }

    #[test]
    fn test_assemble_projection() {
        let circles = vec![RawRecord::new("c-1")
            .with_property(circle_props::NAME, PropertyValue::title("Land"))
            .with_property(circle_props::PURPOSE, PropertyValue::rich_text("Soil"))];
        let people = vec![RawRecord::new("p-1")
            .with_property(person_props::NAME, PropertyValue::title("Ana Silva"))
            .with_property(person_props::FIRST_NAME, PropertyValue::rich_text("Ana"))];
        let arena = NodeArena::build(&circles, &people, PLACEHOLDER_CIRCLE_NAME);

        let graph = assemble(
            &arena,
            &[Level::Root],
            Vec::new(),
            &GraphOptions::default(),
            fixed_time(),
        );

        let value = serde_json::to_value(&graph).unwrap();
        assert_eq!(
            value["nodes"][0],
            serde_json::json!({
                "id": "circle-0",
                "name": "Land",
                "fullName": "Land",
                "purpose": "Soil",
                "status": "Active",
                "nodeType": "circle",
                "level": 0,
                "notionUrl": "https://notion.so/c1"
            })
        );
        assert_eq!(
            value["nodes"][1],
            serde_json::json!({
                "id": "person-0",
                "name": "Ana",
                "fullName": "Ana Silva",
                "purpose": "",
                "status": "Active",
                "nodeType": "person",
                "notionUrl": "https://notion.so/p1"
            })
        );
        assert_eq!(
            value["meta"],
            serde_json::json!({
                "circleCount": 1,
                "personCount": 1,
                "edgeCount": 0,
                "timestamp": "2024-03-01T12:30:00.000Z",
                "source": "Notion API - live query"
            })
        );
    }

    #[test]
    fn test_node_lookup() {
        let people = vec![RawRecord::new("p-1")];
        let arena = NodeArena::build(&[], &people, PLACEHOLDER_CIRCLE_NAME);
        let graph = assemble(&arena, &[], Vec::new(), &GraphOptions::default(), fixed_time());
        assert!(graph.node(NodeId::person(0)).is_some());
        assert!(graph.node(NodeId::circle(0)).is_none());
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }
}
