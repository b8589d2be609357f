//! Edge model.

use serde::Serialize;
use std::fmt;

use crate::nodes::NodeId;

/// Types of relationships between nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// Circle→Circle (child to parent)
    Subcircle,
    /// Person→Circle (holds the circle's lead role)
    Leads,
    /// Person→Circle (holds the circle's rep role)
    Represents,
    /// Person→Circle (plain membership)
    Energizes,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Subcircle => "subcircle",
            EdgeType::Leads => "leads",
            EdgeType::Represents => "represents",
            EdgeType::Energizes => "energizes",
        }
    }

    /// Human-readable label shown alongside the edge.
    pub fn label(&self) -> &'static str {
        match self {
            EdgeType::Subcircle => "Sub-circle of",
            EdgeType::Leads => "Circle Lead",
            EdgeType::Represents => "Circle Rep",
            EdgeType::Energizes => "Member",
        }
    }

    /// Role edges take precedence over a plain membership for the same pair.
    pub fn supersedes_membership(&self) -> bool {
        matches!(self, EdgeType::Leads | EdgeType::Represents)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "subcircle" => Some(EdgeType::Subcircle),
            "leads" => Some(EdgeType::Leads),
            "represents" => Some(EdgeType::Represents),
            "energizes" => Some(EdgeType::Energizes),
            _ => None,
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A directed, typed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    pub label: &'static str,
}

impl Edge {
    /// Create a new edge.
    pub fn new(source: NodeId, target: NodeId, edge_type: EdgeType) -> Self {
        Self {
            source,
            target,
            edge_type,
            label: edge_type.label(),
        }
    }

    /// Create a SUBCIRCLE edge (child circle to parent circle).
    pub fn subcircle(child: NodeId, parent: NodeId) -> Self {
        Self::new(child, parent, EdgeType::Subcircle)
    }

    /// Create a LEADS edge (person to the circle they lead).
    pub fn leads(person: NodeId, circle: NodeId) -> Self {
        Self::new(person, circle, EdgeType::Leads)
    }

    /// Create a REPRESENTS edge (person to the circle they represent).
    pub fn represents(person: NodeId, circle: NodeId) -> Self {
        Self::new(person, circle, EdgeType::Represents)
    }

    /// Create an ENERGIZES edge (member to circle).
    pub fn energizes(person: NodeId, circle: NodeId) -> Self {
        Self::new(person, circle, EdgeType::Energizes)
    }

    /// Whether this edge joins exactly `source` to `target`.
    pub fn connects(&self, source: NodeId, target: NodeId) -> bool {
        self.source == source && self.target == target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_creation() {
        let edge = Edge::leads(NodeId::person(0), NodeId::circle(2));
        assert_eq!(edge.edge_type, EdgeType::Leads);
        assert_eq!(edge.label, "Circle Lead");
        assert!(edge.connects(NodeId::person(0), NodeId::circle(2)));
        assert!(!edge.connects(NodeId::circle(2), NodeId::person(0)));
    }

    #[test]
    fn test_edge_serialization() {
        let edge = Edge::subcircle(NodeId::circle(1), NodeId::circle(0));
        let value = serde_json::to_value(&edge).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "source": "circle-1",
                "target": "circle-0",
                "type": "subcircle",
                "label": "Sub-circle of"
            })
        );
    }

    #[test]
    fn test_membership_precedence() {
        assert!(EdgeType::Leads.supersedes_membership());
        assert!(EdgeType::Represents.supersedes_membership());
        assert!(!EdgeType::Subcircle.supersedes_membership());
        assert!(!EdgeType::Energizes.supersedes_membership());
    }

    #[test]
    fn test_edge_type_parse() {
        assert_eq!(EdgeType::parse("ENERGIZES"), Some(EdgeType::Energizes));
        assert_eq!(EdgeType::parse("member"), None);
        assert_eq!(EdgeType::Represents.to_string(), "represents");
    }
}
