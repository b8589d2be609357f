//! Node model and the node builder.
//!
//! Circles and people live in two separate arenas. A node's short id is its
//! index in its arena (`circle-<i>`, `person-<i>`), so ids are dense,
//! zero-based and follow source order. Source ids are only kept for
//! cross-reference resolution and URL construction.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::record::RawRecord;

/// Circle name used by the source as an unfilled template row.
pub const PLACEHOLDER_CIRCLE_NAME: &str = "Circle [Name]";

/// Status applied when a record has no status selected.
pub const DEFAULT_STATUS: &str = "Active";

/// Property names read from circle records.
pub mod circle_props {
    pub const NAME: &str = "Name";
    pub const PURPOSE: &str = "Purpose";
    pub const STATUS: &str = "Status";
    pub const SUPER_CIRCLE: &str = "Super-circle";
    pub const LEAD: &str = "Circle Lead";
    pub const REP: &str = "Circle Rep";
}

/// Property names read from person records.
pub mod person_props {
    pub const FIRST_NAME: &str = "First Name";
    pub const NAME: &str = "Name";
    pub const STATUS: &str = "Person Status";
    pub const MEMBERSHIPS: &str = "Circle Memberships";
    pub const ROLES: &str = "Roles";
}

/// Types of nodes in the organization graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Circle,
    Person,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Circle => "circle",
            NodeType::Person => "person",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "circle" => Some(NodeType::Circle),
            "person" => Some(NodeType::Person),
            _ => None,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Short, pipeline-assigned node id: an index into one of the two arenas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub node_type: NodeType,
    pub index: usize,
}

impl NodeId {
    pub fn circle(index: usize) -> Self {
        Self {
            node_type: NodeType::Circle,
            index,
        }
    }

    pub fn person(index: usize) -> Self {
        Self {
            node_type: NodeType::Person,
            index,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.node_type, self.index)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An organizational circle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircleNode {
    pub source_id: String,
    pub name: String,
    pub purpose: String,
    pub status: String,
    /// Parent circle references; only the first one drives the level.
    pub super_circle_source_ids: Vec<String>,
    pub lead_role_source_ids: Vec<String>,
    pub rep_role_source_ids: Vec<String>,
}

impl CircleNode {
    /// Create a circle node from a raw circle record.
    pub fn from_record(record: &RawRecord) -> Self {
        Self {
            source_id: record.id.clone(),
            name: record.text(circle_props::NAME),
            purpose: record.text(circle_props::PURPOSE),
            status: record
                .select(circle_props::STATUS)
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            super_circle_source_ids: record.relation_ids(circle_props::SUPER_CIRCLE),
            lead_role_source_ids: record.relation_ids(circle_props::LEAD),
            rep_role_source_ids: record.relation_ids(circle_props::REP),
        }
    }

    /// Whether this circle sits at the top of the hierarchy.
    pub fn is_root(&self) -> bool {
        self.super_circle_source_ids.is_empty()
    }
}

/// A person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonNode {
    pub source_id: String,
    /// Display name: first name if present, full name otherwise.
    pub name: String,
    pub full_name: String,
    pub status: String,
    pub circle_membership_source_ids: Vec<String>,
    pub role_source_ids: Vec<String>,
}

impl PersonNode {
    /// Create a person node from a raw person record.
    pub fn from_record(record: &RawRecord) -> Self {
        let full_name = record.text(person_props::NAME);
        let first_name = record.text(person_props::FIRST_NAME);
        let name = if first_name.is_empty() {
            full_name.clone()
        } else {
            first_name
        };

        Self {
            source_id: record.id.clone(),
            name,
            full_name,
            status: record
                .select(person_props::STATUS)
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            circle_membership_source_ids: record.relation_ids(person_props::MEMBERSHIPS),
            role_source_ids: record.relation_ids(person_props::ROLES),
        }
    }

    /// Whether this person holds the given role.
    pub fn holds_role(&self, role_source_id: &str) -> bool {
        self.role_source_ids.iter().any(|r| r == role_source_id)
    }
}

/// The two node arenas plus their source-id lookups.
///
/// Built in a single pass and never mutated afterward.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    circles: Vec<CircleNode>,
    people: Vec<PersonNode>,
    circle_lookup: HashMap<String, usize>,
    person_lookup: HashMap<String, usize>,
}

impl NodeArena {
    /// Build both arenas from raw records, in source order.
    ///
    /// Circles named `placeholder` are dropped without consuming an index.
    /// When a source id repeats, the lookup keeps its first node.
    pub fn build(
        circle_records: &[RawRecord],
        person_records: &[RawRecord],
        placeholder: &str,
    ) -> Self {
        let mut arena = Self {
            circles: Vec::with_capacity(circle_records.len()),
            people: Vec::with_capacity(person_records.len()),
            circle_lookup: HashMap::with_capacity(circle_records.len()),
            person_lookup: HashMap::with_capacity(person_records.len()),
        };

        for record in circle_records {
            let circle = CircleNode::from_record(record);
            if circle.name == placeholder {
                debug!("Skipping placeholder circle {}", record.id);
                continue;
            }
            let index = arena.circles.len();
            arena
                .circle_lookup
                .entry(circle.source_id.clone())
                .or_insert(index);
            arena.circles.push(circle);
        }

        for record in person_records {
            let person = PersonNode::from_record(record);
            let index = arena.people.len();
            arena
                .person_lookup
                .entry(person.source_id.clone())
                .or_insert(index);
            arena.people.push(person);
        }

        debug!(
            "Built {} circles ({} placeholders skipped) and {} people",
            arena.circles.len(),
            circle_records.len() - arena.circles.len(),
            arena.people.len()
        );

        arena
    }

    pub fn circles(&self) -> &[CircleNode] {
        &self.circles
    }

    pub fn people(&self) -> &[PersonNode] {
        &self.people
    }

    /// Iterate circles with their short ids.
    pub fn circle_entries(&self) -> impl Iterator<Item = (NodeId, &CircleNode)> {
        self.circles
            .iter()
            .enumerate()
            .map(|(i, c)| (NodeId::circle(i), c))
    }

    /// Iterate people with their short ids.
    pub fn person_entries(&self) -> impl Iterator<Item = (NodeId, &PersonNode)> {
        self.people
            .iter()
            .enumerate()
            .map(|(i, p)| (NodeId::person(i), p))
    }

    /// Resolve a circle source id to its short id.
    pub fn circle_id(&self, source_id: &str) -> Option<NodeId> {
        self.circle_lookup.get(source_id).map(|&i| NodeId::circle(i))
    }

    /// Resolve a person source id to its short id.
    pub fn person_id(&self, source_id: &str) -> Option<NodeId> {
        self.person_lookup.get(source_id).map(|&i| NodeId::person(i))
    }

    /// Resolve a circle source id to its node.
    pub fn circle_by_source(&self, source_id: &str) -> Option<&CircleNode> {
        self.circle_lookup.get(source_id).map(|&i| &self.circles[i])
    }

    pub fn node_count(&self) -> usize {
        self.circles.len() + self.people.len()
    }
}
