//! Hierarchy levels and edge derivation.
//!
//! Levels only look at a circle's *first* super-circle reference, while
//! subcircle edges are emitted for *every* resolvable reference. Membership
//! edges are suppressed when a lead or rep edge already joins the same
//! person and circle; lead and rep edges themselves may coexist.

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::edges::{Edge, EdgeType};
use crate::nodes::{CircleNode, NodeArena, NodeId};

/// Displayed depth of a circle, capped at three levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    /// No super-circle.
    Root,
    /// First parent is a root circle, or could not be resolved.
    Sub,
    /// First parent has a parent of its own.
    Nested,
}

impl Level {
    pub fn depth(&self) -> u8 {
        match self {
            Level::Root => 0,
            Level::Sub => 1,
            Level::Nested => 2,
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.depth())
    }
}

/// Compute the level of a single circle.
pub fn circle_level(circle: &CircleNode, arena: &NodeArena) -> Level {
    let Some(first_parent) = circle.super_circle_source_ids.first() else {
        return Level::Root;
    };

    match arena.circle_by_source(first_parent) {
        Some(parent) if !parent.is_root() => Level::Nested,
        _ => Level::Sub,
    }
}

/// Compute levels for every circle, indexed like the circle arena.
pub fn compute_levels(arena: &NodeArena) -> Vec<Level> {
    arena
        .circles()
        .iter()
        .map(|circle| circle_level(circle, arena))
        .collect()
}

/// Derive all edges in their fixed order: subcircle, leads, represents, energizes.
pub fn derive_edges(arena: &NodeArena) -> Vec<Edge> {
    let mut edges = Vec::new();

    push_subcircle_edges(arena, &mut edges);
    push_role_edges(arena, EdgeType::Leads, &mut edges);
    push_role_edges(arena, EdgeType::Represents, &mut edges);
    push_membership_edges(arena, &mut edges);

    debug!("Derived {} edges", edges.len());
    edges
}

fn push_subcircle_edges(arena: &NodeArena, edges: &mut Vec<Edge>) {
    for (child, circle) in arena.circle_entries() {
        for parent in circle
            .super_circle_source_ids
            .iter()
            .filter_map(|source_id| arena.circle_id(source_id))
        {
            edges.push(Edge::subcircle(child, parent));
        }
    }
}

/// Emit one edge per (circle, role, holder) triple.
///
/// This is a plain O(circles × roles × people) scan. Organizations here are
/// tens to low hundreds of nodes, and the scan order fixes edge order, so it
/// stays a scan rather than a role index.
fn push_role_edges(arena: &NodeArena, edge_type: EdgeType, edges: &mut Vec<Edge>) {
    for (circle_id, circle) in arena.circle_entries() {
        for role in role_ids(circle, edge_type) {
            for (person_id, person) in arena.person_entries() {
                if person.holds_role(role) {
                    edges.push(Edge::new(person_id, circle_id, edge_type));
                }
            }
        }
    }
}

fn role_ids(circle: &CircleNode, edge_type: EdgeType) -> &[String] {
    match edge_type {
        EdgeType::Leads => circle.lead_role_source_ids.as_slice(),
        EdgeType::Represents => circle.rep_role_source_ids.as_slice(),
        EdgeType::Subcircle | EdgeType::Energizes => &[],
    }
}

fn push_membership_edges(arena: &NodeArena, edges: &mut Vec<Edge>) {
    for (person_id, person) in arena.person_entries() {
        for circle_id in person
            .circle_membership_source_ids
            .iter()
            .filter_map(|source_id| arena.circle_id(source_id))
        {
            if has_role_edge(edges, person_id, circle_id) {
                continue;
            }
            edges.push(Edge::energizes(person_id, circle_id));
        }
    }
}

/// Whether a lead or rep edge already joins `person` to `circle`.
fn has_role_edge(edges: &[Edge], person: NodeId, circle: NodeId) -> bool {
    edges
        .iter()
        .any(|e| e.connects(person, circle) && e.edge_type.supersedes_membership())
}
