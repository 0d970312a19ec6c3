//! Spatial hierarchy builder
//!
//! Resolves parent/child relationships between canvas nodes purely from
//! geometry: a node belongs to the group whose rectangle contains its
//! center point. Groups nest, so the builder works over a geometry-ordered
//! sequence where group nodes are arranged by ascending area, and applies
//! two distinct placement policies:
//!
//! - a **group** searches forward from its own position only, so it is
//!   captured by the next equal-or-larger group that encloses its midpoint;
//! - a **non-group** node searches the whole sequence from the start, so it
//!   is captured by the smallest enclosing group.
//!
//! The two scan directions encode different placement semantics and are
//! intentionally kept as separate procedures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, span, trace, Level};

use crate::core::{CanvasData, CanvasEdge, CanvasError, CanvasNode};
use crate::validate;

/// A canvas node enriched with its resolved children
///
/// `children` is `Some` (possibly empty) for group nodes and `None` for
/// every other node type: "not a container" is distinct from "container
/// with no children", and serializes as JSON `null` vs `[]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// The original node, unchanged
    #[serde(flatten)]
    pub node: CanvasNode,
    /// Ids of direct children in discovery order; `None` for non-groups
    pub children: Option<Vec<String>>,
}

impl HierarchyNode {
    /// Id of the underlying node
    pub fn id(&self) -> &str {
        &self.node.id
    }
}

/// The containment forest derived from one canvas
///
/// Nodes are stored in geometry order (groups ascending by area); edges are
/// the input edges, identical in content and order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hierarchy {
    /// Nodes in geometry order, each carrying its `children`
    pub nodes: Vec<HierarchyNode>,
    /// Edges exactly as they appeared in the input
    pub edges: Vec<CanvasEdge>,
}

impl Hierarchy {
    /// Look up a node by id
    pub fn get_node(&self, id: &str) -> Option<&HierarchyNode> {
        self.nodes.iter().find(|n| n.node.id == id)
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Build the containment hierarchy for a canvas
///
/// Validates the canvas first; the geometric passes assume well-formed
/// input. Edges pass through untouched.
pub fn build(data: &CanvasData) -> Result<Hierarchy, CanvasError> {
    let build_span = span!(
        Level::DEBUG,
        "build_hierarchy",
        node_count = data.nodes.len(),
        edge_count = data.edges.len()
    );
    let _enter = build_span.enter();

    validate::validate_canvas(data)?;

    let working = sort_groups_by_area(&data.nodes);

    let mut nodes: Vec<HierarchyNode> = working
        .iter()
        .map(|node| HierarchyNode {
            node: node.clone(),
            children: if node.is_group() {
                Some(Vec::new())
            } else {
                None
            },
        })
        .collect();

    let slot_of: HashMap<&str, usize> = working
        .iter()
        .enumerate()
        .map(|(slot, node)| (node.id.as_str(), slot))
        .collect();

    // One in-order walk over the working sequence; a parent's children end
    // up in working-sequence order.
    for index in 0..working.len() {
        let parent = if working[index].is_group() {
            find_group_parent_forward(&working, index)
        } else {
            find_leaf_parent(&working, &working[index])
        };

        if let Some(parent_id) = parent {
            trace!(node = %working[index].id, parent = %parent_id, "resolved parent");
            let parent_slot = slot_of[parent_id];
            if let Some(children) = nodes[parent_slot].children.as_mut() {
                children.push(working[index].id.clone());
            }
        }
    }

    debug!(node_count = nodes.len(), "hierarchy built");

    Ok(Hierarchy {
        nodes,
        edges: data.edges.clone(),
    })
}

/// Produce the geometry-ordered working sequence
///
/// Group nodes are stably sorted by ascending area and re-placed into the
/// slots that group nodes occupied in the input; non-group nodes never
/// move, so their mutual order is untouched. Equal-area groups keep their
/// input order.
fn sort_groups_by_area(nodes: &[CanvasNode]) -> Vec<CanvasNode> {
    let mut working: Vec<CanvasNode> = nodes.to_vec();

    let slots: Vec<usize> = working
        .iter()
        .enumerate()
        .filter(|(_, node)| node.is_group())
        .map(|(slot, _)| slot)
        .collect();

    let mut groups: Vec<CanvasNode> = slots.iter().map(|&slot| working[slot].clone()).collect();
    // Geometry is validated finite, so total_cmp orders it the obvious way.
    groups.sort_by(|a, b| a.area().total_cmp(&b.area()));

    for (slot, group) in slots.into_iter().zip(groups) {
        working[slot] = group;
    }

    working
}

/// Parent search for group nodes: forward-only scan
///
/// Scans the working sequence strictly after `index`; the first group whose
/// rectangle contains this group's midpoint wins. A group can only be
/// parented by a group at an equal-or-larger position in the area order.
fn find_group_parent_forward(working: &[CanvasNode], index: usize) -> Option<&str> {
    let (mx, my) = working[index].midpoint();
    working[index + 1..]
        .iter()
        .find(|candidate| candidate.is_group() && candidate.contains_point(mx, my))
        .map(|parent| parent.id.as_str())
}

/// Parent search for non-group nodes: full scan
///
/// Scans the entire working sequence from the start; because groups are
/// ordered by ascending area, the first containing group is the smallest
/// enclosing one.
fn find_leaf_parent<'a>(working: &'a [CanvasNode], node: &CanvasNode) -> Option<&'a str> {
    let (cx, cy) = node.midpoint();
    working
        .iter()
        .find(|candidate| candidate.is_group() && candidate.contains_point(cx, cy))
        .map(|parent| parent.id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NodeKind;

    fn group(id: &str, x: f64, y: f64, w: f64, h: f64) -> CanvasNode {
        CanvasNode {
            id: id.to_string(),
            x,
            y,
            width: w,
            height: h,
            color: None,
            kind: NodeKind::Group {
                label: Some(id.to_string()),
            },
        }
    }

    fn text(id: &str, x: f64, y: f64, w: f64, h: f64) -> CanvasNode {
        CanvasNode {
            id: id.to_string(),
            x,
            y,
            width: w,
            height: h,
            color: None,
            kind: NodeKind::Text {
                text: id.to_string(),
            },
        }
    }

    fn children_of<'a>(hierarchy: &'a Hierarchy, id: &str) -> &'a Option<Vec<String>> {
        &hierarchy.get_node(id).unwrap().children
    }

    #[test]
    fn test_groups_sort_ascending_by_area() {
        let nodes = vec![
            group("big", 0.0, 0.0, 400.0, 400.0),
            text("t", 500.0, 500.0, 50.0, 50.0),
            group("small", 10.0, 10.0, 100.0, 100.0),
        ];
        let working = sort_groups_by_area(&nodes);
        let ids: Vec<&str> = working.iter().map(|n| n.id.as_str()).collect();
        // Groups swap into area order using the group slots; the text node
        // stays in the middle.
        assert_eq!(ids, vec!["small", "t", "big"]);
    }

    #[test]
    fn test_equal_area_groups_keep_input_order() {
        let nodes = vec![
            group("first", 0.0, 0.0, 100.0, 100.0),
            group("second", 0.0, 0.0, 100.0, 100.0),
        ];
        let working = sort_groups_by_area(&nodes);
        let ids: Vec<&str> = working.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_leaf_lands_in_smallest_enclosing_group() {
        let data = CanvasData {
            nodes: vec![
                group("outer", 0.0, 0.0, 400.0, 400.0),
                group("inner", 50.0, 50.0, 200.0, 200.0),
                text("leaf", 100.0, 100.0, 50.0, 50.0),
            ],
            edges: vec![],
        };
        let hierarchy = build(&data).unwrap();
        assert_eq!(
            children_of(&hierarchy, "inner"),
            &Some(vec!["leaf".to_string()])
        );
        assert_eq!(
            children_of(&hierarchy, "outer"),
            &Some(vec!["inner".to_string()])
        );
    }

    #[test]
    fn test_leaf_outside_all_groups_has_no_parent() {
        let data = CanvasData {
            nodes: vec![
                group("g", 0.0, 0.0, 300.0, 300.0),
                text("inside", 50.0, 50.0, 50.0, 50.0),
                text("outside", 350.0, 350.0, 50.0, 50.0),
            ],
            edges: vec![],
        };
        let hierarchy = build(&data).unwrap();
        assert_eq!(
            children_of(&hierarchy, "g"),
            &Some(vec!["inside".to_string()])
        );
        assert_eq!(children_of(&hierarchy, "outside"), &None);
    }

    #[test]
    fn test_non_group_children_is_none_not_empty() {
        let data = CanvasData {
            nodes: vec![text("t", 0.0, 0.0, 10.0, 10.0)],
            edges: vec![],
        };
        let hierarchy = build(&data).unwrap();
        assert_eq!(hierarchy.nodes[0].children, None);

        let json = serde_json::to_value(&hierarchy).unwrap();
        assert_eq!(json["nodes"][0]["children"], serde_json::Value::Null);
    }

    #[test]
    fn test_group_children_serialize_as_array() {
        let data = CanvasData {
            nodes: vec![group("g", 0.0, 0.0, 100.0, 100.0)],
            edges: vec![],
        };
        let hierarchy = build(&data).unwrap();
        let json = serde_json::to_value(&hierarchy).unwrap();
        assert!(json["nodes"][0]["children"].is_array());
    }

    #[test]
    fn test_children_follow_working_sequence_order() {
        // Both the small group and the text land in "outer"; the group
        // comes first because it sits earlier in the working sequence.
        let data = CanvasData {
            nodes: vec![
                group("outer", -300.0, -380.0, 620.0, 320.0),
                group("inner", -260.0, -240.0, 540.0, 140.0),
                text("n1", -260.0, -340.0, 250.0, 60.0),
                text("n2", -220.0, -200.0, 250.0, 60.0),
                text("n3", -300.0, -20.0, 250.0, 60.0),
            ],
            edges: vec![],
        };
        let hierarchy = build(&data).unwrap();
        assert_eq!(
            children_of(&hierarchy, "outer"),
            &Some(vec!["inner".to_string(), "n1".to_string()])
        );
        assert_eq!(
            children_of(&hierarchy, "inner"),
            &Some(vec!["n2".to_string()])
        );
        assert_eq!(children_of(&hierarchy, "n3"), &None);
    }

    #[test]
    fn test_overlap_tiebreak_differs_for_groups_and_leaves() {
        // Two overlapping groups; the point (150, 150) sits inside both.
        // The smaller group parents to the bigger one (forward scan), while
        // the leaf at that point parents to the smaller group (full scan).
        let data = CanvasData {
            nodes: vec![
                group("g1", 0.0, 0.0, 200.0, 200.0),
                group("g2", 100.0, 100.0, 200.0, 200.0),
                text("leaf", 150.0, 150.0, 50.0, 50.0),
            ],
            edges: vec![],
        };
        let hierarchy = build(&data).unwrap();
        assert_eq!(
            children_of(&hierarchy, "g2"),
            &Some(vec!["g1".to_string()])
        );
        assert_eq!(
            children_of(&hierarchy, "g1"),
            &Some(vec!["leaf".to_string()])
        );
    }

    #[test]
    fn test_edges_pass_through_unchanged() {
        let mut edge = CanvasEdge::new("e1", "a", "b");
        edge.label = Some("label".to_string());
        let data = CanvasData {
            nodes: vec![text("a", 0.0, 0.0, 10.0, 10.0), text("b", 50.0, 0.0, 10.0, 10.0)],
            edges: vec![edge.clone(), CanvasEdge::new("e2", "b", "a")],
        };
        let hierarchy = build(&data).unwrap();
        assert_eq!(hierarchy.edges, data.edges);
    }

    #[test]
    fn test_empty_input() {
        let hierarchy = build(&CanvasData::new()).unwrap();
        assert!(hierarchy.nodes.is_empty());
        assert!(hierarchy.edges.is_empty());
    }

    #[test]
    fn test_invalid_input_is_rejected_before_building() {
        let data = CanvasData {
            nodes: vec![text("a", 0.0, 0.0, 10.0, 10.0)],
            edges: vec![CanvasEdge::new("e", "a", "missing")],
        };
        assert!(build(&data).is_err());
    }
}
