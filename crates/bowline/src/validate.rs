//! Field-level validation of canvas data and conversion parameters
//!
//! Structural checks (the document is not an object, `nodes` is not an
//! array, geometry is not numeric, unrecognized side/end tokens) are the
//! job of the serde layer in [`CanvasData::from_json_str`]. The checks here
//! are the ones that remain meaningful on typed data: empty or duplicate
//! ids, unknown node types, non-finite geometry, missing payload content,
//! and dangling edge endpoints. The pipeline never sees invalid input.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::core::{CanvasData, CanvasError, Direction, NodeKind};
use crate::flowchart::ColorOverrides;

/// Validate the structure and content of canvas data
///
/// Errors identify the offending node or edge by its index in the input.
pub fn validate_canvas(data: &CanvasData) -> Result<(), CanvasError> {
    trace!(
        node_count = data.nodes.len(),
        edge_count = data.edges.len(),
        "validating canvas data"
    );

    let mut node_ids: HashSet<&str> = HashSet::with_capacity(data.nodes.len());

    for (index, node) in data.nodes.iter().enumerate() {
        if node.id.trim().is_empty() {
            return Err(CanvasError::invalid_node(
                index,
                "id must be a non-empty string",
            ));
        }

        if !node_ids.insert(node.id.as_str()) {
            return Err(CanvasError::DuplicateNodeId {
                id: node.id.clone(),
            });
        }

        if !(node.x.is_finite()
            && node.y.is_finite()
            && node.width.is_finite()
            && node.height.is_finite())
        {
            return Err(CanvasError::invalid_node(
                index,
                "dimensions must be finite numbers",
            ));
        }

        match &node.kind {
            NodeKind::Text { .. } => {}
            NodeKind::File { file, .. } => {
                if file.trim().is_empty() {
                    return Err(CanvasError::invalid_node(
                        index,
                        "file must be a non-empty string",
                    ));
                }
            }
            NodeKind::Link { url } => {
                if url.trim().is_empty() {
                    return Err(CanvasError::invalid_node(
                        index,
                        "url must be a non-empty string",
                    ));
                }
            }
            NodeKind::Group { .. } => {}
            NodeKind::Unknown => {
                return Err(CanvasError::invalid_node(index, "unrecognized node type"));
            }
        }
    }

    let mut edge_ids: HashSet<&str> = HashSet::with_capacity(data.edges.len());

    for (index, edge) in data.edges.iter().enumerate() {
        if edge.id.trim().is_empty() {
            return Err(CanvasError::invalid_edge(
                index,
                "id must be a non-empty string",
            ));
        }

        if !edge_ids.insert(edge.id.as_str()) {
            return Err(CanvasError::DuplicateEdgeId {
                id: edge.id.clone(),
            });
        }

        if !node_ids.contains(edge.from_node.as_str()) || !node_ids.contains(edge.to_node.as_str())
        {
            return Err(CanvasError::invalid_edge(
                index,
                "fromNode or toNode does not exist",
            ));
        }
    }

    debug!(
        node_count = data.nodes.len(),
        edge_count = data.edges.len(),
        "canvas data validated"
    );
    Ok(())
}

/// Validate a custom color override map
///
/// At most 6 entries; keys must be palette indices `"1".."6"`; values must
/// be 6-digit hex color codes like `#248a42`.
pub fn validate_custom_colors(custom_colors: &ColorOverrides) -> Result<(), CanvasError> {
    if custom_colors.len() > 6 {
        return Err(CanvasError::TooManyColors {
            count: custom_colors.len(),
        });
    }

    for (key, value) in custom_colors {
        if !is_palette_index(key) {
            return Err(CanvasError::InvalidColorKey { key: key.clone() });
        }

        if !is_hex_color(value) {
            return Err(CanvasError::InvalidColorValue {
                key: key.clone(),
                value: value.clone(),
            });
        }
    }

    Ok(())
}

/// Validate a graph direction token, yielding the typed direction
pub fn validate_direction(direction: &str) -> Result<Direction, CanvasError> {
    Direction::from_token(direction).ok_or_else(|| CanvasError::invalid_direction(direction))
}

// Palette keys are exactly the single digits 1-6.
fn is_palette_index(key: &str) -> bool {
    matches!(key, "1" | "2" | "3" | "4" | "5" | "6")
}

// A color value must match ^#[0-9A-Fa-f]{6}$.
fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}
