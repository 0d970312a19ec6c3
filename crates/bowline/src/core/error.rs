//! Core error types for canvas processing
//!
//! This module defines the error type shared by the validation, hierarchy,
//! and serialization stages. Every failure is a caller-input defect: errors
//! are fatal, synchronous, and never retried.

use thiserror::Error;

/// Errors produced by the canvas conversion pipeline
#[derive(Error, Debug)]
pub enum CanvasError {
    /// Structural failure: the input is not shaped like canvas data at all
    #[error("invalid canvas data: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("invalid node at index {index}: {message}")]
    InvalidNode { index: usize, message: String },

    #[error("invalid edge at index {index}: {message}")]
    InvalidEdge { index: usize, message: String },

    #[error("duplicate node id: {id}")]
    DuplicateNodeId { id: String },

    #[error("duplicate edge id: {id}")]
    DuplicateEdgeId { id: String },

    #[error("invalid customColors: maximum of 6 colors allowed, got {count}")]
    TooManyColors { count: usize },

    #[error("invalid color key: {key}. Must be a number from 1 to 6")]
    InvalidColorKey { key: String },

    #[error("invalid color value for key {key}: {value}. Must be a 6-digit hex color code")]
    InvalidColorValue { key: String, value: String },

    #[error("invalid graph direction {direction}. Only \"TB\", \"LR\", \"BT\", and \"RL\" are allowed")]
    InvalidDirection { direction: String },

    /// Group containment loops back on itself during serialization
    #[error("cyclic group hierarchy involving node {id}")]
    CyclicHierarchy { id: String },
}

impl CanvasError {
    /// Create a new node validation error
    pub fn invalid_node(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidNode {
            index,
            message: message.into(),
        }
    }

    /// Create a new edge validation error
    pub fn invalid_edge(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidEdge {
            index,
            message: message.into(),
        }
    }

    /// Create a new invalid-direction error
    pub fn invalid_direction(direction: impl Into<String>) -> Self {
        Self::InvalidDirection {
            direction: direction.into(),
        }
    }

    /// Create a new cyclic-hierarchy error
    pub fn cyclic_hierarchy(id: impl Into<String>) -> Self {
        Self::CyclicHierarchy { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_node_message() {
        let error = CanvasError::invalid_node(3, "id must be a non-empty string");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("index 3"));
        assert!(error_msg.contains("id must be a non-empty string"));
    }

    #[test]
    fn test_invalid_edge_message() {
        let error = CanvasError::invalid_edge(0, "fromNode or toNode does not exist");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("invalid edge"));
        assert!(error_msg.contains("index 0"));
    }

    #[test]
    fn test_duplicate_node_id_message() {
        let error = CanvasError::DuplicateNodeId {
            id: "node-1".to_string(),
        };
        assert!(format!("{}", error).contains("duplicate node id: node-1"));
    }

    #[test]
    fn test_invalid_direction_message() {
        let error = CanvasError::invalid_direction("XX");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("XX"));
        assert!(error_msg.contains("\"TB\""));
    }

    #[test]
    fn test_cyclic_hierarchy_message() {
        let error = CanvasError::cyclic_hierarchy("loop-group");
        assert!(format!("{}", error).contains("cyclic group hierarchy"));
        assert!(format!("{}", error).contains("loop-group"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: CanvasError = json_err.into();
        assert!(format!("{}", error).contains("invalid canvas data"));
    }
}
