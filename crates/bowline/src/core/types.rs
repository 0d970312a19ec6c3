//! Core type definitions for canvas processing
//!
//! This module contains the fundamental types used throughout Bowline:
//! canvas nodes and edges, connection sides and line endings, and the
//! flow direction of the generated flowchart.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A complete canvas: the nodes and edges of one diagram
///
/// This is the input to the conversion pipeline. It mirrors the JSON Canvas
/// file format, so a `.canvas` file deserializes directly into it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasData {
    /// Nodes in file order
    pub nodes: Vec<CanvasNode>,
    /// Edges in file order
    pub edges: Vec<CanvasEdge>,
}

impl CanvasData {
    /// Create an empty canvas
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse canvas data from a JSON string
    ///
    /// Structural problems (the document is not an object, `nodes` or
    /// `edges` is not an array, geometry is not numeric, an edge carries an
    /// unrecognized side or end token) surface here as
    /// [`CanvasError::Json`](crate::CanvasError::Json). Field-level checks
    /// such as duplicate ids run later in [`crate::validate`].
    pub fn from_json_str(input: &str) -> Result<Self, crate::CanvasError> {
        Ok(serde_json::from_str(input)?)
    }
}

/// A single node on the canvas
///
/// Every node has an id, a bounding rectangle, and an optional color.
/// The type-specific payload lives in [`NodeKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasNode {
    /// Unique identifier for the node
    pub id: String,
    /// Left edge of the bounding rectangle
    pub x: f64,
    /// Top edge of the bounding rectangle
    pub y: f64,
    /// Width of the bounding rectangle
    pub width: f64,
    /// Height of the bounding rectangle
    pub height: f64,
    /// Palette index ("1".."6") or a literal color string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Type-specific payload, tagged by the JSON `type` field
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl CanvasNode {
    /// Returns true if this node is a group container
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    /// Area of the bounding rectangle
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Center point of the bounding rectangle
    pub fn midpoint(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Containment test with inclusive bounds on all four edges
    pub fn contains_point(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// Type-specific node payload, a closed union over the JSON Canvas node types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    /// Plain text card: `{"type": "text", "text": "..."}`
    Text {
        /// Markdown/plain text content
        text: String,
    },
    /// Reference to a file: `{"type": "file", "file": "...", "subpath": "#..."}`
    File {
        /// Path to the referenced file
        file: String,
        /// Optional subpath within the file (heading or block reference)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subpath: Option<String>,
    },
    /// External URL: `{"type": "link", "url": "..."}`
    Link {
        /// The linked URL
        url: String,
    },
    /// Container that spatially encloses other nodes
    Group {
        /// Optional display label for the group border
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Any unrecognized `type` tag
    ///
    /// Rejected by the validator; contributes an empty block if it ever
    /// reaches the serializer.
    #[serde(other)]
    Unknown,
}

impl NodeKind {
    /// The JSON `type` tag for this variant
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Text { .. } => "text",
            NodeKind::File { .. } => "file",
            NodeKind::Link { .. } => "link",
            NodeKind::Group { .. } => "group",
            NodeKind::Unknown => "unknown",
        }
    }
}

/// An edge connecting two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasEdge {
    /// Unique identifier for the edge
    pub id: String,
    /// Id of the source node
    pub from_node: String,
    /// Side of the source node the edge leaves from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_side: Option<Side>,
    /// Line ending at the source (defaults to `none`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_end: Option<EdgeEnd>,
    /// Id of the target node
    pub to_node: String,
    /// Side of the target node the edge arrives at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_side: Option<Side>,
    /// Line ending at the target (defaults to `arrow`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_end: Option<EdgeEnd>,
    /// Palette index ("1".."6") or a literal color string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Optional label drawn along the edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CanvasEdge {
    /// Create a new edge with all optional fields unset
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from_node: from.into(),
            from_side: None,
            from_end: None,
            to_node: to.into(),
            to_side: None,
            to_end: None,
            color: None,
            label: None,
        }
    }

    /// Line ending at the source, with the `none` default applied
    pub fn effective_from_end(&self) -> EdgeEnd {
        self.from_end.unwrap_or(EdgeEnd::None)
    }

    /// Line ending at the target, with the `arrow` default applied
    pub fn effective_to_end(&self) -> EdgeEnd {
        self.to_end.unwrap_or(EdgeEnd::Arrow)
    }
}

/// Side of a node rectangle an edge attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Top => write!(f, "top"),
            Side::Right => write!(f, "right"),
            Side::Bottom => write!(f, "bottom"),
            Side::Left => write!(f, "left"),
        }
    }
}

/// Line ending of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeEnd {
    /// Plain line end, no arrowhead
    None,
    /// Arrowhead
    Arrow,
}

impl fmt::Display for EdgeEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeEnd::None => write!(f, "none"),
            EdgeEnd::Arrow => write!(f, "arrow"),
        }
    }
}

/// Flow direction for the generated flowchart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Direction {
    /// Top to bottom (TB)
    #[default]
    TopDown,
    /// Left to right (LR)
    LeftRight,
    /// Bottom to top (BT)
    BottomUp,
    /// Right to left (RL)
    RightLeft,
}

impl Direction {
    /// Parse a direction token (TB, LR, BT, RL)
    ///
    /// Tokens are matched exactly; lowercase input is rejected the same way
    /// any other unrecognized token is.
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "TB" => Some(Direction::TopDown),
            "LR" => Some(Direction::LeftRight),
            "BT" => Some(Direction::BottomUp),
            "RL" => Some(Direction::RightLeft),
            _ => None,
        }
    }

    /// The header token for this direction
    pub fn token(&self) -> &'static str {
        match self {
            Direction::TopDown => "TB",
            Direction::LeftRight => "LR",
            Direction::BottomUp => "BT",
            Direction::RightLeft => "RL",
        }
    }

    /// Returns true if this is a vertical layout (TB or BT)
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::TopDown | Direction::BottomUp)
    }

    /// Returns true if this is a horizontal layout (LR or RL)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::LeftRight | Direction::RightLeft)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}
