//! Bowline - Convert JSON Canvas data into Mermaid.js flowcharts
//!
//! A library for turning spatial canvas data (nodes with positions and
//! sizes, edges, optional grouping) into a containment hierarchy and a
//! Mermaid flowchart that a diagramming renderer can display.
//!
//! # Quick Start
//!
//! ```rust
//! use bowline::{render_flowchart_default, CanvasData};
//!
//! let data = CanvasData::from_json_str(
//!     r#"{
//!         "nodes": [
//!             {"id": "a", "type": "text", "text": "Start", "x": 0, "y": 0, "width": 100, "height": 50},
//!             {"id": "b", "type": "text", "text": "End", "x": 200, "y": 0, "width": 100, "height": 50}
//!         ],
//!         "edges": [
//!             {"id": "e", "fromNode": "a", "toNode": "b"}
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let flowchart = render_flowchart_default(&data).unwrap();
//! assert!(flowchart.starts_with("graph TB\n"));
//! assert!(flowchart.contains("a --> b"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use bowline::prelude::*;
//!
//! # let data = CanvasData::new();
//! // Resolve the containment hierarchy on its own
//! let hierarchy = bowline::build_hierarchy(&data).unwrap();
//!
//! // Render with a custom palette and direction
//! let mut overrides = ColorOverrides::new();
//! overrides.insert("1".to_string(), "#ff0000".to_string());
//! let flowchart = bowline::render_flowchart(&data, &overrides, "LR").unwrap();
//! assert!(flowchart.starts_with("graph LR"));
//! ```

pub mod core;
pub mod flowchart;
pub mod hierarchy;
pub mod validate;

pub use core::*;
pub use flowchart::{ColorMap, ColorOverrides, FlowchartRenderer};
pub use hierarchy::{Hierarchy, HierarchyNode};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        CanvasData, CanvasEdge, CanvasError, CanvasNode, Direction, EdgeEnd, NodeKind, Side,
    };
    pub use crate::flowchart::{ColorMap, ColorOverrides, FlowchartRenderer};
    pub use crate::hierarchy::{Hierarchy, HierarchyNode};
}

/// Build the containment hierarchy for a canvas
///
/// Validates the canvas, then resolves every node's nearest enclosing group
/// from geometry. Edges pass through identical in content and order.
///
/// # Example
/// ```rust
/// use bowline::{build_hierarchy, CanvasData};
///
/// let hierarchy = build_hierarchy(&CanvasData::new()).unwrap();
/// assert!(hierarchy.nodes.is_empty());
/// ```
pub fn build_hierarchy(data: &CanvasData) -> Result<Hierarchy, CanvasError> {
    hierarchy::build(data)
}

/// Convert a canvas into Mermaid flowchart syntax
///
/// Configuration is validated before any transformation work begins: the
/// override map may hold at most 6 entries keyed `"1".."6"` with 6-digit
/// hex values, and `direction` must be one of `TB`, `LR`, `BT`, `RL`.
pub fn render_flowchart(
    data: &CanvasData,
    custom_colors: &ColorOverrides,
    direction: &str,
) -> Result<String, CanvasError> {
    validate::validate_custom_colors(custom_colors)?;
    let direction = validate::validate_direction(direction)?;

    let hierarchy = hierarchy::build(data)?;
    let renderer =
        FlowchartRenderer::with_options(ColorMap::with_overrides(custom_colors), direction);
    renderer.render(&hierarchy)
}

/// Convert a canvas with the default palette and top-down flow
///
/// This is the simplest way to go from canvas data to a flowchart.
pub fn render_flowchart_default(data: &CanvasData) -> Result<String, CanvasError> {
    render_flowchart(data, &ColorOverrides::new(), "TB")
}
