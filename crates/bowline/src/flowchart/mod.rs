//! Mermaid flowchart serialization
//!
//! Walks a [`Hierarchy`] top-down and emits Mermaid flowchart syntax: one
//! block per node (nested `subgraph` blocks for groups), one line per edge,
//! and a trailing run of style directives.
//!
//! Two pieces of emission state are threaded through the walk explicitly:
//! the style buffer, which collects `style`/`linkStyle` lines as nodes and
//! edges are visited, and the edge counter, which advances for every edge
//! whether or not it is colored so that `linkStyle` directives always name
//! an edge's true position in the sequence.

mod color;

pub use color::{adjust_brightness, ColorMap, ColorOverrides, DEFAULT_PALETTE};

use tracing::{debug, span, trace, Level};

use crate::core::{CanvasEdge, CanvasError, Direction, EdgeEnd, NodeKind};
use crate::hierarchy::{Hierarchy, HierarchyNode};

/// Percentage applied to a node's fill color to derive its outline shade.
const OUTLINE_SHIFT: f64 = -20.0;

/// Mermaid flowchart renderer
///
/// Holds the per-conversion configuration: the resolved color map and the
/// flow direction. The renderer itself is stateless across calls; all
/// emission state lives in the walk.
pub struct FlowchartRenderer {
    colors: ColorMap,
    direction: Direction,
}

impl FlowchartRenderer {
    /// Create a renderer with the default palette and top-down flow
    pub fn new() -> Self {
        Self {
            colors: ColorMap::default(),
            direction: Direction::default(),
        }
    }

    /// Create a renderer with a specific color map and direction
    pub fn with_options(colors: ColorMap, direction: Direction) -> Self {
        Self { colors, direction }
    }

    /// The configured flow direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Render a hierarchy as Mermaid flowchart syntax
    ///
    /// Every node of the hierarchy sequence emits a block in order; nodes
    /// nested in a group are emitted again when their parent recurses into
    /// them, exactly as they would be by the canvas tooling this mirrors.
    /// Fails with [`CanvasError::CyclicHierarchy`] if group containment
    /// loops back on itself.
    pub fn render(&self, hierarchy: &Hierarchy) -> Result<String, CanvasError> {
        let render_span = span!(
            Level::DEBUG,
            "render_flowchart",
            node_count = hierarchy.node_count(),
            edge_count = hierarchy.edge_count()
        );
        let _enter = render_span.enter();

        let mut emitter = Emitter {
            hierarchy,
            colors: &self.colors,
            styles: String::new(),
            edge_index: 0,
        };

        let mut out = String::new();
        out.push_str("graph ");
        out.push_str(self.direction.token());
        out.push('\n');

        let mut descent = Vec::new();
        for node in &hierarchy.nodes {
            emitter.emit_node(node, &mut descent, &mut out)?;
            debug_assert!(descent.is_empty());
        }

        for edge in &hierarchy.edges {
            emitter.emit_edge(edge, &mut out);
        }

        // Node styles first, then edge styles, in generation order.
        out.push_str(&emitter.styles);

        debug!(output_len = out.len(), "flowchart rendered");
        Ok(out)
    }
}

impl Default for FlowchartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Emission state for one render pass
struct Emitter<'a> {
    hierarchy: &'a Hierarchy,
    colors: &'a ColorMap,
    /// Accumulated `style`/`linkStyle` lines, appended after the edge lines
    styles: String,
    /// Position of the next edge in the edge sequence; advances for every
    /// edge, colored or not
    edge_index: usize,
}

impl Emitter<'_> {
    fn emit_node(
        &mut self,
        node: &HierarchyNode,
        descent: &mut Vec<String>,
        out: &mut String,
    ) -> Result<(), CanvasError> {
        self.push_node_style(node);

        match &node.node.kind {
            NodeKind::Group { label } => {
                if descent.iter().any(|id| id == &node.node.id) {
                    return Err(CanvasError::cyclic_hierarchy(&node.node.id));
                }
                descent.push(node.node.id.clone());

                out.push_str(&format!(
                    "subgraph {}[\"{}\"]\n",
                    node.node.id,
                    display_label(label.as_deref())
                ));
                if let Some(children) = &node.children {
                    for child_id in children {
                        match self.hierarchy.get_node(child_id) {
                            Some(child) => self.emit_node(child, descent, out)?,
                            // A child id that no longer resolves is skipped.
                            None => trace!(child = %child_id, "skipping unresolved child id"),
                        }
                    }
                }
                out.push_str("end\n");

                descent.pop();
            }
            NodeKind::Text { text } => {
                out.push_str(&format!(
                    "{}[\"{}\"]\n",
                    node.node.id,
                    display_label(Some(text))
                ));
            }
            NodeKind::File { file, subpath } => {
                let label = match subpath {
                    Some(subpath) => format!("{}{}", file, subpath),
                    None => file.clone(),
                };
                out.push_str(&format!("{}[\"{}\"]\n", node.node.id, label));
            }
            NodeKind::Link { url } => {
                out.push_str(&format!("{}[\"{}\"]\n", node.node.id, url));
            }
            // Unrecognized node types contribute an empty block.
            NodeKind::Unknown => {}
        }

        Ok(())
    }

    fn emit_edge(&mut self, edge: &CanvasEdge, out: &mut String) {
        self.push_edge_style(edge);

        let connector = match (edge.effective_from_end(), edge.effective_to_end()) {
            (EdgeEnd::None, EdgeEnd::Arrow) => "-->",
            (EdgeEnd::Arrow, EdgeEnd::None) => "<--",
            (EdgeEnd::Arrow, EdgeEnd::Arrow) => "<-->",
            (EdgeEnd::None, EdgeEnd::None) => "---",
        };

        let label = match edge.label.as_deref() {
            Some(label) if !label.is_empty() => format!(" |{}|", label),
            _ => String::new(),
        };

        out.push_str(&format!(
            "{} {}{} {}\n",
            edge.from_node, connector, label, edge.to_node
        ));
    }

    fn push_node_style(&mut self, node: &HierarchyNode) {
        let Some(color) = &node.node.color else {
            return;
        };

        let fill = self.colors.resolve(color);
        let stroke = adjust_brightness(fill, OUTLINE_SHIFT);
        self.styles
            .push_str(&format!("style {} fill:{}, stroke:{}\n", node.node.id, fill, stroke));
    }

    fn push_edge_style(&mut self, edge: &CanvasEdge) {
        // The index advances for every edge so that colored edges later in
        // the sequence still style their true position.
        let index = self.edge_index;
        self.edge_index += 1;

        let Some(color) = &edge.color else {
            return;
        };

        let stroke = self.colors.resolve(color);
        self.styles
            .push_str(&format!("linkStyle {} stroke:{}\n", index, stroke));
    }
}

/// Group and text labels render an empty string as a single space so the
/// quoted token never collapses into the block delimiter.
fn display_label(label: Option<&str>) -> &str {
    match label {
        Some(label) if !label.is_empty() => label,
        _ => " ",
    }
}
