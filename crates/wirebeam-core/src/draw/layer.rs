//! Layer-based z-ordering for SVG output.
//!
//! Drawables push nodes into a [`LayeredOutput`] tagged with a
//! [`RenderLayer`]; rendering emits one `<g data-layer="...">` group per
//! non-empty layer, bottom to top.
//!
//! ```
//! # use wirebeam_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Circle, Path};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Node, Box::new(Circle::new()));
//! output.add_to_layer(RenderLayer::Track, Box::new(Path::new()));
//!
//! // Track renders first even though it was added last
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Diagram background
    Background,
    /// Static, low-opacity beam tracks
    Track,
    /// Animated gradient beams
    Beam,
    /// Node circles drawn over beam endpoints
    Node,
    /// Icons inside nodes
    Icon,
}

impl RenderLayer {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Track => "track",
            Self::Beam => "beam",
            Self::Node => "node",
            Self::Icon => "icon",
        }
    }
}

/// SVG nodes grouped by rendering layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node to `layer`. Nodes keep insertion order within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends every node of `other` to this output.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Returns one `<g>` per non-empty layer, in rendering order.
    pub fn render(mut self) -> Vec<SvgNode> {
        // Stable sort keeps insertion order inside each layer
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result: Vec<SvgNode> = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, node) in self.items {
            current = match current {
                Some((current_layer, group)) if current_layer == layer => {
                    Some((current_layer, group.add(node)))
                }
                previous => {
                    if let Some((_, group)) = previous {
                        result.push(Box::new(group));
                    }
                    let group = svg_element::Group::new().set("data-layer", layer.name());
                    Some((layer, group.add(node)))
                }
            };
        }

        if let Some((_, group)) = current {
            result.push(Box::new(group));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Circle, Path, Rectangle};

    use super::*;

    fn rendered(output: LayeredOutput) -> Vec<String> {
        output.render().iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_empty_output_renders_nothing() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layers_render_bottom_to_top() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Icon, Box::new(Circle::new()));
        output.add_to_layer(RenderLayer::Track, Box::new(Path::new()));
        output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));

        let groups = rendered(output);

        assert_eq!(groups.len(), 3);
        assert!(groups[0].contains(r#"data-layer="background""#));
        assert!(groups[1].contains(r#"data-layer="track""#));
        assert!(groups[2].contains(r#"data-layer="icon""#));
    }

    #[test]
    fn test_same_layer_shares_one_group() {
        let mut first = LayeredOutput::new();
        first.add_to_layer(RenderLayer::Beam, Box::new(Path::new().set("id", "a")));

        let mut second = LayeredOutput::new();
        second.add_to_layer(RenderLayer::Beam, Box::new(Path::new().set("id", "b")));

        first.merge(second);
        let groups = rendered(first);

        assert_eq!(groups.len(), 1);
        let a = groups[0].find(r#"id="a""#).unwrap();
        let b = groups[0].find(r#"id="b""#).unwrap();
        assert!(a < b, "insertion order must be preserved within a layer");
    }
}
