//! Circular diagram nodes that beams connect.

use std::rc::Rc;

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, Icon, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

/// Shared visual settings for nodes.
#[derive(Debug, Clone)]
pub struct NodeDefinition {
    fill: Color,
    outline_width: f32,
    icon_scale: f32,
}

impl NodeDefinition {
    pub fn new(fill: Color) -> Self {
        Self {
            fill,
            ..Self::default()
        }
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn outline_width(&self) -> f32 {
        self.outline_width
    }

    /// Icon side length as a fraction of the node diameter.
    pub fn icon_scale(&self) -> f32 {
        self.icon_scale
    }

    pub fn set_outline_width(&mut self, width: f32) {
        self.outline_width = width;
    }

    pub fn set_icon_scale(&mut self, scale: f32) {
        self.icon_scale = scale;
    }
}

impl Default for NodeDefinition {
    fn default() -> Self {
        Self {
            fill: Color::new("white").expect("'white' is a valid CSS color"),
            outline_width: 2.0,
            icon_scale: 0.6,
        }
    }
}

/// A node: a circle inscribed in the element's box, outlined in its accent color.
#[derive(Debug, Clone)]
pub struct Node {
    definition: Rc<NodeDefinition>,
    accent: Color,
    icon: Option<Rc<dyn Icon>>,
    size: Size,
}

impl Node {
    pub fn new(definition: Rc<NodeDefinition>, accent: Color, size: Size) -> Self {
        Self {
            definition,
            accent,
            icon: None,
            size,
        }
    }

    pub fn with_icon(mut self, icon: Rc<dyn Icon>) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn diameter(&self) -> f32 {
        self.size.width().min(self.size.height())
    }
}

impl Drawable for Node {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let diameter = self.diameter();

        let outline = StrokeDefinition::new(self.accent, self.definition.outline_width());
        let circle = svg_element::Circle::new()
            .set("cx", position.x())
            .set("cy", position.y())
            .set("r", diameter / 2.0)
            .set("fill", self.definition.fill().opaque().to_string())
            .set("fill-opacity", self.definition.fill().alpha());
        let circle = crate::apply_stroke!(circle, &outline);
        output.add_to_layer(RenderLayer::Node, Box::new(circle));

        if let Some(icon) = &self.icon {
            let icon_size = diameter * self.definition.icon_scale();
            output.add_to_layer(
                RenderLayer::Icon,
                icon.render(position, icon_size, self.accent),
            );
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::draw::{Glyph, Ring};

    fn node(size: Size) -> Node {
        Node::new(
            Rc::new(NodeDefinition::default()),
            Color::new("#22c55e").unwrap(),
            size,
        )
    }

    #[test]
    fn test_diameter_uses_shorter_side() {
        assert_approx_eq!(f32, node(Size::new(40.0, 64.0)).diameter(), 40.0);
        assert_approx_eq!(f32, node(Size::new(80.0, 48.0)).diameter(), 48.0);
    }

    #[test]
    fn test_render_without_icon_uses_node_layer_only() {
        let groups = node(Size::new(40.0, 40.0))
            .render_to_layers(Point::new(60.0, 100.0))
            .render();

        assert_eq!(groups.len(), 1);
        let svg = groups[0].to_string();
        assert!(svg.contains(r#"data-layer="node""#));
        assert!(svg.contains(r#"cx="60""#));
        assert!(svg.contains(r#"r="20""#));
    }

    #[test]
    fn test_render_with_icon_adds_icon_layer() {
        let groups = node(Size::new(40.0, 40.0))
            .with_icon(Rc::new(Glyph::new("W")))
            .render_to_layers(Point::new(0.0, 0.0))
            .render();

        assert_eq!(groups.len(), 2);
        assert!(groups[1].to_string().contains(r#"data-layer="icon""#));
    }

    #[test]
    fn test_icon_is_sized_from_definition() {
        let mut definition = NodeDefinition::default();
        definition.set_icon_scale(0.5);
        let node = Node::new(Rc::new(definition), Color::default(), Size::new(100.0, 100.0))
            .with_icon(Rc::new(Ring));

        let groups = node.render_to_layers(Point::default()).render();
        // Ring radius is 30% of the 50px icon box
        assert!(groups[1].to_string().contains(r#"r="15""#));
    }
}
