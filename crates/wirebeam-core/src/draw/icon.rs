//! Renderable icons placed inside diagram nodes.

use std::fmt;

use svg::node::element as svg_element;

use crate::{color::Color, draw::SvgNode, geometry::Point};

/// Capability of drawing an icon into a square of side `size` centered on `center`.
pub trait Icon: fmt::Debug {
    fn render(&self, center: Point, size: f32, color: Color) -> SvgNode;
}

/// A short text mark (a letter or two) centered in the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    text: String,
}

impl Glyph {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Icon for Glyph {
    fn render(&self, center: Point, size: f32, color: Color) -> SvgNode {
        let text = svg_element::Text::new(self.text.as_str())
            .set("x", center.x())
            .set("y", center.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", "sans-serif")
            .set("font-weight", "600")
            .set("font-size", size * 0.5)
            .set("fill", color.opaque().to_string())
            .set("fill-opacity", color.alpha());
        Box::new(text)
    }
}

/// An inner ring, for nodes that carry no label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ring;

impl Icon for Ring {
    fn render(&self, center: Point, size: f32, color: Color) -> SvgNode {
        let ring = svg_element::Circle::new()
            .set("cx", center.x())
            .set("cy", center.y())
            .set("r", size * 3.0 / 10.0)
            .set("fill", "none")
            .set("stroke", color.opaque().to_string())
            .set("stroke-opacity", color.alpha())
            .set("stroke-width", (size * 2.0 / 25.0).max(1.0));
        Box::new(ring)
    }
}
