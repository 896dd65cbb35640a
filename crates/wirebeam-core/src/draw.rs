//! Drawable components for diagram rendering.
//!
//! All drawables implement the [`Drawable`] trait, which renders to layered
//! SVG output. Layers are ordered during final SVG generation, so a node can
//! emit its circle and its icon to different layers and still end up above
//! every beam.

mod gradient;
mod icon;
mod layer;
mod node;
mod stroke;

pub use gradient::{GradientStop, LinearGradient};
pub use icon::{Glyph, Icon, Ring};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use node::{Node, NodeDefinition};
pub use stroke::{StrokeCap, StrokeDefinition};

use crate::geometry::Point;

/// Trait for diagram elements that can be rendered to SVG layers.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable centered on `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;
}
