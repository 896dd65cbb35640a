//! Stroke definitions for beam tracks and node outlines.
//!
//! - [`StrokeDefinition`]: color, width and line cap
//! - [`StrokeCap`]: how line endpoints are rendered
//! - [`apply_stroke!`](crate::apply_stroke!): applies a stroke to an SVG element
//!
//! | Property | SVG Attribute | Example Values |
//! |----------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#a3a3a3"`, `0.1` |
//! | `width` | `stroke-width` | `2.0` |
//! | `cap` | `stroke-linecap` | `"butt"`, `"round"`, `"square"` |

use crate::color::Color;

/// How line endpoints are rendered. Maps to `stroke-linecap`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// A stroke for rendering lines and outlines.
///
/// The color's alpha becomes `stroke-opacity`.
///
/// # Examples
///
/// ```
/// use wirebeam_core::color::Color;
/// use wirebeam_core::draw::{StrokeCap, StrokeDefinition};
///
/// let mut track = StrokeDefinition::new(Color::new("gray").unwrap().with_alpha(0.1), 2.0);
/// track.set_cap(StrokeCap::Round);
/// assert_eq!(track.width(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    cap: StrokeCap,
}

impl StrokeDefinition {
    /// Creates a stroke with butt caps.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn set_cap(&mut self, cap: StrokeCap) {
        self.cap = cap;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            cap: StrokeCap::default(),
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets color, opacity, width and line cap.
///
/// # Examples
///
/// ```
/// use wirebeam_core::color::Color;
/// use wirebeam_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 2.0);
/// let path = svg_element::Path::new().set("d", "M 0 0 L 10 10");
///
/// let path = wirebeam_core::apply_stroke!(path, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        $element
            .set("stroke", $stroke.color().opaque().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value())
    }};
}
