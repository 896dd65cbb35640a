//! Linear gradients used as beam strokes.

use svg::node::element as svg_element;

use crate::{color::Color, geometry::Point};

/// One color stop of a gradient. `offset` is in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    offset: f32,
    color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn color(&self) -> Color {
        self.color
    }

    fn to_svg(self) -> svg_element::Stop {
        svg_element::Stop::new()
            .set("offset", self.offset)
            .set("stop-color", self.color.opaque().to_string())
            .set("stop-opacity", self.color.alpha())
    }
}

/// A `<linearGradient>` in user space, running along the segment `from`→`to`.
///
/// Beams use a "comet" gradient: transparent at both ends and solid in the
/// middle, so the dash animation reads as a pulse travelling along the wire.
///
/// # Examples
///
/// ```
/// use wirebeam_core::{color::Color, draw::LinearGradient, geometry::Point};
///
/// let start = Color::new("#6366f1").unwrap();
/// let end = Color::new("#3b82f6").unwrap();
/// let gradient = LinearGradient::comet("beam-0", start, end)
///     .with_axis(Point::new(60.0, 100.0), Point::new(720.0, 100.0));
///
/// let svg = gradient.to_svg().to_string();
/// assert!(svg.contains(r#"id="beam-0""#));
/// assert!(svg.contains(r#"gradientUnits="userSpaceOnUse""#));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    id: String,
    stops: Vec<GradientStop>,
    axis: Option<(Point, Point)>,
}

impl LinearGradient {
    /// Creates an empty gradient. `id` is made safe for use as an SVG id and
    /// in a `url(#...)` reference.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: to_id_safe_string(&id.into()),
            stops: Vec::new(),
            axis: None,
        }
    }

    /// Fades in from transparent `start`, peaks at `start` halfway, fades out to transparent `end`.
    pub fn comet(id: impl Into<String>, start: Color, end: Color) -> Self {
        Self::new(id)
            .with_stop(GradientStop::new(0.0, start.with_alpha(0.0)))
            .with_stop(GradientStop::new(0.5, start))
            .with_stop(GradientStop::new(1.0, end.with_alpha(0.0)))
    }

    pub fn with_stop(mut self, stop: GradientStop) -> Self {
        self.stops.push(stop);
        self
    }

    /// Sets the gradient vector. Without an axis the SVG default (left to right) applies.
    pub fn with_axis(mut self, from: Point, to: Point) -> Self {
        self.axis = Some((from, to));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns a `url(#id)` reference for use as a paint value.
    pub fn url(&self) -> String {
        format!("url(#{})", self.id)
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn to_svg(&self) -> svg_element::LinearGradient {
        let mut gradient = svg_element::LinearGradient::new()
            .set("id", self.id.as_str())
            .set("gradientUnits", "userSpaceOnUse");

        if let Some((from, to)) = self.axis {
            gradient = gradient
                .set("x1", from.x())
                .set("y1", from.y())
                .set("x2", to.x())
                .set("y2", to.y());
        }

        self.stops
            .iter()
            .fold(gradient, |gradient, stop| gradient.add(stop.to_svg()))
    }
}

/// Replaces characters that are not valid in an SVG id and makes sure the
/// id does not start with a digit.
fn to_id_safe_string(raw: &str) -> String {
    let mut sanitized: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized
        .chars()
        .next()
        .is_none_or(|c| c.is_ascii_digit() || c == '-')
    {
        sanitized = format!("g_{sanitized}");
    }

    sanitized
}
