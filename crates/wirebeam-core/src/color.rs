//! Color handling for Wirebeam diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, so stroke, gradient and palette code can share one
//! parsed representation of CSS colors.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string such as `"#6366f1"`, `"rgb(59, 130, 246)"` or `"white"`.
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected input if it is not a CSS color.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirebeam_core::color::Color;
    ///
    /// let indigo = Color::new("#6366f1").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// Returns a copy of this color with the given alpha, between 0.0 and 1.0.
    ///
    /// # Examples
    ///
    /// ```
    /// use wirebeam_core::color::Color;
    ///
    /// let faded = Color::new("blue").unwrap().with_alpha(0.0);
    /// assert_eq!(faded.alpha(), 0.0);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component, between 0.0 (transparent) and 1.0 (opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the same color, fully opaque.
    ///
    /// SVG carries opacity in separate attributes (`stop-opacity`,
    /// `stroke-opacity`), so the color value itself is written without alpha.
    pub fn opaque(self) -> Self {
        self.with_alpha(1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
