//! Accent colors for diagram nodes.
//!
//! Nodes pick their color from a closed set of named [`Accent`]s rather than
//! free-form style strings. The [`Palette`] maps each accent to a concrete
//! [`Color`] and is passed explicitly to whatever renders the nodes.

use std::{collections::HashMap, fmt};

use serde::Deserialize;

use crate::color::Color;

/// Named color variant for a diagram node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Indigo,
    Blue,
    Green,
    Lime,
    Violet,
    Purple,
    Gray,
}

impl Accent {
    /// All accents, in declaration order.
    pub const ALL: [Accent; 7] = [
        Self::Indigo,
        Self::Blue,
        Self::Green,
        Self::Lime,
        Self::Violet,
        Self::Purple,
        Self::Gray,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Indigo => "indigo",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Lime => "lime",
            Self::Violet => "violet",
            Self::Purple => "purple",
            Self::Gray => "gray",
        }
    }

    fn default_hex(self) -> &'static str {
        match self {
            Self::Indigo => "#6366f1",
            Self::Blue => "#3b82f6",
            Self::Green => "#22c55e",
            Self::Lime => "#84cc16",
            Self::Violet => "#8b5cf6",
            Self::Purple => "#a855f7",
            Self::Gray => "#6b7280",
        }
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mapping from [`Accent`] to [`Color`].
///
/// # Examples
///
/// ```
/// use wirebeam_core::{color::Color, palette::{Accent, Palette}};
///
/// let mut palette = Palette::default();
/// let red = Color::new("red").unwrap();
/// palette.set(Accent::Blue, red);
///
/// assert_eq!(palette.color(Accent::Blue), red);
/// assert_ne!(palette.color(Accent::Green), red);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: HashMap<Accent, Color>,
}

impl Palette {
    /// Returns the color for `accent`.
    pub fn color(&self, accent: Accent) -> Color {
        self.colors.get(&accent).copied().unwrap_or_default()
    }

    /// Overrides the color for `accent`.
    pub fn set(&mut self, accent: Accent, color: Color) {
        self.colors.insert(accent, color);
    }
}

impl Default for Palette {
    fn default() -> Self {
        let colors = Accent::ALL
            .into_iter()
            .map(|accent| {
                let color = Color::new(accent.default_hex())
                    .expect("default accent colors are valid CSS colors");
                (accent, color)
            })
            .collect();
        Self { colors }
    }
}
