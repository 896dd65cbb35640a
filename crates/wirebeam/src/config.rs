//! Configuration types for Wirebeam rendering.
//!
//! This module provides configuration structures that control beam timing
//! and styling. All types implement [`serde::Deserialize`] and every field
//! has a default, so an empty TOML document is a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining timing, style and palette.
//! - [`TimingConfig`] - Default animation timing and the settle delay.
//! - [`StyleConfig`] - Track and gradient styling, optional background.
//! - [`PaletteConfig`] - Overrides for accent colors.
//!
//! # Example
//!
//! ```
//! # use wirebeam::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert_eq!(config.timing().settle_delay().as_millis(), 100);
//! ```

use std::{collections::HashMap, time::Duration};

use serde::Deserialize;

use wirebeam_core::{
    color::Color,
    draw::NodeDefinition,
    palette::{Accent, Palette},
};

use crate::beam::BeamTiming;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Timing configuration section.
    #[serde(default)]
    timing: TimingConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Accent color overrides.
    #[serde(default)]
    palette: PaletteConfig,
}

impl AppConfig {
    pub fn new(timing: TimingConfig, style: StyleConfig, palette: PaletteConfig) -> Self {
        Self {
            timing,
            style,
            palette,
        }
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn palette(&self) -> &PaletteConfig {
        &self.palette
    }

    /// Checks numeric ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        let timing = &self.timing;
        if !(timing.duration > 0.0) {
            return Err(format!(
                "timing.duration must be positive, got {}",
                timing.duration
            ));
        }
        if !(timing.delay >= 0.0) {
            return Err(format!(
                "timing.delay must not be negative, got {}",
                timing.delay
            ));
        }

        let style = &self.style;
        if !(style.stroke_width > 0.0) {
            return Err(format!(
                "style.stroke_width must be positive, got {}",
                style.stroke_width
            ));
        }
        if !(style.dash_length > 0.0) {
            return Err(format!(
                "style.dash_length must be positive, got {}",
                style.dash_length
            ));
        }
        if !(0.0..=1.0).contains(&style.track_opacity) {
            return Err(format!(
                "style.track_opacity must be within 0..=1, got {}",
                style.track_opacity
            ));
        }
        if !(style.icon_scale > 0.0 && style.icon_scale <= 1.0) {
            return Err(format!(
                "style.icon_scale must be within (0, 1], got {}",
                style.icon_scale
            ));
        }
        Ok(())
    }
}

/// Animation timing defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Dash cycle length in seconds, for beams that set none.
    duration: f32,

    /// Start offset in seconds, for beams that set none.
    delay: f32,

    /// Delay before the one-shot recompute after mount.
    settle_delay_ms: u64,
}

impl TimingConfig {
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Resolves per-beam timing, falling back to the configured defaults.
    pub fn beam_timing(&self, duration: Option<f32>, delay: Option<f32>) -> BeamTiming {
        BeamTiming::new(
            duration.unwrap_or(self.duration),
            delay.unwrap_or(self.delay),
        )
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duration: 3.0,
            delay: 0.0,
            settle_delay_ms: 100,
        }
    }
}

/// Visual styling of beams.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    track_color: String,
    track_opacity: f32,
    stroke_width: f32,
    dash_length: f32,
    gradient_start: String,
    gradient_end: String,
    node_fill: String,
    icon_scale: f32,
}

impl StyleConfig {
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the track color with the configured opacity applied.
    pub fn track_color(&self) -> Result<Color, String> {
        Color::new(&self.track_color)
            .map(|color| color.with_alpha(self.track_opacity))
            .map_err(|err| format!("Invalid track color in config: {err}"))
    }

    pub fn gradient_start(&self) -> Result<Color, String> {
        Color::new(&self.gradient_start)
            .map_err(|err| format!("Invalid gradient start color in config: {err}"))
    }

    pub fn gradient_end(&self) -> Result<Color, String> {
        Color::new(&self.gradient_end)
            .map_err(|err| format!("Invalid gradient end color in config: {err}"))
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Length of the dash pattern the beam animation cycles over.
    pub fn dash_length(&self) -> f32 {
        self.dash_length
    }

    /// Node styling: the configured fill and icon scale, outlined at the
    /// beam stroke width.
    pub fn node_definition(&self) -> Result<NodeDefinition, String> {
        let fill = Color::new(&self.node_fill)
            .map_err(|err| format!("Invalid node fill color in config: {err}"))?;
        let mut definition = NodeDefinition::new(fill);
        definition.set_outline_width(self.stroke_width);
        definition.set_icon_scale(self.icon_scale);
        Ok(definition)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            track_color: "#a3a3a3".to_string(),
            track_opacity: 0.1,
            stroke_width: 2.0,
            dash_length: 1500.0,
            gradient_start: "#6366f1".to_string(),
            gradient_end: "#3b82f6".to_string(),
            node_fill: "white".to_string(),
            icon_scale: 0.6,
        }
    }
}

/// Accent color overrides, keyed by accent name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PaletteConfig {
    overrides: HashMap<Accent, String>,
}

impl PaletteConfig {
    /// Builds the [`Palette`]: defaults with the configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error naming the accent whose override is not a valid color.
    pub fn palette(&self) -> Result<Palette, String> {
        let mut palette = Palette::default();
        for (accent, value) in &self.overrides {
            let color = Color::new(value)
                .map_err(|err| format!("Invalid color for accent `{accent}` in config: {err}"))?;
            palette.set(*accent, color);
        }
        Ok(palette)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_approx_eq!(f32, config.timing().duration(), 3.0);
        assert_approx_eq!(f32, config.timing().delay(), 0.0);
        assert_approx_eq!(f32, config.style().stroke_width(), 2.0);
        assert_approx_eq!(f32, config.style().dash_length(), 1500.0);
        assert_eq!(config.style().background_color(), Ok(None));
        assert_approx_eq!(f32, config.style().track_color().unwrap().alpha(), 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_beam_timing_fallback() {
        let timing = TimingConfig::default();
        assert_eq!(timing.beam_timing(None, None), BeamTiming::new(3.0, 0.0));
        assert_eq!(
            timing.beam_timing(Some(5.0), Some(0.5)),
            BeamTiming::new(5.0, 0.5)
        );
    }

    #[test]
    fn test_palette_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert(Accent::Blue, "#2563eb".to_string());
        let config = PaletteConfig { overrides };

        let palette = config.palette().unwrap();
        assert_eq!(palette.color(Accent::Blue), Color::new("#2563eb").unwrap());
        assert_eq!(palette.color(Accent::Green), Palette::default().color(Accent::Green));
    }

    #[test]
    fn test_invalid_palette_override() {
        let mut overrides = HashMap::new();
        overrides.insert(Accent::Lime, "not-a-color".to_string());
        let err = PaletteConfig { overrides }.palette().unwrap_err();
        assert!(err.contains("lime"));
    }

    #[test]
    fn test_invalid_background_color() {
        let style = StyleConfig {
            background_color: Some("nope".to_string()),
            ..StyleConfig::default()
        };
        assert!(style.background_color().is_err());
    }

    #[test]
    fn test_node_definition_follows_style() {
        let style = StyleConfig {
            stroke_width: 3.0,
            icon_scale: 0.5,
            ..StyleConfig::default()
        };
        let definition = style.node_definition().unwrap();
        assert_approx_eq!(f32, definition.outline_width(), 3.0);
        assert_approx_eq!(f32, definition.icon_scale(), 0.5);
        assert_eq!(definition.fill(), Color::new("white").unwrap());

        let style = StyleConfig {
            node_fill: "nope".to_string(),
            ..StyleConfig::default()
        };
        assert!(style.node_definition().unwrap_err().contains("node fill"));
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let config = AppConfig::new(
            TimingConfig {
                duration: 0.0,
                ..TimingConfig::default()
            },
            StyleConfig::default(),
            PaletteConfig::default(),
        );
        assert!(config.validate().unwrap_err().contains("timing.duration"));

        let config = AppConfig::new(
            TimingConfig::default(),
            StyleConfig {
                track_opacity: 1.5,
                ..StyleConfig::default()
            },
            PaletteConfig::default(),
        );
        assert!(config.validate().unwrap_err().contains("track_opacity"));

        let config = AppConfig::new(
            TimingConfig::default(),
            StyleConfig {
                icon_scale: 0.0,
                ..StyleConfig::default()
            },
            PaletteConfig::default(),
        );
        assert!(config.validate().unwrap_err().contains("icon_scale"));
    }
}
