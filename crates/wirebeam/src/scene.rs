//! Scene descriptions: a layout snapshot of one diagram.
//!
//! A [`Scene`] lists a container, the nodes laid out inside it and the beams
//! connecting them. Scenes deserialize from TOML:
//!
//! ```toml
//! [container]
//! id = "workflow"
//! x = 0
//! y = 0
//! width = 800
//! height = 200
//!
//! [[nodes]]
//! id = "source"
//! x = 40
//! y = 80
//! width = 40
//! height = 40
//! accent = "indigo"
//! icon = { glyph = "S" }
//!
//! [[beams]]
//! from = "source"
//! to = "sink"
//! ```
//!
//! Rectangles are in viewport coordinates, like a bounding client rect.

use std::{collections::HashSet, rc::Rc};

use log::warn;
use serde::Deserialize;

use wirebeam_core::{
    curve::anchor_center,
    draw::{Glyph, Icon, Ring},
    geometry::{Bounds, Size},
    identifier::Id,
    palette::Accent,
};

use crate::error::WirebeamError;

/// An element's id and bounding rectangle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementSpec {
    id: String,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl ElementSpec {
    pub fn new(id: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
        }
    }

    pub fn name(&self) -> &str {
        &self.id
    }

    pub fn id(&self) -> Id {
        Id::new(&self.id)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_rect(self.x, self.y, self.width, self.height)
    }

    fn validate(&self) -> Result<(), WirebeamError> {
        validate_rect("container", &self.id, self.x, self.y, self.width, self.height)
    }
}

fn validate_rect(
    what: &str,
    id: &str,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> Result<(), WirebeamError> {
    if id.trim().is_empty() {
        return Err(WirebeamError::Scene(format!("{what} id must not be empty")));
    }
    if [x, y, width, height].iter().any(|v| !v.is_finite()) {
        return Err(WirebeamError::Scene(format!(
            "{what} `{id}` has a non-finite coordinate"
        )));
    }
    if width < 0.0 || height < 0.0 {
        return Err(WirebeamError::Scene(format!(
            "{what} `{id}` has a negative size ({width} x {height})"
        )));
    }
    if !(x + width).is_finite() || !(y + height).is_finite() {
        return Err(WirebeamError::Scene(format!(
            "{what} `{id}` extends past the representable coordinate range"
        )));
    }
    Ok(())
}

/// Viewport size at mount time.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewportSpec {
    width: f32,
    height: f32,
}

impl ViewportSpec {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Icon drawn inside a node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSpec {
    /// Short text, such as a brand initial
    Glyph(String),
    /// Concentric ring
    Ring,
}

impl IconSpec {
    pub fn to_icon(&self) -> Rc<dyn Icon> {
        match self {
            Self::Glyph(text) => Rc::new(Glyph::new(text.as_str())),
            Self::Ring => Rc::new(Ring),
        }
    }
}

fn default_mounted() -> bool {
    true
}

/// A diagram node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    id: String,
    x: f32,
    y: f32,
    width: f32,
    height: f32,

    #[serde(default)]
    accent: Accent,

    #[serde(default)]
    icon: Option<IconSpec>,

    /// Unmounted nodes are described but not laid out, so beams touching them stay empty.
    #[serde(default = "default_mounted")]
    mounted: bool,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
            accent: Accent::default(),
            icon: None,
            mounted: true,
        }
    }

    pub fn with_accent(mut self, accent: Accent) -> Self {
        self.accent = accent;
        self
    }

    pub fn with_icon(mut self, icon: IconSpec) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_mounted(mut self, mounted: bool) -> Self {
        self.mounted = mounted;
        self
    }

    pub fn name(&self) -> &str {
        &self.id
    }

    pub fn id(&self) -> Id {
        Id::new(&self.id)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_rect(self.x, self.y, self.width, self.height)
    }

    pub fn accent(&self) -> Accent {
        self.accent
    }

    pub fn icon(&self) -> Option<&IconSpec> {
        self.icon.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}

/// A beam between two nodes, with optional timing overrides in seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeamSpec {
    from: String,
    to: String,
    #[serde(default)]
    duration: Option<f32>,
    #[serde(default)]
    delay: Option<f32>,
}

impl BeamSpec {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            duration: None,
            delay: None,
        }
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn duration(&self) -> Option<f32> {
        self.duration
    }

    pub fn delay(&self) -> Option<f32> {
        self.delay
    }
}

/// One diagram: a container, its nodes and the beams between them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    container: ElementSpec,

    #[serde(default)]
    viewport: Option<ViewportSpec>,

    #[serde(default)]
    nodes: Vec<NodeSpec>,

    #[serde(default)]
    beams: Vec<BeamSpec>,
}

impl Scene {
    pub fn new(container: ElementSpec) -> Self {
        Self {
            container,
            viewport: None,
            nodes: Vec::new(),
            beams: Vec::new(),
        }
    }

    pub fn with_viewport(mut self, viewport: ViewportSpec) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn with_node(mut self, node: NodeSpec) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_beam(mut self, beam: BeamSpec) -> Self {
        self.beams.push(beam);
        self
    }

    pub fn container(&self) -> &ElementSpec {
        &self.container
    }

    /// The viewport size, defaulting to the container size.
    pub fn viewport_size(&self) -> Size {
        self.viewport
            .map(|viewport| viewport.size())
            .unwrap_or_else(|| self.container.bounds().to_size())
    }

    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    pub fn beams(&self) -> &[BeamSpec] {
        &self.beams
    }

    /// Checks that ids are unique and every beam refers to a declared node.
    ///
    /// Nodes outside the container are allowed and only logged.
    ///
    /// # Errors
    ///
    /// Returns [`WirebeamError::Scene`] describing the first problem found.
    pub fn validate(&self) -> Result<(), WirebeamError> {
        self.container.validate()?;
        if let Some(viewport) = self.viewport {
            if ![viewport.width, viewport.height]
                .iter()
                .all(|v| v.is_finite() && *v >= 0.0)
            {
                return Err(WirebeamError::Scene(format!(
                    "viewport has an invalid size ({} x {})",
                    viewport.width, viewport.height
                )));
            }
        }

        let container_bounds = self.container.bounds();
        let mut ids = HashSet::new();
        for node in &self.nodes {
            validate_rect("node", &node.id, node.x, node.y, node.width, node.height)?;
            let name = node.name();
            if name == self.container.name() {
                return Err(WirebeamError::Scene(format!(
                    "node `{name}` reuses the container id"
                )));
            }
            if !ids.insert(name) {
                return Err(WirebeamError::Scene(format!("duplicate node id `{name}`")));
            }
            let center = anchor_center(container_bounds, node.bounds());
            if !(center.x().is_finite() && center.y().is_finite()) {
                return Err(WirebeamError::Scene(format!(
                    "node `{name}` is too far from the container to place a beam"
                )));
            }
            if !container_bounds.contains(&node.bounds()) {
                warn!(
                    node = name,
                    container = self.container.name();
                    "Node lies outside its container"
                );
            }
        }

        for beam in &self.beams {
            for end in [beam.from(), beam.to()] {
                if !ids.contains(end) {
                    return Err(WirebeamError::Scene(format!(
                        "beam `{}` -> `{}` refers to unknown node `{end}`",
                        beam.from, beam.to
                    )));
                }
            }
            if let Some(duration) = beam.duration.filter(|d| !(*d > 0.0)) {
                return Err(WirebeamError::Scene(format!(
                    "beam `{}` -> `{}` has a non-positive duration {duration}",
                    beam.from, beam.to
                )));
            }
            if let Some(delay) = beam.delay.filter(|d| !(*d >= 0.0)) {
                return Err(WirebeamError::Scene(format!(
                    "beam `{}` -> `{}` has a negative delay {delay}",
                    beam.from, beam.to
                )));
            }
        }

        Ok(())
    }
}
