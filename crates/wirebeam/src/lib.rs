//! Wirebeam: animated connector beams between laid-out elements.
//!
//! A beam is a cubic S-curve drawn from the center of one element to the
//! center of another, in the coordinate space of a container. Mounted beams
//! follow layout: they recompute when the container or viewport is resized
//! and once more after a short settle delay.
//!
//! The crate is organized around a few pieces:
//!
//! - [`document::Document`]: a single-threaded layout host with resize
//!   observers, timers and animation frames
//! - [`beam::AnimatedBeam`]: the beam component and its mounted form
//! - [`scene::Scene`]: a serializable diagram description
//! - [`SceneBuilder`]: mounts a scene, lets it settle and renders SVG
//!
//! # Examples
//!
//! ```
//! use wirebeam::{SceneBuilder, config::AppConfig};
//! use wirebeam::scene::{BeamSpec, ElementSpec, NodeSpec, Scene};
//!
//! let scene = Scene::new(ElementSpec::new("workflow", 0.0, 0.0, 800.0, 200.0))
//!     .with_node(NodeSpec::new("source", 40.0, 80.0, 40.0, 40.0))
//!     .with_node(NodeSpec::new("sink", 700.0, 80.0, 40.0, 40.0))
//!     .with_beam(BeamSpec::new("source", "sink"));
//!
//! let builder = SceneBuilder::new(AppConfig::default());
//! let mounted = builder.mount(&scene).expect("valid scene");
//! assert_eq!(mounted.beams()[0].path(), "M 60 100 C 390 100 390 100 720 100");
//!
//! let svg = builder.render_svg(&mounted).expect("renderable scene");
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod beam;
pub mod config;
pub mod document;
pub mod layout;
pub mod scene;
pub mod subscription;

mod error;
mod export;

pub use wirebeam_core::{color, curve, draw, geometry, identifier, palette};

pub use error::WirebeamError;

use log::{debug, info, warn};

use beam::{AnimatedBeam, MountedBeam};
use config::AppConfig;
use document::Document;
use export::Exporter;
use identifier::Id;
use scene::Scene;

/// A scene mounted on its own [`Document`], with one mounted beam per beam spec.
///
/// The document stays live: callers can keep changing layout through
/// [`MountedScene::document`] and the beams follow.
#[derive(Debug)]
pub struct MountedScene {
    scene: Scene,
    document: Document,
    beams: Vec<MountedBeam>,
}

impl MountedScene {
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mounted beams, in scene order.
    pub fn beams(&self) -> &[MountedBeam] {
        &self.beams
    }

    /// Finds the first beam running from `from` to `to`.
    pub fn beam(&self, from: &str, to: &str) -> Option<&MountedBeam> {
        let (from, to) = (Id::new(from), Id::new(to));
        self.beams
            .iter()
            .find(|beam| beam.beam().anchors().from() == from && beam.beam().anchors().to() == to)
    }

    /// Detaches every beam. The document is dropped with the scene.
    pub fn unmount(self) {
        let count = self.beams.len();
        for beam in self.beams {
            beam.unmount();
        }
        debug!(beams = count; "Scene unmounted");
    }
}

/// Builder for mounting and rendering Wirebeam scenes.
///
/// # Examples
///
/// ```rust,no_run
/// use wirebeam::{SceneBuilder, config::AppConfig};
///
/// let builder = SceneBuilder::new(AppConfig::default());
///
/// // Or use default config
/// let builder = SceneBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct SceneBuilder {
    config: AppConfig,
}

impl SceneBuilder {
    /// Create a new scene builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Mount a scene and let its layout settle.
    ///
    /// Validates the scene, lays out the container and every mounted node on
    /// a fresh [`Document`], mounts one beam per beam spec, then advances the
    /// clock past the settle delay and runs a frame so every beam whose
    /// endpoints are mounted has a path.
    ///
    /// # Errors
    ///
    /// Returns `WirebeamError::Config` for out-of-range configuration values
    /// and `WirebeamError::Scene` for an invalid scene.
    pub fn mount(&self, scene: &Scene) -> Result<MountedScene, WirebeamError> {
        info!(
            container = scene.container().name(),
            nodes = scene.nodes().len(),
            beams = scene.beams().len();
            "Mounting scene"
        );

        self.config.validate().map_err(WirebeamError::Config)?;
        scene.validate()?;
        debug!("Scene validated successfully");

        let document = Document::new(scene.viewport_size());
        let container = scene.container().id();
        document.set_rect(container, scene.container().bounds());
        for node in scene.nodes().iter().filter(|node| node.is_mounted()) {
            document.set_rect(node.id(), node.bounds());
        }

        let timing = self.config.timing();
        let beams: Vec<MountedBeam> = scene
            .beams()
            .iter()
            .map(|spec| {
                AnimatedBeam::new(container, Id::new(spec.from()), Id::new(spec.to()))
                    .with_timing(timing.beam_timing(spec.duration(), spec.delay()))
                    .mount(&document, timing.settle_delay())
            })
            .collect();

        let callbacks = document.tick(timing.settle_delay());
        let ready = beams.iter().filter(|beam| beam.state().is_ready()).count();
        if ready < beams.len() {
            warn!(ready, total = beams.len(); "Some beams have unmounted endpoints");
        }
        info!(ready, callbacks; "Scene settled");

        Ok(MountedScene {
            scene: scene.clone(),
            document,
            beams,
        })
    }

    /// Render a mounted scene to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `WirebeamError::Export` if a configured color is invalid or
    /// the container is no longer mounted.
    pub fn render_svg(&self, scene: &MountedScene) -> Result<String, WirebeamError> {
        info!(container = scene.scene().container().name(); "Rendering SVG");

        let mut exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .with_palette(self.config.palette())
            .build()?;

        let mut buffer = Vec::new();
        exporter.export_scene(scene, &mut buffer)?;
        let svg = String::from_utf8(buffer).map_err(|err| WirebeamError::Export(Box::new(err)))?;

        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}
