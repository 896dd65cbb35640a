//! SVG rendering of mounted scenes.
//!
//! Each beam is drawn twice with the same path data: a muted track, and on
//! top of it a gradient stroke whose dash pattern is animated with SMIL
//! `<animate>` elements so a pulse travels from `from` to `to`. Nodes are
//! drawn last, over the beam endpoints.

use std::{io::Write, rc::Rc};

use log::{debug, info, trace};
use svg::{Document as SvgDocument, node::element as svg_element};

use wirebeam_core::{
    color::Color,
    draw::{
        Drawable, LayeredOutput, LinearGradient, Node, NodeDefinition, RenderLayer, StrokeCap,
        StrokeDefinition,
    },
    geometry::Bounds,
    palette::Palette,
};

use crate::{
    MountedScene,
    beam::MountedBeam,
    config::{PaletteConfig, StyleConfig},
    export::{self, Exporter},
    layout::LayoutSource,
    scene::NodeSpec,
};

/// Builder for [`Svg`] exporters.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
    palette: Option<&'a PaletteConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_palette(mut self, palette: &'a PaletteConfig) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Resolves colors and builds the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if a configured color is invalid.
    pub fn build(self) -> Result<Svg, export::Error> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);

        let palette = match self.palette {
            Some(palette) => palette.palette().map_err(export::Error::Render)?,
            None => Palette::default(),
        };

        let mut track = StrokeDefinition::new(
            style.track_color().map_err(export::Error::Render)?,
            style.stroke_width(),
        );
        track.set_cap(StrokeCap::Round);

        Ok(Svg {
            background: style.background_color().map_err(export::Error::Render)?,
            track,
            dash_length: style.dash_length(),
            gradient_start: style.gradient_start().map_err(export::Error::Render)?,
            gradient_end: style.gradient_end().map_err(export::Error::Render)?,
            palette,
            node_definition: Rc::new(style.node_definition().map_err(export::Error::Render)?),
        })
    }
}

/// SVG exporter for mounted scenes.
#[derive(Debug)]
pub struct Svg {
    background: Option<Color>,
    track: StrokeDefinition,
    dash_length: f32,
    gradient_start: Color,
    gradient_end: Color,
    palette: Palette,
    node_definition: Rc<NodeDefinition>,
}

impl Svg {
    /// Renders `scene` into an SVG document sized to its container.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if the container is not mounted.
    pub fn render_scene(&self, scene: &MountedScene) -> Result<SvgDocument, export::Error> {
        let container_spec = scene.scene().container();
        let container = scene
            .document()
            .bounding_rect(container_spec.id())
            .ok_or_else(|| {
                export::Error::Render(format!(
                    "container `{}` is not mounted",
                    container_spec.name()
                ))
            })?;

        let (width, height) = (container.width(), container.height());
        let mut output = LayeredOutput::new();

        if let Some(background) = self.background {
            let rect = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", background.opaque().to_string())
                .set("fill-opacity", background.alpha());
            output.add_to_layer(RenderLayer::Background, Box::new(rect));
        }

        let mut definitions = svg_element::Definitions::new();
        let mut rendered_beams = 0;
        for (index, beam) in scene.beams().iter().enumerate() {
            let gradient_id = format!("{}-beam-{index}", container_spec.name());
            let Some((gradient, layers)) = self.render_beam(gradient_id, beam) else {
                debug!(
                    from = beam.beam().anchors().from().to_string(),
                    to = beam.beam().anchors().to().to_string();
                    "Skipping beam without a path"
                );
                continue;
            };
            definitions = definitions.add(gradient.to_svg());
            output.merge(layers);
            rendered_beams += 1;
        }

        let mut rendered_nodes = 0;
        for node in scene.scene().nodes() {
            if let Some(layers) = self.render_node(node, container, scene) {
                output.merge(layers);
                rendered_nodes += 1;
            }
        }

        info!(
            width,
            height,
            beams = rendered_beams,
            nodes = rendered_nodes;
            "Scene rendered"
        );

        let document = SvgDocument::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height)
            .set("fill", "none")
            .add(definitions);

        Ok(output
            .render()
            .into_iter()
            .fold(document, |document, group| document.add(group)))
    }

    fn render_beam(
        &self,
        gradient_id: String,
        beam: &MountedBeam,
    ) -> Option<(LinearGradient, LayeredOutput)> {
        let state = beam.state();
        let geometry = state.geometry()?;
        let timing = beam.beam().timing();
        let dash = self.dash_length;

        let gradient = LinearGradient::comet(gradient_id, self.gradient_start, self.gradient_end)
            .with_axis(geometry.start(), geometry.end());
        trace!(gradient = gradient.id(), path = state.path(); "Rendering beam");

        let mut output = LayeredOutput::new();

        let track = svg_element::Path::new()
            .set("d", state.path())
            .set("fill", "none");
        let track = wirebeam_core::apply_stroke!(track, &self.track);
        output.add_to_layer(RenderLayer::Track, Box::new(track));

        let dasharray = svg_element::Animate::new()
            .set("attributeName", "stroke-dasharray")
            .set("values", format!("0, {dash}; {dash}, 0"))
            .set("keyTimes", "0; 1")
            .set("dur", format!("{}s", timing.duration()))
            .set("begin", format!("{}s", timing.delay()))
            .set("repeatCount", "indefinite");
        let dashoffset = svg_element::Animate::new()
            .set("attributeName", "stroke-dashoffset")
            .set("values", format!("{dash}; 0"))
            .set("dur", format!("{}s", timing.duration()))
            .set("begin", format!("{}s", timing.delay()))
            .set("repeatCount", "indefinite");

        let pulse = svg_element::Path::new()
            .set("d", state.path())
            .set("fill", "none")
            .set("stroke", gradient.url())
            .set("stroke-width", self.track.width())
            .set("stroke-linecap", StrokeCap::Round.to_svg_value())
            .set("stroke-dasharray", format!("0, {dash}"))
            .add(dasharray)
            .add(dashoffset);
        output.add_to_layer(RenderLayer::Beam, Box::new(pulse));

        Some((gradient, output))
    }

    fn render_node(
        &self,
        node: &NodeSpec,
        container: Bounds,
        scene: &MountedScene,
    ) -> Option<LayeredOutput> {
        let bounds = scene.document().bounding_rect(node.id())?;
        let relative = bounds.relative_to(container);

        let mut drawable = Node::new(
            Rc::clone(&self.node_definition),
            self.palette.color(node.accent()),
            relative.to_size(),
        );
        if let Some(icon) = node.icon() {
            drawable = drawable.with_icon(icon.to_icon());
        }

        Some(drawable.render_to_layers(relative.center()))
    }
}

impl Exporter for Svg {
    fn export_scene(
        &mut self,
        scene: &MountedScene,
        writer: &mut dyn Write,
    ) -> Result<(), export::Error> {
        let document = self.render_scene(scene)?;
        write!(writer, "{document}").map_err(export::Error::Io)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wirebeam_core::{identifier::Id, palette::Accent};

    use super::*;
    use crate::{
        SceneBuilder,
        scene::{BeamSpec, ElementSpec, IconSpec, Scene},
    };

    fn scene(prefix: &str) -> Scene {
        Scene::new(ElementSpec::new(format!("{prefix}-row"), 0.0, 0.0, 800.0, 200.0))
            .with_node(
                NodeSpec::new(format!("{prefix}-a"), 40.0, 80.0, 40.0, 40.0)
                    .with_accent(Accent::Green)
                    .with_icon(IconSpec::Glyph("A".to_string())),
            )
            .with_node(NodeSpec::new(format!("{prefix}-b"), 700.0, 80.0, 40.0, 40.0))
            .with_beam(
                BeamSpec::new(format!("{prefix}-a"), format!("{prefix}-b"))
                    .with_duration(4.0)
                    .with_delay(0.5),
            )
    }

    fn render(scene: &Scene) -> String {
        let mounted = SceneBuilder::default().mount(scene).unwrap();
        SvgBuilder::new()
            .build()
            .unwrap()
            .render_scene(&mounted)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_document_is_sized_to_container() {
        let svg = render(&scene("svg-size"));
        assert!(svg.contains(r#"viewBox="0 0 800 200""#));
        assert!(svg.contains(r#"width="800""#));
        assert!(svg.contains(r#"height="200""#));
    }

    #[test]
    fn test_beam_track_and_pulse() {
        let svg = render(&scene("svg-beam"));
        let path = r#"d="M 60 100 C 390 100 390 100 720 100""#;
        assert_eq!(svg.matches(path).count(), 2);
        assert!(svg.contains(r#"stroke="url(#svg-beam-row-beam-0)""#));
        assert!(svg.contains(r#"stroke-opacity="0.1""#));
        assert!(svg.contains(r#"values="0, 1500; 1500, 0""#));
        assert!(svg.contains(r#"values="1500; 0""#));
        assert!(svg.contains(r#"dur="4s""#));
        assert!(svg.contains(r#"begin="0.5s""#));
        assert!(svg.contains(r#"repeatCount="indefinite""#));
    }

    #[test]
    fn test_gradient_follows_beam_axis() {
        let svg = render(&scene("svg-gradient"));
        assert!(svg.contains(r#"id="svg-gradient-row-beam-0""#));
        assert!(svg.contains(r#"x1="60""#));
        assert!(svg.contains(r#"x2="720""#));
    }

    #[test]
    fn test_gradient_reference_resolves_for_spaced_container_id() {
        let scene = Scene::new(ElementSpec::new("my row", 0.0, 0.0, 800.0, 200.0))
            .with_node(NodeSpec::new("svg-spaced-a", 40.0, 80.0, 40.0, 40.0))
            .with_node(NodeSpec::new("svg-spaced-b", 700.0, 80.0, 40.0, 40.0))
            .with_beam(BeamSpec::new("svg-spaced-a", "svg-spaced-b"));

        let svg = render(&scene);
        let reference = svg
            .split(r#"stroke="url(#"#)
            .nth(1)
            .and_then(|rest| rest.split(')').next())
            .expect("pulse path references a gradient");

        assert!(!reference.contains(' '));
        assert!(svg.contains(&format!(r#"id="{reference}""#)));
    }

    #[test]
    fn test_nodes_render_above_beams() {
        let svg = render(&scene("svg-layers"));
        let beam = svg.find(r#"data-layer="beam""#).unwrap();
        let node = svg.find(r#"data-layer="node""#).unwrap();
        let icon = svg.find(r#"data-layer="icon""#).unwrap();
        assert!(beam < node && node < icon);
        assert_eq!(svg.matches("<circle").count(), 2);
    }

    #[test]
    fn test_unmounted_node_skips_beam_and_node() {
        let scene = Scene::new(ElementSpec::new("svg-partial-row", 0.0, 0.0, 800.0, 200.0))
            .with_node(NodeSpec::new("svg-partial-a", 40.0, 80.0, 40.0, 40.0))
            .with_node(NodeSpec::new("svg-partial-b", 700.0, 80.0, 40.0, 40.0).with_mounted(false))
            .with_beam(BeamSpec::new("svg-partial-a", "svg-partial-b"));

        let svg = render(&scene);
        assert!(!svg.contains("<path"));
        assert!(!svg.contains("<linearGradient"));
        assert_eq!(svg.matches("<circle").count(), 1);
    }

    #[test]
    fn test_background_from_style() {
        let mounted = SceneBuilder::default().mount(&scene("svg-bg")).unwrap();

        let plain = SvgBuilder::new().build().unwrap();
        assert!(!plain.render_scene(&mounted).unwrap().to_string().contains("<rect"));

        let style = StyleConfig::default().with_background_color("white");
        let svg = SvgBuilder::new().with_style(&style).build().unwrap();
        let rendered = svg.render_scene(&mounted).unwrap().to_string();
        assert!(rendered.contains("<rect"));
        let background = rendered.find(r#"data-layer="background""#).unwrap();
        let track = rendered.find(r#"data-layer="track""#).unwrap();
        assert!(background < track);
    }

    #[test]
    fn test_invalid_style_color_fails_build() {
        let style = StyleConfig::default().with_background_color("nope");
        let err = SvgBuilder::new().with_style(&style).build().unwrap_err();
        assert!(matches!(err, export::Error::Render(_)));
    }

    #[test]
    fn test_unmounted_container_is_a_render_error() {
        let mounted = SceneBuilder::default().mount(&scene("svg-gone")).unwrap();
        mounted.document().unmount(Id::new("svg-gone-row"));

        let err = SvgBuilder::new().build().unwrap().render_scene(&mounted).unwrap_err();
        assert!(matches!(err, export::Error::Render(msg) if msg.contains("svg-gone-row")));
    }

    #[test]
    fn test_resize_after_mount_is_reflected() {
        let mounted = SceneBuilder::default().mount(&scene("svg-resize")).unwrap();
        let document = mounted.document();
        document.set_rect(
            Id::new("svg-resize-b"),
            wirebeam_core::geometry::Bounds::from_rect(500.0, 80.0, 40.0, 40.0),
        );
        document.set_rect(
            Id::new("svg-resize-row"),
            wirebeam_core::geometry::Bounds::from_rect(0.0, 0.0, 600.0, 200.0),
        );
        document.tick(Duration::from_millis(16));

        let svg = SvgBuilder::new().build().unwrap().render_scene(&mounted).unwrap().to_string();
        assert!(svg.contains(r#"viewBox="0 0 600 200""#));
        assert!(svg.contains("M 60 100 C 290 100 290 100 520 100"));
    }
}
