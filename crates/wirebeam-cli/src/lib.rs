//! CLI logic for the Wirebeam scene renderer.
//!
//! This module reads a scene description, mounts it, lets its layout settle
//! and writes the animated SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info};

use wirebeam::{SceneBuilder, WirebeamError, scene::Scene};

/// Run the Wirebeam CLI application
///
/// This function processes the input scene through the Wirebeam pipeline
/// and writes the resulting SVG to the output file.
///
/// # Errors
///
/// Returns `WirebeamError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene syntax and validation errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), WirebeamError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;
    let scene = parse_scene(&source)?;

    let builder = SceneBuilder::new(app_config);
    let mounted = builder.mount(&scene)?;
    let svg = builder.render_svg(&mounted)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

/// Parse scene TOML, keeping the source and error span for diagnostics.
fn parse_scene(source: &str) -> Result<Scene, WirebeamError> {
    let scene: Scene = toml::from_str(source)
        .map_err(|err| WirebeamError::new_parse_error(err.message(), source, err.span()))?;
    debug!(
        nodes = scene.nodes().len(),
        beams = scene.beams().len();
        "Scene parsed successfully"
    );
    Ok(scene)
}
