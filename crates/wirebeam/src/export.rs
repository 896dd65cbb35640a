//! Export functionality for mounted scenes.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! writing a mounted, settled scene to an output format. It is the final
//! stage of the Wirebeam pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Scene (TOML)
//!     ↓ validate + mount
//! Document with mounted beams
//!     ↓ settle (timers + frame)
//! Beam paths
//!     ↓ export (this module)
//! Output
//! ```
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`WirebeamError::Export`](crate::WirebeamError::Export) at the crate boundary.

/// SVG export backend.
pub mod svg;

use std::io::Write;

use crate::MountedScene;

/// Abstraction for scene export backends.
pub trait Exporter {
    /// Writes `scene` to `writer` in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the scene cannot be rendered, or
    /// [`Error::Io`] if writing fails.
    fn export_scene(&mut self, scene: &MountedScene, writer: &mut dyn Write) -> Result<(), Error>;
}

/// Errors that can occur during scene export.
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
