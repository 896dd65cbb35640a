//! Error types for Wirebeam operations.
//!
//! This module provides the main error type [`WirebeamError`] which wraps
//! the error conditions that can occur while loading, mounting and exporting
//! a scene. Beam geometry itself never fails: an unmounted reference only
//! means the beam is not ready yet.

use std::{io, ops::Range};

use thiserror::Error;

/// The main error type for Wirebeam operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the scene source and, when known, the byte
/// span of the offending input, so front-ends can render a labelled snippet.
#[derive(Debug, Error)]
pub enum WirebeamError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{message}")]
    Parse {
        message: String,
        src: String,
        span: Option<Range<usize>>,
    },

    #[error("Scene error: {0}")]
    Scene(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for WirebeamError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl WirebeamError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(
        message: impl Into<String>,
        src: impl Into<String>,
        span: Option<Range<usize>>,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            src: src.into(),
            span,
        }
    }
}
