//! Wirebeam Core Types and Definitions
//!
//! This crate provides the foundational types for Wirebeam connector
//! diagrams. It includes:
//!
//! - **Identifiers**: String-interned element identifiers ([`identifier::Id`])
//! - **Colors**: CSS color handling ([`color::Color`]) and the closed accent
//!   palette ([`palette::Accent`], [`palette::Palette`])
//! - **Geometry**: Points, sizes and bounding boxes ([`geometry`] module)
//! - **Curves**: Beam geometry between two anchors ([`curve`] module)
//! - **Draw**: Drawables rendered to layered SVG output ([`draw`] module)

pub mod color;
pub mod curve;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod palette;
