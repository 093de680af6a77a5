//! Ruler Paint API
//!
//! A small 2D drawing API for the ruler picker. Drawing is recorded as a list
//! of commands that a host renderer replays.
//!
//! # Features
//!
//! - ARGB colors with channel-exact interpolation
//! - Shape primitives (rect, circle, rounded rect)
//! - Text placement
//! - Clipping

pub mod color;
pub mod context;
pub mod primitives;

pub use color::{interpolate, Color, ColorParseError};
pub use context::{PaintCommand, PaintContext};
pub use primitives::*;
