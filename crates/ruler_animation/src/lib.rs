//! Ruler Animation System
//!
//! Deceleration physics for the ruler scale.
//!
//! # Features
//!
//! - **Fling Spline**: Android-style tension spline with density-aware friction
//! - **Scroller**: Frame-clock driven trajectories that can be retargeted
//! - **Grid Snapping**: Final offsets land exactly on tick positions
//! - **Bounds**: Inelastic walls, no overshoot or bounce

pub mod fling;
pub mod scroller;

pub use fling::{FlingCalculator, FlingInfo};
pub use scroller::{snap_to_grid, ScrollSample, Scroller};
