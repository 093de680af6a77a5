//! Ruler Widget Library
//!
//! A horizontal ruler picker with FSM-driven gestures: drag the scale, flick
//! it, and it settles on the nearest tick. Ticks and labels are painted with
//! a color gradient across the range and the indicator disc takes the color
//! of the current position.

pub mod config;
pub mod gesture;
pub mod layout;
pub mod mapper;
pub mod renderer;
pub mod ruler;
pub mod text;
pub mod velocity;

pub use config::{GestureConfig, PhysicsConfig, RulerConfig};
pub use gesture::{GestureController, GestureState};
pub use layout::{Geometry, MeasureSpec};
pub use mapper::{TickClass, ValueMapper};
pub use ruler::{Ruler, RulerBuilder};
pub use text::{EstimatedTextMeasurer, TextMeasurer, TextMetrics};
