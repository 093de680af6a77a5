//! Layout and measurement
//!
//! The ruler stacks, top to bottom: the indicator disc, a margin, the tick
//! bars (top edges aligned on one line), a margin, and the label band.

use ruler_paint::{Point, Size};

use crate::config::RulerConfig;
use crate::text::TextMeasurer;

/// A parent's constraint on one axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MeasureSpec {
    /// Use exactly this size
    Exactly(f32),
    /// Use at most this size
    AtMost(f32),
    /// Any size will do
    Unspecified,
}

impl MeasureSpec {
    /// Resolve against the size the widget would like to have
    pub fn resolve(self, intrinsic: f32) -> f32 {
        match self {
            MeasureSpec::Exactly(size) => size,
            MeasureSpec::AtMost(size) => intrinsic.min(size),
            MeasureSpec::Unspecified => intrinsic,
        }
    }
}

/// Height the ruler needs to show everything
pub fn intrinsic_height(config: &RulerConfig, text: &dyn TextMeasurer) -> f32 {
    config.indicator_radius * 2.0
        + config.indicator_margin_bottom
        + config.major_tick_height
        + config.tick_margin_bottom
        + text.line_height(config.text_size)
}

/// Width of the whole scale laid out flat
pub fn intrinsic_width(config: &RulerConfig) -> f32 {
    config.ruler_width() + config.tick_width
}

/// Measure the ruler under the given constraints
///
/// Width is taken from the parent; an unconstrained width asks for the
/// whole scale. Height prefers the intrinsic height unless constrained.
pub fn measure(
    config: &RulerConfig,
    text: &dyn TextMeasurer,
    width_spec: MeasureSpec,
    height_spec: MeasureSpec,
) -> Size {
    let width = match width_spec {
        MeasureSpec::Exactly(size) | MeasureSpec::AtMost(size) => size,
        MeasureSpec::Unspecified => intrinsic_width(config),
    };
    Size::new(width, height_spec.resolve(intrinsic_height(config, text)))
}

/// Positions derived from the widget size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geometry {
    pub width: f32,
    pub height: f32,
    /// Right edge of the `min_value` tick at offset 0, which puts that tick
    /// centered under the indicator
    pub base_x: f32,
    pub indicator_center: Point,
    /// Top of the tick bars
    pub line_y: f32,
    /// Label baseline
    pub text_y: f32,
}

impl Geometry {
    pub fn new(config: &RulerConfig, width: f32, height: f32) -> Self {
        let line_y = config.indicator_radius * 2.0 + config.indicator_margin_bottom;
        Self {
            width,
            height,
            base_x: (width + config.tick_width) / 2.0,
            indicator_center: Point::new(width / 2.0, config.indicator_radius),
            line_y,
            text_y: line_y
                + config.major_tick_height
                + config.tick_margin_bottom
                + config.text_size,
        }
    }
}
