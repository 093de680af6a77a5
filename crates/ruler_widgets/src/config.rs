//! Ruler configuration
//!
//! All three config structs deserialize with a default for every missing
//! field, so a config file only needs to name what it changes.

use ruler_core::error::{ensure_non_negative, ensure_positive};
use ruler_core::{Result, RulerError};
use ruler_paint::Color;
use serde::{Deserialize, Serialize};

/// Scale geometry, range, and colors
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulerConfig {
    /// Smallest selectable value, shown at offset 0
    pub min_value: i32,
    /// Largest selectable value
    pub max_value: i32,
    /// Width of one tick bar
    pub tick_width: f32,
    /// Gap between neighbouring tick bars
    pub tick_spacing: f32,
    pub minor_tick_height: f32,
    pub mid_tick_height: f32,
    pub major_tick_height: f32,
    /// Corner radius of tick bars
    pub tick_radius: f32,
    /// Gap between the tallest bar and the label band
    pub tick_margin_bottom: f32,
    /// Gradient color at `min_value`
    pub start_color: Color,
    /// Gradient color at `max_value`
    pub end_color: Color,
    pub indicator_radius: f32,
    /// Gap between the indicator disc and the top of the ticks
    pub indicator_margin_bottom: f32,
    /// Label font size
    pub text_size: f32,
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            min_value: 0,
            max_value: 40,
            tick_width: 24.0,
            tick_spacing: 30.0,
            minor_tick_height: 120.0,
            mid_tick_height: 180.0,
            major_tick_height: 240.0,
            tick_radius: 12.0,
            tick_margin_bottom: 20.0,
            start_color: Color::from_argb(0xff3415b0),
            end_color: Color::from_argb(0xffcd0074),
            indicator_radius: 12.0,
            indicator_margin_bottom: 30.0,
            text_size: 100.0,
        }
    }
}

impl RulerConfig {
    /// Set the value range
    pub fn range(mut self, min: i32, max: i32) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    /// Set tick bar width and the gap between bars
    pub fn tick_size(mut self, width: f32, spacing: f32) -> Self {
        self.tick_width = width;
        self.tick_spacing = spacing;
        self
    }

    /// Set minor, mid, and major tick heights
    pub fn tick_heights(mut self, minor: f32, mid: f32, major: f32) -> Self {
        self.minor_tick_height = minor;
        self.mid_tick_height = mid;
        self.major_tick_height = major;
        self
    }

    pub fn tick_radius(mut self, radius: f32) -> Self {
        self.tick_radius = radius;
        self
    }

    /// Set the gradient end colors
    pub fn colors(mut self, start: Color, end: Color) -> Self {
        self.start_color = start;
        self.end_color = end;
        self
    }

    /// Set indicator radius and its bottom margin
    pub fn indicator(mut self, radius: f32, margin_bottom: f32) -> Self {
        self.indicator_radius = radius;
        self.indicator_margin_bottom = margin_bottom;
        self
    }

    pub fn text_size(mut self, size: f32) -> Self {
        self.text_size = size;
        self
    }

    /// Distance between the right edges of neighbouring ticks
    pub fn pitch(&self) -> f32 {
        self.tick_width + self.tick_spacing
    }

    /// Number of pitches from `min_value` to `max_value`
    pub fn span(&self) -> i64 {
        self.max_value as i64 - self.min_value as i64
    }

    /// Total scroll distance of the scale
    pub fn ruler_width(&self) -> f32 {
        self.span() as f32 * self.pitch()
    }

    /// Reject empty ranges and non-finite or out-of-range geometry
    pub fn validate(&self) -> Result<()> {
        if self.min_value >= self.max_value {
            return Err(RulerError::EmptyRange {
                min: self.min_value,
                max: self.max_value,
            });
        }
        ensure_positive("tick_width", self.tick_width)?;
        ensure_positive("tick_spacing", self.tick_spacing)?;
        ensure_positive("minor_tick_height", self.minor_tick_height)?;
        ensure_positive("mid_tick_height", self.mid_tick_height)?;
        ensure_positive("major_tick_height", self.major_tick_height)?;
        ensure_non_negative("tick_radius", self.tick_radius)?;
        ensure_non_negative("tick_margin_bottom", self.tick_margin_bottom)?;
        ensure_positive("indicator_radius", self.indicator_radius)?;
        ensure_non_negative("indicator_margin_bottom", self.indicator_margin_bottom)?;
        ensure_positive("text_size", self.text_size)?;
        if !self.ruler_width().is_finite() {
            return Err(RulerError::InvalidConfig {
                field: "max_value",
                reason: "range times pitch overflows".to_string(),
            });
        }
        Ok(())
    }
}

/// Pointer gesture tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Travel beyond which a press is no longer a tap
    pub touch_slop: f32,
    /// Longest press that still counts as a tap
    pub tap_timeout_ms: u64,
    /// Release velocity is reported in px per this many ms
    pub velocity_units_ms: u64,
    /// Only samples this close to the newest one feed the velocity estimate
    pub velocity_horizon_ms: u64,
    /// Slower releases do not fling
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
    /// Initial velocity for programmatic value changes, px/s
    pub set_value_velocity: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            tap_timeout_ms: 500,
            velocity_units_ms: 500,
            velocity_horizon_ms: 100,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8000.0,
            set_value_velocity: 1000.0,
        }
    }
}

impl GestureConfig {
    pub fn touch_slop(mut self, slop: f32) -> Self {
        self.touch_slop = slop;
        self
    }

    pub fn tap_timeout_ms(mut self, timeout: u64) -> Self {
        self.tap_timeout_ms = timeout;
        self
    }

    /// Set the fling velocity window
    pub fn fling_velocity(mut self, min: f32, max: f32) -> Self {
        self.min_fling_velocity = min;
        self.max_fling_velocity = max;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("touch_slop", self.touch_slop)?;
        if self.velocity_units_ms == 0 {
            return Err(RulerError::InvalidConfig {
                field: "velocity_units_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.velocity_horizon_ms == 0 {
            return Err(RulerError::InvalidConfig {
                field: "velocity_horizon_ms",
                reason: "must be > 0".to_string(),
            });
        }
        ensure_non_negative("min_fling_velocity", self.min_fling_velocity)?;
        ensure_positive("max_fling_velocity", self.max_fling_velocity)?;
        if self.min_fling_velocity > self.max_fling_velocity {
            return Err(RulerError::InvalidConfig {
                field: "min_fling_velocity",
                reason: format!(
                    "{} exceeds max_fling_velocity {}",
                    self.min_fling_velocity, self.max_fling_velocity
                ),
            });
        }
        ensure_positive("set_value_velocity", self.set_value_velocity)?;
        Ok(())
    }
}

/// Fling physics tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub friction: f32,
    /// Display density relative to 160 dpi
    pub density: f32,
    /// Duration of a snap that has no fling momentum behind it
    pub snap_duration_ms: u64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: 0.015,
            density: 1.0,
            snap_duration_ms: 180,
        }
    }
}

impl PhysicsConfig {
    pub fn friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("friction", self.friction)?;
        ensure_positive("density", self.density)?;
        if self.snap_duration_ms == 0 {
            return Err(RulerError::InvalidConfig {
                field: "snap_duration_ms",
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RulerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pitch(), 54.0);
        assert_eq!(config.ruler_width(), 40.0 * 54.0);
        assert!(GestureConfig::default().validate().is_ok());
        assert!(PhysicsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_range_rejected() {
        let config = RulerConfig::default().range(5, 5);
        assert_eq!(
            config.validate(),
            Err(RulerError::EmptyRange { min: 5, max: 5 })
        );
        assert!(RulerConfig::default().range(10, 0).validate().is_err());
    }

    #[test]
    fn test_bad_geometry_rejected() {
        let err = RulerConfig::default().tick_size(0.0, 30.0).validate();
        assert!(matches!(
            err,
            Err(RulerError::InvalidConfig {
                field: "tick_width",
                ..
            })
        ));
        assert!(RulerConfig::default().tick_radius(-1.0).validate().is_err());
        assert!(RulerConfig::default().text_size(f32::NAN).validate().is_err());
        // Zero margins and radius are fine
        assert!(RulerConfig::default().tick_radius(0.0).validate().is_ok());
    }

    #[test]
    fn test_bad_gesture_config_rejected() {
        assert!(GestureConfig::default()
            .fling_velocity(9000.0, 8000.0)
            .validate()
            .is_err());
        let config = GestureConfig {
            velocity_units_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_snap_duration_rejected() {
        let config = PhysicsConfig {
            snap_duration_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RulerError::InvalidConfig {
                field: "snap_duration_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_full_i32_range_is_valid() {
        let config = RulerConfig::default().range(i32::MIN, i32::MAX);
        assert_eq!(config.span(), u32::MAX as i64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RulerConfig = toml::from_str(
            r##"
            max_value = 100
            start_color = "#ff000000"
            "##,
        )
        .unwrap();
        assert_eq!(config.max_value, 100);
        assert_eq!(config.min_value, 0);
        assert_eq!(config.start_color, Color::BLACK);
        assert_eq!(config.end_color, RulerConfig::default().end_color);
    }

    #[test]
    fn test_bad_color_fails_to_parse() {
        let result: std::result::Result<RulerConfig, _> =
            toml::from_str(r#"start_color = "purple""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = RulerConfig::default().range(-10, 10);
        let json = serde_json::to_string(&config).unwrap();
        let back: RulerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
