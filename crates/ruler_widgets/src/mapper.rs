//! Offset and value mapping
//!
//! The scale scrolls left as the value grows: offset 0 shows `min_value`
//! under the indicator and offset `-ruler_width` shows `max_value`.

use crate::config::RulerConfig;

/// Height class of a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TickClass {
    Minor,
    /// Every fifth value
    Mid,
    /// Every tenth value, the only ticks with a label
    Major,
}

impl TickClass {
    /// Classify a tick by its value
    pub fn of(value: i32) -> Self {
        if value % 10 == 0 {
            TickClass::Major
        } else if value % 5 == 0 {
            TickClass::Mid
        } else {
            TickClass::Minor
        }
    }

    pub fn has_label(self) -> bool {
        self == TickClass::Major
    }
}

/// Pure conversions between scroll offset, value, and color ratio
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueMapper {
    min: i32,
    max: i32,
    pitch: f32,
    minor_height: f32,
    mid_height: f32,
    major_height: f32,
}

impl ValueMapper {
    /// Build from a validated config
    pub fn new(config: &RulerConfig) -> Self {
        Self {
            min: config.min_value,
            max: config.max_value,
            pitch: config.pitch(),
            minor_height: config.minor_tick_height,
            mid_height: config.mid_tick_height,
            major_height: config.major_tick_height,
        }
    }

    pub fn min_value(&self) -> i32 {
        self.min
    }

    pub fn max_value(&self) -> i32 {
        self.max
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Ticks from `min` to `value`; wider than i32 so a full-width range fits
    fn steps_from_min(&self, value: i32) -> i64 {
        value as i64 - self.min as i64
    }

    pub fn ruler_width(&self) -> f32 {
        self.steps_from_min(self.max) as f32 * self.pitch
    }

    /// Most negative reachable offset
    pub fn min_offset(&self) -> f32 {
        -self.ruler_width()
    }

    pub fn clamp_offset(&self, offset: f32) -> f32 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(self.min_offset(), 0.0)
    }

    pub fn clamp_value(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }

    /// Value under the indicator at `offset`
    ///
    /// Rounds to the nearest tick, halves toward the larger value.
    pub fn offset_to_value(&self, offset: f32) -> i32 {
        let offset = self.clamp_offset(offset) as f64;
        let raw = self.min as f64 - offset / self.pitch as f64;
        let rounded = (raw + 0.5).floor() as i32;
        self.clamp_value(rounded)
    }

    /// Offset that shows `value`, keeping the sub-tick phase of `current_offset`
    pub fn value_to_offset(&self, value: i32, current_offset: f32) -> f32 {
        let current_offset = self.clamp_offset(current_offset);
        let steps =
            self.clamp_value(value) as i64 - self.offset_to_value(current_offset) as i64;
        self.clamp_offset(current_offset - steps as f32 * self.pitch)
    }

    /// Nearest tick-aligned offset
    ///
    /// An exact half-pitch position goes to the tick [`Self::offset_to_value`]
    /// already reports, so snapping never changes the value.
    pub fn snap_offset(&self, offset: f32) -> f32 {
        let offset = self.clamp_offset(offset);
        self.clamp_offset(ruler_animation::snap_to_grid(offset, self.pitch, 0.0))
    }

    pub fn tick_class(&self, value: i32) -> TickClass {
        TickClass::of(value)
    }

    pub fn tick_height(&self, value: i32) -> f32 {
        match self.tick_class(value) {
            TickClass::Minor => self.minor_height,
            TickClass::Mid => self.mid_height,
            TickClass::Major => self.major_height,
        }
    }

    /// Gradient position of the tick for `value`
    pub fn color_ratio_for_tick(&self, value: i32) -> f32 {
        self.steps_from_min(value) as f32 / self.steps_from_min(self.max) as f32
    }

    /// Gradient position of the indicator at `offset`
    pub fn color_ratio_for_indicator(&self, offset: f32) -> f32 {
        (-self.clamp_offset(offset) / self.ruler_width()).clamp(0.0, 1.0)
    }

    /// Right edge x of the tick for `value`, relative to the scale origin
    pub fn tick_position(&self, value: i32) -> f32 {
        self.steps_from_min(value) as f32 * self.pitch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> ValueMapper {
        ValueMapper::new(&RulerConfig::default())
    }

    #[test]
    fn test_endpoints() {
        let m = mapper();
        assert_eq!(m.offset_to_value(0.0), 0);
        assert_eq!(m.offset_to_value(-m.ruler_width()), 40);
        assert_eq!(m.offset_to_value(-162.0), 3);
    }

    #[test]
    fn test_half_rounds_up() {
        let m = mapper();
        assert_eq!(m.offset_to_value(-26.0), 0);
        assert_eq!(m.offset_to_value(-27.0), 1);
        assert_eq!(m.offset_to_value(-28.0), 1);
    }

    #[test]
    fn test_out_of_range_offsets_clamp() {
        let m = mapper();
        assert_eq!(m.offset_to_value(500.0), 0);
        assert_eq!(m.offset_to_value(-99_999.0), 40);
        assert_eq!(m.offset_to_value(f32::NAN), 0);
    }

    #[test]
    fn test_non_increasing_in_offset() {
        let m = mapper();
        let mut prev = i32::MIN;
        let mut offset = 0.0f32;
        while offset >= -m.ruler_width() {
            let value = m.offset_to_value(offset);
            assert!(value >= prev);
            prev = value;
            offset -= 0.5;
        }
    }

    #[test]
    fn test_value_to_offset_round_trip() {
        let m = mapper();
        for current in [0.0, -10.0, -26.9, -27.0, -80.0, -1000.5, -2150.0, -2160.0] {
            for value in -5..=45 {
                let offset = m.value_to_offset(value, current);
                assert_eq!(
                    m.offset_to_value(offset),
                    m.clamp_value(value),
                    "value {value} from offset {current}"
                );
            }
        }
    }

    #[test]
    fn test_value_to_offset_keeps_phase() {
        let m = mapper();
        // 10 px past the tick for 2, moved to 5 keeps the 10 px
        assert_eq!(m.value_to_offset(5, -118.0), -280.0);
    }

    #[test]
    fn test_snap_offset() {
        let m = mapper();
        assert_eq!(m.snap_offset(-26.0), 0.0);
        assert_eq!(m.snap_offset(-27.0), -54.0);
        assert_eq!(m.snap_offset(-150.0), -162.0);
        assert_eq!(m.snap_offset(-5000.0), -2160.0);
        assert_eq!(m.offset_to_value(m.snap_offset(-27.0)), m.offset_to_value(-27.0));
    }

    #[test]
    fn test_tick_classes() {
        let m = mapper();
        assert_eq!(m.tick_class(0), TickClass::Major);
        assert_eq!(m.tick_class(5), TickClass::Mid);
        assert_eq!(m.tick_class(7), TickClass::Minor);
        assert_eq!(m.tick_class(-10), TickClass::Major);
        assert_eq!(m.tick_class(-15), TickClass::Mid);
        assert_eq!(m.tick_height(20), 240.0);
        assert_eq!(m.tick_height(25), 180.0);
        assert_eq!(m.tick_height(21), 120.0);
        assert!(TickClass::Major.has_label());
        assert!(!TickClass::Mid.has_label());
    }

    #[test]
    fn test_color_ratios() {
        let m = mapper();
        assert_eq!(m.color_ratio_for_tick(0), 0.0);
        assert_eq!(m.color_ratio_for_tick(20), 0.5);
        assert_eq!(m.color_ratio_for_tick(40), 1.0);
        assert_eq!(m.color_ratio_for_indicator(0.0), 0.0);
        assert_eq!(m.color_ratio_for_indicator(-1080.0), 0.5);
        assert_eq!(m.color_ratio_for_indicator(100.0), 0.0);
        assert_eq!(m.color_ratio_for_indicator(-9999.0), 1.0);
    }

    #[test]
    fn test_negative_range() {
        let m = ValueMapper::new(&RulerConfig::default().range(-20, 20));
        assert_eq!(m.offset_to_value(0.0), -20);
        assert_eq!(m.offset_to_value(-20.0 * 54.0), 0);
        assert_eq!(m.offset_to_value(m.min_offset()), 20);
    }

    #[test]
    fn test_extreme_range_does_not_overflow() {
        let m = ValueMapper::new(&RulerConfig::default().range(-2_000_000_000, 2_000_000_000));
        assert_eq!(m.ruler_width(), 4_000_000_000.0 * 54.0);
        assert_eq!(m.offset_to_value(0.0), -2_000_000_000);
        assert_eq!(m.offset_to_value(m.min_offset()), 2_000_000_000);
        assert_eq!(m.tick_position(2_000_000_000), m.ruler_width());
        assert_eq!(m.color_ratio_for_tick(0), 0.5);
        assert_eq!(m.value_to_offset(2_000_000_000, 0.0), m.min_offset());
    }
}
