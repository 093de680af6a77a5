//! Text measurement
//!
//! The ruler only needs label widths (to center numbers under their tick)
//! and a line height (for its intrinsic height). Hosts with real fonts
//! implement [`TextMeasurer`]; the default estimates from character counts.

/// Measured size of a single line of text
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    /// Ascent plus descent
    pub height: f32,
}

/// Source of text metrics for labels
pub trait TextMeasurer: Send {
    /// Measure one line of `text` at `font_size`
    fn measure(&self, text: &str, font_size: f32) -> TextMetrics;

    /// Height of one line at `font_size`
    fn line_height(&self, font_size: f32) -> f32 {
        self.measure("0", font_size).height
    }
}

/// Estimates metrics without a font
///
/// Digits are assumed to be about 0.55 em wide and a line about 1.2 em tall,
/// close to common sans-serif faces.
#[derive(Clone, Copy, Debug)]
pub struct EstimatedTextMeasurer {
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for EstimatedTextMeasurer {
    fn default() -> Self {
        Self {
            char_width: 0.55,
            line_height: 1.2,
        }
    }
}

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, font_size: f32) -> TextMetrics {
        let chars = text.chars().count() as f32;
        TextMetrics {
            width: chars * font_size * self.char_width,
            height: font_size * self.line_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_scales_with_length_and_size() {
        let m = EstimatedTextMeasurer::default();
        let one = m.measure("1", 100.0);
        let two = m.measure("10", 100.0);
        assert!((one.width - 55.0).abs() < 1e-4);
        assert!((two.width - 110.0).abs() < 1e-4);
        assert!((m.line_height(100.0) - 120.0).abs() < 1e-4);
        assert_eq!(m.measure("", 100.0).width, 0.0);
    }
}
