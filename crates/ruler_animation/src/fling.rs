//! Fling spline physics
//!
//! The deceleration curve of the Android platform scroller. A fling of
//! initial velocity `v` travels a distance and lasts a duration that both
//! follow from `v`, the friction, and the screen density. Progress along the
//! trajectory is read from a precomputed tension spline so the motion starts
//! fast and eases into its stop.

use std::sync::LazyLock;

const INFLECTION: f64 = 0.35;
const START_TENSION: f64 = 0.5;
const END_TENSION: f64 = 1.0;
const P1: f64 = START_TENSION * INFLECTION;
const P2: f64 = 1.0 - END_TENSION * (1.0 - INFLECTION);

/// Samples in the spline lookup table
const NB_SAMPLES: usize = 100;

const GRAVITY_EARTH: f64 = 9.80665;
const INCHES_PER_METER: f64 = 39.37;
/// ln(0.78) / ln(0.9)
const DECELERATION_RATE: f64 = 2.358_201_6;

/// Spline position samples, `positions[i]` is the distance fraction covered
/// at time fraction `i / NB_SAMPLES`
static SPLINE_POSITIONS: LazyLock<[f64; NB_SAMPLES + 1]> = LazyLock::new(|| {
    let mut positions = [0.0f64; NB_SAMPLES + 1];
    let mut x_min = 0.0f64;

    for (i, position) in positions.iter_mut().enumerate().take(NB_SAMPLES) {
        let alpha = i as f64 / NB_SAMPLES as f64;

        // Bisect for the curve parameter whose time component equals alpha
        let mut x_max = 1.0f64;
        let (x, coef) = loop {
            let x_mid = x_min + (x_max - x_min) / 2.0;
            let c = 3.0 * x_mid * (1.0 - x_mid);
            let tx = c * ((1.0 - x_mid) * P1 + x_mid * P2) + x_mid * x_mid * x_mid;
            if (tx - alpha).abs() < 1e-5 {
                break (x_mid, c);
            }
            if tx > alpha {
                x_max = x_mid;
            } else {
                x_min = x_mid;
            }
        };
        *position = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;
    }

    positions[NB_SAMPLES] = 1.0;
    positions
});

/// Fraction of the total fling distance covered at `progress` (0..=1 of the
/// duration). Monotone non-decreasing, 0 at the start and exactly 1 at the end.
pub fn spline_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        return 0.0;
    }
    let t = (progress as f64).clamp(0.0, 1.0);
    let index = (NB_SAMPLES as f64 * t) as usize;
    if index >= NB_SAMPLES {
        return 1.0;
    }

    let t_inf = index as f64 / NB_SAMPLES as f64;
    let t_sup = (index + 1) as f64 / NB_SAMPLES as f64;
    let d_inf = SPLINE_POSITIONS[index];
    let d_sup = SPLINE_POSITIONS[index + 1];
    let slope = (d_sup - d_inf) / (t_sup - t_inf);
    (d_inf + (t - t_inf) * slope) as f32
}

/// Distance and duration of a fling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingInfo {
    /// Initial velocity in px/s
    pub initial_velocity: f32,
    /// Unsigned distance travelled, in px
    pub distance: f32,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl FlingInfo {
    /// A fling that goes nowhere
    pub const STILL: FlingInfo = FlingInfo {
        initial_velocity: 0.0,
        distance: 0.0,
        duration_ms: 0,
    };

    /// Where a fling starting at `start` comes to rest
    pub fn target(&self, start: f32) -> f32 {
        start + self.distance * self.initial_velocity.signum()
    }
}

/// Computes fling distance and duration from physical constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingCalculator {
    friction: f32,
    physical_coefficient: f64,
}

impl FlingCalculator {
    /// Default scroll friction of the platform scroller
    pub const DEFAULT_FRICTION: f32 = 0.015;

    /// Create a calculator
    ///
    /// `density` is the display density relative to 160 dpi.
    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            physical_coefficient: GRAVITY_EARTH * INCHES_PER_METER * density as f64 * 160.0 * 0.84,
        }
    }

    pub fn with_density(density: f32) -> Self {
        Self::new(Self::DEFAULT_FRICTION, density)
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    fn deceleration(&self, velocity: f32) -> Option<f64> {
        if !velocity.is_finite() || velocity == 0.0 {
            return None;
        }
        let l = (INFLECTION * velocity.abs() as f64
            / (self.friction as f64 * self.physical_coefficient))
            .ln();
        l.is_finite().then_some(l)
    }

    /// Duration of a fling in milliseconds
    pub fn fling_duration(&self, velocity: f32) -> u64 {
        match self.deceleration(velocity) {
            Some(l) => (1000.0 * (l / (DECELERATION_RATE - 1.0)).exp()) as u64,
            None => 0,
        }
    }

    /// Unsigned distance a fling travels
    pub fn fling_distance(&self, velocity: f32) -> f32 {
        match self.deceleration(velocity) {
            Some(l) => {
                let exponent = DECELERATION_RATE / (DECELERATION_RATE - 1.0) * l;
                (self.friction as f64 * self.physical_coefficient * exponent.exp()) as f32
            }
            None => 0.0,
        }
    }

    pub fn fling_info(&self, velocity: f32) -> FlingInfo {
        if self.deceleration(velocity).is_none() {
            return FlingInfo::STILL;
        }
        FlingInfo {
            initial_velocity: velocity,
            distance: self.fling_distance(velocity),
            duration_ms: self.fling_duration(velocity),
        }
    }
}

impl Default for FlingCalculator {
    fn default() -> Self {
        Self::with_density(1.0)
    }
}
