//! Pointer velocity estimation
//!
//! Keeps a short window of `(time, x)` samples and fits a line through the
//! recent ones. The slope is the release velocity.

use smallvec::SmallVec;

use crate::config::GestureConfig;

/// Samples kept before the oldest are dropped
const HISTORY_SIZE: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    time_ms: u64,
    x: f32,
}

/// Least-squares velocity tracker for horizontal motion
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: SmallVec<[Sample; HISTORY_SIZE]>,
    units_ms: u64,
    horizon_ms: u64,
    min_velocity: f32,
    max_velocity: f32,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new(&GestureConfig::default())
    }
}

impl VelocityTracker {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            samples: SmallVec::new(),
            units_ms: config.velocity_units_ms.max(1),
            horizon_ms: config.velocity_horizon_ms,
            min_velocity: config.min_fling_velocity,
            max_velocity: config.max_fling_velocity,
        }
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Record a pointer position
    ///
    /// Samples older than the newest one are dropped, the clock never runs
    /// backwards within a gesture.
    pub fn add_sample(&mut self, time_ms: u64, x: f32) {
        if let Some(last) = self.samples.last() {
            if time_ms < last.time_ms {
                tracing::trace!(
                    "velocity: dropping out-of-order sample at {}ms (last {}ms)",
                    time_ms,
                    last.time_ms
                );
                return;
            }
        }
        if self.samples.len() == HISTORY_SIZE {
            self.samples.remove(0);
        }
        self.samples.push(Sample { time_ms, x });
    }

    /// Raw slope of the recent samples, in px per `velocity_units_ms`
    pub fn raw_velocity(&self) -> f32 {
        let Some(newest) = self.samples.last() else {
            return 0.0;
        };

        let recent: SmallVec<[(f64, f64); HISTORY_SIZE]> = self
            .samples
            .iter()
            .filter(|s| newest.time_ms - s.time_ms <= self.horizon_ms)
            .map(|s| (s.time_ms as f64 - newest.time_ms as f64, s.x as f64))
            .collect();

        if recent.len() < 2 {
            return 0.0;
        }

        let n = recent.len() as f64;
        let mean_t = recent.iter().map(|(t, _)| t).sum::<f64>() / n;
        let mean_x = recent.iter().map(|(_, x)| x).sum::<f64>() / n;
        let (mut cov, mut var) = (0.0, 0.0);
        for (t, x) in &recent {
            cov += (t - mean_t) * (x - mean_x);
            var += (t - mean_t) * (t - mean_t);
        }
        if var == 0.0 {
            // All samples share a timestamp
            return 0.0;
        }

        let per_ms = cov / var;
        (per_ms * self.units_ms as f64) as f32
    }

    /// Release velocity in px per `velocity_units_ms`
    ///
    /// Magnitudes below the minimum fling velocity count as a still release.
    /// The result is clamped to the maximum fling velocity.
    pub fn velocity(&self) -> f32 {
        let velocity = self.raw_velocity();
        if !velocity.is_finite() || velocity.abs() < self.min_velocity {
            return 0.0;
        }
        velocity.clamp(-self.max_velocity, self.max_velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single_sample() {
        let mut tracker = VelocityTracker::default();
        assert_eq!(tracker.velocity(), 0.0);
        tracker.add_sample(0, 10.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn test_constant_motion() {
        let mut tracker = VelocityTracker::default();
        // 2 px/ms = 1000 px per 500ms
        for i in 0..10 {
            tracker.add_sample(i * 10, i as f32 * 20.0);
        }
        assert!((tracker.velocity() - 1000.0).abs() < 0.01);
    }

    #[test]
    fn test_leftward_motion_is_negative() {
        let mut tracker = VelocityTracker::default();
        for i in 0..5 {
            tracker.add_sample(i * 16, 500.0 - i as f32 * 16.0);
        }
        assert!((tracker.velocity() + 500.0).abs() < 0.01);
    }

    #[test]
    fn test_old_samples_ignored() {
        let mut tracker = VelocityTracker::default();
        tracker.add_sample(0, 0.0);
        tracker.add_sample(10, 1000.0);
        // Long pause, then a still release
        tracker.add_sample(500, 1000.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn test_slow_motion_is_still() {
        let mut tracker = VelocityTracker::default();
        // 0.05 px/ms = 25 px per 500ms, under the 50 minimum
        tracker.add_sample(0, 0.0);
        tracker.add_sample(80, 4.0);
        assert_eq!(tracker.velocity(), 0.0);
        assert!(tracker.raw_velocity() > 0.0);
    }

    #[test]
    fn test_clamped_to_max() {
        let mut tracker = VelocityTracker::default();
        tracker.add_sample(0, 0.0);
        tracker.add_sample(10, 1000.0);
        assert_eq!(tracker.velocity(), 8000.0);
    }

    #[test]
    fn test_same_timestamp_is_still() {
        let mut tracker = VelocityTracker::default();
        tracker.add_sample(5, 0.0);
        tracker.add_sample(5, 50.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut tracker = VelocityTracker::default();
        for i in 0..100 {
            tracker.add_sample(i, i as f32);
        }
        assert_eq!(tracker.len(), HISTORY_SIZE);
        tracker.add_sample(50, 0.0);
        assert_eq!(tracker.len(), HISTORY_SIZE);
        tracker.reset();
        assert!(tracker.is_empty());
    }
}
