//! Scroller
//!
//! Drives one offset along a fling trajectory on the host's frame clock.
//!
//! A trajectory has a start offset, a final offset, and a duration. The
//! position at any frame is `start + spline(elapsed / duration) * (final -
//! start)`, so retargeting the final offset stretches the same easing curve
//! over the new span. The clock starts on the first [`Scroller::compute`]
//! call after a trajectory begins.

use crate::fling::{spline_progress, FlingCalculator};

/// Default duration for a snap that has no fling momentum behind it
pub const DEFAULT_SNAP_DURATION_MS: u64 = 180;

/// One frame of scroller output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    pub offset: f32,
    /// True on the last sample of a trajectory, whose offset is exactly the
    /// final offset
    pub finished: bool,
}

/// Nearest position `anchor + k * pitch` to `offset`
///
/// A position exactly halfway between two grid lines resolves to the more
/// negative one.
pub fn snap_to_grid(offset: f32, pitch: f32, anchor: f32) -> f32 {
    if !(pitch.is_finite() && pitch > 0.0) || !offset.is_finite() {
        return offset;
    }
    let k = (offset - anchor) / pitch;
    anchor + (k - 0.5).ceil() * pitch
}

/// Fling-and-snap scroller for a single axis
#[derive(Debug, Clone)]
pub struct Scroller {
    calculator: FlingCalculator,
    snap_duration_ms: u64,
    bounds: Option<(f32, f32)>,

    start: f32,
    final_offset: f32,
    current: f32,
    duration_ms: u64,
    /// Frame time the trajectory started at, set on the first compute
    start_time: Option<u64>,
    finished: bool,
}

impl Default for Scroller {
    fn default() -> Self {
        Self::new(FlingCalculator::default())
    }
}

impl Scroller {
    /// Create a scroller at rest at offset 0
    pub fn new(calculator: FlingCalculator) -> Self {
        Self {
            calculator,
            snap_duration_ms: DEFAULT_SNAP_DURATION_MS,
            bounds: None,
            start: 0.0,
            final_offset: 0.0,
            current: 0.0,
            duration_ms: 0,
            start_time: None,
            finished: true,
        }
    }

    /// Set the duration used when a snap has no fling momentum
    pub fn with_snap_duration(mut self, duration_ms: u64) -> Self {
        self.snap_duration_ms = duration_ms;
        self
    }

    /// Confine every reported offset to `[min, max]`
    pub fn set_bounds(&mut self, min: f32, max: f32) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.bounds = Some((min, max));
        self.final_offset = self.clamp(self.final_offset);
        self.current = self.clamp(self.current);
    }

    fn clamp(&self, offset: f32) -> f32 {
        match self.bounds {
            Some((min, max)) => offset.clamp(min, max),
            None => offset,
        }
    }

    /// Begin a fling from `start` with `velocity` in px/s
    ///
    /// Replaces any trajectory in progress. A zero velocity leaves the
    /// scroller at rest at `start`.
    pub fn fling(&mut self, start: f32, velocity: f32) {
        let info = self.calculator.fling_info(velocity);
        self.start = start;
        self.current = start;
        self.final_offset = self.clamp(info.target(start));
        self.duration_ms = info.duration_ms;
        self.start_time = None;
        self.finished = self.final_offset == start;

        tracing::debug!(
            "scroller: fling from {} at {} px/s -> {} over {}ms",
            start,
            velocity,
            self.final_offset,
            self.duration_ms
        );
    }

    /// Move the end of the current trajectory to `target`
    ///
    /// The duration is kept. If the trajectory has no duration but must now
    /// move, the snap duration is used instead.
    pub fn set_final_offset(&mut self, target: f32) {
        let target = self.clamp(target);
        self.final_offset = target;

        if target == self.start && self.start_time.is_none() {
            // Nothing to animate yet
            self.duration_ms = 0;
            self.current = self.start;
            self.finished = true;
        } else {
            if self.duration_ms == 0 {
                self.duration_ms = self.snap_duration_ms;
            }
            self.finished = false;
        }

        tracing::debug!(
            "scroller: retarget to {} over {}ms",
            target,
            self.duration_ms
        );
    }

    /// Retarget to the grid position nearest the current final offset
    pub fn settle_to_grid(&mut self, pitch: f32, anchor: f32) {
        let snapped = snap_to_grid(self.final_offset, pitch, anchor);
        tracing::trace!(
            "scroller: snap {} -> {} (pitch {}, anchor {})",
            self.final_offset,
            snapped,
            pitch,
            anchor
        );
        self.set_final_offset(snapped);
    }

    /// Stop where we are
    ///
    /// Keeps the last reported offset. Calling this while at rest does nothing.
    pub fn abort(&mut self) {
        if self.finished {
            return;
        }
        tracing::debug!("scroller: abort at {}", self.current);
        self.finished = true;
        self.final_offset = self.current;
        self.start = self.current;
        self.duration_ms = 0;
        self.start_time = None;
    }

    /// Advance to frame time `now_ms`
    ///
    /// Returns `None` when at rest. The sample flagged `finished` carries the
    /// final offset exactly and is returned once.
    pub fn compute(&mut self, now_ms: u64) -> Option<ScrollSample> {
        if self.finished {
            return None;
        }

        let start_time = *self.start_time.get_or_insert(now_ms);
        let elapsed = now_ms.saturating_sub(start_time);

        if elapsed >= self.duration_ms {
            self.current = self.final_offset;
            self.finished = true;
            tracing::debug!("scroller: settled at {}", self.current);
            return Some(ScrollSample {
                offset: self.current,
                finished: true,
            });
        }

        let progress = elapsed as f32 / self.duration_ms as f32;
        let offset = self.start + spline_progress(progress) * (self.final_offset - self.start);
        self.current = self.clamp(offset);

        tracing::trace!(
            "scroller: t={}ms/{}ms offset={}",
            elapsed,
            self.duration_ms,
            self.current
        );

        Some(ScrollSample {
            offset: self.current,
            finished: false,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Last reported offset
    pub fn current_offset(&self) -> f32 {
        self.current
    }

    pub fn final_offset(&self) -> f32 {
        self.final_offset
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}
