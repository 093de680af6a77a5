//! Gesture controller
//!
//! Turns raw pointer events into scale motion:
//! - **Drag**: the scale follows the pointer, clamped to the range
//! - **Fling**: on release the scale keeps moving with the pointer's
//!   velocity and comes to rest exactly on a tick
//! - **Tap**: a short press without travel, reported separately
//!
//! ```text
//! Idle --DOWN--> Dragging --UP|CANCEL--> Flinging --SETTLED--> Idle
//!                   |  ^                    |
//!                   |  +-------DOWN---------+
//!                   +--SETTLED--> Idle   (release with nothing to animate)
//! Idle|Flinging --ANIMATE--> Flinging    (programmatic value change)
//! ```

use ruler_animation::{FlingCalculator, Scroller};
use ruler_core::events::{event_types, EventType, PointerEvent};
use ruler_core::fsm::{StateMachine, StateTransitions};
use serde::Serialize;

use crate::config::{GestureConfig, PhysicsConfig};
use crate::mapper::ValueMapper;
use crate::velocity::VelocityTracker;

/// Interaction state of the ruler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureState {
    /// At rest on a tick
    #[default]
    Idle,
    /// Following the pointer
    Dragging,
    /// Moving on its own towards a tick
    Flinging,
}

impl StateTransitions for GestureState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (GestureState::Idle | GestureState::Flinging, POINTER_DOWN) => {
                Some(GestureState::Dragging)
            }
            (GestureState::Dragging, POINTER_UP | POINTER_CANCEL) => Some(GestureState::Flinging),
            (GestureState::Idle | GestureState::Flinging, ANIMATE) => Some(GestureState::Flinging),
            (GestureState::Dragging | GestureState::Flinging, SETTLED) => Some(GestureState::Idle),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Press {
    x: f32,
    time_ms: u64,
    /// Largest distance from the press point seen so far
    travel: f32,
}

/// Drives the scale offset from pointer input and frame ticks
#[derive(Debug)]
pub struct GestureController {
    fsm: StateMachine<GestureState>,
    mapper: ValueMapper,
    config: GestureConfig,
    tracker: VelocityTracker,
    scroller: Scroller,
    /// Offset committed at the end of the previous gesture
    base_offset: f32,
    offset: f32,
    press: Option<Press>,
    tapped: bool,
}

impl GestureController {
    pub fn new(mapper: ValueMapper, config: GestureConfig, physics: &PhysicsConfig) -> Self {
        let calculator = FlingCalculator::new(physics.friction, physics.density);
        let mut scroller = Scroller::new(calculator).with_snap_duration(physics.snap_duration_ms);
        scroller.set_bounds(mapper.min_offset(), 0.0);

        Self {
            fsm: StateMachine::new(GestureState::Idle),
            tracker: VelocityTracker::new(&config),
            mapper,
            config,
            scroller,
            base_offset: 0.0,
            offset: 0.0,
            press: None,
            tapped: false,
        }
    }

    pub fn state(&self) -> GestureState {
        self.fsm.current_state()
    }

    /// Transition history, oldest first
    pub fn history(&self) -> &[(GestureState, EventType, GestureState)] {
        self.fsm.history()
    }

    /// Current offset of the scale
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Whether frame ticks still move the scale
    pub fn is_animating(&self) -> bool {
        self.fsm.is_in(GestureState::Flinging)
    }

    /// Check if a tap happened and clear the flag
    pub fn take_tapped(&mut self) -> bool {
        std::mem::take(&mut self.tapped)
    }

    /// Feed a pointer event, returning true if the offset changed
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        match event.event_type {
            event_types::POINTER_DOWN => {
                self.press(event);
                false
            }
            event_types::POINTER_MOVE => self.drag(event),
            event_types::POINTER_UP => self.release(event, false),
            event_types::POINTER_CANCEL => self.release(event, true),
            _ => {
                tracing::trace!("gesture: ignoring {} event", event.name());
                false
            }
        }
    }

    fn press(&mut self, event: &PointerEvent) {
        if self.fsm.is_in(GestureState::Dragging) {
            tracing::trace!("gesture: press while already dragging, ignored");
            return;
        }

        // A press always catches a moving scale where it is
        self.scroller.abort();
        self.base_offset = self.offset;
        self.tracker.reset();
        self.tracker.add_sample(event.timestamp, event.x);
        self.press = Some(Press {
            x: event.x,
            time_ms: event.timestamp,
            travel: 0.0,
        });
        self.fsm.send(event_types::POINTER_DOWN);
    }

    fn drag(&mut self, event: &PointerEvent) -> bool {
        let Some(press) = self.press.as_mut() else {
            tracing::trace!("gesture: move without press, ignored");
            return false;
        };

        let dx = event.x - press.x;
        press.travel = press.travel.max(dx.abs());
        self.tracker.add_sample(event.timestamp, event.x);

        let offset = self.mapper.clamp_offset(self.base_offset + dx);
        let changed = offset != self.offset;
        self.offset = offset;
        tracing::trace!("gesture: drag dx={} offset={}", dx, offset);
        changed
    }

    fn release(&mut self, event: &PointerEvent, cancelled: bool) -> bool {
        let Some(press) = self.press.take() else {
            tracing::trace!("gesture: {} without press, ignored", event.name());
            return false;
        };

        let mut changed = false;
        let velocity = if cancelled {
            0.0
        } else {
            // The release position counts as the last drag sample
            changed = self.drag_to(&press, event);
            self.tracker.velocity()
        };
        self.base_offset = self.offset;

        let travel = press.travel.max((event.x - press.x).abs());
        let held_ms = event.timestamp.saturating_sub(press.time_ms);
        if !cancelled && travel < self.config.touch_slop && held_ms < self.config.tap_timeout_ms {
            tracing::debug!("gesture: tap (travel {}px, {}ms)", travel, held_ms);
            self.tapped = true;
        }

        // Release velocity is in px per velocity unit, the engine takes it as px/s
        self.scroller.fling(self.offset, velocity);
        self.scroller.settle_to_grid(self.mapper.pitch(), 0.0);

        if self.scroller.is_finished() {
            self.fsm.send(event_types::SETTLED);
        } else {
            let transition = if cancelled {
                event_types::POINTER_CANCEL
            } else {
                event_types::POINTER_UP
            };
            self.fsm.send(transition);
        }
        changed
    }

    fn drag_to(&mut self, press: &Press, event: &PointerEvent) -> bool {
        self.tracker.add_sample(event.timestamp, event.x);
        let offset = self.mapper.clamp_offset(self.base_offset + event.x - press.x);
        let changed = offset != self.offset;
        self.offset = offset;
        changed
    }

    /// Advance engine-driven motion to frame time `now_ms`
    ///
    /// Returns true if the offset changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.fsm.is_in(GestureState::Flinging) {
            return false;
        }

        let Some(sample) = self.scroller.compute(now_ms) else {
            self.settle();
            return false;
        };

        let offset = self.mapper.clamp_offset(sample.offset);
        let changed = offset != self.offset;
        self.offset = offset;
        if sample.finished {
            self.settle();
        }
        changed
    }

    fn settle(&mut self) {
        self.base_offset = self.offset;
        self.fsm.send(event_types::SETTLED);
    }

    /// Animate the scale to `target` with an initial speed of `speed` px/s
    ///
    /// The target is moved onto the nearest tick. Ignored while dragging,
    /// the pointer owns the scale until it is released. Returns false if the
    /// request was ignored or there is nothing to animate.
    pub fn animate_to(&mut self, target: f32, speed: f32) -> bool {
        if self.fsm.is_in(GestureState::Dragging) {
            tracing::debug!("gesture: animate_to({}) ignored while dragging", target);
            return false;
        }

        self.scroller.abort();
        self.base_offset = self.offset;

        let direction = if target < self.offset { -1.0 } else { 1.0 };
        self.scroller.fling(self.offset, speed.abs() * direction);
        self.scroller.set_final_offset(self.mapper.clamp_offset(target));
        self.scroller.settle_to_grid(self.mapper.pitch(), 0.0);

        if self.scroller.is_finished() {
            if self.fsm.is_in(GestureState::Flinging) {
                self.settle();
            }
            return false;
        }
        self.fsm.send(event_types::ANIMATE);
        true
    }

    /// Stop all motion and forget any press in progress
    pub fn abort(&mut self) {
        self.scroller.abort();
        self.press = None;
        self.tracker.reset();
        self.base_offset = self.offset;
        self.fsm.reset(GestureState::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulerConfig;
    use ruler_core::events::event_types::*;

    fn controller() -> GestureController {
        GestureController::new(
            ValueMapper::new(&RulerConfig::default()),
            GestureConfig::default(),
            &PhysicsConfig::default(),
        )
    }

    fn run_to_rest(ctrl: &mut GestureController, mut now: u64) -> u64 {
        while ctrl.is_animating() {
            ctrl.tick(now);
            now += 16;
            assert!(now < 1_000_000, "fling never settled");
        }
        now
    }

    #[test]
    fn test_transition_table() {
        use GestureState::*;
        assert_eq!(Idle.on_event(POINTER_DOWN), Some(Dragging));
        assert_eq!(Flinging.on_event(POINTER_DOWN), Some(Dragging));
        assert_eq!(Dragging.on_event(POINTER_UP), Some(Flinging));
        assert_eq!(Dragging.on_event(POINTER_CANCEL), Some(Flinging));
        assert_eq!(Idle.on_event(ANIMATE), Some(Flinging));
        assert_eq!(Flinging.on_event(ANIMATE), Some(Flinging));
        assert_eq!(Flinging.on_event(SETTLED), Some(Idle));
        assert_eq!(Dragging.on_event(SETTLED), Some(Idle));
        assert_eq!(Idle.on_event(POINTER_UP), None);
        assert_eq!(Dragging.on_event(POINTER_DOWN), None);
        assert_eq!(Dragging.on_event(ANIMATE), None);
    }

    #[test]
    fn test_drag_follows_pointer() {
        let mut ctrl = controller();
        ctrl.handle_pointer(&PointerEvent::down(500.0, 0.0, 0));
        assert_eq!(ctrl.state(), GestureState::Dragging);
        assert!(ctrl.handle_pointer(&PointerEvent::moved(400.0, 0.0, 400)));
        assert_eq!(ctrl.offset(), -100.0);
        // Dragging right past the start clamps at 0
        ctrl.handle_pointer(&PointerEvent::moved(900.0, 0.0, 800));
        assert_eq!(ctrl.offset(), 0.0);
    }

    #[test]
    fn test_slow_release_on_tick_settles_immediately() {
        let mut ctrl = controller();
        ctrl.handle_pointer(&PointerEvent::down(500.0, 0.0, 0));
        ctrl.handle_pointer(&PointerEvent::moved(400.0, 0.0, 200));
        ctrl.handle_pointer(&PointerEvent::moved(338.0, 0.0, 400));
        ctrl.handle_pointer(&PointerEvent::up(338.0, 0.0, 600));
        assert_eq!(ctrl.offset(), -162.0);
        assert_eq!(ctrl.state(), GestureState::Idle);
        assert_eq!(
            ctrl.history().last(),
            Some(&(GestureState::Dragging, SETTLED, GestureState::Idle))
        );
    }

    #[test]
    fn test_still_release_between_ticks_snaps() {
        let mut ctrl = controller();
        ctrl.handle_pointer(&PointerEvent::down(500.0, 0.0, 0));
        ctrl.handle_pointer(&PointerEvent::moved(470.0, 0.0, 300));
        ctrl.handle_pointer(&PointerEvent::up(470.0, 0.0, 600));
        assert_eq!(ctrl.state(), GestureState::Flinging);
        run_to_rest(&mut ctrl, 616);
        assert_eq!(ctrl.offset(), -54.0);
        assert_eq!(ctrl.state(), GestureState::Idle);
    }

    #[test]
    fn test_fast_release_flings_onto_grid() {
        let mut ctrl = controller();
        ctrl.handle_pointer(&PointerEvent::down(800.0, 0.0, 0));
        for i in 1..=5u64 {
            ctrl.handle_pointer(&PointerEvent::moved(800.0 - i as f32 * 20.0, 0.0, i * 10));
        }
        ctrl.handle_pointer(&PointerEvent::up(700.0, 0.0, 60));
        assert_eq!(ctrl.state(), GestureState::Flinging);

        run_to_rest(&mut ctrl, 76);
        let offset = ctrl.offset();
        assert!(offset < -100.0, "fling should carry past the release point");
        assert_eq!((offset / 54.0).fract(), 0.0);
    }

    #[test]
    fn test_press_catches_fling() {
        let mut ctrl = controller();
        ctrl.handle_pointer(&PointerEvent::down(800.0, 0.0, 0));
        ctrl.handle_pointer(&PointerEvent::moved(750.0, 0.0, 10));
        ctrl.handle_pointer(&PointerEvent::up(700.0, 0.0, 20));
        ctrl.tick(36);
        ctrl.tick(52);
        let caught = ctrl.offset();

        ctrl.handle_pointer(&PointerEvent::down(300.0, 0.0, 60));
        assert_eq!(ctrl.state(), GestureState::Dragging);
        assert!(!ctrl.tick(76));
        assert_eq!(ctrl.offset(), caught);
    }

    #[test]
    fn test_tap() {
        let mut ctrl = controller();
        ctrl.handle_pointer(&PointerEvent::down(500.0, 0.0, 0));
        ctrl.handle_pointer(&PointerEvent::up(503.0, 0.0, 100));
        assert!(ctrl.take_tapped());
        assert!(!ctrl.take_tapped());
    }

    #[test]
    fn test_long_or_moving_press_is_not_a_tap() {
        let mut ctrl = controller();
        ctrl.handle_pointer(&PointerEvent::down(500.0, 0.0, 0));
        ctrl.handle_pointer(&PointerEvent::up(500.0, 0.0, 900));
        assert!(!ctrl.take_tapped());

        ctrl.handle_pointer(&PointerEvent::down(500.0, 0.0, 1000));
        ctrl.handle_pointer(&PointerEvent::moved(480.0, 0.0, 1020));
        ctrl.handle_pointer(&PointerEvent::moved(500.0, 0.0, 1040));
        ctrl.handle_pointer(&PointerEvent::up(500.0, 0.0, 1060));
        assert!(!ctrl.take_tapped());
    }

    #[test]
    fn test_anomalies_ignored() {
        let mut ctrl = controller();
        assert!(!ctrl.handle_pointer(&PointerEvent::moved(10.0, 0.0, 0)));
        assert!(!ctrl.handle_pointer(&PointerEvent::up(10.0, 0.0, 0)));
        assert!(!ctrl.handle_pointer(&PointerEvent::cancel(10.0, 0.0, 0)));
        assert_eq!(ctrl.state(), GestureState::Idle);
        assert!(ctrl.history().is_empty());

        ctrl.handle_pointer(&PointerEvent::down(500.0, 0.0, 0));
        ctrl.handle_pointer(&PointerEvent::moved(450.0, 0.0, 10));
        // Second press keeps the original anchor
        ctrl.handle_pointer(&PointerEvent::down(100.0, 0.0, 20));
        ctrl.handle_pointer(&PointerEvent::moved(440.0, 0.0, 30));
        assert_eq!(ctrl.offset(), -60.0);
    }

    #[test]
    fn test_cancel_settles_without_velocity() {
        let mut ctrl = controller();
        ctrl.handle_pointer(&PointerEvent::down(800.0, 0.0, 0));
        ctrl.handle_pointer(&PointerEvent::moved(700.0, 0.0, 10));
        ctrl.handle_pointer(&PointerEvent::moved(600.0, 0.0, 20));
        ctrl.handle_pointer(&PointerEvent::cancel(0.0, 0.0, 30));
        assert_eq!(ctrl.state(), GestureState::Flinging);
        run_to_rest(&mut ctrl, 46);
        // -200 is nearest to the tick at -216
        assert_eq!(ctrl.offset(), -216.0);
        assert!(!ctrl.take_tapped());
    }

    #[test]
    fn test_animate_to() {
        let mut ctrl = controller();
        assert!(ctrl.animate_to(-540.0, 1000.0));
        assert_eq!(ctrl.state(), GestureState::Flinging);
        let mut last = ctrl.offset();
        let mut now = 0;
        while ctrl.is_animating() {
            ctrl.tick(now);
            assert!(ctrl.offset() <= last);
            last = ctrl.offset();
            now += 16;
        }
        assert_eq!(ctrl.offset(), -540.0);

        // Already there
        assert!(!ctrl.animate_to(-540.0, 1000.0));
        assert_eq!(ctrl.state(), GestureState::Idle);
    }

    #[test]
    fn test_animate_to_ignored_while_dragging() {
        let mut ctrl = controller();
        ctrl.handle_pointer(&PointerEvent::down(500.0, 0.0, 0));
        assert!(!ctrl.animate_to(-540.0, 1000.0));
        assert_eq!(ctrl.state(), GestureState::Dragging);
    }

    #[test]
    fn test_abort_resets_to_idle() {
        let mut ctrl = controller();
        ctrl.animate_to(-540.0, 1000.0);
        ctrl.tick(0);
        ctrl.tick(100);
        let offset = ctrl.offset();
        ctrl.abort();
        assert_eq!(ctrl.state(), GestureState::Idle);
        assert!(!ctrl.tick(200));
        assert_eq!(ctrl.offset(), offset);
    }
}
