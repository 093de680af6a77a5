//! Plays scenarios against a ruler on a virtual frame clock.

use crate::config::RulerFile;
use crate::report::{FinalState, ReportStatus, RunReport};
use crate::scenario::{Scenario, ScenarioStep};
use anyhow::{bail, Result};
use ruler_core::PointerEvent;
use ruler_widgets::{GestureState, Ruler};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Runner settings.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Frame interval in milliseconds
    pub tick_ms: u64,
    /// Frame cap for `settle` steps that don't set their own
    pub settle_frames: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            settle_frames: 2_000,
        }
    }
}

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: RunReport },
    Failed { report: RunReport },
}

impl RunOutcome {
    pub fn report(&self) -> &RunReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Why a step failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepFailure {
    #[error("expected value {expected}, got {actual}")]
    ValueMismatch { expected: i32, actual: i32 },
    #[error("expected idle, ruler is {state:?}")]
    NotIdle { state: GestureState },
    #[error("ruler still moving after {frames} frames")]
    SettleTimeout { frames: u32 },
}

/// Execute scenario JSON against the configured ruler.
pub fn run_scenario(input: &str, file: &RulerFile, cfg: RunConfig) -> Result<RunOutcome> {
    let scenario = Scenario::from_json(input)?;
    ScenarioRunner::new(file, cfg)?.run(&scenario)
}

/// A ruler under test with its recorded callbacks.
pub struct ScenarioRunner {
    ruler: Ruler,
    cfg: RunConfig,
    notifications: Arc<Mutex<Vec<i32>>>,
    activations: Arc<AtomicU32>,
    pointer: (f32, f32),
    elapsed_frames: u64,
    elapsed_ms: u64,
}

impl ScenarioRunner {
    /// Build and attach the ruler described by `file`.
    pub fn new(file: &RulerFile, cfg: RunConfig) -> Result<Self> {
        if cfg.tick_ms == 0 {
            bail!("tick_ms must be > 0");
        }
        let mut ruler = file.build_ruler()?;

        let notifications = Arc::new(Mutex::new(Vec::new()));
        let sink = notifications.clone();
        ruler.set_value_changed_listener(move |value| {
            if let Ok(mut seen) = sink.lock() {
                seen.push(value);
            }
        });
        let activations = Arc::new(AtomicU32::new(0));
        let taps = activations.clone();
        ruler.set_activate_listener(move || {
            taps.fetch_add(1, Ordering::Relaxed);
        });
        ruler.attach();

        Ok(Self {
            ruler,
            cfg,
            notifications,
            activations,
            pointer: (0.0, 0.0),
            elapsed_frames: 0,
            elapsed_ms: 0,
        })
    }

    pub fn ruler(&self) -> &Ruler {
        &self.ruler
    }

    /// Run every step, stopping at the first failure.
    pub fn run(mut self, scenario: &Scenario) -> Result<RunOutcome> {
        for (step_index, step) in scenario.steps.iter().enumerate() {
            tracing::debug!("step {}: {}", step_index, step.name());
            if let Err(failure) = self.apply(step) {
                tracing::info!("step {} ({}) failed: {}", step_index, step.name(), failure);
                let mut report = self.report(ReportStatus::Failed);
                report.failed_step_index = Some(step_index);
                report.assertion = Some(step.name().to_string());
                report.message = Some(failure.to_string());
                return Ok(RunOutcome::Failed { report });
            }
        }
        Ok(RunOutcome::Passed {
            report: self.report(ReportStatus::Passed),
        })
    }

    fn apply(&mut self, step: &ScenarioStep) -> std::result::Result<(), StepFailure> {
        let now = self.elapsed_ms;
        match *step {
            ScenarioStep::Press { x, y } => {
                self.pointer = (x, y);
                self.ruler.on_pointer_event(&PointerEvent::down(x, y, now));
            }
            ScenarioStep::Move { x, y } => {
                self.pointer = (x, y);
                self.ruler.on_pointer_event(&PointerEvent::moved(x, y, now));
            }
            ScenarioStep::Release { x, y } => {
                self.pointer = (x, y);
                self.ruler.on_pointer_event(&PointerEvent::up(x, y, now));
            }
            ScenarioStep::Cancel => {
                let (x, y) = self.pointer;
                self.ruler.on_pointer_event(&PointerEvent::cancel(x, y, now));
            }
            ScenarioStep::Wait { ms } => {
                let mut remaining = ms;
                for _ in 0..wait_frames(ms, self.cfg.tick_ms) {
                    let step_ms = remaining.min(self.cfg.tick_ms);
                    remaining -= step_ms;
                    self.frame(step_ms);
                }
            }
            ScenarioStep::Tick { frames } => {
                for _ in 0..frames {
                    self.frame(self.cfg.tick_ms);
                }
            }
            ScenarioStep::SetValue { value } => self.ruler.set_current_value(value),
            ScenarioStep::Settle { max_frames } => {
                let limit = max_frames.unwrap_or(self.cfg.settle_frames);
                let mut frames = 0;
                while self.ruler.is_animating() {
                    if frames >= limit {
                        return Err(StepFailure::SettleTimeout { frames });
                    }
                    self.frame(self.cfg.tick_ms);
                    frames += 1;
                }
            }
            ScenarioStep::AssertValue { value } => {
                let actual = self.ruler.current_value();
                if actual != value {
                    return Err(StepFailure::ValueMismatch {
                        expected: value,
                        actual,
                    });
                }
            }
            ScenarioStep::AssertIdle => {
                let state = self.ruler.gesture_state();
                if state != GestureState::Idle {
                    return Err(StepFailure::NotIdle { state });
                }
            }
        }
        Ok(())
    }

    fn frame(&mut self, advance_ms: u64) {
        self.elapsed_frames = self.elapsed_frames.saturating_add(1);
        self.elapsed_ms = self.elapsed_ms.saturating_add(advance_ms);
        self.ruler.tick(self.elapsed_ms);
    }

    fn report(&self, status: ReportStatus) -> RunReport {
        let notifications = self
            .notifications
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default();
        RunReport {
            status,
            failed_step_index: None,
            assertion: None,
            message: None,
            final_state: FinalState {
                value: self.ruler.current_value(),
                offset: self.ruler.current_offset(),
                state: self.ruler.gesture_state(),
            },
            notifications,
            activations: self.activations.load(Ordering::Relaxed),
            elapsed_frames: self.elapsed_frames,
            elapsed_ms: self.elapsed_ms,
        }
    }
}

fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = wait_ms.saturating_add(tick - 1) / tick;
    frames.min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_frames_round_up() {
        assert_eq!(wait_frames(0, 16), 0);
        assert_eq!(wait_frames(1, 16), 1);
        assert_eq!(wait_frames(16, 16), 1);
        assert_eq!(wait_frames(300, 16), 19);
    }

    #[test]
    fn test_wait_advances_exact_time() {
        let outcome = run_scenario(
            r#"{"steps": [{"type": "wait", "ms": 300}]}"#,
            &RulerFile::default(),
            RunConfig::default(),
        )
        .unwrap();
        assert!(!outcome.is_failed());
        assert_eq!(outcome.report().elapsed_frames, 19);
        assert_eq!(outcome.report().elapsed_ms, 300);
    }

    #[test]
    fn test_zero_tick_rejected() {
        let cfg = RunConfig {
            tick_ms: 0,
            ..RunConfig::default()
        };
        assert!(ScenarioRunner::new(&RulerFile::default(), cfg).is_err());
    }

    #[test]
    fn test_settle_timeout_fails_step() {
        let outcome = run_scenario(
            r#"{"steps": [
                {"type": "set_value", "value": 40},
                {"type": "settle", "max_frames": 2}
            ]}"#,
            &RulerFile::default(),
            RunConfig::default(),
        )
        .unwrap();
        assert!(outcome.is_failed());
        let report = outcome.report();
        assert_eq!(report.failed_step_index, Some(1));
        assert_eq!(report.assertion.as_deref(), Some("settle"));
        assert_eq!(
            report.message.as_deref(),
            Some("ruler still moving after 2 frames")
        );
    }
}
