//! Scenario definition for headless ruler runs.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Sequence of steps played against one ruler.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// One scenario step. Pointer steps happen at the current frame time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Press {
        x: f32,
        #[serde(default)]
        y: f32,
    },
    Move {
        x: f32,
        #[serde(default)]
        y: f32,
    },
    Release {
        x: f32,
        #[serde(default)]
        y: f32,
    },
    Cancel,
    /// Let `ms` of frames pass
    Wait { ms: u64 },
    Tick { frames: u32 },
    SetValue { value: i32 },
    /// Run frames until the ruler stops moving
    Settle {
        #[serde(default)]
        max_frames: Option<u32>,
    },
    AssertValue { value: i32 },
    AssertIdle,
}

impl ScenarioStep {
    /// Step name as written in scenario files
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Press { .. } => "press",
            ScenarioStep::Move { .. } => "move",
            ScenarioStep::Release { .. } => "release",
            ScenarioStep::Cancel => "cancel",
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::SetValue { .. } => "set_value",
            ScenarioStep::Settle { .. } => "settle",
            ScenarioStep::AssertValue { .. } => "assert_value",
            ScenarioStep::AssertIdle => "assert_idle",
        }
    }
}
