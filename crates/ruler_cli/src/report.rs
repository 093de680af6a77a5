//! Report output model for headless ruler runs.

use anyhow::{bail, Result};
use ruler_widgets::GestureState;
use serde::Serialize;
use std::io::Write;
use std::path::{Component, Path};

/// Report status for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Where the ruler ended up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalState {
    pub value: i32,
    pub offset: f32,
    pub state: GestureState,
}

/// Machine-readable result of a scenario run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "final")]
    pub final_state: FinalState,
    /// Every value the listener saw, in order, starting with the attach report
    pub notifications: Vec<i32>,
    pub activations: u32,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
}

impl RunReport {
    pub fn is_failed(&self) -> bool {
        self.status == ReportStatus::Failed
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if path.is_absolute() || path.has_root() {
            bail!("report path must be relative and must not start with a separator");
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("report path cannot contain '..' or drive prefixes");
        }
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
