//! Ruler CLI
//!
//! Headless tooling around the ruler widget: TOML configuration files,
//! JSON interaction scenarios played on a virtual frame clock, and
//! machine-readable run reports.

pub mod config;
pub mod report;
pub mod runner;
pub mod scenario;

pub use config::{RulerFile, ViewportConfig};
pub use report::{FinalState, ReportStatus, RunReport};
pub use runner::{run_scenario, RunConfig, RunOutcome, ScenarioRunner, StepFailure};
pub use scenario::{Scenario, ScenarioStep};
