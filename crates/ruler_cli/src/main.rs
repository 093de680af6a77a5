//! `ruler` command line tool

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ruler_cli::{RulerFile, RunConfig, Scenario, ScenarioRunner};
use ruler_paint::PaintContext;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ruler")]
#[command(about = "Headless tools for the ruler picker")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default ruler.toml
    Init {
        #[arg(default_value = "ruler.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Play a JSON scenario and print the report
    Simulate {
        /// Scenario file
        #[arg(short, long)]
        scenario: PathBuf,

        /// Config file or directory containing ruler.toml
        #[arg(short, long, default_value = ".")]
        config: PathBuf,

        /// Also write the report to this relative path
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Frame interval in milliseconds
        #[arg(long, default_value_t = 16)]
        tick_ms: u64,
    },

    /// Print the paint commands for a value as JSON
    Paint {
        /// Config file or directory containing ruler.toml
        #[arg(short, long, default_value = ".")]
        config: PathBuf,

        /// Value to show; defaults to the minimum
        #[arg(long)]
        value: Option<i32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { path, force } => cmd_init(path, force),
        Commands::Simulate {
            scenario,
            config,
            report,
            tick_ms,
        } => cmd_simulate(scenario, config, report, tick_ms),
        Commands::Paint { config, value } => cmd_paint(config, value),
    }
}

fn cmd_init(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let content = RulerFile::default().to_toml()?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

fn cmd_simulate(
    scenario: PathBuf,
    config: PathBuf,
    report: Option<PathBuf>,
    tick_ms: u64,
) -> Result<()> {
    let file = RulerFile::load(&config)?;
    let scenario = Scenario::from_path(&scenario)?;
    let cfg = RunConfig {
        tick_ms,
        ..RunConfig::default()
    };

    tracing::info!("Running {} steps", scenario.steps.len());
    let outcome = ScenarioRunner::new(&file, cfg)?.run(&scenario)?;

    outcome.report().write_to_writer(&mut std::io::stdout().lock())?;
    if let Some(path) = report {
        outcome
            .report()
            .write_to_path(&path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    if outcome.is_failed() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_paint(config: PathBuf, value: Option<i32>) -> Result<()> {
    let file = RulerFile::load(&config)?;
    let mut ruler = file.build_ruler()?;

    if let Some(value) = value {
        ruler.set_current_value(value);
        let mut now = 0;
        while ruler.tick(now) {
            now += 16;
        }
        tracing::debug!("settled at {} after {}ms", ruler.current_value(), now);
    }

    let mut ctx = PaintContext::new();
    ruler.paint(&mut ctx);
    println!("{}", serde_json::to_string_pretty(ctx.commands())?);
    Ok(())
}
