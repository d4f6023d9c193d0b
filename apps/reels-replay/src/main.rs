//! Reels Replay - drives the playback coordinator from a scripted feed trace.
//!
//! Each scenario step stands in for one UI or player callback (mount,
//! viewability, focus, readiness, mute). Simulated players record the
//! commands they receive, so a trace from a bug report can be replayed and
//! the coordinator's decisions inspected step by step.

mod config;
mod runner;
mod scenario;
mod sim;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use reels_core::DuplicatePolicy;

use crate::config::ReplayConfig;
use crate::runner::ReplayReport;
use crate::scenario::Scenario;
use crate::sim::HandleCommand;

/// Reels Replay - replay feed event traces against the playback coordinator.
#[derive(Parser, Debug)]
#[command(name = "reels-replay")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (YAML) to replay.
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Path to the configuration file (YAML).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(short, long, default_value = "info", env = "REELS_LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// Start with the feed muted (overrides config file).
    #[arg(short = 'm', long)]
    start_muted: bool,

    /// Duplicate registration policy: reject or replace (overrides config file).
    #[arg(short = 'd', long, value_name = "POLICY")]
    duplicate_registration: Option<DuplicatePolicy>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .format_timestamp_millis()
        .init();

    log::info!("Reels Replay v{}", env!("CARGO_PKG_VERSION"));

    let mut config =
        ReplayConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    if args.start_muted {
        config.start_muted = true;
    }
    if let Some(policy) = args.duplicate_registration {
        config.duplicate_registration = policy;
    }

    log::info!(
        "Configuration: start_muted={}, duplicate_registration={:?}",
        config.start_muted,
        config.duplicate_registration
    );

    let scenario = Scenario::load(&args.scenario)?;
    let report = runner::run(&scenario, &config.to_core_config())?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &ReplayReport) {
    if let Some(name) = &report.name {
        println!("Scenario: {name}");
    }

    println!("Handle commands:");
    for entry in &report.trace {
        let command = match entry.command {
            HandleCommand::Play => "play".to_string(),
            HandleCommand::Pause => "pause".to_string(),
            HandleCommand::Mute { muted } => format!("muted={muted}"),
        };
        println!("  [step {:>3}] {:<12} {}", entry.step, entry.item_id, command);
    }

    println!("Item states:");
    for (id, state) in &report.item_states {
        println!("  {id:<12} {state:?}");
    }

    let active = report
        .final_intent
        .active_id
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    println!(
        "Final intent: active={} muted={}",
        active, report.final_intent.muted
    );
    println!("Events observed: {}", report.events.len());
}
