//! mapnav CLI
//!
//! Search for a destination near the home landmark and route to it by car,
//! transit, on foot or by bike.

#![allow(clippy::print_stdout)]

mod render;
mod session;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use application::{OperationOutcome, RouteOrchestrator};
use clap::{Parser, Subcommand};
use domain::value_objects::TransportMode;
use infrastructure::{AppConfig, MapServices, build_map_services, init_logging};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::debug;

use crate::render::{outcome_label, render_modes, render_snapshot};
use crate::session::{HELP, SessionCommand};

/// mapnav CLI
#[derive(Parser)]
#[command(name = "mapnav")]
#[command(author, version, about = "Find a place and route to it", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true, env = "MAPNAV_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a destination and print the route to it
    Route {
        /// What to search for
        query: String,

        /// Transport mode: auto, transit, walk or cycle
        #[arg(short, long, default_value = "auto")]
        mode: TransportMode,

        /// Print the map state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read commands from stdin and keep the map state between them
    Interactive,

    /// List transport modes
    Modes,

    /// Print the effective configuration as TOML
    ShowConfig,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_logging(&config.logging, log_filter_from_verbosity(cli.verbose))?;

    match cli.command {
        Commands::Route { query, mode, json } => {
            let MapServices { orchestrator, .. } = build_map_services(&config)?;
            route(&orchestrator, &query, mode, json).await
        },

        Commands::Interactive => {
            let services = build_map_services(&config)?;
            interactive(services).await
        },

        Commands::Modes => {
            print!("{}", render_modes(None));
            Ok(())
        },

        Commands::ShowConfig => {
            config.validate()?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        },
    }
}

async fn route(
    orchestrator: &RouteOrchestrator,
    query: &str,
    mode: TransportMode,
    json: bool,
) -> anyhow::Result<()> {
    // No destination yet, so this only records the mode
    orchestrator.set_transport_mode(mode).await;
    let outcome = orchestrator.search(query).await;
    debug!(?outcome, "Route command finished");

    let snapshot = orchestrator.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render_snapshot(&snapshot));
    }

    match snapshot.error_message {
        Some(message) => anyhow::bail!(message),
        None => Ok(()),
    }
}

async fn interactive(services: MapServices) -> anyhow::Result<()> {
    let MapServices {
        orchestrator,
        location,
    } = services;
    let mut tasks = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}");
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            },
        };

        match command {
            SessionCommand::Search(text) => {
                let orchestrator = Arc::clone(&orchestrator);
                tasks.spawn(async move {
                    let outcome = orchestrator.search(&text).await;
                    println!("search '{text}': {}", outcome_label(outcome));
                    print!("{}", render_snapshot(&orchestrator.snapshot()));
                });
            },
            SessionCommand::Mode(mode) => {
                let orchestrator = Arc::clone(&orchestrator);
                tasks.spawn(async move {
                    let outcome = orchestrator.set_transport_mode(mode).await;
                    println!("mode {mode}: {}", outcome_label(outcome));
                    print!("{}", render_snapshot(&orchestrator.snapshot()));
                });
            },
            SessionCommand::ZoomIn => {
                let outcome = orchestrator.zoom_in();
                print_zoom(&orchestrator, "in", outcome);
            },
            SessionCommand::ZoomOut => {
                let outcome = orchestrator.zoom_out();
                print_zoom(&orchestrator, "out", outcome);
            },
            SessionCommand::Zoom(factor) => {
                let outcome = orchestrator.zoom(factor);
                print_zoom(&orchestrator, &factor.to_string(), outcome);
            },
            SessionCommand::Pan(center) => orchestrator.on_camera_panned(center),
            SessionCommand::Locate(fix) => location.publish(fix),
            SessionCommand::Show => print!("{}", render_snapshot(&orchestrator.snapshot())),
            SessionCommand::Help => println!("{HELP}"),
            SessionCommand::Quit => break,
        }

        // Reap finished requests so the set does not grow unbounded
        while tasks.try_join_next().is_some() {}
    }

    while tasks.join_next().await.is_some() {}
    Ok(())
}

fn print_zoom(orchestrator: &RouteOrchestrator, step: &str, outcome: OperationOutcome) {
    println!("zoom {step}: {}", outcome_label(outcome));
    println!("Camera:      {}", orchestrator.snapshot().camera);
}
