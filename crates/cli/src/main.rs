//! padctl - padlink controller CLI
//!
//! Lists attached game controllers, streams their canonical input reports and
//! manages the engine configuration file.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::ConfigCommands;
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "padctl")]
#[command(about = "padlink controller CLI - list, watch and configure game controllers")]
#[command(version)]
#[command(long_about = "
padctl talks to Switch Pro, DualSense, DualShock 4, Wii Remote and GameCube
adapter controllers through the padlink engine and prints their input as
vendor-neutral reports.

Use --json for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List attached supported controllers
    List,

    /// Discover controllers and print their reports as they change
    Watch {
        /// Config file path
        #[arg(long, env = "PADCTL_CONFIG")]
        config: Option<PathBuf>,
        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u64>,
    },

    /// Configuration file commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[expect(clippy::exit, reason = "the exit code encodes the error kind")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("padctl={log_level},padlink_engine={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match execute_command(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e
                .downcast_ref::<CliError>()
                .map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::List => commands::list::execute(cli.json),
        Commands::Watch { config, ticks } => {
            commands::watch::execute(config.as_deref(), *ticks, cli.json)
        }
        Commands::Config(cmd) => commands::config::execute(cmd, cli.json),
    }
}
