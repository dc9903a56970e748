//! Command implementations for padctl

pub mod config;
pub mod list;
pub mod watch;

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write the default configuration file
    Init {
        /// Config file path (defaults to the platform config directory)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration as JSON
    Show {
        /// Config file path (defaults to the platform config directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}
