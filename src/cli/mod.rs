//! CLI interface for Armory

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "armory")]
#[command(version = "0.1.0")]
#[command(about = "Multiplayer game account, character, and item service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new armory.toml configuration file
    Init,

    /// Run the HTTP API server
    Serve {
        /// Host to bind, overriding the configured value
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overriding the configured value
        #[arg(long)]
        port: Option<u16>,
    },
}
