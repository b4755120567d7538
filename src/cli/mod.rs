pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::host_context::{ENVIRONMENT_VARIABLE, PRODUCTION};

/// Layered, inheritance-aware configuration for serverless function hosts.
#[derive(Parser, Debug)]
#[command(name = "envlayer", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory containing appsettings*.json files
    #[arg(long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Current hosting environment
    #[arg(long = "env", global = true, env = ENVIRONMENT_VARIABLE, default_value = PRODUCTION)]
    pub environment: String,

    /// Environment declarations file (default: <dir>/environments.toml)
    #[arg(long, global = true)]
    pub environments: Option<PathBuf>,

    /// Skip the host settings layer taken from process variables
    #[arg(long, global = true)]
    pub no_host_settings: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the inheritance chain and the layer files it requests
    Chain,

    /// Print the merged configuration
    Resolve {
        /// Print as a JSON object
        #[arg(long)]
        json: bool,

        /// Show values that come only from process variables
        #[arg(long)]
        show_host_values: bool,
    },

    /// Print a single merged setting
    Get {
        /// Setting key, e.g. AppConfig:IntConfig
        key: String,
    },

    /// Show how secrets would be read from the vault
    Secrets,
}
