use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::application::services::LogLevel;

/// Estimate and track a personal carbon footprint
#[derive(Debug, Parser)]
#[command(name = "carbon-tracker", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Network API root (overrides CARBON_API_URL and the saved setting)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory for the local database and settings
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Never contact the network API
    #[arg(long, global = true)]
    pub offline: bool,

    /// Keep history and session in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate emissions for a JSON input (file path, or `-` for stdin)
    Calculate {
        #[arg(default_value = "-")]
        input: String,
    },

    /// Show the signed-in user's past calculations, newest first
    History {
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the leaderboard, lowest footprint first
    Leaderboard {
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Summarise the signed-in user's history
    Dashboard,

    /// Remember an identity issued by the auth provider
    Login {
        #[arg(long)]
        user_id: String,

        #[arg(long)]
        display_name: Option<String>,

        /// Bearer token for the network API
        #[arg(long, env = "CARBON_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Forget the stored identity
    Logout,

    /// Show the stored identity
    Whoami,

    /// Inspect or change saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Save the log level used from the next run on
    SetLogLevel { level: LogLevel },

    /// Save the network API root, or clear it with --clear
    SetApiUrl {
        #[arg(required_unless_present = "clear")]
        url: Option<String>,

        #[arg(long, conflicts_with = "url")]
        clear: bool,
    },
}
