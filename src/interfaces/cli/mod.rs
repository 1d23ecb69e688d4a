//! CLI interface module

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::errors::GeoFinderError;
use commands::{config_generate, lookup_ip, print_tile, whoami};

#[derive(Debug)]
pub enum CliError {
    LookupError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::LookupError(msg) => format!("Lookup error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    #[cfg(feature = "cli")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::LookupError(msg) => {
                format!("{} {}", "Lookup error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<GeoFinderError> for CliError {
    fn from(err: GeoFinderError) -> Self {
        match err {
            GeoFinderError::InvalidInput(msg) => CliError::ParseError(msg),
            other => CliError::LookupError(other.format_simple()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Whoami { json } => whoami(json).await,

        Commands::Lookup { ip, direct, json } => lookup_ip(ip, direct, json).await,

        Commands::Tile { loc, zoom } => print_tile(&loc, zoom),

        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force),

        #[cfg(feature = "tui")]
        Commands::Tui => Err(CliError::CommandError(
            "TUI is started from main, not as a CLI command".to_string(),
        )),
    }
}
