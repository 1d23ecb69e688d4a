//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// GeoFinder - IP geolocation lookup with a local query API
#[derive(Parser)]
#[command(name = "geofinder")]
#[command(version)]
#[command(about = "Look up where an IP address is and show it on a map", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start TUI mode
    #[cfg(feature = "tui")]
    Tui,

    /// Show this machine's public IP and its location
    Whoami {
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up the location of an IP address
    ///
    /// Without an address, looks up this machine's public IP.
    Lookup {
        /// IPv4 or IPv6 address
        ip: Option<String>,

        /// Query the configured local database in-process instead of the local API
        #[arg(long)]
        direct: bool,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the map tile covering a coordinate
    Tile {
        /// Coordinate as "LAT,LON"
        #[arg(allow_hyphen_values = true)]
        loc: String,

        /// Zoom level (default: map.default_zoom)
        #[arg(long, short = 'z')]
        zoom: Option<u8>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite without asking
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_args() {
        let cli = Cli::try_parse_from(["geofinder", "lookup", "8.8.8.8", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Lookup { ip, direct, json }) => {
                assert_eq!(ip.as_deref(), Some("8.8.8.8"));
                assert!(!direct);
                assert!(json);
            }
            _ => panic!("expected lookup"),
        }
    }

    #[test]
    fn test_direct_help_names_local_database() {
        use clap::CommandFactory;

        let command = Cli::command();
        let lookup = command.find_subcommand("lookup").unwrap();
        let direct = lookup
            .get_arguments()
            .find(|arg| arg.get_id() == "direct")
            .unwrap();
        let help = direct.get_help().unwrap().to_string();
        assert!(help.contains("local database"));
        assert!(!help.contains("upstream"));
    }

    #[test]
    fn test_tile_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["geofinder", "tile", "-33.86,151.2", "-z", "5"]).unwrap();
        match cli.command {
            Some(Commands::Tile { loc, zoom }) => {
                assert_eq!(loc, "-33.86,151.2");
                assert_eq!(zoom, Some(5));
            }
            _ => panic!("expected tile"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["geofinder", "whoami", "--config", "x.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("x.toml"));
    }
}
