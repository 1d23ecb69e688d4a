//! Mode routing
//!
//! 统一的运行模式入口：
//! - Server：本地查询 API（无子命令时的默认模式）
//! - Cli：一次性命令
//! - Tui：终端界面

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "server")]
pub use server::run_server;

#[cfg(feature = "cli")]
pub use cli::run_cli;

#[cfg(feature = "tui")]
pub use tui::run_tui;

use crate::cli::{Cli, Commands};

/// Mode detection result
#[derive(Debug, PartialEq)]
pub enum Mode {
    #[cfg(feature = "server")]
    Server,
    #[cfg(feature = "cli")]
    Cli,
    #[cfg(feature = "tui")]
    Tui,
    Unknown,
}

/// 根据解析后的命令行选择运行模式
///
/// 1. `tui` 子命令且启用了 tui feature → TUI
/// 2. 其他子命令且启用了 cli feature → CLI
/// 3. 无子命令且启用了 server feature → Server
/// 4. 否则 → Unknown
pub fn detect_mode(cli: &Cli) -> Mode {
    match cli.command {
        #[cfg(feature = "tui")]
        Some(Commands::Tui) => return Mode::Tui,
        #[cfg(feature = "cli")]
        Some(_) => return Mode::Cli,
        _ => {}
    }

    #[cfg(feature = "server")]
    if cli.command.is_none() {
        return Mode::Server;
    }

    Mode::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_no_subcommand_runs_server() {
        assert_eq!(detect_mode(&parse(&["geofinder"])), Mode::Server);
        assert_eq!(
            detect_mode(&parse(&["geofinder", "-c", "other.toml"])),
            Mode::Server
        );
    }

    #[test]
    fn test_tui_subcommand() {
        assert_eq!(detect_mode(&parse(&["geofinder", "tui"])), Mode::Tui);
    }

    #[test]
    fn test_other_subcommands_run_cli() {
        assert_eq!(detect_mode(&parse(&["geofinder", "whoami"])), Mode::Cli);
        assert_eq!(
            detect_mode(&parse(&["geofinder", "lookup", "8.8.8.8"])),
            Mode::Cli
        );
    }
}
