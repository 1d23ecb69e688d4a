use clap::Parser;

use geofinder::cli::Cli;
use geofinder::config::{DEFAULT_CONFIG_PATH, get_config, init_config_from};
use geofinder::runtime::modes::{Mode, detect_mode};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config_from(cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH));

    match detect_mode(&cli) {
        #[cfg(feature = "tui")]
        Mode::Tui => {
            if let Err(e) = geofinder::runtime::modes::run_tui().await {
                eprintln!("TUI error: {}", e);
                std::process::exit(1);
            }
        }

        #[cfg(feature = "cli")]
        Mode::Cli => {
            if let Some(cmd) = cli.command
                && let Err(e) = geofinder::runtime::modes::run_cli(cmd).await
            {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        }

        #[cfg(feature = "server")]
        Mode::Server => {
            let config = get_config();
            let _guard = geofinder::system::init_logging(&config.logging)?;
            geofinder::runtime::modes::run_server().await?;
        }

        Mode::Unknown => {
            eprintln!("No runnable mode for this build (enable the 'server' feature)");
            std::process::exit(1);
        }
    }

    Ok(())
}
