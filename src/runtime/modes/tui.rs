//! TUI mode

use crate::config::get_config;

/// Run TUI mode
pub async fn run_tui() -> Result<(), Box<dyn std::error::Error>> {
    let config = get_config();
    let _guard = crate::system::init_tui_logging(&config.logging)?;
    crate::interfaces::tui::run_tui().await
}
