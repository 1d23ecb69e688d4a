//! CLI mode

use crate::cli::Commands;
use crate::interfaces::cli::CliError;

/// Run CLI mode
///
/// 日志只写 stderr，命令输出保持干净
pub async fn run_cli(cmd: Commands) -> Result<(), CliError> {
    let _guard = crate::system::init_cli_logging();
    crate::interfaces::cli::run_cli_command(cmd).await
}
