//! Logging system initialization
//!
//! 三种运行模式的日志输出不同：
//! - server：按配置写 stdout 或文件（可按天轮转）
//! - cli：只写 stderr，默认 `warn`，不污染命令输出
//! - tui：只有配置了日志文件才启用，否则终端界面会被日志打乱

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

const DEFAULT_LOG_FILE_NAME: &str = "geofinder.log";

type BoxedWriter = Box<dyn Write + Send + Sync>;

/// 配置的日志文件路径，空字符串视为未配置
fn configured_file(config: &LoggingConfig) -> Option<&str> {
    config.file.as_deref().filter(|f| !f.is_empty())
}

/// 打开日志文件写入端
fn file_writer(log_file: &str, config: &LoggingConfig) -> Result<BoxedWriter> {
    let path = Path::new(log_file);

    if config.enable_rotation {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(DEFAULT_LOG_FILE_NAME);

        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(config.max_backups.max(1) as usize)
            .build(dir)
            .with_context(|| format!("Failed to create rolling log appender in {}", dir.display()))?;
        return Ok(Box::new(appender));
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", log_file))?;
    Ok(Box::new(file))
}

/// 安装全局 subscriber
///
/// 已经初始化过时忽略（测试中可能被多次调用）
fn install(writer: BoxedWriter, level: &str, json: bool, ansi: bool) -> WorkerGuard {
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(ansi);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = installed {
        eprintln!("[WARN] Logging already initialized: {}", e);
    }

    guard
}

/// 服务器模式日志
///
/// 返回的 `WorkerGuard` 必须在程序运行期间保持存活，否则缓冲的日志不会被刷出
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let (writer, ansi): (BoxedWriter, bool) = match configured_file(config) {
        Some(log_file) => (file_writer(log_file, config)?, false),
        None => (Box::new(std::io::stdout()), true),
    };

    Ok(install(
        writer,
        &config.level,
        config.format.eq_ignore_ascii_case("json"),
        ansi,
    ))
}

/// CLI 模式日志：stderr，`RUST_LOG` 可覆盖默认的 `warn`
pub fn init_cli_logging() -> WorkerGuard {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    install(Box::new(std::io::stderr()), &level, false, true)
}

/// TUI 模式日志：没有配置文件时返回 `None`，不安装 subscriber
pub fn init_tui_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let Some(log_file) = configured_file(config) else {
        return Ok(None);
    };

    let writer = file_writer(log_file, config)?;
    Ok(Some(install(
        writer,
        &config.level,
        config.format.eq_ignore_ascii_case("json"),
        false,
    )))
}
