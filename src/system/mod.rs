//! System-level modules
//!
//! 目前只有日志初始化；配置见 `crate::config`，运行模式见 `crate::runtime`。

pub mod logging;

pub use logging::{init_cli_logging, init_logging, init_tui_logging};
