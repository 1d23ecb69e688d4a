//! Client layer for CLI/TUI interfaces
//!
//! CLI/TUI 通过本地查询 API 做按 IP 查询，API handler 不经过这一层。
//!
//! ```text
//! CLI/TUI → LookupClient ──HTTP──→ GET /api/ip?ip=… (server mode)
//! ```

mod lookup_client;

pub use lookup_client::LookupClient;
