//! Action 系统
//!
//! 按键处理只改同步状态；需要网络的操作排成 Action，
//! 由主循环在重绘出 loading 状态之后再执行。

/// 需要等待网络的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// 查询本机公网 IP 和位置
    FetchSelf,
    /// 取本机公网 IP 填入查询框，随后自动查询
    FillOwnIp,
    /// 通过本地 API 查询输入框中的 IP
    FetchLookup,
}
