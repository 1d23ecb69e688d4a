//! TUI 常量定义

use std::time::Duration;

/// IPv6 文本形式的最大长度（INET6_ADDRSTRLEN - 1）
pub const MAX_IP_INPUT_LENGTH: usize = 45;

/// 方向键平移的步长（可视范围的比例）
pub const PAN_STEP: f64 = 0.25;

/// 没有按键时的重绘间隔
pub const TICK_RATE: Duration = Duration::from_millis(250);

/// 颜色主题
pub mod colors {
    use ratatui::style::Color;

    /// 主色调
    pub const PRIMARY: Color = Color::Cyan;
    /// 成功色
    pub const SUCCESS: Color = Color::Green;
    /// 警告色
    pub const WARNING: Color = Color::Yellow;
    /// 错误色
    pub const ERROR: Color = Color::Red;
    /// 次要文本色
    pub const MUTED: Color = Color::DarkGray;
    /// 高亮背景色
    pub const HIGHLIGHT_BG: Color = Color::Yellow;
    /// 高亮前景色
    pub const HIGHLIGHT_FG: Color = Color::Black;
    /// 世界地图轮廓
    pub const MAP_OUTLINE: Color = Color::Gray;
    /// 位置标记
    pub const MARKER: Color = Color::LightRed;
}
