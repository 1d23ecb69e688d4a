//! 地图显示模型
//!
//! 与具体渲染无关：只负责中心点、缩放级别、可视范围和瓦片地址的计算，
//! TUI 的地图面板基于它绘制。

mod tiles;
mod view;

pub use tiles::{TileCoord, tile_url};
pub use view::{Bounds, MapView};

/// 初始缩放级别，"recenter" 也会回到这个级别
pub const DEFAULT_ZOOM: u8 = 13;
/// 瓦片图层支持的最小缩放级别
pub const MIN_ZOOM: u8 = 0;
/// 瓦片图层支持的最大缩放级别（OpenStreetMap 标准图层上限）
pub const MAX_ZOOM: u8 = 19;

/// OpenStreetMap 标准瓦片地址模板
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Web Mercator 投影的纬度上限
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;
