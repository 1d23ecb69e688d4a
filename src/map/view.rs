use crate::services::geoip::{Coordinates, GeoRecord};

use super::{DEFAULT_ZOOM, MAX_MERCATOR_LATITUDE, MAX_ZOOM, MIN_ZOOM, TileCoord};

/// 视口横向可见的瓦片数
const VIEWPORT_TILES_ACROSS: f64 = 2.0;
/// 视口宽高比（宽 / 高）
const VIEWPORT_ASPECT: f64 = 2.0;

/// 可视范围（度）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl Bounds {
    pub fn contains(&self, point: Coordinates) -> bool {
        (self.south..=self.north).contains(&point.latitude)
            && (self.west..=self.east).contains(&point.longitude)
    }
}

/// 单条记录对应的地图视图状态
///
/// 只能从带坐标的记录创建；没有坐标就没有地图。
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    target: Coordinates,
    center: Coordinates,
    zoom: u8,
    default_zoom: u8,
    popup: String,
}

impl MapView {
    /// 以默认缩放级别创建视图，记录没有坐标时返回 `None`
    pub fn for_record(record: &GeoRecord) -> Option<Self> {
        Self::with_default_zoom(record, DEFAULT_ZOOM)
    }

    pub fn with_default_zoom(record: &GeoRecord, default_zoom: u8) -> Option<Self> {
        let target = record.coordinates?;
        let default_zoom = default_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        Some(Self {
            target,
            center: target,
            zoom: default_zoom,
            default_zoom,
            popup: record.place_label(),
        })
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    /// 标记所在位置
    pub fn target(&self) -> Coordinates {
        self.target
    }

    /// 弹窗文本 "city, region, country"
    pub fn popup_text(&self) -> &str {
        &self.popup
    }

    /// 放大一级，已到上限则不变，返回当前级别
    pub fn zoom_in(&mut self) -> u8 {
        if self.zoom < MAX_ZOOM {
            self.zoom += 1;
        }
        self.zoom
    }

    /// 缩小一级，已到下限则不变，返回当前级别
    pub fn zoom_out(&mut self) -> u8 {
        if self.zoom > MIN_ZOOM {
            self.zoom -= 1;
        }
        self.zoom
    }

    /// 回到标记位置和默认缩放级别
    pub fn recenter(&mut self) {
        self.center = self.target;
        self.zoom = self.default_zoom;
    }

    /// 按可视范围的比例平移，`dx` 向东为正，`dy` 向北为正
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let (lon_span, lat_span) = self.spans();

        // 经度折回 [-180, 180)
        let lon = (self.center.longitude + dx * lon_span + 180.0).rem_euclid(360.0) - 180.0;
        let lat = (self.center.latitude + dy * lat_span)
            .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);

        self.center = Coordinates {
            latitude: lat,
            longitude: lon,
        };
    }

    /// 当前可视范围
    pub fn viewport(&self) -> Bounds {
        let (lon_span, lat_span) = self.spans();
        Bounds {
            west: (self.center.longitude - lon_span / 2.0).max(-180.0),
            east: (self.center.longitude + lon_span / 2.0).min(180.0),
            south: (self.center.latitude - lat_span / 2.0).max(-90.0),
            north: (self.center.latitude + lat_span / 2.0).min(90.0),
        }
    }

    /// 视图中心所在的瓦片
    pub fn center_tile(&self) -> TileCoord {
        TileCoord::from_coordinates(self.center.latitude, self.center.longitude, self.zoom)
    }

    /// 标记是否在可视范围内
    pub fn target_visible(&self) -> bool {
        self.viewport().contains(self.target)
    }

    fn spans(&self) -> (f64, f64) {
        let lon_span = (360.0 / f64::from(1u32 << self.zoom) * VIEWPORT_TILES_ACROSS).min(360.0);
        let lat_scale = self.center.latitude.to_radians().cos().max(0.05);
        let lat_span = (lon_span * lat_scale / VIEWPORT_ASPECT * 2.0).min(180.0);
        (lon_span, lat_span)
    }
}
