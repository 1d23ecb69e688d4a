//! Slippy map 瓦片坐标

use std::f64::consts::PI;

use super::{MAX_MERCATOR_LATITUDE, MAX_ZOOM};

/// 瓦片坐标 z/x/y
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    /// 计算包含给定经纬度的瓦片
    pub fn from_coordinates(latitude: f64, longitude: f64, zoom: u8) -> Self {
        let z = zoom.min(MAX_ZOOM);
        let n = f64::from(1u32 << z);
        let max_index = (1u32 << z) - 1;

        let lat = latitude.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
        let lon = longitude.clamp(-180.0, 180.0);

        let x = ((lon + 180.0) / 360.0 * n).floor();
        let lat_rad = lat.to_radians();
        let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n).floor();

        Self {
            z,
            x: (x.max(0.0) as u32).min(max_index),
            y: (y.max(0.0) as u32).min(max_index),
        }
    }

    /// 瓦片西北角的经纬度
    pub fn north_west(&self) -> (f64, f64) {
        let n = f64::from(1u32 << self.z);
        let lon = f64::from(self.x) / n * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * f64::from(self.y) / n)).sinh().atan().to_degrees();
        (lat, lon)
    }

    /// `{s}` 子域名，按 a/b/c 轮换
    pub fn subdomain(&self) -> char {
        ['a', 'b', 'c'][((self.x + self.y) % 3) as usize]
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// 展开瓦片地址模板中的 `{s}` `{z}` `{x}` `{y}`
pub fn tile_url(template: &str, tile: TileCoord) -> String {
    template
        .replace("{s}", &tile.subdomain().to_string())
        .replace("{z}", &tile.z.to_string())
        .replace("{x}", &tile.x.to_string())
        .replace("{y}", &tile.y.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::OSM_TILE_URL;

    #[test]
    fn test_zoom_zero_is_single_tile() {
        let tile = TileCoord::from_coordinates(0.0, 0.0, 0);
        assert_eq!(tile, TileCoord { z: 0, x: 0, y: 0 });
        let tile = TileCoord::from_coordinates(-89.0, 179.9, 0);
        assert_eq!(tile, TileCoord { z: 0, x: 0, y: 0 });
    }

    #[test]
    fn test_known_tile() {
        // 伦敦，z=10
        let tile = TileCoord::from_coordinates(51.5074, -0.1278, 10);
        assert_eq!(tile, TileCoord { z: 10, x: 511, y: 340 });
    }

    #[test]
    fn test_edges_are_clamped() {
        let tile = TileCoord::from_coordinates(90.0, 180.0, 2);
        assert_eq!(tile.x, 3);
        assert_eq!(tile.y, 0);
        let tile = TileCoord::from_coordinates(-90.0, -180.0, 2);
        assert_eq!(tile.x, 0);
        assert_eq!(tile.y, 3);
    }

    #[test]
    fn test_north_west_corner_contains_point() {
        let tile = TileCoord::from_coordinates(37.4056, -122.0775, 13);
        let (lat, lon) = tile.north_west();
        assert!(lat >= 37.4056);
        assert!(lon <= -122.0775);
    }

    #[test]
    fn test_tile_url() {
        let tile = TileCoord { z: 13, x: 1316, y: 3176 };
        let url = tile_url(OSM_TILE_URL, tile);
        assert_eq!(url, "https://b.tile.openstreetmap.org/13/1316/3176.png");
    }
}
