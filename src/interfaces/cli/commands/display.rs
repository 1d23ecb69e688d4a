//! 记录的终端输出

use colored::Colorize;

use crate::config::get_config;
use crate::map::{MapView, tile_url};
use crate::services::GeoRecord;
use crate::services::geoip::UNKNOWN;

fn field(label: &str, value: Option<&str>) {
    let value = match value {
        Some(v) => v.white(),
        None => UNKNOWN.dimmed(),
    };
    println!("  {:<12} {}", format!("{}:", label).bold(), value);
}

/// 打印一条记录，有坐标时附带地图瓦片地址
pub fn print_record(title: &str, record: &GeoRecord) {
    println!("{} {}", title.bold().green(), record.ip.cyan());
    println!();

    field("City", record.city.as_deref());
    field("Region", record.region.as_deref());
    field("Country", record.country.as_deref());
    field("Timezone", record.timezone.as_deref());

    let coordinates = record.coordinates.map(|c| c.to_string());
    field("Location", coordinates.as_deref());

    // 以下字段只有部分数据源提供，缺失时不显示
    let accuracy = record.area.map(|km| format!("{} km", km));
    let extras = [
        ("Org", record.organization.as_deref()),
        ("Hostname", record.hostname.as_deref()),
        ("Postal", record.postal.as_deref()),
        ("Range", record.range.as_deref()),
        ("Accuracy", accuracy.as_deref()),
    ];
    for (label, value) in extras {
        if value.is_some() {
            field(label, value);
        }
    }

    let config = get_config();
    // 没有坐标就不输出地图部分
    if let Some((view, url)) = map_for(record, config.map.default_zoom, &config.map.tile_url) {
        println!();
        println!(
            "{} {} {}",
            "🗺".blue(),
            view.popup_text().bold(),
            format!("(zoom {}, tile {})", view.zoom(), view.center_tile()).dimmed()
        );
        println!("  {}", url.blue().underline());
    }
}

/// 记录对应的地图视图和中心瓦片地址
fn map_for(record: &GeoRecord, default_zoom: u8, tile_template: &str) -> Option<(MapView, String)> {
    let view = MapView::with_default_zoom(record, default_zoom)?;
    let url = tile_url(tile_template, view.center_tile());
    Some((view, url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::geoip::Coordinates;

    const TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

    #[test]
    fn test_map_for_located_record() {
        let mut record = GeoRecord::new("8.8.8.8");
        record.coordinates = Some(Coordinates::new(37.4056, -122.0775).unwrap());

        let (view, url) = map_for(&record, 13, TEMPLATE).unwrap();
        assert_eq!(view.zoom(), 13);
        assert!(url.contains("/13/"));
    }

    #[test]
    fn test_no_map_without_coordinates() {
        let record = GeoRecord::new("203.0.113.7");
        assert!(map_for(&record, 13, TEMPLATE).is_none());
    }
}
