//! Tile address command

use colored::Colorize;

use crate::config::get_config;
use crate::interfaces::cli::CliError;
use crate::map::{MAX_ZOOM, TileCoord, tile_url};
use crate::services::geoip::parse_loc;

pub fn print_tile(loc: &str, zoom: Option<u8>) -> Result<(), CliError> {
    let config = get_config();
    let coordinates = parse_loc(loc)?;

    let zoom = zoom.unwrap_or(config.map.default_zoom);
    if zoom > MAX_ZOOM {
        println!(
            "{} Zoom {} is above the tile layer's maximum, using {}",
            "⚠".bold().yellow(),
            zoom,
            MAX_ZOOM
        );
    }

    let tile = TileCoord::from_coordinates(coordinates.latitude, coordinates.longitude, zoom);
    println!("{} {}", "Tile:".bold().green(), tile.to_string().cyan());
    println!("  {}", tile_url(&config.map.tile_url, tile).blue().underline());
    Ok(())
}
