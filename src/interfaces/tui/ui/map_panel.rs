use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders,
        canvas::{Canvas, Map, MapResolution, Points},
    },
};

use crate::interfaces::tui::constants::colors;
use crate::map::{MapView, tile_url};

/// 地图面板：世界轮廓 + 标记 + 弹窗文本
pub fn draw_map_panel(frame: &mut Frame, view: &MapView, tile_template: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::PRIMARY));

    let tile = view.center_tile();
    let bounds = view.viewport();
    let target = view.target();
    let popup = view.popup_text().to_string();

    let block = block
        .title(format!(" Map  zoom {}  tile {} ", view.zoom(), tile))
        .title_bottom(Line::from(Span::styled(
            format!(" {} ", tile_url(tile_template, tile)),
            Style::default().fg(colors::MUTED),
        )));

    let canvas = Canvas::default()
        .block(block)
        .marker(symbols::Marker::Braille)
        .x_bounds([bounds.west, bounds.east])
        .y_bounds([bounds.south, bounds.north])
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: colors::MAP_OUTLINE,
                resolution: MapResolution::High,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &[(target.longitude, target.latitude)],
                color: colors::MARKER,
            });
            ctx.print(
                target.longitude,
                target.latitude,
                Line::from(Span::styled(
                    format!(" ● {}", popup),
                    Style::default().fg(colors::MARKER).bold(),
                )),
            );
        });

    frame.render_widget(canvas, area);
}
