// UI submodules
mod common;
mod info_panel;
mod map_panel;
pub mod widgets;

pub use common::{draw_footer, draw_status_bar, draw_title_bar};
pub use info_panel::draw_info_panel;
pub use map_panel::draw_map_panel;

use super::app::{App, Screen};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use widgets::InputField;

/// Main UI rendering entry point
pub fn ui(frame: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    draw_title_bar(frame, app, main_chunks[0]);

    // 没有坐标时不画地图，信息栏占满整行
    let map = app.current().map.as_ref();
    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(content_constraints(map.is_some()))
        .split(main_chunks[1]);

    match app.current_screen {
        Screen::Home => {
            draw_info_panel(frame, "Your Location", &app.home, content[0]);
        }
        Screen::Lookup => {
            let left = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(5)])
                .split(content[0]);

            InputField::new("IP Address", &app.lookup_input)
                .active(!app.loading)
                .placeholder("Enter to look up")
                .render(frame, left[0]);
            draw_info_panel(frame, "Lookup Result", &app.lookup, left[1]);
        }
    }

    if let Some(view) = map {
        draw_map_panel(frame, view, &app.tile_url, content[1]);
    }
    draw_status_bar(frame, app, main_chunks[2]);
    draw_footer(frame, app, main_chunks[3]);
}

fn content_constraints(with_map: bool) -> Vec<Constraint> {
    if with_map {
        vec![Constraint::Percentage(35), Constraint::Percentage(65)]
    } else {
        vec![Constraint::Percentage(100)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::tui::app::tests::{located_record, test_app};
    use crate::services::GeoRecord;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| ui(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_map_panel_drawn_with_coordinates() {
        let mut app = test_app();
        app.home.replace(located_record("8.8.8.8"), app.default_zoom);
        assert!(render(&app).contains("Map  zoom"));
    }

    #[test]
    fn test_map_absent_without_coordinates() {
        let mut app = test_app();
        assert!(!render(&app).contains("Map"));

        app.home.replace(GeoRecord::new("203.0.113.7"), app.default_zoom);
        let screen = render(&app);
        assert!(screen.contains("203.0.113.7"));
        assert!(!screen.contains("Map"));
    }
}
