use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use strum::IntoEnumIterator;

use crate::interfaces::tui::app::{App, Screen};
use crate::interfaces::tui::constants::colors;

/// Draw title bar with version and page tabs
pub fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled("GeoFinder", Style::default().fg(colors::PRIMARY).bold()),
        Span::styled(
            format!(" v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(colors::MUTED),
        ),
    ];

    for screen in Screen::iter() {
        spans.push(Span::styled("| ", Style::default().fg(colors::MUTED)));
        let style = if screen == app.current_screen {
            Style::default()
                .fg(colors::HIGHLIGHT_FG)
                .bg(colors::HIGHLIGHT_BG)
                .bold()
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", screen.as_ref()), style));
        spans.push(Span::raw(" "));
    }

    let title = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(colors::PRIMARY)),
        )
        .alignment(ratatui::layout::Alignment::Center);

    frame.render_widget(title, area);
}

/// Draw status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (status_text, status_style) = if app.loading {
        (
            "[LOADING] Fetching location...".to_string(),
            Style::default().fg(Color::Black).bg(colors::WARNING).bold(),
        )
    } else if !app.error_message.is_empty() {
        (
            format!("[ERROR] {}", app.error_message),
            Style::default().fg(Color::White).bg(colors::ERROR).bold(),
        )
    } else if !app.status_message.is_empty() {
        (
            format!("[OK] {}", app.status_message),
            Style::default().fg(Color::Black).bg(colors::SUCCESS).bold(),
        )
    } else {
        ("Ready".to_string(), Style::default().fg(colors::PRIMARY))
    };

    let status = Paragraph::new(status_text)
        .style(status_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .alignment(ratatui::layout::Alignment::Center);

    frame.render_widget(status, area);
}

/// Draw footer with keyboard shortcuts
pub fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut shortcuts = match app.current_screen {
        Screen::Home => vec![
            ("r", "Refresh", Color::Green),
            ("c/Home", "Recenter", Color::Cyan),
        ],
        Screen::Lookup => vec![
            ("Enter", "Look up", Color::Green),
            ("Del", "Clear", Color::Yellow),
            ("Home", "Recenter", Color::Cyan),
        ],
    };
    shortcuts.extend([
        ("+/-", "Zoom", Color::Cyan),
        ("Arrows", "Pan", Color::Cyan),
        ("Tab", "Switch", Color::Blue),
    ]);
    shortcuts.push(match app.current_screen {
        Screen::Home => ("q", "Quit", Color::Magenta),
        Screen::Lookup => ("Esc", "Quit", Color::Magenta),
    });

    let mut spans = Vec::new();
    for (i, (key, desc, color)) in shortcuts.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(colors::MUTED)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(*color).bold(),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(ratatui::layout::Alignment::Center);

    frame.render_widget(footer, area);
}
