use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::interfaces::tui::app::Located;
use crate::interfaces::tui::constants::colors;
use crate::services::geoip::UNKNOWN;

fn field_line(label: &str, value: Option<&str>) -> Line<'static> {
    let value_span = match value {
        Some(v) => Span::styled(v.to_string(), Style::default().fg(Color::White)),
        None => Span::styled(UNKNOWN, Style::default().fg(colors::MUTED)),
    };
    Line::from(vec![
        Span::styled(
            format!("{:<10}", label),
            Style::default().fg(colors::PRIMARY).bold(),
        ),
        value_span,
    ])
}

/// 记录详情面板
pub fn draw_info_panel(frame: &mut Frame, title: &str, located: &Located, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(colors::PRIMARY));

    let Some(ref record) = located.record else {
        let empty = Paragraph::new("No location yet")
            .style(Style::default().fg(colors::MUTED))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let coordinates = record.coordinates.map(|c| c.to_string());
    let accuracy = record.area.map(|km| format!("{} km", km));

    let mut lines = vec![
        field_line("IP", Some(record.ip.as_str())),
        field_line("City", record.city.as_deref()),
        field_line("Region", record.region.as_deref()),
        field_line("Country", record.country.as_deref()),
        field_line("Timezone", record.timezone.as_deref()),
        field_line("Location", coordinates.as_deref()),
    ];

    // 只有部分数据源提供的字段
    for (label, value) in [
        ("Org", record.organization.as_deref()),
        ("Hostname", record.hostname.as_deref()),
        ("Postal", record.postal.as_deref()),
        ("Range", record.range.as_deref()),
        ("Accuracy", accuracy.as_deref()),
    ] {
        if value.is_some() {
            lines.push(field_line(label, value));
        }
    }

    if let Some(fetched_at) = located.fetched_at {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Updated {}", fetched_at.format("%H:%M:%S")),
            Style::default().fg(colors::MUTED),
        )));
    }

    let panel = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}
