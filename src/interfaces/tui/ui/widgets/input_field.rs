//! 单行输入框组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::interfaces::tui::constants::{MAX_IP_INPUT_LENGTH, colors};

/// 输入框组件
///
/// ```rust,ignore
/// InputField::new("IP Address", &app.lookup_input)
///     .active(true)
///     .placeholder("Enter to look up")
///     .render(frame, area);
/// ```
pub struct InputField<'a> {
    title: &'a str,
    value: &'a str,
    is_active: bool,
    placeholder: Option<&'a str>,
}

impl<'a> InputField<'a> {
    pub fn new(title: &'a str, value: &'a str) -> Self {
        Self {
            title,
            value,
            is_active: false,
            placeholder: None,
        }
    }

    /// 设置激活状态（显示光标和高亮边框）
    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// 输入为空时显示在标题里的提示
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    fn display_title(&self) -> String {
        match self.placeholder {
            Some(placeholder) if self.value.is_empty() => {
                format!(" {} ({}) ", self.title, placeholder)
            }
            _ => format!(
                " {} ({}/{}) ",
                self.title,
                self.value.len(),
                MAX_IP_INPUT_LENGTH
            ),
        }
    }

    fn border_style(&self) -> Style {
        if self.is_active {
            Style::default().fg(colors::WARNING).bold()
        } else {
            Style::default().fg(colors::MUTED)
        }
    }

    fn content(&self) -> Line<'a> {
        let mut spans = vec![Span::styled(self.value, Style::default().fg(Color::White))];
        if self.is_active {
            spans.push(Span::styled("█", Style::default().fg(colors::HIGHLIGHT_BG)));
        }
        Line::from(spans)
    }

    /// 渲染输入框，`area` 高度应为 3
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let input = Paragraph::new(self.content()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(self.display_title())
                .border_style(self.border_style()),
        );
        frame.render_widget(input, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_shows_placeholder_only_when_empty() {
        let field = InputField::new("IP Address", "").placeholder("Enter to look up");
        assert_eq!(field.display_title(), " IP Address (Enter to look up) ");

        let field = InputField::new("IP Address", "8.8.8.8").placeholder("Enter to look up");
        assert_eq!(field.display_title(), " IP Address (7/45) ");
    }

    #[test]
    fn test_cursor_only_when_active() {
        let field = InputField::new("IP", "1.1.1.1");
        assert_eq!(field.content().spans.len(), 1);

        let field = field.active(true);
        assert_eq!(field.content().spans.len(), 2);
    }
}
