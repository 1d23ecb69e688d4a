//! Event handling for TUI
//!
//! 地图控制键在两个页面通用：
//! `+`/`=` 放大，`-` 缩小，方向键平移，`Home` 回到标记位置。
//! 查询页的字母键用于输入（IPv6 含 a-f），所以 `c`/`r`/`q` 只在本机页有效。

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action::Action;
use super::app::{App, Screen};

/// 处理按键，返回 true 表示退出
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            app.next_screen();
            return false;
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.zoom_in();
            return false;
        }
        KeyCode::Char('-') => {
            app.zoom_out();
            return false;
        }
        KeyCode::Home => {
            app.recenter();
            return false;
        }
        KeyCode::Left => {
            app.pan(-1.0, 0.0);
            return false;
        }
        KeyCode::Right => {
            app.pan(1.0, 0.0);
            return false;
        }
        KeyCode::Up => {
            app.pan(0.0, 1.0);
            return false;
        }
        KeyCode::Down => {
            app.pan(0.0, -1.0);
            return false;
        }
        _ => {}
    }

    match app.current_screen {
        Screen::Home => handle_home_screen(app, key.code),
        Screen::Lookup => handle_lookup_screen(app, key.code),
    }
}

fn handle_home_screen(app: &mut App, key_code: KeyCode) -> bool {
    match key_code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('r') => app.schedule(Action::FetchSelf),
        KeyCode::Char('c') => app.recenter(),
        _ => {}
    }
    false
}

fn handle_lookup_screen(app: &mut App, key_code: KeyCode) -> bool {
    match key_code {
        KeyCode::Esc => return true,
        KeyCode::Enter => app.submit_lookup(),
        KeyCode::Backspace => app.pop_input(),
        KeyCode::Delete => app.lookup_input.clear(),
        KeyCode::Char(c) => app.push_input(c),
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticConfig;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let mut app = App::new(&StaticConfig::default());
        app.take_pending();
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert!(handle_key_event(&mut app, key(KeyCode::Char('q'))));
        assert!(handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));

        app.switch_to(Screen::Lookup);
        // 查询页 q 不是十六进制字符，被丢弃而不是退出
        assert!(!handle_key_event(&mut app, key(KeyCode::Char('q'))));
        assert!(handle_key_event(&mut app, key(KeyCode::Esc)));
    }

    #[test]
    fn test_typing_and_submit() {
        let mut app = app();
        app.switch_to(Screen::Lookup);
        assert_eq!(app.take_pending(), Some(Action::FillOwnIp));

        for c in "8.8.8.c".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.lookup_input, "8.8.8.c");
        handle_key_event(&mut app, key(KeyCode::Backspace));
        handle_key_event(&mut app, key(KeyCode::Char('8')));
        assert_eq!(app.lookup_input, "8.8.8.8");

        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.take_pending(), Some(Action::FetchLookup));
    }

    #[test]
    fn test_refresh_on_home() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('r')));
        assert!(app.loading);
        assert_eq!(app.take_pending(), Some(Action::FetchSelf));
    }
}
