//! 页面切换和地图控制

use strum::IntoEnumIterator;

use super::{App, Screen};
use crate::interfaces::tui::action::Action;
use crate::interfaces::tui::constants::{MAX_IP_INPUT_LENGTH, PAN_STEP};

impl App {
    /// 切换到下一个页面
    pub fn next_screen(&mut self) {
        let screens: Vec<Screen> = Screen::iter().collect();
        let idx = screens
            .iter()
            .position(|s| *s == self.current_screen)
            .unwrap_or(0);
        self.switch_to(screens[(idx + 1) % screens.len()]);
    }

    /// 切换页面；第一次进入查询页时用本机 IP 填充输入框
    pub fn switch_to(&mut self, screen: Screen) {
        self.current_screen = screen;

        if screen == Screen::Lookup && !self.own_ip_requested {
            self.own_ip_requested = true;
            if self.lookup_input.is_empty() {
                self.schedule(Action::FillOwnIp);
            }
        }
    }

    pub fn zoom_in(&mut self) {
        if let Some(map) = self.current_map_mut() {
            map.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if let Some(map) = self.current_map_mut() {
            map.zoom_out();
        }
    }

    pub fn recenter(&mut self) {
        if let Some(map) = self.current_map_mut() {
            map.recenter();
        }
    }

    /// 按方向平移，`dx` 向东为正，`dy` 向北为正
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if let Some(map) = self.current_map_mut() {
            map.pan(dx * PAN_STEP, dy * PAN_STEP);
        }
    }

    /// 查询框输入，只接受 IP 地址里会出现的字符
    pub fn push_input(&mut self, c: char) {
        let allowed = c.is_ascii_hexdigit() || c == '.' || c == ':';
        if allowed && self.lookup_input.len() < MAX_IP_INPUT_LENGTH {
            self.lookup_input.push(c);
        }
    }

    pub fn pop_input(&mut self) {
        self.lookup_input.pop();
    }

    /// 提交查询，输入为空时什么都不做
    pub fn submit_lookup(&mut self) {
        if self.lookup_input.trim().is_empty() {
            return;
        }
        self.schedule(Action::FetchLookup);
    }
}
