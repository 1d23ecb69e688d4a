//! App state definition and basic state management

mod navigation;
mod operations;

use chrono::{DateTime, Local};
use strum::{AsRefStr, EnumIter};

use super::action::Action;
use crate::client::LookupClient;
use crate::config::StaticConfig;
use crate::map::MapView;
use crate::services::{GeoRecord, IpInfoProvider};

/// 当前页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr)]
pub enum Screen {
    #[strum(serialize = "My Location")]
    Home,
    #[strum(serialize = "Lookup IP")]
    Lookup,
}

/// 一个页面显示的记录和它的地图
///
/// 两个页面各自持有一份，互不影响
#[derive(Debug, Default)]
pub struct Located {
    pub record: Option<GeoRecord>,
    pub map: Option<MapView>,
    pub fetched_at: Option<DateTime<Local>>,
}

impl Located {
    /// 替换记录；没有坐标时地图消失
    pub fn replace(&mut self, record: GeoRecord, default_zoom: u8) {
        self.map = MapView::with_default_zoom(&record, default_zoom);
        self.record = Some(record);
        self.fetched_at = Some(Local::now());
    }
}

pub struct App {
    pub current_screen: Screen,

    pub home: Located,
    pub lookup: Located,
    pub lookup_input: String,

    // UI state
    pub loading: bool,
    pub status_message: String,
    pub error_message: String,

    // Map settings
    pub default_zoom: u8,
    pub tile_url: String,

    /// 查询框只自动填充一次
    own_ip_requested: bool,
    pending: Option<Action>,

    upstream: IpInfoProvider,
    client: LookupClient,
}

impl App {
    /// 创建 App，启动后第一轮循环会查询本机位置
    pub fn new(config: &StaticConfig) -> Self {
        Self {
            current_screen: Screen::Home,
            home: Located::default(),
            lookup: Located::default(),
            lookup_input: String::new(),
            loading: false,
            status_message: String::new(),
            error_message: String::new(),
            default_zoom: config.map.default_zoom,
            tile_url: config.map.tile_url.clone(),
            own_ip_requested: false,
            pending: Some(Action::FetchSelf),
            upstream: IpInfoProvider::new(&config.upstream),
            client: LookupClient::new(&config.client),
        }
    }

    /// 排队一个需要等待的操作，并立即进入 loading 状态
    ///
    /// 已有排队操作时后来者覆盖
    pub fn schedule(&mut self, action: Action) {
        self.loading = true;
        self.pending = Some(action);
    }

    /// 取出排队的操作
    pub fn take_pending(&mut self) -> Option<Action> {
        let action = self.pending.take();
        if action.is_some() {
            self.loading = true;
        }
        action
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
        self.error_message.clear();
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = msg.into();
        self.status_message.clear();
    }

    /// 当前页面显示的内容
    pub fn current(&self) -> &Located {
        match self.current_screen {
            Screen::Home => &self.home,
            Screen::Lookup => &self.lookup,
        }
    }

    /// 当前页面的地图（可修改）
    pub fn current_map_mut(&mut self) -> Option<&mut MapView> {
        match self.current_screen {
            Screen::Home => self.home.map.as_mut(),
            Screen::Lookup => self.lookup.map.as_mut(),
        }
    }
}
