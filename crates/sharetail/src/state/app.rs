//! Application State

use crate::views::{BrowserView, View};
use sharetail_config::AppConfig;
use sharetail_theme::Theme;

use super::{BrowserState, FileViewState, StatusBarState};

/// Application state
pub struct AppState {
    pub running: bool,
    /// Stack of views - the last one is active and receives keys
    pub view_stack: Vec<Box<dyn View>>,
    pub browser: BrowserState,
    pub file_view: FileViewState,
    pub status_bar: StatusBarState,
    pub theme: Theme,
    pub app_config: AppConfig,
}

impl AppState {
    pub fn new(app_config: AppConfig) -> Self {
        Self {
            running: true,
            view_stack: vec![Box::new(BrowserView::new())],
            browser: BrowserState::default(),
            file_view: FileViewState::new(app_config.max_view_lines, app_config.follow),
            status_bar: StatusBarState::default(),
            theme: Theme::default(),
            app_config,
        }
    }

    /// The top-most (active) view, if any
    pub fn active_view(&self) -> Option<&dyn View> {
        self.view_stack.last().map(|v| v.as_ref())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("running", &self.running)
            .field("view_stack", &format!("{} views", self.view_stack.len()))
            .field("browser", &self.browser)
            .field("file_view", &self.file_view)
            .field("status_bar", &self.status_bar)
            .field("theme", &"<theme>")
            .field("app_config", &self.app_config)
            .finish()
    }
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            running: self.running,
            view_stack: self.view_stack.clone(),
            browser: self.browser.clone(),
            file_view: self.file_view.clone(),
            status_bar: self.status_bar.clone(),
            theme: self.theme.clone(),
            app_config: self.app_config.clone(),
        }
    }
}
