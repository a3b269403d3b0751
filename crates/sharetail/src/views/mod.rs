use crate::actions::{Action, NavigationAction, TextInputAction};
use crate::capabilities::ViewCapabilities;
use crate::state::AppState;
use ratatui::crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

pub mod browser_view;
pub mod file_view;
pub mod status_bar;

pub use browser_view::BrowserView;
pub use file_view::FileView;

/// View identifier - allows comparing which view is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewId {
    Browser,
    FileView,
}

/// View trait - the interface all views implement
///
/// Object-safe so views live on the stack as `Box<dyn View>`.
pub trait View: std::fmt::Debug + Send {
    fn view_id(&self) -> ViewId;

    fn render(&self, state: &AppState, area: Rect, f: &mut Frame);

    /// Capabilities used by the keyboard middleware for routing
    fn capabilities(&self, state: &AppState) -> ViewCapabilities;

    /// Clone this view into a Box
    fn clone_box(&self) -> Box<dyn View>;

    /// Translate generic navigation into this view's action
    fn translate_navigation(&self, _nav: NavigationAction) -> Option<Action> {
        None
    }

    /// Translate generic text input into this view's action
    fn translate_text_input(&self, _input: TextInputAction) -> Option<Action> {
        None
    }

    /// View-specific keybindings
    fn translate_key(&self, _key: KeyEvent, _state: &AppState) -> Option<Action> {
        None
    }

    /// What Esc does before it closes the view
    fn translate_escape(&self, _state: &AppState) -> Option<Action> {
        None
    }
}

impl Clone for Box<dyn View> {
    fn clone(&self) -> Box<dyn View> {
        self.clone_box()
    }
}

/// Render the active view
///
/// Every view is full-screen, so only the top of the stack is drawn.
pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    if let Some(view) = state.active_view() {
        view.render(state, area, f);
    }
}
