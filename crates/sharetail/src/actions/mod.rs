//! Actions module
//!
//! Actions are organized by:
//! - Generic actions (Navigation, TextInput) that views translate to screen-specific actions
//! - Global actions that affect the entire application
//! - Screen-specific actions that are already targeted to a particular screen

// Shared action types
pub mod global;
pub mod navigation;
pub mod text_input;

// Screen-specific action types
pub mod browser;
pub mod file_view;
pub mod status_bar;
pub mod tail;

pub use browser::BrowserAction;
pub use file_view::{FileViewAction, SearchAction};
pub use global::GlobalAction;
pub use navigation::NavigationAction;
pub use status_bar::StatusBarAction;
pub use tail::TailAction;
pub use text_input::TextInputAction;

/// Root action enum - tagged by screen/domain
#[derive(Debug, Clone)]
pub enum Action {
    // Generic actions (need translation by active view)
    /// Generic navigation action - will be translated by active view
    Navigate(NavigationAction),
    /// Generic text input action - will be translated by active view
    TextInput(TextInputAction),

    // Global actions (no translation needed)
    Global(GlobalAction),

    // Screen-specific actions (already targeted)
    /// Share and directory browser
    Browser(BrowserAction),
    /// File content panel, including search
    FileView(FileViewAction),
    /// Live tail of the open file
    Tail(TailAction),
    /// Status bar messages
    StatusBar(StatusBarAction),
}

impl Action {
    /// Whether this action fires often enough to flood the log
    pub fn is_high_frequency(&self) -> bool {
        matches!(self, Action::Tail(TailAction::Event { .. }))
    }
}
