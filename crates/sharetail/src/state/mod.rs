//! Application State Module
//!
//! Contains all state types used by the application, organized by feature.

mod app;
mod browser;
mod file_view;
mod status_bar;

pub use app::AppState;
pub use browser::{BrowserRow, BrowserState, Location};
pub use file_view::{FileViewState, LoadingState, TailViewState};
pub use status_bar::{StatusBarState, StatusKind, StatusMessage, StatusSource};
