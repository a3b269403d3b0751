//! Reducers - pure functions producing new state from current state + action

pub mod app_reducer;
pub mod browser_reducer;
pub mod file_view_reducer;
pub mod status_bar_reducer;
