//! Navigation actions - shared across screens
//!
//! Generic navigation that views translate into their screen-specific actions.

/// Generic navigation actions (vim-style)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Next item (j, down arrow)
    Next,
    /// Previous item (k, up arrow)
    Previous,
    /// One page down (PageDown, Ctrl+d)
    PageDown,
    /// One page up (PageUp, Ctrl+u)
    PageUp,
    /// Top (g, Home)
    ToTop,
    /// Bottom (G, End)
    ToBottom,
}
