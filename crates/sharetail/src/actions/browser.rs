//! Browser Actions
//!
//! Share listing, directory navigation and rotation group handling.

use share_client::{Entry, Share};

#[derive(Debug, Clone)]
pub enum BrowserAction {
    /// Load the list of shares
    LoadShares,
    /// Shares loaded (dispatched by share middleware)
    SharesLoaded(Vec<Share>),
    /// Load one directory level of a share
    LoadEntries {
        share: String,
        path: String,
        /// Skip cached listings
        refresh: bool,
    },
    /// Directory listing loaded (dispatched by share middleware)
    EntriesLoaded {
        share: String,
        path: String,
        entries: Vec<Entry>,
    },
    /// Listing failed
    LoadError(String),
    /// Move the cursor down
    NavigateNext,
    /// Move the cursor up
    NavigatePrevious,
    NavigateToTop,
    NavigateToBottom,
    /// Activate the row under the cursor (Enter)
    Open,
    /// Go to the parent directory, or back to the share list (Backspace)
    Up,
    /// Reload the current location bypassing the cache (r)
    Refresh,
    /// Tail the file or newest group member under the cursor (t)
    TailSelected,
    /// Expand or collapse a rotation group
    ToggleGroup(String),
}
