//! File View Actions
//!
//! Loading, scrolling and searching the content of one file.

use share_client::FileHandle;
use share_log_parser::ClassifiedContent;

#[derive(Debug, Clone)]
pub enum FileViewAction {
    /// Open a file; `tail` starts a live tail once the content is loaded
    Open { handle: FileHandle, tail: bool },
    /// Whole file loaded (dispatched by share middleware)
    Loaded {
        handle: FileHandle,
        content: ClassifiedContent,
        length: u64,
        tail: bool,
    },
    /// Loading failed
    LoadError { handle: FileHandle, error: String },
    /// Reload the whole file bypassing the cache (r)
    Refresh,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    ScrollToTop,
    /// Jump to the last line and follow new lines
    ScrollToBottom,
    Search(SearchAction),
}

/// Match-and-jump search in the file view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Open the search prompt (/)
    Start,
    Char(char),
    Backspace,
    ClearLine,
    /// Compile the query and jump to the first match (Enter)
    Confirm,
    /// Close the prompt without searching (Esc)
    Cancel,
    /// Jump to the next match (n)
    Next,
    /// Jump to the previous match (N)
    Previous,
}
