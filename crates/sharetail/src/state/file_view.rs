//! File View State

use chrono::{DateTime, Local};
use share_client::FileHandle;
use share_log_parser::search::find_matches;
use share_log_parser::{ContentKind, SearchQuery, StyledLine};

/// Loading state of the file content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// Search prompt and results
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Text being typed; `Some` while the prompt is open
    pub input: Option<String>,
    /// Last confirmed query
    pub query: Option<SearchQuery>,
    pub query_text: String,
    /// Indices of matching lines, ascending
    pub matches: Vec<usize>,
    /// Line index of the current match
    pub current: Option<usize>,
    /// Feedback for the last query (invalid pattern, no matches)
    pub message: Option<String>,
}

impl SearchState {
    pub fn is_editing(&self) -> bool {
        self.input.is_some()
    }
}

/// Live tail attached to the file view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailViewState {
    pub session_id: u64,
    pub paused: bool,
    pub observed_length: u64,
}

#[derive(Debug, Clone)]
pub struct FileViewState {
    pub handle: Option<FileHandle>,
    pub kind: Option<ContentKind>,
    pub lines: Vec<StyledLine>,
    /// Length of the file when it was loaded
    pub loaded_length: u64,
    pub loading: LoadingState,
    /// Index of the top visible line
    pub scroll: usize,
    /// Keep the newest line in view
    pub follow: bool,
    /// Follow setting applied whenever a tail starts
    pub follow_default: bool,
    /// Oldest lines are dropped beyond this
    pub max_lines: usize,
    pub search: SearchState,
    pub tail: Option<TailViewState>,
    pub last_updated: Option<DateTime<Local>>,
}

impl Default for FileViewState {
    fn default() -> Self {
        Self::new(10_000, true)
    }
}

impl FileViewState {
    pub fn new(max_lines: usize, follow_default: bool) -> Self {
        Self {
            handle: None,
            kind: None,
            lines: Vec::new(),
            loaded_length: 0,
            loading: LoadingState::Idle,
            scroll: 0,
            follow: false,
            follow_default,
            max_lines: max_lines.max(1),
            search: SearchState::default(),
            tail: None,
            last_updated: None,
        }
    }

    /// Reset for a new file, keeping configuration
    pub fn reset(&mut self, handle: FileHandle) {
        *self = Self {
            handle: Some(handle),
            loading: LoadingState::Loading,
            ..Self::new(self.max_lines, self.follow_default)
        };
    }

    pub fn is_tailing(&self) -> bool {
        self.tail.is_some()
    }

    /// Replace the content, e.g. after a (re)load
    pub fn set_lines(&mut self, lines: Vec<StyledLine>) {
        self.lines = lines;
        self.trim_to_capacity();
        self.scroll = self.scroll.min(self.lines.len().saturating_sub(1));
        self.recompute_matches();
    }

    /// Append lines at the bottom, dropping the oldest beyond capacity
    pub fn append_lines(&mut self, lines: Vec<StyledLine>) {
        self.lines.extend(lines);
        self.trim_to_capacity();
        self.recompute_matches();
    }

    fn trim_to_capacity(&mut self) {
        if self.lines.len() > self.max_lines {
            let excess = self.lines.len() - self.max_lines;
            self.lines.drain(..excess);
            self.scroll = self.scroll.saturating_sub(excess);
            // Keep pointing at the same line, or at nothing once it is gone
            self.search.current = self.search.current.and_then(|c| c.checked_sub(excess));
        }
    }

    /// Re-run the confirmed query over the current lines
    pub fn recompute_matches(&mut self) {
        let Some(query) = &self.search.query else {
            self.search.matches.clear();
            self.search.current = None;
            return;
        };

        let texts: Vec<String> = self.lines.iter().map(StyledLine::text).collect();
        self.search.matches = find_matches(&texts[..], query);
        if let Some(current) = self.search.current {
            if !self.search.matches.contains(&current) {
                self.search.current = None;
            }
        }
    }

    pub fn is_match(&self, line_idx: usize) -> bool {
        self.search.matches.binary_search(&line_idx).is_ok()
    }

    /// Manual scrolling stops following new lines
    pub fn scroll_to(&mut self, line: usize) {
        self.scroll = line.min(self.max_scroll());
        self.follow = false;
    }

    pub fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(texts: &[&str]) -> Vec<StyledLine> {
        texts.iter().map(|t| StyledLine::plain(*t)).collect()
    }

    #[test]
    fn test_append_trims_oldest_lines() {
        let mut state = FileViewState::new(3, true);
        state.set_lines(lines(&["a", "b"]));
        state.scroll = 1;

        state.append_lines(lines(&["c", "d"]));
        let texts: Vec<_> = state.lines.iter().map(StyledLine::text).collect();
        assert_eq!(texts, vec!["b", "c", "d"]);
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn test_matches_follow_appended_lines() {
        let mut state = FileViewState::default();
        state.set_lines(lines(&["ERROR one", "fine"]));
        state.search.query = Some(SearchQuery::parse("error").unwrap());
        state.recompute_matches();
        assert_eq!(state.search.matches, vec![0]);

        state.append_lines(lines(&["error two"]));
        assert_eq!(state.search.matches, vec![0, 2]);
        assert!(state.is_match(2));
        assert!(!state.is_match(1));
    }

    #[test]
    fn test_current_match_follows_trimmed_lines() {
        let mut state = FileViewState::new(3, true);
        state.set_lines(lines(&["error a", "x", "error b"]));
        state.search.query = Some(SearchQuery::parse("error").unwrap());
        state.recompute_matches();
        state.search.current = Some(2);

        state.append_lines(lines(&["error c"]));
        assert_eq!(state.search.matches, vec![1, 2]);
        assert_eq!(state.search.current, Some(1));
        assert_eq!(state.lines[1].text(), "error b");

        state.search.current = Some(0);
        state.append_lines(lines(&["y"]));
        assert_eq!(state.search.current, None);
    }

    #[test]
    fn test_reset_keeps_configuration() {
        let mut state = FileViewState::new(50, false);
        state.set_lines(lines(&["x"]));
        state.reset(FileHandle::new("logs", "a.log"));
        assert!(state.lines.is_empty());
        assert_eq!(state.max_lines, 50);
        assert!(!state.follow_default);
        assert_eq!(state.loading, LoadingState::Loading);
    }
}
