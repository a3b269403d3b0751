//! File View Reducer
//!
//! Content, scrolling, search and the tail attached to the file view.

use crate::actions::{Action, FileViewAction, SearchAction, TailAction};
use crate::state::{FileViewState, LoadingState, TailViewState};
use chrono::Local;
use share_log_parser::search::{next_match, previous_match};
use share_log_parser::{render_content, SearchQuery};

/// Lines moved by PageUp/PageDown
const PAGE_SIZE: usize = 20;

pub fn reduce(mut state: FileViewState, action: &Action) -> FileViewState {
    match action {
        Action::FileView(action) => reduce_file_view(&mut state, action),
        Action::Tail(action) => reduce_tail(&mut state, action),
        _ => {}
    }
    state
}

fn reduce_file_view(state: &mut FileViewState, action: &FileViewAction) {
    match action {
        FileViewAction::Open { handle, .. } => {
            state.reset(handle.clone());
        }

        FileViewAction::Loaded {
            handle,
            content,
            length,
            ..
        } => {
            if state.handle.as_ref() != Some(handle) {
                log::debug!("Ignoring content of {} (no longer open)", handle);
                return;
            }
            state.kind = Some(content.kind);
            state.set_lines(render_content(content));
            state.loaded_length = *length;
            state.loading = LoadingState::Loaded;
            state.last_updated = Some(Local::now());
        }

        FileViewAction::LoadError { handle, error } => {
            if state.handle.as_ref() == Some(handle) {
                state.loading = LoadingState::Error(error.clone());
            }
        }

        FileViewAction::Refresh => {}

        FileViewAction::ScrollDown => state.scroll_to(state.scroll + 1),
        FileViewAction::ScrollUp => state.scroll_to(state.scroll.saturating_sub(1)),
        FileViewAction::PageDown => state.scroll_to(state.scroll + PAGE_SIZE),
        FileViewAction::PageUp => state.scroll_to(state.scroll.saturating_sub(PAGE_SIZE)),
        FileViewAction::ScrollToTop => state.scroll_to(0),
        FileViewAction::ScrollToBottom => {
            state.scroll = state.max_scroll();
            state.follow = true;
        }

        FileViewAction::Search(action) => reduce_search(state, action),
    }
}

fn reduce_search(state: &mut FileViewState, action: &SearchAction) {
    match action {
        SearchAction::Start => {
            state.search.input = Some(String::new());
            state.search.message = None;
        }
        SearchAction::Char(c) => {
            if let Some(input) = state.search.input.as_mut() {
                input.push(*c);
            }
        }
        SearchAction::Backspace => {
            if let Some(input) = state.search.input.as_mut() {
                input.pop();
            }
        }
        SearchAction::ClearLine => {
            if let Some(input) = state.search.input.as_mut() {
                input.clear();
            }
        }
        SearchAction::Cancel => {
            state.search.input = None;
        }
        SearchAction::Confirm => {
            let Some(input) = state.search.input.take() else {
                return;
            };
            match SearchQuery::parse(&input) {
                Ok(query) => {
                    state.search.query = Some(query);
                    state.search.query_text = input;
                    state.search.current = None;
                    state.recompute_matches();

                    // First match at or below the top visible line
                    let first = state
                        .search
                        .matches
                        .iter()
                        .copied()
                        .find(|&idx| idx >= state.scroll)
                        .or_else(|| state.search.matches.first().copied());
                    match first {
                        Some(idx) => jump_to_match(state, idx),
                        None => {
                            state.search.message =
                                Some(format!("No matches for '{}'", state.search.query_text));
                        }
                    }
                }
                Err(e) => {
                    state.search.message = Some(e.to_string());
                }
            }
        }
        SearchAction::Next | SearchAction::Previous => {
            let from = state.search.current.unwrap_or(state.scroll);
            let target = if *action == SearchAction::Next {
                next_match(&state.search.matches, from)
            } else {
                previous_match(&state.search.matches, from)
            };
            match target {
                Some(idx) => jump_to_match(state, idx),
                None if state.search.query.is_some() => {
                    state.search.message =
                        Some(format!("No matches for '{}'", state.search.query_text));
                }
                None => {}
            }
        }
    }
}

fn jump_to_match(state: &mut FileViewState, idx: usize) {
    state.search.current = Some(idx);
    state.search.message = None;
    state.scroll = idx;
    state.follow = false;
}

fn reduce_tail(state: &mut FileViewState, action: &TailAction) {
    match action {
        TailAction::Started {
            session_id,
            handle,
            seed_length,
        } => {
            if state.handle.as_ref() != Some(handle) {
                return;
            }
            state.tail = Some(TailViewState {
                session_id: *session_id,
                paused: false,
                observed_length: *seed_length,
            });
            state.follow = state.follow_default;
            if state.follow {
                state.scroll = state.max_scroll();
            }
        }

        TailAction::PauseChanged { session_id, paused } => {
            if let Some(tail) = state.tail.as_mut().filter(|t| t.session_id == *session_id) {
                tail.paused = *paused;
            }
        }

        TailAction::Stopped { session_id } => {
            if state.tail.as_ref().map(|t| t.session_id) == Some(*session_id) {
                state.tail = None;
            }
        }

        TailAction::Event { session_id, event } => {
            // Events still queued from a stopped session are dropped
            let Some(tail) = state.tail.as_mut().filter(|t| t.session_id == *session_id) else {
                return;
            };
            tail.observed_length = event.observed_length;
            // Failed polls and resyncs brought nothing new
            if !event.is_status() {
                state.last_updated = Some(event.updated_at);
            }
            state.append_lines(event.lines.clone());
            if state.follow {
                state.scroll = state.max_scroll();
            }
        }

        TailAction::Start | TailAction::TogglePause | TailAction::Stop => {}
    }
}
