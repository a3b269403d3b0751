//! File view
//!
//! Shows the classified content of one file, with search and an optional
//! live tail feeding new lines at the bottom.

use crate::actions::{
    Action, FileViewAction, NavigationAction, SearchAction, TailAction, TextInputAction,
};
use crate::capabilities::ViewCapabilities;
use crate::state::{AppState, FileViewState, LoadingState};
use crate::views::browser_view::format_size;
use crate::views::status_bar::{StatusBarViewModel, StatusBarWidget};
use crate::views::{View, ViewId};
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};
use share_log_parser::ContentKind;
use sharetail_theme::Theme;

#[derive(Debug, Clone)]
pub struct FileView;

impl FileView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for FileView {
    fn view_id(&self) -> ViewId {
        ViewId::FileView
    }

    fn render(&self, state: &AppState, area: Rect, f: &mut Frame) {
        render(state, area, f);
    }

    fn capabilities(&self, state: &AppState) -> ViewCapabilities {
        if state.file_view.search.is_editing() {
            ViewCapabilities::TEXT_INPUT
        } else {
            ViewCapabilities::VIM_NAVIGATION_BINDINGS | ViewCapabilities::SCROLL_VERTICAL
        }
    }

    fn clone_box(&self) -> Box<dyn View> {
        Box::new(self.clone())
    }

    fn translate_navigation(&self, nav: NavigationAction) -> Option<Action> {
        let action = match nav {
            NavigationAction::Next => FileViewAction::ScrollDown,
            NavigationAction::Previous => FileViewAction::ScrollUp,
            NavigationAction::PageDown => FileViewAction::PageDown,
            NavigationAction::PageUp => FileViewAction::PageUp,
            NavigationAction::ToTop => FileViewAction::ScrollToTop,
            NavigationAction::ToBottom => FileViewAction::ScrollToBottom,
        };
        Some(Action::FileView(action))
    }

    fn translate_text_input(&self, input: TextInputAction) -> Option<Action> {
        let action = match input {
            TextInputAction::Char(c) => SearchAction::Char(c),
            TextInputAction::Backspace => SearchAction::Backspace,
            TextInputAction::ClearLine => SearchAction::ClearLine,
            TextInputAction::Escape => SearchAction::Cancel,
            TextInputAction::Confirm => SearchAction::Confirm,
        };
        Some(Action::FileView(FileViewAction::Search(action)))
    }

    fn translate_key(&self, key: KeyEvent, state: &AppState) -> Option<Action> {
        let action = match key.code {
            KeyCode::Char('/') => Action::FileView(FileViewAction::Search(SearchAction::Start)),
            KeyCode::Char('n') => Action::FileView(FileViewAction::Search(SearchAction::Next)),
            KeyCode::Char('N') => Action::FileView(FileViewAction::Search(SearchAction::Previous)),
            KeyCode::Char('r') => Action::FileView(FileViewAction::Refresh),
            KeyCode::Char('t') if !state.file_view.is_tailing() => Action::Tail(TailAction::Start),
            KeyCode::Char('t') => Action::Tail(TailAction::Stop),
            KeyCode::Char('p') | KeyCode::Char(' ') if state.file_view.is_tailing() => {
                Action::Tail(TailAction::TogglePause)
            }
            _ => return None,
        };
        Some(action)
    }

    fn translate_escape(&self, state: &AppState) -> Option<Action> {
        // First Esc stops a running tail, the next one closes the view
        state
            .file_view
            .is_tailing()
            .then_some(Action::Tail(TailAction::Stop))
    }
}

fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Search prompt or key hints
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_content(state, chunks[0], f);
    render_footer(&state.file_view, &state.theme, chunks[1], f);

    let status_vm = StatusBarViewModel::from_state(state);
    f.render_widget(StatusBarWidget(&status_vm), chunks[2]);
}

fn render_content(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let view = &state.file_view;

    let title = view
        .handle
        .as_ref()
        .map(|h| format!(" {} ", h))
        .unwrap_or_default();

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme.panel_border())
        .title(Span::styled(title, theme.panel_title()))
        .title(header_line(view, theme).right_aligned());

    let inner_height = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = match &view.loading {
        LoadingState::Idle => Vec::new(),
        LoadingState::Loading => vec![Line::from(Span::styled("Loading…", theme.muted()))],
        LoadingState::Error(error) => vec![Line::from(Span::styled(error.clone(), theme.error()))],
        LoadingState::Loaded => {
            let top = visible_top(view, inner_height);
            view.lines
                .iter()
                .enumerate()
                .skip(top)
                .take(inner_height)
                .map(|(idx, line)| {
                    let rendered = theme.render_line(line);
                    if view.search.current == Some(idx) {
                        rendered.patch_style(theme.selected())
                    } else if view.is_match(idx) {
                        rendered.patch_style(theme.search_match())
                    } else {
                        rendered
                    }
                })
                .collect()
        }
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Index of the first line drawn
///
/// While following, the newest line sits at the bottom of the panel.
fn visible_top(view: &FileViewState, height: usize) -> usize {
    if view.follow {
        view.lines.len().saturating_sub(height)
    } else {
        view.scroll.min(view.max_scroll())
    }
}

/// Right side of the panel title: tail state, content kind, last update
fn header_line(view: &FileViewState, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();

    if let Some(tail) = &view.tail {
        if tail.paused {
            spans.push(Span::styled(" ⏸ paused ", theme.warning()));
        } else {
            spans.push(Span::styled(" ● tailing ", theme.success()));
        }
        spans.push(Span::styled(
            format!(" {} ", format_size(tail.observed_length)),
            theme.muted(),
        ));
    }

    if let Some(kind) = view.kind {
        let label = match kind {
            ContentKind::Structured => "structured",
            ContentKind::LogLike => "log",
            ContentKind::Plain => "plain",
        };
        spans.push(Span::styled(format!(" {} ", label), theme.muted()));
    }

    if let Some(updated) = view.last_updated {
        spans.push(Span::styled(
            format!(" updated {} ", updated.format("%H:%M:%S")),
            theme.muted(),
        ));
    }

    Line::from(spans)
}

fn render_footer(view: &FileViewState, theme: &Theme, area: Rect, f: &mut Frame) {
    let line = if let Some(input) = &view.search.input {
        Line::from(vec![
            Span::styled("/", theme.key_hint()),
            Span::styled(input.clone(), theme.text()),
            Span::styled("█", theme.muted()),
        ])
    } else if let Some(message) = &view.search.message {
        Line::from(Span::styled(format!(" {}", message), theme.warning()))
    } else {
        let tail_hint = if view.is_tailing() {
            ("p", "pause")
        } else {
            ("t", "tail")
        };
        let mut spans = vec![Span::raw(" ")];
        let mut hints = vec![("/", "search"), ("n/N", "next/prev"), tail_hint];
        if view.is_tailing() {
            hints.push(("t", "stop"));
        }
        hints.extend([("r", "reload"), ("Esc", "back")]);
        for (key, description) in hints {
            spans.push(Span::styled(key, theme.key_hint()));
            spans.push(Span::styled(
                format!(" {}  ", description),
                theme.key_description(),
            ));
        }
        if !view.search.matches.is_empty() {
            spans.push(Span::styled(
                format!("{} matches", view.search.matches.len()),
                theme.muted(),
            ));
        }
        Line::from(spans)
    };

    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TailViewState;
    use ratatui::crossterm::event::KeyModifiers;
    use share_log_parser::StyledLine;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn tailing(state: &mut AppState) {
        state.file_view.tail = Some(TailViewState {
            session_id: 1,
            paused: false,
            observed_length: 0,
        });
    }

    #[test]
    fn test_text_input_while_searching() {
        let view = FileView::new();
        let mut state = AppState::default();
        assert!(!view.capabilities(&state).accepts_text_input());

        state.file_view.search.input = Some(String::new());
        assert!(view.capabilities(&state).accepts_text_input());
        assert!(matches!(
            view.translate_text_input(TextInputAction::Escape),
            Some(Action::FileView(FileViewAction::Search(SearchAction::Cancel)))
        ));
    }

    #[test]
    fn test_tail_keys_depend_on_tail_state() {
        let view = FileView::new();
        let mut state = AppState::default();
        assert!(matches!(
            view.translate_key(key('t'), &state),
            Some(Action::Tail(TailAction::Start))
        ));
        assert!(view.translate_key(key('p'), &state).is_none());
        assert!(view.translate_escape(&state).is_none());

        tailing(&mut state);
        assert!(matches!(
            view.translate_key(key('p'), &state),
            Some(Action::Tail(TailAction::TogglePause))
        ));
        assert!(matches!(
            view.translate_escape(&state),
            Some(Action::Tail(TailAction::Stop))
        ));
    }

    #[test]
    fn test_following_shows_the_newest_lines() {
        let mut view = FileViewState::default();
        view.set_lines((0..50).map(|i| StyledLine::plain(i.to_string())).collect());
        view.follow = true;
        assert_eq!(visible_top(&view, 10), 40);

        view.follow = false;
        view.scroll = 5;
        assert_eq!(visible_top(&view, 10), 5);
    }
}
