//! Browser view
//!
//! Lists shares, then one directory level at a time with rotated logs
//! folded into groups.

use crate::actions::{Action, BrowserAction, NavigationAction};
use crate::capabilities::ViewCapabilities;
use crate::state::{AppState, BrowserRow};
use crate::views::status_bar::{StatusBarViewModel, StatusBarWidget};
use crate::views::{View, ViewId};
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, ListState, Paragraph},
    Frame,
};
use sharetail_theme::Theme;

#[derive(Debug, Clone)]
pub struct BrowserView;

impl BrowserView {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BrowserView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for BrowserView {
    fn view_id(&self) -> ViewId {
        ViewId::Browser
    }

    fn render(&self, state: &AppState, area: Rect, f: &mut Frame) {
        render(state, area, f);
    }

    fn capabilities(&self, _state: &AppState) -> ViewCapabilities {
        ViewCapabilities::VIM_NAVIGATION_BINDINGS | ViewCapabilities::ITEM_NAVIGATION
    }

    fn clone_box(&self) -> Box<dyn View> {
        Box::new(self.clone())
    }

    fn translate_navigation(&self, nav: NavigationAction) -> Option<Action> {
        let action = match nav {
            NavigationAction::Next => BrowserAction::NavigateNext,
            NavigationAction::Previous => BrowserAction::NavigatePrevious,
            NavigationAction::ToTop => BrowserAction::NavigateToTop,
            NavigationAction::ToBottom => BrowserAction::NavigateToBottom,
            NavigationAction::PageDown | NavigationAction::PageUp => return None,
        };
        Some(Action::Browser(action))
    }

    fn translate_key(&self, key: KeyEvent, _state: &AppState) -> Option<Action> {
        let action = match key.code {
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => BrowserAction::Open,
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => BrowserAction::Up,
            KeyCode::Char('r') => BrowserAction::Refresh,
            KeyCode::Char('t') => BrowserAction::TailSelected,
            _ => return None,
        };
        Some(Action::Browser(action))
    }

    fn translate_escape(&self, state: &AppState) -> Option<Action> {
        // Esc walks back up before the browser closes the app
        state
            .browser
            .current_share()
            .map(|_| Action::Browser(BrowserAction::Up))
    }
}

fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Listing
            Constraint::Length(1), // Key hints
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_listing(state, chunks[0], f);
    render_hints(&state.theme, chunks[1], f);

    let status_vm = StatusBarViewModel::from_state(state);
    f.render_widget(StatusBarWidget(&status_vm), chunks[2]);
}

fn render_listing(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let browser = &state.browser;

    let mut title = format!(" {} ", browser.title());
    if browser.loading {
        title.push_str("(loading…) ");
    }

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme.panel_border())
        .title(Span::styled(title, theme.panel_title()));

    if let Some(error) = &browser.error {
        let paragraph = Paragraph::new(Line::from(Span::styled(error.clone(), theme.error())))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    if browser.rows.is_empty() && !browser.loading {
        let paragraph =
            Paragraph::new(Line::from(Span::styled("(empty)", theme.muted()))).block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = browser
        .rows
        .iter()
        .map(|row| ListItem::new(row_line(row, theme)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected())
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(browser.cursor));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn row_line(row: &BrowserRow, theme: &Theme) -> Line<'static> {
    match row {
        BrowserRow::Share(share) => Line::from(vec![
            Span::styled(format!("{}/", share.name), theme.folder()),
            Span::styled(
                share
                    .quota_bytes
                    .map(|q| format!("  quota {}", format_size(q)))
                    .unwrap_or_default(),
                theme.muted(),
            ),
        ]),
        BrowserRow::Directory(entry) => {
            Line::from(Span::styled(format!("{}/", entry.name), theme.folder()))
        }
        BrowserRow::Group {
            key,
            member_count,
            expanded,
        } => {
            let marker = if *expanded { "▾" } else { "▸" };
            Line::from(vec![
                Span::styled(format!("{} {}", marker, key), theme.folder()),
                Span::styled(format!("  ({} files)", member_count), theme.muted()),
            ])
        }
        BrowserRow::Member { entry, newest, .. } => {
            let mut spans = vec![Span::raw("    "), Span::styled(entry.name.clone(), theme.text())];
            spans.extend(entry_metadata(entry, theme));
            if *newest {
                spans.push(Span::styled("  newest", theme.success()));
            }
            Line::from(spans)
        }
        BrowserRow::File(entry) => {
            let mut spans = vec![Span::styled(entry.name.clone(), theme.text())];
            spans.extend(entry_metadata(entry, theme));
            Line::from(spans)
        }
    }
}

fn entry_metadata(entry: &share_client::Entry, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if let Some(size) = entry.size {
        spans.push(Span::styled(format!("  {}", format_size(size)), theme.muted()));
    }
    if let Some(modified) = entry.last_modified {
        spans.push(Span::styled(
            format!("  {}", modified.format("%Y-%m-%d %H:%M")),
            theme.muted(),
        ));
    }
    spans
}

fn render_hints(theme: &Theme, area: Rect, f: &mut Frame) {
    let hints = [
        ("Enter", "open"),
        ("Bksp", "up"),
        ("t", "tail newest"),
        ("r", "refresh"),
        ("q", "quit"),
    ];
    let mut spans = vec![Span::raw(" ")];
    for (key, description) in hints {
        spans.push(Span::styled(key, theme.key_hint()));
        spans.push(Span::styled(format!(" {}  ", description), theme.key_description()));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default()),
        area,
    );
}

/// Human readable byte count
pub(crate) fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Location;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MiB");
    }

    #[test]
    fn test_escape_goes_up_inside_a_share() {
        let view = BrowserView::new();
        let mut state = AppState::default();
        assert!(view.translate_escape(&state).is_none());

        state.browser.location = Location::Directory {
            share: "logs".into(),
            path: String::new(),
        };
        assert!(matches!(
            view.translate_escape(&state),
            Some(Action::Browser(BrowserAction::Up))
        ));
    }

    #[test]
    fn test_group_row_shows_expansion_marker() {
        let theme = Theme::default();
        let line = row_line(
            &BrowserRow::Group {
                key: "app.log".into(),
                member_count: 3,
                expanded: true,
            },
            &theme,
        );
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "▾ app.log  (3 files)");
    }
}
