//! Status Bar Widget
//!
//! Renders the status bar at the bottom of the screen.
//! Format: `[timestamp] emoji message                     [source]`

use crate::state::AppState;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

/// View model for the status bar
pub struct StatusBarViewModel {
    pub has_message: bool,
    pub timestamp: String,
    pub emoji: &'static str,
    pub message: String,
    pub source: &'static str,
    pub bar_style: Style,
    pub message_style: Style,
    pub metadata_style: Style,
}

impl StatusBarViewModel {
    pub fn from_state(state: &AppState) -> Self {
        let theme = &state.theme;
        let bar_style = theme.status_bar();

        match state.status_bar.latest() {
            Some(latest) => {
                let message_style = match latest.kind {
                    crate::state::StatusKind::Error => theme.error(),
                    crate::state::StatusKind::Warning => theme.warning(),
                    crate::state::StatusKind::Success => theme.success(),
                    _ => theme.text(),
                };
                Self {
                    has_message: true,
                    timestamp: latest.timestamp.format("%H:%M:%S").to_string(),
                    emoji: latest.kind.emoji(),
                    message: latest.message.clone(),
                    source: latest.source.label(),
                    bar_style,
                    message_style: bar_style.patch(message_style),
                    metadata_style: bar_style.patch(theme.muted()),
                }
            }
            None => Self {
                has_message: false,
                timestamp: String::new(),
                emoji: "",
                message: String::new(),
                source: "",
                bar_style,
                message_style: bar_style,
                metadata_style: bar_style,
            },
        }
    }
}

/// Widget for rendering the status bar
pub struct StatusBarWidget<'a>(pub &'a StatusBarViewModel);

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let vm = self.0;

        if area.height < 1 {
            return;
        }

        // Fill entire row with background
        buf.set_style(Rect { height: 1, ..area }, vm.bar_style);
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_char(' ');
        }

        if !vm.has_message {
            return;
        }

        let mut x = area.x + 1;

        let ts_str = format!("[{}] ", vm.timestamp);
        buf.set_string(x, area.y, &ts_str, vm.metadata_style);
        x += ts_str.len() as u16;

        // Emoji typically renders as 2 cells
        buf.set_string(x, area.y, format!("{} ", vm.emoji), vm.message_style);
        x += 3;

        let source_width = if vm.source.is_empty() {
            0
        } else {
            vm.source.len() + 3
        };

        let available_width = area
            .width
            .saturating_sub(x - area.x + source_width as u16 + 2) as usize;

        if vm.message.chars().count() > available_width {
            let truncated: String = vm
                .message
                .chars()
                .take(available_width.saturating_sub(1))
                .collect();
            buf.set_string(x, area.y, format!("{}…", truncated), vm.message_style);
        } else {
            buf.set_string(x, area.y, &vm.message, vm.message_style);
        }

        if !vm.source.is_empty() {
            let source_str = format!("[{}]", vm.source);
            let source_x = (area.x + area.width).saturating_sub(source_str.len() as u16 + 1);
            buf.set_string(source_x, area.y, &source_str, vm.metadata_style);
        }
    }
}
