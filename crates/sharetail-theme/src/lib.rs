use ratatui::{prelude::*, style::palette::tailwind};
use share_log_parser::{StyleClass, StyledLine};

/// Application theme - centralized color and style management
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_panel: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Status colors
    pub status_success: Color,
    pub status_error: Color,
    pub status_warning: Color,
    pub status_info: Color,

    // Content colors
    pub log_debug: Color,
    pub log_timestamp: Color,
    pub json_key: Color,
    pub json_string: Color,
    pub json_number: Color,
    pub json_literal: Color,

    // Selection colors
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub search_match_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            // Backgrounds
            bg_primary: tailwind::SLATE.c950,
            bg_secondary: tailwind::SLATE.c900,
            bg_panel: tailwind::SLATE.c800,

            // Text
            text_primary: tailwind::SLATE.c100,
            text_secondary: tailwind::SLATE.c200,
            text_muted: tailwind::SLATE.c400,

            // Accents
            accent_primary: tailwind::CYAN.c400,
            accent_secondary: tailwind::CYAN.c600,

            // Status
            status_success: tailwind::GREEN.c400,
            status_error: tailwind::RED.c400,
            status_warning: tailwind::YELLOW.c400,
            status_info: tailwind::BLUE.c400,

            // Content
            log_debug: tailwind::SLATE.c500,
            log_timestamp: tailwind::PURPLE.c300,
            json_key: tailwind::CYAN.c300,
            json_string: tailwind::GREEN.c300,
            json_number: tailwind::AMBER.c300,
            json_literal: tailwind::PURPLE.c400,

            // Selection
            selected_bg: tailwind::BLUE.c400,
            selected_fg: Color::White,
            search_match_bg: tailwind::AMBER.c800,
        }
    }

    /// Style for one highlight class
    pub fn style_for(&self, class: StyleClass) -> Style {
        let style = Style::default();
        match class {
            StyleClass::Error => style.fg(self.status_error).add_modifier(Modifier::BOLD),
            StyleClass::Warning => style.fg(self.status_warning),
            StyleClass::Info => style.fg(self.status_info),
            StyleClass::Debug => style.fg(self.log_debug),
            StyleClass::Success => style.fg(self.status_success),
            StyleClass::Timestamp => style.fg(self.log_timestamp),
            StyleClass::Default => style.fg(self.text_secondary),
            StyleClass::Key => style.fg(self.json_key).add_modifier(Modifier::BOLD),
            StyleClass::String => style.fg(self.json_string),
            StyleClass::Number => style.fg(self.json_number),
            StyleClass::Boolean | StyleClass::Null => style.fg(self.json_literal),
            StyleClass::Status => style
                .fg(self.status_warning)
                .add_modifier(Modifier::ITALIC),
        }
    }

    /// Convert a styled line into a ratatui line
    pub fn render_line(&self, line: &StyledLine) -> Line<'static> {
        Line::from(
            line.spans
                .iter()
                .map(|span| match span.class {
                    Some(class) => Span::styled(span.text.clone(), self.style_for(class)),
                    None => Span::styled(span.text.clone(), self.text()),
                })
                .collect::<Vec<_>>(),
        )
    }

    // Prebuilt styles for common use cases

    /// Style for panel borders
    pub fn panel_border(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for panel titles
    pub fn panel_title(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key hints (e.g., "t" in "t tail")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key descriptions
    pub fn key_description(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Style for selected list rows
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the background of a line matching the search
    pub fn search_match(&self) -> Style {
        Style::default().bg(self.search_match_bg)
    }

    /// Style for directories and rotation groups in listings
    pub fn folder(&self) -> Style {
        Style::default()
            .fg(self.accent_secondary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for error messages
    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.status_error)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for success messages
    pub fn success(&self) -> Style {
        Style::default()
            .fg(self.status_success)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for warning messages
    pub fn warning(&self) -> Style {
        Style::default()
            .fg(self.status_warning)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for muted/helper text
    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Style for primary text
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Style for the status bar strip
    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.text_secondary).bg(self.bg_secondary)
    }
}
