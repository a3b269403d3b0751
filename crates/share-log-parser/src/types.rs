//! Type definitions for content classification and highlighting

use serde::{Deserialize, Serialize};

/// Broad content category decided from bytes and a file-name hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    /// Fully parseable object/array document
    Structured,
    /// Text that looks like log output
    LogLike,
    /// Anything else
    Plain,
}

/// Classified file content: the kind plus its text split into lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedContent {
    pub kind: ContentKind,
    pub lines: Vec<String>,
}

/// Display style class, independent of any terminal toolkit
///
/// Log severity classes and structured-data token classes never overlap,
/// so a theme can give each a distinct look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleClass {
    Error,
    Warning,
    Info,
    Debug,
    Success,
    Timestamp,
    /// Visible "plain" text for log lines without a better match
    Default,
    Key,
    String,
    Boolean,
    Number,
    Null,
    /// Inline status lines emitted by the viewer itself
    Status,
}

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSpan {
    pub text: String,
    /// `None` renders with the terminal's plain style
    pub class: Option<StyleClass>,
}

impl StyledSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    pub fn styled(text: impl Into<String>, class: StyleClass) -> Self {
        Self {
            text: text.into(),
            class: Some(class),
        }
    }
}

/// One display line made of styled spans
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    /// A line carrying a single unstyled span
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            spans: vec![StyledSpan::plain(text)],
        }
    }

    /// A line carrying a single span with `class`
    pub fn styled(text: impl Into<String>, class: StyleClass) -> Self {
        Self {
            spans: vec![StyledSpan::styled(text, class)],
        }
    }

    /// Concatenated text of all spans
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Style of the whole line when it is a single styled span
    pub fn line_class(&self) -> Option<StyleClass> {
        match self.spans.as_slice() {
            [only] => only.class,
            _ => None,
        }
    }
}
