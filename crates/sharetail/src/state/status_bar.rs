//! Status Bar State
//!
//! Only the latest message is shown, so only the latest is kept.

use chrono::{DateTime, Local};

/// Kind of status message (determines icon and color)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Operation started/in progress
    Running,
    Success,
    Error,
    /// Non-fatal issue, e.g. a failed tail poll that will be retried
    Warning,
    Info,
}

impl StatusKind {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Running => "⏳",
            Self::Success => "✅",
            Self::Error => "🚨",
            Self::Warning => "⚠️",
            Self::Info => "ℹ️",
        }
    }
}

/// Part of the app a message is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSource {
    /// Share and directory listings
    Browser,
    /// Loading the open file
    File,
    /// The live tail of the open file
    Tail,
}

impl StatusSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::File => "file",
            Self::Tail => "tail",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub timestamp: DateTime<Local>,
    pub kind: StatusKind,
    pub source: StatusSource,
    pub message: String,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, source: StatusSource, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            kind,
            source,
            message: message.into(),
        }
    }

    /// A retryable tail problem, superseded once the tail delivers lines again
    pub fn is_tail_warning(&self) -> bool {
        self.source == StatusSource::Tail && self.kind == StatusKind::Warning
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusBarState {
    current: Option<StatusMessage>,
}

impl StatusBarState {
    pub fn latest(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }

    pub fn show(&mut self, message: StatusMessage) {
        self.current = Some(message);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Drop the current message if it is a tail warning
    pub fn clear_tail_warning(&mut self) {
        if self.current.as_ref().is_some_and(StatusMessage::is_tail_warning) {
            self.current = None;
        }
    }
}
