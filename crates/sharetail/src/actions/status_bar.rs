//! Status Bar Actions

use crate::state::{StatusKind, StatusSource};

#[derive(Debug, Clone)]
pub enum StatusBarAction {
    /// Replace the shown message
    Show {
        kind: StatusKind,
        source: StatusSource,
        message: String,
    },
    /// Hide the message, e.g. before a refresh
    Clear,
}

impl StatusBarAction {
    fn show(kind: StatusKind, source: StatusSource, message: impl Into<String>) -> Self {
        Self::Show {
            kind,
            source,
            message: message.into(),
        }
    }

    pub fn running(source: StatusSource, message: impl Into<String>) -> Self {
        Self::show(StatusKind::Running, source, message)
    }

    pub fn success(source: StatusSource, message: impl Into<String>) -> Self {
        Self::show(StatusKind::Success, source, message)
    }

    pub fn error(source: StatusSource, message: impl Into<String>) -> Self {
        Self::show(StatusKind::Error, source, message)
    }

    pub fn warning(source: StatusSource, message: impl Into<String>) -> Self {
        Self::show(StatusKind::Warning, source, message)
    }

    pub fn info(source: StatusSource, message: impl Into<String>) -> Self {
        Self::show(StatusKind::Info, source, message)
    }
}
