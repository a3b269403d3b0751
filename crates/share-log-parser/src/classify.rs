//! Content classification
//!
//! Decides whether fetched bytes are structured data, log output or plain
//! text. Classification never fails: anything unrecognised is `Plain`.

use crate::types::{ClassifiedContent, ContentKind};
use regex::Regex;
use std::sync::OnceLock;

const STRUCTURED_EXTENSIONS: &[&str] = &["json"];
const LOG_EXTENSIONS: &[&str] = &["log"];

/// Number of leading lines inspected for log markers
const SCAN_LINES: usize = 20;
/// More than this many marked lines makes the content log-like
const LOG_LINE_THRESHOLD: usize = 3;

pub(crate) fn severity_regex() -> &'static Regex {
    static SEVERITY_REGEX: OnceLock<Regex> = OnceLock::new();
    SEVERITY_REGEX.get_or_init(|| {
        Regex::new(r"(?i)\b(info|debug|error|warn|warning|notice|trace|fatal|exception|fail)\b")
            .unwrap()
    })
}

/// ISO-8601-like timestamp: `2024-01-15T10:30:00`, `2024-01-15 10:30`, with optional fraction/zone
pub(crate) fn timestamp_regex() -> &'static Regex {
    static TIMESTAMP_REGEX: OnceLock<Regex> = OnceLock::new();
    TIMESTAMP_REGEX.get_or_init(|| {
        Regex::new(
            r"\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}(?::\d{2})?(?:[.,]\d+)?(?:Z|[+-]\d{2}:?\d{2})?",
        )
        .unwrap()
    })
}

/// Dates in square brackets: `[2024-01-15 ...]`, `[15/01/2024]`, `[15/Jan/2024:10:00:00 +0000]`
pub(crate) fn bracketed_date_regex() -> &'static Regex {
    static BRACKETED_DATE_REGEX: OnceLock<Regex> = OnceLock::new();
    BRACKETED_DATE_REGEX.get_or_init(|| {
        Regex::new(
            r"\[\d{1,4}[-/.]\d{1,2}[-/.]\d{1,4}[^\]]*\]|\[\d{1,2}/[A-Za-z]{3}/\d{4}[^\]]*\]",
        )
        .unwrap()
    })
}

/// Classify a buffer using the file name as a hint
///
/// Order of checks:
/// 1. Structured: structured extension, or the whole buffer parses as a JSON object/array
/// 2. Log-like: log extension (including rotated `*.log.<suffix>` names), or more
///    than 3 of the first 20 lines carry a severity keyword, timestamp or bracketed date
/// 3. Plain otherwise
pub fn classify(buffer: &[u8], name_hint: &str) -> ContentKind {
    let name = file_name(name_hint).to_lowercase();
    let text = String::from_utf8_lossy(buffer);

    if has_extension(&name, STRUCTURED_EXTENSIONS) || parses_as_document(&text) {
        return ContentKind::Structured;
    }

    if has_extension(&name, LOG_EXTENSIONS) || is_rotated_log_name(&name) || has_log_markers(&text)
    {
        return ContentKind::LogLike;
    }

    ContentKind::Plain
}

impl ClassifiedContent {
    /// Classify `buffer` and split it into lines
    pub fn from_bytes(buffer: &[u8], name_hint: &str) -> Self {
        let kind = classify(buffer, name_hint);
        let lines = String::from_utf8_lossy(buffer)
            .lines()
            .map(str::to_string)
            .collect();
        Self { kind, lines }
    }
}

fn file_name(hint: &str) -> &str {
    hint.rsplit(['/', '\\']).next().unwrap_or(hint)
}

fn has_extension(name: &str, extensions: &[&str]) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && extensions.contains(&ext))
}

fn is_rotated_log_name(name: &str) -> bool {
    name.find(".log.").is_some_and(|idx| idx > 0)
}

/// Whether the trimmed text is a complete JSON object or array
pub(crate) fn parses_as_document(text: &str) -> bool {
    let trimmed = text.trim_start_matches('\u{feff}').trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return false;
    }
    serde_json::from_str::<serde_json::Value>(trimmed).is_ok()
}

fn has_log_markers(text: &str) -> bool {
    let marked = text
        .lines()
        .take(SCAN_LINES)
        .filter(|line| is_log_line(line))
        .count();
    marked > LOG_LINE_THRESHOLD
}

fn is_log_line(line: &str) -> bool {
    severity_regex().is_match(line)
        || timestamp_regex().is_match(line)
        || bracketed_date_regex().is_match(line)
}
