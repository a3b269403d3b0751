//! Match-and-jump search over displayed lines

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Prefix that turns the search input into a regular expression
pub const REGEX_PREFIX: &str = "re:";

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Empty search query")]
    Empty,

    #[error("Invalid regular expression: {0}")]
    InvalidRegex(#[from] regex::Error),
}

/// A compiled search query
#[derive(Debug, Clone)]
pub enum SearchQuery {
    /// Case-insensitive substring (stored lowercased)
    Literal(String),
    /// Case-insensitive regular expression
    Pattern(Regex),
}

impl SearchQuery {
    /// Parse user input: `re:<pattern>` is a regex, anything else a literal
    pub fn parse(input: &str) -> Result<Self, SearchError> {
        if let Some(pattern) = input.strip_prefix(REGEX_PREFIX) {
            if pattern.is_empty() {
                return Err(SearchError::Empty);
            }
            let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
            return Ok(Self::Pattern(regex));
        }

        if input.is_empty() {
            return Err(SearchError::Empty);
        }
        Ok(Self::Literal(input.to_lowercase()))
    }

    pub fn is_match(&self, line: &str) -> bool {
        match self {
            Self::Literal(needle) => line.to_lowercase().contains(needle.as_str()),
            Self::Pattern(regex) => regex.is_match(line),
        }
    }
}

/// Indices of all lines matching `query`, ascending
pub fn find_matches<S: AsRef<str>>(lines: &[S], query: &SearchQuery) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| query.is_match(line.as_ref()))
        .map(|(idx, _)| idx)
        .collect()
}

/// First match strictly after `current`, wrapping to the first match
pub fn next_match(matches: &[usize], current: usize) -> Option<usize> {
    matches
        .iter()
        .copied()
        .find(|&idx| idx > current)
        .or_else(|| matches.first().copied())
}

/// Last match strictly before `current`, wrapping to the last match
pub fn previous_match(matches: &[usize], current: usize) -> Option<usize> {
    matches
        .iter()
        .rev()
        .copied()
        .find(|&idx| idx < current)
        .or_else(|| matches.last().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINES: [&str; 5] = [
        "starting up",
        "ERROR disk full",
        "retrying",
        "error: disk still full",
        "done",
    ];

    #[test]
    fn test_literal_is_case_insensitive() {
        let query = SearchQuery::parse("Error").unwrap();
        assert_eq!(find_matches(&LINES[..], &query), vec![1, 3]);
    }

    #[test]
    fn test_regex_query() {
        let query = SearchQuery::parse(r"re:^(done|starting)").unwrap();
        assert_eq!(find_matches(&LINES[..], &query), vec![0, 4]);
    }

    #[test]
    fn test_invalid_regex_is_an_error() {
        assert!(matches!(
            SearchQuery::parse("re:(unclosed"),
            Err(SearchError::InvalidRegex(_))
        ));
        assert!(matches!(SearchQuery::parse(""), Err(SearchError::Empty)));
        assert!(matches!(SearchQuery::parse("re:"), Err(SearchError::Empty)));
    }

    #[test]
    fn test_jumps_wrap_around() {
        let matches = vec![1, 3];
        assert_eq!(next_match(&matches, 0), Some(1));
        assert_eq!(next_match(&matches, 1), Some(3));
        assert_eq!(next_match(&matches, 3), Some(1));
        assert_eq!(previous_match(&matches, 3), Some(1));
        assert_eq!(previous_match(&matches, 1), Some(3));
        assert_eq!(next_match(&[], 0), None);
    }
}
