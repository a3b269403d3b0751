//! Log line highlighting and structured-data formatting

use crate::classify::timestamp_regex;
use crate::types::{ClassifiedContent, ContentKind, StyleClass, StyledLine, StyledSpan};
use regex::Regex;
use std::sync::OnceLock;

/// Severity rules in precedence order; the first matching rule styles the whole line
fn severity_rules() -> &'static [(Regex, StyleClass)] {
    static RULES: OnceLock<Vec<(Regex, StyleClass)>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            (
                Regex::new(r"(?i)\b(?:errors?|fail(?:s|ed|ure|ures)?|fatal)\b|exception").unwrap(),
                StyleClass::Error,
            ),
            (
                Regex::new(r"(?i)\b(?:warn(?:ing|ings)?|caution)\b").unwrap(),
                StyleClass::Warning,
            ),
            (
                Regex::new(r"(?i)\b(?:info|information|notice)\b").unwrap(),
                StyleClass::Info,
            ),
            (
                Regex::new(r"(?i)\b(?:debug|trace|verbose)\b").unwrap(),
                StyleClass::Debug,
            ),
            (
                Regex::new(r"(?i)\b(?:success(?:ful|fully)?|succeed(?:s|ed)?|completed|ok)\b")
                    .unwrap(),
                StyleClass::Success,
            ),
        ]
    })
}

/// Style a single line of log-like text
///
/// Severity keywords win over timestamps. A line with only a timestamp gets
/// the timestamp span styled and the rest left plain; anything else gets
/// [`StyleClass::Default`] so it stays readable on dark backgrounds.
pub fn highlight_line(line: &str) -> StyledLine {
    for (pattern, class) in severity_rules() {
        if pattern.is_match(line) {
            return StyledLine::styled(line, *class);
        }
    }

    if let Some(m) = timestamp_regex().find(line) {
        let mut spans = Vec::with_capacity(3);
        if m.start() > 0 {
            spans.push(StyledSpan::plain(&line[..m.start()]));
        }
        spans.push(StyledSpan::styled(m.as_str(), StyleClass::Timestamp));
        if m.end() < line.len() {
            spans.push(StyledSpan::plain(&line[m.end()..]));
        }
        return StyledLine { spans };
    }

    StyledLine::styled(line, StyleClass::Default)
}

/// Inline status line emitted by the viewer (errors, resyncs, notices)
pub fn status_line(message: impl Into<String>) -> StyledLine {
    StyledLine::styled(message, StyleClass::Status)
}

/// Pretty-print a JSON buffer with 2-space indentation and tag its tokens
///
/// Keys, strings, booleans, numbers and `null` each get their own class.
/// A buffer that does not parse comes back unstyled, line by line.
pub fn format_structured(buffer: &[u8]) -> Vec<StyledLine> {
    let pretty = serde_json::from_slice::<serde_json::Value>(buffer)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok());

    match pretty {
        Some(text) => text.lines().map(tokenize_json_line).collect(),
        None => {
            log::debug!("Structured formatting failed, showing raw content");
            String::from_utf8_lossy(buffer)
                .lines()
                .map(StyledLine::plain)
                .collect()
        }
    }
}

/// Render classified content so static and live views look the same
pub fn render_content(content: &ClassifiedContent) -> Vec<StyledLine> {
    match content.kind {
        ContentKind::Structured => format_structured(content.lines.join("\n").as_bytes()),
        ContentKind::LogLike => content.lines.iter().map(|l| highlight_line(l)).collect(),
        ContentKind::Plain => content.lines.iter().map(StyledLine::plain).collect(),
    }
}

/// Split one line of pretty-printed JSON into styled tokens
fn tokenize_json_line(line: &str) -> StyledLine {
    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut i = 0;

    let flush = |plain: &mut String, spans: &mut Vec<StyledSpan>| {
        if !plain.is_empty() {
            spans.push(StyledSpan::plain(std::mem::take(plain)));
        }
    };

    while i < chars.len() {
        let c = chars[i];
        if c == '"' {
            let start = i;
            i += 1;
            while i < chars.len() && chars[i] != '"' {
                if chars[i] == '\\' {
                    i += 1;
                }
                i += 1;
            }
            i = (i + 1).min(chars.len());
            let token: String = chars[start..i].iter().collect();

            let mut next = i;
            while next < chars.len() && chars[next].is_whitespace() {
                next += 1;
            }
            let class = if chars.get(next) == Some(&':') {
                StyleClass::Key
            } else {
                StyleClass::String
            };

            flush(&mut plain, &mut spans);
            spans.push(StyledSpan::styled(token, class));
        } else if c == '-' || c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && matches!(chars[i], '0'..='9' | '-' | '+' | '.' | 'e' | 'E') {
                i += 1;
            }
            flush(&mut plain, &mut spans);
            spans.push(StyledSpan::styled(
                chars[start..i].iter().collect::<String>(),
                StyleClass::Number,
            ));
        } else if let Some((word, class)) = literal_at(&chars, i) {
            flush(&mut plain, &mut spans);
            spans.push(StyledSpan::styled(word, class));
            i += word.len();
        } else {
            plain.push(c);
            i += 1;
        }
    }
    flush(&mut plain, &mut spans);

    StyledLine { spans }
}

fn literal_at(chars: &[char], i: usize) -> Option<(&'static str, StyleClass)> {
    const LITERALS: [(&str, StyleClass); 3] = [
        ("true", StyleClass::Boolean),
        ("false", StyleClass::Boolean),
        ("null", StyleClass::Null),
    ];
    LITERALS.into_iter().find(|(word, _)| {
        chars.len() >= i + word.len() && word.chars().zip(&chars[i..]).all(|(a, b)| a == *b)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classes(line: &StyledLine) -> Vec<(String, Option<StyleClass>)> {
        line.spans
            .iter()
            .map(|s| (s.text.clone(), s.class))
            .collect()
    }

    #[test]
    fn test_error_beats_timestamp() {
        let line = highlight_line("2024-01-01T00:00:00 ERROR something failed");
        assert_eq!(line.line_class(), Some(StyleClass::Error));
    }

    #[test]
    fn test_precedence_order() {
        assert_eq!(
            highlight_line("WARN retry after fatal").line_class(),
            Some(StyleClass::Error)
        );
        assert_eq!(
            highlight_line("info: disk warning").line_class(),
            Some(StyleClass::Warning)
        );
        assert_eq!(
            highlight_line("debug notice").line_class(),
            Some(StyleClass::Info)
        );
        assert_eq!(
            highlight_line("TRACE job completed").line_class(),
            Some(StyleClass::Debug)
        );
        assert_eq!(
            highlight_line("upload completed").line_class(),
            Some(StyleClass::Success)
        );
        assert_eq!(
            highlight_line("Caused by java.lang.NullPointerException").line_class(),
            Some(StyleClass::Error)
        );
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        // "token" contains "ok", "informal" contains "info"
        assert_eq!(
            highlight_line("refreshing token informally").line_class(),
            Some(StyleClass::Default)
        );
    }

    #[test]
    fn test_timestamp_only_styles_the_timestamp() {
        let line = highlight_line("at 2024-03-05 12:00:01 the backup ran");
        assert_eq!(
            classes(&line),
            vec![
                ("at ".to_string(), None),
                ("2024-03-05 12:00:01".to_string(), Some(StyleClass::Timestamp)),
                (" the backup ran".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_default_style_is_never_unstyled() {
        let line = highlight_line("just some words");
        assert_eq!(line.line_class(), Some(StyleClass::Default));
        assert_eq!(line.text(), "just some words");
    }

    #[test]
    fn test_format_structured_styles_tokens() {
        let lines = format_structured(br#"{"a":1,"b":[2,3]}"#);
        let text: Vec<String> = lines.iter().map(StyledLine::text).collect();
        assert_eq!(
            text,
            vec!["{", "  \"a\": 1,", "  \"b\": [", "    2,", "    3", "  ]", "}"]
        );

        let spans: Vec<_> = lines.iter().flat_map(|l| l.spans.clone()).collect();
        let keys: Vec<_> = spans
            .iter()
            .filter(|s| s.class == Some(StyleClass::Key))
            .map(|s| s.text.as_str())
            .collect();
        let numbers: Vec<_> = spans
            .iter()
            .filter(|s| s.class == Some(StyleClass::Number))
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(keys, vec!["\"a\"", "\"b\""]);
        assert_eq!(numbers, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_format_structured_literals_and_strings() {
        let lines = format_structured(br#"{"ok":true,"off":false,"none":null,"s":"x: \"y\"","n":-1.5e3}"#);
        let spans: Vec<_> = lines.iter().flat_map(|l| l.spans.clone()).collect();
        let find = |class| {
            spans
                .iter()
                .filter(|s| s.class == Some(class))
                .map(|s| s.text.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(find(StyleClass::Boolean), vec!["false", "true"]);
        assert_eq!(find(StyleClass::Null), vec!["null"]);
        assert_eq!(find(StyleClass::String), vec![r#""x: \"y\"""#]);
        assert_eq!(find(StyleClass::Number), vec!["-1500.0"]);
    }

    #[test]
    fn test_format_structured_falls_back_unstyled() {
        let lines = format_structured(b"{broken\nsecond");
        assert_eq!(lines, vec![StyledLine::plain("{broken"), StyledLine::plain("second")]);
    }

    #[test]
    fn test_render_content_by_kind() {
        let content = ClassifiedContent {
            kind: ContentKind::Plain,
            lines: vec!["ERROR but plain".into()],
        };
        assert_eq!(render_content(&content), vec![StyledLine::plain("ERROR but plain")]);

        let content = ClassifiedContent {
            kind: ContentKind::LogLike,
            lines: vec!["ERROR now styled".into()],
        };
        assert_eq!(
            render_content(&content)[0].line_class(),
            Some(StyleClass::Error)
        );
    }
}
