//! Rotated log grouping
//!
//! Clusters a flat directory listing into rotation families such as
//! `app.log.2024-01-02`, `app.log.2024-01-01.2`, `app.log.2024-01-01.1` and
//! orders each family newest-first.
//!
//! Date tokens are compared as plain strings, not calendar dates. Tokens of
//! different widths (e.g. `2024-1-9` vs `2024-01-10`) therefore order
//! lexicographically; this is the established behavior and is kept.

use regex::Regex;
use share_client::Entry;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// A rotation family: every member shares `key` and `members[0]` is the newest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationGroup {
    /// Base name, always ending in `.log`
    pub key: String,
    pub members: Vec<Entry>,
}

impl RotationGroup {
    /// The newest member
    pub fn newest(&self) -> Option<&Entry> {
        self.members.first()
    }
}

/// Result of grouping one directory listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    pub groups: BTreeMap<String, RotationGroup>,
    /// Directories first, then files that belong to no group, in listing order
    pub ungrouped: Vec<Entry>,
}

impl Grouping {
    /// Newest member of the group with `key`
    pub fn newest(&self, key: &str) -> Option<&Entry> {
        self.groups.get(key).and_then(RotationGroup::newest)
    }
}

/// Parsed rotation name
#[derive(Debug, Clone, PartialEq, Eq)]
struct RotationName {
    base: String,
    date: String,
    sequence: Option<u64>,
}

fn dated_sequence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+\.log)\.([0-9-]+)\.([0-9]+)$").unwrap())
}

fn dated_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+\.log)\.([0-9-]+)$").unwrap())
}

/// Match `name` against `<base>.log.<date>.<seq>` first, then `<base>.log.<date>`
fn parse_rotation_name(name: &str) -> Option<RotationName> {
    if let Some(caps) = dated_sequence_regex().captures(name) {
        // Sequence numbers too large for u64 fall through to the dated pattern
        if let Ok(sequence) = caps[3].parse::<u64>() {
            return Some(RotationName {
                base: caps[1].to_string(),
                date: caps[2].to_string(),
                sequence: Some(sequence),
            });
        }
    }

    dated_regex().captures(name).map(|caps| RotationName {
        base: caps[1].to_string(),
        date: caps[2].to_string(),
        sequence: None,
    })
}

/// Newest-first ordering: date descending as a string, then sequence
/// descending when both sides have one. On a date tie a numbered member sorts
/// before an unnumbered one.
fn compare_newest_first(a: &RotationName, b: &RotationName) -> Ordering {
    b.date.cmp(&a.date).then_with(|| match (a.sequence, b.sequence) {
        (Some(sa), Some(sb)) => sb.cmp(&sa),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}

/// Build a family's group, or hand back its only member when that member is
/// named exactly like the key
fn into_group(
    key: String,
    mut members: Vec<(RotationName, Entry)>,
) -> Result<RotationGroup, Entry> {
    if members.len() == 1 && members[0].1.name == key {
        log::debug!("Demoting single-member group '{}'", key);
        return Err(members.remove(0).1);
    }

    // Stable sort keeps listing order for members that compare equal
    members.sort_by(|(a, _), (b, _)| compare_newest_first(a, b));
    Ok(RotationGroup {
        key,
        members: members.into_iter().map(|(_, entry)| entry).collect(),
    })
}

/// Group a directory listing into rotation families
///
/// Pure and deterministic: the same entries always yield the same groups and
/// the same order.
pub fn group(entries: &[Entry]) -> Grouping {
    let mut directories = Vec::new();
    let mut loose_files = Vec::new();
    let mut families: BTreeMap<String, Vec<(RotationName, Entry)>> = BTreeMap::new();

    for entry in entries {
        if entry.is_directory {
            directories.push(entry.clone());
            continue;
        }
        match parse_rotation_name(&entry.name) {
            Some(parsed) => families
                .entry(parsed.base.clone())
                .or_default()
                .push((parsed, entry.clone())),
            None => loose_files.push(entry.clone()),
        }
    }

    let mut groups = BTreeMap::new();
    for (key, members) in families {
        match into_group(key, members) {
            Ok(group) => {
                groups.insert(group.key.clone(), group);
            }
            Err(entry) => loose_files.push(entry),
        }
    }

    let mut ungrouped = directories;
    ungrouped.extend(loose_files);

    Grouping { groups, ungrouped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn files(names: &[&str]) -> Vec<Entry> {
        names.iter().map(|n| Entry::file(*n)).collect()
    }

    fn rotated(key: &str, name: &str, date: &str) -> (RotationName, Entry) {
        let parsed = RotationName {
            base: key.to_string(),
            date: date.to_string(),
            sequence: None,
        };
        (parsed, Entry::file(name))
    }

    #[test]
    fn test_lone_member_named_like_key_is_demoted() {
        let members = vec![rotated("app.log", "app.log", "2024-01-01")];
        let entry = into_group("app.log".to_string(), members).unwrap_err();
        assert_eq!(entry.name, "app.log");
    }

    #[test]
    fn test_lone_dated_member_stays_grouped() {
        let members = vec![rotated("app.log", "app.log.2024-01-01", "2024-01-01")];
        let group = into_group("app.log".to_string(), members).unwrap();
        assert_eq!(group.key, "app.log");
        assert_eq!(group.newest().map(|e| e.name.as_str()), Some("app.log.2024-01-01"));
    }

    #[test]
    fn test_members_named_like_key_stay_grouped_with_siblings() {
        let members = vec![
            rotated("app.log", "app.log", "2024-01-01"),
            rotated("app.log", "app.log.2024-01-02", "2024-01-02"),
        ];
        let group = into_group("app.log".to_string(), members).unwrap();
        let names: Vec<_> = group.members.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["app.log.2024-01-02", "app.log"]);
    }

    fn member_names(grouping: &Grouping, key: &str) -> Vec<String> {
        grouping.groups[key]
            .members
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    #[test]
    fn test_pattern_precedence() {
        assert_eq!(
            parse_rotation_name("app.log.2024-01-01.3"),
            Some(RotationName {
                base: "app.log".into(),
                date: "2024-01-01".into(),
                sequence: Some(3),
            })
        );
        assert_eq!(
            parse_rotation_name("app.log.2024-01-01"),
            Some(RotationName {
                base: "app.log".into(),
                date: "2024-01-01".into(),
                sequence: None,
            })
        );
        assert_eq!(parse_rotation_name("app.log"), None);
        assert_eq!(parse_rotation_name("app.txt.2024-01-01"), None);
        assert_eq!(parse_rotation_name("app.log.2024-01-01.gz"), None);
    }

    #[test]
    fn test_both_patterns_share_one_group() {
        let grouping = group(&files(&["app.log.2024-01-01", "app.log.2024-01-01.3"]));
        assert_eq!(grouping.groups.len(), 1);
        assert_eq!(
            member_names(&grouping, "app.log"),
            vec!["app.log.2024-01-01.3", "app.log.2024-01-01"]
        );
    }

    #[test]
    fn test_equal_members_keep_listing_order() {
        let grouping = group(&files(&["x.log.2024-01-01", "x.log.2024-01-01"]));
        assert_eq!(grouping.groups["x.log"].members.len(), 2);
    }

    #[test]
    fn test_newer_date_wins_over_sequence() {
        let grouping = group(&files(&["app.log.2024-01-01.5", "app.log.2024-01-02"]));
        assert_eq!(
            member_names(&grouping, "app.log"),
            vec!["app.log.2024-01-02", "app.log.2024-01-01.5"]
        );
        assert_eq!(grouping.newest("app.log").unwrap().name, "app.log.2024-01-02");
    }

    #[test]
    fn test_sequence_descending_on_date_tie() {
        let grouping = group(&files(&[
            "app.log.2024-01-01.1",
            "app.log.2024-01-01.10",
            "app.log.2024-01-01.2",
        ]));
        assert_eq!(
            member_names(&grouping, "app.log"),
            vec![
                "app.log.2024-01-01.10",
                "app.log.2024-01-01.2",
                "app.log.2024-01-01.1",
            ]
        );
    }

    #[test]
    fn test_date_comparison_is_lexicographic() {
        // Calendar order would put 2024-01-10 first; string order puts 2024-1-9 first
        let grouping = group(&files(&["app.log.2024-01-10", "app.log.2024-1-9"]));
        assert_eq!(
            member_names(&grouping, "app.log"),
            vec!["app.log.2024-1-9", "app.log.2024-01-10"]
        );
    }

    #[test]
    fn test_ungrouped_directories_first() {
        let entries = vec![
            Entry::file("readme.txt"),
            Entry::directory("archive"),
            Entry::file("app.log"),
            Entry::file("db.log.2024-02-01"),
            Entry::directory("tmp"),
        ];
        let grouping = group(&entries);

        let names: Vec<_> = grouping.ungrouped.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["archive", "tmp", "readme.txt", "app.log"]);
        assert_eq!(member_names(&grouping, "db.log"), vec!["db.log.2024-02-01"]);
    }

    #[test]
    fn test_single_member_group_stays_a_group() {
        let grouping = group(&files(&["worker.log.2024-05-05"]));
        assert!(grouping.groups.contains_key("worker.log"));
        assert!(grouping.ungrouped.is_empty());
    }

    #[test]
    fn test_directories_never_grouped() {
        let entries = vec![Entry::directory("app.log.2024-01-01")];
        let grouping = group(&entries);
        assert!(grouping.groups.is_empty());
        assert_eq!(grouping.ungrouped, entries);
    }

    #[test]
    fn test_group_is_deterministic() {
        let entries = files(&[
            "b.log.2024-01-01",
            "a.log.2024-01-03.1",
            "notes.md",
            "a.log.2024-01-03",
            "a.log.2024-01-02.7",
        ]);
        let first = group(&entries);
        for _ in 0..5 {
            assert_eq!(group(&entries), first);
        }
        let keys: Vec<_> = first.groups.keys().cloned().collect();
        assert_eq!(keys, vec!["a.log", "b.log"]);
    }
}
