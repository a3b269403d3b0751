//! Browser State
//!
//! The share list and one directory level, with rotated logs folded into
//! expandable groups.

use share_client::{join_path, Entry, FileHandle, Share};
use share_log_parser::Grouping;
use std::collections::BTreeSet;

/// Where the browser is pointing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Location {
    /// The list of shares
    #[default]
    Shares,
    /// One directory of a share ("" is the share root)
    Directory { share: String, path: String },
}

/// One visible row of the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserRow {
    Share(Share),
    Directory(Entry),
    /// A rotation family, shown like a folder
    Group {
        key: String,
        member_count: usize,
        expanded: bool,
    },
    /// A member of an expanded group; the first one is the newest
    Member {
        group: String,
        entry: Entry,
        newest: bool,
    },
    File(Entry),
}

impl BrowserRow {
    /// The file entry behind this row, if it is a file
    pub fn file_entry(&self) -> Option<&Entry> {
        match self {
            Self::Member { entry, .. } | Self::File(entry) => Some(entry),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    pub location: Location,
    pub shares: Vec<Share>,
    pub grouping: Grouping,
    pub expanded_groups: BTreeSet<String>,
    /// Flattened rows, rebuilt whenever the listing or expansion changes
    pub rows: Vec<BrowserRow>,
    pub cursor: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl BrowserState {
    pub fn selected_row(&self) -> Option<&BrowserRow> {
        self.rows.get(self.cursor)
    }

    pub fn current_share(&self) -> Option<&str> {
        match &self.location {
            Location::Shares => None,
            Location::Directory { share, .. } => Some(share),
        }
    }

    /// Handle for a file entry listed at the current location
    pub fn handle_for(&self, entry: &Entry) -> Option<FileHandle> {
        match &self.location {
            Location::Shares => None,
            Location::Directory { share, path } => {
                Some(FileHandle::new(share.clone(), join_path(path, &entry.name)))
            }
        }
    }

    /// Newest member of a rotation group at the current location
    pub fn newest_in_group(&self, key: &str) -> Option<FileHandle> {
        self.grouping
            .newest(key)
            .and_then(|entry| self.handle_for(entry))
    }

    /// Panel title: `shares` or `share:/path`
    pub fn title(&self) -> String {
        match &self.location {
            Location::Shares => "shares".to_string(),
            Location::Directory { share, path } => format!("{}:/{}", share, path),
        }
    }

    /// Flatten shares or the grouped listing into rows
    ///
    /// Directory order: directories, rotation groups (members follow an
    /// expanded group), then loose files.
    pub fn rebuild_rows(&mut self) {
        self.rows = match self.location {
            Location::Shares => self.shares.iter().cloned().map(BrowserRow::Share).collect(),
            Location::Directory { .. } => {
                let mut rows = Vec::new();
                let (directories, files): (Vec<_>, Vec<_>) = self
                    .grouping
                    .ungrouped
                    .iter()
                    .partition(|e| e.is_directory);

                rows.extend(directories.into_iter().cloned().map(BrowserRow::Directory));

                for (key, group) in &self.grouping.groups {
                    let expanded = self.expanded_groups.contains(key);
                    rows.push(BrowserRow::Group {
                        key: key.clone(),
                        member_count: group.members.len(),
                        expanded,
                    });
                    if expanded {
                        rows.extend(group.members.iter().enumerate().map(|(i, entry)| {
                            BrowserRow::Member {
                                group: key.clone(),
                                entry: entry.clone(),
                                newest: i == 0,
                            }
                        }));
                    }
                }

                rows.extend(files.into_iter().cloned().map(BrowserRow::File));
                rows
            }
        };

        if self.cursor >= self.rows.len() {
            self.cursor = self.rows.len().saturating_sub(1);
        }
    }
}
