//! Browser Reducer

use crate::actions::{Action, BrowserAction};
use crate::state::{BrowserRow, BrowserState, Location};
use share_log_parser::group;

pub fn reduce(mut state: BrowserState, action: &Action) -> BrowserState {
    let Action::Browser(action) = action else {
        return state;
    };

    match action {
        BrowserAction::LoadShares | BrowserAction::LoadEntries { .. } => {
            state.loading = true;
            state.error = None;
        }

        BrowserAction::SharesLoaded(shares) => {
            if state.location != Location::Shares {
                state.location = Location::Shares;
                state.cursor = 0;
            }
            state.shares = shares.clone();
            state.grouping = Default::default();
            state.expanded_groups.clear();
            state.loading = false;
            state.rebuild_rows();
        }

        BrowserAction::EntriesLoaded {
            share,
            path,
            entries,
        } => {
            let location = Location::Directory {
                share: share.clone(),
                path: path.clone(),
            };
            // A refresh of the same directory keeps cursor and expansion
            if state.location != location {
                state.location = location;
                state.cursor = 0;
                state.expanded_groups.clear();
            }
            state.grouping = group(entries);
            state
                .expanded_groups
                .retain(|key| state.grouping.groups.contains_key(key));
            state.loading = false;
            state.rebuild_rows();
        }

        BrowserAction::LoadError(error) => {
            state.loading = false;
            state.error = Some(error.clone());
        }

        BrowserAction::NavigateNext => {
            if state.cursor + 1 < state.rows.len() {
                state.cursor += 1;
            }
        }

        BrowserAction::NavigatePrevious => {
            state.cursor = state.cursor.saturating_sub(1);
        }

        BrowserAction::NavigateToTop => {
            state.cursor = 0;
        }

        BrowserAction::NavigateToBottom => {
            state.cursor = state.rows.len().saturating_sub(1);
        }

        BrowserAction::ToggleGroup(key) => {
            if !state.expanded_groups.remove(key) {
                state.expanded_groups.insert(key.clone());
            }
            state.rebuild_rows();
            if let Some(idx) = state
                .rows
                .iter()
                .position(|row| matches!(row, BrowserRow::Group { key: k, .. } if k == key))
            {
                state.cursor = idx;
            }
        }

        // Resolved by the share middleware into the actions above
        BrowserAction::Open
        | BrowserAction::Up
        | BrowserAction::Refresh
        | BrowserAction::TailSelected => {}
    }

    state
}
