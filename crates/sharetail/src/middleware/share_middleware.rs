//! Share Operations Middleware
//!
//! Central middleware for everything that talks to the file share:
//! - Share and directory listings (with the response cache)
//! - Opening files and classifying their content
//! - Starting, pausing and stopping the live tail of the open file

use crate::actions::{
    Action, BrowserAction, FileViewAction, GlobalAction, StatusBarAction, TailAction,
};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::{AppState, BrowserRow, LoadingState, Location, StatusSource};
use crate::views::ViewId;
use share_client::{
    join_path, parent_path, CacheMode, CachedShareClient, FileHandle, LocalShareClient,
    ResponseCache, ShareClient,
};
use share_log_parser::ClassifiedContent;
use share_tail::{SessionState, TailOptions, TailSession};
use sharetail_config::AppConfig;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;

/// Middleware for all share operations
pub struct ShareMiddleware {
    /// Tokio runtime for async operations
    runtime: Runtime,
    /// Client shared by listings, file loads and tails
    client: CachedShareClient<LocalShareClient>,
    tail_options: TailOptions,
    /// The one running tail, keyed by its session id
    tail: Option<(u64, TailSession)>,
    next_session_id: u64,
}

impl ShareMiddleware {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let runtime = Runtime::new()?;

        let cache = Arc::new(Mutex::new(ResponseCache::with_ttl(cache_ttl(
            config.cache_ttl_secs,
        ))));
        let root = config.share_root();
        log::info!("ShareMiddleware: serving shares from {}", root.display());

        Ok(Self {
            runtime,
            client: CachedShareClient::new(LocalShareClient::new(root), cache, CacheMode::ReadWrite),
            tail_options: TailOptions {
                poll_interval: config.poll_interval(),
            },
            tail: None,
            next_session_id: 1,
        })
    }

    fn client_for(&self, refresh: bool) -> CachedShareClient<LocalShareClient> {
        if refresh {
            self.client.with_mode(CacheMode::WriteOnly)
        } else {
            self.client.clone()
        }
    }

    fn load_shares(&self, refresh: bool, dispatcher: &Dispatcher) {
        let client = self.client_for(refresh);
        let dispatcher = dispatcher.clone();

        self.runtime.spawn(async move {
            match client.list_shares().await {
                Ok(shares) => {
                    log::debug!("ShareMiddleware: {} shares", shares.len());
                    dispatcher.dispatch(Action::Browser(BrowserAction::SharesLoaded(shares)));
                }
                Err(e) => {
                    log::error!("ShareMiddleware: listing shares failed: {}", e);
                    dispatcher.dispatch(Action::Browser(BrowserAction::LoadError(e.to_string())));
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::error(
                        StatusSource::Browser,
                        format!("Listing shares failed: {}", e),
                    )));
                }
            }
        });
    }

    fn load_entries(&self, share: &str, path: &str, refresh: bool, dispatcher: &Dispatcher) {
        let client = self.client_for(refresh);
        let dispatcher = dispatcher.clone();
        let share = share.to_string();
        let path = path.to_string();

        self.runtime.spawn(async move {
            match client.list_entries(&share, &path).await {
                Ok(entries) => {
                    log::debug!(
                        "ShareMiddleware: {} entries in {}:/{}",
                        entries.len(),
                        share,
                        path
                    );
                    dispatcher.dispatch(Action::Browser(BrowserAction::EntriesLoaded {
                        share,
                        path,
                        entries,
                    }));
                }
                Err(e) => {
                    log::error!("ShareMiddleware: listing {}:/{} failed: {}", share, path, e);
                    dispatcher.dispatch(Action::Browser(BrowserAction::LoadError(e.to_string())));
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::error(
                        StatusSource::Browser,
                        format!("Listing {}:/{} failed: {}", share, path, e),
                    )));
                }
            }
        });
    }

    fn load_file(&self, handle: &FileHandle, tail: bool, dispatcher: &Dispatcher) {
        let client = self.client.clone();
        let dispatcher = dispatcher.clone();
        let handle = handle.clone();

        self.runtime.spawn(async move {
            match client.fetch_whole(&handle).await {
                Ok(bytes) => {
                    let content = ClassifiedContent::from_bytes(&bytes, handle.name());
                    log::debug!(
                        "ShareMiddleware: loaded {} ({} bytes, {:?})",
                        handle,
                        bytes.len(),
                        content.kind
                    );
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::success(
                        StatusSource::File,
                        format!("Loaded {} ({} bytes)", handle, bytes.len()),
                    )));
                    dispatcher.dispatch(Action::FileView(FileViewAction::Loaded {
                        handle,
                        content,
                        length: bytes.len() as u64,
                        tail,
                    }));
                }
                Err(e) => {
                    log::error!("ShareMiddleware: loading {} failed: {}", handle, e);
                    dispatcher.dispatch(Action::StatusBar(StatusBarAction::error(
                        StatusSource::File,
                        format!("Loading {} failed: {}", handle, e),
                    )));
                    dispatcher.dispatch(Action::FileView(FileViewAction::LoadError {
                        handle,
                        error: e.to_string(),
                    }));
                }
            }
        });
    }

    /// Resolve Enter on the row under the cursor
    fn open_selected(&self, state: &AppState, dispatcher: &Dispatcher) {
        let browser = &state.browser;
        let Some(row) = browser.selected_row() else {
            return;
        };

        let action = match (row, &browser.location) {
            (BrowserRow::Share(share), _) => BrowserAction::LoadEntries {
                share: share.name.clone(),
                path: String::new(),
                refresh: false,
            },
            (BrowserRow::Directory(entry), Location::Directory { share, path }) => {
                BrowserAction::LoadEntries {
                    share: share.clone(),
                    path: join_path(path, &entry.name),
                    refresh: false,
                }
            }
            (BrowserRow::Group { key, .. }, _) => BrowserAction::ToggleGroup(key.clone()),
            (BrowserRow::Member { entry, .. } | BrowserRow::File(entry), _) => {
                if let Some(handle) = browser.handle_for(entry) {
                    dispatcher.dispatch(Action::FileView(FileViewAction::Open {
                        handle,
                        tail: false,
                    }));
                }
                return;
            }
            (BrowserRow::Directory(_), Location::Shares) => return,
        };
        dispatcher.dispatch(Action::Browser(action));
    }

    /// Open the file under the cursor (or the newest file of a group) tailing
    fn tail_selected(&self, state: &AppState, dispatcher: &Dispatcher) {
        let browser = &state.browser;
        let handle = match browser.selected_row() {
            Some(BrowserRow::Group { key, .. }) => browser.newest_in_group(key),
            Some(row) => row.file_entry().and_then(|entry| browser.handle_for(entry)),
            None => None,
        };

        match handle {
            Some(handle) => {
                dispatcher.dispatch(Action::FileView(FileViewAction::Open { handle, tail: true }));
            }
            None => {
                dispatcher.dispatch(Action::StatusBar(StatusBarAction::warning(
                    StatusSource::Tail,
                    "Select a file or a log group to tail",
                )));
            }
        }
    }

    fn go_up(&self, state: &AppState, dispatcher: &Dispatcher) {
        if let Location::Directory { share, path } = &state.browser.location {
            let action = if path.is_empty() {
                BrowserAction::LoadShares
            } else {
                BrowserAction::LoadEntries {
                    share: share.clone(),
                    path: parent_path(path),
                    refresh: false,
                }
            };
            dispatcher.dispatch(Action::Browser(action));
        }
    }

    fn refresh_browser(&self, state: &AppState, dispatcher: &Dispatcher) {
        dispatcher.dispatch(Action::StatusBar(StatusBarAction::Clear));
        match &state.browser.location {
            Location::Shares => self.load_shares(true, dispatcher),
            Location::Directory { share, path } => {
                self.client.invalidate_share(share);
                dispatcher.dispatch(Action::Browser(BrowserAction::LoadEntries {
                    share: share.clone(),
                    path: path.clone(),
                    refresh: true,
                }));
            }
        }
    }

    fn start_tail(&mut self, state: &AppState, dispatcher: &Dispatcher) {
        if self.tail.is_some() {
            return;
        }

        let view = &state.file_view;
        let Some(handle) = view.handle.clone() else {
            return;
        };
        if view.loading != LoadingState::Loaded {
            dispatcher.dispatch(Action::StatusBar(StatusBarAction::warning(
                StatusSource::Tail,
                format!("{} is not loaded yet", handle),
            )));
            return;
        }

        let session_id = self.next_session_id;
        self.next_session_id += 1;

        let client: Arc<dyn ShareClient> = Arc::new(self.client.clone());
        let seed_length = view.loaded_length;
        let (session, mut events) = TailSession::start(
            self.runtime.handle(),
            client,
            handle.clone(),
            seed_length,
            self.tail_options,
        );

        // Forward session events into the action loop
        let forward = dispatcher.clone();
        self.runtime.spawn(async move {
            while let Some(event) = events.recv().await {
                forward.dispatch(Action::Tail(TailAction::Event { session_id, event }));
            }
            log::debug!("ShareMiddleware: tail session {} drained", session_id);
        });

        self.tail = Some((session_id, session));
        dispatcher.dispatch(Action::Tail(TailAction::Started {
            session_id,
            handle: handle.clone(),
            seed_length,
        }));
        dispatcher.dispatch(Action::StatusBar(StatusBarAction::running(
            StatusSource::Tail,
            format!(
                "Tailing {} every {}s",
                handle,
                self.tail_options.poll_interval.as_secs()
            ),
        )));
    }

    fn toggle_tail_pause(&self, dispatcher: &Dispatcher) {
        let Some((session_id, session)) = &self.tail else {
            return;
        };

        let paused = session.toggle_pause() == SessionState::Paused;
        dispatcher.dispatch(Action::Tail(TailAction::PauseChanged {
            session_id: *session_id,
            paused,
        }));
        let message = if paused { "Tail paused" } else { "Tail resumed" };
        dispatcher.dispatch(Action::StatusBar(StatusBarAction::info(
            StatusSource::Tail,
            message,
        )));
    }

    fn stop_tail(&mut self, dispatcher: &Dispatcher) {
        if let Some((session_id, session)) = self.tail.take() {
            session.stop();
            dispatcher.dispatch(Action::Tail(TailAction::Stopped { session_id }));
            dispatcher.dispatch(Action::StatusBar(StatusBarAction::info(
                StatusSource::Tail,
                "Tail stopped",
            )));
        }
    }
}

/// Response cache lifetime; values chrono cannot represent fall back to the default
fn cache_ttl(secs: u64) -> chrono::Duration {
    i64::try_from(secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .unwrap_or_else(|| {
            log::warn!("cache_ttl_secs = {} is out of range, using the default", secs);
            chrono::Duration::seconds(AppConfig::default().cache_ttl_secs as i64)
        })
}

impl Middleware for ShareMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        match action {
            Action::Browser(BrowserAction::LoadShares) => {
                self.load_shares(false, dispatcher);
                true
            }
            Action::Browser(BrowserAction::LoadEntries {
                share,
                path,
                refresh,
            }) => {
                self.load_entries(share, path, *refresh, dispatcher);
                true
            }
            Action::Browser(BrowserAction::Open) => {
                self.open_selected(state, dispatcher);
                false
            }
            Action::Browser(BrowserAction::Up) => {
                self.go_up(state, dispatcher);
                false
            }
            Action::Browser(BrowserAction::Refresh) => {
                self.refresh_browser(state, dispatcher);
                false
            }
            Action::Browser(BrowserAction::TailSelected) => {
                self.tail_selected(state, dispatcher);
                false
            }

            Action::FileView(FileViewAction::Open { handle, tail }) => {
                self.stop_tail(dispatcher);
                self.load_file(handle, *tail, dispatcher);
                true
            }
            Action::FileView(FileViewAction::Refresh) => {
                if let Some(handle) = state.file_view.handle.clone() {
                    let was_tailing = self.tail.is_some();
                    self.stop_tail(dispatcher);
                    self.client.invalidate_share(&handle.share);
                    dispatcher.dispatch(Action::FileView(FileViewAction::Open {
                        handle,
                        tail: was_tailing,
                    }));
                }
                false
            }
            Action::FileView(FileViewAction::Loaded { handle, tail, .. }) => {
                if *tail && state.file_view.handle.as_ref() == Some(handle) {
                    // Runs after the reducer has stored the loaded length
                    dispatcher.dispatch(Action::Tail(TailAction::Start));
                }
                true
            }

            Action::Tail(TailAction::Start) => {
                self.start_tail(state, dispatcher);
                false
            }
            Action::Tail(TailAction::TogglePause) => {
                self.toggle_tail_pause(dispatcher);
                false
            }
            Action::Tail(TailAction::Stop) => {
                self.stop_tail(dispatcher);
                false
            }

            Action::Global(GlobalAction::Close) => {
                let closing_file_view = state
                    .active_view()
                    .map(|v| v.view_id() == ViewId::FileView)
                    .unwrap_or(false);
                if closing_file_view {
                    self.stop_tail(dispatcher);
                }
                true
            }
            Action::Global(GlobalAction::Quit) => {
                self.stop_tail(dispatcher);
                true
            }

            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use std::fs;
    use std::io::Write;
    use std::time::{Duration, Instant};

    const NEWEST: &str = "app.log.2024-01-02";

    /// Temporary share root with one rotation family in `logs`
    fn share_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        fs::create_dir_all(logs.join("archive")).unwrap();
        fs::write(logs.join(NEWEST), "INFO first\n").unwrap();
        fs::write(logs.join("app.log.2024-01-01"), "INFO older\n").unwrap();
        fs::write(logs.join("notes.txt"), "hello\n").unwrap();
        dir
    }

    fn store_for(root: &std::path::Path) -> Store {
        let config = AppConfig {
            share_root: root.display().to_string(),
            poll_interval_secs: 1,
            ..AppConfig::default()
        };
        let mut store = Store::new(AppState::new(config.clone()));
        store.add_middleware(Box::new(ShareMiddleware::new(&config).unwrap()));
        store
    }

    /// Pump queued actions until `done` holds
    fn wait_until(store: &mut Store, done: impl Fn(&AppState) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            store.process_pending();
            if done(store.state()) {
                return;
            }
            assert!(Instant::now() < deadline, "timed out waiting for state");
            std::thread::sleep(Duration::from_millis(20));
        }
    }

    fn select_row(store: &mut Store, wanted: impl Fn(&BrowserRow) -> bool) {
        store.dispatch(Action::Browser(BrowserAction::NavigateToTop));
        while !store.state().browser.selected_row().map(&wanted).unwrap_or(false) {
            let before = store.state().browser.cursor;
            store.dispatch(Action::Browser(BrowserAction::NavigateNext));
            assert_ne!(before, store.state().browser.cursor, "row not found");
        }
    }

    fn open_logs_share(store: &mut Store) {
        store.dispatch(Action::Browser(BrowserAction::LoadShares));
        wait_until(store, |s| !s.browser.shares.is_empty());
        store.dispatch(Action::Browser(BrowserAction::Open));
        wait_until(store, |s| s.browser.current_share() == Some("logs") && !s.browser.loading);
    }

    #[test]
    fn test_browse_share_and_group_rotated_logs() {
        let root = share_root();
        let mut store = store_for(root.path());
        open_logs_share(&mut store);

        let rows = &store.state().browser.rows;
        assert!(matches!(&rows[0], BrowserRow::Directory(e) if e.name == "archive"));
        assert!(rows.iter().any(|r| matches!(
            r,
            BrowserRow::Group { key, member_count: 2, .. } if key == "app.log"
        )));

        store.dispatch(Action::Browser(BrowserAction::Up));
        wait_until(&mut store, |s| s.browser.location == Location::Shares);
    }

    #[test]
    fn test_tail_group_follows_appended_lines() {
        let root = share_root();
        let mut store = store_for(root.path());
        open_logs_share(&mut store);

        select_row(&mut store, |row| matches!(row, BrowserRow::Group { .. }));
        store.dispatch(Action::Browser(BrowserAction::TailSelected));
        wait_until(&mut store, |s| s.file_view.is_tailing());

        let state = store.state();
        assert_eq!(
            state.file_view.handle,
            Some(FileHandle::new("logs", NEWEST))
        );
        assert_eq!(state.active_view().map(|v| v.view_id()), Some(ViewId::FileView));

        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(root.path().join("logs").join(NEWEST))
            .unwrap();
        file.write_all(b"ERROR appended\n").unwrap();
        drop(file);

        wait_until(&mut store, |s| {
            s.file_view
                .lines
                .iter()
                .any(|line| line.text() == "ERROR appended")
        });

        store.dispatch(Action::Tail(TailAction::Stop));
        assert!(!store.state().file_view.is_tailing());
    }

    #[test]
    fn test_cache_ttl_out_of_range_uses_default() {
        assert_eq!(cache_ttl(45), chrono::Duration::seconds(45));
        let default = chrono::Duration::seconds(AppConfig::default().cache_ttl_secs as i64);
        assert_eq!(cache_ttl(u64::MAX), default);
        assert_eq!(cache_ttl(i64::MAX as u64), default);
    }

    #[test]
    fn test_tail_requires_loaded_file() {
        let root = share_root();
        let mut store = store_for(root.path());
        store.dispatch(Action::Tail(TailAction::Start));
        assert!(!store.state().file_view.is_tailing());
    }
}
