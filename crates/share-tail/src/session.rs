//! Live tailing session
//!
//! A [`TailSession`] polls one remote file on a fixed interval and pushes
//! highlighted lines to its owner through an unbounded channel. The owner
//! controls it through pause/resume/stop; stopping is terminal.
//!
//! ```text
//! owner ──watch(SessionState)──► run loop ──tick──► TailPoller::poll()
//!   ▲                                                    │
//!   └──────────────── mpsc(TailEvent) ◄──────────────────┘
//! ```

use crate::delta::fetch_delta;
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use share_client::{FileHandle, ShareClient};
use share_log_parser::{highlight_line, status_line, StyledLine};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Default time between polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Lifecycle of a session. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Paused,
    Stopped,
}

/// Snapshot of what a session knows about its file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailState {
    pub handle: FileHandle,
    /// Bytes of the file already shown
    pub observed_length: u64,
    pub paused: bool,
    pub last_poll: Option<DateTime<Local>>,
}

impl TailState {
    fn new(handle: FileHandle, observed_length: u64) -> Self {
        Self {
            handle,
            observed_length,
            paused: false,
            last_poll: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailOptions {
    pub poll_interval: Duration,
}

impl Default for TailOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Lines (or a status notice) produced by one poll
#[derive(Debug, Clone, PartialEq)]
pub struct TailEvent {
    pub lines: Vec<StyledLine>,
    /// Set for errors and resyncs; `lines` then holds the matching status line
    pub status: Option<String>,
    pub observed_length: u64,
    pub updated_at: DateTime<Local>,
}

impl TailEvent {
    pub fn is_status(&self) -> bool {
        self.status.is_some()
    }
}

/// Per-tick tailing logic, independent of any timer
pub struct TailPoller {
    client: Arc<dyn ShareClient>,
    state: TailState,
    /// Bytes after the last newline, held until the line is complete
    partial: Vec<u8>,
}

impl TailPoller {
    pub fn new(client: Arc<dyn ShareClient>, handle: FileHandle, seed_length: u64) -> Self {
        Self {
            client,
            state: TailState::new(handle, seed_length),
            partial: Vec::new(),
        }
    }

    pub fn state(&self) -> &TailState {
        &self.state
    }

    /// Run one cycle; `None` when there is nothing to show
    pub async fn poll(&mut self) -> Option<TailEvent> {
        let now = Local::now();
        self.state.last_poll = Some(now);

        let delta = match fetch_delta(
            self.client.as_ref(),
            &self.state.handle,
            self.state.observed_length,
        )
        .await
        {
            Ok(delta) => delta,
            Err(e) => {
                warn!("Tail poll of {} failed: {}", self.state.handle, e);
                return Some(self.status_event(format!("Fetch failed: {}; retrying", e), now));
            }
        };

        if delta.resynced {
            self.state.observed_length = delta.new_length;
            self.partial.clear();
            return Some(self.status_event(
                format!(
                    "File truncated or rotated; resumed at byte {}",
                    delta.new_length
                ),
                now,
            ));
        }

        if delta.is_empty() {
            // An idle cycle means the writer is not mid-line
            if self.partial.is_empty() {
                return None;
            }
            let pending = std::mem::take(&mut self.partial);
            return self.lines_event(&pending, now);
        }

        self.state.observed_length = delta.new_length;
        self.partial.extend_from_slice(&delta.new_bytes);

        let complete = match self.partial.iter().rposition(|&b| b == b'\n') {
            Some(idx) => {
                let rest = self.partial.split_off(idx + 1);
                std::mem::replace(&mut self.partial, rest)
            }
            None => return None,
        };
        self.lines_event(&complete, now)
    }

    fn lines_event(&self, bytes: &[u8], now: DateTime<Local>) -> Option<TailEvent> {
        let lines: Vec<StyledLine> = String::from_utf8_lossy(bytes)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(highlight_line)
            .collect();

        if lines.is_empty() {
            return None;
        }
        debug!("{} new lines from {}", lines.len(), self.state.handle);
        Some(TailEvent {
            lines,
            status: None,
            observed_length: self.state.observed_length,
            updated_at: now,
        })
    }

    fn status_event(&self, message: String, now: DateTime<Local>) -> TailEvent {
        TailEvent {
            lines: vec![status_line(message.clone())],
            status: Some(message),
            observed_length: self.state.observed_length,
            updated_at: now,
        }
    }
}

/// Handle to a running tail task
///
/// Dropping the session stops it.
pub struct TailSession {
    control: watch::Sender<SessionState>,
    shared: Arc<Mutex<TailState>>,
    task: JoinHandle<()>,
}

impl TailSession {
    /// Spawn a session on `runtime`, starting `Running` at `seed_length`
    pub fn start(
        runtime: &Handle,
        client: Arc<dyn ShareClient>,
        handle: FileHandle,
        seed_length: u64,
        options: TailOptions,
    ) -> (Self, mpsc::UnboundedReceiver<TailEvent>) {
        info!(
            "Tailing {} from byte {} every {:?}",
            handle, seed_length, options.poll_interval
        );

        let (control, control_rx) = watch::channel(SessionState::Running);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let poller = TailPoller::new(client, handle, seed_length);
        let shared = Arc::new(Mutex::new(poller.state().clone()));

        let task = runtime.spawn(run(
            poller,
            control_rx,
            events_tx,
            shared.clone(),
            options.poll_interval,
        ));

        (
            Self {
                control,
                shared,
                task,
            },
            events_rx,
        )
    }

    pub fn session_state(&self) -> SessionState {
        *self.control.borrow()
    }

    pub fn is_paused(&self) -> bool {
        self.session_state() == SessionState::Paused
    }

    pub fn is_stopped(&self) -> bool {
        self.session_state() == SessionState::Stopped
    }

    /// Whether the polling task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Latest known tail state
    pub fn snapshot(&self) -> TailState {
        let mut state = self
            .shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        state.paused = self.is_paused();
        state
    }

    pub fn pause(&self) {
        self.transition(SessionState::Running, SessionState::Paused);
    }

    pub fn resume(&self) {
        self.transition(SessionState::Paused, SessionState::Running);
    }

    /// Flip between running and paused; returns the new state
    pub fn toggle_pause(&self) -> SessionState {
        self.control.send_if_modified(|state| match *state {
            SessionState::Running => {
                *state = SessionState::Paused;
                true
            }
            SessionState::Paused => {
                *state = SessionState::Running;
                true
            }
            SessionState::Stopped => false,
        });
        self.session_state()
    }

    /// Stop polling. Idempotent; once this returns no further event is sent.
    pub fn stop(&self) {
        if self.control.send_replace(SessionState::Stopped) != SessionState::Stopped {
            info!("Stopped tailing {}", self.snapshot().handle);
        }
    }

    fn transition(&self, from: SessionState, to: SessionState) {
        self.control.send_if_modified(|state| {
            if *state == from {
                *state = to;
                true
            } else {
                false
            }
        });
    }
}

impl Drop for TailSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Resolves once the session is stopped or its owner is gone
async fn stopped(control: &mut watch::Receiver<SessionState>) {
    let _ = control
        .wait_for(|state| *state == SessionState::Stopped)
        .await;
}

async fn run(
    mut poller: TailPoller,
    mut control: watch::Receiver<SessionState>,
    events: mpsc::UnboundedSender<TailEvent>,
    shared: Arc<Mutex<TailState>>,
    poll_interval: Duration,
) {
    let mut ticker = interval_at(Instant::now() + poll_interval, poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            changed = control.changed() => {
                if changed.is_err() || *control.borrow_and_update() == SessionState::Stopped {
                    break;
                }
            }
            _ = ticker.tick() => {
                match *control.borrow() {
                    SessionState::Running => {}
                    SessionState::Paused => continue,
                    SessionState::Stopped => break,
                }

                let event = tokio::select! {
                    event = poller.poll() => event,
                    _ = stopped(&mut control) => {
                        debug!("Discarding in-flight poll of {}", poller.state().handle);
                        break;
                    }
                };

                // Holding the read guard makes stop() wait for the send below
                let delivered = {
                    let state = control.borrow();
                    if *state == SessionState::Stopped {
                        false
                    } else {
                        *shared.lock().unwrap_or_else(PoisonError::into_inner) =
                            poller.state().clone();
                        match event {
                            Some(event) => events.send(event).is_ok(),
                            None => true,
                        }
                    }
                };
                if !delivered {
                    break;
                }
            }
        }
    }

    debug!("Tail loop for {} exited", poller.state().handle);
}
