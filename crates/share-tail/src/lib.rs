//! Live tailing of growing remote files
//!
//! - [`fetch_delta`]: fetch only the bytes appended since the last poll
//! - [`TailPoller`]: one polling cycle, turning new bytes into highlighted lines
//! - [`TailSession`]: the poller on a timer, with pause/resume/stop control

mod delta;
mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use delta::{fetch_delta, Delta};
pub use session::{
    SessionState, TailEvent, TailOptions, TailPoller, TailSession, TailState,
    DEFAULT_POLL_INTERVAL,
};
