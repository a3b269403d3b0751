//! Tail Actions
//!
//! Live tailing of the file shown in the file view.

use share_client::FileHandle;
use share_tail::TailEvent;

#[derive(Debug, Clone)]
pub enum TailAction {
    /// Start tailing the open file from its loaded length (t)
    Start,
    /// Session running (dispatched by share middleware)
    Started {
        session_id: u64,
        handle: FileHandle,
        seed_length: u64,
    },
    /// Pause or resume polling (p)
    TogglePause,
    /// Polling paused or resumed (dispatched by share middleware)
    PauseChanged { session_id: u64, paused: bool },
    /// Stop tailing (Esc)
    Stop,
    /// Session stopped (dispatched by share middleware)
    Stopped { session_id: u64 },
    /// Lines or a status notice from a session
    Event { session_id: u64, event: TailEvent },
}
