//! Dispatcher for middleware action dispatch
//!
//! Actions dispatched here are queued and re-enter the middleware chain from
//! the beginning on the next pass of the main loop. The dispatcher is cheap
//! to clone and `Send`, so async tasks use it to report results.

use crate::actions::Action;
use std::sync::mpsc::Sender;

#[derive(Clone)]
pub struct Dispatcher {
    action_tx: Sender<Action>,
}

impl Dispatcher {
    pub fn new(action_tx: Sender<Action>) -> Self {
        Self { action_tx }
    }

    /// Queue an action to be processed through the middleware chain
    pub fn dispatch(&self, action: Action) {
        if let Err(e) = self.action_tx.send(action) {
            log::error!("Dispatcher: failed to send action: {}", e);
        }
    }
}
