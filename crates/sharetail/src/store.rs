use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::reducers::app_reducer::reduce;
use crate::state::AppState;
use std::sync::mpsc::{self, Receiver};

/// Store - holds application state and manages the action loop
pub struct Store {
    state: AppState,
    middleware: Vec<Box<dyn Middleware>>,
    dispatcher: Dispatcher,
    action_rx: Receiver<Action>,
}

impl Store {
    pub fn new(initial_state: AppState) -> Self {
        let (action_tx, action_rx) = mpsc::channel();
        Self {
            state: initial_state,
            middleware: Vec::new(),
            dispatcher: Dispatcher::new(action_tx),
            action_rx,
        }
    }

    /// Add middleware to the store; they run in insertion order
    pub fn add_middleware(&mut self, middleware: Box<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Process an action through middleware chain and reducer, then drain
    /// whatever the middleware queued
    pub fn dispatch(&mut self, action: Action) {
        self.process(action);
        self.process_pending();
    }

    /// Drain actions queued by middleware and async tasks
    pub fn process_pending(&mut self) {
        while let Ok(action) = self.action_rx.try_recv() {
            self.process(action);
        }
    }

    fn process(&mut self, action: Action) {
        let mut should_reduce = true;

        for middleware in &mut self.middleware {
            if !middleware.handle(&action, &self.state, &self.dispatcher) {
                should_reduce = false;
                break;
            }
        }

        if should_reduce {
            self.state = reduce(std::mem::take(&mut self.state), &action);
        }
    }
}
