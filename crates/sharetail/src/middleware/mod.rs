use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::state::AppState;

pub mod keyboard_middleware;
pub mod logging_middleware;
pub mod share_middleware;

pub use keyboard_middleware::KeyboardMiddleware;
pub use logging_middleware::LoggingMiddleware;
pub use share_middleware::ShareMiddleware;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Middleware runs on the UI thread, so anything slow (listing a share,
/// fetching a file) is spawned onto a runtime and reports back through the
/// dispatcher.
pub trait Middleware: Send {
    /// Handle an action
    ///
    /// - `action`: The action to process
    /// - `state`: Current application state (read-only snapshot)
    /// - `dispatcher`: Use to dispatch actions that should re-enter middleware chain
    ///
    /// Returns `true` to continue chain, `false` to consume action
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool;
}
