//! KeyboardMiddleware - translates keyboard events into context-aware actions
//!
//! ## Layer 1: Priority Keys
//! Keys that always work regardless of context (Ctrl+C, Esc).
//!
//! ## Layer 2: Capabilities
//! Views with TEXT_INPUT capability receive character keys as text input
//! instead of keybindings.
//!
//! ## Layer 3: Navigation and view keys
//! Vim-style navigation is translated by the active view, everything else
//! goes to the view's own keybindings.

use crate::actions::{Action, GlobalAction, NavigationAction, TextInputAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::AppState;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyboardMiddleware;

impl KeyboardMiddleware {
    pub fn new() -> Self {
        Self
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState, dispatcher: &Dispatcher) {
        let Some(view) = state.active_view() else {
            return;
        };
        let capabilities = view.capabilities(state);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // ═══════════════════════════════════════════════════════════════════
        // LAYER 1: Priority keys (always work)
        // ═══════════════════════════════════════════════════════════════════

        if ctrl && key.code == KeyCode::Char('c') {
            log::debug!("Layer 1: Ctrl+C - dispatching Quit");
            dispatcher.dispatch(Action::Global(GlobalAction::Quit));
            return;
        }

        // Esc: cancel input, then let the view step back, then close it
        if key.code == KeyCode::Esc {
            if capabilities.accepts_text_input() {
                log::debug!("Layer 1: Esc - routing to TextInput::Escape");
                dispatcher.dispatch(Action::TextInput(TextInputAction::Escape));
            } else if let Some(action) = view.translate_escape(state) {
                log::debug!("Layer 1: Esc - view handles escape");
                dispatcher.dispatch(action);
            } else {
                log::debug!("Layer 1: Esc - dispatching Close");
                dispatcher.dispatch(Action::Global(GlobalAction::Close));
            }
            return;
        }

        // ═══════════════════════════════════════════════════════════════════
        // LAYER 2: Capability-based routing
        // ═══════════════════════════════════════════════════════════════════

        if capabilities.accepts_text_input() {
            let input = match key.code {
                KeyCode::Char('u') if ctrl => Some(TextInputAction::ClearLine),
                KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                    Some(TextInputAction::Char(c))
                }
                KeyCode::Backspace => Some(TextInputAction::Backspace),
                KeyCode::Enter => Some(TextInputAction::Confirm),
                _ => None,
            };
            if let Some(input) = input {
                dispatcher.dispatch(Action::TextInput(input));
            }
            // Nothing else leaks out of a text prompt
            return;
        }

        // ═══════════════════════════════════════════════════════════════════
        // LAYER 3: Navigation and view keybindings
        // ═══════════════════════════════════════════════════════════════════

        if key.code == KeyCode::Char('q') && !ctrl {
            dispatcher.dispatch(Action::Global(GlobalAction::Quit));
            return;
        }

        if capabilities.supports_navigation() {
            if let Some(nav) = navigation_for(key, capabilities.supports_vim_navigation()) {
                if let Some(action) = view.translate_navigation(nav) {
                    dispatcher.dispatch(action);
                    return;
                }
            }
        }

        if let Some(action) = view.translate_key(key, state) {
            dispatcher.dispatch(action);
        } else {
            log::trace!("Unbound key {:?} in {:?}", key.code, view.view_id());
        }
    }
}

impl Default for KeyboardMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a key to generic navigation
fn navigation_for(key: KeyEvent, vim: bool) -> Option<NavigationAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let nav = match key.code {
        KeyCode::Down => NavigationAction::Next,
        KeyCode::Up => NavigationAction::Previous,
        KeyCode::PageDown => NavigationAction::PageDown,
        KeyCode::PageUp => NavigationAction::PageUp,
        KeyCode::Home => NavigationAction::ToTop,
        KeyCode::End => NavigationAction::ToBottom,
        KeyCode::Char('d') if ctrl => NavigationAction::PageDown,
        KeyCode::Char('u') if ctrl => NavigationAction::PageUp,
        KeyCode::Char('j') if vim => NavigationAction::Next,
        KeyCode::Char('k') if vim => NavigationAction::Previous,
        KeyCode::Char('g') if vim => NavigationAction::ToTop,
        KeyCode::Char('G') if vim => NavigationAction::ToBottom,
        _ => return None,
    };
    Some(nav)
}

impl Middleware for KeyboardMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        // Generic actions are translated by the active view
        match action {
            Action::Global(GlobalAction::KeyPressed(key)) => {
                self.handle_key(*key, state, dispatcher);
                false
            }
            Action::Navigate(nav) => {
                if let Some(action) = state
                    .active_view()
                    .and_then(|view| view.translate_navigation(*nav))
                {
                    dispatcher.dispatch(action);
                }
                false
            }
            Action::TextInput(input) => {
                if let Some(action) = state
                    .active_view()
                    .and_then(|view| view.translate_text_input(input.clone()))
                {
                    dispatcher.dispatch(action);
                }
                false
            }
            _ => true,
        }
    }
}
