use crate::actions::{Action, FileViewAction, GlobalAction};
use crate::reducers::{browser_reducer, file_view_reducer, status_bar_reducer};
use crate::state::AppState;
use crate::views::{FileView, ViewId};

/// Root reducer that handles the view stack and orchestrates all sub-reducers
pub fn reduce(mut state: AppState, action: &Action) -> AppState {
    match action {
        Action::Global(GlobalAction::Quit) => {
            state.running = false;
            return state;
        }
        Action::Global(GlobalAction::Close) => {
            // Closing the last view quits the application
            if state.view_stack.len() > 1 {
                let popped = state.view_stack.pop();
                log::debug!("Closed view: {:?}", popped.map(|v| v.view_id()));
            } else {
                log::debug!("Closing last view - quitting application");
                state.running = false;
            }
        }
        Action::FileView(FileViewAction::Open { .. }) => {
            let file_view_active = state
                .active_view()
                .map(|v| v.view_id() == ViewId::FileView)
                .unwrap_or(false);
            if !file_view_active {
                log::debug!("Pushing file view onto stack");
                state.view_stack.push(Box::new(FileView::new()));
            }
        }
        _ => {}
    }

    state.browser = browser_reducer::reduce(state.browser, action);
    state.file_view = file_view_reducer::reduce(state.file_view, action);
    state.status_bar = status_bar_reducer::reduce(state.status_bar, action);

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use share_client::FileHandle;

    fn open(state: AppState) -> AppState {
        reduce(
            state,
            &Action::FileView(FileViewAction::Open {
                handle: FileHandle::new("logs", "app.log"),
                tail: false,
            }),
        )
    }

    #[test]
    fn test_open_pushes_file_view_once() {
        let state = open(open(AppState::default()));
        assert_eq!(state.view_stack.len(), 2);
        assert_eq!(
            state.active_view().map(|v| v.view_id()),
            Some(ViewId::FileView)
        );
    }

    #[test]
    fn test_close_pops_then_quits() {
        let state = open(AppState::default());
        let state = reduce(state, &Action::Global(GlobalAction::Close));
        assert!(state.running);
        assert_eq!(
            state.active_view().map(|v| v.view_id()),
            Some(ViewId::Browser)
        );

        let state = reduce(state, &Action::Global(GlobalAction::Close));
        assert!(!state.running);
    }
}
