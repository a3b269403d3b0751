//! Status Bar Reducer

use crate::actions::{Action, StatusBarAction, TailAction};
use crate::state::{StatusBarState, StatusKind, StatusMessage, StatusSource};

pub fn reduce(mut state: StatusBarState, action: &Action) -> StatusBarState {
    match action {
        Action::StatusBar(StatusBarAction::Show {
            kind,
            source,
            message,
        }) => {
            state.show(StatusMessage::new(*kind, *source, message.clone()));
        }
        Action::StatusBar(StatusBarAction::Clear) => {
            state.clear();
        }
        // Failed polls and resyncs are reported; the next batch of lines retires them
        Action::Tail(TailAction::Event { event, .. }) => match &event.status {
            Some(status) => state.show(StatusMessage::new(
                StatusKind::Warning,
                StatusSource::Tail,
                status.clone(),
            )),
            None => state.clear_tail_warning(),
        },
        _ => {}
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use share_log_parser::StyledLine;
    use share_tail::TailEvent;

    fn tail_event(status: Option<&str>) -> Action {
        Action::Tail(TailAction::Event {
            session_id: 1,
            event: TailEvent {
                lines: vec![StyledLine::plain("line")],
                status: status.map(str::to_string),
                observed_length: 0,
                updated_at: Local::now(),
            },
        })
    }

    #[test]
    fn test_show_and_clear() {
        let state = reduce(
            StatusBarState::default(),
            &Action::StatusBar(StatusBarAction::error(StatusSource::File, "boom")),
        );
        let latest = state.latest().unwrap();
        assert_eq!(latest.kind, StatusKind::Error);
        assert_eq!(latest.source, StatusSource::File);
        assert_eq!(latest.message, "boom");

        let state = reduce(state, &Action::StatusBar(StatusBarAction::Clear));
        assert!(state.latest().is_none());
    }

    #[test]
    fn test_newer_message_replaces_older() {
        let mut state = StatusBarState::default();
        for i in 0..3 {
            state = reduce(
                state,
                &Action::StatusBar(StatusBarAction::info(StatusSource::Browser, format!("m{}", i))),
            );
        }
        assert_eq!(state.latest().unwrap().message, "m2");
    }

    #[test]
    fn test_tail_warning_clears_once_lines_arrive() {
        let state = reduce(
            StatusBarState::default(),
            &tail_event(Some("Fetch failed: timeout; retrying")),
        );
        assert!(state.latest().unwrap().is_tail_warning());

        let state = reduce(state, &tail_event(None));
        assert!(state.latest().is_none());
    }

    #[test]
    fn test_tail_lines_keep_other_messages() {
        let state = reduce(
            StatusBarState::default(),
            &Action::StatusBar(StatusBarAction::error(StatusSource::Browser, "listing failed")),
        );
        let state = reduce(state, &tail_event(None));
        assert_eq!(state.latest().unwrap().message, "listing failed");
    }
}
