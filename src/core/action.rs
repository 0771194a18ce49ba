//! # Actions
//!
//! Everything that can happen in Zoid becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend answers? That's `Action::ResponseReceived { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing any I/O the caller must perform.
//! No side effects here. I/O happens in the TUI event loop.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::health::HealthReport;
use crate::core::message::{Message, MessageId};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The user submitted a prompt from the input box.
    Submit(String),
    /// A health probe finished.
    HealthChecked(HealthReport),
    /// The backend answered the request started for `request_id`.
    ResponseReceived { request_id: MessageId, text: String },
    /// The request started for `request_id` failed (transport, status or parse).
    ResponseFailed { request_id: MessageId, reason: String },
    ClearChat,
    Quit,
}

/// I/O requested by `update()`. Executed by the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// POST the prompt to `/generate`; report back with `request_id`.
    SpawnGenerate { request_id: MessageId, prompt: String },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if text.trim().is_empty() {
                debug!("Ignoring blank submission");
                return Effect::None;
            }
            if !app.is_online {
                debug!("Ignoring submission while offline");
                return Effect::None;
            }

            let request_id = app.allocate_id();
            app.push(Message::user(request_id, text.clone()));
            app.is_loading = true;
            app.status_message = format!("{} is thinking...", app.assistant_name);
            info!("Prompt {} submitted ({} bytes)", request_id, text.len());

            Effect::SpawnGenerate {
                request_id,
                prompt: text,
            }
        }
        Action::HealthChecked(report) => {
            if report.online != app.is_online {
                info!(
                    "Backend connectivity changed: {}",
                    if report.online { "online" } else { "offline" }
                );
            }
            app.is_online = report.online;
            app.backend_model = if report.online { report.model } else { None };
            if !app.is_loading {
                app.status_message = connectivity_status(app.is_online);
            }
            Effect::None
        }
        Action::ResponseReceived { request_id, text } => {
            info!("Response for {} received ({} bytes)", request_id, text.len());
            let id = app.allocate_id();
            app.push(Message::ai(id, text));
            finish_request(app);
            Effect::None
        }
        Action::ResponseFailed { request_id, reason } => {
            warn!("Request {} failed: {}", request_id, reason);
            let id = app.allocate_id();
            app.push(Message::ai_error(id));
            finish_request(app);
            Effect::None
        }
        Action::ClearChat => {
            info!("Clearing {} messages", app.messages().len());
            app.clear();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn finish_request(app: &mut App) {
    app.is_loading = false;
    app.status_message = connectivity_status(app.is_online);
}

fn connectivity_status(online: bool) -> String {
    if online { "Online" } else { "Offline" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{GENERATION_ERROR_TEXT, Sender};
    use crate::test_support::{online_app, test_app};

    fn submit(app: &mut App, text: &str) -> Effect {
        update(app, Action::Submit(text.to_string()))
    }

    #[test]
    fn submit_while_online_appends_user_message_and_spawns_request() {
        let mut app = online_app();
        let effect = submit(&mut app, "Hello");

        assert_eq!(app.messages().len(), 1);
        assert_eq!(app.messages()[0].sender(), Sender::User);
        assert_eq!(app.messages()[0].text(), "Hello");
        assert!(app.is_loading);
        assert_eq!(
            effect,
            Effect::SpawnGenerate {
                request_id: app.messages()[0].id(),
                prompt: "Hello".to_string(),
            }
        );
    }

    #[test]
    fn blank_submissions_never_mutate_the_list() {
        let mut app = online_app();
        for blank in ["", " ", "\n\t  ", "\n"] {
            assert_eq!(submit(&mut app, blank), Effect::None);
        }
        assert!(app.messages().is_empty());
        assert!(!app.is_loading);
        assert_eq!(app.revision(), 0);
    }

    #[test]
    fn submit_while_offline_is_a_no_op() {
        let mut app = test_app();
        assert_eq!(submit(&mut app, "Hello"), Effect::None);
        assert!(app.messages().is_empty());
        assert!(!app.is_loading);
    }

    #[test]
    fn success_appends_ai_message_and_clears_loading() {
        let mut app = online_app();
        let Effect::SpawnGenerate { request_id, .. } = submit(&mut app, "Hello") else {
            panic!("expected a generate request");
        };
        update(
            &mut app,
            Action::ResponseReceived {
                request_id,
                text: "Hi there".to_string(),
            },
        );

        let texts: Vec<_> = app.messages().iter().map(|m| (m.sender(), m.text())).collect();
        assert_eq!(texts, vec![(Sender::User, "Hello"), (Sender::Ai, "Hi there")]);
        assert!(!app.messages()[1].is_error());
        assert!(!app.is_loading);
    }

    #[test]
    fn failure_appends_error_message_and_clears_loading() {
        let mut app = online_app();
        let Effect::SpawnGenerate { request_id, .. } = submit(&mut app, "Hello") else {
            panic!("expected a generate request");
        };
        update(
            &mut app,
            Action::ResponseFailed {
                request_id,
                reason: "HTTP 500".to_string(),
            },
        );

        assert_eq!(app.messages().len(), 2);
        let reply = &app.messages()[1];
        assert_eq!(reply.sender(), Sender::Ai);
        assert_eq!(reply.text(), GENERATION_ERROR_TEXT);
        assert!(reply.is_error());
        assert!(!app.is_loading);
    }

    #[test]
    fn clear_chat_always_empties_the_list() {
        let mut app = online_app();
        update(&mut app, Action::ClearChat);
        assert!(app.messages().is_empty());

        submit(&mut app, "one");
        submit(&mut app, "two");
        update(&mut app, Action::ClearChat);
        assert!(app.messages().is_empty());
    }

    #[test]
    fn health_ok_enables_input_and_records_model() {
        let mut app = test_app();
        update(
            &mut app,
            Action::HealthChecked(HealthReport {
                online: true,
                model: Some("gpt2-hypercube".to_string()),
            }),
        );
        assert!(app.is_online);
        assert!(app.input_enabled());
        assert_eq!(app.backend_model.as_deref(), Some("gpt2-hypercube"));
        assert_eq!(app.status_message, "Online");
    }

    #[test]
    fn health_failure_disables_input_without_posting_a_message() {
        let mut app = online_app();
        update(&mut app, Action::HealthChecked(HealthReport::offline()));
        assert!(!app.is_online);
        assert!(!app.input_enabled());
        assert!(app.backend_model.is_none());
        assert!(app.messages().is_empty());
    }

    #[test]
    fn going_offline_mid_request_keeps_thinking_status() {
        let mut app = online_app();
        submit(&mut app, "Hello");
        update(&mut app, Action::HealthChecked(HealthReport::offline()));
        assert!(app.is_loading);
        assert_eq!(app.status_message, "Zoid is thinking...");
    }

    /// Overlapping sends are not serialized: whichever reply lands first is
    /// appended first and clears the loading flag while the other request is
    /// still in flight.
    #[test]
    fn overlapping_sends_resolve_in_arrival_order() {
        let mut app = online_app();
        let Effect::SpawnGenerate { request_id: first, .. } = submit(&mut app, "first") else {
            panic!("expected a generate request");
        };
        let Effect::SpawnGenerate { request_id: second, .. } = submit(&mut app, "second") else {
            panic!("expected a generate request");
        };
        assert_ne!(first, second);

        update(
            &mut app,
            Action::ResponseReceived {
                request_id: second,
                text: "reply to second".to_string(),
            },
        );
        assert!(!app.is_loading, "first resolution clears loading");

        update(
            &mut app,
            Action::ResponseReceived {
                request_id: first,
                text: "reply to first".to_string(),
            },
        );
        let texts: Vec<_> = app.messages().iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["first", "second", "reply to second", "reply to first"]);
    }

    #[test]
    fn quit_returns_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
