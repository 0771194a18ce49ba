//! # Background Tasks
//!
//! The I/O half of the controller. `update()` decides *what* to do and
//! returns an `Effect`; the functions here do it on tokio tasks and report
//! back to the event loop as `Action`s over a channel.
//!
//! Every generate task reports exactly one outcome for its request id. If the
//! task dies before reporting (panic inside the client, runtime shutdown),
//! [`ReplyGuard`] posts a failure on drop so the loading flag never sticks.

use std::sync::Arc;
use std::sync::mpsc;

use log::{info, warn};
use tokio::task::JoinHandle;

use crate::backend::{Backend, GenerateRequest, HealthSubscription};
use crate::core::action::Action;
use crate::core::config::GenerateConfig;
use crate::core::message::MessageId;

/// Ask the backend for a reply and turn the outcome into an `Action`.
pub async fn request_reply(
    backend: &dyn Backend,
    request_id: MessageId,
    prompt: &str,
    extras: &GenerateConfig,
) -> Action {
    match backend
        .generate(GenerateRequest::with_extras(prompt, extras))
        .await
    {
        Ok(reply) => Action::ResponseReceived {
            request_id,
            text: reply.response,
        },
        Err(e) => Action::ResponseFailed {
            request_id,
            reason: e.to_string(),
        },
    }
}

/// Sends the outcome of one request, or a failure if dropped unsettled.
pub struct ReplyGuard {
    tx: mpsc::Sender<Action>,
    request_id: MessageId,
    settled: bool,
}

impl ReplyGuard {
    pub fn new(tx: mpsc::Sender<Action>, request_id: MessageId) -> Self {
        Self {
            tx,
            request_id,
            settled: false,
        }
    }

    pub fn settle(mut self, action: Action) {
        self.settled = true;
        if self.tx.send(action).is_err() {
            warn!(
                "Dropping outcome of {}: receiver dropped",
                self.request_id
            );
        }
    }
}

impl Drop for ReplyGuard {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!("Request {} ended without an outcome", self.request_id);
        let _ = self.tx.send(Action::ResponseFailed {
            request_id: self.request_id,
            reason: "request task ended without an outcome".to_string(),
        });
    }
}

/// Spawn the `/generate` round trip for `request_id`.
pub fn spawn_generate(
    backend: Arc<dyn Backend>,
    extras: GenerateConfig,
    request_id: MessageId,
    prompt: String,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!("Spawning generate request {}", request_id);
    tokio::spawn(async move {
        let guard = ReplyGuard::new(tx, request_id);
        let action = request_reply(backend.as_ref(), request_id, &prompt, &extras).await;
        guard.settle(action);
    })
}

/// Start the periodic health probe, forwarding each result as an `Action`.
pub fn spawn_health_probe(
    backend: Arc<dyn Backend>,
    period: std::time::Duration,
    tx: mpsc::Sender<Action>,
) -> HealthSubscription {
    HealthSubscription::start(backend, period, move |report| {
        if tx.send(Action::HealthChecked(report)).is_err() {
            warn!("Failed to forward health report: receiver dropped");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::probe;
    use crate::core::action::{Effect, update};
    use crate::core::state::App;
    use crate::test_support::{ScriptedBackend, test_app};
    use std::time::Duration;

    /// Run a submit through the reducer and, if it asks for one, the request.
    async fn submit(app: &mut App, backend: &dyn Backend, text: &str) {
        if let Effect::SpawnGenerate { request_id, prompt } =
            update(app, Action::Submit(text.to_string()))
        {
            let outcome = request_reply(backend, request_id, &prompt, &GenerateConfig::default()).await;
            update(app, outcome);
        }
    }

    #[tokio::test]
    async fn offline_submit_never_reaches_backend() {
        let backend = ScriptedBackend::unreachable();
        let mut app = test_app();
        update(&mut app, Action::HealthChecked(probe(&backend).await));
        assert!(!app.is_online);

        submit(&mut app, &backend, "Hello").await;
        assert_eq!(backend.calls(), 0);
        assert!(app.messages().is_empty());
    }

    #[tokio::test]
    async fn blank_submit_never_reaches_backend() {
        let backend = ScriptedBackend::answering("Hi");
        let mut app = test_app();
        update(&mut app, Action::HealthChecked(probe(&backend).await));
        assert!(app.is_online);

        submit(&mut app, &backend, "  \n\t ").await;
        assert_eq!(backend.calls(), 0);

        submit(&mut app, &backend, "Hello").await;
        assert_eq!(backend.calls(), 1);
        assert_eq!(app.messages().len(), 2);
        assert!(!app.is_loading);
    }

    #[tokio::test]
    async fn request_reply_maps_success() {
        let backend = ScriptedBackend::answering("Hi there");
        let action = request_reply(&backend, MessageId(1), "Hello", &GenerateConfig::default()).await;
        assert_eq!(
            action,
            Action::ResponseReceived {
                request_id: MessageId(1),
                text: "Hi there".to_string()
            }
        );
        assert_eq!(backend.last_prompt.lock().unwrap().as_deref(), Some("Hello"));
    }

    #[tokio::test]
    async fn request_reply_maps_api_failure() {
        let backend = ScriptedBackend::failing(500);
        let action = request_reply(&backend, MessageId(4), "Hello", &GenerateConfig::default()).await;
        assert!(matches!(
            action,
            Action::ResponseFailed { request_id: MessageId(4), ref reason } if reason.contains("500")
        ));
    }

    #[test]
    fn unsettled_guard_reports_failure() {
        let (tx, rx) = mpsc::channel();
        drop(ReplyGuard::new(tx, MessageId(9)));
        assert!(matches!(
            rx.try_recv(),
            Ok(Action::ResponseFailed { request_id: MessageId(9), .. })
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn settled_guard_reports_exactly_once() {
        let (tx, rx) = mpsc::channel();
        let guard = ReplyGuard::new(tx, MessageId(2));
        guard.settle(Action::ResponseReceived {
            request_id: MessageId(2),
            text: "ok".to_string(),
        });
        assert!(matches!(rx.try_recv(), Ok(Action::ResponseReceived { .. })));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn settling_after_receiver_dropped_does_not_panic() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        ReplyGuard::new(tx, MessageId(3)).settle(Action::ClearChat);
    }

    #[tokio::test]
    async fn spawn_generate_delivers_one_outcome() {
        let backend: Arc<dyn Backend> = Arc::new(ScriptedBackend::unreachable());
        let (tx, rx) = mpsc::channel();
        spawn_generate(backend, GenerateConfig::default(), MessageId(5), "Hi".into(), tx)
            .await
            .unwrap();
        assert!(matches!(
            rx.try_recv(),
            Ok(Action::ResponseFailed { request_id: MessageId(5), .. })
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn health_probe_forwards_reports() {
        let backend: Arc<dyn Backend> = Arc::new(ScriptedBackend::answering(""));
        let (tx, rx) = mpsc::channel();
        let mut subscription = spawn_health_probe(backend, Duration::from_secs(3600), tx);

        // First probe fires immediately.
        let mut received = None;
        for _ in 0..100 {
            if let Ok(action) = rx.try_recv() {
                received = Some(action);
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        subscription.dispose();

        match received {
            Some(Action::HealthChecked(report)) => {
                assert!(report.online);
                assert_eq!(report.model.as_deref(), Some("scripted-model"));
            }
            other => panic!("expected a health report, got {other:?}"),
        }
    }
}
