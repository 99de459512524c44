//! Session runtime executor

use crate::backend::Collaborator;
use crate::session::{DocumentId, Effect, Event, Session, SessionSnapshot};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Owns the `Session` and is its only writer.
///
/// Events from the UI and from backend completions serialize through one
/// `mpsc` channel; each is run through the pure transition, data effects are
/// applied, and I/O effects spawn backend calls whose completions re-enter
/// the same channel. After every event a fresh snapshot is published for the
/// UI.
pub struct SessionRuntime<C: Collaborator + 'static> {
    session: Session,
    backend: Arc<C>,
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

/// The UI's side of the runtime: send events, observe snapshots.
#[derive(Clone)]
pub struct SessionHandle {
    events: mpsc::Sender<Event>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    pub async fn send(&self, event: Event) {
        if self.events.send(event).await.is_err() {
            tracing::warn!("session runtime is gone, dropping event");
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Block until the published snapshot satisfies `predicate`.
    #[allow(dead_code)] // Test synchronization helper
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> SessionSnapshot {
        let waited = self
            .snapshots
            .wait_for(predicate)
            .await
            .map(|snapshot| snapshot.clone());
        match waited {
            Ok(snapshot) => snapshot,
            // The runtime stopped; the last published snapshot stands.
            Err(_) => self.snapshots.borrow().clone(),
        }
    }
}

impl<C: Collaborator + 'static> SessionRuntime<C> {
    pub fn new(backend: C) -> (Self, SessionHandle) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let session = Session::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());

        let handle = SessionHandle {
            events: event_tx.clone(),
            snapshots: snapshot_rx,
        };
        let runtime = Self {
            session,
            backend: Arc::new(backend),
            event_rx,
            event_tx,
            snapshot_tx,
        };
        (runtime, handle)
    }

    pub async fn run(mut self) {
        tracing::info!("session runtime started");

        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event);
            // Publish after every event so the UI tracks each change.
            let _ = self.snapshot_tx.send(self.session.snapshot());
        }

        tracing::info!("session runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        tracing::debug!(?event, "processing event");
        match self.session.handle(event) {
            Ok(effects) => {
                for effect in effects {
                    self.execute_effect(effect);
                }
            }
            // Precondition violations are prevented by disabled UI
            // affordances; anything that still slips through (a stale key
            // press racing a completion) is dropped, not surfaced.
            Err(e) => tracing::debug!(error = %e, "event rejected"),
        }
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Upload { file } => self.spawn_upload(file),
            Effect::Ask { document, question } => self.spawn_ask(document, question),
            // Data effects were applied by the session already.
            other => tracing::warn!(effect = ?other, "unexpected effect reached the executor"),
        }
    }

    fn spawn_upload(&self, file: PathBuf) {
        let backend = Arc::clone(&self.backend);
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = match backend.upload(&file).await {
                Ok(response) => match DocumentId::new(response.document_id) {
                    Some(document) => Event::UploadCompleted {
                        document,
                        message: response.message,
                    },
                    None => Event::UploadFailed {
                        message: "Upload failed: server returned an empty document id".to_string(),
                    },
                },
                Err(e) => {
                    tracing::warn!(kind = ?e.kind, error = %e, "upload exchange failed");
                    Event::UploadFailed {
                        message: e.to_string(),
                    }
                }
            };
            let _ = event_tx.send(event).await;
        });
    }

    fn spawn_ask(&self, document: DocumentId, question: String) {
        let backend = Arc::clone(&self.backend);
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = match backend.ask(&document, &question).await {
                Ok(response) => {
                    if let Some(best) = response.context.iter().map(|c| c.score).reduce(f64::max) {
                        tracing::debug!(
                            chunks = response.context.len(),
                            best_score = best,
                            "answer grounded in retrieval context"
                        );
                    }
                    Event::AnswerReceived {
                        answer: response.answer,
                        sources: response.context.len(),
                    }
                }
                Err(e) => {
                    tracing::warn!(kind = ?e.kind, error = %e, "question exchange failed");
                    Event::AskFailed {
                        message: e.to_string(),
                    }
                }
            };
            let _ = event_tx.send(event).await;
        });
    }
}
