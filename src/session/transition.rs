//! Pure state transition function

use super::{Effect, Event, SessionPhase};
use crate::session::state::{ChatPhase, UploadPhase};
use std::path::PathBuf;
use thiserror::Error;

/// Result of a state transition.
#[derive(Debug)]
pub struct TransitionResult {
    pub new_phase: SessionPhase,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(phase: SessionPhase) -> Self {
        Self {
            new_phase: phase,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Precondition violations. The UI prevents these by disabling the triggering
/// affordance; the runtime drops them without surfacing a fault.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("no file selected")]
    NoFileSelected,
    #[error("a request is already in flight")]
    RequestInFlight,
    #[error("draft is empty")]
    EmptyDraft,
    #[error("no document uploaded yet")]
    NoDocument,
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function.
///
/// Given the same phase and event this always produces the same new phase
/// and effect list, with no I/O. Rejected events produce no effects at all.
pub fn transition(
    phase: &SessionPhase,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (phase, event) {
        // ============================================================
        // Upload workflow: selecting a candidate file
        // ============================================================

        // Selecting replaces the candidate and clears any earlier failure.
        // An emptied path deselects.
        (
            SessionPhase::Upload(UploadPhase::Idle | UploadPhase::Selected { .. }),
            Event::FileChosen { path },
        ) => {
            let next = if path.trim().is_empty() {
                UploadPhase::Idle
            } else {
                UploadPhase::Selected {
                    file: PathBuf::from(path),
                }
            };
            Ok(TransitionResult::new(SessionPhase::Upload(next)).with_effect(Effect::ClearNotices))
        }

        (SessionPhase::Upload(UploadPhase::Uploading { .. }), Event::FileChosen { .. }) => {
            Err(TransitionError::RequestInFlight)
        }

        // ============================================================
        // Upload workflow: the upload exchange
        // ============================================================
        (SessionPhase::Upload(UploadPhase::Selected { file }), Event::UploadRequested) => Ok(
            TransitionResult::new(SessionPhase::Upload(UploadPhase::Uploading {
                file: file.clone(),
            }))
            .with_effect(Effect::ClearNotices)
            .with_effect(Effect::Upload { file: file.clone() }),
        ),

        (SessionPhase::Upload(UploadPhase::Idle), Event::UploadRequested) => {
            Err(TransitionError::NoFileSelected)
        }

        (SessionPhase::Upload(UploadPhase::Uploading { .. }), Event::UploadRequested) => {
            Err(TransitionError::RequestInFlight)
        }

        // Success adopts the identifier and switches to the conversation
        // workflow with an empty transcript.
        (
            SessionPhase::Upload(UploadPhase::Uploading { .. }),
            Event::UploadCompleted { document, message },
        ) => {
            let mut result = TransitionResult::new(SessionPhase::Chat {
                document,
                phase: ChatPhase::Composing,
            });
            if let Some(message) = message {
                result = result.with_effect(Effect::set_status(message));
            }
            Ok(result)
        }

        // Failure returns to Selected with the error set; the identifier
        // stays unadopted and no retry happens automatically.
        (
            SessionPhase::Upload(UploadPhase::Uploading { file }),
            Event::UploadFailed { message },
        ) => Ok(TransitionResult::new(SessionPhase::Upload(
            UploadPhase::Selected { file: file.clone() },
        ))
        .with_effect(Effect::set_error(message))),

        // ============================================================
        // Conversation workflow: composing
        // ============================================================
        (
            SessionPhase::Chat {
                document,
                phase: ChatPhase::Composing,
            },
            Event::DraftChanged { text },
        ) => Ok(TransitionResult::new(SessionPhase::Chat {
            document: document.clone(),
            phase: ChatPhase::Composing,
        })
        .with_effect(Effect::SetDraft { text })),

        // Input is disabled while a question is in flight.
        (
            SessionPhase::Chat {
                phase: ChatPhase::Sending,
                ..
            },
            Event::DraftChanged { .. },
        ) => Err(TransitionError::RequestInFlight),

        // ============================================================
        // Conversation workflow: the question exchange
        // ============================================================

        // The user message is appended before the round trip completes, so
        // it is never lost to network latency. The transcript may therefore
        // transiently hold one user turn with no matching bot turn.
        (
            SessionPhase::Chat {
                document,
                phase: ChatPhase::Composing,
            },
            Event::SendRequested { question },
        ) => {
            if question.trim().is_empty() {
                return Err(TransitionError::EmptyDraft);
            }
            Ok(TransitionResult::new(SessionPhase::Chat {
                document: document.clone(),
                phase: ChatPhase::Sending,
            })
            .with_effects([
                Effect::ClearNotices,
                Effect::append_user(question.clone()),
                Effect::Ask {
                    document: document.clone(),
                    question,
                },
            ]))
        }

        (
            SessionPhase::Chat {
                phase: ChatPhase::Sending,
                ..
            },
            Event::SendRequested { .. },
        ) => Err(TransitionError::RequestInFlight),

        (
            SessionPhase::Chat {
                document,
                phase: ChatPhase::Sending,
            },
            Event::AnswerReceived { answer, sources },
        ) => {
            let mut result = TransitionResult::new(SessionPhase::Chat {
                document: document.clone(),
                phase: ChatPhase::Composing,
            })
            .with_effect(Effect::append_bot(answer))
            .with_effect(Effect::ClearDraft);
            if sources > 0 {
                result = result.with_effect(Effect::set_status(format!(
                    "answer drew on {sources} source passage{}",
                    if sources == 1 { "" } else { "s" }
                )));
            }
            Ok(result)
        }

        // The optimistic user turn stays in the transcript; the draft is
        // left intact for a manual retry.
        (
            SessionPhase::Chat {
                document,
                phase: ChatPhase::Sending,
            },
            Event::AskFailed { message },
        ) => Ok(TransitionResult::new(SessionPhase::Chat {
            document: document.clone(),
            phase: ChatPhase::Composing,
        })
        .with_effect(Effect::set_error(message))),

        // ============================================================
        // Events outside the active workflow
        // ============================================================
        (
            SessionPhase::Upload(_),
            Event::DraftChanged { .. } | Event::SendRequested { .. },
        ) => Err(TransitionError::NoDocument),

        (phase, event) => Err(TransitionError::InvalidTransition(format!(
            "{event:?} in {phase:?}"
        ))),
    }
}
