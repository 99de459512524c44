//! Session state types

use crate::session::effect::Effect;
use crate::session::event::Event;
use crate::session::transition::{transition, TransitionError};
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// Document Identifier
// ============================================================================

/// Opaque server-assigned document identifier.
///
/// Born when an upload succeeds, immutable for the lifetime of the session.
/// The only constraint enforced client-side is non-emptiness; the token's
/// format belongs to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Returns `None` for an empty or whitespace-only token.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Transcript
// ============================================================================

/// Who produced a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One turn of the conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

/// Append-only ordered sequence of messages for one document session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript(Vec<Message>);

impl Transcript {
    pub fn push(&mut self, sender: Sender, text: impl Into<String>) {
        self.0.push(Message {
            sender,
            text: text.into(),
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    #[allow(dead_code)] // Used by tests
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[allow(dead_code)] // Used by tests
    pub fn user_count(&self) -> usize {
        self.0.iter().filter(|m| m.sender == Sender::User).count()
    }

    #[allow(dead_code)] // Used by tests
    pub fn bot_count(&self) -> usize {
        self.0.iter().filter(|m| m.sender == Sender::Bot).count()
    }

    /// The trailing user turn that has no answer yet, if any.
    #[allow(dead_code)] // Used by tests
    pub fn pending_turn(&self) -> Option<&Message> {
        self.0.last().filter(|m| m.sender == Sender::User)
    }
}

// ============================================================================
// Session Phase
// ============================================================================

/// Upload workflow state. A request is in flight exactly in `Uploading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPhase {
    /// No candidate file chosen yet.
    Idle,
    /// A candidate file is chosen; submit is callable.
    Selected { file: PathBuf },
    /// One upload exchange is in flight.
    Uploading { file: PathBuf },
}

/// Conversation workflow state. A request is in flight exactly in `Sending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    Composing,
    Sending,
}

/// Composed controller state: which workflow is active, and where it stands.
///
/// The adopted identifier lives inside the `Chat` variant, so no transition
/// can change it without tearing down the phase wholesale -- and none does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Upload(UploadPhase),
    Chat {
        document: DocumentId,
        phase: ChatPhase,
    },
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::Upload(UploadPhase::Idle)
    }
}

impl SessionPhase {
    /// Whether a request is currently in flight in the active workflow.
    pub fn in_flight(&self) -> bool {
        matches!(
            self,
            SessionPhase::Upload(UploadPhase::Uploading { .. })
                | SessionPhase::Chat {
                    phase: ChatPhase::Sending,
                    ..
                }
        )
    }

    /// The adopted document identifier, once the conversation is active.
    #[allow(dead_code)] // Used by tests
    pub fn document(&self) -> Option<&DocumentId> {
        match self {
            SessionPhase::Upload(_) => None,
            SessionPhase::Chat { document, .. } => Some(document),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// The full client-side session: controller phase plus the state both
/// workflows read and write through effects.
///
/// Mutated only by `handle`, which runs the pure transition and applies the
/// resulting data effects. I/O effects are returned to the caller (the
/// runtime) for execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    phase: SessionPhase,
    transcript: Transcript,
    draft: String,
    draft_epoch: u64,
    last_error: Option<String>,
    status: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // Accessors for tests; the runtime reads state through `snapshot`.
    #[allow(dead_code)]
    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    #[allow(dead_code)]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    #[allow(dead_code)]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[allow(dead_code)]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[allow(dead_code)]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Run one event through the pure transition and apply its data effects.
    ///
    /// Returns the I/O effects (`Upload`, `Ask`) for the caller to execute.
    /// On a rejected event the session is left untouched.
    pub fn handle(&mut self, event: Event) -> Result<Vec<Effect>, TransitionError> {
        let result = transition(&self.phase, event)?;
        self.phase = result.new_phase;

        let mut io = Vec::new();
        for effect in result.effects {
            if let Some(effect) = self.apply(effect) {
                io.push(effect);
            }
        }
        Ok(io)
    }

    /// Apply a data effect, or hand back an I/O effect untouched.
    fn apply(&mut self, effect: Effect) -> Option<Effect> {
        match effect {
            Effect::Append { sender, text } => {
                self.transcript.push(sender, text);
                None
            }
            Effect::SetDraft { text } => {
                self.draft = text;
                None
            }
            Effect::ClearDraft => {
                self.draft.clear();
                self.draft_epoch += 1;
                None
            }
            Effect::SetError { message } => {
                self.last_error = Some(message);
                None
            }
            Effect::ClearNotices => {
                self.last_error = None;
                self.status = None;
                None
            }
            Effect::SetStatus { message } => {
                self.status = Some(message);
                None
            }
            io @ (Effect::Upload { .. } | Effect::Ask { .. }) => Some(io),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase.clone(),
            transcript: self.transcript.clone(),
            draft: self.draft.clone(),
            draft_epoch: self.draft_epoch,
            last_error: self.last_error.clone(),
            status: self.status.clone(),
        }
    }
}

/// Cloneable render view of the session, published to the UI on every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub transcript: Transcript,
    pub draft: String,
    /// Bumped whenever the runtime clears the draft, so the UI can reconcile
    /// its local echo buffer.
    pub draft_epoch: u64,
    pub last_error: Option<String>,
    pub status: Option<String>,
}

impl SessionSnapshot {
    pub fn in_flight(&self) -> bool {
        self.phase.in_flight()
    }
}
