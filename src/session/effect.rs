//! Effects produced by state transitions
//!
//! Data effects are applied to the `Session` directly; `Upload` and `Ask`
//! are I/O and are executed by the runtime, whose completions come back as
//! new events.

use crate::session::state::{DocumentId, Sender};
use std::path::PathBuf;

/// Effects to be carried out after a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a message to the transcript.
    Append { sender: Sender, text: String },

    /// Replace the pending input buffer.
    SetDraft { text: String },

    /// Clear the pending input buffer (after a successful answer).
    ClearDraft,

    /// Record a failure for inline display near the active control.
    SetError { message: String },

    /// Clear error and status lines at the start of a new attempt.
    ClearNotices,

    /// Record an informational status line.
    SetStatus { message: String },

    /// Issue the upload exchange for the selected file.
    Upload { file: PathBuf },

    /// Issue one question exchange scoped to the adopted document.
    Ask {
        document: DocumentId,
        question: String,
    },
}

impl Effect {
    pub fn append_user(text: impl Into<String>) -> Self {
        Effect::Append {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn append_bot(text: impl Into<String>) -> Self {
        Effect::Append {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    pub fn set_error(message: impl Into<String>) -> Self {
        Effect::SetError {
            message: message.into(),
        }
    }

    pub fn set_status(message: impl Into<String>) -> Self {
        Effect::SetStatus {
            message: message.into(),
        }
    }
}
