//! Events that drive the session state machine
//!
//! UI interactions and backend completions both arrive here; the runtime
//! feeds them through the pure transition in order.

use crate::session::state::DocumentId;

/// Events that trigger state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Upload workflow
    /// A candidate file was chosen (or the path edited). An empty path
    /// returns the workflow to `Idle`.
    FileChosen { path: String },
    /// The user asked to upload the selected file.
    UploadRequested,
    /// The upload exchange resolved to an identifier.
    UploadCompleted {
        document: DocumentId,
        /// Human-readable note from the backend, e.g. that the document was
        /// already known and deduplicated.
        message: Option<String>,
    },
    UploadFailed { message: String },

    // Conversation workflow
    /// The pending input buffer changed. No effect on the transcript.
    DraftChanged { text: String },
    /// The user asked to send the current draft as a question.
    SendRequested { question: String },
    /// The question exchange resolved to an answer.
    AnswerReceived {
        answer: String,
        /// Number of retrieval chunks the backend grounded the answer in.
        sources: usize,
    },
    AskFailed { message: String },
}
