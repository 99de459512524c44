//! Wire types for the document service

use serde::{Deserialize, Serialize};

/// Success payload of `POST /pdf/upload`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
    /// Server-assigned identifier for the processed document.
    pub document_id: String,
    /// Human-readable note; the service uses it to flag deduplicated
    /// re-uploads ("Document already uploaded").
    #[serde(default)]
    pub message: Option<String>,
}

/// Request body of `POST /chat/`.
///
/// `document_id` is the canonical field name; the service's request model
/// accepts nothing else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub question: String,
    pub document_id: String,
}

/// Success payload of `POST /chat/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    /// Echo of the question; the client ignores it.
    #[serde(default)]
    #[allow(dead_code)]
    pub question: Option<String>,
    /// Retrieval chunks the answer was grounded in.
    #[serde(default)]
    pub context: Vec<ContextChunk>,
}

/// One retrieval chunk backing an answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContextChunk {
    pub text: String,
    pub score: f64,
}

/// Failure payload; any non-2xx status may carry one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
