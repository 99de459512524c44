//! Document service collaborator
//!
//! The upload and question/answer exchanges are the only external interface
//! the session depends on. The trait seam lets the runtime run against a
//! scripted mock in tests.

mod client;
mod error;
mod types;

pub use client::BackendClient;
pub use error::{BackendError, BackendErrorKind};
pub use types::{ChatRequest, ChatResponse, ContextChunk, ErrorBody, UploadResponse};

use crate::session::DocumentId;
use async_trait::async_trait;
use std::path::Path;

/// Interface to the document service.
#[async_trait]
pub trait Collaborator: Send + Sync {
    /// Exchange a local file for a document identifier.
    async fn upload(&self, file: &Path) -> Result<UploadResponse, BackendError>;

    /// Ask one question scoped to an uploaded document.
    async fn ask(
        &self,
        document: &DocumentId,
        question: &str,
    ) -> Result<ChatResponse, BackendError>;
}

#[async_trait]
impl<T: Collaborator + ?Sized> Collaborator for std::sync::Arc<T> {
    async fn upload(&self, file: &Path) -> Result<UploadResponse, BackendError> {
        (**self).upload(file).await
    }

    async fn ask(
        &self,
        document: &DocumentId,
        question: &str,
    ) -> Result<ChatResponse, BackendError> {
        (**self).ask(document, question).await
    }
}
