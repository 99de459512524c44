//! Production HTTP client for the document service

use super::types::{ChatRequest, ChatResponse, ErrorBody, UploadResponse};
use super::{BackendError, Collaborator};
use crate::session::DocumentId;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Duration;

/// Client for the upload and chat endpoints.
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| BackendError::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn transport_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::transport("Request timed out")
        } else if e.is_connect() {
            BackendError::transport(format!("Cannot connect to {}", self.base_url))
        } else {
            BackendError::transport(format!("Request failed: {e}"))
        }
    }
}

/// Build a service error from a non-2xx response body, preferring the
/// structured `detail` message when the body carries one.
fn service_error(status: StatusCode, body: &str, fallback: &str) -> BackendError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail);
    match detail {
        Some(detail) => BackendError::service(detail),
        None => BackendError::service(format!("{fallback} (HTTP {})", status.as_u16())),
    }
}

#[async_trait]
impl Collaborator for BackendClient {
    async fn upload(&self, file: &Path) -> Result<UploadResponse, BackendError> {
        let bytes = tokio::fs::read(file)
            .await
            .map_err(|e| BackendError::transport(format!("Cannot read {}: {e}", file.display())))?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.pdf".to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")
            .map_err(|e| BackendError::protocol(format!("invalid upload part: {e}")))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/pdf/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::transport(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(service_error(status, &body, "Upload failed"));
        }

        serde_json::from_str(&body)
            .map_err(|e| BackendError::protocol(format!("Unexpected upload response: {e}")))
    }

    async fn ask(
        &self,
        document: &DocumentId,
        question: &str,
    ) -> Result<ChatResponse, BackendError> {
        let request = ChatRequest {
            question: question.to_string(),
            document_id: document.as_str().to_string(),
        };

        let response = self
            .client
            .post(self.url("/chat/"))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::transport(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(service_error(status, &body, "Failed to get answer"));
        }

        serde_json::from_str(&body)
            .map_err(|e| BackendError::protocol(format!("Unexpected chat response: {e}")))
    }
}
