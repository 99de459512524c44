//! Backend error types

use thiserror::Error;

/// Backend error with classification.
///
/// The message is already human-readable: for service failures it is the
/// backend's `detail` string when one was present, otherwise a generic
/// fallback. The runtime converts it straight into the session's inline
/// error; nothing here propagates further.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Network or connection failure; no structured payload.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Transport, message)
    }

    /// Non-2xx response from the service.
    pub fn service(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Service, message)
    }

    /// 2xx response whose body did not match the wire contract.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Protocol, message)
    }
}

/// Error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// Connection failure or timeout.
    Transport,
    /// The service rejected the request (non-2xx).
    Service,
    /// The service answered with something unparseable.
    Protocol,
}
