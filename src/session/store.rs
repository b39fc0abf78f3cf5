//! The interface of a session storage backend.

use async_trait::async_trait;
use axum::http::request::Parts;

/// Errors that can occur when interacting with a session storage backend.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or refused the operation.
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Request-scoped key-value persistence.
///
/// How a request maps to a session (cookie, header, connection state) is the
/// backend's business; callers only see string keys and string values. The
/// request head is all a backend gets — session resolution never reads the
/// body.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Read the value stored under `key` for this request's session.
    async fn get(&self, parts: &Parts, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key` for this request's session, replacing any
    /// previous value.
    async fn set(&self, parts: &Parts, key: &str, value: &str) -> Result<(), StoreError>;

    /// Read and remove the value stored under `key` for this request's
    /// session.
    async fn pop(&self, parts: &Parts, key: &str) -> Result<Option<String>, StoreError>;
}
