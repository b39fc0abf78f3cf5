//! In-memory session store backend.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::{header, request::Parts};
use dashmap::DashMap;

use crate::session::store::{SessionStore, StoreError};

/// Cookie used to resolve a request's session scope when none is configured.
pub const DEFAULT_SESSION_COOKIE: &str = "sid";

/// Scope shared by all requests that carry no session cookie.
const ANONYMOUS_SCOPE: &str = "anonymous";

/// A thread-safe in-memory session store.
///
/// Sessions are keyed off a cookie value; each scope holds its own
/// key-value map. Suitable as a development default and as the test
/// backend — real deployments plug in their own [`SessionStore`].
#[derive(Debug)]
pub struct MemoryStore {
    cookie_name: String,
    scopes: DashMap<String, HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a store resolving scopes from the given cookie.
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            scopes: DashMap::new(),
        }
    }

    fn scope(&self, parts: &Parts) -> String {
        cookie_value(parts, &self.cookie_name).unwrap_or_else(|| ANONYMOUS_SCOPE.to_string())
    }

    /// Number of live session scopes.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// True if no session scope holds any data.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE)
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, parts: &Parts, key: &str) -> Result<Option<String>, StoreError> {
        let scope = self.scope(parts);
        Ok(self.scopes.get(&scope).and_then(|s| s.get(key).cloned()))
    }

    async fn set(&self, parts: &Parts, key: &str, value: &str) -> Result<(), StoreError> {
        let scope = self.scope(parts);
        self.scopes
            .entry(scope)
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn pop(&self, parts: &Parts, key: &str) -> Result<Option<String>, StoreError> {
        let scope = self.scope(parts);
        Ok(self
            .scopes
            .get_mut(&scope)
            .and_then(|mut s| s.remove(key)))
    }
}

/// Extract a cookie value from the request's Cookie headers.
fn cookie_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(k, v)| (k.trim() == name).then(|| v.trim().to_string()))
}
