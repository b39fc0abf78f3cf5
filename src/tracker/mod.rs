//! Return-to tracking subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request
//!     → middleware.rs (capture step, runs before the wrapped handler)
//!     → PathMatcher decides ignored vs tracked
//!     → tracked: current path+query written to the session store
//!
//! Flow completion (e.g. successful login):
//!     host calls redirect_back
//!     → stored value popped (use-once)
//!     → 303 See Other to the value, or to the fallback path
//! ```
//!
//! # Design Decisions
//! - Capture is cheap and composes as transparent middleware; the redirect
//!   is invoked explicitly only at flow-completion handlers
//! - Latest non-ignored URL wins; no history is chained
//! - Store failures are swallowed (warn + fall back) so the user-facing
//!   flow never stalls on the session layer
//! - Exactly one redirect response per redirect_back call
//! - Operations take the request head (Parts); the body never matters here

pub mod middleware;

pub use middleware::return_to_middleware;

use std::sync::Arc;

use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};

use crate::config::schema::TrackerConfig;
use crate::ignore::matcher::{IgnoreRule, PathMatcher};
use crate::observability::metrics;
use crate::session::{MemoryStore, SessionStore};

/// Session key under which the return target is stored.
pub const RETURN_TO_KEY: &str = "return_to";

/// Outcome of the capture step for one request.
///
/// Threaded explicitly to the caller rather than stashed in request
/// extensions, so the contract stays visible in the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// True if the request matched an ignore rule and nothing was recorded.
    pub ignored: bool,

    /// The URL (path + query) recorded as the return target.
    pub return_to: Option<String>,
}

/// Records the last non-ignored URL per session and redirects back to it.
#[derive(Debug)]
pub struct ReturnToTracker {
    fallback_path: String,
    matcher: PathMatcher,
    store: Arc<dyn SessionStore>,
}

impl ReturnToTracker {
    /// Create a tracker with an explicitly injected session store.
    ///
    /// An empty fallback path is normalized to `/`.
    pub fn new(config: TrackerConfig, store: Arc<dyn SessionStore>) -> Self {
        let fallback_path = if config.fallback_path.is_empty() {
            "/".to_string()
        } else {
            config.fallback_path.clone()
        };

        Self {
            fallback_path,
            matcher: PathMatcher::from_config(&config),
            store,
        }
    }

    /// Create a tracker backed by an in-memory store keyed off the
    /// configured session cookie.
    pub fn in_memory(config: TrackerConfig) -> Self {
        let store = Arc::new(MemoryStore::new(config.session_cookie.clone()));
        Self::new(config, store)
    }

    /// Attach an ignore predicate consulted after the exact and prefix rules.
    pub fn ignore_when(mut self, rule: impl IgnoreRule + 'static) -> Self {
        self.matcher = self.matcher.with_predicate(rule);
        self
    }

    /// Returns true if the request is exempt from capture.
    pub fn is_ignored(&self, parts: &Parts) -> bool {
        self.matcher.is_ignored(parts)
    }

    /// The redirect target used when no return-to value is stored.
    pub fn fallback_path(&self) -> &str {
        &self.fallback_path
    }

    /// Capture step: record the request's URL as the return target.
    ///
    /// Ignored requests pass through untouched. A store failure is logged
    /// and swallowed; the request always continues downstream.
    pub async fn capture(&self, parts: &Parts) -> Capture {
        if self.matcher.is_ignored(parts) {
            metrics::record_ignored();
            return Capture {
                ignored: true,
                return_to: None,
            };
        }

        let url = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        let previous = match self.store.get(parts, RETURN_TO_KEY).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "session store read failed during capture");
                None
            }
        };

        // Skip the write when the stored target already matches.
        if previous.as_deref() != Some(url.as_str()) {
            if let Err(e) = self.store.set(parts, RETURN_TO_KEY, &url).await {
                tracing::warn!(
                    error = %e,
                    return_to = %url,
                    "session store write failed, return target not recorded"
                );
            }
        }

        metrics::record_capture();
        Capture {
            ignored: false,
            return_to: Some(url),
        }
    }

    /// Redirect step: consume the stored return target and respond with a
    /// single 303 redirect to it, or to the fallback path.
    ///
    /// The value is popped, so a second call in the same session falls back.
    pub async fn redirect_back(&self, parts: &Parts) -> Response {
        let stored = match self.store.pop(parts, RETURN_TO_KEY).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "session store unavailable, redirecting to fallback");
                None
            }
        };

        match stored {
            Some(url) if !url.is_empty() => {
                tracing::debug!(return_to = %url, "redirecting back to stored target");
                metrics::record_redirect("stored");
                Redirect::to(&url).into_response()
            }
            _ => {
                metrics::record_redirect("fallback");
                Redirect::to(&self.fallback_path).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::StoreError;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::http::StatusCode;

    fn parts(uri: &str) -> Parts {
        Request::builder()
            .uri(uri)
            .header("cookie", "sid=test-session")
            .body(Body::default())
            .unwrap()
            .into_parts()
            .0
    }

    fn config(fallback: &str, paths: &[&str]) -> TrackerConfig {
        TrackerConfig {
            fallback_path: fallback.to_string(),
            ignored_paths: paths.iter().map(|s| s.to_string()).collect(),
            ..TrackerConfig::default()
        }
    }

    fn tracker_with_store(config: TrackerConfig) -> (ReturnToTracker, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new(config.session_cookie.clone()));
        (ReturnToTracker::new(config, store.clone()), store)
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .expect("redirect response carries a Location header")
    }

    #[tokio::test]
    async fn test_ignored_path_performs_no_session_write() {
        let (tracker, store) = tracker_with_store(config("/", &["/login"]));

        let capture = tracker.capture(&parts("/login")).await;
        assert!(capture.ignored);
        assert_eq!(capture.return_to, None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_capture_then_redirect_round_trip() {
        let (tracker, _store) = tracker_with_store(config("/", &["/login"]));

        let capture = tracker.capture(&parts("/foo?x=1")).await;
        assert_eq!(capture.return_to.as_deref(), Some("/foo?x=1"));

        let response = tracker.redirect_back(&parts("/login")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/foo?x=1");
    }

    #[tokio::test]
    async fn test_redirect_consumes_stored_value() {
        let (tracker, _store) = tracker_with_store(config("/", &["/login"]));

        tracker.capture(&parts("/foo")).await;

        let first = tracker.redirect_back(&parts("/login")).await;
        assert_eq!(location(&first), "/foo");

        // Value was popped; second call falls back.
        let second = tracker.redirect_back(&parts("/login")).await;
        assert_eq!(second.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&second), "/");
    }

    #[tokio::test]
    async fn test_redirect_without_capture_uses_fallback() {
        let (tracker, _store) = tracker_with_store(config("/", &[]));

        let response = tracker.redirect_back(&parts("/anywhere")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }

    #[tokio::test]
    async fn test_latest_capture_wins() {
        let (tracker, _store) = tracker_with_store(config("/", &["/login"]));

        tracker.capture(&parts("/a")).await;
        tracker.capture(&parts("/b")).await;

        let response = tracker.redirect_back(&parts("/login")).await;
        assert_eq!(location(&response), "/b");
    }

    #[tokio::test]
    async fn test_login_scenario() {
        let (tracker, store) = tracker_with_store(config("/home", &["/login"]));

        tracker.capture(&parts("/login")).await;
        assert!(store.is_empty());

        tracker.capture(&parts("/dashboard")).await;

        let response = tracker.redirect_back(&parts("/login")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");

        let drained = tracker.redirect_back(&parts("/login")).await;
        assert_eq!(location(&drained), "/home");
    }

    #[tokio::test]
    async fn test_ignore_predicate() {
        let (tracker, store) = tracker_with_store(config("/", &[]));
        let tracker = tracker.ignore_when(|parts: &Parts| parts.uri.path().ends_with(".css"));

        let capture = tracker.capture(&parts("/app.css")).await;
        assert!(capture.ignored);
        assert!(store.is_empty());

        let capture = tracker.capture(&parts("/app")).await;
        assert!(!capture.ignored);
    }

    #[tokio::test]
    async fn test_empty_fallback_normalizes_to_root() {
        let (tracker, _store) = tracker_with_store(config("", &[]));
        assert_eq!(tracker.fallback_path(), "/");
    }

    #[derive(Debug)]
    struct FailingStore;

    #[async_trait]
    impl SessionStore for FailingStore {
        async fn get(&self, _: &Parts, _: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("store is down".into()))
        }

        async fn set(&self, _: &Parts, _: &str, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("store is down".into()))
        }

        async fn pop(&self, _: &Parts, _: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("store is down".into()))
        }
    }

    #[tokio::test]
    async fn test_store_failure_never_stalls_the_flow() {
        let tracker = ReturnToTracker::new(config("/home", &[]), Arc::new(FailingStore));

        // Capture swallows the failure and keeps the request moving.
        let capture = tracker.capture(&parts("/dashboard")).await;
        assert!(!capture.ignored);

        // Redirect treats the failure as "no stored value".
        let response = tracker.redirect_back(&parts("/dashboard")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/home");
    }
}
