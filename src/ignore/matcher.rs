//! Ignore-rule matching logic.
//!
//! # Responsibilities
//! - Match request path against exact ignore list (case-sensitive)
//! - Match request path against prefix ignore list
//! - Delegate to an optional caller-supplied predicate
//!
//! # Design Decisions
//! - Exact matches use a HashSet for O(1) lookup
//! - Prefix list is scanned in configured order; result is an OR, so order
//!   only affects which rule short-circuits
//! - Rules see the request head (method, uri, headers), never the body
//! - No match anywhere = not ignored (tracking is the default)

use std::collections::HashSet;

use axum::http::request::Parts;

use crate::config::schema::TrackerConfig;

/// Trait for caller-supplied ignore decisions.
///
/// Blanket-implemented for closures, so a plain `|parts| ...` works wherever
/// an `IgnoreRule` is expected.
pub trait IgnoreRule: Send + Sync {
    /// Returns true if capture should be skipped for this request.
    fn is_ignored(&self, parts: &Parts) -> bool;
}

impl<F> IgnoreRule for F
where
    F: Fn(&Parts) -> bool + Send + Sync,
{
    fn is_ignored(&self, parts: &Parts) -> bool {
        self(parts)
    }
}

/// Compiled ignore rules for a tracker instance.
///
/// Built once from configuration and immutable afterwards, so it is shared
/// across concurrent requests without synchronization.
pub struct PathMatcher {
    exact: HashSet<String>,
    prefixes: Vec<String>,
    predicate: Option<Box<dyn IgnoreRule>>,
}

impl PathMatcher {
    /// Compile the ignore rules from tracker configuration.
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self {
            exact: config.ignored_paths.iter().cloned().collect(),
            prefixes: config.ignored_prefixes.clone(),
            predicate: None,
        }
    }

    /// Attach a predicate consulted when neither exact nor prefix rules match.
    pub fn with_predicate(mut self, rule: impl IgnoreRule + 'static) -> Self {
        self.predicate = Some(Box::new(rule));
        self
    }

    /// Returns true if the request is exempt from return-to capture.
    pub fn is_ignored(&self, parts: &Parts) -> bool {
        let path = parts.uri.path();

        if self.exact.contains(path) {
            return true;
        }

        if self.prefixes.iter().any(|prefix| path.starts_with(prefix)) {
            return true;
        }

        if let Some(predicate) = &self.predicate {
            return predicate.is_ignored(parts);
        }

        false
    }
}

impl std::fmt::Debug for PathMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathMatcher")
            .field("exact", &self.exact)
            .field("prefixes", &self.prefixes)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}
