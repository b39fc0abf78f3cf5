//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the demo service binary.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Return-to tracker settings.
    pub tracker: TrackerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Return-to tracker configuration.
///
/// The ignore predicate is code, not configuration, and attaches via
/// [`ReturnToTracker::ignore_when`](crate::tracker::ReturnToTracker::ignore_when).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Redirect target when no return-to value is stored.
    pub fallback_path: String,

    /// Request paths exempt from capture (exact match).
    pub ignored_paths: Vec<String>,

    /// Request path prefixes exempt from capture.
    pub ignored_prefixes: Vec<String>,

    /// Cookie carrying the session scope id.
    pub session_cookie: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            fallback_path: "/".to_string(),
            ignored_paths: Vec::new(),
            ignored_prefixes: Vec::new(),
            session_cookie: "sid".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
