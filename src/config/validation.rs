//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check paths are absolute (leading slash)
//! - Validate bind addresses parse as socket addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::AppConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("fallback_path {0:?} must start with '/'")]
    FallbackNotAbsolute(String),

    #[error("ignored path {0:?} must start with '/'")]
    IgnoredPathNotAbsolute(String),

    #[error("ignored prefixes must not be empty strings")]
    EmptyIgnoredPrefix,

    #[error("session_cookie must not be empty")]
    EmptySessionCookie,

    #[error("invalid bind address {0:?}")]
    InvalidBindAddress(String),

    #[error("invalid metrics address {0:?}")]
    InvalidMetricsAddress(String),
}

/// Validate the full configuration, collecting every error found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let tracker = &config.tracker;
    // An empty fallback is normalized to "/" at tracker construction.
    if !tracker.fallback_path.is_empty() && !tracker.fallback_path.starts_with('/') {
        errors.push(ValidationError::FallbackNotAbsolute(
            tracker.fallback_path.clone(),
        ));
    }

    for path in &tracker.ignored_paths {
        if !path.starts_with('/') {
            errors.push(ValidationError::IgnoredPathNotAbsolute(path.clone()));
        }
    }

    if tracker.ignored_prefixes.iter().any(|p| p.is_empty()) {
        errors.push(ValidationError::EmptyIgnoredPrefix);
    }

    if tracker.session_cookie.is_empty() {
        errors.push(ValidationError::EmptySessionCookie);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
