//! Return-to tracking middleware for axum services.
//!
//! Records the last non-ignored URL a client visited and redirects back to
//! it once an interrupting flow (login, consent, re-auth) completes.

pub mod config;
pub mod ignore;
pub mod observability;
pub mod session;
pub mod tracker;

pub use config::schema::{AppConfig, TrackerConfig};
pub use ignore::matcher::{IgnoreRule, PathMatcher};
pub use session::{MemoryStore, SessionStore, StoreError};
pub use tracker::{return_to_middleware, Capture, ReturnToTracker};
