//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file
//!     → loader.rs (read, parse)
//!     → validation.rs (semantic checks, all errors reported)
//!     → AppConfig accepted into the system
//! ```
//!
//! # Design Decisions
//! - Serde handles syntax, validation.rs handles semantics
//! - Configuration is immutable once accepted; the tracker compiles its
//!   ignore rules from it exactly once at construction

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AppConfig, ListenerConfig, ObservabilityConfig, TrackerConfig};
pub use validation::{validate_config, ValidationError};
