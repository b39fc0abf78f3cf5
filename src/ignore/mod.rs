//! Ignore-rule subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, headers)
//!     → matcher.rs (exact set → prefix scan → predicate)
//!     → Return: ignored (skip capture) or tracked
//!
//! Rule Compilation (at construction):
//!     TrackerConfig
//!     → Exact paths collected into a HashSet
//!     → Prefix list kept in configured order
//!     → Freeze as immutable PathMatcher
//! ```
//!
//! # Design Decisions
//! - Rules compiled once, immutable at runtime
//! - No regex in hot path (exact + prefix matching only)
//! - Default is to track: empty rules ignore nothing

pub mod matcher;
