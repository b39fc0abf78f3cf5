//! Session storage subsystem.
//!
//! # Data Flow
//! ```text
//! Request (Cookie header)
//!     → store backend resolves the session scope
//!     → get / set / pop string values under plain string keys
//!
//! The tracker only ever stores one value (the return-to URL) under one
//! key, but the interface is a general request-scoped key-value store so
//! hosts can plug in their own session layer.
//! ```
//!
//! # Design Decisions
//! - Backend chosen by the host; injected as Arc<dyn SessionStore>
//! - Store failures surface as StoreError; the tracker recovers from them
//! - MemoryStore is the documented default backend and the test double

pub mod memory;
pub mod store;

pub use memory::MemoryStore;
pub use store::{SessionStore, StoreError};
