//! # Postbox Infrastructure
//!
//! Concrete implementations of the ports defined in `postbox-core`.
//!
//! ## Feature Flags
//!
//! - `json-file` (default) - durable storage in a single JSON document.
//!   Build with `--no-default-features` for process-memory storage only.

pub mod storage;

pub use storage::InMemoryPostStorage;

#[cfg(feature = "json-file")]
pub use storage::JsonFilePostStorage;
