//! # Postbox Core
//!
//! The domain layer of the Postbox backend: the post record, field schemas,
//! validation, search and sort, and the store that owns the collection.
//! Persistence is reached only through the [`ports::PostStorage`] trait.

pub mod domain;
pub mod error;
pub mod ports;
pub mod query;
pub mod store;
pub mod validate;

pub use error::{DomainError, StorageError};
pub use store::PostStore;
