//! Post storage implementations - durable JSON file and in-memory fallback.

mod memory;

#[cfg(feature = "json-file")]
mod json_file;

pub use memory::InMemoryPostStorage;

#[cfg(feature = "json-file")]
pub use json_file::JsonFilePostStorage;
