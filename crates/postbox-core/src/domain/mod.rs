//! Domain entities - the post record and the field schema that shapes it.

mod post;
mod schema;

pub use post::{Post, PostFields, next_id};
pub use schema::{Field, Schema};
