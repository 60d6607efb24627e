//! The engine's value, schema, and batch model.
//!
//! A [`Batch`] is an immutable, schema-tagged sequence of [`Value`] rows.
//! Every operator in this workspace exchanges `Batch`es; this crate has no
//! dependency on any of them, so it can be shared by the scheduler, the
//! expression evaluator, and every concrete operator crate without creating
//! a dependency cycle.

mod batch;
mod error;
mod fingerprint;
mod schema;
mod ty;
mod value;

pub use batch::Batch;
pub use error::Error;
pub use fingerprint::stable_hash64;
pub use schema::{FieldIndex, Schema};
pub use ty::{Field, Type};
pub use value::Value;
