//! Errors produced by the value/schema/batch model.

/// An error produced while constructing or combining values, schemas, or
/// batches.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// [`crate::Batch::concat`] was called with no batches.
    #[error("cannot concatenate zero batches")]
    EmptyConcat,
    /// [`crate::Batch::concat`] was called with batches of differing
    /// schemas.
    #[error("schema mismatch: expected `{expected}`, found `{found}`")]
    SchemaMismatch {
        /// The schema name of the first batch.
        expected: String,
        /// The schema name of the mismatching batch.
        found: String,
    },
}
