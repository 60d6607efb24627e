//! The immutable, schema-tagged, row-oriented batch container operators
//! exchange.

use std::sync::Arc;

use crate::error::Error;
use crate::schema::Schema;
use crate::value::Value;

/// An immutable batch of rows sharing one [`Schema`].
///
/// Each row is a `Value::Record`. Cloning a `Batch` is cheap: the row storage
/// is reference-counted and never copied on clone, split, or sub-slice — only
/// [`Batch::concat`] allocates new row storage, since concatenation is
/// inherently a merge of two distinct buffers.
///
/// A zero-row batch is a valid, frequently-produced value: it is the
/// substrate's "no data this poll, keep scheduling" sentinel, mirroring
/// `co_yield {}` in the engine this was distilled from.
#[derive(Debug, Clone)]
pub struct Batch {
    schema: Schema,
    rows: Arc<[Value]>,
}

impl Batch {
    /// Creates a new batch. Every row must be a `Value::Record`; this is not
    /// re-validated on every operation, only here at construction.
    pub fn new(schema: Schema, rows: Vec<Value>) -> Self {
        Self { schema, rows: Arc::from(rows) }
    }

    /// An empty batch carrying `schema`, usable as a scheduling sentinel.
    pub fn empty(schema: Schema) -> Self {
        Self { schema, rows: Arc::from(Vec::new()) }
    }

    /// The batch's schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The number of rows in this batch.
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether this batch carries zero rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row at `index` as a [`Value`].
    pub fn row(&self, index: usize) -> &Value {
        &self.rows[index]
    }

    /// An iterator over this batch's rows.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.rows.iter()
    }

    /// Splits this batch at `at`, returning `(rows[..at], rows[at..])`, both
    /// sharing the same schema. Used by the `buffer` operator to carve off
    /// exactly the portion of an oversized write that fits remaining
    /// capacity.
    ///
    /// `at` is clamped to `self.rows()`.
    pub fn split_at(&self, at: usize) -> (Batch, Batch) {
        let at = at.min(self.rows.len());
        (
            Batch { schema: self.schema.clone(), rows: Arc::from(&self.rows[..at]) },
            Batch { schema: self.schema.clone(), rows: Arc::from(&self.rows[at..]) },
        )
    }

    /// Returns the sub-batch `[begin, end)`, sharing the same schema. Used by
    /// aggregation to hand a contiguous same-key run to an accumulator
    /// without copying the whole batch.
    pub fn subslice(&self, begin: usize, end: usize) -> Batch {
        Batch { schema: self.schema.clone(), rows: Arc::from(&self.rows[begin..end]) }
    }

    /// Concatenates same-schema batches into one. Returns
    /// [`Error::SchemaMismatch`] if any two batches have differing
    /// fingerprints.
    pub fn concat(batches: &[Batch]) -> Result<Batch, Error> {
        let Some(first) = batches.first() else {
            return Err(Error::EmptyConcat);
        };
        let fingerprint = first.schema.fingerprint();
        let mut rows = Vec::new();
        for batch in batches {
            if batch.schema.fingerprint() != fingerprint {
                return Err(Error::SchemaMismatch {
                    expected: first.schema.name().to_string(),
                    found: batch.schema.name().to_string(),
                });
            }
            rows.extend(batch.rows.iter().cloned());
        }
        Ok(Batch { schema: first.schema.clone(), rows: Arc::from(rows) })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ty::{Field, Type};

    fn schema() -> Schema {
        Schema::new("s", vec![Field::new("x", Type::Int64)])
    }

    fn row(x: i64) -> Value {
        Value::Record(Arc::from(vec![("x".to_string(), Value::Int64(x))]))
    }

    #[test]
    fn split_at_preserves_schema_and_row_counts() {
        let batch = Batch::new(schema(), vec![row(1), row(2), row(3)]);
        let (lhs, rhs) = batch.split_at(2);
        assert_eq!(lhs.rows(), 2);
        assert_eq!(rhs.rows(), 1);
        assert_eq!(lhs.schema().fingerprint(), rhs.schema().fingerprint());
    }

    #[test]
    fn split_at_clamps_past_end() {
        let batch = Batch::new(schema(), vec![row(1)]);
        let (lhs, rhs) = batch.split_at(10);
        assert_eq!(lhs.rows(), 1);
        assert_eq!(rhs.rows(), 0);
    }

    #[test]
    fn concat_rejects_schema_mismatch() {
        let a = Batch::new(schema(), vec![row(1)]);
        let b = Batch::new(Schema::new("other", vec![Field::new("y", Type::String)]), vec![]);
        assert!(Batch::concat(&[a, b]).is_err());
    }

    #[test]
    fn concat_merges_rows_in_order() {
        let a = Batch::new(schema(), vec![row(1), row(2)]);
        let b = Batch::new(schema(), vec![row(3)]);
        let merged = Batch::concat(&[a, b]).unwrap();
        assert_eq!(merged.rows(), 3);
        assert_eq!(merged.row(2), &row(3));
    }
}
