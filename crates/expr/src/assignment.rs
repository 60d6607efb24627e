//! Field assignments, the shared configuration unit of the `put` / `extend`
//! / `replace` / `set` projection family.

use crate::expr::Expr;
use crate::field_path::FieldPath;

/// One `destination = source` assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// The field (or `#schema`) this assignment targets.
    pub destination: FieldPath,
    /// The expression computing the assigned value.
    pub source: Expr,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(destination: FieldPath, source: Expr) -> Self {
        Self { destination, source }
    }

    /// Whether this assignment targets the `#schema`/`@schema`
    /// meta-selector rather than a real field.
    pub fn renames_schema(&self) -> bool {
        matches!(self.destination, FieldPath::SchemaName)
    }
}
