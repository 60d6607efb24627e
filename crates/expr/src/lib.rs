//! The expression model used to evaluate field selectors, literals, and
//! function calls against batches, and the field-assignment configuration
//! unit shared by the projection operator family.
//!
//! This crate intentionally does not parse source text into expressions —
//! see `SPEC_FULL.md`'s `[MODULE: expr]` Non-goals. Callers (operator
//! factories, or a surface-syntax layer above this workspace) construct
//! `Expr` values directly.

mod assignment;
mod expr;
mod field_path;

pub use assignment::Assignment;
pub use expr::Expr;
pub use field_path::FieldPath;
