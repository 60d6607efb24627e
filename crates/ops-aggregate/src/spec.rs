//! The `summarize`/`aggregate` configuration model.

use expr::{Expr, FieldPath};

use crate::function::AggregationKind;

/// One item of a `summarize` item list, in output-field order.
///
/// The original implementation tracks item order via a signed index into
/// one of two parallel vectors (positive into `aggregates`, negative into
/// `group_by`); an enum makes that encoding unnecessary here.
#[derive(Debug, Clone)]
pub enum SummarizeItem {
    /// A group-by key.
    Group(GroupSpec),
    /// An aggregation over an expression.
    Aggregate(AggregateSpec),
}

impl SummarizeItem {
    /// The output field name this item contributes.
    pub fn dest(&self) -> &str {
        match self {
            SummarizeItem::Group(g) => &g.dest,
            SummarizeItem::Aggregate(a) => &a.dest,
        }
    }
}

/// A single group-by key.
#[derive(Debug, Clone)]
pub struct GroupSpec {
    /// The expression grouped on.
    pub by: FieldPath,
    /// The output field name. Defaults to `by`'s dotted path when not
    /// explicitly renamed.
    pub dest: String,
}

impl GroupSpec {
    /// Groups by `by`, naming the output field after its dotted path.
    pub fn new(by: FieldPath) -> Self {
        let dest = path_name(&by);
        Self { by, dest }
    }

    /// Groups by `by`, naming the output field `dest`.
    pub fn renamed(by: FieldPath, dest: impl Into<String>) -> Self {
        Self { by, dest: dest.into() }
    }
}

fn path_name(path: &FieldPath) -> String {
    match path {
        FieldPath::SchemaName => "schema".to_string(),
        FieldPath::Segments(segments) => segments.join("."),
    }
}

/// A single aggregation: a function applied to an expression.
#[derive(Debug, Clone)]
pub struct AggregateSpec {
    /// Which aggregation function to apply.
    pub kind: AggregationKind,
    /// The expression evaluated per row and folded into the function.
    /// `count()` with no explicit argument is represented as a
    /// non-null literal (`Expr::Literal(Value::Int64(1))`), so a single
    /// `count` accumulator uniformly handles both "count rows" and "count
    /// non-null evaluations of an expression".
    pub arg: Expr,
    /// The output field name. Defaults to the function's name.
    pub dest: String,
}

impl AggregateSpec {
    /// Applies `kind` to `arg`, naming the output field after the
    /// function.
    pub fn new(kind: AggregationKind, arg: Expr) -> Self {
        let dest = kind.name().to_string();
        Self { kind, arg, dest }
    }

    /// Applies `kind` to `arg`, naming the output field `dest`.
    pub fn renamed(kind: AggregationKind, arg: Expr, dest: impl Into<String>) -> Self {
        Self { kind, arg, dest: dest.into() }
    }
}
