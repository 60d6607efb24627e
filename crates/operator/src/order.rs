//! Row-order guarantees an operator preserves or relaxes.

/// Whether row order across a pipeline boundary matters.
///
/// `optimize` uses this both as an input (the order the downstream operators
/// require) and an output (the order this operator actually guarantees once
/// optimized) — an operator that does not reorder rows, like the projection
/// family, passes the requested order straight through; an operator that
/// destroys order, like `load-balance`'s fan-out, always reports
/// `Unordered` regardless of what was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOrder {
    /// Row order must be preserved.
    Ordered,
    /// Row order may be rearranged freely.
    Unordered,
}
