//! Filter pushdown and order relaxation.

use expr::Expr;

use crate::order::EventOrder;
use crate::Operator;

/// The result of [`crate::Operator::optimize`]: the filter and order
/// requirement residual to this operator (i.e. what the operator could
/// *not* absorb, and must be pushed further upstream or enforced
/// downstream), plus the operator's own replacement.
pub struct OptimizeResult {
    /// The filter expression still to be applied upstream, or `None` if
    /// this operator fully absorbed the pushed-down filter.
    pub filter: Option<Expr>,
    /// The event order guarantee this operator (after optimization)
    /// provides to its downstream.
    pub order: EventOrder,
    /// The (possibly rewritten) operator to use in place of the original.
    pub replacement: Box<dyn Operator>,
}

impl OptimizeResult {
    /// Builds the "no pushdown possible" result: the filter is returned
    /// unabsorbed, the order is passed through unchanged, and `operator` is
    /// used as-is. This is what `optimize`'s default implementation
    /// returns.
    pub fn unchanged(operator: &dyn Operator, filter: Expr, order: EventOrder) -> OptimizeResult {
        OptimizeResult { filter: Some(filter), order, replacement: operator.copy() }
    }

    /// Builds the result for an operator that does not reorder rows: the
    /// requested `order` is reported back unchanged (whatever it was), and
    /// the filter is left unabsorbed.
    pub fn order_invariant(operator: &dyn Operator, order: EventOrder, filter: Expr) -> OptimizeResult {
        OptimizeResult { filter: Some(filter), order, replacement: operator.copy() }
    }

    /// Builds the result for an operator that destroys row order
    /// regardless of what was requested, e.g. a fan-out.
    pub fn unordered(operator: &dyn Operator) -> OptimizeResult {
        OptimizeResult { filter: None, order: EventOrder::Unordered, replacement: operator.copy() }
    }
}
