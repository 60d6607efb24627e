//! The operator contract every concrete pipeline stage implements.

use expr::Expr;

use crate::control_plane::ControlPlane;
use crate::error::Error;
use crate::kind::OperatorKind;
use crate::location::OperatorLocation;
use crate::optimize::OptimizeResult;
use crate::order::EventOrder;
use crate::stream::OperatorStream;

/// A pipeline stage.
///
/// The scheduler and the pipeline builder interact with operators
/// exclusively through this trait; neither knows anything about a concrete
/// operator's internals. This mirrors the original engine's
/// `crtp_operator`/`operator_plugin` contract: a handful of small,
/// independently-overridable hooks rather than one monolithic `run` method.
pub trait Operator: Send {
    /// The operator's name, used in diagnostics and pipeline debug output.
    fn name(&self) -> &str;

    /// Infers this operator's output kind given its input kind, without
    /// instantiating it. Pure and side-effect-free.
    fn infer_kind(&self, input: OperatorKind) -> Result<OperatorKind, Error>;

    /// Constructs this operator's generator. The returned stream is driven
    /// by the scheduler's poll loop, not called eagerly.
    fn instantiate(&self, ctrl: &mut dyn ControlPlane) -> Result<Box<dyn OperatorStream>, Error>;

    /// Attempts to push `filter`/`order` through this operator.
    ///
    /// The default implementation absorbs nothing: it returns the filter
    /// and order unchanged alongside an unmodified copy of `self`. Calling
    /// `optimize` again on the `replacement` with the residual filter/order
    /// it returned must return that same filter/order back with a further
    /// no-op replacement — optimization converges in one pass per operator.
    fn optimize(&self, filter: Expr, order: EventOrder) -> OptimizeResult {
        OptimizeResult { filter: Some(filter), order, replacement: self.copy() }
    }

    /// Where this operator prefers to run. Defaults to `Local`.
    fn location(&self) -> OperatorLocation {
        OperatorLocation::Local
    }

    /// A placement hint: whether this operator would rather run on a
    /// dedicated background task than be polled inline. Defaults to
    /// `false`. This crate's own scheduler does not act on it — none of
    /// the operator families in this tree blocks a thread, so every one
    /// of them is content to be polled inline. The hint exists for an
    /// embedding that adds a genuinely blocking leaf operator outside
    /// this core's scope.
    fn detached(&self) -> bool {
        false
    }

    /// Produces an independent copy of this operator, used by `optimize`'s
    /// default implementation and by the pipeline builder when an operator
    /// needs to be duplicated (e.g. across `load-balance` sub-pipelines).
    fn copy(&self) -> Box<dyn Operator>;
}
