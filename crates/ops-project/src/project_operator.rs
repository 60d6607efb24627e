//! The `put`/`extend`/`replace`/`set` operator contract implementation.

use expr::{Assignment, Expr};
use operator::{ControlPlane, Error, EventOrder, Operator, OperatorKind, OperatorStream, OptimizeResult};

use crate::mode::ProjectionMode;
use crate::stream::ProjectStream;

/// Configuration for one projection pipeline stage.
#[derive(Debug, Clone)]
pub struct ProjectOperator {
    mode: ProjectionMode,
    assignments: Vec<Assignment>,
}

impl ProjectOperator {
    /// Builds a projection operator of the given `mode` with the given
    /// assignment list.
    pub fn new(mode: ProjectionMode, assignments: Vec<Assignment>) -> Self {
        Self { mode, assignments }
    }
}

impl Operator for ProjectOperator {
    fn name(&self) -> &str {
        self.mode.name()
    }

    fn infer_kind(&self, input: OperatorKind) -> Result<OperatorKind, Error> {
        match input {
            OperatorKind::Events => Ok(OperatorKind::Events),
            other => Err(Error::UnsupportedInput { operator: self.name().into(), input: other.to_string() }),
        }
    }

    fn instantiate(&self, _ctrl: &mut dyn ControlPlane) -> Result<Box<dyn OperatorStream>, Error> {
        Ok(Box::new(ProjectStream::new(self.mode, self.assignments.clone())))
    }

    /// No projection mode reorders rows, so the requested order passes
    /// through unchanged; the filter is never absorbed, since a projected
    /// field can itself be the subject of a pushed-down filter.
    fn optimize(&self, filter: Expr, order: EventOrder) -> OptimizeResult {
        OptimizeResult::order_invariant(self, order, filter)
    }

    fn copy(&self) -> Box<dyn Operator> {
        Box::new(self.clone())
    }
}
