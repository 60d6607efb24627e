//! The `buffer` operator: bounded queueing between two pipeline stages.

use expr::Expr;
use operator::{ControlPlane, Error, EventOrder, Operator, OperatorKind, OperatorStream, OptimizeResult};

use crate::policy::OverflowPolicy;
use crate::stream::BufferStream;

/// Configuration for one `buffer` pipeline stage.
#[derive(Debug, Clone, Copy)]
pub struct BufferOperator {
    capacity: u64,
    policy: OverflowPolicy,
}

impl BufferOperator {
    /// Builds a `buffer` operator with the given row capacity and overflow
    /// policy.
    pub fn new(capacity: u64, policy: OverflowPolicy) -> Self {
        Self { capacity, policy }
    }
}

impl Operator for BufferOperator {
    fn name(&self) -> &str {
        "buffer"
    }

    fn infer_kind(&self, input: OperatorKind) -> Result<OperatorKind, Error> {
        match input {
            OperatorKind::Events => Ok(OperatorKind::Events),
            other => Err(Error::UnsupportedInput { operator: self.name().into(), input: other.to_string() }),
        }
    }

    fn instantiate(&self, _ctrl: &mut dyn ControlPlane) -> Result<Box<dyn OperatorStream>, Error> {
        Ok(Box::new(BufferStream::new(self.capacity, self.policy)))
    }

    fn optimize(&self, filter: Expr, order: EventOrder) -> OptimizeResult {
        OptimizeResult::order_invariant(self, order, filter)
    }

    fn copy(&self) -> Box<dyn Operator> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use diagnostics::{DiagnosticHandler, MetricHandler, TracingDiagnosticHandler, TracingMetricHandler};
    use operator::StreamPoll;
    use value::{Batch, Field, Schema, Type};

    struct NullControlPlane {
        diagnostics: TracingDiagnosticHandler,
        metrics: TracingMetricHandler,
        waiting: bool,
    }

    impl ControlPlane for NullControlPlane {
        fn diagnostics(&self) -> &dyn DiagnosticHandler {
            &self.diagnostics
        }
        fn metrics(&self) -> &dyn MetricHandler {
            &self.metrics
        }
        fn operator_index(&self) -> usize {
            0
        }
        fn set_waiting(&mut self, waiting: bool) {
            self.waiting = waiting;
        }
    }

    fn ctrl() -> NullControlPlane {
        NullControlPlane { diagnostics: TracingDiagnosticHandler, metrics: TracingMetricHandler, waiting: false }
    }

    #[test]
    fn rejects_byte_input() {
        let op = BufferOperator::new(8, OverflowPolicy::Drop);
        assert!(op.infer_kind(OperatorKind::Bytes).is_err());
        assert_eq!(op.infer_kind(OperatorKind::Events).unwrap(), OperatorKind::Events);
    }

    #[test]
    fn instantiate_forwards_a_single_batch() {
        let op = BufferOperator::new(8, OverflowPolicy::Block);
        let mut c = ctrl();
        let mut stream = op.instantiate(&mut c).unwrap();
        let schema = Schema::new("s", vec![Field::new("x", Type::Int64)]);
        let batch = Batch::new(schema, vec![]);
        match stream.poll_next(Some(batch), &mut c) {
            StreamPoll::Ready(b) => assert!(b.is_empty()),
            StreamPoll::Pending => {}
            other => panic!("unexpected {other:?}"),
        }
    }
}
