//! A row predicate operator, inserted automatically by
//! [`crate::PipelineBuilder::optimize`] for any filter no operator in the
//! pipeline could absorb.

use expr::Expr;
use operator::{ControlPlane, Error, EventOrder, Operator, OperatorKind, OperatorStream, OptimizeResult, StreamPoll};
use value::{Batch, Value};

/// Keeps rows where `predicate` evaluates to `Value::Bool(true)`, dropping
/// every other row. A `Null` evaluation drops the row and emits one warning
/// diagnostic per batch that contained one, matching `filter`'s documented
/// null-predicate behavior.
#[derive(Debug, Clone)]
pub struct FilterOperator {
    predicate: Expr,
}

impl FilterOperator {
    /// Builds a filter operator applying `predicate` to every row.
    pub fn new(predicate: Expr) -> Self {
        Self { predicate }
    }
}

impl Operator for FilterOperator {
    fn name(&self) -> &str {
        "filter"
    }

    fn infer_kind(&self, input: OperatorKind) -> Result<OperatorKind, Error> {
        match input {
            OperatorKind::Events => Ok(OperatorKind::Events),
            other => Err(Error::UnsupportedInput { operator: self.name().into(), input: other.to_string() }),
        }
    }

    fn instantiate(&self, _ctrl: &mut dyn ControlPlane) -> Result<Box<dyn OperatorStream>, Error> {
        Ok(Box::new(FilterStream { predicate: self.predicate.clone() }))
    }

    /// A filter never reorders rows; it is only ever the end result of a
    /// pushdown pass, so it never has a further filter to absorb.
    fn optimize(&self, filter: Expr, order: EventOrder) -> OptimizeResult {
        OptimizeResult::order_invariant(self, order, filter)
    }

    fn copy(&self) -> Box<dyn Operator> {
        Box::new(self.clone())
    }
}

struct FilterStream {
    predicate: Expr,
}

impl OperatorStream for FilterStream {
    fn poll_next(&mut self, input: Option<Batch>, ctrl: &mut dyn ControlPlane) -> StreamPoll {
        match input {
            Some(batch) => {
                let mut saw_null = false;
                let rows: Vec<Value> = (0..batch.rows())
                    .filter(|&row| match self.predicate.eval(&batch, row) {
                        Value::Bool(keep) => keep,
                        Value::Null => {
                            saw_null = true;
                            false
                        }
                        _ => false,
                    })
                    .map(|row| batch.row(row).clone())
                    .collect();
                if saw_null {
                    diagnostics::Diagnostic::warning("filter predicate evaluated to null for at least one row")
                        .primary("filter")
                        .emit(ctrl.diagnostics());
                }
                StreamPoll::Ready(Batch::new(batch.schema().clone(), rows))
            }
            None => StreamPoll::Done,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use diagnostics::{DiagnosticHandler, MetricHandler, TracingDiagnosticHandler, TracingMetricHandler};
    use expr::FieldPath;
    use std::sync::Arc;
    use value::{Field, Schema, Type};

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

    fn schema() -> Schema {
        Schema::new("s", vec![Field::new("keep", Type::Bool)])
    }

    fn row(keep: Value) -> Value {
        Value::Record(Arc::from(vec![("keep".to_string(), keep)]))
    }

    #[test]
    fn keeps_only_true_rows() {
        let op = FilterOperator::new(Expr::Field(FieldPath::parse("keep")));
        let mut c = ctrl();
        let mut stream = op.instantiate(&mut c).unwrap();
        let batch = Batch::new(schema(), vec![row(Value::Bool(true)), row(Value::Bool(false)), row(Value::Bool(true))]);
        match stream.poll_next(Some(batch), &mut c) {
            StreamPoll::Ready(out) => assert_eq!(out.rows(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn null_predicate_drops_row_and_warns() {
        let op = FilterOperator::new(Expr::Field(FieldPath::parse("keep")));
        let mut c = ctrl();
        let mut stream = op.instantiate(&mut c).unwrap();
        let batch = Batch::new(schema(), vec![row(Value::Null)]);
        match stream.poll_next(Some(batch), &mut c) {
            StreamPoll::Ready(out) => assert_eq!(out.rows(), 0),
            other => panic!("unexpected {other:?}"),
        }
    }
}
