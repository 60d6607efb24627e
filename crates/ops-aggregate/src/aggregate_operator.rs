//! The `summarize` operator contract implementation.

use expr::Expr;
use operator::{ControlPlane, Error, EventOrder, Operator, OperatorKind, OperatorStream, OptimizeResult};

use crate::spec::SummarizeItem;
use crate::stream::AggregateStream;

/// Configuration for a grouped streaming aggregation stage.
#[derive(Debug, Clone)]
pub struct AggregateOperator {
    items: Vec<SummarizeItem>,
    output_schema_name: String,
}

impl AggregateOperator {
    /// Builds an aggregation operator with the given item list, naming its
    /// output schema `output_schema_name`.
    pub fn new(items: Vec<SummarizeItem>, output_schema_name: impl Into<String>) -> Self {
        Self { items, output_schema_name: output_schema_name.into() }
    }
}

impl Operator for AggregateOperator {
    fn name(&self) -> &str {
        "summarize"
    }

    fn infer_kind(&self, input: OperatorKind) -> Result<OperatorKind, Error> {
        match input {
            OperatorKind::Events => Ok(OperatorKind::Events),
            other => Err(Error::UnsupportedInput { operator: self.name().into(), input: other.to_string() }),
        }
    }

    fn instantiate(&self, _ctrl: &mut dyn ControlPlane) -> Result<Box<dyn OperatorStream>, Error> {
        Ok(Box::new(AggregateStream::new(self.items.clone(), self.output_schema_name.clone())))
    }

    /// Aggregation reorders and merges rows by group, so it neither
    /// preserves the requested order nor can safely absorb an upstream
    /// filter on its own behalf: a filter on a field it aggregates over
    /// would silently change which rows land in a group if pushed past
    /// this operator, so it is returned to the caller unabsorbed.
    fn optimize(&self, filter: Expr, _order: EventOrder) -> OptimizeResult {
        OptimizeResult { filter: Some(filter), order: EventOrder::Unordered, replacement: self.copy() }
    }

    fn copy(&self) -> Box<dyn Operator> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::function::AggregationKind;
    use crate::spec::{AggregateSpec, GroupSpec};
    use diagnostics::{DiagnosticHandler, MetricHandler, TracingDiagnosticHandler, TracingMetricHandler};
    use expr::FieldPath;
    use operator::StreamPoll;
    use value::{Batch, Field, Schema, Type, Value};

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
        let op = AggregateOperator::new(vec![], "summarize");
        assert!(op.infer_kind(OperatorKind::Bytes).is_err());
        assert_eq!(op.infer_kind(OperatorKind::Events).unwrap(), OperatorKind::Events);
    }

    #[test]
    fn optimize_reports_unordered_and_does_not_absorb_filter() {
        let op = AggregateOperator::new(vec![], "summarize");
        let result = op.optimize(Expr::Literal(Value::Bool(true)), EventOrder::Ordered);
        assert_eq!(result.order, EventOrder::Unordered);
        assert!(result.filter.is_some());
    }

    #[test]
    fn instantiate_drives_a_working_stream() {
        let op = AggregateOperator::new(
            vec![SummarizeItem::Aggregate(AggregateSpec::new(AggregationKind::Count, Expr::Literal(Value::Int64(1))))],
            "summarize",
        );
        let mut c = ctrl();
        let mut stream = op.instantiate(&mut c).unwrap();
        let schema = Schema::new("s", vec![Field::new("x", Type::Int64)]);
        let row = Value::Record(std::sync::Arc::from(vec![("x".to_string(), Value::Int64(1))]));
        let batch = Batch::new(schema, vec![row]);
        assert!(matches!(stream.poll_next(Some(batch), &mut c), StreamPoll::Pending));
        match stream.poll_next(None, &mut c) {
            StreamPoll::Ready(out) => assert_eq!(out.rows(), 1),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn group_dest_defaults_are_respected() {
        let group = GroupSpec::new(FieldPath::parse("k"));
        assert_eq!(group.dest, "k");
    }
}
