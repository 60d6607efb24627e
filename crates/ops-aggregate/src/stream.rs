//! The `summarize` operator's stream-side state machine.

use operator::{ControlPlane, OperatorStream, StreamPoll};
use value::{Batch, Field, Schema, Value};

use crate::function::Accumulator;
use crate::group::{Buckets, GroupKey};
use crate::spec::SummarizeItem;

struct Bucket {
    key: GroupKey,
    accumulators: Vec<Box<dyn Accumulator>>,
}

/// Streaming grouped aggregation.
///
/// Rows arrive via [`AggregateStream::poll_next`] and are folded into
/// per-group buckets; nothing is emitted until the upstream node finishes
/// (signalled by a `None` input), at which point `finish` materializes one
/// row per bucket seen, in first-seen order.
pub struct AggregateStream {
    items: Vec<SummarizeItem>,
    output_schema_name: String,
    buckets: Buckets<Bucket>,
    rows_seen: u64,
    done: bool,
}

impl AggregateStream {
    /// Builds a fresh stream for the given item list, naming its output
    /// schema `output_schema_name`.
    pub fn new(items: Vec<SummarizeItem>, output_schema_name: String) -> Self {
        Self { items, output_schema_name, buckets: Buckets::new(), rows_seen: 0, done: false }
    }

    fn group_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().enumerate().filter_map(|(i, item)| matches!(item, SummarizeItem::Group(_)).then_some(i))
    }

    fn group_key_of(&self, batch: &Batch, row: usize) -> GroupKey {
        let values = self
            .items
            .iter()
            .filter_map(|item| match item {
                SummarizeItem::Group(g) => Some(match &g.by {
                    expr::FieldPath::SchemaName => Value::String(batch.schema().name().into()),
                    expr::FieldPath::Segments(segments) => batch.row(row).get_path(segments),
                }),
                SummarizeItem::Aggregate(_) => None,
            })
            .collect();
        GroupKey(values)
    }

    fn new_bucket(&self, key: GroupKey) -> Bucket {
        Bucket { key, accumulators: Self::build_accumulators(&self.items) }
    }

    fn build_accumulators(items: &[SummarizeItem]) -> Vec<Box<dyn Accumulator>> {
        items
            .iter()
            .filter_map(|item| match item {
                SummarizeItem::Aggregate(a) => Some(a.kind.new_accumulator()),
                SummarizeItem::Group(_) => None,
            })
            .collect()
    }

    /// Folds every row of `batch` into its bucket.
    ///
    /// Rows are processed in maximal runs of consecutive rows sharing the
    /// same group key rather than one at a time: a pre-sorted or
    /// already-grouped upstream batch costs one `update` call per run, not
    /// per row, matching the run-length scan the rest of this crate's
    /// design relies on for efficiency.
    pub fn add(&mut self, batch: &Batch) {
        if batch.is_empty() {
            return;
        }
        self.rows_seen += batch.rows() as u64;
        let keys: Vec<GroupKey> = (0..batch.rows()).map(|row| self.group_key_of(batch, row)).collect();
        let mut begin = 0;
        while begin < keys.len() {
            let mut end = begin + 1;
            while end < keys.len() && keys[end] == keys[begin] {
                end += 1;
            }
            self.apply_run(batch, begin, end, keys[begin].clone());
            begin = end;
        }
    }

    fn apply_run(&mut self, batch: &Batch, begin: usize, end: usize, key: GroupKey) {
        let items = &self.items;
        let bucket = self.buckets.entry(key.clone(), || Bucket { key, accumulators: Self::build_accumulators(items) });
        let mut acc_index = 0;
        for item in items {
            if let SummarizeItem::Aggregate(a) = item {
                let values: Vec<Value> = (begin..end).map(|row| a.arg.eval(batch, row)).collect();
                bucket.accumulators[acc_index].update(&values);
                acc_index += 1;
            }
        }
    }

    /// Materializes the final output batch: one row per bucket in
    /// first-seen order, or — if no group keys were configured and no
    /// input batch was ever observed — a single all-identity-element row
    /// (e.g. `summarize count()` over zero input rows yields one row with
    /// `count = 0`).
    pub fn finish(&self) -> Batch {
        if self.buckets.is_empty() {
            if self.group_indices().next().is_none() && self.rows_seen == 0 {
                let bucket = self.new_bucket(GroupKey(Vec::new()));
                let row = self.row_from(&bucket);
                let schema = self.schema_from_row(&row);
                return Batch::new(schema, vec![row]);
            }
            return Batch::empty(Schema::new(self.output_schema_name.clone(), Vec::new()));
        }
        let rows: Vec<Value> = self.buckets.iter_in_order().map(|(_, bucket)| self.row_from(bucket)).collect();
        let schema = self.schema_from_row(&rows[0]);
        Batch::new(schema, rows)
    }

    fn row_from(&self, bucket: &Bucket) -> Value {
        let mut group_values = bucket.key.0.iter();
        let mut acc_index = 0;
        let fields = self
            .items
            .iter()
            .map(|item| match item {
                SummarizeItem::Group(g) => {
                    let value = group_values.next().cloned().unwrap_or(Value::Null);
                    (g.dest.clone(), value)
                }
                SummarizeItem::Aggregate(a) => {
                    let value = bucket.accumulators.get(acc_index).map(Accumulator::finish).unwrap_or(Value::Null);
                    acc_index += 1;
                    (a.dest.clone(), value)
                }
            })
            .collect();
        Value::Record(std::sync::Arc::from(fields))
    }

    fn schema_from_row(&self, row: &Value) -> Schema {
        let fields = match row {
            Value::Record(fields) => fields.iter().map(|(name, value)| Field::new(name.clone(), value.kind())).collect(),
            _ => Vec::new(),
        };
        Schema::new(self.output_schema_name.clone(), fields)
    }
}

impl OperatorStream for AggregateStream {
    fn poll_next(&mut self, input: Option<Batch>, _ctrl: &mut dyn ControlPlane) -> StreamPoll {
        if self.done {
            return StreamPoll::Done;
        }
        match input {
            Some(batch) => {
                self.add(&batch);
                StreamPoll::Pending
            }
            None => {
                self.done = true;
                StreamPoll::Ready(self.finish())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::function::AggregationKind;
    use crate::spec::{AggregateSpec, GroupSpec};
    use expr::{Expr, FieldPath};
    use value::{Field as VField, Type};

    fn events_schema() -> Schema {
        Schema::new("events", vec![VField::new("k", Type::String), VField::new("v", Type::Int64)])
    }

    fn row(k: &str, v: i64) -> Value {
        Value::Record(std::sync::Arc::from(vec![("k".to_string(), Value::String(k.into())), ("v".to_string(), Value::Int64(v))]))
    }

    /// `summarize sum(v), k` groups rows by `k` and sums `v` within each
    /// group, emitting one row per distinct `k` seen.
    #[test]
    fn groups_and_sums_per_key() {
        let items = vec![
            SummarizeItem::Aggregate(AggregateSpec::new(AggregationKind::Sum, Expr::Field(FieldPath::parse("v")))),
            SummarizeItem::Group(GroupSpec::new(FieldPath::parse("k"))),
        ];
        let mut stream = AggregateStream::new(items, "summarize".into());
        let batch = Batch::new(events_schema(), vec![row("a", 1), row("a", 2), row("b", 10)]);
        stream.add(&batch);
        let out = stream.finish();
        assert_eq!(out.rows(), 2);
        assert_eq!(out.row(0), &Value::Record(std::sync::Arc::from(vec![
            ("sum".to_string(), Value::Int64(3)),
            ("k".to_string(), Value::String("a".into())),
        ])));
        assert_eq!(out.row(1), &Value::Record(std::sync::Arc::from(vec![
            ("sum".to_string(), Value::Int64(10)),
            ("k".to_string(), Value::String("b".into())),
        ])));
    }

    /// `summarize count()` over zero input rows still yields one row,
    /// `{count: 0}`, rather than an empty batch.
    #[test]
    fn count_over_empty_input_yields_one_identity_row() {
        let items = vec![SummarizeItem::Aggregate(AggregateSpec::new(AggregationKind::Count, Expr::Literal(Value::Int64(1))))];
        let stream = AggregateStream::new(items, "summarize".into());
        let out = stream.finish();
        assert_eq!(out.rows(), 1);
        assert_eq!(out.row(0), &Value::Record(std::sync::Arc::from(vec![("count".to_string(), Value::UInt64(0))])));
    }

    /// One row per distinct group value is emitted, and group order matches
    /// first-seen order in the input.
    #[test]
    fn one_row_per_distinct_group() {
        let items = vec![SummarizeItem::Group(GroupSpec::new(FieldPath::parse("k")))];
        let mut stream = AggregateStream::new(items, "summarize".into());
        let batch = Batch::new(events_schema(), vec![row("b", 1), row("a", 1), row("b", 2)]);
        stream.add(&batch);
        let out = stream.finish();
        assert_eq!(out.rows(), 2);
        assert_eq!(out.row(0), &Value::Record(std::sync::Arc::from(vec![("k".to_string(), Value::String("b".into()))])));
        assert_eq!(out.row(1), &Value::Record(std::sync::Arc::from(vec![("k".to_string(), Value::String("a".into()))])));
    }

    /// A batch that arrives already grouped (equal keys consecutive) is
    /// folded with one `update` call per run.
    #[test]
    fn pre_sorted_batch_applies_one_update_per_run() {
        let items = vec![
            SummarizeItem::Aggregate(AggregateSpec::new(AggregationKind::Count, Expr::Literal(Value::Int64(1)))),
            SummarizeItem::Group(GroupSpec::new(FieldPath::parse("k"))),
        ];
        let mut stream = AggregateStream::new(items, "summarize".into());
        let batch = Batch::new(events_schema(), vec![row("a", 1), row("a", 2), row("a", 3), row("b", 1)]);
        stream.add(&batch);
        let out = stream.finish();
        assert_eq!(out.rows(), 2);
        assert_eq!(out.row(0), &Value::Record(std::sync::Arc::from(vec![
            ("count".to_string(), Value::UInt64(3)),
            ("k".to_string(), Value::String("a".into())),
        ])));
    }

    #[test]
    fn poll_next_buffers_until_upstream_finishes() {
        use diagnostics::{TracingDiagnosticHandler, TracingMetricHandler};

        struct NullControlPlane {
            diagnostics: TracingDiagnosticHandler,
            metrics: TracingMetricHandler,
        }
        impl ControlPlane for NullControlPlane {
            fn diagnostics(&self) -> &dyn diagnostics::DiagnosticHandler {
                &self.diagnostics
            }
            fn metrics(&self) -> &dyn diagnostics::MetricHandler {
                &self.metrics
            }
            fn operator_index(&self) -> usize {
                0
            }
            fn set_waiting(&mut self, _waiting: bool) {}
        }

        let items = vec![SummarizeItem::Aggregate(AggregateSpec::new(AggregationKind::Count, Expr::Literal(Value::Int64(1))))];
        let mut stream = AggregateStream::new(items, "summarize".into());
        let mut ctrl = NullControlPlane { diagnostics: TracingDiagnosticHandler, metrics: TracingMetricHandler };
        let batch = Batch::new(events_schema(), vec![row("a", 1)]);
        assert!(matches!(stream.poll_next(Some(batch), &mut ctrl), StreamPoll::Pending));
        assert!(matches!(stream.poll_next(None, &mut ctrl), StreamPoll::Ready(_)));
        assert!(matches!(stream.poll_next(None, &mut ctrl), StreamPoll::Done));
    }
}
