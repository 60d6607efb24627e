//! A small end-to-end pipeline: a fixed in-memory event source feeds a
//! `put` projection and a `summarize` aggregation through a real
//! [`Scheduler`], then the sink prints each resulting batch.
//!
//! Run with `cargo run --example basic_pipeline`.

use expr::{Assignment, Expr, FieldPath};
use operator::{ControlPlane, Error, Operator, OperatorKind, OperatorStream, StreamPoll};
use ops_aggregate::{AggregateOperator, AggregateSpec, GroupSpec, SummarizeItem};
use ops_project::{ProjectOperator, ProjectionMode};
use pipeline::{EngineSettings, PipelineBuilder};
use scheduler::Scheduler;
use value::{Batch, Field, Schema, Type, Value};

fn events_schema() -> Schema {
    Schema::new("alert", vec![Field::new("severity", Type::String), Field::new("host", Type::String)])
}

fn event(severity: &str, host: &str) -> Value {
    Value::Record(
        vec![("severity".to_string(), Value::String(severity.into())), ("host".to_string(), Value::String(host.into()))].into(),
    )
}

/// Emits two fixed batches of alert events, then finishes.
struct FixedSource {
    schema: Schema,
    remaining: Vec<Vec<Value>>,
}

impl FixedSource {
    fn new() -> Self {
        Self {
            schema: events_schema(),
            remaining: vec![
                vec![event("high", "web-3"), event("high", "db-1")],
                vec![event("high", "db-1"), event("low", "db-1")],
            ],
        }
    }
}

impl OperatorStream for FixedSource {
    fn poll_next(&mut self, _input: Option<Batch>, _ctrl: &mut dyn ControlPlane) -> StreamPoll {
        match self.remaining.pop() {
            Some(rows) => StreamPoll::Ready(Batch::new(self.schema.clone(), rows)),
            None => StreamPoll::Done,
        }
    }
}

impl Operator for FixedSource {
    fn name(&self) -> &str {
        "fixed-source"
    }

    fn infer_kind(&self, _input: OperatorKind) -> Result<OperatorKind, Error> {
        Ok(OperatorKind::Events)
    }

    fn instantiate(&self, _ctrl: &mut dyn ControlPlane) -> Result<Box<dyn OperatorStream>, Error> {
        Ok(Box::new(FixedSource::new()))
    }

    fn copy(&self) -> Box<dyn Operator> {
        Box::new(FixedSource::new())
    }
}

/// Logs every batch it receives, standing in for a real exporter.
struct LoggingSink;

impl OperatorStream for LoggingSink {
    fn poll_next(&mut self, input: Option<Batch>, _ctrl: &mut dyn ControlPlane) -> StreamPoll {
        match input {
            Some(batch) => {
                for row in batch.iter() {
                    tracing::info!(?row, "alert summary");
                }
                StreamPoll::Pending
            }
            None => StreamPoll::Done,
        }
    }
}

impl Operator for LoggingSink {
    fn name(&self) -> &str {
        "logging-sink"
    }

    fn infer_kind(&self, input: OperatorKind) -> Result<OperatorKind, Error> {
        Ok(input)
    }

    fn instantiate(&self, _ctrl: &mut dyn ControlPlane) -> Result<Box<dyn OperatorStream>, Error> {
        Ok(Box::new(LoggingSink))
    }

    fn copy(&self) -> Box<dyn Operator> {
        Box::new(LoggingSink)
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let tag = ProjectOperator::new(
        ProjectionMode::Extend,
        vec![Assignment::new(FieldPath::parse("source"), Expr::Literal(Value::String("edge".into())))],
    );

    let count_by_severity = AggregateOperator::new(
        vec![
            SummarizeItem::Group(GroupSpec::new(FieldPath::parse("severity"))),
            SummarizeItem::Aggregate(AggregateSpec::new(
                ops_aggregate::AggregationKind::Count,
                Expr::Field(FieldPath::parse("severity")),
            )),
        ],
        "severity_counts",
    );

    let mut builder = PipelineBuilder::new();
    builder.push(Box::new(FixedSource::new()));
    builder.push(Box::new(tag));
    builder.push(Box::new(count_by_severity));
    builder.push(Box::new(LoggingSink));
    builder.optimize();

    let mut scheduler: Scheduler = builder.build(&EngineSettings::default()).expect("pipeline configuration is valid");
    scheduler.run().expect("pipeline runs to completion");
}
