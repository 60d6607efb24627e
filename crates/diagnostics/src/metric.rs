//! Per-operator metric emission.

use value::Value;

/// A single metric sample emitted by an operator, e.g. `buffer`'s
/// `used`/`free`/`dropped` counters.
#[derive(Debug, Clone)]
pub struct Metric {
    /// The index of the emitting operator within its pipeline.
    pub operator_index: usize,
    /// The name of the metric schema this sample conforms to, e.g.
    /// `"tenzir.metrics.buffer"`.
    pub schema_name: String,
    /// The metric's fields, in declaration order.
    pub fields: Vec<(String, Value)>,
}

impl Metric {
    /// Creates a new metric sample.
    pub fn new(operator_index: usize, schema_name: impl Into<String>, fields: Vec<(String, Value)>) -> Self {
        Self { operator_index, schema_name: schema_name.into(), fields }
    }
}
