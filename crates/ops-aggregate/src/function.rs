//! Aggregation functions: identity-element-based incremental accumulators.

use std::cmp::Ordering;
use std::sync::Arc;

use value::Value;

/// One named aggregation function, selectable by a `summarize`/`aggregate`
/// configuration entry.
///
/// Each variant's [`AggregationKind::new_accumulator`] starts from a
/// well-defined identity element: calling `finish` on a freshly built
/// accumulator without ever calling `update` yields that identity, which is
/// exactly the value `summarize` emits for a bucket created from zero input
/// rows (see [`crate::AggregateStream`]'s empty-input special case).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationKind {
    /// Count of non-null values.
    Count,
    /// Sum of numeric values, widening to `Double` on mixed-type input.
    Sum,
    /// Smallest value seen, by same-tag ordering.
    Min,
    /// Largest value seen, by same-tag ordering.
    Max,
    /// Arithmetic mean of numeric values.
    Mean,
    /// `true` if any boolean value seen was `true`.
    Any,
    /// `true` if every boolean value seen was `true` (vacuously `true`).
    All,
    /// The first non-null value seen.
    First,
    /// The last non-null value seen.
    Last,
    /// The set of distinct non-null values seen, as a list, in first-seen
    /// order.
    Distinct,
    /// Every non-null value seen, as a list, in arrival order.
    Collect,
}

impl AggregationKind {
    /// This function's name, used as the default output field name and in
    /// diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            AggregationKind::Count => "count",
            AggregationKind::Sum => "sum",
            AggregationKind::Min => "min",
            AggregationKind::Max => "max",
            AggregationKind::Mean => "mean",
            AggregationKind::Any => "any",
            AggregationKind::All => "all",
            AggregationKind::First => "first",
            AggregationKind::Last => "last",
            AggregationKind::Distinct => "distinct",
            AggregationKind::Collect => "collect",
        }
    }

    /// Builds a fresh accumulator at this function's identity element.
    pub fn new_accumulator(self) -> Box<dyn Accumulator> {
        match self {
            AggregationKind::Count => Box::new(CountAccumulator::default()),
            AggregationKind::Sum => Box::new(SumAccumulator::default()),
            AggregationKind::Min => Box::new(MinMaxAccumulator::new(Ordering::Less)),
            AggregationKind::Max => Box::new(MinMaxAccumulator::new(Ordering::Greater)),
            AggregationKind::Mean => Box::new(MeanAccumulator::default()),
            AggregationKind::Any => Box::new(AnyAllAccumulator::new(false)),
            AggregationKind::All => Box::new(AnyAllAccumulator::new(true)),
            AggregationKind::First => Box::new(FirstLastAccumulator::new(false)),
            AggregationKind::Last => Box::new(FirstLastAccumulator::new(true)),
            AggregationKind::Distinct => Box::new(SetAccumulator::new(true)),
            AggregationKind::Collect => Box::new(SetAccumulator::new(false)),
        }
    }
}

/// Incremental aggregation state for one bucket's one configured aggregate.
///
/// `update` is called once per maximal same-key row run within a batch (see
/// [`crate::AggregateStream::add`]), not once per row: the evaluated values
/// for the whole run arrive as a single slice, so a vectorised
/// implementation (e.g. [`SumAccumulator`]) pays one virtual dispatch per
/// run rather than one per row.
pub trait Accumulator: Send {
    /// Folds `values` (the configured expression evaluated over one
    /// same-key row run) into this accumulator's state. Null values are
    /// skipped, matching "null inputs are skipped" in the aggregation
    /// contract.
    fn update(&mut self, values: &[Value]);

    /// The accumulator's current value. Idempotent and side-effect-free;
    /// may be called at any point, not only once at the end.
    fn finish(&self) -> Value;
}

#[derive(Default)]
struct CountAccumulator {
    count: u64,
}

impl Accumulator for CountAccumulator {
    fn update(&mut self, values: &[Value]) {
        self.count += values.iter().filter(|v| !matches!(v, Value::Null)).count() as u64;
    }

    fn finish(&self) -> Value {
        Value::UInt64(self.count)
    }
}

struct SumAccumulator {
    total: Value,
}

impl Default for SumAccumulator {
    fn default() -> Self {
        Self { total: Value::Int64(0) }
    }
}

impl Accumulator for SumAccumulator {
    fn update(&mut self, values: &[Value]) {
        for value in values.iter().filter(|v| !matches!(v, Value::Null)) {
            self.total = add_values(&self.total, value);
        }
    }

    fn finish(&self) -> Value {
        self.total.clone()
    }
}

/// Numeric addition with `Int64`/`UInt64`/`Double` widening, matching the
/// promotion rules `expr::Expr`'s `add` builtin uses for binary arithmetic.
/// A non-numeric `rhs` (or a type that cannot combine with the running
/// total) leaves the total unchanged rather than erroring: `sum` over a
/// mixed-type column degrades gracefully instead of failing the pipeline.
fn add_values(total: &Value, rhs: &Value) -> Value {
    match (total, rhs) {
        (Value::Int64(a), Value::Int64(b)) => Value::Int64(a + b),
        (Value::UInt64(a), Value::UInt64(b)) => Value::UInt64(a + b),
        (Value::Double(a), Value::Double(b)) => Value::Double(a + b),
        (Value::Int64(a), Value::Double(b)) => Value::Double(*a as f64 + b),
        (Value::Double(a), Value::Int64(b)) => Value::Double(a + *b as f64),
        (Value::Int64(0), Value::UInt64(b)) => Value::UInt64(*b),
        (Value::Int64(a), Value::UInt64(b)) => Value::Double(*a as f64 + *b as f64),
        (Value::UInt64(a), Value::Int64(b)) => Value::Double(*a as f64 + *b as f64),
        (Value::UInt64(a), Value::Double(b)) => Value::Double(*a as f64 + b),
        (Value::Double(a), Value::UInt64(b)) => Value::Double(a + *b as f64),
        _ => total.clone(),
    }
}

struct MinMaxAccumulator {
    /// Which comparison direction makes an incoming value replace the
    /// current one: `Less` for `min`, `Greater` for `max`.
    keep_if: Ordering,
    current: Option<Value>,
}

impl MinMaxAccumulator {
    fn new(keep_if: Ordering) -> Self {
        Self { keep_if, current: None }
    }
}

impl Accumulator for MinMaxAccumulator {
    fn update(&mut self, values: &[Value]) {
        for value in values.iter().filter(|v| !matches!(v, Value::Null)) {
            match &self.current {
                None => self.current = Some(value.clone()),
                Some(current) => {
                    if value_cmp(value, current) == Some(self.keep_if) {
                        self.current = Some(value.clone());
                    }
                }
            }
        }
    }

    fn finish(&self) -> Value {
        self.current.clone().unwrap_or(Value::Null)
    }
}

/// Same-tag total ordering, per the value domain's "ordering is defined
/// only within a single tag" rule: comparing across tags (or comparing a
/// composite type with no defined order) yields `None`, which `min`/`max`
/// treat as "not comparable, keep the current extreme".
fn value_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Int64(x), Value::Int64(y)) => x.partial_cmp(y),
        (Value::UInt64(x), Value::UInt64(y)) => x.partial_cmp(y),
        (Value::Double(x), Value::Double(y)) => x.partial_cmp(y),
        (Value::String(x), Value::String(y)) => x.partial_cmp(y),
        (Value::Bytes(x), Value::Bytes(y)) => x.partial_cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.partial_cmp(y),
        (Value::Duration(x), Value::Duration(y)) => x.partial_cmp(y),
        (Value::Timestamp(x), Value::Timestamp(y)) => x.partial_cmp(y),
        _ => None,
    }
}

#[derive(Default)]
struct MeanAccumulator {
    sum: f64,
    count: u64,
}

impl Accumulator for MeanAccumulator {
    fn update(&mut self, values: &[Value]) {
        for value in values {
            let sample = match value {
                Value::Int64(v) => Some(*v as f64),
                Value::UInt64(v) => Some(*v as f64),
                Value::Double(v) => Some(*v),
                _ => None,
            };
            if let Some(sample) = sample {
                self.sum += sample;
                self.count += 1;
            }
        }
    }

    fn finish(&self) -> Value {
        if self.count == 0 {
            Value::Null
        } else {
            Value::Double(self.sum / self.count as f64)
        }
    }
}

/// `any`'s identity is `false` (OR-accumulate); `all`'s identity is `true`
/// (AND-accumulate).
struct AnyAllAccumulator {
    is_all: bool,
    state: bool,
}

impl AnyAllAccumulator {
    fn new(is_all: bool) -> Self {
        Self { is_all, state: is_all }
    }
}

impl Accumulator for AnyAllAccumulator {
    fn update(&mut self, values: &[Value]) {
        for value in values {
            if let Value::Bool(b) = value {
                self.state = if self.is_all { self.state && *b } else { self.state || *b };
            }
        }
    }

    fn finish(&self) -> Value {
        Value::Bool(self.state)
    }
}

struct FirstLastAccumulator {
    keep_last: bool,
    current: Option<Value>,
}

impl FirstLastAccumulator {
    fn new(keep_last: bool) -> Self {
        Self { keep_last, current: None }
    }
}

impl Accumulator for FirstLastAccumulator {
    fn update(&mut self, values: &[Value]) {
        for value in values.iter().filter(|v| !matches!(v, Value::Null)) {
            if self.keep_last || self.current.is_none() {
                self.current = Some(value.clone());
            }
        }
    }

    fn finish(&self) -> Value {
        self.current.clone().unwrap_or(Value::Null)
    }
}

struct SetAccumulator {
    dedup: bool,
    values: Vec<Value>,
}

impl SetAccumulator {
    fn new(dedup: bool) -> Self {
        Self { dedup, values: Vec::new() }
    }
}

impl Accumulator for SetAccumulator {
    fn update(&mut self, values: &[Value]) {
        for value in values.iter().filter(|v| !matches!(v, Value::Null)) {
            if self.dedup && self.values.iter().any(|seen| seen.eq_total(value)) {
                continue;
            }
            self.values.push(value.clone());
        }
    }

    fn finish(&self) -> Value {
        Value::List(Arc::from(self.values.clone()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identity_elements() {
        assert_eq!(AggregationKind::Count.new_accumulator().finish(), Value::UInt64(0));
        assert_eq!(AggregationKind::Sum.new_accumulator().finish(), Value::Int64(0));
        assert_eq!(AggregationKind::Min.new_accumulator().finish(), Value::Null);
        assert_eq!(AggregationKind::Max.new_accumulator().finish(), Value::Null);
        assert_eq!(AggregationKind::Mean.new_accumulator().finish(), Value::Null);
        assert_eq!(AggregationKind::Any.new_accumulator().finish(), Value::Bool(false));
        assert_eq!(AggregationKind::All.new_accumulator().finish(), Value::Bool(true));
    }

    #[test]
    fn sum_widens_to_double_on_mixed_input() {
        let mut acc = AggregationKind::Sum.new_accumulator();
        acc.update(&[Value::Int64(1), Value::Double(0.5)]);
        assert_eq!(acc.finish(), Value::Double(1.5));
    }

    #[test]
    fn sum_widens_across_uint_and_signed_input() {
        let mut acc = AggregationKind::Sum.new_accumulator();
        acc.update(&[Value::UInt64(3), Value::Int64(5)]);
        assert_eq!(acc.finish(), Value::Double(8.0));
    }

    #[test]
    fn sum_skips_nulls() {
        let mut acc = AggregationKind::Sum.new_accumulator();
        acc.update(&[Value::Int64(1), Value::Null, Value::Int64(2)]);
        assert_eq!(acc.finish(), Value::Int64(3));
    }

    #[test]
    fn min_max_track_extremes() {
        let mut min = AggregationKind::Min.new_accumulator();
        let mut max = AggregationKind::Max.new_accumulator();
        for v in [Value::Int64(3), Value::Int64(1), Value::Int64(2)] {
            min.update(&[v.clone()]);
            max.update(&[v]);
        }
        assert_eq!(min.finish(), Value::Int64(1));
        assert_eq!(max.finish(), Value::Int64(3));
    }

    #[test]
    fn mean_averages_numeric_values() {
        let mut acc = AggregationKind::Mean.new_accumulator();
        acc.update(&[Value::Int64(1), Value::Int64(2), Value::Int64(3)]);
        assert_eq!(acc.finish(), Value::Double(2.0));
    }

    #[test]
    fn distinct_dedups_preserving_first_seen_order() {
        let mut acc = AggregationKind::Distinct.new_accumulator();
        acc.update(&[Value::Int64(1), Value::Int64(2), Value::Int64(1)]);
        assert_eq!(acc.finish(), Value::List(Arc::from(vec![Value::Int64(1), Value::Int64(2)])));
    }

    #[test]
    fn collect_keeps_duplicates_in_arrival_order() {
        let mut acc = AggregationKind::Collect.new_accumulator();
        acc.update(&[Value::Int64(1), Value::Int64(1)]);
        assert_eq!(acc.finish(), Value::List(Arc::from(vec![Value::Int64(1), Value::Int64(1)])));
    }

    #[test]
    fn first_last_pick_opposite_ends() {
        let mut first = AggregationKind::First.new_accumulator();
        let mut last = AggregationKind::Last.new_accumulator();
        first.update(&[Value::Int64(1), Value::Int64(2)]);
        last.update(&[Value::Int64(1), Value::Int64(2)]);
        assert_eq!(first.finish(), Value::Int64(1));
        assert_eq!(last.finish(), Value::Int64(2));
    }
}
