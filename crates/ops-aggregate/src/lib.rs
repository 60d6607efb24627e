#![deny(
    trivial_numeric_casts,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    unused_results
)]
#![warn(rust_2021_compatibility, unreachable_pub)]

//! Grouped streaming aggregation: the `summarize`/`aggregate` operator
//! family.
//!
//! Rows are folded into per-group buckets as they arrive and nothing is
//! emitted until the upstream has finished, at which point one output row
//! per distinct group is materialized (see [`AggregateStream::finish`]).
//! Unlike `ops-buffer`/`ops-loadbalance`/`ops-project`, this family has only
//! one operator, configured by an ordered list of group keys and aggregation
//! functions rather than a mode enum.

mod aggregate_operator;
mod function;
mod group;
mod spec;
mod stream;

pub use aggregate_operator::AggregateOperator;
pub use function::{Accumulator, AggregationKind};
pub use spec::{AggregateSpec, GroupSpec, SummarizeItem};
pub use stream::AggregateStream;
