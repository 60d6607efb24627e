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

//! Tellurium is the execution substrate of a streaming security-telemetry
//! engine: it turns a compiled **pipeline** — an ordered list of
//! **operators** — into a running dataflow.
//!
//! A [`value::Batch`] is the unit of data operators exchange: an immutable,
//! schema-tagged block of rows. Operators implement the [`operator::Operator`]
//! contract and are driven by a [`scheduler::Scheduler`], one per pipeline,
//! cooperatively and single-threadedly, with bounded backpressure-aware
//! inboxes between adjacent nodes. [`pipeline::PipelineBuilder`] resolves a
//! list of named, configured operators through a registry, applies the
//! right-to-left `optimize` pass, and hands the result to a `Scheduler`.
//!
//! Four concrete operator families exercise this substrate end-to-end:
//! [`ops_buffer`] (bounded queueing with a block/drop overflow policy),
//! [`ops_loadbalance`] (fair fan-out to independently scheduled
//! sub-pipelines), [`ops_project`] (the `put`/`extend`/`replace`/`set`
//! column-projection family), and [`ops_aggregate`] (`summarize`-style
//! grouped, incremental aggregation).

pub use diagnostics;
pub use expr;
pub use operator;
pub use ops_aggregate;
pub use ops_buffer;
pub use ops_loadbalance;
pub use ops_project;
pub use pipeline;
pub use scheduler;
pub use value;
