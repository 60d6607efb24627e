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

//! Diagnostics and metrics: the bus operators and the scheduler use to
//! report warnings, errors, and per-operator measurements without depending
//! on a concrete logging or metrics backend.

mod diagnostic;
mod handler;
mod metric;
mod severity;

pub use diagnostic::Diagnostic;
pub use handler::{DiagnosticHandler, MetricHandler, TracingDiagnosticHandler, TracingMetricHandler};
pub use metric::Metric;
pub use severity::Severity;
