//! Sinks for diagnostics and metrics.

use crate::diagnostic::Diagnostic;
use crate::metric::Metric;

/// A sink operators and the scheduler emit [`Diagnostic`]s to.
pub trait DiagnosticHandler: Send + Sync {
    /// Handles one diagnostic.
    fn emit(&self, diagnostic: Diagnostic);
}

/// A sink operators emit [`Metric`] samples to.
pub trait MetricHandler: Send + Sync {
    /// Handles one metric sample.
    fn emit(&self, metric: Metric);
}

/// A [`DiagnosticHandler`] that only logs through `tracing`, discarding the
/// diagnostic afterward. Suitable as a default when the embedding
/// application does not need to collect diagnostics programmatically.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnosticHandler;

impl DiagnosticHandler for TracingDiagnosticHandler {
    fn emit(&self, diagnostic: Diagnostic) {
        // `Diagnostic::emit` already logs before calling the handler; this
        // handler intentionally does nothing further.
        let _ = diagnostic;
    }
}

/// A [`MetricHandler`] that logs every sample through `tracing` at `info`
/// level with one structured field per metric field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMetricHandler;

impl MetricHandler for TracingMetricHandler {
    fn emit(&self, metric: Metric) {
        tracing::info!(
            operator_index = metric.operator_index,
            schema = %metric.schema_name,
            fields = ?metric.fields,
            "metric"
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use value::Value;

    #[test]
    fn tracing_metric_handler_accepts_samples() {
        let handler = TracingMetricHandler;
        handler.emit(Metric::new(0, "tenzir.metrics.buffer", vec![("used".into(), Value::UInt64(1))]));
    }
}
