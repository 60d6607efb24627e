//! Diagnostics and metrics wrappers that tag a sub-pipeline's emissions
//! with a synthetic, globally unique identity before forwarding them,
//! mirroring the parent engine's (op_index, metric_index) remapping for
//! diagnostics raised inside a nested pipeline.

use std::sync::Arc;

use diagnostics::{Diagnostic, DiagnosticHandler, Metric, MetricHandler};

/// Tags every diagnostic raised within replica `sub_index` before
/// forwarding it to `inner`.
pub struct RemappingDiagnosticHandler {
    inner: Arc<dyn DiagnosticHandler>,
    sub_index: usize,
}

impl RemappingDiagnosticHandler {
    /// Wraps `inner`, tagging everything it receives with `sub_index`.
    pub fn new(inner: Arc<dyn DiagnosticHandler>, sub_index: usize) -> Self {
        Self { inner, sub_index }
    }
}

impl DiagnosticHandler for RemappingDiagnosticHandler {
    fn emit(&self, diagnostic: Diagnostic) {
        self.inner.emit(diagnostic.note_text(format!("load-balance replica {}", self.sub_index)));
    }
}

/// Remaps a sub-pipeline's locally scoped operator indices onto a globally
/// unique id (`sub_index * width + local index`) before forwarding to
/// `inner`, so metrics from different replicas never collide.
pub struct RemappingMetricHandler {
    inner: Arc<dyn MetricHandler>,
    sub_index: usize,
    width: usize,
}

impl RemappingMetricHandler {
    /// Wraps `inner`, offsetting every metric's `operator_index` by
    /// `sub_index * width`.
    pub fn new(inner: Arc<dyn MetricHandler>, sub_index: usize, width: usize) -> Self {
        Self { inner, sub_index, width }
    }
}

impl MetricHandler for RemappingMetricHandler {
    fn emit(&self, metric: Metric) {
        let operator_index = self.sub_index * self.width + metric.operator_index;
        self.inner.emit(Metric { operator_index, ..metric });
    }
}
