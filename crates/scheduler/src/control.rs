//! The scheduler's [`operator::ControlPlane`] implementation.

use std::sync::Arc;

use diagnostics::{DiagnosticHandler, MetricHandler};
use operator::ControlPlane;

/// The control plane handed to a node's stream on every poll.
///
/// Constructed fresh per poll (cloning only `Arc` pointers, which is cheap)
/// rather than held for the node's lifetime, so that `set_waiting` always
/// reflects the outcome of the single poll call that used it.
pub struct SchedulerControlPlane {
    diagnostics: Arc<dyn DiagnosticHandler>,
    metrics: Arc<dyn MetricHandler>,
    operator_index: usize,
    waiting: bool,
}

impl SchedulerControlPlane {
    /// Creates a new control plane for the node at `operator_index`.
    pub fn new(diagnostics: Arc<dyn DiagnosticHandler>, metrics: Arc<dyn MetricHandler>, operator_index: usize) -> Self {
        Self { diagnostics, metrics, operator_index, waiting: false }
    }

    /// Whether the last poll call set this node to waiting.
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }
}

impl ControlPlane for SchedulerControlPlane {
    fn diagnostics(&self) -> &dyn DiagnosticHandler {
        self.diagnostics.as_ref()
    }

    fn metrics(&self) -> &dyn MetricHandler {
        self.metrics.as_ref()
    }

    fn operator_index(&self) -> usize {
        self.operator_index
    }

    fn set_waiting(&mut self, waiting: bool) {
        self.waiting = waiting;
    }
}
