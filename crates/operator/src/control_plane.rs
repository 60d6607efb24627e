//! The handle operators use to talk back to the scheduler.

use diagnostics::{DiagnosticHandler, MetricHandler};

/// The control plane an [`crate::Operator`] receives while instantiated and
/// while being polled.
///
/// Concrete implementations live in the scheduler crate, which owns the
/// per-node state this trait exposes a safe, narrow view onto — mirroring
/// the original engine's `operator_control_plane`, which likewise hands
/// operators a handle back into the execution node rather than exposing the
/// node itself.
pub trait ControlPlane {
    /// The diagnostics sink this operator should report warnings/errors to.
    fn diagnostics(&self) -> &dyn DiagnosticHandler;

    /// The metrics sink this operator should report measurements to.
    fn metrics(&self) -> &dyn MetricHandler;

    /// This operator's index within its pipeline, used to tag emitted
    /// metrics and diagnostics.
    fn operator_index(&self) -> usize;

    /// Marks this node as waiting on an external response (e.g. a detached
    /// side-channel round trip), so the scheduler does not busy-poll it.
    ///
    /// An operator calls `set_waiting(true)` right before handing off to a
    /// side channel and `set_waiting(false)` once the response arrives,
    /// mirroring `ctrl.set_waiting(true)` around `request(...).then(...)` in
    /// the original engine.
    fn set_waiting(&mut self, waiting: bool);
}
