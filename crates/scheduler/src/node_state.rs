//! The lifecycle states of a scheduled node.

/// The state of one [`crate::ExecutionNode`] within a [`crate::Scheduler`].
#[derive(Debug, Clone)]
pub enum NodeState {
    /// Not yet polled for the first time.
    Pending,
    /// Eligible to be polled this round.
    Runnable,
    /// Blocked on input, on downstream capacity, or on an external
    /// response; will become `Runnable` again once that condition clears.
    Waiting,
    /// Exhausted; will never be polled again.
    Finished,
    /// Failed; the whole pipeline is cancelled. The error itself is reported
    /// via the `Err` returned from `Scheduler::run`, not carried here —
    /// `operator::Error` has no `Clone` impl, so sibling nodes are cancelled
    /// with the payload-free `Cancelled` state instead of a copy of it.
    Failed,
    /// Stopped because a sibling node failed and cancellation propagated to
    /// this node before it could fail or finish on its own.
    Cancelled,
}

impl NodeState {
    /// Whether this node will never change state again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeState::Finished | NodeState::Failed | NodeState::Cancelled)
    }
}
