//! Errors produced while driving a scheduler.

/// An error produced while running a [`crate::Scheduler`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An operator node failed.
    #[error("operator `{node}` failed: {source}")]
    NodeFailed {
        /// The name of the operator that failed.
        node: String,
        /// The underlying operator error.
        #[source]
        source: operator::Error,
    },
    /// No node made progress for a full round even though the pipeline is
    /// not finished — every node is blocked on a neighbor that is itself
    /// blocked. This indicates a cycle in the backpressure graph, which a
    /// correctly built linear (or load-balanced) pipeline should never
    /// produce.
    #[error("scheduler deadlocked: no node made progress")]
    Deadlocked,
}
