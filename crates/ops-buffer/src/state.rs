//! The buffer's observable lifecycle states.

/// The state of a [`crate::BufferStream`], derived from its queue occupancy
/// and pending work rather than tracked explicitly — this is a read-only
/// projection used by metrics and tests, not a state machine the stream
/// transitions through imperatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    /// Queue empty, no pending write, upstream not yet finished.
    Idle,
    /// Queue non-empty, no write parked.
    Filling,
    /// A write could not fully enqueue under `Block` policy and is waiting
    /// for capacity to free up.
    ProducerParked,
    /// Queue empty and upstream has not finished; the next poll will
    /// produce nothing until new input or upstream completion arrives.
    ConsumerParked,
    /// Upstream is finished and the queue still holds buffered batches.
    Draining,
}
