//! The poll-based state machine an instantiated operator drives.

use value::Batch;

use crate::control_plane::ControlPlane;
use crate::error::Error;

/// The outcome of one [`OperatorStream::poll_next`] call.
#[derive(Debug)]
pub enum StreamPoll {
    /// A batch is ready. An empty batch is a valid value here and signals
    /// "no data yet, keep scheduling" rather than completion — mirroring
    /// `co_yield {}` in the original engine.
    Ready(Batch),
    /// Nothing is ready yet; the scheduler should reschedule this node once
    /// its upstream or side channel makes progress.
    Pending,
    /// This stream is exhausted and will never produce another batch.
    Done,
    /// This stream failed; the scheduler propagates cancellation.
    Err(Error),
}

/// The generator-construction result of [`crate::Operator::instantiate`].
///
/// Unlike Rust's `Stream` trait, `poll_next` is not `Future`-based: this
/// substrate's scheduler is a bespoke cooperative loop (see
/// `SPEC_FULL.md`'s `[MODULE: scheduler]` Design Notes), not an async
/// executor, so there is no `Waker` to register — a node that cannot make
/// progress returns `StreamPoll::Pending` and relies on the scheduler
/// rescheduling it once its inbox or side channel changes.
pub trait OperatorStream: Send {
    /// Advances this stream by one step, optionally pulling one batch of
    /// input from `input` first (pass an empty batch when there is no new
    /// input available this poll, e.g. a source's input channel).
    fn poll_next(&mut self, input: Option<Batch>, ctrl: &mut dyn ControlPlane) -> StreamPoll;
}
