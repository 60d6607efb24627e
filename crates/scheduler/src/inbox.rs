//! Bounded, backpressure-aware FIFOs connecting adjacent nodes.

use std::collections::VecDeque;
use value::Batch;

/// The default inbox capacity, in batches, matching the original engine's
/// default per-operator channel depth.
pub const DEFAULT_CAPACITY: usize = 8;

/// A bounded FIFO of batches. A node's downstream neighbor owns an `Inbox`
/// that the node pushes its output into; pushing into a full inbox fails,
/// and the producing node transitions to `Waiting` until the inbox drains.
#[derive(Debug)]
pub struct Inbox {
    queue: VecDeque<Batch>,
    capacity: usize,
}

impl Inbox {
    /// Creates an empty inbox with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self { queue: VecDeque::with_capacity(capacity), capacity }
    }

    /// Whether this inbox has room for another batch.
    pub fn has_room(&self) -> bool {
        self.queue.len() < self.capacity
    }

    /// Whether this inbox is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pushes a batch, returning it back if the inbox is full.
    pub fn push(&mut self, batch: Batch) -> Result<(), Batch> {
        if self.has_room() {
            self.queue.push_back(batch);
            Ok(())
        } else {
            Err(batch)
        }
    }

    /// Pops the oldest batch, if any.
    pub fn pop(&mut self) -> Option<Batch> {
        self.queue.pop_front()
    }
}

impl Default for Inbox {
    fn default() -> Self {
        Inbox::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use value::Schema;

    fn batch() -> Batch {
        Batch::empty(Schema::new("s", vec![]))
    }

    #[test]
    fn push_respects_capacity() {
        let mut inbox = Inbox::new(1);
        assert!(inbox.push(batch()).is_ok());
        assert!(inbox.push(batch()).is_err());
    }

    #[test]
    fn pop_is_fifo() {
        let mut inbox = Inbox::new(4);
        inbox.push(batch()).unwrap();
        inbox.push(batch()).unwrap();
        assert!(inbox.pop().is_some());
        assert!(!inbox.is_empty());
        assert!(inbox.pop().is_some());
        assert!(inbox.is_empty());
    }
}
