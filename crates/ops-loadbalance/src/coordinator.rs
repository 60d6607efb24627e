//! Round-robin distribution of arriving batches across sub-pipeline slots.

use std::collections::VecDeque;

use value::Batch;

/// Holds one read queue per sub-pipeline replica and assigns each arriving
/// batch to the next replica in round-robin order, so a batch is handed to
/// exactly one replica and each replica's own queue preserves arrival
/// order.
pub struct Coordinator {
    queues: Vec<VecDeque<Batch>>,
    next: usize,
    finished: bool,
}

impl Coordinator {
    /// Creates a coordinator with one empty queue per replica.
    pub fn new(replicas: usize) -> Self {
        Self { queues: (0..replicas).map(|_| VecDeque::new()).collect(), next: 0, finished: false }
    }

    /// Assigns `batch` to the next replica's queue in rotation.
    pub fn offer(&mut self, batch: Batch) {
        let slot = self.next;
        self.next = (self.next + 1) % self.queues.len();
        self.queues[slot].push_back(batch);
    }

    /// Marks the coordinator as having seen the end of its upstream input;
    /// no further batches will ever be offered.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Pops the oldest batch queued for `slot`, if any.
    pub fn try_take(&mut self, slot: usize) -> Option<Batch> {
        self.queues[slot].pop_front()
    }

    /// Whether `slot` will never receive another batch: the coordinator is
    /// finished and nothing remains queued for it.
    pub fn is_drained(&self, slot: usize) -> bool {
        self.finished && self.queues[slot].is_empty()
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
    fn distributes_round_robin() {
        let mut c = Coordinator::new(2);
        c.offer(batch());
        c.offer(batch());
        c.offer(batch());
        assert!(c.try_take(0).is_some());
        assert!(c.try_take(1).is_some());
        assert!(c.try_take(0).is_some());
        assert!(c.try_take(0).is_none());
        assert!(c.try_take(1).is_none());
    }

    #[test]
    fn drained_only_once_finished_and_empty() {
        let mut c = Coordinator::new(1);
        c.offer(batch());
        assert!(!c.is_drained(0));
        let _ = c.try_take(0);
        assert!(!c.is_drained(0));
        c.finish();
        assert!(c.is_drained(0));
    }
}
