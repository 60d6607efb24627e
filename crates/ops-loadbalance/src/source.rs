//! The per-replica source node a sub-pipeline scheduler is rooted at.

use std::sync::{Arc, Mutex};

use operator::{ControlPlane, OperatorStream, StreamPoll};
use value::Batch;

use crate::coordinator::Coordinator;

/// A sub-pipeline's own source: rather than reading from the outside world,
/// it pulls whatever batch the coordinator has round-robin-assigned to its
/// `slot`, appearing to its scheduler as an ordinary source operator.
pub struct LoadBalanceSource {
    coordinator: Arc<Mutex<Coordinator>>,
    slot: usize,
}

impl LoadBalanceSource {
    /// Creates a source bound to `slot` of `coordinator`.
    pub fn new(coordinator: Arc<Mutex<Coordinator>>, slot: usize) -> Self {
        Self { coordinator, slot }
    }
}

impl OperatorStream for LoadBalanceSource {
    fn poll_next(&mut self, _input: Option<Batch>, ctrl: &mut dyn ControlPlane) -> StreamPoll {
        let mut coordinator = self.coordinator.lock().expect("coordinator mutex poisoned");
        match coordinator.try_take(self.slot) {
            Some(batch) => StreamPoll::Ready(batch),
            None if coordinator.is_drained(self.slot) => StreamPoll::Done,
            None => {
                ctrl.set_waiting(true);
                StreamPoll::Pending
            }
        }
    }
}
