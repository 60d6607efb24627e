//! Drives every replica's sub-pipeline scheduler from the parent poll loop.

use std::sync::{Arc, Mutex};

use operator::{ControlPlane, Error, OperatorStream, StreamPoll};
use scheduler::Scheduler;
use value::Batch;

use crate::coordinator::Coordinator;

/// The instantiated `load-balance` operator.
///
/// Acts as a terminal fan-out within its own pipeline: it never yields a
/// batch downstream (see [`crate::LoadBalanceOperator::infer_kind`]).
/// Every poll hands any new input to the coordinator, then advances every
/// replica's scheduler by one [`Scheduler::step`], finishing only once all
/// of them have drained.
pub struct LoadBalanceStream {
    coordinator: Arc<Mutex<Coordinator>>,
    subschedulers: Vec<Scheduler>,
}

impl LoadBalanceStream {
    pub(crate) fn new(coordinator: Arc<Mutex<Coordinator>>, subschedulers: Vec<Scheduler>) -> Self {
        Self { coordinator, subschedulers }
    }
}

impl OperatorStream for LoadBalanceStream {
    fn poll_next(&mut self, input: Option<Batch>, ctrl: &mut dyn ControlPlane) -> StreamPoll {
        let mut coordinator = self.coordinator.lock().expect("coordinator mutex poisoned");
        match input {
            Some(batch) => coordinator.offer(batch),
            None => coordinator.finish(),
        }
        drop(coordinator);

        let mut all_finished = true;
        for sub in &mut self.subschedulers {
            match sub.step() {
                Ok(finished) => all_finished &= finished,
                Err(source) => {
                    return StreamPoll::Err(Error::Failed { operator: "load-balance".into(), message: source.to_string() });
                }
            }
        }

        if all_finished {
            StreamPoll::Done
        } else {
            ctrl.set_waiting(true);
            StreamPoll::Pending
        }
    }
}
