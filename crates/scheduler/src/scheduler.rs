//! The cooperative drive loop.

use std::sync::Arc;

use diagnostics::{DiagnosticHandler, MetricHandler};
use operator::StreamPoll;
use tracing::{debug, trace, warn};

use crate::control::SchedulerControlPlane;
use crate::error::Error;
use crate::node::ExecutionNode;
use crate::node_state::NodeState;

/// Drives a linear chain of instantiated operators to completion.
///
/// A pipeline is a `Vec` of nodes, node `i`'s output feeding node `i + 1`'s
/// inbox; the first node is a source (always polled with `input = None`) and
/// the last node is a sink (its output, if any, is simply dropped once
/// produced — nothing downstream consumes it). `run` repeatedly scans for a
/// `Runnable` node, polls it once, and folds the result back into the node
/// graph, mirroring the original engine's single coroutine-driven scheduling
/// loop rather than a multi-threaded work-stealing executor.
pub struct Scheduler {
    nodes: Vec<ExecutionNode>,
    diagnostics: Arc<dyn DiagnosticHandler>,
    metrics: Arc<dyn MetricHandler>,
}

impl Scheduler {
    /// Builds a scheduler over `nodes`, in source-to-sink order.
    pub fn new(nodes: Vec<ExecutionNode>, diagnostics: Arc<dyn DiagnosticHandler>, metrics: Arc<dyn MetricHandler>) -> Self {
        Self { nodes, diagnostics, metrics }
    }

    /// The number of nodes in this pipeline.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether this pipeline has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Runs the pipeline to completion by repeatedly calling [`Scheduler::step`].
    pub fn run(&mut self) -> Result<(), Error> {
        loop {
            if self.step()? {
                debug!(nodes = self.nodes.len(), "pipeline finished");
                return Ok(());
            }
        }
    }

    /// Advances the pipeline by one round: every node currently runnable
    /// (see [`Scheduler::mark_runnable`]) is polled exactly once. Returns
    /// `Ok(true)` once every node has reached `Finished`, `Ok(false)` if
    /// further rounds are needed. A node that fails cancels every other
    /// unfinished node and the call returns `Err`; if a full round polls
    /// zero nodes and the pipeline is not finished, every node is mutually
    /// blocked on a neighbor and `Error::Deadlocked` is returned.
    ///
    /// Exposed (rather than folded entirely into `run`) so an operator that
    /// embeds a sub-pipeline, such as `load-balance`, can interleave its own
    /// polling with the sub-pipeline's progress instead of blocking on it.
    pub fn step(&mut self) -> Result<bool, Error> {
        if self.all_finished() {
            return Ok(true);
        }

        self.mark_runnable();

        let runnable: Vec<usize> =
            self.nodes.iter().enumerate().filter(|(_, n)| matches!(n.state(), NodeState::Runnable)).map(|(i, _)| i).collect();

        if runnable.is_empty() {
            warn!("no runnable node this round");
            return Err(Error::Deadlocked);
        }

        for index in runnable {
            if let Err(error) = self.poll_node(index) {
                self.cancel_all_except(index);
                return Err(error);
            }
        }

        Ok(self.all_finished())
    }

    fn all_finished(&self) -> bool {
        self.nodes.iter().all(|n| matches!(n.state(), NodeState::Finished))
    }

    /// Transitions every node that can make progress this round into
    /// `Runnable`: a source (index 0) is always runnable unless finished; any
    /// other node is runnable once its inbox holds data, its upstream has
    /// finished and it still holds input to drain, or it is sitting on a
    /// held output that was blocked on a full downstream inbox last round
    /// (retrying delivery needs no new input at all).
    fn mark_runnable(&mut self) {
        for index in 0..self.nodes.len() {
            let node = &self.nodes[index];
            if node.state().is_terminal() {
                continue;
            }
            let has_input = index == 0 || !self.nodes[index].inbox_is_empty() || self.nodes[index].is_upstream_finished();
            let has_held_output = self.nodes[index].held_output().is_some();
            if has_input || has_held_output {
                self.nodes[index].set_state(NodeState::Runnable);
            }
        }
    }

    fn poll_node(&mut self, index: usize) -> Result<(), Error> {
        // Deliver any previously produced batch before pulling more input,
        // so a node never gets polled twice while sitting on undelivered
        // output.
        if self.deliver_held_output(index) {
            return Ok(());
        }

        let input = self.nodes[index].take_input();
        let name = self.nodes[index].name().to_string();

        let mut ctrl = SchedulerControlPlane::new(Arc::clone(&self.diagnostics), Arc::clone(&self.metrics), index);
        let poll = self.nodes[index].stream_mut().poll_next(input, &mut ctrl);
        trace!(node = %name, ?poll, waiting = ctrl.is_waiting(), "polled node");

        match poll {
            StreamPoll::Ready(batch) => {
                self.nodes[index].set_held_output(batch);
                let still_held = self.deliver_held_output(index);
                if !still_held {
                    self.nodes[index].set_state(NodeState::Runnable);
                }
            }
            StreamPoll::Pending => {
                self.nodes[index].set_state(NodeState::Waiting);
            }
            StreamPoll::Done => {
                self.nodes[index].set_state(NodeState::Finished);
                if let Some(next) = self.nodes.get_mut(index + 1) {
                    next.mark_upstream_finished();
                }
            }
            StreamPoll::Err(source) => {
                self.nodes[index].set_state(NodeState::Failed);
                return Err(Error::NodeFailed { node: name, source });
            }
        }
        Ok(())
    }

    /// Attempts to hand a node's held output to its downstream neighbor's
    /// inbox. Returns `true` if the node is still blocked on delivery (either
    /// it still holds output, or it was a sink with nothing downstream to
    /// deliver to and is now clear to be polled again next round).
    fn deliver_held_output(&mut self, index: usize) -> bool {
        let Some(batch) = self.nodes[index].held_output().cloned() else {
            return false;
        };

        match self.nodes.get_mut(index + 1) {
            Some(downstream) => {
                if downstream.inbox_has_room() {
                    let _ = self.nodes[index].take_held_output();
                    downstream.push_input(batch);
                    false
                } else {
                    self.nodes[index].set_state(NodeState::Waiting);
                    true
                }
            }
            None => {
                // Sink: output has nowhere to go, simply drop it.
                let _ = self.nodes[index].take_held_output();
                false
            }
        }
    }

    fn cancel_all_except(&mut self, failed: usize) {
        for (index, node) in self.nodes.iter_mut().enumerate() {
            if index != failed && !node.state().is_terminal() {
                node.set_state(NodeState::Cancelled);
            }
        }
    }
}
