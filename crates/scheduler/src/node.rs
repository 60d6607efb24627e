//! One scheduled, instantiated operator.

use operator::OperatorStream;
use value::Batch;

use crate::inbox::Inbox;
use crate::node_state::NodeState;

/// A scheduler-owned, instantiated operator plus its state.
pub struct ExecutionNode {
    name: String,
    stream: Box<dyn OperatorStream>,
    inbox: Inbox,
    held_output: Option<Batch>,
    upstream_finished: bool,
    state: NodeState,
}

impl ExecutionNode {
    /// Creates a new execution node wrapping `stream`, with an inbox of
    /// `inbox_capacity` batches.
    pub fn new(name: impl Into<String>, stream: Box<dyn OperatorStream>, inbox_capacity: usize) -> Self {
        Self {
            name: name.into(),
            stream,
            inbox: Inbox::new(inbox_capacity),
            held_output: None,
            upstream_finished: false,
            state: NodeState::Pending,
        }
    }

    /// The operator's name, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node's current state.
    pub fn state(&self) -> &NodeState {
        &self.state
    }

    pub(crate) fn set_state(&mut self, state: NodeState) {
        self.state = state;
    }

    pub(crate) fn stream_mut(&mut self) -> &mut dyn OperatorStream {
        self.stream.as_mut()
    }

    pub(crate) fn inbox_mut(&mut self) -> &mut Inbox {
        &mut self.inbox
    }

    pub(crate) fn take_input(&mut self) -> Option<Batch> {
        self.inbox.pop()
    }

    pub(crate) fn inbox_is_empty(&self) -> bool {
        self.inbox.is_empty()
    }

    pub(crate) fn inbox_has_room(&self) -> bool {
        self.inbox.has_room()
    }

    /// Pushes `batch` into this node's inbox. Only called after
    /// `inbox_has_room` was just checked, so the inbox is never actually
    /// full here.
    pub(crate) fn push_input(&mut self, batch: Batch) {
        if self.inbox.push(batch).is_err() {
            unreachable!("push_input called without checking inbox_has_room first");
        }
    }

    pub(crate) fn mark_upstream_finished(&mut self) {
        self.upstream_finished = true;
    }

    pub(crate) fn is_upstream_finished(&self) -> bool {
        self.upstream_finished
    }

    pub(crate) fn held_output(&self) -> Option<&Batch> {
        self.held_output.as_ref()
    }

    pub(crate) fn set_held_output(&mut self, batch: Batch) {
        self.held_output = Some(batch);
    }

    pub(crate) fn take_held_output(&mut self) -> Option<Batch> {
        self.held_output.take()
    }
}
