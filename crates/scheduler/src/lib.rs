#![deny(
    trivial_numeric_casts,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    unused_results
)]
#![warn(unreachable_pub)]

//! The cooperative, single-threaded-per-pipeline scheduler that drives a
//! chain of instantiated operators to completion.
//!
//! An [`ExecutionNode`] wraps one instantiated [`operator::OperatorStream`]
//! together with its inbox and lifecycle [`NodeState`]; a [`Scheduler`] owns
//! an ordered `Vec` of nodes and repeatedly polls whichever ones are
//! runnable, threading batches from each node's output into the next node's
//! inbox until every node reports [`operator::StreamPoll::Done`] or one of
//! them fails.

mod control;
mod error;
mod inbox;
mod node;
mod node_state;
mod scheduler;

pub use control::SchedulerControlPlane;
pub use error::Error;
pub use inbox::{Inbox, DEFAULT_CAPACITY};
pub use node::ExecutionNode;
pub use node_state::NodeState;
pub use scheduler::Scheduler;
