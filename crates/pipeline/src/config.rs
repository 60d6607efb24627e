//! Programmatic operator configuration.
//!
//! There is deliberately no textual pipeline DSL or YAML/JSON operator
//! config loader at this layer (see [`crate::registry`]'s module docs):
//! callers build `OperatorConfig` values directly, the same way a caller
//! above this substrate would after its own parsing step.

use expr::{Assignment, Expr};
use ops_aggregate::SummarizeItem;
use ops_buffer::OverflowPolicy;
use ops_project::ProjectionMode;
use operator::Operator;

/// The configuration for one named operator family, matched against a
/// [`crate::OperatorFactory`] by the factory's own `create` function.
pub enum OperatorConfig {
    /// Configuration for the `buffer` operator.
    Buffer {
        /// The queue's row capacity.
        capacity: u64,
        /// What happens when a write would exceed `capacity`.
        policy: OverflowPolicy,
    },
    /// Configuration for the `load-balance` operator.
    LoadBalance {
        /// How many independently scheduled replicas to fan out across.
        replicas: u32,
        /// The sub-pipeline each replica runs a copy of.
        template: Vec<Box<dyn Operator>>,
    },
    /// Configuration for the `put`/`extend`/`replace`/`set` projection
    /// family.
    Project {
        /// Which of the four modes to behave as.
        mode: ProjectionMode,
        /// The field assignments to apply.
        assignments: Vec<Assignment>,
    },
    /// Configuration for the `summarize` aggregation operator.
    Aggregate {
        /// The ordered group/aggregate item list.
        items: Vec<SummarizeItem>,
        /// The output schema's name.
        output_schema_name: String,
    },
    /// Configuration for an explicit `filter` stage, as inserted by
    /// [`crate::PipelineBuilder::optimize`] for a residual filter, or
    /// constructed directly by a caller that wants an unconditional
    /// predicate stage.
    Filter {
        /// The row predicate.
        predicate: Expr,
    },
}
