//! Assembling an ordered operator chain into a runnable [`Scheduler`].

use std::sync::Arc;

use diagnostics::{TracingDiagnosticHandler, TracingMetricHandler};
use expr::Expr;
use operator::{EventOrder, Operator};
use scheduler::{ExecutionNode, Scheduler};
use value::Value;

use crate::config::OperatorConfig;
use crate::error::Error;
use crate::filter_operator::FilterOperator;
use crate::registry;
use crate::settings::EngineSettings;

/// Builds an ordered pipeline of operators, source to sink.
///
/// Mirrors the teacher's `PipelineConfig`-to-running-pipeline flow: operator
/// configuration is assembled first (here, via [`PipelineBuilder::add`] or
/// [`PipelineBuilder::push`]), then [`PipelineBuilder::optimize`] rewrites
/// the chain in place, and finally [`PipelineBuilder::build`] instantiates
/// every operator into a [`Scheduler`].
#[derive(Default)]
pub struct PipelineBuilder {
    operators: Vec<Box<dyn Operator>>,
}

impl PipelineBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self { operators: Vec::new() }
    }

    /// Appends an already-constructed operator to the chain.
    pub fn push(&mut self, operator: Box<dyn Operator>) -> &mut Self {
        self.operators.push(operator);
        self
    }

    /// Looks `name` up in the operator registry and appends the operator it
    /// builds from `config`.
    pub fn add(&mut self, name: &str, config: OperatorConfig) -> Result<&mut Self, Error> {
        let factory = registry::lookup(name).ok_or_else(|| Error::UnknownOperator { name: name.to_string() })?;
        let operator = (factory.create)(&config).map_err(|source| match source {
            operator::Error::InvalidConfig { .. } => Error::ConfigMismatch { name: name.to_string() },
            other => Error::Operator(other),
        })?;
        self.operators.push(operator);
        Ok(self)
    }

    /// The number of operators currently in the chain.
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Rewrites the chain by walking it back-to-front, feeding each
    /// operator's residual filter and required order into its upstream
    /// neighbor's `optimize` call, exactly as the original engine's
    /// `pipeline::optimize` fold does.
    ///
    /// Any filter left unabsorbed once the walk reaches the source end is
    /// inserted as an explicit [`FilterOperator`] at the head of the chain.
    /// Calling `optimize` again immediately afterward is a no-op: every
    /// operator reports back exactly the filter/order it was given (there
    /// is nothing further downstream left to push), so the second pass
    /// neither changes an operator nor inserts another filter stage.
    pub fn optimize(&mut self) {
        let mut filter = trivial_filter();
        let mut order = EventOrder::Ordered;
        for operator in self.operators.iter_mut().rev() {
            let result = operator.optimize(filter, order);
            filter = result.filter.unwrap_or_else(trivial_filter);
            order = result.order;
            *operator = result.replacement;
        }
        if filter != trivial_filter() {
            self.operators.insert(0, Box::new(FilterOperator::new(filter)));
        }
    }

    /// Instantiates every operator and assembles them into a [`Scheduler`],
    /// consuming the builder.
    pub fn build(self, settings: &EngineSettings) -> Result<Scheduler, Error> {
        let diagnostics = Arc::new(TracingDiagnosticHandler);
        let metrics = Arc::new(TracingMetricHandler);
        let mut nodes = Vec::with_capacity(self.operators.len());
        for operator in &self.operators {
            let mut ctrl = scheduler::SchedulerControlPlane::new(diagnostics.clone(), metrics.clone(), nodes.len());
            let stream = operator.instantiate(&mut ctrl)?;
            nodes.push(ExecutionNode::new(operator.name(), stream, settings.default_inbox_capacity));
        }
        Ok(Scheduler::new(nodes, diagnostics, metrics))
    }
}

fn trivial_filter() -> Expr {
    Expr::Literal(Value::Bool(true))
}
