//! The `load-balance` operator contract implementation.

use std::sync::{Arc, Mutex};

use diagnostics::{DiagnosticHandler, MetricHandler, TracingDiagnosticHandler, TracingMetricHandler};
use expr::Expr;
use operator::{ControlPlane, Error, EventOrder, Operator, OperatorKind, OperatorStream, OptimizeResult};
use scheduler::{ExecutionNode, Scheduler, DEFAULT_CAPACITY};

use crate::coordinator::Coordinator;
use crate::forward::{RemappingDiagnosticHandler, RemappingMetricHandler};
use crate::source::LoadBalanceSource;
use crate::stream::LoadBalanceStream;

/// Fans event batches out round-robin across `replicas` independently
/// scheduled copies of a configured sub-pipeline.
pub struct LoadBalanceOperator {
    replicas: u32,
    template: Vec<Box<dyn Operator>>,
}

impl LoadBalanceOperator {
    /// Builds a `load-balance` operator with `replicas` copies of the
    /// sub-pipeline described by `template`.
    pub fn new(replicas: u32, template: Vec<Box<dyn Operator>>) -> Self {
        Self { replicas, template }
    }

    fn clone_template(&self) -> Vec<Box<dyn Operator>> {
        self.template.iter().map(|op| op.copy()).collect()
    }
}

impl Operator for LoadBalanceOperator {
    fn name(&self) -> &str {
        "load-balance"
    }

    fn infer_kind(&self, input: OperatorKind) -> Result<OperatorKind, Error> {
        match input {
            OperatorKind::Events => Ok(OperatorKind::Void),
            other => Err(Error::UnsupportedInput { operator: self.name().into(), input: other.to_string() }),
        }
    }

    fn instantiate(&self, ctrl: &mut dyn ControlPlane) -> Result<Box<dyn OperatorStream>, Error> {
        if self.replicas == 0 {
            return Err(Error::InvalidConfig { operator: self.name().into(), message: "replicas must be at least 1".into() });
        }

        let replicas = self.replicas as usize;
        let coordinator = Arc::new(Mutex::new(Coordinator::new(replicas)));
        let width = self.template.len() + 1;
        let mut subschedulers = Vec::with_capacity(replicas);

        for slot in 0..replicas {
            let source: Box<dyn OperatorStream> = Box::new(LoadBalanceSource::new(Arc::clone(&coordinator), slot));
            let mut nodes = vec![ExecutionNode::new(format!("load-balance[{slot}]/source"), source, DEFAULT_CAPACITY)];
            for op in &self.template {
                let name = format!("load-balance[{slot}]/{}", op.name());
                nodes.push(ExecutionNode::new(name, op.instantiate(ctrl)?, DEFAULT_CAPACITY));
            }

            let diagnostics: Arc<dyn DiagnosticHandler> =
                Arc::new(RemappingDiagnosticHandler::new(Arc::new(TracingDiagnosticHandler), slot));
            let metrics: Arc<dyn MetricHandler> = Arc::new(RemappingMetricHandler::new(Arc::new(TracingMetricHandler), slot, width));
            subschedulers.push(Scheduler::new(nodes, diagnostics, metrics));
        }

        Ok(Box::new(LoadBalanceStream::new(coordinator, subschedulers)))
    }

    fn optimize(&self, _filter: Expr, _order: EventOrder) -> OptimizeResult {
        OptimizeResult::unordered(self)
    }

    fn copy(&self) -> Box<dyn Operator> {
        Box::new(LoadBalanceOperator { replicas: self.replicas, template: self.clone_template() })
    }
}
