//! Name-keyed operator construction.
//!
//! Operators are registered as function-pointer factories in a static
//! table, the same "function-pointer factories keyed by plugin name" idiom
//! this codebase's surrounding ecosystem favors over a `Box<dyn Trait>`
//! registered per entry. Not present as a named module in the distilled
//! specification, but required to exercise the operator contract
//! end-to-end: a caller builds a pipeline by name and [`OperatorConfig`],
//! never by importing a concrete `XxxOperator` type directly.

use std::collections::HashMap;
use std::sync::OnceLock;

use operator::{Error, Operator};
use ops_aggregate::AggregateOperator;
use ops_buffer::BufferOperator;
use ops_loadbalance::LoadBalanceOperator;
use ops_project::ProjectOperator;

use crate::config::OperatorConfig;
use crate::filter_operator::FilterOperator;

/// A named operator constructor.
pub struct OperatorFactory {
    /// The name this factory is registered under, and the name a pipeline
    /// configuration refers to it by.
    pub name: &'static str,
    /// Builds the operator from a matching [`OperatorConfig`] variant.
    /// Returns [`operator::Error::InvalidConfig`] if `config` is not the
    /// variant this factory expects.
    pub create: fn(&OperatorConfig) -> Result<Box<dyn Operator>, Error>,
}

/// Looks up the factory registered under `name`.
pub fn lookup(name: &str) -> Option<&'static OperatorFactory> {
    registry().get(name)
}

fn registry() -> &'static HashMap<&'static str, OperatorFactory> {
    static REGISTRY: OnceLock<HashMap<&'static str, OperatorFactory>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let factories = [
            OperatorFactory { name: "buffer", create: create_buffer },
            OperatorFactory { name: "load-balance", create: create_load_balance },
            OperatorFactory { name: "put", create: create_project },
            OperatorFactory { name: "extend", create: create_project },
            OperatorFactory { name: "replace", create: create_project },
            OperatorFactory { name: "set", create: create_project },
            OperatorFactory { name: "summarize", create: create_aggregate },
            OperatorFactory { name: "filter", create: create_filter },
        ];
        factories.into_iter().map(|factory| (factory.name, factory)).collect()
    })
}

fn config_mismatch(name: &str) -> Error {
    Error::InvalidConfig { operator: name.into(), message: "configuration variant does not match this operator".into() }
}

fn create_buffer(config: &OperatorConfig) -> Result<Box<dyn Operator>, Error> {
    match config {
        OperatorConfig::Buffer { capacity, policy } => Ok(Box::new(BufferOperator::new(*capacity, *policy))),
        _ => Err(config_mismatch("buffer")),
    }
}

fn create_load_balance(config: &OperatorConfig) -> Result<Box<dyn Operator>, Error> {
    match config {
        OperatorConfig::LoadBalance { replicas, template } => {
            Ok(Box::new(LoadBalanceOperator::new(*replicas, template.iter().map(|op| op.copy()).collect())))
        }
        _ => Err(config_mismatch("load-balance")),
    }
}

fn create_project(config: &OperatorConfig) -> Result<Box<dyn Operator>, Error> {
    match config {
        OperatorConfig::Project { mode, assignments } => Ok(Box::new(ProjectOperator::new(*mode, assignments.clone()))),
        _ => Err(config_mismatch("put/extend/replace/set")),
    }
}

fn create_aggregate(config: &OperatorConfig) -> Result<Box<dyn Operator>, Error> {
    match config {
        OperatorConfig::Aggregate { items, output_schema_name } => {
            Ok(Box::new(AggregateOperator::new(items.clone(), output_schema_name.clone())))
        }
        _ => Err(config_mismatch("summarize")),
    }
}

fn create_filter(config: &OperatorConfig) -> Result<Box<dyn Operator>, Error> {
    match config {
        OperatorConfig::Filter { predicate } => Ok(Box::new(FilterOperator::new(predicate.clone()))),
        _ => Err(config_mismatch("filter")),
    }
}
