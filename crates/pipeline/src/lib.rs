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
#![warn(rust_2021_compatibility, unreachable_pub)]

//! Assembling instantiated operators into a runnable pipeline: a name-keyed
//! operator registry, an optimizing builder, and the settings the scheduler
//! and buffer defaults are loaded from.
//!
//! Not present as a named module in the distilled specification, but
//! required to exercise the operator contract end-to-end — the original
//! engine's counterpart lives in `libtenzir/src/pipeline.cpp`. Parsing a
//! textual pipeline language belongs to a layer above this crate; callers
//! here construct [`OperatorConfig`] values directly (see that type's
//! module docs).

mod builder;
mod config;
mod error;
mod filter_operator;
mod registry;
mod settings;

pub use builder::PipelineBuilder;
pub use config::OperatorConfig;
pub use error::Error;
pub use filter_operator::FilterOperator;
pub use registry::{lookup, OperatorFactory};
pub use settings::EngineSettings;
