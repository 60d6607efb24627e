//! Errors produced while building or running a pipeline.

/// An error produced by [`crate::PipelineBuilder`] or [`crate::Pipeline`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A name passed to [`crate::PipelineBuilder::add`] has no registered
    /// [`crate::OperatorFactory`].
    #[error("no operator registered under the name `{name}`")]
    UnknownOperator {
        /// The unresolved name.
        name: String,
    },
    /// A config variant was paired with a factory that does not accept it.
    #[error("`{name}` was given a configuration it does not accept")]
    ConfigMismatch {
        /// The factory's registered name.
        name: String,
    },
    /// Building or instantiating an operator failed.
    #[error(transparent)]
    Operator(#[from] operator::Error),
    /// Running the assembled scheduler failed.
    #[error(transparent)]
    Scheduler(#[from] scheduler::Error),
    /// `EngineSettings` failed validation or failed to parse.
    #[error("invalid engine settings: {message}")]
    InvalidSettings {
        /// A description of what was invalid.
        message: String,
    },
}
