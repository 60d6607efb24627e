//! Errors produced by operator contract implementations.

/// An error produced while inferring an operator's kind, instantiating it,
/// or driving its stream.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An operator was asked to accept an [`crate::OperatorKind`] it does
    /// not support.
    #[error("`{operator}` does not accept {input} as input")]
    UnsupportedInput {
        /// The operator's name.
        operator: String,
        /// The rejected input kind, formatted via `Display`.
        input: String,
    },
    /// An operator's configuration was invalid.
    #[error("invalid configuration for `{operator}`: {message}")]
    InvalidConfig {
        /// The operator's name.
        operator: String,
        /// A description of what was invalid.
        message: String,
    },
    /// An operator failed while running.
    #[error("`{operator}` failed: {message}")]
    Failed {
        /// The operator's name.
        operator: String,
        /// A description of the failure.
        message: String,
    },
}
