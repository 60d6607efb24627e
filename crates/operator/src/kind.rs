//! The three kinds of data a pipeline stage may carry.

use std::fmt;

/// The kind of data flowing between two operators.
///
/// An operator chain starts at `Void` (no input, e.g. a source reading from
/// the outside world) and must end at `Void` again (a sink that does not
/// re-emit); everything in between is `Events` (schema-tagged batches) or
/// `Bytes` (an un-schematized byte stream, e.g. before a parser has run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    /// No data — the start or end of a pipeline.
    Void,
    /// An un-schematized byte stream.
    Bytes,
    /// Schema-tagged event batches.
    Events,
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperatorKind::Void => "void",
            OperatorKind::Bytes => "bytes",
            OperatorKind::Events => "events",
        })
    }
}
