//! Diagnostic severities.

use std::fmt;

/// The severity of a [`crate::Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational context that does not indicate a problem.
    Note,
    /// A recoverable problem the pipeline continues past, e.g. `buffer`
    /// dropping events under the `drop` overflow policy.
    Warning,
    /// An unrecoverable problem that causes the emitting operator (and, by
    /// cancellation propagation, its pipeline) to fail.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}
