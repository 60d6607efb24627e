//! Structured, builder-constructed diagnostics.

use crate::severity::Severity;

/// A single diagnostic emitted by an operator or the scheduler.
///
/// Modeled on the original engine's builder-style
/// `diagnostic::warning(...).primary(...).hint(...).note(...)`, minus source
/// ranges: this substrate has no surface-syntax parser to point a span into
/// (see `SPEC_FULL.md`'s `[MODULE: expr]` Non-goals), so `primary`/`notes`
/// carry plain descriptive labels instead of source spans.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The diagnostic's severity.
    pub severity: Severity,
    /// The human-readable headline message.
    pub message: String,
    /// The operator or component this diagnostic is primarily about.
    pub primary: Option<String>,
    /// Actionable suggestions, rendered after the message.
    pub hints: Vec<String>,
    /// Supplementary context, rendered after hints.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Starts building an error-severity diagnostic.
    pub fn error(message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(Severity::Error, message)
    }

    /// Starts building a warning-severity diagnostic.
    pub fn warning(message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(Severity::Warning, message)
    }

    /// Starts building a note-severity diagnostic.
    pub fn note(message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(Severity::Note, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Diagnostic {
        Diagnostic { severity, message: message.into(), primary: None, hints: Vec::new(), notes: Vec::new() }
    }

    /// Attaches the primary subject of this diagnostic, e.g. the operator
    /// name.
    pub fn primary(mut self, primary: impl Into<String>) -> Self {
        self.primary = Some(primary.into());
        self
    }

    /// Appends an actionable hint.
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Appends a supplementary note.
    pub fn note_text(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Emits this diagnostic to `handler`, logging it through `tracing` at
    /// the boundary regardless of the handler's own behavior.
    pub fn emit(self, handler: &dyn crate::handler::DiagnosticHandler) {
        match self.severity {
            Severity::Error => tracing::error!(primary = ?self.primary, "{}", self.message),
            Severity::Warning => tracing::warn!(primary = ?self.primary, "{}", self.message),
            Severity::Note => tracing::info!(primary = ?self.primary, "{}", self.message),
        }
        handler.emit(self);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::handler::DiagnosticHandler;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CollectingHandler(Mutex<Vec<Diagnostic>>);

    impl DiagnosticHandler for CollectingHandler {
        fn emit(&self, diagnostic: Diagnostic) {
            self.0.lock().unwrap().push(diagnostic);
        }
    }

    #[test]
    fn builder_accumulates_hints_and_notes() {
        let d = Diagnostic::warning("buffer exceeded capacity")
            .primary("buffer")
            .hint("use `--policy block`")
            .note_text("see the `metrics` operator");
        assert_eq!(d.hints.len(), 1);
        assert_eq!(d.notes.len(), 1);
        assert_eq!(d.primary.as_deref(), Some("buffer"));
    }

    #[test]
    fn emit_forwards_to_handler() {
        let handler = CollectingHandler::default();
        Diagnostic::error("boom").emit(&handler);
        assert_eq!(handler.0.lock().unwrap().len(), 1);
    }
}
