//! The rendered diagnostic surface.

use std::fmt;

use rill_ir::Span;

use crate::SourceFile;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic ready for rendering: message, primary span, and the call-site
/// trace accumulated while a runtime error unwound (innermost first).
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub trace: Vec<Span>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            severity: Severity::Error,
            message: message.into(),
            span,
            trace: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_trace(mut self, trace: Vec<Span>) -> Self {
        self.trace = trace;
        self
    }

    /// Render the diagnostic against its source: the message, the location
    /// block of the primary span, then one location block per call-site in
    /// the trace.
    pub fn render(&self, source: &SourceFile) -> String {
        let mut out = String::new();
        out.push_str(&self.message);
        out.push('\n');
        out.push_str(&source.location_message(self.span.start));
        for call_site in &self.trace {
            out.push_str(&source.location_message(call_site.start));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn render_message_then_location() {
        let source = SourceFile::new("m.rl", "boom\n");
        let diag = Diagnostic::error("Name 'boom' is not defined", Span::new(0, 4));
        assert_eq!(
            diag.render(&source),
            "Name 'boom' is not defined\nin m.rl on line 1 column 1\nboom\n*\n"
        );
    }

    #[test]
    fn render_appends_trace_blocks() {
        let source = SourceFile::new("m.rl", "f()\ng()\n");
        let diag =
            Diagnostic::error("boom", Span::new(0, 1)).with_trace(vec![Span::new(4, 5)]);
        let rendered = diag.render(&source);
        assert!(rendered.contains("on line 1 column 1"));
        assert!(rendered.contains("on line 2 column 1"));
    }
}
