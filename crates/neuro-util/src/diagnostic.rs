//! Diagnostic reporting.
//!
//! The core pipeline stages are fail-fast (each surfaces its first error and
//! stops, per the error handling design), so this module is deliberately
//! small: a [`Diagnostic`] pairs a message with a [`Span`], and [`Handler`]
//! is a place for a driver to collect and pretty-print one against a source
//! snippet. Stages themselves return `Result<_, StageError>` directly; they
//! do not depend on `Handler`.

use crate::Span;
use std::fmt;

/// Severity of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
        }
    }
}

/// A single diagnostic message located at a [`Span`].
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            span,
        }
    }

    /// Render this diagnostic against the source it was raised from, with a
    /// one-line snippet of the offending line when available.
    pub fn render(&self, source: &str) -> String {
        let snippet = source.lines().nth(self.span.line.saturating_sub(1) as usize);
        match snippet {
            Some(line) => format!(
                "{}: {} ({})\n  {}\n  {}^",
                self.level,
                self.message,
                self.span,
                line,
                " ".repeat(self.span.column.saturating_sub(1) as usize)
            ),
            None => format!("{}: {} ({})", self.level, self.message, self.span),
        }
    }
}

/// Collects diagnostics raised while driving the pipeline.
#[derive(Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == Level::Error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_tracks_errors() {
        let mut h = Handler::new();
        assert!(!h.has_errors());
        h.push(Diagnostic::error("boom", Span::DUMMY));
        assert!(h.has_errors());
        assert_eq!(h.diagnostics().len(), 1);
    }

    #[test]
    fn render_includes_snippet() {
        let d = Diagnostic::error("bad token", Span::new(4, 5, 2, 1));
        let rendered = d.render("remember x = 5\nupdate @ = 1\n");
        assert!(rendered.contains("update @ = 1"));
    }
}
