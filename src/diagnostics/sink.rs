//! Error sink for one parse.

use smol_str::SmolStr;

use super::codes::ErrorCode;
use super::error::{Diagnostic, Severity};

/// Accumulates errors and warnings raised while a design file is parsed.
///
/// Every diagnostic is attributed to the element that was current when it
/// was recorded.
#[derive(Debug, Default)]
pub struct ErrorSink {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
    current_element: Option<SmolStr>,
    position: Option<u64>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element subsequent diagnostics are attributed to
    pub fn set_current_element(&mut self, name: impl Into<SmolStr>) {
        self.current_element = Some(name.into());
    }

    pub fn current_element(&self) -> Option<&str> {
        self.current_element.as_deref()
    }

    /// Set the markup position subsequent diagnostics are attributed to
    pub fn set_position(&mut self, position: u64) {
        self.position = Some(position);
    }

    /// Attach the current element and position to a diagnostic that has none
    pub fn locate(&self, mut diagnostic: Diagnostic) -> Diagnostic {
        if diagnostic.element.is_none() {
            diagnostic.element = self.current_element.clone();
        }
        if diagnostic.position.is_none() {
            diagnostic.position = self.position;
        }
        diagnostic
    }

    /// Record a diagnostic, routing it by severity
    pub fn record(&mut self, diagnostic: Diagnostic) {
        let diagnostic = self.locate(diagnostic);
        if diagnostic.is_warning() {
            self.warnings.push(diagnostic);
        } else {
            self.errors.push(diagnostic);
        }
    }

    pub fn warning(&mut self, code: ErrorCode, message: impl Into<String>) {
        self.record(Diagnostic::warning(code, message));
    }

    pub fn error(&mut self, code: ErrorCode, message: impl Into<String>) {
        self.record(Diagnostic::new(code, message));
    }

    /// Build a located fatal diagnostic without recording it
    pub fn fatal(&self, code: ErrorCode, message: impl Into<String>) -> Diagnostic {
        self.locate(Diagnostic::fatal(code, message))
    }

    /// Wrap a diagnostic as a semantic error of the document being parsed
    pub fn semantic_error(&self, message: impl Into<String>, cause: Diagnostic) -> Diagnostic {
        Diagnostic::new(ErrorCode::E0402, message)
            .with_severity(Severity::Error)
            .with_cause(cause)
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Move all recorded errors out of the sink
    pub fn take_errors(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.errors)
    }

    pub fn has_fatal(&self) -> bool {
        self.errors.iter().any(Diagnostic::is_fatal)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
