//! Diagnostic records and the failure values built from them
//!
//! Provides:
//! - Severity levels, including the distinguished `Fatal` level
//! - Error-code-tagged diagnostics attributed to the offending element
//! - `Fault`, the dispatch result separating recoverable from fatal problems
//! - `DesignFileError`, the composite rejection of a whole design file

use smol_str::SmolStr;
use thiserror::Error;

use super::codes::ErrorCode;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Renders the owning document wholly unusable
    Fatal,
    /// A hard error; the document is rejected if it was raised while parsing
    #[default]
    Error,
    /// A warning that never prevents the document from being used
    Warning,
}

impl Severity {
    /// Check if this is the fatal level
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }

    /// Check if this is an error or worse
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Fatal | Self::Error)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A single problem found in a design file.
///
/// Carries the offending element name (when one was open), the byte
/// position in the markup, and an optional underlying cause. Library
/// failures forwarded to an including module keep the library's fatal
/// diagnostic as their cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct Diagnostic {
    /// Error severity
    pub severity: Severity,
    /// Categorized error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Name of the element being parsed when the problem was found
    pub element: Option<SmolStr>,
    /// Byte offset in the markup, if known
    pub position: Option<u64>,
    /// Underlying diagnostic this one wraps
    #[source]
    pub cause: Option<Box<Diagnostic>>,
}

impl Diagnostic {
    /// Create an error-level diagnostic
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            element: None,
            position: None,
            cause: None,
        }
    }

    /// Create an error-level diagnostic with the code's default message
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Create a fatal diagnostic
    pub fn fatal(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code, message).with_severity(Severity::Fatal)
    }

    /// Create a warning
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code, message).with_severity(Severity::Warning)
    }

    /// Set the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Attribute this diagnostic to an element
    pub fn with_element(mut self, element: impl Into<SmolStr>) -> Self {
        self.element = Some(element.into());
        self
    }

    /// Set the byte position
    pub fn at_position(mut self, position: u64) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach the diagnostic this one wraps
    pub fn with_cause(mut self, cause: Diagnostic) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Check if this diagnostic is fatal
    pub fn is_fatal(&self) -> bool {
        self.severity.is_fatal()
    }

    /// Check if this diagnostic is a warning
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Format the diagnostic for display, including element and cause chain
    pub fn format(&self) -> String {
        let mut result = format!("{} {}: {}", self.severity.as_str(), self.code, self.message);
        if let Some(element) = &self.element {
            result.push_str(&format!(" (in <{element}>)"));
        }
        if let Some(position) = self.position {
            result.push_str(&format!(" at byte {position}"));
        }
        let mut cause = self.cause.as_deref();
        while let Some(inner) = cause {
            result.push_str(&format!("\n  caused by: {}: {}", inner.code, inner.message));
            cause = inner.cause.as_deref();
        }
        result
    }
}

/// Outcome of a failed dispatch step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Recorded in the error sink; parsing continues
    Recoverable(Diagnostic),
    /// Aborts the parse immediately
    Fatal(Diagnostic),
}

impl Fault {
    /// Build a fatal fault, forcing the diagnostic's severity to `Fatal`
    pub fn fatal(diagnostic: Diagnostic) -> Self {
        Self::Fatal(diagnostic.with_severity(Severity::Fatal))
    }

    /// Build a recoverable fault
    pub fn recoverable(diagnostic: Diagnostic) -> Self {
        Self::Recoverable(diagnostic)
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        match self {
            Self::Recoverable(d) | Self::Fatal(d) => d,
        }
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        match self {
            Self::Recoverable(d) | Self::Fatal(d) => d,
        }
    }
}

/// Rejection of a whole design file.
///
/// The diagnostics are the module's exceptions followed by every warning
/// recorded up to the point of rejection, in order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file_name}: design file is invalid ({} diagnostic(s))", .errors.len())]
pub struct DesignFileError {
    /// Source file identifier
    pub file_name: SmolStr,
    /// Ordered diagnostics
    pub errors: Vec<Diagnostic>,
}

impl DesignFileError {
    pub fn new(file_name: impl Into<SmolStr>, errors: Vec<Diagnostic>) -> Self {
        Self {
            file_name: file_name.into(),
            errors,
        }
    }

    /// First fatal diagnostic, if any
    pub fn first_fatal(&self) -> Option<&Diagnostic> {
        self.errors.iter().find(|d| d.is_fatal())
    }

    /// Diagnostics that are not warnings
    pub fn errors_only(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().filter(|d| d.severity.is_error())
    }
}
