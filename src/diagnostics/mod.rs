//! Diagnostics for design file parsing
//!
//! This module provides the error sink and the diagnostic types shared by
//! the parser, the document model and the semantic checks:
//! - Categorized error codes for filtering and documentation
//! - Severity levels with a distinguished fatal level
//! - Recoverable/fatal dispatch results
//! - The composite rejection returned for unusable design files

mod codes;
mod error;
mod sink;

pub use codes::ErrorCode;
pub use error::{DesignFileError, Diagnostic, Fault, Severity};
pub use sink::ErrorSink;
