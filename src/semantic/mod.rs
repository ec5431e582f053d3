//! Semantic checks over a structurally sound module.
//!
//! A check only ever runs after the parser accepted the module; what it
//! reports is recorded on the module and never rejects it.

mod validator;

pub use validator::DesignValidator;

use crate::diagnostics::Diagnostic;
use crate::model::Module;

/// A post-parse validation pass.
pub trait SemanticCheck: Send + Sync {
    /// Inspect the module and return the problems found.
    fn check(&self, module: &Module) -> Vec<Diagnostic>;
}

impl<F> SemanticCheck for F
where
    F: Fn(&Module) -> Vec<Diagnostic> + Send + Sync,
{
    fn check(&self, module: &Module) -> Vec<Diagnostic> {
        self(module)
    }
}
