//! # design-model
//!
//! Parser for report and library design files.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! session     → resource resolution, library loading, parallel opening
//!   ↓
//! schema      → built-in report design grammar (concrete parse states)
//!   ↓
//! parser      → push-down automaton, module parser handler, XML reader
//!   ↓
//! semantic    → post-parse semantic checks
//!   ↓
//! model       → Module, DesignElement arena, Library
//!   ↓
//! diagnostics → error sink, diagnostics, error codes
//! ```
//!
//! ## Example
//!
//! ```
//! use design_model::{DesignSession, MemoryResolver};
//!
//! let resolver = MemoryResolver::new().with_file(
//!     "sales.rptdesign",
//!     r#"<report version="3.2.23"><body><label name="title" text="Sales"/></body></report>"#,
//! );
//! let session = DesignSession::new(resolver);
//! let module = session.open_design("sales.rptdesign").unwrap();
//! assert!(module.is_valid());
//! assert!(module.find_element_by_name("title").is_some());
//! ```

// ============================================================================
// MODULES (dependency order: diagnostics → model → semantic → parser → schema → session)
// ============================================================================

/// Error sink, diagnostics and error codes
pub mod diagnostics;

/// Document model: modules, design elements, libraries
pub mod model;

/// Semantic checks run after a successful parse
pub mod semantic;

/// Parse automaton and module parser handler
pub mod parser;

/// Built-in report design grammar
pub mod schema;

/// Design sessions
pub mod session;

// Re-export commonly needed items
pub use diagnostics::{DesignFileError, Diagnostic, ErrorCode, ErrorSink, Fault, Severity};
pub use model::{
    DesignElement, DocumentKey, ElementId, ElementKind, ElementRef, ExtendsRef, Library, Module,
    ModuleKind, ModuleOptions, Validity,
};
pub use parser::{
    Attributes, CURRENT_VERSION, Grammar, ModuleParserHandler, ParseContext, ParseState,
    StateStack, StateTag,
};
pub use schema::report_grammar;
pub use semantic::{DesignValidator, SemanticCheck};
pub use session::{DesignSession, FileSystemResolver, MemoryResolver, ResourceResolver, SessionConfig};
