//! Design sessions: where design files come from and how they are opened.
//!
//! A [`DesignSession`] is shared by every parse it starts, including the
//! parses of included libraries. It holds only immutable configuration and
//! a document key counter, so independent designs can be opened in
//! parallel with [`DesignSession::open_designs`].

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::diagnostics::{DesignFileError, Diagnostic, ErrorCode};
use crate::model::{DocumentKey, Library, Module, ModuleKind, ModuleOptions};
use crate::parser::{
    CURRENT_VERSION_NUMBER, Grammar, ModuleParserHandler, detect_version, parse_module,
    parse_version,
};
use crate::schema::report_grammar;
use crate::semantic::{DesignValidator, SemanticCheck};

/// Default limit on nested library includes.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 8;

/// Session-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Deepest chain of nested `include-library` elements that is followed.
    pub max_include_depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

// ============================================================================
// RESOURCE RESOLUTION
// ============================================================================

/// Maps a design file name to its bytes.
pub trait ResourceResolver: Send + Sync {
    fn resolve(&self, file_name: &str) -> io::Result<Vec<u8>>;
}

/// Resolves file names relative to a root directory.
#[derive(Debug, Clone)]
pub struct FileSystemResolver {
    root: PathBuf,
}

impl FileSystemResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceResolver for FileSystemResolver {
    fn resolve(&self, file_name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.root.join(file_name))
    }
}

/// In-memory design files, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    files: FxHashMap<SmolStr, Vec<u8>>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file_name: impl Into<SmolStr>, content: impl Into<Vec<u8>>) {
        self.files.insert(file_name.into(), content.into());
    }

    pub fn with_file(mut self, file_name: impl Into<SmolStr>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(file_name, content);
        self
    }
}

impl ResourceResolver for MemoryResolver {
    fn resolve(&self, file_name: &str) -> io::Result<Vec<u8>> {
        self.files.get(file_name).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no design file named '{file_name}'"))
        })
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Opens design files and the libraries they include.
pub struct DesignSession {
    resolver: Box<dyn ResourceResolver>,
    grammar: Grammar,
    checker: Box<dyn SemanticCheck>,
    options: ModuleOptions,
    config: SessionConfig,
    next_key: AtomicU32,
}

impl DesignSession {
    /// Session with the built-in schema and semantic rules.
    pub fn new(resolver: impl ResourceResolver + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
            grammar: report_grammar(),
            checker: Box::new(DesignValidator),
            options: ModuleOptions::default(),
            config: SessionConfig::default(),
            next_key: AtomicU32::new(1),
        }
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Options given to every module opened by this session.
    pub fn with_options(mut self, options: ModuleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_semantic_check(mut self, checker: impl SemanticCheck + 'static) -> Self {
        self.checker = Box::new(checker);
        self
    }

    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = grammar;
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn semantic_check(&self) -> &dyn SemanticCheck {
        self.checker.as_ref()
    }

    pub fn options(&self) -> &ModuleOptions {
        &self.options
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub(crate) fn next_key(&self) -> DocumentKey {
        DocumentKey(self.next_key.fetch_add(1, Ordering::Relaxed))
    }

    // ========================================================================
    // OPENING DESIGNS
    // ========================================================================

    /// Resolve and parse a report or library design.
    pub fn open_design(&self, file_name: &str) -> Result<Module, DesignFileError> {
        let input = self.resolver.resolve(file_name).map_err(|e| {
            let fatal = Diagnostic::fatal(
                ErrorCode::E0401,
                format!("cannot read design file '{file_name}': {e}"),
            );
            DesignFileError::new(file_name, vec![fatal])
        })?;
        self.parse_design(file_name, &input)
    }

    /// Parse design file content that was already read.
    pub fn parse_design(&self, file_name: &str, input: &[u8]) -> Result<Module, DesignFileError> {
        self.parse(ModuleParserHandler::new(self, file_name), input)
    }

    /// Open several designs in parallel. Results are in input order.
    pub fn open_designs(&self, file_names: &[&str]) -> Vec<Result<Module, DesignFileError>> {
        file_names
            .par_iter()
            .map(|file_name| self.open_design(file_name))
            .collect()
    }

    /// Open a library included by the last file of `chain`.
    ///
    /// Never fails: a library that cannot be read or parsed is returned as
    /// invalid, with a fatal diagnostic when the failure was fatal.
    pub(crate) fn open_library(
        &self,
        file_name: &str,
        namespace: &str,
        chain: &[SmolStr],
    ) -> Library {
        if chain.iter().any(|f| f == file_name) {
            let fatal = Diagnostic::fatal(
                ErrorCode::E0403,
                format!(
                    "library '{file_name}' includes itself: {} -> {file_name}",
                    chain.join(" -> ")
                ),
            );
            return self.failed_library(namespace, file_name, fatal);
        }
        if chain.len() > self.config.max_include_depth {
            let fatal = Diagnostic::fatal(
                ErrorCode::E0404,
                format!(
                    "library '{file_name}' is nested deeper than {} includes",
                    self.config.max_include_depth
                ),
            );
            return self.failed_library(namespace, file_name, fatal);
        }

        let input = match self.resolver.resolve(file_name) {
            Ok(input) => input,
            Err(e) => {
                let fatal = Diagnostic::fatal(
                    ErrorCode::E0401,
                    format!("cannot read library '{file_name}': {e}"),
                );
                return self.failed_library(namespace, file_name, fatal);
            }
        };

        let handler = ModuleParserHandler::new(self, file_name)
            .expecting(ModuleKind::Library)
            .with_include_chain(chain.to_vec());
        match self.parse(handler, &input) {
            Ok(module) => Library::from_module(namespace, module),
            Err(error) => {
                tracing::warn!(
                    library = file_name,
                    namespace,
                    diagnostics = error.errors.len(),
                    "library is invalid"
                );
                Library::from_error(namespace, error)
            }
        }
    }

    fn failed_library(&self, namespace: &str, file_name: &str, fatal: Diagnostic) -> Library {
        tracing::warn!(library = file_name, namespace, "{}", fatal);
        Library::failed(namespace, file_name, fatal)
    }

    /// Detect the format version, then run the handler over the input.
    fn parse(
        &self,
        mut handler: ModuleParserHandler<'_>,
        input: &[u8],
    ) -> Result<Module, DesignFileError> {
        let version = match detect_version(input) {
            Ok(version) => version,
            Err(fatal) => return Err(handler.abort(fatal)),
        };

        let number = match version.as_deref().map(parse_version).transpose() {
            Ok(number) => number.unwrap_or(CURRENT_VERSION_NUMBER),
            Err(message) => {
                let fatal = Diagnostic::fatal(ErrorCode::E0306, message).with_element("version");
                return Err(handler.abort(fatal));
            }
        };
        handler.set_version_number(number);

        tracing::debug!(file = handler.file_name(), version = number, "parsing design file");
        parse_module(handler, input)
    }
}

impl fmt::Debug for DesignSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesignSession")
            .field("grammar", &self.grammar)
            .field("options", &self.options)
            .field("config", &self.config)
            .field("next_key", &self.next_key)
            .finish_non_exhaustive()
    }
}
