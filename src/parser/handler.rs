//! Module parser handler: drives the automaton over one design file and
//! decides at the end of the document whether the module is usable.
//!
//! ```text
//! INIT -> (dispatch)* -> CONSOLIDATE -> FORWARD_LIBRARY_ERRORS
//!      -> REJECTED
//!       | ALLOCATE_IDS -> SEMANTIC_CHECK -> ACCEPTED
//! ```

use smol_str::SmolStr;

use super::attributes::Attributes;
use super::automaton::StateStack;
use super::context::ParseContext;
use super::grammar::Grammar;
use super::version::CURRENT_VERSION_NUMBER;
use crate::diagnostics::{DesignFileError, Diagnostic, ErrorCode, Fault};
use crate::model::{ElementRef, Module, ModuleKind};
use crate::session::DesignSession;

/// Parses exactly one design file into a [`Module`].
#[derive(Debug)]
pub struct ModuleParserHandler<'s> {
    grammar: &'s Grammar,
    stack: StateStack,
    ctx: ParseContext<'s>,
    file_name: SmolStr,
}

impl<'s> ModuleParserHandler<'s> {
    /// Create a handler for `file_name`, owned by `session`.
    pub fn new(session: &'s DesignSession, file_name: impl Into<SmolStr>) -> Self {
        let file_name = file_name.into();
        let grammar = session.grammar();
        let mut module = Module::new(session.next_key(), file_name.clone(), ModuleKind::Report);
        module.set_options(session.options().clone());

        Self {
            grammar,
            stack: StateStack::new(grammar.root_state()),
            ctx: ParseContext::new(session, module),
            file_name,
        }
    }

    /// Require the root element to be a report or a library.
    pub fn expecting(mut self, kind: ModuleKind) -> Self {
        self.ctx.set_expected_kind(Some(kind));
        self
    }

    pub(crate) fn with_include_chain(mut self, chain: Vec<SmolStr>) -> Self {
        self.ctx.set_include_chain(chain);
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Record the detected format version. Must be called before the first
    /// element is dispatched.
    pub fn set_version_number(&mut self, version: u32) {
        self.ctx
            .set_version_number(version, version == CURRENT_VERSION_NUMBER);
    }

    /// Returns true if the file being parsed is exactly `version`.
    pub fn is_version(&self, version: u32) -> bool {
        self.ctx.is_version(version)
    }

    pub fn is_current_version(&self) -> bool {
        self.ctx.is_current_version()
    }

    /// The module being built.
    pub fn module(&self) -> &Module {
        &self.ctx.module
    }

    pub fn stack(&self) -> &StateStack {
        &self.stack
    }

    /// Byte position of the markup event about to be handled.
    pub fn set_position(&mut self, position: u64) {
        self.ctx.sink.set_position(position);
    }

    // ========================================================================
    // MARKUP EVENTS
    // ========================================================================

    /// Handle an opening element. An error return is fatal: the caller must
    /// stop and hand it to [`abort`](Self::abort).
    pub fn start_element(&mut self, name: &str, attrs: &Attributes) -> Result<(), Diagnostic> {
        self.ctx.sink.set_current_element(name);
        let result = self.stack.dispatch(self.grammar, name, attrs, &mut self.ctx);
        self.settle(result)
    }

    /// Handle a closing element. An error return is fatal.
    pub fn end_element(&mut self, name: &str) -> Result<(), Diagnostic> {
        self.ctx.sink.set_current_element(name);
        let result = self.stack.pop_state(name, &mut self.ctx);
        self.settle(result)
    }

    /// Handle character data inside the current element.
    pub fn characters(&mut self, text: &str) {
        self.stack.top_mut().characters(text, &mut self.ctx);
    }

    fn settle(&mut self, result: Result<(), Fault>) -> Result<(), Diagnostic> {
        match result {
            Ok(()) => Ok(()),
            Err(Fault::Recoverable(diagnostic)) => {
                self.ctx.sink.record(diagnostic);
                Ok(())
            }
            Err(Fault::Fatal(diagnostic)) => Err(diagnostic),
        }
    }

    // ========================================================================
    // END OF DOCUMENT
    // ========================================================================

    /// Finish the document: consolidate errors, forward library failures,
    /// gate on usability, allocate ids and run the semantic check.
    pub fn end_document(mut self) -> Result<Module, DesignFileError> {
        if self.stack.depth() > 1 {
            let open = self.stack.top().element_name().unwrap_or("?").to_string();
            let fatal = self
                .ctx
                .sink
                .fatal(ErrorCode::E0203, format!("element <{open}> is not closed"));
            return Err(self.abort(fatal));
        }
        if self.ctx.module.root_element().is_none() {
            let fatal = self.ctx.sink.fatal(ErrorCode::E0204, "document has no root element");
            return Err(self.abort(fatal));
        }

        // Consolidate
        self.ctx.scratch = None;
        let errors = self.ctx.sink.take_errors();
        self.ctx.module.extend_exceptions(errors);
        tracing::debug!(
            file = %self.file_name,
            errors = self.ctx.module.exceptions().len(),
            "consolidated parse errors"
        );

        self.forward_library_errors();

        // Skip the semantic check once errors are known: it would only
        // report follow-on problems of the ones already seen.
        if !self.ctx.module.exceptions().is_empty() || self.ctx.module.fatal_exception().is_some() {
            return Err(self.reject());
        }

        if let Some(pending) = self.ctx.pending_ids.take() {
            self.handle_ids(&pending);
        }

        let session = self.ctx.session();
        let module = &mut self.ctx.module;
        if module.options().use_semantic_check() {
            module.semantic_check(session.semantic_check());
            tracing::debug!(file = %self.file_name, "semantic check finished");
        }
        module.extend_exceptions(self.ctx.sink.warnings().iter().cloned());
        module.set_valid(true);

        Ok(self.ctx.module)
    }

    /// Abandon the parse after a fatal error.
    pub fn abort(mut self, fatal: Diagnostic) -> DesignFileError {
        tracing::debug!(file = %self.file_name, "parse aborted: {}", fatal);
        self.ctx.sink.record(fatal);
        self.ctx.scratch = None;
        let errors = self.ctx.sink.take_errors();
        self.ctx.module.extend_exceptions(errors);
        self.reject()
    }

    fn reject(mut self) -> DesignFileError {
        self.ctx.module.set_valid(false);
        let mut all = self.ctx.module.exceptions().to_vec();
        all.extend(self.ctx.sink.warnings().iter().cloned());
        tracing::warn!(
            file = %self.file_name,
            diagnostics = all.len(),
            "design file rejected"
        );
        DesignFileError::new(self.ctx.module.file_name(), all)
    }

    /// Surface the first fatal exception of every invalid library as a
    /// semantic error of this module.
    fn forward_library_errors(&mut self) {
        let forwarded: Vec<Diagnostic> = self
            .ctx
            .module
            .libraries()
            .iter()
            .filter(|lib| !lib.is_valid())
            .filter_map(|lib| {
                let fatal = lib.first_fatal_exception()?;
                let message = format!(
                    "library '{}' included as '{}' is invalid",
                    lib.file_name(),
                    lib.namespace()
                );
                Some(self.ctx.sink.semantic_error(message, fatal.clone()))
            })
            .collect();

        if !forwarded.is_empty() {
            tracing::debug!(file = %self.file_name, count = forwarded.len(), "forwarded library failures");
        }
        self.ctx.module.extend_exceptions(forwarded);
    }

    /// Allocate ids for elements read without one.
    ///
    /// Elements in this module without `extends` take the next counter
    /// value in queue order; elements with `extends` go through the
    /// module's compound-id management.
    fn handle_ids(&mut self, pending: &[ElementRef]) {
        let module = &mut self.ctx.module;
        let key = module.key();

        for &element in pending {
            let Some(el) = module.element(element) else {
                continue;
            };

            if el.extends.is_none() {
                if el.root == Some(key) && !el.id.is_assigned() {
                    let id = module.next_id();
                    if let Some(el) = module.element_mut(element) {
                        el.id = id;
                    }
                    module.add_element_id(element);
                }
            } else {
                module.manage_id(element, true);
            }
        }

        tracing::debug!(file = %self.file_name, ids = module.id_count(), "allocated element ids");
    }
}
