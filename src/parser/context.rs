//! Per-parse session state passed to every parse state.

use smol_str::SmolStr;

use crate::diagnostics::{ErrorCode, ErrorSink, Fault};
use crate::model::{ElementRef, ExtendsRef, Module, ModuleKind};
use crate::session::DesignSession;

/// Transient data that only lives while elements are being dispatched.
#[derive(Debug, Default)]
pub(crate) struct Scratch {
    /// Elements whose `extends` could not be resolved when they were read.
    deferred_extends: Vec<ElementRef>,
}

/// Everything one parse mutates, owned by its handler.
///
/// Nothing here is shared with another parse, so libraries can be parsed by
/// independent handlers without interfering.
#[derive(Debug)]
pub struct ParseContext<'s> {
    pub(crate) module: Module,
    pub(crate) sink: ErrorSink,
    session: &'s DesignSession,
    version_number: u32,
    is_current_version: bool,
    expected_kind: Option<ModuleKind>,
    pub(crate) scratch: Option<Scratch>,
    pub(crate) pending_ids: Option<Vec<ElementRef>>,
    container: Option<ElementRef>,
    slot: Option<SmolStr>,
    include_chain: Vec<SmolStr>,
}

impl<'s> ParseContext<'s> {
    pub(crate) fn new(session: &'s DesignSession, module: Module) -> Self {
        Self {
            module,
            sink: ErrorSink::new(),
            session,
            version_number: 0,
            is_current_version: false,
            expected_kind: None,
            scratch: Some(Scratch::default()),
            pending_ids: Some(Vec::new()),
            container: None,
            slot: None,
            include_chain: Vec::new(),
        }
    }

    // ========================================================================
    // MODULE AND DIAGNOSTICS
    // ========================================================================

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn module_mut(&mut self) -> &mut Module {
        &mut self.module
    }

    pub fn sink(&self) -> &ErrorSink {
        &self.sink
    }

    pub fn warning(&mut self, code: ErrorCode, message: impl Into<String>) {
        self.sink.warning(code, message);
    }

    pub fn error(&mut self, code: ErrorCode, message: impl Into<String>) {
        self.sink.error(code, message);
    }

    /// A fatal fault attributed to the current element.
    pub fn fatal(&self, code: ErrorCode, message: impl Into<String>) -> Fault {
        Fault::fatal(self.sink.fatal(code, message))
    }

    pub fn session(&self) -> &'s DesignSession {
        self.session
    }

    // ========================================================================
    // VERSION
    // ========================================================================

    pub fn version_number(&self) -> u32 {
        self.version_number
    }

    pub fn is_version(&self, version: u32) -> bool {
        self.version_number == version
    }

    pub fn is_current_version(&self) -> bool {
        self.is_current_version
    }

    pub(crate) fn set_version_number(&mut self, version: u32, current: bool) {
        self.version_number = version;
        self.is_current_version = current;
    }

    /// Root element kind the caller asked for, if any.
    pub fn expected_kind(&self) -> Option<ModuleKind> {
        self.expected_kind
    }

    pub(crate) fn set_expected_kind(&mut self, kind: Option<ModuleKind>) {
        self.expected_kind = kind;
    }

    // ========================================================================
    // CONTAINMENT
    // ========================================================================

    /// Nearest enclosing design element of the element being dispatched.
    pub fn container(&self) -> Option<ElementRef> {
        self.container
    }

    /// Slot of [`container`](Self::container) the element goes into.
    pub fn slot(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    pub(crate) fn set_container(&mut self, container: Option<ElementRef>, slot: Option<SmolStr>) {
        self.container = container;
        self.slot = slot;
    }

    /// Place `element` in the current container. Returns false when there is
    /// no container, leaving the element detached.
    pub fn add_to_container(&mut self, element: ElementRef) -> bool {
        let Some(container) = self.container else {
            return false;
        };
        let slot = self.slot.clone().unwrap_or_default();
        self.module.add_content(container, slot, element);
        true
    }

    // ========================================================================
    // DEFERRED WORK
    // ========================================================================

    /// Queue an element for id allocation at the end of the document.
    pub fn queue_pending_id(&mut self, element: ElementRef) {
        if let Some(pending) = self.pending_ids.as_mut() {
            pending.push(element);
        }
    }

    /// Retry resolving this element's `extends` when the root closes.
    pub fn defer_extends(&mut self, element: ElementRef) {
        if let Some(scratch) = self.scratch.as_mut() {
            scratch.deferred_extends.push(element);
        }
    }

    pub fn take_deferred_extends(&mut self) -> Vec<ElementRef> {
        self.scratch
            .as_mut()
            .map(|s| std::mem::take(&mut s.deferred_extends))
            .unwrap_or_default()
    }

    // ========================================================================
    // LIBRARIES
    // ========================================================================

    /// Resolve `namespace.ElementName` against the included libraries.
    pub fn resolve_extends(&self, name: &str) -> Option<ExtendsRef> {
        let (namespace, element_name) = name.split_once('.')?;
        let (library, lib) = self.module.library_by_namespace(namespace)?;
        let element = lib.find_element(element_name)?;
        Some(ExtendsRef { library, element })
    }

    /// Files currently being parsed above this one, outermost first.
    pub fn include_chain(&self) -> &[SmolStr] {
        &self.include_chain
    }

    pub(crate) fn set_include_chain(&mut self, chain: Vec<SmolStr>) {
        self.include_chain = chain;
    }

    /// Parse a library with its own handler and add it to the module.
    ///
    /// Never fails: a library that cannot be parsed is added as invalid.
    pub fn include_library(&mut self, file_name: &str, namespace: &str) -> usize {
        let mut chain = self.include_chain.clone();
        chain.push(SmolStr::new(self.module.file_name()));
        let library = self.session.open_library(file_name, namespace, &chain);
        self.module.add_library(library)
    }
}
