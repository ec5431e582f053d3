//! The document under construction.
//!
//! ```text
//! Module
//! ├── elements: Vec<DesignElement>           (append-only arena)
//! ├── id_map: ElementId -> ElementRef
//! ├── libraries: Vec<Library>                (each owns its own Module)
//! └── exceptions: Vec<Diagnostic>
//! ```

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::element::{DesignElement, DocumentKey, ElementId, ElementKind, ElementRef};
use super::library::Library;
use super::options::ModuleOptions;
use crate::diagnostics::Diagnostic;
use crate::semantic::SemanticCheck;

/// Whether a module is a report or a library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Report,
    Library,
}

impl ModuleKind {
    pub fn element_kind(&self) -> ElementKind {
        match self {
            Self::Report => ElementKind::Report,
            Self::Library => ElementKind::Library,
        }
    }
}

/// Validity of a module, decided once at the end of the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Validity {
    /// Parsing has not finished
    #[default]
    Unknown,
    Valid,
    Invalid,
}

/// A parsed report or library.
#[derive(Debug)]
pub struct Module {
    file_name: SmolStr,
    kind: ModuleKind,
    key: DocumentKey,
    elements: Vec<DesignElement>,
    root: Option<ElementRef>,
    id_map: FxHashMap<ElementId, ElementRef>,
    next_id: u64,
    libraries: Vec<Library>,
    exceptions: Vec<Diagnostic>,
    validity: Validity,
    options: ModuleOptions,
}

impl Module {
    pub fn new(key: DocumentKey, file_name: impl Into<SmolStr>, kind: ModuleKind) -> Self {
        Self {
            file_name: file_name.into(),
            kind,
            key,
            elements: Vec::new(),
            root: None,
            id_map: FxHashMap::default(),
            next_id: 1,
            libraries: Vec::new(),
            exceptions: Vec::new(),
            validity: Validity::Unknown,
            options: ModuleOptions::default(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: ModuleKind) {
        self.kind = kind;
    }

    pub fn key(&self) -> DocumentKey {
        self.key
    }

    pub fn options(&self) -> &ModuleOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ModuleOptions) {
        self.options = options;
    }

    // ========================================================================
    // ELEMENTS
    // ========================================================================

    /// Add a detached element to the arena.
    pub fn add_element(&mut self, element: DesignElement) -> ElementRef {
        let r = ElementRef::new(self.elements.len());
        self.elements.push(element);
        r
    }

    /// Make `element` the root of this module and attach it.
    pub fn set_root_element(&mut self, element: ElementRef) {
        self.root = Some(element);
        self.attach(element);
    }

    pub fn root_element(&self) -> Option<ElementRef> {
        self.root
    }

    /// Place `child` in `slot` of `container`.
    ///
    /// The child (and anything it already contains) takes the container's
    /// root document.
    pub fn add_content(&mut self, container: ElementRef, slot: impl Into<SmolStr>, child: ElementRef) {
        let root = self.element(container).and_then(|c| c.root);
        if let Some(el) = self.elements.get_mut(child.index()) {
            el.parent = Some(container);
            el.slot = Some(slot.into());
        }
        if let Some(c) = self.elements.get_mut(container.index()) {
            c.children.push(child);
        }
        if root == Some(self.key) {
            self.attach(child);
        }
    }

    fn attach(&mut self, element: ElementRef) {
        let mut pending = vec![element];
        while let Some(current) = pending.pop() {
            if let Some(el) = self.elements.get_mut(current.index()) {
                el.root = Some(self.key);
                pending.extend(el.children.iter().copied());
            }
        }
    }

    pub fn element(&self, element: ElementRef) -> Option<&DesignElement> {
        self.elements.get(element.index())
    }

    pub fn element_mut(&mut self, element: ElementRef) -> Option<&mut DesignElement> {
        self.elements.get_mut(element.index())
    }

    /// All elements in arena order.
    pub fn elements(&self) -> impl Iterator<Item = (ElementRef, &DesignElement)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, el)| (ElementRef::new(i), el))
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the element is attached to this module's tree.
    pub fn contains(&self, element: ElementRef) -> bool {
        self.element(element).is_some_and(|el| el.root == Some(self.key))
    }

    /// First attached element with the given name.
    pub fn find_element_by_name(&self, name: &str) -> Option<ElementRef> {
        self.elements()
            .find(|(r, el)| el.name.as_deref() == Some(name) && self.contains(*r))
            .map(|(r, _)| r)
    }

    // ========================================================================
    // IDS
    // ========================================================================

    /// Take the next value of the id counter.
    ///
    /// Once the counter cannot advance any further, the lowest id not in
    /// the id map is returned instead.
    pub fn next_id(&mut self) -> ElementId {
        if let Some(following) = self.next_id.checked_add(1) {
            let id = ElementId(self.next_id);
            self.next_id = following;
            return id;
        }
        (1..u64::MAX)
            .map(ElementId)
            .find(|id| !self.id_map.contains_key(id))
            .unwrap_or(ElementId::NONE)
    }

    pub fn element_by_id(&self, id: ElementId) -> Option<&DesignElement> {
        self.id_map.get(&id).and_then(|r| self.element(*r))
    }

    pub fn element_ref_by_id(&self, id: ElementId) -> Option<ElementRef> {
        self.id_map.get(&id).copied()
    }

    /// Number of registered ids.
    pub fn id_count(&self) -> usize {
        self.id_map.len()
    }

    /// Register the element's id in the id map.
    ///
    /// Returns false when the element has no id, the id belongs to a
    /// different element, or the counter cannot be moved past the id. The
    /// counter is moved past registered ids.
    pub fn add_element_id(&mut self, element: ElementRef) -> bool {
        let Some(id) = self.element(element).map(|el| el.id) else {
            return false;
        };
        if !id.is_assigned() {
            return false;
        }
        let Some(following) = id.0.checked_add(1) else {
            return false;
        };
        match self.id_map.get(&id) {
            Some(owner) if *owner != element => false,
            _ => {
                self.id_map.insert(id, element);
                self.next_id = self.next_id.max(following);
                true
            }
        }
    }

    /// Compound-id management for an element and everything it contains.
    ///
    /// Each attached element without an id, or (with `force`) whose id is
    /// mapped to another element, is given the next counter value. Every
    /// visited element is registered.
    pub fn manage_id(&mut self, element: ElementRef, force: bool) {
        let mut pending = vec![element];
        while let Some(current) = pending.pop() {
            if !self.contains(current) {
                continue;
            }
            let id = self.elements[current.index()].id;
            let taken = self.id_map.get(&id).is_some_and(|owner| *owner != current);
            if !id.is_assigned() || (force && taken) {
                let fresh = self.next_id();
                self.elements[current.index()].id = fresh;
            }
            self.add_element_id(current);
            pending.extend(self.elements[current.index()].children.iter().rev().copied());
        }
    }

    // ========================================================================
    // LIBRARIES
    // ========================================================================

    /// Add an included library, returning its position.
    pub fn add_library(&mut self, library: Library) -> usize {
        self.libraries.push(library);
        self.libraries.len() - 1
    }

    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    /// First library included under `namespace`.
    pub fn library_by_namespace(&self, namespace: &str) -> Option<(usize, &Library)> {
        self.libraries
            .iter()
            .enumerate()
            .find(|(_, lib)| lib.namespace() == namespace)
    }

    /// The library element this element extends, checked against the arenas.
    pub fn extends_element(&self, element: ElementRef) -> Option<&DesignElement> {
        let extends = self.element(element)?.extends?;
        self.libraries
            .get(extends.library)?
            .module()?
            .element(extends.element)
    }

    // ========================================================================
    // EXCEPTIONS AND VALIDITY
    // ========================================================================

    pub fn exceptions(&self) -> &[Diagnostic] {
        &self.exceptions
    }

    pub fn extend_exceptions(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.exceptions.extend(diagnostics);
    }

    /// Exceptions that are not warnings.
    pub fn all_errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.exceptions.iter().filter(|d| d.severity.is_error())
    }

    pub fn fatal_exception(&self) -> Option<&Diagnostic> {
        self.exceptions.iter().find(|d| d.is_fatal())
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn is_valid(&self) -> bool {
        self.validity == Validity::Valid
    }

    /// Decide validity. Only done once, at the end of the document.
    pub fn set_valid(&mut self, valid: bool) {
        debug_assert_eq!(self.validity, Validity::Unknown, "validity decided twice");
        self.validity = if valid { Validity::Valid } else { Validity::Invalid };
    }

    /// Run a semantic check and record what it reports.
    pub fn semantic_check(&mut self, checker: &dyn SemanticCheck) {
        let diagnostics = checker.check(self);
        self.exceptions.extend(diagnostics);
    }
}
