//! Structural states: the document, module roots, slots, properties and
//! library includes.

use smol_str::SmolStr;

use super::{DOCUMENT, INCLUDE_LIBRARY, PROPERTY, positive_int};
use crate::diagnostics::{Diagnostic, ErrorCode, Fault};
use crate::model::{DesignElement, ElementId, ElementRef, ModuleKind};
use crate::parser::{Attributes, ParseContext, ParseState, StateTag};

/// `element_name` / `set_element_name` over a `name: Option<SmolStr>` field.
macro_rules! bind_element_name {
    () => {
        fn element_name(&self) -> Option<&str> {
            self.name.as_deref()
        }

        fn set_element_name(&mut self, name: SmolStr) {
            self.name = Some(name);
        }
    };
}

pub(super) use bind_element_name;

// ============================================================================
// DOCUMENT
// ============================================================================

/// Bottom of the stack. Accepts exactly the root elements.
#[derive(Debug, Default)]
pub struct DocumentState {
    name: Option<SmolStr>,
}

impl ParseState for DocumentState {
    fn tag(&self) -> StateTag {
        DOCUMENT
    }

    bind_element_name!();
}

// ============================================================================
// MODULE ROOT
// ============================================================================

/// Root element of a report or library.
#[derive(Debug)]
pub struct ModuleState {
    tag: StateTag,
    kind: ModuleKind,
    name: Option<SmolStr>,
    element: Option<ElementRef>,
}

impl ModuleState {
    pub fn new(tag: StateTag, kind: ModuleKind) -> Self {
        Self {
            tag,
            kind,
            name: None,
            element: None,
        }
    }
}

impl ParseState for ModuleState {
    fn tag(&self) -> StateTag {
        self.tag
    }

    bind_element_name!();

    fn parse_attrs(&mut self, attrs: &Attributes, ctx: &mut ParseContext<'_>) -> Result<(), Fault> {
        if let Some(expected) = ctx.expected_kind() {
            if expected != self.kind {
                return Err(ctx.fatal(
                    ErrorCode::E0201,
                    format!(
                        "expected a <{}> root element, found <{}>",
                        expected.element_kind(),
                        self.kind.element_kind()
                    ),
                ));
            }
        }
        if ctx.module().root_element().is_some() {
            return Err(ctx.fatal(ErrorCode::E0201, "document has more than one root element"));
        }

        let module = ctx.module_mut();
        module.set_kind(self.kind);
        let root = module.add_element(DesignElement::new(self.kind.element_kind()));
        module.set_root_element(root);
        self.element = Some(root);

        let mut has_id = false;
        for (key, value) in attrs.iter() {
            match key {
                "name" => set_name(root, value, ctx),
                "id" => has_id = read_id(root, value, ctx),
                "title" | "author" | "description" => set_property(root, key, value, ctx),
                "version" | "xmlns" => {}
                _ if key.starts_with("xmlns:") => {}
                _ => unknown_attribute(key, ctx),
            }
        }
        if !has_id {
            ctx.queue_pending_id(root);
        }
        Ok(())
    }

    fn end(&mut self, ctx: &mut ParseContext<'_>) -> Result<(), Fault> {
        for element in ctx.take_deferred_extends() {
            let Some(name) = ctx
                .module()
                .element(element)
                .and_then(|el| el.extends_name.clone())
            else {
                continue;
            };
            match ctx.resolve_extends(&name) {
                Some(extends) => {
                    if let Some(el) = ctx.module_mut().element_mut(element) {
                        el.extends = Some(extends);
                    }
                }
                None => tracing::trace!("extends '{name}' is still unresolved"),
            }
        }
        Ok(())
    }

    fn element(&self) -> Option<ElementRef> {
        self.element
    }
}

// ============================================================================
// SLOTS
// ============================================================================

/// A named slot of the module root. Children go into the slot named by the
/// element this state is bound to.
#[derive(Debug)]
pub struct SlotState {
    tag: StateTag,
    name: Option<SmolStr>,
}

impl SlotState {
    pub fn new(tag: StateTag) -> Self {
        Self { tag, name: None }
    }
}

impl ParseState for SlotState {
    fn tag(&self) -> StateTag {
        self.tag
    }

    bind_element_name!();

    fn parse_attrs(&mut self, attrs: &Attributes, ctx: &mut ParseContext<'_>) -> Result<(), Fault> {
        for (key, _) in attrs.iter() {
            unknown_attribute(key, ctx);
        }
        Ok(())
    }

    fn slot(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

// ============================================================================
// PROPERTY
// ============================================================================

/// `<property name="...">value</property>` on the enclosing element.
#[derive(Debug, Default)]
pub struct PropertyState {
    name: Option<SmolStr>,
    property: Option<SmolStr>,
    target: Option<ElementRef>,
    value: String,
}

impl ParseState for PropertyState {
    fn tag(&self) -> StateTag {
        PROPERTY
    }

    bind_element_name!();

    fn parse_attrs(&mut self, attrs: &Attributes, ctx: &mut ParseContext<'_>) -> Result<(), Fault> {
        self.target = ctx.container();
        for (key, value) in attrs.iter() {
            match key {
                "name" if !value.trim().is_empty() => self.property = Some(SmolStr::new(value.trim())),
                "name" => {}
                _ => unknown_attribute(key, ctx),
            }
        }
        if self.property.is_none() {
            ctx.warning(ErrorCode::E0301, "property has no 'name' attribute and is ignored");
        }
        Ok(())
    }

    fn characters(&mut self, text: &str, _ctx: &mut ParseContext<'_>) {
        self.value.push_str(text);
    }

    fn end(&mut self, ctx: &mut ParseContext<'_>) -> Result<(), Fault> {
        if let (Some(target), Some(property)) = (self.target, self.property.take()) {
            let value = std::mem::take(&mut self.value);
            if let Some(el) = ctx.module_mut().element_mut(target) {
                el.properties.insert(property, value);
            }
        }
        Ok(())
    }
}

// ============================================================================
// INCLUDE LIBRARY
// ============================================================================

/// `<include-library file-name="..." namespace="..."/>`
#[derive(Debug, Default)]
pub struct IncludeLibraryState {
    name: Option<SmolStr>,
}

impl ParseState for IncludeLibraryState {
    fn tag(&self) -> StateTag {
        INCLUDE_LIBRARY
    }

    bind_element_name!();

    fn parse_attrs(&mut self, attrs: &Attributes, ctx: &mut ParseContext<'_>) -> Result<(), Fault> {
        for (key, _) in attrs.iter() {
            if key != "file-name" && key != "namespace" {
                unknown_attribute(key, ctx);
            }
        }

        let file_name = attrs.get("file-name").map(str::trim).filter(|v| !v.is_empty());
        let namespace = attrs.get("namespace").map(str::trim).filter(|v| !v.is_empty());
        let (Some(file_name), Some(namespace)) = (file_name, namespace) else {
            let diagnostic = Diagnostic::new(
                ErrorCode::E0301,
                "include-library requires 'file-name' and 'namespace'",
            );
            return Err(Fault::recoverable(ctx.sink().locate(diagnostic)));
        };

        let index = ctx.include_library(file_name, namespace);
        tracing::debug!(file_name, namespace, index, "included library");
        Ok(())
    }
}

// ============================================================================
// SHARED ATTRIBUTE HANDLING
// ============================================================================

pub(super) fn set_name(element: ElementRef, value: &str, ctx: &mut ParseContext<'_>) {
    let value = value.trim();
    if value.is_empty() {
        ctx.warning(ErrorCode::E0302, "element name is empty");
        return;
    }
    if let Some(el) = ctx.module_mut().element_mut(element) {
        el.name = Some(SmolStr::new(value));
    }
}

/// Read an explicit id. Returns true if the id was taken by the element;
/// otherwise the element is left without one and is queued by the caller.
pub(super) fn read_id(element: ElementRef, value: &str, ctx: &mut ParseContext<'_>) -> bool {
    let Some(id) = positive_int(value) else {
        ctx.warning(ErrorCode::E0304, format!("'{value}' is not a valid element id"));
        return false;
    };

    let module = ctx.module_mut();
    if let Some(el) = module.element_mut(element) {
        el.id = ElementId(id);
    }
    if module.add_element_id(element) {
        return true;
    }

    if let Some(el) = module.element_mut(element) {
        el.id = ElementId::NONE;
    }
    if module.element_ref_by_id(ElementId(id)).is_some() {
        ctx.warning(ErrorCode::E0305, format!("element id {id} is already in use"));
    } else {
        ctx.warning(ErrorCode::E0304, format!("element id {id} is out of range"));
    }
    false
}

pub(super) fn set_property(
    element: ElementRef,
    key: &str,
    value: &str,
    ctx: &mut ParseContext<'_>,
) {
    if let Some(el) = ctx.module_mut().element_mut(element) {
        el.properties.insert(SmolStr::new(key), value.to_string());
    }
}

pub(super) fn unknown_attribute(key: &str, ctx: &mut ParseContext<'_>) {
    ctx.warning(ErrorCode::E0303, format!("unknown attribute '{key}'"));
}
