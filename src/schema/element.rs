//! States creating report items, data elements and styles.

use smol_str::SmolStr;

use super::states::{bind_element_name, read_id, set_name, set_property, unknown_attribute};
use super::{LEGACY_TEXT, TEXT, positive_int};
use crate::diagnostics::{ErrorCode, Fault};
use crate::model::{DesignElement, ElementKind, ElementRef};
use crate::parser::{Attributes, ParseContext, ParseState, StateTag, VERSION_3_1_0};

const TEXT_CONTENT_TYPES: &[&str] = &["plain", "html", "auto"];

/// Creates one design element and places it in the enclosing container.
#[derive(Debug)]
pub struct ElementState {
    tag: StateTag,
    kind: ElementKind,
    content_slot: Option<&'static str>,
    name: Option<SmolStr>,
    element: Option<ElementRef>,
}

impl ElementState {
    pub fn new(tag: StateTag, kind: ElementKind) -> Self {
        Self {
            tag,
            kind,
            content_slot: None,
            name: None,
            element: None,
        }
    }

    /// Slot that contained design elements are placed in.
    pub fn with_content_slot(mut self, slot: &'static str) -> Self {
        self.content_slot = Some(slot);
        self
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    fn read_extends(&self, element: ElementRef, value: &str, ctx: &mut ParseContext<'_>) {
        let value = value.trim();
        if value.is_empty() {
            ctx.warning(ErrorCode::E0302, "'extends' is empty");
            return;
        }

        let resolved = ctx.resolve_extends(value);
        if let Some(el) = ctx.module_mut().element_mut(element) {
            el.extends_name = Some(SmolStr::new(value));
            el.extends = resolved;
        }
        if resolved.is_none() {
            ctx.defer_extends(element);
        }
    }

    fn read_property(&self, element: ElementRef, key: &str, value: &str, ctx: &mut ParseContext<'_>) {
        match (self.kind, key) {
            (ElementKind::Label, "text")
            | (ElementKind::Text, "content")
            | (ElementKind::Data, "expression")
            | (ElementKind::DataSet, "data-source")
            | (ElementKind::DataSource, "driver")
            | (ElementKind::Style, "color") => set_property(element, key, value, ctx),
            (ElementKind::Label, "content") if ctx.is_version(VERSION_3_1_0) => {
                set_property(element, "text", value, ctx)
            }
            (ElementKind::Text, "content-type") => {
                if TEXT_CONTENT_TYPES.contains(&value) {
                    set_property(element, key, value, ctx);
                } else {
                    ctx.warning(
                        ErrorCode::E0302,
                        format!("'{value}' is not a text content type"),
                    );
                }
            }
            (ElementKind::Grid, "columns") | (ElementKind::Cell, "column-span") => {
                match positive_int(value) {
                    Some(n) => set_property(element, key, &n.to_string(), ctx),
                    None => ctx.warning(
                        ErrorCode::E0302,
                        format!("'{key}' must be a positive integer, found '{value}'"),
                    ),
                }
            }
            _ => unknown_attribute(key, ctx),
        }
    }
}

impl ParseState for ElementState {
    fn tag(&self) -> StateTag {
        self.tag
    }

    bind_element_name!();

    fn parse_attrs(&mut self, attrs: &Attributes, ctx: &mut ParseContext<'_>) -> Result<(), Fault> {
        let element = ctx.module_mut().add_element(DesignElement::new(self.kind));
        self.element = Some(element);
        ctx.add_to_container(element);

        let mut has_id = false;
        for (key, value) in attrs.iter() {
            match key {
                "name" => set_name(element, value, ctx),
                "id" => has_id = read_id(element, value, ctx),
                "extends" => self.read_extends(element, value, ctx),
                _ => self.read_property(element, key, value, ctx),
            }
        }
        if !has_id {
            ctx.queue_pending_id(element);
        }
        Ok(())
    }

    fn characters(&mut self, text: &str, ctx: &mut ParseContext<'_>) {
        if self.kind != ElementKind::Text {
            return;
        }
        let Some(element) = self.element else {
            return;
        };
        if let Some(el) = ctx.module_mut().element_mut(element) {
            el.properties
                .entry(SmolStr::new_static("content"))
                .or_default()
                .push_str(text);
        }
    }

    fn element(&self) -> Option<ElementRef> {
        self.element
    }

    fn slot(&self) -> Option<&str> {
        self.content_slot
    }
}

// ============================================================================
// LEGACY TEXT
// ============================================================================

/// `text-item`, the old spelling of `text`.
///
/// Reads the attributes into a text element state and then hands over to
/// it. The substitute is pushed unbound, so its closing tag is not checked.
#[derive(Debug, Default)]
pub struct LegacyTextState {
    name: Option<SmolStr>,
    inner: Option<ElementState>,
}

impl ParseState for LegacyTextState {
    fn tag(&self) -> StateTag {
        LEGACY_TEXT
    }

    bind_element_name!();

    fn parse_attrs(&mut self, attrs: &Attributes, ctx: &mut ParseContext<'_>) -> Result<(), Fault> {
        let inner = self
            .inner
            .insert(ElementState::new(TEXT, ElementKind::Text));
        inner.parse_attrs(attrs, ctx)
    }

    fn jump_to(&mut self, _ctx: &mut ParseContext<'_>) -> Option<Box<dyn ParseState>> {
        self.inner
            .take()
            .map(|inner| Box::new(inner) as Box<dyn ParseState>)
    }
}
