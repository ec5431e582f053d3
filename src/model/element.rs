//! Design elements and the handles that refer to them.
//!
//! Elements live in an append-only arena owned by their [`Module`]. Every
//! relation between elements (parent, children, `extends`) is an index into
//! an arena, checked at the point of use.
//!
//! [`Module`]: super::Module

use indexmap::IndexMap;
use smol_str::SmolStr;

// ============================================================================
// HANDLES
// ============================================================================

/// Index of an element in its module's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef(u32);

impl ElementRef {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Numeric element identifier, unique within one module.
///
/// [`ElementId::NONE`] marks an element that has not been allocated an id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Sentinel for an unallocated id.
    pub const NONE: Self = Self(0);

    pub fn is_assigned(self) -> bool {
        self != Self::NONE
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one parsed document within a design session.
///
/// Used as the root-document back-reference of elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DocumentKey(pub u32);

/// Resolved `extends` relation: an element in one of the including module's
/// libraries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExtendsRef {
    /// Position in the including module's library list.
    pub library: usize,
    /// Element in that library's arena.
    pub element: ElementRef,
}

// ============================================================================
// ELEMENT KINDS
// ============================================================================

/// The type of a design element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    // Modules
    Report,
    Library,

    // Report items
    Label,
    Text,
    Data,
    Grid,
    Cell,

    // Data and styling
    DataSource,
    DataSet,
    Style,
}

impl ElementKind {
    /// Markup tag of this kind.
    pub fn tag_name(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Library => "library",
            Self::Label => "label",
            Self::Text => "text",
            Self::Data => "data",
            Self::Grid => "grid",
            Self::Cell => "cell",
            Self::DataSource => "data-source",
            Self::DataSet => "data-set",
            Self::Style => "style",
        }
    }

    /// Returns true for the root element of a report or library.
    pub fn is_module(&self) -> bool {
        matches!(self, Self::Report | Self::Library)
    }

    /// Returns true for elements placed in report layout slots.
    pub fn is_report_item(&self) -> bool {
        matches!(self, Self::Label | Self::Text | Self::Data | Self::Grid)
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag_name())
    }
}

// ============================================================================
// ELEMENT
// ============================================================================

/// A node in a module's element tree.
#[derive(Clone, Debug)]
pub struct DesignElement {
    /// Element type.
    pub kind: ElementKind,
    /// Declared name.
    pub name: Option<SmolStr>,
    /// Identifier, [`ElementId::NONE`] until allocated.
    pub id: ElementId,
    /// Property values in declaration order.
    pub properties: IndexMap<SmolStr, String>,
    /// Containing element.
    pub parent: Option<ElementRef>,
    /// Slot of the container this element sits in.
    pub slot: Option<SmolStr>,
    /// Contained elements in document order.
    pub children: Vec<ElementRef>,
    /// Document the element is attached to; `None` while detached.
    pub root: Option<DocumentKey>,
    /// `extends` reference as written, e.g. `lib.BaseLabel`.
    pub extends_name: Option<SmolStr>,
    /// Resolved `extends` relation.
    pub extends: Option<ExtendsRef>,
}

impl DesignElement {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            name: None,
            id: ElementId::NONE,
            properties: IndexMap::new(),
            parent: None,
            slot: None,
            children: Vec::new(),
            root: None,
            extends_name: None,
            extends: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = ElementId(id);
        self
    }

    pub fn with_property(mut self, key: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Returns true if an `extends` relation was resolved for this element.
    pub fn has_extends(&self) -> bool {
        self.extends.is_some()
    }

    /// Display label used in diagnostics, e.g. `label "Title"`.
    pub fn describe(&self) -> String {
        match &self.name {
            Some(name) => format!("{} \"{name}\"", self.kind),
            None => self.kind.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id_sentinel() {
        assert!(!ElementId::NONE.is_assigned());
        assert!(ElementId(7).is_assigned());
        assert_eq!(ElementId::default(), ElementId::NONE);
    }

    #[test]
    fn test_element_builder() {
        let el = DesignElement::new(ElementKind::Label)
            .with_name("title")
            .with_id(3)
            .with_property("text", "Sales");

        assert_eq!(el.name.as_deref(), Some("title"));
        assert_eq!(el.id, ElementId(3));
        assert_eq!(el.property("text"), Some("Sales"));
        assert!(el.root.is_none());
        assert!(!el.has_extends());
    }

    #[test]
    fn test_describe() {
        let named = DesignElement::new(ElementKind::Grid).with_name("layout");
        assert_eq!(named.describe(), "grid \"layout\"");
        assert_eq!(DesignElement::new(ElementKind::DataSet).describe(), "data-set");
    }

    #[test]
    fn test_kind_classification() {
        assert!(ElementKind::Report.is_module());
        assert!(ElementKind::Library.is_module());
        assert!(ElementKind::Label.is_report_item());
        assert!(!ElementKind::Cell.is_report_item());
        assert!(!ElementKind::Style.is_module());
    }
}
