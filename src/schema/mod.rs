//! Built-in report design schema.
//!
//! ```text
//! document
//! └── report | library
//!     ├── property
//!     ├── include-library
//!     ├── body | components      label, text, data, grid, text-item
//!     │                          grid → cell → (report items)
//!     ├── data-sources           data-source
//!     ├── data-sets              data-set
//!     └── styles                 style
//! ```
//!
//! Every design element also accepts `property` children.

mod element;
mod states;


pub use element::{ElementState, LegacyTextState};
pub use states::{DocumentState, IncludeLibraryState, ModuleState, PropertyState, SlotState};

use crate::model::{ElementKind, ModuleKind};
use crate::parser::{Grammar, StateTag};

// ============================================================================
// STATE TAGS
// ============================================================================

pub const DOCUMENT: StateTag = StateTag("document");
pub const REPORT: StateTag = StateTag("report");
pub const LIBRARY: StateTag = StateTag("library");

pub const PROPERTY: StateTag = StateTag("property");
pub const INCLUDE_LIBRARY: StateTag = StateTag("include-library");

pub const CONTENT_SLOT: StateTag = StateTag("content-slot");
pub const DATA_SOURCES_SLOT: StateTag = StateTag("data-sources-slot");
pub const DATA_SETS_SLOT: StateTag = StateTag("data-sets-slot");
pub const STYLES_SLOT: StateTag = StateTag("styles-slot");

pub const LABEL: StateTag = StateTag("label");
pub const TEXT: StateTag = StateTag("text");
pub const LEGACY_TEXT: StateTag = StateTag("text-item");
pub const DATA: StateTag = StateTag("data");
pub const GRID: StateTag = StateTag("grid");
pub const CELL: StateTag = StateTag("cell");
pub const DATA_SOURCE: StateTag = StateTag("data-source");
pub const DATA_SET: StateTag = StateTag("data-set");
pub const STYLE: StateTag = StateTag("style");

const MODULES: &[StateTag] = &[REPORT, LIBRARY];

const ELEMENTS: &[StateTag] = &[
    REPORT,
    LIBRARY,
    LABEL,
    TEXT,
    DATA,
    GRID,
    CELL,
    DATA_SOURCE,
    DATA_SET,
    STYLE,
];

const REPORT_ITEMS: &[(&str, StateTag)] = &[
    ("label", LABEL),
    ("text", TEXT),
    ("data", DATA),
    ("grid", GRID),
    ("text-item", LEGACY_TEXT),
];

/// The grammar of report and library design files.
pub fn report_grammar() -> Grammar {
    Grammar::builder(DOCUMENT, || Box::new(DocumentState::default()))
        .state(REPORT, || Box::new(ModuleState::new(REPORT, ModuleKind::Report)))
        .state(LIBRARY, || Box::new(ModuleState::new(LIBRARY, ModuleKind::Library)))
        .state(PROPERTY, || Box::new(PropertyState::default()))
        .state(INCLUDE_LIBRARY, || Box::new(IncludeLibraryState::default()))
        .state(CONTENT_SLOT, || Box::new(SlotState::new(CONTENT_SLOT)))
        .state(DATA_SOURCES_SLOT, || Box::new(SlotState::new(DATA_SOURCES_SLOT)))
        .state(DATA_SETS_SLOT, || Box::new(SlotState::new(DATA_SETS_SLOT)))
        .state(STYLES_SLOT, || Box::new(SlotState::new(STYLES_SLOT)))
        .state(LABEL, || Box::new(ElementState::new(LABEL, ElementKind::Label)))
        .state(TEXT, || Box::new(ElementState::new(TEXT, ElementKind::Text)))
        .state(LEGACY_TEXT, || Box::new(LegacyTextState::default()))
        .state(DATA, || Box::new(ElementState::new(DATA, ElementKind::Data)))
        .state(GRID, || {
            Box::new(ElementState::new(GRID, ElementKind::Grid).with_content_slot("cells"))
        })
        .state(CELL, || {
            Box::new(ElementState::new(CELL, ElementKind::Cell).with_content_slot("content"))
        })
        .state(DATA_SOURCE, || {
            Box::new(ElementState::new(DATA_SOURCE, ElementKind::DataSource))
        })
        .state(DATA_SET, || Box::new(ElementState::new(DATA_SET, ElementKind::DataSet)))
        .state(STYLE, || Box::new(ElementState::new(STYLE, ElementKind::Style)))
        .transition(DOCUMENT, "report", REPORT)
        .transition(DOCUMENT, "library", LIBRARY)
        .transitions(
            MODULES,
            &[
                ("include-library", INCLUDE_LIBRARY),
                ("body", CONTENT_SLOT),
                ("components", CONTENT_SLOT),
                ("data-sources", DATA_SOURCES_SLOT),
                ("data-sets", DATA_SETS_SLOT),
                ("styles", STYLES_SLOT),
            ],
        )
        .transitions(ELEMENTS, &[("property", PROPERTY)])
        .transitions(&[CONTENT_SLOT, CELL], REPORT_ITEMS)
        .transition(GRID, "cell", CELL)
        .transition(DATA_SOURCES_SLOT, "data-source", DATA_SOURCE)
        .transition(DATA_SETS_SLOT, "data-set", DATA_SET)
        .transition(STYLES_SLOT, "style", STYLE)
        .build()
}

/// Parse a positive integer attribute value.
fn positive_int(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|n| *n > 0)
}
