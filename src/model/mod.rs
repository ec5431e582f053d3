//! Document model built by the parser.
//!
//! A [`Module`] owns an append-only arena of [`DesignElement`]s. Relations
//! between elements are [`ElementRef`] indices; `extends` relations point
//! into the arena of an included [`Library`] through [`ExtendsRef`].

mod element;
mod library;
mod module;
mod options;

pub use element::{DesignElement, DocumentKey, ElementId, ElementKind, ElementRef, ExtendsRef};
pub use library::Library;
pub use module::{Module, ModuleKind, Validity};
pub use options::ModuleOptions;
