//! Libraries included by reference from another module.

use smol_str::SmolStr;

use super::element::ElementRef;
use super::module::Module;
use crate::diagnostics::{DesignFileError, Diagnostic};

/// A sub-document included under a namespace.
///
/// A library is parsed by its own handler. When that parse is rejected the
/// library is kept as invalid, carrying the rejection's diagnostics, so the
/// including module can decide what to forward.
#[derive(Debug)]
pub struct Library {
    namespace: SmolStr,
    file_name: SmolStr,
    valid: bool,
    exceptions: Vec<Diagnostic>,
    module: Option<Module>,
}

impl Library {
    /// A successfully parsed library.
    pub fn from_module(namespace: impl Into<SmolStr>, module: Module) -> Self {
        Self {
            namespace: namespace.into(),
            file_name: SmolStr::new(module.file_name()),
            valid: module.is_valid(),
            exceptions: module.exceptions().to_vec(),
            module: Some(module),
        }
    }

    /// A library whose parse was rejected.
    pub fn from_error(namespace: impl Into<SmolStr>, error: DesignFileError) -> Self {
        Self {
            namespace: namespace.into(),
            file_name: error.file_name,
            valid: false,
            exceptions: error.errors,
            module: None,
        }
    }

    /// A library that could not be parsed at all.
    pub fn failed(
        namespace: impl Into<SmolStr>,
        file_name: impl Into<SmolStr>,
        diagnostic: Diagnostic,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            file_name: file_name.into(),
            valid: false,
            exceptions: vec![diagnostic],
            module: None,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn exceptions(&self) -> &[Diagnostic] {
        &self.exceptions
    }

    /// First fatal exception of this library.
    pub fn first_fatal_exception(&self) -> Option<&Diagnostic> {
        self.exceptions.iter().find(|d| d.is_fatal())
    }

    pub fn module(&self) -> Option<&Module> {
        self.module.as_ref()
    }

    /// Attached element of the library with the given name.
    pub fn find_element(&self, name: &str) -> Option<ElementRef> {
        self.module.as_ref()?.find_element_by_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorCode;
    use crate::model::{DesignElement, DocumentKey, ElementKind, ModuleKind};

    #[test]
    fn test_library_from_module() {
        let mut module = Module::new(DocumentKey(2), "lib.xml", ModuleKind::Library);
        let root = module.add_element(DesignElement::new(ElementKind::Library));
        module.set_root_element(root);
        let label = module.add_element(DesignElement::new(ElementKind::Label).with_name("base"));
        module.add_content(root, "components", label);
        module.set_valid(true);

        let lib = Library::from_module("lib", module);
        assert!(lib.is_valid());
        assert_eq!(lib.file_name(), "lib.xml");
        assert_eq!(lib.find_element("base"), Some(label));
        assert!(lib.find_element("missing").is_none());
    }

    #[test]
    fn test_library_from_error_keeps_diagnostics() {
        let err = DesignFileError::new(
            "broken.xml",
            vec![
                Diagnostic::new(ErrorCode::E0301, "missing"),
                Diagnostic::fatal(ErrorCode::E0201, "unexpected"),
            ],
        );
        let lib = Library::from_error("broken", err);
        assert!(!lib.is_valid());
        assert!(lib.module().is_none());
        assert_eq!(lib.exceptions().len(), 2);
        assert_eq!(
            lib.first_fatal_exception().map(|d| d.code),
            Some(ErrorCode::E0201)
        );
    }

    #[test]
    fn test_failed_library() {
        let lib = Library::failed(
            "lib",
            "missing.xml",
            Diagnostic::fatal(ErrorCode::E0401, "not found"),
        );
        assert!(!lib.is_valid());
        assert_eq!(lib.namespace(), "lib");
        assert!(lib.first_fatal_exception().is_some());
    }
}
