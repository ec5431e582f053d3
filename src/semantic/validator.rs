//! Default semantic rule set.

use rustc_hash::FxHashMap;

use super::SemanticCheck;
use crate::diagnostics::{Diagnostic, ErrorCode};
use crate::model::{DesignElement, ElementKind, ElementRef, Module};

/// Checks names, `extends` relations and required content.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesignValidator;

impl SemanticCheck for DesignValidator {
    fn check(&self, module: &Module) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut names: FxHashMap<&str, ElementRef> = FxHashMap::default();

        for (r, element) in module.elements() {
            if !module.contains(r) {
                continue;
            }

            if let Some(name) = element.name.as_deref() {
                if let Some(first) = names.get(name) {
                    let first_desc = module
                        .element(*first)
                        .map(DesignElement::describe)
                        .unwrap_or_default();
                    diagnostics.push(
                        Diagnostic::new(
                            ErrorCode::E0501,
                            format!("name '{name}' is already used by {first_desc}"),
                        )
                        .with_element(element.kind.tag_name()),
                    );
                } else {
                    names.insert(name, r);
                }
            }

            check_extends(module, r, element, &mut diagnostics);

            if element.kind == ElementKind::Label
                && element.extends.is_none()
                && element.property("text").is_none_or(str::is_empty)
            {
                diagnostics.push(
                    Diagnostic::warning(
                        ErrorCode::E0504,
                        format!("{} has no text", element.describe()),
                    )
                    .with_element(element.kind.tag_name()),
                );
            }
        }

        diagnostics
    }
}

fn check_extends(
    module: &Module,
    r: ElementRef,
    element: &DesignElement,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let Some(extends_name) = element.extends_name.as_deref() else {
        return;
    };

    match module.extends_element(r) {
        None => diagnostics.push(
            Diagnostic::new(
                ErrorCode::E0502,
                format!("{} extends unknown element '{extends_name}'", element.describe()),
            )
            .with_element(element.kind.tag_name()),
        ),
        Some(base) if base.kind != element.kind => diagnostics.push(
            Diagnostic::new(
                ErrorCode::E0503,
                format!(
                    "{} cannot extend {} '{extends_name}'",
                    element.describe(),
                    base.kind
                ),
            )
            .with_element(element.kind.tag_name()),
        ),
        Some(_) => {}
    }
}
