//! Diagnostic assertion helpers.

use design_model::{DesignFileError, DesignSession, Diagnostic, ErrorCode, MemoryResolver, Module};

use crate::helpers::source_fixtures::{BASE_LIBRARY, BROKEN_LIBRARY};

/// Session over in-memory files, with the shared libraries available.
pub fn session_with(files: &[(&str, &str)]) -> DesignSession {
    let mut resolver = MemoryResolver::new()
        .with_file("base.xml", BASE_LIBRARY)
        .with_file("broken.xml", BROKEN_LIBRARY);
    for (name, content) in files {
        resolver.insert(*name, *content);
    }
    DesignSession::new(resolver)
}

/// Parse a single report source.
pub fn parse_report(source: &str) -> Result<Module, DesignFileError> {
    session_with(&[]).parse_design("report.xml", source.as_bytes())
}

pub fn codes(diagnostics: &[Diagnostic]) -> Vec<ErrorCode> {
    diagnostics.iter().map(|d| d.code).collect()
}

/// Assert a report is accepted without any diagnostics.
pub fn assert_clean(source: &str) -> Module {
    let module = parse_report(source).unwrap_or_else(|e| {
        panic!(
            "Expected the report to be accepted, got:\n{}",
            e.errors
                .iter()
                .map(|d| format!("  {}", d.format()))
                .collect::<Vec<_>>()
                .join("\n")
        )
    });
    assert!(
        module.exceptions().is_empty(),
        "Expected no diagnostics, got {:?}",
        codes(module.exceptions())
    );
    module
}
