#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::fs;

use design_model::{DesignSession, ErrorCode, FileSystemResolver, ModuleKind, SessionConfig};
use tempfile::TempDir;

use crate::helpers::diagnostic_helpers::{codes, session_with};
use crate::helpers::source_fixtures::{
    BASE_LIBRARY, REPORT_USING_BASE, REPORT_USING_BROKEN, SIMPLE_REPORT,
};

#[test]
fn test_open_designs_keeps_input_order() {
    let session = session_with(&[
        ("simple.xml", SIMPLE_REPORT),
        ("uses-base.xml", REPORT_USING_BASE),
        ("uses-broken.xml", REPORT_USING_BROKEN),
    ]);
    let results = session.open_designs(&[
        "simple.xml",
        "uses-base.xml",
        "missing.xml",
        "uses-broken.xml",
        "base.xml",
    ]);

    assert_eq!(results.len(), 5);
    assert!(results[0].as_ref().unwrap().is_valid());
    assert_eq!(results[1].as_ref().unwrap().libraries().len(), 1);
    assert_eq!(
        codes(&results[2].as_ref().unwrap_err().errors),
        vec![ErrorCode::E0401]
    );
    assert_eq!(
        codes(&results[3].as_ref().unwrap_err().errors),
        vec![ErrorCode::E0402]
    );
    assert_eq!(results[4].as_ref().unwrap().kind(), ModuleKind::Library);
}

#[test]
fn test_parallel_parses_get_distinct_keys() {
    let files: Vec<String> = (0..16).map(|i| format!("report-{i}.xml")).collect();
    let sources: Vec<(&str, &str)> = files.iter().map(|f| (f.as_str(), REPORT_USING_BASE)).collect();
    let session = session_with(&sources);

    let names: Vec<&str> = files.iter().map(String::as_str).collect();
    let modules: Vec<_> = session
        .open_designs(&names)
        .into_iter()
        .map(Result::unwrap)
        .collect();

    let mut keys = HashSet::new();
    for module in &modules {
        assert!(keys.insert(module.key()));
        let library = module.libraries()[0].module().unwrap();
        assert!(keys.insert(library.key()));
    }
    assert_eq!(keys.len(), 32);
}

#[test]
fn test_file_system_resolver() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("base.xml"), BASE_LIBRARY).unwrap();
    fs::write(dir.path().join("report.xml"), REPORT_USING_BASE).unwrap();

    let session = DesignSession::new(FileSystemResolver::new(dir.path()));
    let module = session.open_design("report.xml").unwrap();
    assert!(module.is_valid());
    assert!(module.libraries()[0].is_valid());

    let err = session.open_design("absent.xml").unwrap_err();
    assert!(err.first_fatal().is_some());
}

#[test]
fn test_include_depth_is_limited() {
    let session = session_with(&[
        (
            "report.xml",
            r#"<report><include-library file-name="l1.xml" namespace="l1"/></report>"#,
        ),
        (
            "l1.xml",
            r#"<library><include-library file-name="l2.xml" namespace="l2"/></library>"#,
        ),
        ("l2.xml", "<library/>"),
    ])
    .with_config(SessionConfig { max_include_depth: 1 });

    // l1.xml is rejected for its too-deep include. The forwarded error is
    // not fatal, so the report itself is still accepted.
    let module = session.open_design("report.xml").unwrap();
    let l1 = &module.libraries()[0];
    assert!(!l1.is_valid());
    assert_eq!(codes(l1.exceptions()), vec![ErrorCode::E0402]);
    assert_eq!(l1.exceptions()[0].cause.as_ref().unwrap().code, ErrorCode::E0404);
}
