#![allow(clippy::unwrap_used)]

use design_model::{ErrorCode, Severity};

use crate::helpers::diagnostic_helpers::{codes, session_with};
use crate::helpers::source_fixtures::{REPORT_USING_BASE, REPORT_USING_BROKEN};

#[test]
fn test_valid_library_is_attached() {
    let session = session_with(&[("report.xml", REPORT_USING_BASE)]);
    let module = session.open_design("report.xml").unwrap();

    assert_eq!(module.libraries().len(), 1);
    let library = &module.libraries()[0];
    assert!(library.is_valid());
    assert_eq!(library.namespace(), "base");
    assert_eq!(library.file_name(), "base.xml");
    assert!(library.find_element("BaseCellLabel").is_some());

    let layout = module.find_element_by_name("layout").unwrap();
    let base = module.extends_element(layout).unwrap();
    assert_eq!(base.name.as_deref(), Some("BaseGrid"));
}

#[test]
fn test_invalid_library_fatal_is_forwarded_once() {
    let session = session_with(&[("report.xml", REPORT_USING_BROKEN)]);
    let err = session.open_design("report.xml").unwrap_err();

    assert_eq!(codes(&err.errors), vec![ErrorCode::E0402]);
    let forwarded = &err.errors[0];
    assert_eq!(forwarded.severity, Severity::Error);

    let cause = forwarded.cause.as_deref().unwrap();
    assert!(cause.is_fatal());
    assert_eq!(cause.code, ErrorCode::E0201);
    assert_eq!(cause.element.as_deref(), Some("cell"));
}

#[test]
fn test_missing_library_is_forwarded() {
    let session = session_with(&[(
        "report.xml",
        r#"<report><include-library file-name="nowhere.xml" namespace="n"/></report>"#,
    )]);
    let err = session.open_design("report.xml").unwrap_err();
    assert_eq!(codes(&err.errors), vec![ErrorCode::E0402]);
    assert_eq!(err.errors[0].cause.as_ref().unwrap().code, ErrorCode::E0401);
}

#[test]
fn test_each_invalid_library_is_forwarded() {
    let session = session_with(&[(
        "report.xml",
        r#"<report>
            <include-library file-name="broken.xml" namespace="a"/>
            <include-library file-name="base.xml" namespace="b"/>
            <include-library file-name="broken.xml" namespace="c"/>
        </report>"#,
    )]);
    let err = session.open_design("report.xml").unwrap_err();
    assert_eq!(codes(&err.errors), vec![ErrorCode::E0402, ErrorCode::E0402]);
}

#[test]
fn test_circular_include_does_not_recurse() {
    let session = session_with(&[
        (
            "report.xml",
            r#"<report><include-library file-name="a.xml" namespace="a"/></report>"#,
        ),
        (
            "a.xml",
            r#"<library><include-library file-name="b.xml" namespace="b"/></library>"#,
        ),
        (
            "b.xml",
            r#"<library><include-library file-name="a.xml" namespace="a"/></library>"#,
        ),
    ]);
    let module = session.open_design("report.xml").unwrap();

    // b.xml sees the cycle and is rejected with a forwarded semantic error.
    // That error is not fatal, so a.xml and the report stay valid.
    let a = &module.libraries()[0];
    assert!(a.is_valid());
    let b = &a.module().unwrap().libraries()[0];
    assert!(!b.is_valid());
    assert_eq!(codes(b.exceptions()), vec![ErrorCode::E0402]);
    assert_eq!(b.exceptions()[0].cause.as_ref().unwrap().code, ErrorCode::E0403);
}

#[test]
fn test_duplicate_namespace_uses_first_library() {
    let session = session_with(&[
        (
            "other.xml",
            r#"<library><components><label name="BaseLabel" text="other"/><data name="Only"/></components></library>"#,
        ),
        (
            "report.xml",
            r#"<report>
                <include-library file-name="base.xml" namespace="lib"/>
                <include-library file-name="other.xml" namespace="lib"/>
                <body>
                    <label name="a" extends="lib.BaseLabel"/>
                    <data name="b" extends="lib.Only"/>
                </body>
            </report>"#,
        ),
    ]);
    let module = session.open_design("report.xml").unwrap();

    let a = module.find_element_by_name("a").unwrap();
    assert_eq!(module.element(a).unwrap().extends.unwrap().library, 0);

    // `lib.Only` only exists in the second library and stays unresolved.
    assert_eq!(codes(module.exceptions()), vec![ErrorCode::E0502]);
}
