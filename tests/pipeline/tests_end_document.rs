#![allow(clippy::unwrap_used)]

use design_model::{DesignSession, ErrorCode, MemoryResolver, ModuleOptions, Severity, Validity};
use rstest::rstest;

use crate::helpers::diagnostic_helpers::{assert_clean, codes, parse_report};
use crate::helpers::source_fixtures::{EMPTY_REPORT, REPORT_WITH_BAD_ATTRIBUTE, SIMPLE_REPORT};

#[test]
fn test_simple_report_is_accepted() {
    let module = assert_clean(SIMPLE_REPORT);
    assert_eq!(module.validity(), Validity::Valid);
    assert_eq!(module.element_count(), 3);

    let total = module.find_element_by_name("total").unwrap();
    assert_eq!(
        module.element(total).unwrap().property("expression"),
        Some(r#"row["total"]"#)
    );
}

#[test]
fn test_bad_attribute_gives_one_warning() {
    let module = parse_report(REPORT_WITH_BAD_ATTRIBUTE).unwrap();
    assert!(module.is_valid());
    assert_eq!(module.exceptions().len(), 1);

    let warning = &module.exceptions()[0];
    assert_eq!(warning.severity, Severity::Warning);
    assert_eq!(warning.code, ErrorCode::E0303);
    assert_eq!(warning.element.as_deref(), Some("label"));
    assert!(warning.position.is_some());
}

#[rstest]
#[case("<chart/>")]
#[case("<report><body><cell/></body></report>")]
#[case("<report><body></styles></report>")]
#[case("<report><body>")]
#[case("")]
fn test_structural_problems_reject_with_one_fatal(#[case] source: &str) {
    let err = parse_report(source).unwrap_err();
    let fatal: Vec<_> = err.errors.iter().filter(|d| d.is_fatal()).collect();
    assert_eq!(fatal.len(), 1, "{:?}", codes(&err.errors));
}

#[test]
fn test_unknown_root_reports_only_the_fatal() {
    let err = parse_report(r#"<chart name="c"><label/></chart>"#).unwrap_err();
    assert_eq!(codes(&err.errors), vec![ErrorCode::E0201]);
    assert_eq!(err.file_name, "report.xml");
}

#[test]
fn test_rejection_keeps_warnings_after_errors() {
    let err = parse_report(
        r#"<report><body><label name="a" text="a" colour="red"/></body><include-library namespace="x"/></report>"#,
    )
    .unwrap_err();
    assert_eq!(codes(&err.errors), vec![ErrorCode::E0301, ErrorCode::E0303]);
    assert!(err.first_fatal().is_none());
}

#[rstest]
#[case(EMPTY_REPORT)]
#[case(SIMPLE_REPORT)]
#[case(r#"<report version="3.1.0"><body><label name="l" content="x"/></body></report>"#)]
fn test_accepted_once_stays_accepted(#[case] source: &str) {
    let first = parse_report(source).unwrap();
    let second = parse_report(source).unwrap();
    assert_eq!(codes(first.exceptions()), codes(second.exceptions()));
    assert!(first.is_valid() && second.is_valid());
}

#[rstest]
#[case(r#"<report version="4.x"/>"#)]
#[case(r#"<report version="1.2.3.4.5"/>"#)]
#[case(r#"<report version=""/>"#)]
fn test_invalid_version_is_fatal(#[case] source: &str) {
    let err = parse_report(source).unwrap_err();
    assert_eq!(codes(&err.errors), vec![ErrorCode::E0306]);
}

#[test]
fn test_malformed_markup_is_fatal() {
    let err = parse_report("<report><body></report>").unwrap_err();
    let fatal = err.first_fatal().unwrap();
    assert!(matches!(fatal.code, ErrorCode::E0101 | ErrorCode::E0202));
}

#[test]
fn test_semantic_check_can_be_disabled() {
    let source = r#"<report><body><label name="dup" text="a"/><label name="dup" text="b"/></body></report>"#;

    let checked = parse_report(source).unwrap();
    assert_eq!(codes(checked.exceptions()), vec![ErrorCode::E0501]);

    let session = DesignSession::new(MemoryResolver::new())
        .with_options(ModuleOptions::with_semantic_check(false));
    let unchecked = session.parse_design("report.xml", source.as_bytes()).unwrap();
    assert!(unchecked.exceptions().is_empty());
    assert!(unchecked.is_valid());
}
