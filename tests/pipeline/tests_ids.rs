#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use design_model::{ElementId, ErrorCode, Module};
use rstest::rstest;

use crate::helpers::diagnostic_helpers::{codes, parse_report, session_with};
use crate::helpers::source_fixtures::REPORT_USING_BASE;

fn attached_ids(module: &Module) -> Vec<ElementId> {
    module
        .elements()
        .filter(|(r, _)| module.contains(*r))
        .map(|(_, el)| el.id)
        .collect()
}

#[rstest]
#[case(r#"<report><body><label name="a" text="a"/><label name="b" text="b"/></body></report>"#)]
#[case(r#"<report id="3"><body><label name="a" id="9" text="a"/><label name="b" text="b"/></body></report>"#)]
#[case(r#"<report id="2"><body><label name="a" id="2" text="a"/><grid name="g"><cell/></grid></body></report>"#)]
fn test_ids_are_assigned_and_unique(#[case] source: &str) {
    let module = parse_report(source).unwrap();
    let ids = attached_ids(&module);

    assert!(ids.iter().all(|id| id.is_assigned()));
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(module.id_count(), ids.len());

    for (r, el) in module.elements() {
        assert_eq!(module.element_ref_by_id(el.id), Some(r));
    }
}

#[test]
fn test_allocated_ids_are_monotonic() {
    let module = parse_report(
        r#"<report id="5"><body><label name="a" text="a"/><label name="b" text="b"/><label name="c" text="c"/></body></report>"#,
    )
    .unwrap();
    let ids: Vec<u64> = ["a", "b", "c"]
        .iter()
        .map(|n| module.element(module.find_element_by_name(n).unwrap()).unwrap().id.get())
        .collect();
    assert_eq!(ids, vec![6, 7, 8]);
}

#[test]
fn test_colliding_id_is_replaced() {
    let module = parse_report(
        r#"<report id="1"><body><label name="a" id="1" text="a"/></body></report>"#,
    )
    .unwrap();
    assert_eq!(codes(module.exceptions()), vec![ErrorCode::E0305]);
    let a = module.element(module.find_element_by_name("a").unwrap()).unwrap();
    assert_eq!(a.id, ElementId(2));
}

#[test]
fn test_extending_elements_get_ids() {
    let session = session_with(&[("report.xml", REPORT_USING_BASE)]);
    let module = session.open_design("report.xml").unwrap();

    for name in ["title", "layout"] {
        let r = module.find_element_by_name(name).unwrap();
        let el = module.element(r).unwrap();
        assert!(el.has_extends(), "{name} should extend a library element");
        assert!(el.id.is_assigned());
        assert_eq!(module.element_ref_by_id(el.id), Some(r));
    }
}

#[test]
fn test_id_at_top_of_range_is_a_warning() {
    let module = parse_report(
        r#"<report id="18446744073709551615"><body><label name="a" text="a"/></body></report>"#,
    )
    .unwrap();
    assert!(module.is_valid());
    assert_eq!(codes(module.exceptions()), vec![ErrorCode::E0304]);

    let ids = attached_ids(&module);
    assert!(ids.iter().all(|id| id.is_assigned()));
    assert!(!ids.contains(&ElementId(u64::MAX)));
    assert_eq!(module.id_count(), ids.len());
}

#[test]
fn test_spent_counter_still_gives_unique_ids() {
    let module = parse_report(
        r#"<report id="18446744073709551614"><body><label name="a" text="a"/><label name="b" text="b"/></body></report>"#,
    )
    .unwrap();
    assert!(module.exceptions().is_empty());

    let ids = attached_ids(&module);
    assert!(ids.iter().all(|id| id.is_assigned()));
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(module.id_count(), ids.len());
}
