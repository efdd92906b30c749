//! End-to-end behaviour of the public parsing API.
//!
//! These tests drive `parse` through the in-memory registry and document from
//! `test_support`, checking the properties callers rely on: canonical
//! rendering, flattening, precedence, sentinel handling and collision-free
//! reference allocation, plus the JSON shape of serialised trees.

use rstest::{fixture, rstest};
use serde_json::Value;
use spdx_expression::test_support::{MemoryDocument, MemoryRegistry};
use spdx_expression::{
    AnyLicenseInfo, ExtractedLicenseInfo, ExtractedLicenseScope, LicenseParseError, ListedLicense,
    SetKind, parse,
};

#[fixture]
fn registry() -> MemoryRegistry {
    MemoryRegistry::with_licenses([
        "MIT",
        "Apache-2.0",
        "GPL-2.0-only",
        "GPL-2.0",
        "LGPL-2.1",
        "BSD-3-Clause",
        "EPL-2.0",
    ])
    .with_exceptions(["Classpath-exception-2.0", "Autoconf-exception-2.0"])
}

fn parse_with(registry: &MemoryRegistry, input: &str) -> AnyLicenseInfo {
    let document = MemoryDocument::default();
    parse(input, registry, &document).unwrap_or_else(|err| panic!("parse `{input}`: {err}"))
}

#[rstest]
#[case("MIT", "MIT")]
#[case("MIT AND Apache-2.0", "(MIT AND Apache-2.0)")]
#[case("GPL-2.0+", "GPL-2.0+")]
#[case(
    "GPL-2.0+ WITH Classpath-exception-2.0",
    "GPL-2.0+ WITH Classpath-exception-2.0"
)]
#[case(
    "EPL-2.0 OR (GPL-2.0-only WITH Classpath-exception-2.0 AND MIT)",
    "(EPL-2.0 OR (GPL-2.0-only WITH Classpath-exception-2.0 AND MIT))"
)]
#[case("LicenseRef-acme OR MIT", "(LicenseRef-acme OR MIT)")]
#[case("NOASSERTION", "NOASSERTION")]
fn renders_canonically(
    registry: MemoryRegistry,
    #[case] input: &str,
    #[case] rendered: &str,
) {
    assert_eq!(parse_with(&registry, input).to_string(), rendered);
}

#[rstest]
#[case("MIT")]
#[case("(MIT OR Apache-2.0) AND (BSD-3-Clause OR GPL-2.0+)")]
#[case("LGPL-2.1+ WITH Autoconf-exception-2.0 OR LicenseRef-2 AND MIT")]
#[case("((MIT))")]
#[case("NONE")]
fn rendering_parses_back_to_an_equal_tree(registry: MemoryRegistry, #[case] input: &str) {
    let first = parse_with(&registry, input);
    let second = parse_with(&registry, &first.to_string());
    assert_eq!(first, second);
}

#[rstest]
fn same_kind_chains_collapse(registry: MemoryRegistry) {
    let grouped = parse_with(&registry, "(MIT AND Apache-2.0) AND (BSD-3-Clause AND EPL-2.0)");
    let set = grouped
        .as_set()
        .unwrap_or_else(|| panic!("expected set, got {grouped}"));
    assert_eq!(set.kind(), SetKind::Conjunctive);
    assert_eq!(set.len(), 4);
}

#[rstest]
fn precedence_matches_explicit_grouping(registry: MemoryRegistry) {
    let implicit = parse_with(&registry, "MIT OR Apache-2.0 AND GPL-2.0+ WITH Classpath-exception-2.0");
    let explicit = parse_with(
        &registry,
        "MIT OR (Apache-2.0 AND ((GPL-2.0+) WITH Classpath-exception-2.0))",
    );
    assert_eq!(implicit, explicit);
}

#[rstest]
fn set_equality_ignores_member_order(registry: MemoryRegistry) {
    assert_eq!(
        parse_with(&registry, "MIT AND Apache-2.0 AND BSD-3-Clause"),
        parse_with(&registry, "BSD-3-Clause AND MIT AND Apache-2.0"),
    );
    assert_ne!(
        parse_with(&registry, "MIT AND Apache-2.0"),
        parse_with(&registry, "MIT OR Apache-2.0"),
    );
}

#[rstest]
fn sentinels_are_distinct_values(registry: MemoryRegistry) {
    let none = parse_with(&registry, "NONE");
    let noassertion = parse_with(&registry, "NOASSERTION");
    assert_eq!(none, AnyLicenseInfo::None);
    assert_eq!(noassertion, AnyLicenseInfo::NoAssertion);
    assert_ne!(none, noassertion);
    assert!(!none.is_simple());
}

#[rstest]
fn extracted_references_are_created_once(registry: MemoryRegistry) {
    let document = MemoryDocument::default();
    let first = parse("LicenseRef-acme", &registry, &document)
        .unwrap_or_else(|err| panic!("first parse: {err}"));
    let second = parse("LicenseRef-acme AND MIT", &registry, &document)
        .unwrap_or_else(|err| panic!("second parse: {err}"));
    assert_eq!(document.extracted_count(), 1);
    assert!(second.as_set().is_some_and(|set| set.members().contains(&first)));
}

#[test]
fn allocation_skips_identifiers_already_in_the_document() {
    let document = MemoryDocument::default()
        .with_extracted(ExtractedLicenseInfo::with_text("LicenseRef-1", "one"))
        .with_extracted(ExtractedLicenseInfo::with_text("LicenseRef-3", "three"));
    let minted: Vec<_> = (0..3)
        .map(|_| document.next_free_extracted_license_id())
        .collect();
    assert_eq!(minted, ["LicenseRef-2", "LicenseRef-4", "LicenseRef-5"]);
}

#[test]
fn element_ids_are_allocated_independently() {
    let document = MemoryDocument::default();
    assert_eq!(document.next_free_extracted_license_id(), "LicenseRef-1");
    assert_eq!(document.next_free_element_id(), "SPDXRef-1");
    assert_eq!(document.next_free_element_id(), "SPDXRef-2");
}

#[rstest]
#[case("(MIT AND")]
#[case("MIT WITH")]
#[case("(MIT AND Apache-2.0)+")]
#[case("MIT AND")]
#[case(")")]
#[case("   ")]
fn malformed_expressions_are_rejected(registry: MemoryRegistry, #[case] input: &str) {
    let document = MemoryDocument::default();
    assert!(parse(input, &registry, &document).is_err());
}

#[rstest]
fn errors_are_matchable(registry: MemoryRegistry) {
    let document = MemoryDocument::default();
    let err = parse("MIT WITH", &registry, &document).err();
    assert_eq!(err, Some(LicenseParseError::MissingException { position: 1 }));
}

#[test]
fn line_endings_do_not_change_extracted_text() {
    let unix = ExtractedLicenseInfo::with_text("LicenseRef-a", "Line one\nLine two\n");
    let windows = ExtractedLicenseInfo::with_text("LicenseRef-b", "Line one\r\nLine two\r\n");
    let other = ExtractedLicenseInfo::with_text("LicenseRef-c", "Line one\nLine three\n");
    assert!(unix.equivalent(&windows));
    assert!(!unix.equivalent(&other));
}

#[test]
fn listed_licenses_keep_registry_metadata() {
    let registry = MemoryRegistry::default().with_license(
        ListedLicense::new("MIT")
            .with_name("MIT License")
            .with_osi_approved(true),
    );
    match parse_with(&registry, "mit") {
        AnyLicenseInfo::Listed(license) => {
            assert_eq!(license.name(), Some("MIT License"));
            assert!(license.is_osi_approved());
        }
        other => panic!("expected listed license, got {other}"),
    }
}

fn kind_of(value: &Value) -> Option<&str> {
    value.get("kind").and_then(Value::as_str)
}

#[rstest]
fn serialises_trees_with_snake_case_kind_tags(registry: MemoryRegistry) {
    let expr = parse_with(&registry, "MIT OR GPL-2.0+ WITH Classpath-exception-2.0");
    let json = serde_json::to_value(&expr).unwrap_or_else(|err| panic!("serialise: {err}"));
    assert_eq!(kind_of(&json), Some("set"));
    assert_eq!(json.get("operator").and_then(Value::as_str), Some("disjunctive"));

    let members = json
        .get("members")
        .and_then(Value::as_array)
        .unwrap_or_else(|| panic!("set without members: {json}"));
    let mut kinds: Vec<_> = members.iter().filter_map(kind_of).collect();
    kinds.sort_unstable();
    assert_eq!(kinds, ["listed", "with_exception"]);

    let with = members
        .iter()
        .find(|member| kind_of(member) == Some("with_exception"))
        .unwrap_or_else(|| panic!("no with_exception member in {json}"));
    let subject = with
        .get("license")
        .unwrap_or_else(|| panic!("no subject in {with}"));
    assert_eq!(subject.get("subject").and_then(Value::as_str), Some("or_later"));
    assert_eq!(
        subject.pointer("/license/kind").and_then(Value::as_str),
        Some("listed")
    );
    assert_eq!(
        with.pointer("/exception/id").and_then(Value::as_str),
        Some("Classpath-exception-2.0")
    );
}

#[rstest]
#[case(AnyLicenseInfo::NoAssertion, "no_assertion")]
#[case(AnyLicenseInfo::None, "none")]
#[case(ExtractedLicenseInfo::new("LicenseRef-1").into(), "extracted")]
fn serialises_leaf_kinds(#[case] expr: AnyLicenseInfo, #[case] expected: &str) {
    let json = serde_json::to_value(&expr).unwrap_or_else(|err| panic!("serialise: {err}"));
    assert_eq!(kind_of(&json), Some(expected));
}
