//! Parser coverage: precedence, grouping, identifier resolution and the
//! structural error taxonomy.

use rstest::{fixture, rstest};

use super::parse;
use crate::errors::{LicenseParseError, RegistryError};
use crate::license::{AnyLicenseInfo, ExceptionSubject, SetKind, SimpleLicense};
use crate::test_support::{MemoryDocument, MemoryRegistry};
use crate::{ExtractedLicenseInfo, ExtractedLicenseScope, ListedLicense, MAX_NESTING_DEPTH};

#[fixture]
fn registry() -> MemoryRegistry {
    MemoryRegistry::with_licenses([
        "MIT",
        "Apache-2.0",
        "GPL-2.0",
        "LGPL-2.1",
        "BSD-3-Clause",
    ])
    .with_exceptions(["Autoconf-exception-2.0", "Classpath-exception-2.0"])
}

fn parse_ok(registry: &MemoryRegistry, input: &str) -> AnyLicenseInfo {
    let document = MemoryDocument::default();
    parse(input, registry, &document).unwrap_or_else(|err| panic!("parse `{input}`: {err}"))
}

fn parse_err(registry: &MemoryRegistry, input: &str) -> LicenseParseError {
    let document = MemoryDocument::default();
    match parse(input, registry, &document) {
        Ok(expr) => panic!("expected parse error for `{input}`, got {expr}"),
        Err(err) => err,
    }
}

fn listed(id: &str) -> AnyLicenseInfo {
    ListedLicense::new(id).into()
}

#[rstest]
fn parses_single_listed_license(registry: MemoryRegistry) {
    let expr = parse_ok(&registry, "MIT");
    assert!(matches!(&expr, AnyLicenseInfo::Listed(license) if license.id() == "MIT"));
}

#[rstest]
fn resolves_listed_ids_case_insensitively(registry: MemoryRegistry) {
    let expr = parse_ok(&registry, "apache-2.0");
    assert_eq!(expr.to_string(), "Apache-2.0");
}

#[rstest]
fn unknown_ids_become_extracted_licenses(registry: MemoryRegistry) {
    let document = MemoryDocument::default();
    let expr = parse("LicenseRef-custom AND MIT", &registry, &document)
        .unwrap_or_else(|err| panic!("parse: {err}"));
    let set = expr.as_set().unwrap_or_else(|| panic!("expected set, got {expr}"));
    assert!(
        set.members()
            .iter()
            .any(|m| matches!(m, AnyLicenseInfo::Extracted(e) if e.id() == "LicenseRef-custom"))
    );
    assert_eq!(document.extracted_count(), 1);
}

#[rstest]
fn reuses_extracted_licenses_known_to_the_document(registry: MemoryRegistry) {
    let document = MemoryDocument::default()
        .with_extracted(ExtractedLicenseInfo::with_text("LicenseRef-1", "Custom terms"));
    let expr = parse("LicenseRef-1", &registry, &document)
        .unwrap_or_else(|err| panic!("parse: {err}"));
    match expr {
        AnyLicenseInfo::Extracted(license) => assert_eq!(license.text(), Some("Custom terms")),
        other => panic!("expected extracted license, got {other}"),
    }
}

#[rstest]
#[case("NONE", AnyLicenseInfo::None)]
#[case("NOASSERTION", AnyLicenseInfo::NoAssertion)]
#[case("  NONE\n", AnyLicenseInfo::None)]
fn short_circuits_sentinels(
    registry: MemoryRegistry,
    #[case] input: &str,
    #[case] expected: AnyLicenseInfo,
) {
    assert_eq!(parse_ok(&registry, input), expected);
}

#[rstest]
fn chains_of_and_form_one_flat_set(registry: MemoryRegistry) {
    let expr = parse_ok(&registry, "MIT AND Apache-2.0 AND BSD-3-Clause");
    let set = expr.as_set().unwrap_or_else(|| panic!("expected set, got {expr}"));
    assert_eq!(set.kind(), SetKind::Conjunctive);
    assert_eq!(set.len(), 3);
    assert!(set.members().iter().all(AnyLicenseInfo::is_simple));
}

#[rstest]
fn chains_of_or_form_one_flat_set(registry: MemoryRegistry) {
    let expr = parse_ok(&registry, "MIT OR Apache-2.0 OR BSD-3-Clause OR GPL-2.0");
    let set = expr.as_set().unwrap_or_else(|| panic!("expected set, got {expr}"));
    assert_eq!(set.kind(), SetKind::Disjunctive);
    assert_eq!(set.len(), 4);
}

#[rstest]
fn parenthesised_same_kind_groups_are_flattened(registry: MemoryRegistry) {
    let expr = parse_ok(&registry, "MIT AND (Apache-2.0 AND BSD-3-Clause)");
    let set = expr.as_set().unwrap_or_else(|| panic!("expected set, got {expr}"));
    assert_eq!(set.len(), 3);
}

#[rstest]
fn and_binds_tighter_than_or(registry: MemoryRegistry) {
    let expr = parse_ok(&registry, "MIT OR Apache-2.0 AND BSD-3-Clause");
    let expected = listed("MIT").or(listed("Apache-2.0").and(listed("BSD-3-Clause")));
    assert_eq!(expr, expected);
}

#[rstest]
fn parentheses_override_precedence(registry: MemoryRegistry) {
    let expr = parse_ok(&registry, "(MIT OR Apache-2.0) AND BSD-3-Clause");
    let expected = listed("MIT").or(listed("Apache-2.0")).and(listed("BSD-3-Clause"));
    assert_eq!(expr, expected);
}

#[rstest]
fn or_later_and_with_bind_before_and(registry: MemoryRegistry) {
    let expr = parse_ok(&registry, "GPL-2.0+ WITH Autoconf-exception-2.0 AND MIT");
    let set = expr.as_set().unwrap_or_else(|| panic!("expected set, got {expr}"));
    assert_eq!(set.kind(), SetKind::Conjunctive);
    let with = set
        .members()
        .iter()
        .find_map(|member| match member {
            AnyLicenseInfo::WithException(op) => Some(op),
            _ => None,
        })
        .unwrap_or_else(|| panic!("expected a WITH member in {expr}"));
    assert!(matches!(with.license(), ExceptionSubject::OrLater(op) if op.license().id() == "GPL-2.0"));
    assert_eq!(with.exception().id(), "Autoconf-exception-2.0");
    assert!(with.exception().is_listed());
}

#[rstest]
fn or_later_applies_to_right_operand(registry: MemoryRegistry) {
    let expr = parse_ok(&registry, "MIT AND LGPL-2.1+");
    assert_eq!(expr.to_string(), "(MIT AND LGPL-2.1+)");
}

#[rstest]
fn with_wraps_plain_license(registry: MemoryRegistry) {
    let expr = parse_ok(&registry, "GPL-2.0 WITH Classpath-exception-2.0");
    match expr {
        AnyLicenseInfo::WithException(op) => {
            assert!(matches!(op.license(), ExceptionSubject::Simple(SimpleLicense::Listed(_))));
        }
        other => panic!("expected WITH operator, got {other}"),
    }
}

#[rstest]
fn unlisted_exceptions_are_kept(registry: MemoryRegistry) {
    let expr = parse_ok(&registry, "MIT WITH my-exception");
    match expr {
        AnyLicenseInfo::WithException(op) => {
            assert_eq!(op.exception().id(), "my-exception");
            assert!(!op.exception().is_listed());
        }
        other => panic!("expected WITH operator, got {other}"),
    }
}

#[rstest]
fn accepts_lower_case_operators(registry: MemoryRegistry) {
    let lower = parse_ok(&registry, "mit or gpl-2.0+ with classpath-exception-2.0");
    let upper = parse_ok(&registry, "MIT OR GPL-2.0+ WITH Classpath-exception-2.0");
    assert_eq!(lower, upper);
}

#[rstest]
fn nested_groups_without_spaces(registry: MemoryRegistry) {
    let expr = parse_ok(&registry, "((MIT OR Apache-2.0) AND (GPL-2.0+))");
    let expected = listed("MIT")
        .or(listed("Apache-2.0"))
        .and(parse_ok(&registry, "GPL-2.0+"));
    assert_eq!(expr, expected);
}

#[rstest]
#[case("", LicenseParseError::Empty)]
#[case("()", LicenseParseError::Empty)]
#[case("(MIT AND", LicenseParseError::UnmatchedOpen { position: 0 })]
#[case("MIT AND (Apache-2.0", LicenseParseError::UnmatchedOpen { position: 2 })]
#[case("MIT)", LicenseParseError::UnmatchedClose { position: 1 })]
#[case(") MIT (", LicenseParseError::UnmatchedClose { position: 0 })]
#[case("(MIT AND)", LicenseParseError::MissingOperand { operator: "AND" })]
#[case("(MIT Apache-2.0)", LicenseParseError::ExtraOperands { count: 2 })]
#[case("MIT WITH", LicenseParseError::MissingException { position: 1 })]
#[case("MIT WITH (Classpath-exception-2.0)", LicenseParseError::MissingException { position: 1 })]
#[case("AND MIT", LicenseParseError::MissingOperand { operator: "AND" })]
#[case("MIT OR", LicenseParseError::MissingOperand { operator: "OR" })]
#[case("MIT AND OR Apache-2.0", LicenseParseError::MissingOperand { operator: "OR" })]
#[case("+ MIT", LicenseParseError::MissingOperand { operator: "+" })]
#[case("MIT Apache-2.0", LicenseParseError::ExtraOperands { count: 2 })]
#[case("MIT AND NONE", LicenseParseError::MisplacedSentinel { keyword: "NONE" })]
#[case("NOASSERTION OR MIT", LicenseParseError::MisplacedSentinel { keyword: "NOASSERTION" })]
fn rejects_malformed_expressions(
    registry: MemoryRegistry,
    #[case] input: &str,
    #[case] expected: LicenseParseError,
) {
    assert_eq!(parse_err(&registry, input), expected);
}

#[rstest]
#[case("(MIT AND Apache-2.0)+")]
#[case("MIT++")]
#[case("MIT WITH Classpath-exception-2.0+")]
fn rejects_or_later_on_non_simple_operands(registry: MemoryRegistry, #[case] input: &str) {
    assert!(matches!(
        parse_err(&registry, input),
        LicenseParseError::OrLaterOnNonSimple { .. }
    ));
}

#[rstest]
#[case("(MIT OR Apache-2.0) WITH Classpath-exception-2.0")]
#[case("MIT WITH Autoconf-exception-2.0 WITH Classpath-exception-2.0")]
#[case("WITH Classpath-exception-2.0")]
fn rejects_with_on_ineligible_operands(registry: MemoryRegistry, #[case] input: &str) {
    assert!(matches!(
        parse_err(&registry, input),
        LicenseParseError::InvalidWithOperand { .. }
    ));
}

#[test]
fn surfaces_registry_consistency_faults() {
    let registry = MemoryRegistry::default().with_phantom_license("Ghost-1.0");
    let err = parse_err(&registry, "Ghost-1.0 OR MIT");
    assert_eq!(
        err,
        LicenseParseError::Registry(RegistryError::MissingListedLicense {
            id: "Ghost-1.0".into()
        })
    );
}

#[rstest]
fn parsing_does_not_advance_reference_counter(registry: MemoryRegistry) {
    let document = MemoryDocument::default();
    for _ in 0..2 {
        parse("LicenseRef-7 OR MIT", &registry, &document)
            .unwrap_or_else(|err| panic!("parse: {err}"));
    }
    assert_eq!(document.extracted_count(), 1);
    assert_eq!(document.next_free_extracted_license_id(), "LicenseRef-1");
}

#[rstest]
fn error_messages_are_descriptive(registry: MemoryRegistry) {
    let message = parse_err(&registry, "(MIT AND Apache-2.0)+").to_string();
    assert!(
        message.contains("(MIT AND Apache-2.0)"),
        "unexpected error message: {message}"
    );
}

/// `levels` groups alternating between `AND` and `OR`, innermost `MIT`.
fn alternating_groups(levels: usize) -> String {
    let mut expr = String::new();
    for level in 0..levels {
        let op = if level & 1 == 0 { "AND" } else { "OR" };
        expr.push_str("Apache-2.0 ");
        expr.push_str(op);
        expr.push_str(" (");
    }
    expr.push_str("MIT");
    expr.push_str(&")".repeat(levels));
    expr
}

#[rstest]
fn deeply_redundant_parentheses_parse_without_recursion(registry: MemoryRegistry) {
    let levels = 100_000;
    let input = format!("{}MIT{}", "(".repeat(levels), ")".repeat(levels));
    assert_eq!(parse_ok(&registry, &input), listed("MIT"));
}

#[rstest]
fn deeply_unbalanced_parentheses_report_the_outermost_open(registry: MemoryRegistry) {
    let levels = 100_000;
    let input = format!("{}MIT{}", "(".repeat(levels), ")".repeat(levels - 1));
    assert_eq!(
        parse_err(&registry, &input),
        LicenseParseError::UnmatchedOpen { position: 0 }
    );
}

#[rstest]
fn alternating_groups_up_to_the_limit_parse(registry: MemoryRegistry) {
    let expr = parse_ok(&registry, &alternating_groups(MAX_NESTING_DEPTH - 1));
    let set = expr.as_set().unwrap_or_else(|| panic!("expected set, got {expr}"));
    assert_eq!(set.kind(), SetKind::Conjunctive);
}

#[rstest]
#[case(MAX_NESTING_DEPTH)]
#[case(100_000)]
fn alternating_groups_past_the_limit_are_rejected(registry: MemoryRegistry, #[case] levels: usize) {
    assert_eq!(
        parse_err(&registry, &alternating_groups(levels)),
        LicenseParseError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH
        }
    );
}
