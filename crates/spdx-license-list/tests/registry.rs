//! Parsing expressions against the bundled license list and directory
//! mirrors.

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use serial_test::serial;
use spdx_expression::test_support::MemoryDocument;
use spdx_expression::{AnyLicenseInfo, LicenseRegistry, parse};
use spdx_license_list::{
    Catalog, DirectoryCatalog, EXCEPTIONS_FILE, LICENSES_FILE, LicenseList, LicenseListConfig,
    LicenseRecord,
};

#[fixture]
fn bundled() -> LicenseList {
    LicenseList::bundled()
}

#[rstest]
#[case("MIT", "MIT")]
#[case("gpl-2.0-or-later WITH classpath-exception-2.0", "GPL-2.0-or-later WITH Classpath-exception-2.0")]
#[case("(apache-2.0 OR mit) AND bsd-3-clause", "((Apache-2.0 OR MIT) AND BSD-3-Clause)")]
fn canonicalises_listed_ids(bundled: LicenseList, #[case] input: &str, #[case] expected: &str) {
    let document = MemoryDocument::default();
    let expr = parse(input, &bundled, &document).unwrap_or_else(|err| panic!("parse: {err}"));
    assert_eq!(expr.to_string(), expected);
}

#[rstest]
fn bundled_metadata_reaches_the_tree(bundled: LicenseList) {
    let document = MemoryDocument::default();
    let expr = parse("GPL-2.0 OR MIT", &bundled, &document)
        .unwrap_or_else(|err| panic!("parse: {err}"));
    let warnings = expr.verify();
    assert_eq!(warnings, ["license id `GPL-2.0` is deprecated"]);
}

#[rstest]
fn ids_outside_the_list_become_extracted(bundled: LicenseList) {
    let document = MemoryDocument::default();
    let expr = parse("LicenseRef-inhouse", &bundled, &document)
        .unwrap_or_else(|err| panic!("parse: {err}"));
    assert!(matches!(expr, AnyLicenseInfo::Extracted(_)));
}

#[rstest]
fn exposes_version_and_ids(bundled: LicenseList) {
    assert!(bundled.version().is_some());
    let ids = bundled.license_ids();
    assert!(ids.iter().any(|id| id == "Apache-2.0"));
    assert!(bundled.exception_ids().iter().any(|id| id == "LLVM-exception"));
}

#[test]
fn directory_mirror_replaces_the_snapshot() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    std::fs::write(
        dir.path().join(LICENSES_FILE),
        r#"{ "licenseListVersion": "0.1", "licenses": [{ "licenseId": "Only-1.0" }] }"#,
    )
    .unwrap_or_else(|err| panic!("write: {err}"));
    std::fs::write(dir.path().join(EXCEPTIONS_FILE), r#"{ "exceptions": [] }"#)
        .unwrap_or_else(|err| panic!("write: {err}"));
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .unwrap_or_else(|path| panic!("non UTF-8 path {}", path.display()));

    let config = LicenseListConfig::default().apply_overrides(Some(root.clone()), None);
    let list = LicenseList::from_config(&config);
    assert!(list.is_listed_license_id("only-1.0"));
    assert!(!list.is_listed_license_id("MIT"));
    assert_eq!(list.version().as_deref(), Some("0.1"));

    let direct = LicenseList::new(DirectoryCatalog::new(root));
    assert_eq!(direct.license_ids(), ["Only-1.0"]);
}

#[test]
fn unreadable_mirror_falls_back_to_the_snapshot() {
    let config =
        LicenseListConfig::default().apply_overrides(Some("/nonexistent/spdx".into()), None);
    let list = LicenseList::from_config(&config);
    assert!(list.is_listed_license_id("MIT"));
}

#[test]
fn in_memory_catalogs_are_sources() {
    let list = LicenseList::new(Catalog::default().with_license(LicenseRecord::new("Custom-1.0")));
    let document = MemoryDocument::default();
    let expr = parse("custom-1.0 AND MIT", &list, &document)
        .unwrap_or_else(|err| panic!("parse: {err}"));
    assert_eq!(expr.to_string(), "(Custom-1.0 AND MIT)");
    assert_eq!(document.extracted_count(), 1);
}

#[test]
#[serial]
fn shared_registry_survives_reset() {
    let shared = LicenseList::shared();
    shared.reset();
    assert!(!shared.is_loaded());
    assert!(shared.is_listed_license_id("MIT"));
    assert!(shared.is_loaded());
}

#[test]
#[serial]
fn shared_registry_is_one_instance() {
    assert!(std::ptr::eq(LicenseList::shared(), LicenseList::shared()));
}
