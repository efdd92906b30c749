//! License text normalisation used by equivalence checks.

/// Collapse every whitespace run (spaces, tabs, `\r\n`, `\n`) into one space
/// and trim both ends. Case is preserved.
#[must_use]
pub fn normalize_license_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compare two license texts after normalisation.
#[must_use]
pub fn license_text_equivalent(a: &str, b: &str) -> bool {
    a.split_whitespace().eq(b.split_whitespace())
}

/// Compare optional texts; two absent texts are equivalent.
pub(crate) fn optional_text_equivalent(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => license_text_equivalent(a, b),
        (None, None) => true,
        _ => false,
    }
}
