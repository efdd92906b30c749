//! Validation warnings for parsed expressions.
//!
//! A tree that parsed successfully can still be questionable: deprecated ids,
//! license references that do not follow the `LicenseRef-<idstring>` form, or
//! extracted licenses that never received their text. [`AnyLicenseInfo::verify`]
//! reports these as human readable messages instead of failing the parse.

use std::sync::LazyLock;

use regex::Regex;

use super::{AnyLicenseInfo, ExtractedLicenseInfo, LicenseException, ListedLicense, SimpleLicense};

static LICENSE_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:DocumentRef-[A-Za-z0-9.\-]+:)?LicenseRef-[A-Za-z0-9.\-]+$")
        .unwrap_or_else(|e| panic!("license reference pattern must compile: {e}"))
});

/// Whether `id` is a well-formed license reference, optionally qualified by
/// an external document reference.
///
/// # Examples
/// ```
/// use spdx_expression::is_valid_license_ref;
/// assert!(is_valid_license_ref("LicenseRef-7"));
/// assert!(is_valid_license_ref("DocumentRef-spdx-tool-1.2:LicenseRef-MIT-Style-2"));
/// assert!(!is_valid_license_ref("LicenseRef-"));
/// assert!(!is_valid_license_ref("MIT"));
/// ```
#[must_use]
pub fn is_valid_license_ref(id: &str) -> bool {
    LICENSE_REF.is_match(id)
}

impl AnyLicenseInfo {
    /// Collect validation warnings for the whole tree.
    ///
    /// An empty result means the expression is clean.
    #[must_use]
    pub fn verify(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        self.verify_into(&mut warnings);
        warnings
    }

    fn verify_into(&self, warnings: &mut Vec<String>) {
        match self {
            Self::Listed(listed) => verify_listed(listed, warnings),
            Self::Extracted(extracted) => verify_extracted(extracted, warnings),
            Self::Set(set) => {
                if set.is_empty() {
                    warnings.push(format!("empty {} license set", set.kind().keyword()));
                }
                for member in set.members() {
                    member.verify_into(warnings);
                }
            }
            Self::OrLater(op) => verify_simple(op.license(), warnings),
            Self::WithException(op) => {
                verify_simple(op.license().simple_license(), warnings);
                verify_exception(op.exception(), warnings);
            }
            Self::NoAssertion | Self::None => {}
        }
    }
}

fn verify_simple(license: &SimpleLicense, warnings: &mut Vec<String>) {
    match license {
        SimpleLicense::Listed(listed) => verify_listed(listed, warnings),
        SimpleLicense::Extracted(extracted) => verify_extracted(extracted, warnings),
    }
}

fn verify_listed(listed: &ListedLicense, warnings: &mut Vec<String>) {
    if listed.is_deprecated() {
        warnings.push(format!("license id `{}` is deprecated", listed.id()));
    }
}

fn verify_extracted(extracted: &ExtractedLicenseInfo, warnings: &mut Vec<String>) {
    if !is_valid_license_ref(extracted.id()) {
        warnings.push(format!(
            "invalid license reference `{}`: expected LicenseRef-[idstring]",
            extracted.id()
        ));
    }
    if extracted.text().is_none() {
        warnings.push(format!(
            "missing extracted text for license `{}`",
            extracted.id()
        ));
    }
}

fn verify_exception(exception: &LicenseException, warnings: &mut Vec<String>) {
    if !exception.is_listed() {
        warnings.push(format!(
            "exception `{}` is not on the license exception list",
            exception.id()
        ));
    }
    if exception.is_deprecated() {
        warnings.push(format!("exception id `{}` is deprecated", exception.id()));
    }
}
