//! The license expression AST.
//!
//! [`AnyLicenseInfo`] is a closed enum, so every consumer that needs to know
//! "what kind of license is this" gets an exhaustive match. Values are owned
//! trees: combining two expressions consumes them, and the only in-place
//! mutation is a set absorbing another operand of its own kind.
//!
//! Two relations are defined over the tree:
//!
//! - `==` is structural. Listed and extracted licenses compare by id, sets
//!   compare as multisets of their flattened members.
//! - [`AnyLicenseInfo::equivalent`] is semantic. Extracted licenses compare
//!   by normalised text regardless of id, exceptions by text and metadata,
//!   and sets recurse with equivalence.
//!   It is reflexive and symmetric but not guaranteed transitive.
//!
//! `Display` produces the canonical expression string, which parses back into
//! an equal tree.

mod exception;
mod extracted;
mod listed;
mod operators;
mod sets;
mod text;
mod verify;


use std::collections::BTreeSet;
use std::fmt;

pub use exception::LicenseException;
pub use extracted::{ExtractedLicenseInfo, LICENSE_REF_PREFIX};
pub use listed::ListedLicense;
pub use operators::{ExceptionSubject, OrLaterOperator, SimpleLicense, WithExceptionOperator};
pub use sets::{LicenseSet, SetKind};
pub use text::{license_text_equivalent, normalize_license_text};
pub use verify::is_valid_license_ref;

pub(crate) use sets::merge;

/// Keyword for the "no license" sentinel.
pub const NONE_KEYWORD: &str = "NONE";
/// Keyword for the "no assertion" sentinel.
pub const NOASSERTION_KEYWORD: &str = "NOASSERTION";

/// Any node of a parsed license expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum AnyLicenseInfo {
    /// A license on the license list.
    Listed(ListedLicense),
    /// A document-local license reference.
    Extracted(ExtractedLicenseInfo),
    /// An `AND` or `OR` set.
    Set(LicenseSet),
    /// `<license>+`.
    OrLater(OrLaterOperator),
    /// `<license> WITH <exception>`.
    WithException(Box<WithExceptionOperator>),
    /// `NOASSERTION`: no licensing information was asserted.
    NoAssertion,
    /// `NONE`: there is no license.
    None,
}

impl AnyLicenseInfo {
    /// Combine `self` and `rhs` with `AND`.
    ///
    /// If `self` already is a conjunctive set, `rhs` is appended to it.
    ///
    /// # Examples
    /// ```
    /// use spdx_expression::{AnyLicenseInfo, ListedLicense};
    /// let expr = AnyLicenseInfo::from(ListedLicense::new("MIT"))
    ///     .and(ListedLicense::new("Zlib").into())
    ///     .and(ListedLicense::new("ISC").into());
    /// assert_eq!(expr.as_set().map(|set| set.len()), Some(3));
    /// ```
    #[must_use]
    pub fn and(self, rhs: Self) -> Self {
        merge(SetKind::Conjunctive, self, rhs)
    }

    /// Combine `self` and `rhs` with `OR`.
    #[must_use]
    pub fn or(self, rhs: Self) -> Self {
        merge(SetKind::Disjunctive, self, rhs)
    }

    /// Whether this is a listed or extracted license.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        matches!(self, Self::Listed(_) | Self::Extracted(_))
    }

    /// Whether this is a `NONE` or `NOASSERTION` sentinel.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::None | Self::NoAssertion)
    }

    /// The set, if this node is one.
    #[must_use]
    pub fn as_set(&self) -> Option<&LicenseSet> {
        match self {
            Self::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Convert into a [`SimpleLicense`], handing the node back otherwise.
    ///
    /// # Errors
    /// Returns `self` unchanged when it is not a listed or extracted license.
    pub fn into_simple(self) -> Result<SimpleLicense, Self> {
        match self {
            Self::Listed(license) => Ok(SimpleLicense::Listed(license)),
            Self::Extracted(license) => Ok(SimpleLicense::Extracted(license)),
            other => Err(other),
        }
    }

    /// Semantic comparison used for deduplication.
    ///
    /// # Examples
    /// ```
    /// use spdx_expression::{AnyLicenseInfo, ExtractedLicenseInfo};
    /// let a = AnyLicenseInfo::from(ExtractedLicenseInfo::with_text("LicenseRef-a", "Text\r\n"));
    /// let b = AnyLicenseInfo::from(ExtractedLicenseInfo::with_text("LicenseRef-b", "Text\n"));
    /// assert!(a.equivalent(&b));
    /// assert_ne!(a, b);
    /// ```
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Listed(a), Self::Listed(b)) => a == b,
            (Self::Extracted(a), Self::Extracted(b)) => a.equivalent(b),
            (Self::Set(a), Self::Set(b)) => a.equivalent(b),
            (Self::OrLater(a), Self::OrLater(b)) => a.equivalent(b),
            (Self::WithException(a), Self::WithException(b)) => a.equivalent(b),
            (Self::NoAssertion, Self::NoAssertion) | (Self::None, Self::None) => true,
            _ => false,
        }
    }

    /// Every license and exception id referenced by the expression.
    #[must_use]
    pub fn license_ids(&self) -> BTreeSet<String> {
        let mut ids = BTreeSet::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut BTreeSet<String>) {
        match self {
            Self::Listed(license) => {
                ids.insert(license.id().to_owned());
            }
            Self::Extracted(license) => {
                ids.insert(license.id().to_owned());
            }
            Self::Set(set) => {
                for member in set.members() {
                    member.collect_ids(ids);
                }
            }
            Self::OrLater(op) => {
                ids.insert(op.license().id().to_owned());
            }
            Self::WithException(op) => {
                ids.insert(op.license().simple_license().id().to_owned());
                ids.insert(op.exception().id().to_owned());
            }
            Self::NoAssertion | Self::None => {}
        }
    }
}

impl fmt::Display for AnyLicenseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listed(license) => license.fmt(f),
            Self::Extracted(license) => license.fmt(f),
            Self::Set(set) => set.fmt(f),
            Self::OrLater(op) => op.fmt(f),
            Self::WithException(op) => op.fmt(f),
            Self::NoAssertion => f.write_str(NOASSERTION_KEYWORD),
            Self::None => f.write_str(NONE_KEYWORD),
        }
    }
}

impl From<ListedLicense> for AnyLicenseInfo {
    fn from(license: ListedLicense) -> Self {
        Self::Listed(license)
    }
}

impl From<ExtractedLicenseInfo> for AnyLicenseInfo {
    fn from(license: ExtractedLicenseInfo) -> Self {
        Self::Extracted(license)
    }
}

impl From<SimpleLicense> for AnyLicenseInfo {
    fn from(license: SimpleLicense) -> Self {
        match license {
            SimpleLicense::Listed(license) => Self::Listed(license),
            SimpleLicense::Extracted(license) => Self::Extracted(license),
        }
    }
}

impl From<LicenseSet> for AnyLicenseInfo {
    fn from(set: LicenseSet) -> Self {
        Self::Set(set)
    }
}

impl From<OrLaterOperator> for AnyLicenseInfo {
    fn from(op: OrLaterOperator) -> Self {
        Self::OrLater(op)
    }
}

impl From<WithExceptionOperator> for AnyLicenseInfo {
    fn from(op: WithExceptionOperator) -> Self {
        Self::WithException(Box::new(op))
    }
}

impl From<ExceptionSubject> for AnyLicenseInfo {
    fn from(subject: ExceptionSubject) -> Self {
        match subject {
            ExceptionSubject::Simple(license) => license.into(),
            ExceptionSubject::OrLater(op) => op.into(),
        }
    }
}
