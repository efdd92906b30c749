//! Simple licenses and the two operators that decorate them.
//!
//! The operand restrictions of `+` and `WITH` are carried by the types: an
//! [`OrLaterOperator`] can only wrap a [`SimpleLicense`], and a
//! [`WithExceptionOperator`] can only wrap an [`ExceptionSubject`].

use std::fmt;

use super::{ExtractedLicenseInfo, LicenseException, ListedLicense};

/// A listed or extracted license: the only operands `+` accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SimpleLicense {
    /// A license on the license list.
    Listed(ListedLicense),
    /// A document-local license reference.
    Extracted(ExtractedLicenseInfo),
}

impl SimpleLicense {
    /// Identifier of the wrapped license.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Listed(license) => license.id(),
            Self::Extracted(license) => license.id(),
        }
    }

    /// Listed licenses compare by id, extracted licenses by normalised text.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Listed(a), Self::Listed(b)) => a == b,
            (Self::Extracted(a), Self::Extracted(b)) => a.equivalent(b),
            _ => false,
        }
    }
}

impl fmt::Display for SimpleLicense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// `<license>+`: the stated version or any later one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OrLaterOperator {
    license: SimpleLicense,
}

impl OrLaterOperator {
    /// Wrap `license` in an or-later operator.
    #[must_use]
    pub fn new(license: SimpleLicense) -> Self {
        Self { license }
    }

    /// The decorated license.
    #[must_use]
    pub fn license(&self) -> &SimpleLicense {
        &self.license
    }

    /// Equivalence of the decorated licenses.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.license.equivalent(&other.license)
    }
}

impl fmt::Display for OrLaterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+", self.license)
    }
}

/// Left operand of `WITH`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "subject", rename_all = "snake_case"))]
pub enum ExceptionSubject {
    /// A plain listed or extracted license.
    Simple(SimpleLicense),
    /// An or-later license.
    OrLater(OrLaterOperator),
}

impl ExceptionSubject {
    /// The underlying simple license.
    #[must_use]
    pub fn simple_license(&self) -> &SimpleLicense {
        match self {
            Self::Simple(license) => license,
            Self::OrLater(op) => op.license(),
        }
    }

    /// Equivalence that requires the same shape on both sides.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Simple(a), Self::Simple(b)) => a.equivalent(b),
            (Self::OrLater(a), Self::OrLater(b)) => a.equivalent(b),
            _ => false,
        }
    }
}

impl fmt::Display for ExceptionSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(license) => license.fmt(f),
            Self::OrLater(op) => op.fmt(f),
        }
    }
}

/// `<license> WITH <exception>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WithExceptionOperator {
    license: ExceptionSubject,
    exception: LicenseException,
}

impl WithExceptionOperator {
    /// Pair `license` with `exception`.
    #[must_use]
    pub fn new(license: ExceptionSubject, exception: LicenseException) -> Self {
        Self { license, exception }
    }

    /// The license the exception applies to.
    #[must_use]
    pub fn license(&self) -> &ExceptionSubject {
        &self.license
    }

    /// The exception.
    #[must_use]
    pub fn exception(&self) -> &LicenseException {
        &self.exception
    }

    /// Equivalent licenses with equivalent exceptions.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.license.equivalent(&other.license) && self.exception.equivalent(&other.exception)
    }
}

impl fmt::Display for WithExceptionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} WITH {}", self.license, self.exception)
    }
}
