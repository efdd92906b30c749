//! The license list in its published JSON shape.
//!
//! SPDX publishes the list as two documents, `licenses.json` and
//! `exceptions.json`. Only the fields the registry needs are read; everything
//! else in the files is ignored so newer list releases keep loading.

use serde::Deserialize;
use spdx_expression::{LicenseException, ListedLicense};

use crate::errors::CatalogError;

/// File name of the license table.
pub const LICENSES_FILE: &str = "licenses.json";
/// File name of the exception table.
pub const EXCEPTIONS_FILE: &str = "exceptions.json";

/// One entry of `licenses.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseRecord {
    /// Short identifier, e.g. `Apache-2.0`.
    pub license_id: String,
    /// Full name.
    #[serde(default)]
    pub name: Option<String>,
    /// Approved by the Open Source Initiative.
    #[serde(default)]
    pub is_osi_approved: bool,
    /// Kept on the list for compatibility only.
    #[serde(default)]
    pub is_deprecated_license_id: bool,
    /// Reference URLs.
    #[serde(default)]
    pub see_also: Vec<String>,
}

impl LicenseRecord {
    /// A record carrying only its id.
    #[must_use]
    pub fn new(license_id: impl Into<String>) -> Self {
        Self {
            license_id: license_id.into(),
            name: None,
            is_osi_approved: false,
            is_deprecated_license_id: false,
            see_also: Vec::new(),
        }
    }

    fn to_listed(&self) -> ListedLicense {
        let mut license = ListedLicense::new(&self.license_id)
            .with_see_also(self.see_also.clone())
            .with_osi_approved(self.is_osi_approved)
            .with_deprecated(self.is_deprecated_license_id);
        if let Some(name) = &self.name {
            license = license.with_name(name);
        }
        license
    }
}

/// One entry of `exceptions.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionRecord {
    /// Short identifier, e.g. `Classpath-exception-2.0`.
    pub license_exception_id: String,
    /// Full name.
    #[serde(default)]
    pub name: Option<String>,
    /// Kept on the list for compatibility only.
    #[serde(default)]
    pub is_deprecated_license_id: bool,
    /// Reference URLs.
    #[serde(default)]
    pub see_also: Vec<String>,
}

impl ExceptionRecord {
    /// A record carrying only its id.
    #[must_use]
    pub fn new(license_exception_id: impl Into<String>) -> Self {
        Self {
            license_exception_id: license_exception_id.into(),
            name: None,
            is_deprecated_license_id: false,
            see_also: Vec::new(),
        }
    }

    fn to_exception(&self) -> LicenseException {
        let mut exception = LicenseException::listed(&self.license_exception_id)
            .with_see_also(self.see_also.clone())
            .with_deprecated(self.is_deprecated_license_id);
        if let Some(name) = &self.name {
            exception = exception.with_name(name);
        }
        exception
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LicensesFile {
    #[serde(default)]
    license_list_version: Option<String>,
    licenses: Vec<LicenseRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExceptionsFile {
    #[serde(default)]
    license_list_version: Option<String>,
    exceptions: Vec<ExceptionRecord>,
}

/// A complete license list: licenses, exceptions and the list version.
///
/// # Examples
/// ```
/// use spdx_license_list::{Catalog, LicenseRecord};
/// let catalog = Catalog::default()
///     .with_version("3.25")
///     .with_license(LicenseRecord::new("MIT"));
/// assert_eq!(catalog.licenses().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    version: Option<String>,
    licenses: Vec<LicenseRecord>,
    exceptions: Vec<ExceptionRecord>,
}

impl Catalog {
    /// Parse the two published JSON documents.
    ///
    /// The version is taken from `licenses.json`; a different version in
    /// `exceptions.json` is logged and otherwise ignored.
    ///
    /// # Errors
    /// Returns [`CatalogError::Json`] naming the file that failed to parse.
    pub fn from_json(licenses: &str, exceptions: &str) -> Result<Self, CatalogError> {
        let licenses: LicensesFile =
            serde_json::from_str(licenses).map_err(|source| CatalogError::Json {
                file: LICENSES_FILE,
                source,
            })?;
        let exceptions: ExceptionsFile =
            serde_json::from_str(exceptions).map_err(|source| CatalogError::Json {
                file: EXCEPTIONS_FILE,
                source,
            })?;
        if exceptions.license_list_version.is_some()
            && exceptions.license_list_version != licenses.license_list_version
        {
            log::warn!(
                "license list version mismatch: licenses {:?}, exceptions {:?}",
                licenses.license_list_version,
                exceptions.license_list_version
            );
        }
        Ok(Self {
            version: licenses.license_list_version,
            licenses: licenses.licenses,
            exceptions: exceptions.exceptions,
        })
    }

    /// Set the list version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add a license record.
    #[must_use]
    pub fn with_license(mut self, record: LicenseRecord) -> Self {
        self.licenses.push(record);
        self
    }

    /// Add an exception record.
    #[must_use]
    pub fn with_exception(mut self, record: ExceptionRecord) -> Self {
        self.exceptions.push(record);
        self
    }

    /// License list version, e.g. `3.25`.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// License records in file order.
    #[must_use]
    pub fn licenses(&self) -> &[LicenseRecord] {
        &self.licenses
    }

    /// Exception records in file order.
    #[must_use]
    pub fn exceptions(&self) -> &[ExceptionRecord] {
        &self.exceptions
    }

    pub(crate) fn listed_licenses(&self) -> impl Iterator<Item = ListedLicense> + '_ {
        self.licenses.iter().map(LicenseRecord::to_listed)
    }

    pub(crate) fn listed_exceptions(&self) -> impl Iterator<Item = LicenseException> + '_ {
        self.exceptions.iter().map(ExceptionRecord::to_exception)
    }
}
