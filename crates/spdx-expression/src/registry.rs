//! Collaborator contracts consumed by the parser.
//!
//! The parser needs two things from its surroundings: a view of the SPDX
//! license list ([`LicenseRegistry`]) and the document the expression belongs
//! to ([`ExtractedLicenseScope`]), which owns `LicenseRef-` identifiers that
//! are not on the list. Both take `&self`; implementations are expected to
//! guard their state internally so one registry can serve many documents and
//! threads.

use crate::errors::{ExtractedLicenseError, RegistryError};
use crate::license::{ExtractedLicenseInfo, LicenseException, ListedLicense};

/// Answers "is this a listed id?" and resolves listed ids to canonical nodes.
pub trait LicenseRegistry {
    /// Whether `id` names a license on the license list.
    fn is_listed_license_id(&self, id: &str) -> bool;

    /// Resolve a listed license id.
    ///
    /// # Errors
    /// Returns [`RegistryError::MissingListedLicense`] when the id is not
    /// listed or the index is inconsistent.
    fn resolve_listed_license(&self, id: &str) -> Result<ListedLicense, RegistryError>;

    /// Whether `id` names an exception on the exception list.
    fn is_listed_exception_id(&self, id: &str) -> bool;

    /// Resolve a listed exception id.
    ///
    /// # Errors
    /// Returns [`RegistryError::MissingListedException`] when the id is not
    /// listed or the index is inconsistent.
    fn resolve_listed_exception(&self, id: &str) -> Result<LicenseException, RegistryError>;
}

/// Document-scoped ownership of extracted license references.
pub trait ExtractedLicenseScope {
    /// Return the extracted license registered under `id`, creating an empty
    /// one if the document has none.
    ///
    /// Calling this twice with the same id yields equal nodes and does not
    /// advance the id counter.
    ///
    /// # Errors
    /// Implementations may refuse ids they cannot store.
    fn get_or_create_extracted_license(
        &self,
        id: &str,
    ) -> Result<ExtractedLicenseInfo, ExtractedLicenseError>;

    /// Mint an unused `LicenseRef-N` identifier.
    fn next_free_extracted_license_id(&self) -> String;

    /// Mint an unused `SPDXRef-N` element identifier.
    fn next_free_element_id(&self) -> String;
}

impl<T: LicenseRegistry + ?Sized> LicenseRegistry for &T {
    fn is_listed_license_id(&self, id: &str) -> bool {
        (**self).is_listed_license_id(id)
    }

    fn resolve_listed_license(&self, id: &str) -> Result<ListedLicense, RegistryError> {
        (**self).resolve_listed_license(id)
    }

    fn is_listed_exception_id(&self, id: &str) -> bool {
        (**self).is_listed_exception_id(id)
    }

    fn resolve_listed_exception(&self, id: &str) -> Result<LicenseException, RegistryError> {
        (**self).resolve_listed_exception(id)
    }
}

impl<T: ExtractedLicenseScope + ?Sized> ExtractedLicenseScope for &T {
    fn get_or_create_extracted_license(
        &self,
        id: &str,
    ) -> Result<ExtractedLicenseInfo, ExtractedLicenseError> {
        (**self).get_or_create_extracted_license(id)
    }

    fn next_free_extracted_license_id(&self) -> String {
        (**self).next_free_extracted_license_id()
    }

    fn next_free_element_id(&self) -> String {
        (**self).next_free_element_id()
    }
}
