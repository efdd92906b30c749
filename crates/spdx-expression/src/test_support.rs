//! In-memory collaborators for tests.
//!
//! [`MemoryRegistry`] stands in for the license list and [`MemoryDocument`]
//! for a document's extracted-license table, so parser behaviour can be
//! exercised without loading a catalog.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::allocator::ReferenceIdAllocator;
use crate::errors::{ExtractedLicenseError, RegistryError};
use crate::license::{ExtractedLicenseInfo, LICENSE_REF_PREFIX, LicenseException, ListedLicense};
use crate::registry::{ExtractedLicenseScope, LicenseRegistry};

/// A license list held in memory. Lookups ignore ASCII case.
#[derive(Debug, Default, Clone)]
pub struct MemoryRegistry {
    licenses: HashMap<String, ListedLicense>,
    exceptions: HashMap<String, LicenseException>,
    phantom_licenses: Vec<String>,
}

impl MemoryRegistry {
    /// A registry listing the given license ids.
    #[must_use]
    pub fn with_licenses<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ids.into_iter()
            .fold(Self::default(), |registry, id| {
                registry.with_license(ListedLicense::new(id))
            })
    }

    /// Add listed exceptions by id.
    #[must_use]
    pub fn with_exceptions<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ids.into_iter().fold(self, |registry, id| {
            registry.with_exception(LicenseException::listed(id))
        })
    }

    /// Add a fully described listed license.
    #[must_use]
    pub fn with_license(mut self, license: ListedLicense) -> Self {
        self.licenses
            .insert(license.id().to_ascii_lowercase(), license);
        self
    }

    /// Add a fully described exception.
    #[must_use]
    pub fn with_exception(mut self, exception: LicenseException) -> Self {
        self.exceptions
            .insert(exception.id().to_ascii_lowercase(), exception);
        self
    }

    /// Claim `id` is listed without being able to resolve it.
    #[must_use]
    pub fn with_phantom_license(mut self, id: impl Into<String>) -> Self {
        self.phantom_licenses.push(id.into());
        self
    }
}

impl LicenseRegistry for MemoryRegistry {
    fn is_listed_license_id(&self, id: &str) -> bool {
        self.licenses.contains_key(&id.to_ascii_lowercase())
            || self.phantom_licenses.iter().any(|p| p.eq_ignore_ascii_case(id))
    }

    fn resolve_listed_license(&self, id: &str) -> Result<ListedLicense, RegistryError> {
        self.licenses
            .get(&id.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| RegistryError::MissingListedLicense { id: id.to_owned() })
    }

    fn is_listed_exception_id(&self, id: &str) -> bool {
        self.exceptions.contains_key(&id.to_ascii_lowercase())
    }

    fn resolve_listed_exception(&self, id: &str) -> Result<LicenseException, RegistryError> {
        self.exceptions
            .get(&id.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| RegistryError::MissingListedException { id: id.to_owned() })
    }
}

/// A document holding only extracted licenses and id allocators.
#[derive(Debug)]
pub struct MemoryDocument {
    extracted: Mutex<HashMap<String, ExtractedLicenseInfo>>,
    license_refs: ReferenceIdAllocator,
    element_refs: ReferenceIdAllocator,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self {
            extracted: Mutex::new(HashMap::new()),
            license_refs: ReferenceIdAllocator::new(LICENSE_REF_PREFIX),
            element_refs: ReferenceIdAllocator::new("SPDXRef"),
        }
    }
}

impl MemoryDocument {
    /// Pre-register an extracted license.
    #[must_use]
    pub fn with_extracted(self, license: ExtractedLicenseInfo) -> Self {
        self.license_refs.observe(license.id());
        self.extracted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(license.id().to_owned(), license);
        self
    }

    /// Number of extracted licenses known to the document.
    #[must_use]
    pub fn extracted_count(&self) -> usize {
        self.extracted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl ExtractedLicenseScope for MemoryDocument {
    fn get_or_create_extracted_license(
        &self,
        id: &str,
    ) -> Result<ExtractedLicenseInfo, ExtractedLicenseError> {
        let mut extracted = self.extracted.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = extracted.get(id) {
            return Ok(existing.clone());
        }
        self.license_refs.observe(id);
        let license = ExtractedLicenseInfo::new(id);
        extracted.insert(id.to_owned(), license.clone());
        Ok(license)
    }

    fn next_free_extracted_license_id(&self) -> String {
        self.license_refs.allocate()
    }

    fn next_free_element_id(&self) -> String {
        self.element_refs.allocate()
    }
}
