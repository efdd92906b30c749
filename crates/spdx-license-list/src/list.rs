//! The license list registry.
//!
//! [`LicenseList`] is populated lazily from its [`CatalogSource`] on the
//! first lookup. That load runs under the write lock, so concurrent first
//! lookups share a single load. `reload` builds the index outside the lock
//! and swaps it in whole, so readers see either the previous index or the
//! new one, never a partial table. `reset` drops the index; the next lookup
//! repopulates it.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use spdx_expression::{LicenseException, LicenseRegistry, ListedLicense, RegistryError};

use crate::config::LicenseListConfig;
use crate::sources::{BundledCatalog, CatalogSource};

/// Listed licenses and exceptions keyed by lower-cased id.
#[derive(Debug, Default)]
struct LicenseIndex {
    version: Option<String>,
    licenses: HashMap<String, Arc<ListedLicense>>,
    exceptions: HashMap<String, Arc<LicenseException>>,
}

impl LicenseIndex {
    fn load(source: &dyn CatalogSource) -> Self {
        match source.load() {
            Ok(catalog) => {
                let index = Self {
                    version: catalog.version().map(str::to_owned),
                    licenses: catalog
                        .listed_licenses()
                        .map(|license| (license.id().to_ascii_lowercase(), Arc::new(license)))
                        .collect(),
                    exceptions: catalog
                        .listed_exceptions()
                        .map(|exception| (exception.id().to_ascii_lowercase(), Arc::new(exception)))
                        .collect(),
                };
                log::debug!(
                    "indexed {} licenses and {} exceptions from {} (version {})",
                    index.licenses.len(),
                    index.exceptions.len(),
                    source.describe(),
                    index.version.as_deref().unwrap_or("unknown")
                );
                index
            }
            Err(err) => {
                log::error!(
                    "unable to load the license list from {}: {err}; no ids will be treated as listed",
                    source.describe()
                );
                Self::default()
            }
        }
    }

    fn sorted_ids<T>(table: &HashMap<String, Arc<T>>, id: impl Fn(&T) -> &str) -> Vec<String> {
        let mut ids: Vec<String> = table.values().map(|entry| id(&**entry).to_owned()).collect();
        ids.sort_unstable_by_key(|id| id.to_ascii_lowercase());
        ids
    }
}

static SHARED: LazyLock<LicenseList> =
    LazyLock::new(|| LicenseList::from_config(&LicenseListConfig::from_env()));

/// A [`LicenseRegistry`] backed by a license list catalog.
///
/// Lookups ignore ASCII case and return values carrying the canonical id.
///
/// # Examples
/// ```
/// use spdx_expression::LicenseRegistry;
/// use spdx_license_list::LicenseList;
///
/// let list = LicenseList::bundled();
/// assert!(list.is_listed_license_id("apache-2.0"));
/// let license = list.resolve_listed_license("apache-2.0")?;
/// assert_eq!(license.id(), "Apache-2.0");
/// # Ok::<(), spdx_expression::RegistryError>(())
/// ```
pub struct LicenseList {
    source: Box<dyn CatalogSource>,
    index: RwLock<Option<Arc<LicenseIndex>>>,
}

impl std::fmt::Debug for LicenseList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LicenseList")
            .field("source", &self.source.describe())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl LicenseList {
    /// A registry reading from `source` on first use.
    #[must_use]
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            index: RwLock::new(None),
        }
    }

    /// A registry over the snapshot compiled into this crate.
    #[must_use]
    pub fn bundled() -> Self {
        Self::new(BundledCatalog)
    }

    /// A registry over the source selected by `config`.
    #[must_use]
    pub fn from_config(config: &LicenseListConfig) -> Self {
        Self::new(config.source())
    }

    /// The process-wide registry, configured from the environment on first
    /// use.
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Whether the index has been populated.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Drop the index. The next lookup loads the catalog again.
    pub fn reset(&self) {
        *self.index.write().unwrap_or_else(PoisonError::into_inner) = None;
        log::debug!("license list index reset");
    }

    /// Load the catalog now and replace the current index with it.
    pub fn reload(&self) {
        let fresh = Arc::new(LicenseIndex::load(self.source.as_ref()));
        *self.index.write().unwrap_or_else(PoisonError::into_inner) = Some(fresh);
    }

    /// License list version, when the catalog declares one.
    #[must_use]
    pub fn version(&self) -> Option<String> {
        self.index().version.clone()
    }

    /// Every listed license id, sorted case-insensitively.
    #[must_use]
    pub fn license_ids(&self) -> Vec<String> {
        LicenseIndex::sorted_ids(&self.index().licenses, ListedLicense::id)
    }

    /// Every listed exception id, sorted case-insensitively.
    #[must_use]
    pub fn exception_ids(&self) -> Vec<String> {
        LicenseIndex::sorted_ids(&self.index().exceptions, LicenseException::id)
    }

    /// The listed license with `id`, if any.
    #[must_use]
    pub fn license(&self, id: &str) -> Option<Arc<ListedLicense>> {
        self.index().licenses.get(&id.to_ascii_lowercase()).cloned()
    }

    /// The listed exception with `id`, if any.
    #[must_use]
    pub fn exception(&self, id: &str) -> Option<Arc<LicenseException>> {
        self.index().exceptions.get(&id.to_ascii_lowercase()).cloned()
    }

    fn index(&self) -> Arc<LicenseIndex> {
        if let Some(index) = self
            .index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Arc::clone(index);
        }

        let mut slot = self.index.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have populated the index while this one waited.
        if let Some(index) = slot.as_ref() {
            return Arc::clone(index);
        }
        let fresh = Arc::new(LicenseIndex::load(self.source.as_ref()));
        *slot = Some(Arc::clone(&fresh));
        fresh
    }
}

impl LicenseRegistry for LicenseList {
    fn is_listed_license_id(&self, id: &str) -> bool {
        self.license(id).is_some()
    }

    fn resolve_listed_license(&self, id: &str) -> Result<ListedLicense, RegistryError> {
        self.license(id)
            .map(|license| ListedLicense::clone(&license))
            .ok_or_else(|| RegistryError::MissingListedLicense { id: id.to_owned() })
    }

    fn is_listed_exception_id(&self, id: &str) -> bool {
        self.exception(id).is_some()
    }

    fn resolve_listed_exception(&self, id: &str) -> Result<LicenseException, RegistryError> {
        self.exception(id)
            .map(|exception| LicenseException::clone(&exception))
            .ok_or_else(|| RegistryError::MissingListedException { id: id.to_owned() })
    }
}
