//! Where a license list comes from.
//!
//! The registry only ever talks to a [`CatalogSource`]. Three are provided:
//! the snapshot compiled into this crate, a directory holding a mirror of the
//! published JSON files, and a fallback pair that tries one source and then
//! the other. A [`Catalog`] value is itself a source, which keeps tests free
//! of files.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use rust_embed::RustEmbed;

use crate::catalog::{Catalog, EXCEPTIONS_FILE, LICENSES_FILE};
use crate::errors::CatalogError;

/// Produces a complete [`Catalog`] on demand.
pub trait CatalogSource: Send + Sync {
    /// Load the whole license list.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the list cannot be read or parsed.
    fn load(&self) -> Result<Catalog, CatalogError>;

    /// Short human readable description for log messages.
    fn describe(&self) -> String;
}

impl CatalogSource for Catalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!(
            "in-memory catalog (version {})",
            self.version().unwrap_or("unknown")
        )
    }
}

impl<S: CatalogSource + ?Sized> CatalogSource for Box<S> {
    fn load(&self) -> Result<Catalog, CatalogError> {
        (**self).load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[derive(RustEmbed)]
#[folder = "data"]
struct BundledData;

/// The license list snapshot compiled into this crate.
///
/// # Examples
/// ```
/// use spdx_license_list::{BundledCatalog, CatalogSource};
/// let catalog = BundledCatalog.load()?;
/// assert!(catalog.licenses().iter().any(|record| record.license_id == "MIT"));
/// # Ok::<(), spdx_license_list::CatalogError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledCatalog;

impl BundledCatalog {
    fn file(name: &'static str) -> Result<String, CatalogError> {
        let file = BundledData::get(name).ok_or(CatalogError::MissingBundledFile { file: name })?;
        String::from_utf8(file.data.into_owned()).map_err(|_| CatalogError::NotUtf8 {
            location: "bundled snapshot".to_owned(),
            file: name,
        })
    }
}

impl CatalogSource for BundledCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        Catalog::from_json(&Self::file(LICENSES_FILE)?, &Self::file(EXCEPTIONS_FILE)?)
    }

    fn describe(&self) -> String {
        "bundled license list snapshot".to_owned()
    }
}

/// A directory containing `licenses.json` and `exceptions.json`, laid out
/// like the `json/` folder of the published license list data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryCatalog {
    root: Utf8PathBuf,
}

impl DirectoryCatalog {
    /// Read the catalog from `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the catalog is read from.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn read(&self, dir: &Dir, file: &'static str) -> Result<String, CatalogError> {
        dir.read_to_string(file).map_err(|source| self.io_error(file, source))
    }

    fn io_error(&self, file: &'static str, source: std::io::Error) -> CatalogError {
        CatalogError::Io {
            location: self.root.to_string(),
            file,
            source,
        }
    }
}

impl CatalogSource for DirectoryCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        let dir = Dir::open_ambient_dir(&self.root, ambient_authority())
            .map_err(|source| self.io_error(LICENSES_FILE, source))?;
        let licenses = self.read(&dir, LICENSES_FILE)?;
        let exceptions = self.read(&dir, EXCEPTIONS_FILE)?;
        log::debug!("read license list files from {}", self.root);
        Catalog::from_json(&licenses, &exceptions)
    }

    fn describe(&self) -> String {
        format!("license list directory {}", self.root)
    }
}

/// Tries `primary` first and falls back to `fallback` when it fails.
pub struct FallbackCatalog {
    primary: Box<dyn CatalogSource>,
    fallback: Box<dyn CatalogSource>,
}

impl FallbackCatalog {
    /// Combine two sources.
    #[must_use]
    pub fn new(
        primary: impl CatalogSource + 'static,
        fallback: impl CatalogSource + 'static,
    ) -> Self {
        Self {
            primary: Box::new(primary),
            fallback: Box::new(fallback),
        }
    }
}

impl std::fmt::Debug for FallbackCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackCatalog")
            .field("primary", &self.primary.describe())
            .field("fallback", &self.fallback.describe())
            .finish()
    }
}

impl CatalogSource for FallbackCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        self.primary.load().or_else(|err| {
            log::warn!(
                "unable to load {}: {err}; using {}",
                self.primary.describe(),
                self.fallback.describe()
            );
            self.fallback.load()
        })
    }

    fn describe(&self) -> String {
        format!(
            "{} with fallback to {}",
            self.primary.describe(),
            self.fallback.describe()
        )
    }
}
