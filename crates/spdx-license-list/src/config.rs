//! License list configuration read from environment variables.
//!
//! - `SPDX_LICENSE_LIST_DIR`: a directory mirror of the published JSON files,
//!   tried before the bundled snapshot.
//! - `SPDX_ONLY_USE_LOCAL_LICENSES`: when truthy, only the bundled snapshot
//!   is used and any directory setting is ignored.
//!
//! Parsing goes through a lookup function so callers and tests can supply
//! values without touching the process environment.

use camino::Utf8PathBuf;

use crate::sources::{BundledCatalog, CatalogSource, DirectoryCatalog, FallbackCatalog};

/// Variable naming a directory mirror of the license list.
pub const LICENSE_LIST_DIR_VAR: &str = "SPDX_LICENSE_LIST_DIR";
/// Variable restricting the registry to the bundled snapshot.
pub const ONLY_LOCAL_VAR: &str = "SPDX_ONLY_USE_LOCAL_LICENSES";

/// Interpret common spellings of a boolean flag.
///
/// # Examples
/// ```
/// use spdx_license_list::parse_env_bool;
/// assert_eq!(parse_env_bool(" yes "), Some(true));
/// assert_eq!(parse_env_bool("Off"), Some(false));
/// assert_eq!(parse_env_bool("maybe"), None);
/// ```
#[must_use]
pub fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "Yes" | "on" | "ON" | "On" => Some(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "No" | "off" | "OFF" | "Off" => {
            Some(false)
        }
        _ => None,
    }
}

/// Which catalog the registry reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseListConfig {
    /// Directory mirror tried before the bundled snapshot.
    pub license_dir: Option<Utf8PathBuf>,
    /// Use the bundled snapshot only.
    pub only_local: bool,
}

impl LicenseListConfig {
    /// Read the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// Unrecognised boolean values are logged and treated as unset.
    ///
    /// # Examples
    /// ```
    /// use spdx_license_list::LicenseListConfig;
    /// let config = LicenseListConfig::from_lookup(|key| {
    ///     (key == "SPDX_LICENSE_LIST_DIR").then(|| "/srv/spdx/json".to_owned())
    /// });
    /// assert_eq!(config.license_dir.as_deref().map(|dir| dir.as_str()), Some("/srv/spdx/json"));
    /// assert!(!config.only_local);
    /// ```
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let license_dir = lookup(LICENSE_LIST_DIR_VAR)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .map(Utf8PathBuf::from);
        let only_local = lookup(ONLY_LOCAL_VAR).is_some_and(|value| {
            parse_env_bool(&value).unwrap_or_else(|| {
                log::warn!("ignoring {ONLY_LOCAL_VAR}={value:?}: expected a boolean");
                false
            })
        });
        Self {
            license_dir,
            only_local,
        }
    }

    /// Apply optional overrides, typically from command-line flags, on top of
    /// environment-derived values.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        license_dir: Option<Utf8PathBuf>,
        only_local: Option<bool>,
    ) -> Self {
        if let Some(dir) = license_dir {
            self.license_dir = Some(dir);
        }
        if let Some(flag) = only_local {
            self.only_local = flag;
        }
        self
    }

    /// The catalog source this configuration selects.
    #[must_use]
    pub fn source(&self) -> Box<dyn CatalogSource> {
        match (&self.license_dir, self.only_local) {
            (Some(dir), false) => Box::new(FallbackCatalog::new(
                DirectoryCatalog::new(dir.clone()),
                BundledCatalog,
            )),
            (Some(dir), true) => {
                log::debug!("{ONLY_LOCAL_VAR} is set; ignoring license directory {dir}");
                Box::new(BundledCatalog)
            }
            (None, _) => Box::new(BundledCatalog),
        }
    }
}
