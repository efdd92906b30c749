//! The SPDX license list as a [`spdx_expression::LicenseRegistry`].
//!
//! [`LicenseList`] answers "is this id on the license list?" for the
//! expression parser. Its data comes from a [`CatalogSource`]: the snapshot
//! bundled with this crate, a directory mirror of the published
//! `licenses.json` and `exceptions.json`, or any in-memory [`Catalog`].
//!
//! ```
//! use spdx_expression::parse;
//! use spdx_expression::test_support::MemoryDocument;
//! use spdx_license_list::LicenseList;
//!
//! let list = LicenseList::bundled();
//! let document = MemoryDocument::default();
//! let expr = parse("mit OR apache-2.0", &list, &document)?;
//! assert_eq!(expr.to_string(), "(MIT OR Apache-2.0)");
//! # Ok::<(), spdx_expression::LicenseParseError>(())
//! ```

mod catalog;
mod config;
mod errors;
mod list;
mod sources;

pub use catalog::{Catalog, EXCEPTIONS_FILE, ExceptionRecord, LICENSES_FILE, LicenseRecord};
pub use config::{LICENSE_LIST_DIR_VAR, LicenseListConfig, ONLY_LOCAL_VAR, parse_env_bool};
pub use errors::CatalogError;
pub use list::LicenseList;
pub use sources::{BundledCatalog, CatalogSource, DirectoryCatalog, FallbackCatalog};
