//! The document side of SPDX license expressions.
//!
//! An [`SpdxDocument`] owns the extracted licenses (`LicenseRef-` ids) its
//! expressions mention, mints fresh `LicenseRef-N` and `SPDXRef-N` ids that
//! never collide with ids already present, and stores license-valued
//! properties as canonical expression strings in a [`DocumentStore`].
//!
//! ```
//! use spdx_document::{DocumentNamespace, SpdxDocument};
//! use spdx_license_list::LicenseList;
//!
//! let document = SpdxDocument::new(DocumentNamespace::new("https://example.com/spdx/demo")?);
//! let registry = LicenseList::bundled();
//! let expr = document.parse_license("mit OR LicenseRef-inhouse", &registry)?;
//! document.set_license_property("SPDXRef-1", "licenseConcluded", &expr)?;
//! assert_eq!(expr.to_string(), "(MIT OR LicenseRef-inhouse)");
//! assert_eq!(document.extracted_licenses().len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod document;
mod errors;
mod namespace;
mod store;

pub use document::{
    COMMENT_PROPERTY, ELEMENT_REF_PREFIX, EXTRACTED_LICENSING_INFO, EXTRACTED_TEXT_PROPERTY,
    LICENSE_ID_PROPERTY, NAME_PROPERTY, SEE_ALSO_PROPERTY, SpdxDocument, TYPE_PROPERTY,
};
pub use errors::DocumentError;
pub use namespace::DocumentNamespace;
pub use store::{DocumentStore, MemoryStore, PropertyValue};
