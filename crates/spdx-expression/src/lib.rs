//! SPDX license expressions: tokenizer, parser and typed AST.
//!
//! [`parse`] turns an expression such as
//! `(MIT OR Apache-2.0) AND GPL-2.0+ WITH Autoconf-exception-2.0` into an
//! [`AnyLicenseInfo`] tree, consulting a [`LicenseRegistry`] for listed ids
//! and an [`ExtractedLicenseScope`] for document-local `LicenseRef-` ids. The
//! tree renders back to a canonical string with `Display`.
//!
//! Registry and document implementations live in the `spdx-license-list` and
//! `spdx-document` crates; this crate only defines the contracts.

mod allocator;
mod errors;
mod license;
mod parser;
mod registry;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
mod tokenizer;

pub use allocator::ReferenceIdAllocator;
pub use errors::{ExtractedLicenseError, LicenseParseError, RegistryError};
pub use license::{
    AnyLicenseInfo, ExceptionSubject, ExtractedLicenseInfo, LICENSE_REF_PREFIX, LicenseException,
    LicenseSet, ListedLicense, NOASSERTION_KEYWORD, NONE_KEYWORD, OrLaterOperator, SetKind,
    SimpleLicense, WithExceptionOperator, is_valid_license_ref, license_text_equivalent,
    normalize_license_text,
};
pub use parser::{MAX_NESTING_DEPTH, parse};
pub use registry::{ExtractedLicenseScope, LicenseRegistry};
pub use tokenizer::tokenize;
