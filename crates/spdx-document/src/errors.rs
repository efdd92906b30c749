//! Errors raised by documents and their stores.

use camino::Utf8PathBuf;
use spdx_expression::{ExtractedLicenseError, LicenseParseError};
use thiserror::Error;

/// Failures while opening, reading or updating a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The namespace is not an absolute URI usable as a document namespace.
    #[error("invalid document namespace `{namespace}`: {reason}")]
    InvalidNamespace {
        /// Rejected namespace.
        namespace: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// The store file could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        /// File being accessed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The store is not valid JSON in the expected shape.
    #[error("malformed document store: {0}")]
    Json(#[from] serde_json::Error),
    /// A property holds a list where a single string was expected, or the
    /// reverse.
    #[error("property `{property}` of `{subject}` has the wrong shape")]
    PropertyShape {
        /// Subject holding the property.
        subject: String,
        /// Property name.
        property: String,
    },
    /// An extracted license was rejected.
    #[error(transparent)]
    Extracted(#[from] ExtractedLicenseError),
    /// A stored license expression failed to parse.
    #[error("failed to parse stored license expression: {0}")]
    Parse(#[from] LicenseParseError),
}
