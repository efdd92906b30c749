//! Errors raised while loading a license list catalog.

use std::io;

use thiserror::Error;

/// Failure to produce a [`crate::Catalog`] from one of its sources.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A catalog file could not be read from disk.
    #[error("failed to read {file} from {location}: {source}")]
    Io {
        /// Directory the file was expected in.
        location: String,
        /// Catalog file name.
        file: &'static str,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The embedded snapshot does not contain the requested file.
    #[error("bundled license list snapshot is missing {file}")]
    MissingBundledFile {
        /// Catalog file name.
        file: &'static str,
    },
    /// A catalog file is not valid UTF-8.
    #[error("{file} from {location} is not valid UTF-8")]
    NotUtf8 {
        /// Where the file came from.
        location: String,
        /// Catalog file name.
        file: &'static str,
    },
    /// A catalog file is not in the SPDX license list JSON format.
    #[error("failed to parse {file}: {source}")]
    Json {
        /// Catalog file name.
        file: &'static str,
        /// Deserialisation error.
        source: serde_json::Error,
    },
}
