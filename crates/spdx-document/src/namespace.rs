//! Document namespaces.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::DocumentError;

static SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:[^:]")
        .unwrap_or_else(|e| panic!("namespace scheme pattern must compile: {e}"))
});

/// The absolute URI that scopes every identifier in a document.
///
/// # Examples
/// ```
/// use spdx_document::DocumentNamespace;
/// let ns = DocumentNamespace::new("https://example.com/spdx/acme-1.0")?;
/// assert_eq!(ns.as_str(), "https://example.com/spdx/acme-1.0");
/// assert!(DocumentNamespace::new("https://example.com/doc#frag").is_err());
/// # Ok::<(), spdx_document::DocumentError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentNamespace(String);

impl DocumentNamespace {
    /// Validate `namespace`.
    ///
    /// # Errors
    /// Returns [`DocumentError::InvalidNamespace`] when the value is empty,
    /// lacks a URI scheme, contains whitespace or contains a `#`.
    pub fn new(namespace: impl Into<String>) -> Result<Self, DocumentError> {
        let namespace = namespace.into();
        let reason = if namespace.is_empty() {
            Some("namespace is empty")
        } else if namespace.chars().any(char::is_whitespace) {
            Some("namespace contains whitespace")
        } else if namespace.contains('#') {
            Some("namespace must not contain '#'")
        } else if !SCHEME.is_match(&namespace) {
            Some("namespace must be an absolute URI with a scheme")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(DocumentError::InvalidNamespace { namespace, reason });
        }
        Ok(Self(namespace))
    }

    /// The namespace URI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute URI of `id` within this document.
    #[must_use]
    pub fn qualify(&self, id: &str) -> String {
        format!("{}#{id}", self.0)
    }
}

impl fmt::Display for DocumentNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
