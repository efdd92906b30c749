//! License text found in analysed material but absent from the license list.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::text::optional_text_equivalent;

/// Prefix of document-local license references.
pub const LICENSE_REF_PREFIX: &str = "LicenseRef";

/// A document-local license, referenced as `LicenseRef-<idstring>`.
///
/// Equality compares ids only. [`ExtractedLicenseInfo::equivalent`] ignores
/// the id and compares normalised text instead, which is what deduplication
/// wants.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExtractedLicenseInfo {
    id: String,
    text: Option<String>,
    name: Option<String>,
    comment: Option<String>,
    see_also: Vec<String>,
}

impl ExtractedLicenseInfo {
    /// Reference `id` without any text yet.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: None,
            name: None,
            comment: None,
            see_also: Vec::new(),
        }
    }

    /// Reference `id` with its extracted text.
    #[must_use]
    pub fn with_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(id)
        }
    }

    /// Attach a human readable name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a comment.
    #[must_use]
    pub fn commented(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attach reference URLs.
    #[must_use]
    pub fn with_see_also(mut self, see_also: Vec<String>) -> Self {
        self.see_also = see_also;
        self
    }

    /// Document-local identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Extracted license text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Human readable name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Free-form comment.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Reference URLs.
    #[must_use]
    pub fn see_also(&self) -> &[String] {
        &self.see_also
    }

    /// Same license text, whitespace and line endings aside. Ids are ignored.
    ///
    /// # Examples
    /// ```
    /// use spdx_expression::ExtractedLicenseInfo;
    /// let a = ExtractedLicenseInfo::with_text("LicenseRef-1", "Use freely.\r\n");
    /// let b = ExtractedLicenseInfo::with_text("LicenseRef-2", "Use  freely.");
    /// assert!(a.equivalent(&b));
    /// assert_ne!(a, b);
    /// ```
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        optional_text_equivalent(self.text(), other.text())
    }
}

impl PartialEq for ExtractedLicenseInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ExtractedLicenseInfo {}

impl Hash for ExtractedLicenseInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ExtractedLicenseInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
