//! Licenses on the canonical SPDX license list.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A license on the SPDX license list.
///
/// Identity is the id alone: two values with the same id compare equal even
/// if one was built from an older catalog with different metadata.
///
/// # Examples
/// ```
/// use spdx_expression::ListedLicense;
/// let a = ListedLicense::new("MIT").with_name("MIT License");
/// let b = ListedLicense::new("MIT");
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "MIT");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListedLicense {
    id: String,
    name: Option<String>,
    text: Option<String>,
    see_also: Vec<String>,
    osi_approved: bool,
    deprecated: bool,
}

impl ListedLicense {
    /// Create a listed license carrying only its id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            text: None,
            see_also: Vec::new(),
            osi_approved: false,
            deprecated: false,
        }
    }

    /// Attach the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach the license text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attach reference URLs.
    #[must_use]
    pub fn with_see_also(mut self, see_also: Vec<String>) -> Self {
        self.see_also = see_also;
        self
    }

    /// Mark the license as OSI approved.
    #[must_use]
    pub fn with_osi_approved(mut self, approved: bool) -> Self {
        self.osi_approved = approved;
        self
    }

    /// Mark the id as deprecated on the license list.
    #[must_use]
    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Canonical SPDX identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name, when the catalog provided one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// License text, when the catalog provided one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Reference URLs.
    #[must_use]
    pub fn see_also(&self) -> &[String] {
        &self.see_also
    }

    /// Whether the OSI approved this license.
    #[must_use]
    pub fn is_osi_approved(&self) -> bool {
        self.osi_approved
    }

    /// Whether the id is deprecated on the license list.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }
}

impl PartialEq for ListedLicense {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ListedLicense {}

impl Hash for ListedLicense {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ListedLicense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
