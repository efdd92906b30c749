//! License exceptions used on the right-hand side of `WITH`.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::text::optional_text_equivalent;

/// A named exception to a license's terms.
///
/// Exceptions resolved from the license list are marked as listed. An
/// exception id that the registry does not know still parses; it yields an
/// unlisted exception carrying only the id.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LicenseException {
    id: String,
    name: Option<String>,
    text: Option<String>,
    comment: Option<String>,
    example: Option<String>,
    see_also: Vec<String>,
    deprecated: bool,
    listed: bool,
}

impl LicenseException {
    /// A listed exception with the given id.
    #[must_use]
    pub fn listed(id: impl Into<String>) -> Self {
        Self {
            listed: true,
            ..Self::unlisted(id)
        }
    }

    /// An exception not found on the license list.
    #[must_use]
    pub fn unlisted(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            text: None,
            comment: None,
            example: None,
            see_also: Vec::new(),
            deprecated: false,
            listed: false,
        }
    }

    /// Attach the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach the exception text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attach a comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attach a usage example.
    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Attach reference URLs.
    #[must_use]
    pub fn with_see_also(mut self, see_also: Vec<String>) -> Self {
        self.see_also = see_also;
        self
    }

    /// Mark the id as deprecated.
    #[must_use]
    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Exception identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Exception text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Comment.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Usage example.
    #[must_use]
    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    /// Reference URLs.
    #[must_use]
    pub fn see_also(&self) -> &[String] {
        &self.see_also
    }

    /// Whether the id is deprecated on the exception list.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Whether the exception came from the license list.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.listed
    }

    /// Semantic comparison: matching normalised text together with matching
    /// name, comment and see-also. Ids only matter when neither exception
    /// carries text.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        let text_matches = match (self.text(), other.text()) {
            (None, None) => self.id == other.id,
            (a, b) => optional_text_equivalent(a, b),
        };
        text_matches
            && self.name == other.name
            && self.comment == other.comment
            && self.see_also == other.see_also
    }
}

impl PartialEq for LicenseException {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LicenseException {}

impl Hash for LicenseException {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for LicenseException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
