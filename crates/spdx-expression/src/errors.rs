//! Error types shared by the tokenizer, parser and registry contract.
//!
//! Tokenization never fails, so every error here originates in the parser or
//! in one of the collaborators it consults. Structural failures get their own
//! [`LicenseParseError`] variant so callers can match on the exact problem;
//! collaborator faults are wrapped rather than flattened into strings.

use thiserror::Error;

/// Errors reported by a license/exception registry.
///
/// "Not listed" is never an error: it is answered by the `is_listed_*`
/// queries. These variants describe registry faults.
///
/// # Examples
/// ```
/// use spdx_expression::RegistryError;
/// let err = RegistryError::MissingListedLicense { id: "MIT".into() };
/// assert_eq!(
///     err.to_string(),
///     "license `MIT` is indexed as listed but could not be resolved"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The index claims the license id is listed but has no entry for it.
    #[error("license `{id}` is indexed as listed but could not be resolved")]
    MissingListedLicense {
        /// Identifier that failed to resolve.
        id: String,
    },
    /// The index claims the exception id is listed but has no entry for it.
    #[error("exception `{id}` is indexed as listed but could not be resolved")]
    MissingListedException {
        /// Identifier that failed to resolve.
        id: String,
    },
}

/// Errors raised while registering or minting extracted licenses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractedLicenseError {
    /// An extracted license with the same id but materially different text is
    /// already part of the document.
    #[error("extracted license `{id}` already exists with different license text")]
    DuplicateId {
        /// Conflicting identifier.
        id: String,
    },
    /// The identifier is not usable as a document-local license reference.
    #[error("invalid license reference id `{id}`: {reason}")]
    InvalidId {
        /// Offending identifier.
        id: String,
        /// Why the identifier was rejected.
        reason: &'static str,
    },
}

/// Errors surfaced by [`crate::parse`].
///
/// `position` fields are zero-based token indices into the sequence produced
/// by [`crate::tokenize`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LicenseParseError {
    /// The expression (or a parenthesised group) contains no tokens.
    #[error("empty license expression")]
    Empty,
    /// An opening parenthesis has no matching close.
    #[error("missing ')' for '(' at token {position}")]
    UnmatchedOpen {
        /// Index of the unmatched `(`.
        position: usize,
    },
    /// A closing parenthesis has no matching open.
    #[error("unexpected ')' at token {position}")]
    UnmatchedClose {
        /// Index of the stray `)`.
        position: usize,
    },
    /// `+` was applied to something other than a listed or extracted license.
    #[error("'+' can only follow a simple license, found `{operand}`")]
    OrLaterOnNonSimple {
        /// Rendering of the rejected operand.
        operand: String,
    },
    /// `WITH` was the last token, or was followed by an operator or paren.
    #[error("expected an exception identifier after 'WITH' at token {position}")]
    MissingException {
        /// Index of the `WITH` token.
        position: usize,
    },
    /// `WITH` had no left operand or an ineligible one.
    #[error("'WITH' requires a simple license or or-later license, found {operand}")]
    InvalidWithOperand {
        /// Rendering of the rejected operand, or `nothing`.
        operand: String,
    },
    /// An `AND`/`OR` operator lacked one of its operands.
    #[error("missing operand for '{operator}'")]
    MissingOperand {
        /// Operator keyword.
        operator: &'static str,
    },
    /// Operands were left over once every operator was applied.
    #[error("unexpected extra operands: expected one expression, found {count}")]
    ExtraOperands {
        /// Number of operands left on the stack.
        count: usize,
    },
    /// Alternating `AND`/`OR` groups nest deeper than the parser accepts.
    ///
    /// Redundant parentheses do not count; only the depth of the resulting
    /// tree does.
    #[error("license expression nests deeper than {limit} levels")]
    NestingTooDeep {
        /// Maximum supported tree depth.
        limit: usize,
    },
    /// A sentinel keyword appeared inside a larger expression.
    #[error("`{keyword}` must be the whole license expression")]
    MisplacedSentinel {
        /// `NONE` or `NOASSERTION`.
        keyword: &'static str,
    },
    /// The registry reported a fault while resolving an identifier.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The document refused to mint or return an extracted license.
    #[error(transparent)]
    Extracted(#[from] ExtractedLicenseError),
}
