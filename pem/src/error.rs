use base64::DecodeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing or decoding armored key text.
///
/// Every variant means the input is not well-formed PEM; callers that only
/// care about the category can treat them all as "malformed PEM".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Missing the opening boundary marker (e.g., `-----BEGIN RSA PUBLIC KEY-----`)
    #[error("missing a pre encapsulation boundary")]
    MissingPreEncapsulationBoundary,

    /// Missing the closing boundary marker (e.g., `-----END RSA PUBLIC KEY-----`)
    #[error("missing a post encapsulation boundary")]
    MissingPostEncapsulationBoundary,

    /// No data found between boundary markers
    #[error("missing PEM data")]
    MissingData,

    /// The label in the boundary marker is not one keyarmor knows
    #[error("invalid label: {0}")]
    InvalidLabel(String),

    /// Malformed boundary marker
    #[error("invalid encapsulation boundary")]
    InvalidEncapsulationBoundary,

    /// The BEGIN and END labels do not match
    #[error("label doesn't match")]
    LabelMissMatch,

    /// The block is well-formed but carries a different label than requested
    #[error("unexpected label: expected {expected}, got {actual}")]
    UnexpectedLabel { expected: String, actual: String },

    /// A character outside the base64 alphabet inside the body
    #[error("invalid base64 line {line}: unexpected character {found:?}")]
    InvalidBase64Line { line: usize, found: char },

    /// Failed to decode base64 data
    #[error("base64 decode: {0}")]
    Base64Decode(DecodeError),

    /// Another block starts after the END boundary of the first one
    #[error("another PEM block begins at line {line}; only one block is accepted")]
    TrailingBlock { line: usize },

    /// The armored text is not valid UTF-8
    #[error("armored text is not valid UTF-8")]
    InvalidUtf8,
}
