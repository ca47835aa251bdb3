//! Error types for query handling.

/// Errors produced while turning a query into timestamp records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The date parser could not make sense of the input.
    #[error("couldn't parse date: {0}")]
    Unparseable(String),

    /// Unknown locale tag in configuration.
    #[error("unknown locale '{0}' (expected en-US, en-GB or iso)")]
    UnknownLocale(String),

    /// Unknown timestamp modifier character.
    #[error("unknown timestamp style '{0}' (expected one of f, F, t, T, d, D, R)")]
    UnknownModifier(String),
}
