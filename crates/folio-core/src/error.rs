//! Error types for post resolution and content loading.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building the registry or serving posts from it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No record in the registry carries this identifier.
    #[error("post not found: {0}")]
    NotFound(String),

    /// A local record exists but no document is registered for it.
    #[error("no content registered for post '{0}'")]
    ContentMissing(String),

    /// Two records share an identifier.
    #[error("duplicate post identifier: {0}")]
    DuplicateIdentifier(String),

    /// The identifier is empty or cannot be used as a path segment.
    #[error("invalid post identifier '{id}': {reason}")]
    InvalidIdentifier {
        /// The offending identifier.
        id: String,
        /// Description of what's wrong.
        reason: &'static str,
    },
}

impl Error {
    /// Whether this error means "nothing to show" at the page level.
    ///
    /// Both a missing record and a record whose document is missing end in
    /// the same 404 page.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::ContentMissing(_))
    }
}
