//! Domain-level error types.

use thiserror::Error;

/// Domain errors - what a view reports back to the user.
///
/// Remote failures are never differentiated by cause in their message.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Incorrect username or secret key.")]
    Unauthorized,

    #[error("Something went wrong.")]
    Store(#[from] RepoError),

    #[error("Something went wrong.")]
    Lookup(#[from] LookupError),
}

/// Input rejected before any write is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please complete all required fields.")]
    MissingRequiredFields,

    #[error("Rating must be a whole number from 1 to 5.")]
    InvalidRating,

    #[error("Please provide a valid Imgur GIF URL (e.g. https://i.imgur.com/abcd123.gif)")]
    InvalidImageUrl,

    #[error("Please provide username and comment")]
    MissingCommentFields,
}

/// Row store errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Row store connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Row not found")]
    NotFound,

    #[error("Row could not be decoded: {0}")]
    Decode(String),
}

/// Movie lookup errors.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Movie lookup request failed: {0}")]
    Transport(String),

    #[error("Movie lookup returned status {0}")]
    Status(u16),

    #[error("Movie lookup response could not be decoded: {0}")]
    Decode(String),

    #[error("Movie lookup is not configured")]
    NotConfigured,
}
