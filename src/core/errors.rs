//! Error type shared by the REST and GraphQL surfaces

use crate::infrastructure::traits::SearchError;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Missing, malformed or expired access token.
    #[error("Invalid token")]
    Unauthorized,
    /// The chat does not exist or belongs to someone else. Both cases look the same to callers.
    #[error("Chat not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("search index error: {0}")]
    Search(#[from] SearchError),
}
