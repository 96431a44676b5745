//! Database entities

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Chat {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    /// Stored as free-form text, see [`crate::core::MessageRole`] for the known values.
    pub role: String,
    pub content: String,
    pub visible: bool,
    pub created_at: DateTime<Utc>,
}

/// A chat as it appears in the search index.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ChatDocument {
    pub id: String,
    pub name: String,
}
