//! Infrastructure traits, used for DI on higher levels

use crate::infrastructure::entities;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// All chats of `user_id`, newest first.
    async fn list_chats(&self, user_id: Uuid) -> sqlx::Result<Vec<entities::Chat>>;

    /// The chat with `chat_id` if it exists and belongs to `user_id`.
    async fn find_owned_chat(
        &self,
        user_id: Uuid,
        chat_id: Uuid,
    ) -> sqlx::Result<Option<entities::Chat>>;

    async fn update_chat_name(
        &self,
        user_id: Uuid,
        chat_id: Uuid,
        name: &str,
    ) -> sqlx::Result<Option<entities::Chat>>;

    /// Inserts the chat and its seed message in a single transaction.
    async fn create_chat_with_message(
        &self,
        chat: entities::Chat,
        message: entities::Message,
    ) -> sqlx::Result<entities::Chat>;

    /// Messages of the chat whose role is one of `roles`, in creation order.
    async fn list_chat_messages(
        &self,
        chat_id: Uuid,
        roles: &[&str],
    ) -> sqlx::Result<Vec<entities::Message>>;
}

/// Payload of a verified access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub trait TokenVerifier: Send + Sync {
    /// Returns the token's claims, or `None` when the token is invalid or expired.
    fn verify_access_token(&self, token: &str) -> Option<Claims>;
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("search index responded with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[async_trait]
pub trait ChatSearchIndex: Send + Sync {
    /// Unranked scan of the chats indexed for `user_id`, at most `limit` hits.
    async fn search_user_chats(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<entities::ChatDocument>, SearchError>;
}
