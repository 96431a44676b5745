//! DI "Interfaces"

use crate::core::errors::ChatError;
use crate::infrastructure::entities;
use async_trait::async_trait;
use uuid::Uuid;

/// A chat together with its user/assistant dialogue.
#[derive(Debug)]
pub struct ChatWithMessages {
    pub chat: entities::Chat,
    pub messages: Vec<entities::Message>,
}

pub trait Authenticator: Send + Sync {
    /// Resolves a bearer token to the id of the user it was issued for.
    ///
    /// Returns `ChatError::Unauthorized` if the token does not verify or its subject is not a
    /// user id.
    fn authenticate(&self, token: &str) -> Result<Uuid, ChatError>;
}

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Lists all chats of the given user, newest first. Chats that were never named are included.
    async fn list_chats(&self, user_id: Uuid) -> Result<Vec<entities::Chat>, ChatError>;

    /// Creates an unnamed chat for the given user, seeded with the hidden system prompt.
    async fn create_chat(&self, user_id: Uuid) -> Result<entities::Chat, ChatError>;

    /// Renames a chat.
    ///
    /// Returns `ChatError::NotFound` if the chat does not exist or is owned by another user.
    async fn rename_chat(
        &self,
        user_id: Uuid,
        chat_id: Uuid,
        name: String,
    ) -> Result<entities::Chat, ChatError>;

    /// Fetches a chat with its user and assistant messages. System messages are never included.
    ///
    /// Returns `ChatError::NotFound` if the chat does not exist or is owned by another user.
    async fn chat_with_messages(
        &self,
        user_id: Uuid,
        chat_id: Uuid,
    ) -> Result<ChatWithMessages, ChatError>;
}

#[async_trait]
pub trait ChatSearchService: Send + Sync {
    /// Lists the user's chats from the search index. May lag behind [`ChatService::list_chats`].
    async fn list_chats(&self, user_id: Uuid) -> Result<Vec<entities::ChatDocument>, ChatError>;
}
