//! Implementations for the service the app needs.
//!

use crate::core::MessageRole;
use crate::core::errors::ChatError;
use crate::core::traits::{Authenticator, ChatSearchService, ChatService, ChatWithMessages};
use crate::infrastructure::entities::{Chat, ChatDocument, Message};
use crate::infrastructure::traits::{ChatRepository, ChatSearchIndex, TokenVerifier};
use async_trait::async_trait;
use chrono::Utc;
use di::{Ref, injectable};
use log::{debug, info};
use uuid::Uuid;

/// Upper bound on chats returned from the search index.
pub const SEARCH_RESULT_LIMIT: usize = 1000;

pub const SYSTEM_PROMPT: &str = r#"You are a patient tutor. Your task is to help the student understand the topic of this chat.
Explain concepts step by step and check understanding with short follow-up questions.
Do not simply hand out final answers to exercises; guide the student towards them instead.
Answer in the language the student writes in.
"#;

#[injectable(Authenticator)]
pub struct TokenAuthenticator {
    verifier: Ref<dyn TokenVerifier>,
}

impl Authenticator for TokenAuthenticator {
    fn authenticate(&self, token: &str) -> Result<Uuid, ChatError> {
        let claims = self
            .verifier
            .verify_access_token(token)
            .ok_or(ChatError::Unauthorized)?;

        Uuid::parse_str(&claims.sub).map_err(|_| {
            debug!("token subject {:?} is not a user id", claims.sub);
            ChatError::Unauthorized
        })
    }
}

#[injectable(ChatService)]
pub struct MyChatService {
    repo: Ref<dyn ChatRepository>,
}

impl MyChatService {
    async fn owned_chat(&self, user_id: Uuid, chat_id: Uuid) -> Result<Chat, ChatError> {
        self.repo
            .find_owned_chat(user_id, chat_id)
            .await?
            .ok_or(ChatError::NotFound)
    }
}

#[async_trait]
impl ChatService for MyChatService {
    async fn list_chats(&self, user_id: Uuid) -> Result<Vec<Chat>, ChatError> {
        Ok(self.repo.list_chats(user_id).await?)
    }

    async fn create_chat(&self, user_id: Uuid) -> Result<Chat, ChatError> {
        let now = Utc::now();
        let chat_id = Uuid::new_v4();

        let chat = self
            .repo
            .create_chat_with_message(
                Chat {
                    id: chat_id,
                    user_id,
                    name: String::new(),
                    created_at: now,
                },
                Message {
                    id: Uuid::new_v4(),
                    chat_id,
                    role: MessageRole::System.as_str().to_owned(),
                    content: SYSTEM_PROMPT.to_owned(),
                    visible: false,
                    created_at: now,
                },
            )
            .await?;

        info!("created chat {} for user {user_id}", chat.id);
        Ok(chat)
    }

    async fn rename_chat(
        &self,
        user_id: Uuid,
        chat_id: Uuid,
        name: String,
    ) -> Result<Chat, ChatError> {
        let chat = self.owned_chat(user_id, chat_id).await?;

        self.repo
            .update_chat_name(user_id, chat.id, &name)
            .await?
            .ok_or(ChatError::NotFound)
    }

    async fn chat_with_messages(
        &self,
        user_id: Uuid,
        chat_id: Uuid,
    ) -> Result<ChatWithMessages, ChatError> {
        let chat = self.owned_chat(user_id, chat_id).await?;

        let roles = MessageRole::DIALOGUE.map(|role| role.as_str());
        let messages = self.repo.list_chat_messages(chat.id, &roles).await?;

        Ok(ChatWithMessages { chat, messages })
    }
}

#[injectable(ChatSearchService)]
pub struct IndexedChatSearchService {
    index: Ref<dyn ChatSearchIndex>,
}

#[async_trait]
impl ChatSearchService for IndexedChatSearchService {
    async fn list_chats(&self, user_id: Uuid) -> Result<Vec<ChatDocument>, ChatError> {
        Ok(self
            .index
            .search_user_chats(user_id, SEARCH_RESULT_LIMIT)
            .await?)
    }
}
