//! Chat endpoints

use crate::api::ExtractBearerToken;
use crate::core::errors::ChatError;
use crate::core::traits::{Authenticator, ChatService};
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use di_axum::Inject;
use uuid::Uuid;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_chats).post(create_chat))
        .route("/:id", get(get_chat).patch(update_chat))
}

async fn list_chats(
    Inject(authenticator): Inject<dyn Authenticator>,
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractBearerToken(token): ExtractBearerToken,
) -> Result<(StatusCode, Json<Vec<schemas::ChatSummary>>), ChatError> {
    let user_id = authenticator.authenticate(&token)?;
    let chats = chat_service.list_chats(user_id).await?;

    Ok((
        StatusCode::OK,
        Json(chats.into_iter().map(schemas::ChatSummary::from).collect()),
    ))
}

async fn create_chat(
    Inject(authenticator): Inject<dyn Authenticator>,
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractBearerToken(token): ExtractBearerToken,
) -> Result<(StatusCode, Json<schemas::CreatedChat>), ChatError> {
    let user_id = authenticator.authenticate(&token)?;
    let chat = chat_service.create_chat(user_id).await?;

    Ok((StatusCode::OK, Json(schemas::CreatedChat { chat_id: chat.id })))
}

async fn get_chat(
    Inject(authenticator): Inject<dyn Authenticator>,
    Inject(chat_service): Inject<dyn ChatService>,
    Path(chat_id): Path<Uuid>,
    ExtractBearerToken(token): ExtractBearerToken,
) -> Result<(StatusCode, Json<schemas::ChatDetail>), ChatError> {
    let user_id = authenticator.authenticate(&token)?;
    let chat = chat_service.chat_with_messages(user_id, chat_id).await?;

    Ok((StatusCode::OK, Json(chat.into())))
}

async fn update_chat(
    Inject(authenticator): Inject<dyn Authenticator>,
    Inject(chat_service): Inject<dyn ChatService>,
    Path(chat_id): Path<Uuid>,
    ExtractBearerToken(token): ExtractBearerToken,
    Json(update): Json<schemas::ChatUpdate>,
) -> Result<(StatusCode, Json<schemas::ChatSummary>), ChatError> {
    let user_id = authenticator.authenticate(&token)?;
    let chat = chat_service
        .rename_chat(user_id, chat_id, update.name)
        .await?;

    Ok((StatusCode::OK, Json(chat.into())))
}

pub mod schemas {
    use crate::core::traits::ChatWithMessages;
    use crate::infrastructure::entities;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Deserialize, Debug)]
    pub struct ChatUpdate {
        pub name: String,
    }

    #[derive(Serialize, Debug)]
    pub struct ChatSummary {
        pub id: Uuid,
        pub name: String,
        pub created_at: DateTime<Utc>,
    }

    impl From<entities::Chat> for ChatSummary {
        fn from(chat: entities::Chat) -> Self {
            ChatSummary {
                id: chat.id,
                name: chat.name,
                created_at: chat.created_at,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct CreatedChat {
        pub chat_id: Uuid,
    }

    #[derive(Serialize, Debug)]
    pub struct Message {
        pub role: String,
        pub content: String,
    }

    impl From<entities::Message> for Message {
        fn from(message: entities::Message) -> Self {
            Message {
                role: message.role,
                content: message.content,
            }
        }
    }

    #[derive(Serialize, Debug)]
    pub struct ChatDetail {
        pub id: Uuid,
        pub name: String,
        pub messages: Vec<Message>,
    }

    impl From<ChatWithMessages> for ChatDetail {
        fn from(ChatWithMessages { chat, messages }: ChatWithMessages) -> Self {
            ChatDetail {
                id: chat.id,
                name: chat.name,
                messages: messages.into_iter().map(Message::from).collect(),
            }
        }
    }
}
