//! DB Repository abstractions

use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::entities::{Chat, Message};
use crate::infrastructure::traits::ChatRepository;
use async_trait::async_trait;
use di::{Ref, injectable};
use log::error;
use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

#[injectable(ChatRepository)]
pub struct DbChatRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl ChatRepository for DbChatRepository {
    async fn list_chats(&self, user_id: Uuid) -> sqlx::Result<Vec<Chat>> {
        sqlx::query_as(
            "SELECT id, user_id, name, created_at FROM chats WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(user_id)
        .fetch_all(&**self.connection)
        .await
        .inspect_err(|e| error!("{e}"))
    }

    async fn find_owned_chat(&self, user_id: Uuid, chat_id: Uuid) -> sqlx::Result<Option<Chat>> {
        sqlx::query_as(
            "SELECT id, user_id, name, created_at FROM chats WHERE id = ? AND user_id = ?",
        )
        .bind(chat_id)
        .bind(user_id)
        .fetch_optional(&**self.connection)
        .await
        .inspect_err(|e| error!("{e}"))
    }

    async fn update_chat_name(
        &self,
        user_id: Uuid,
        chat_id: Uuid,
        name: &str,
    ) -> sqlx::Result<Option<Chat>> {
        sqlx::query_as(
            "UPDATE chats SET name = ? WHERE id = ? AND user_id = ? RETURNING id, user_id, name, created_at",
        )
        .bind(name)
        .bind(chat_id)
        .bind(user_id)
        .fetch_optional(&**self.connection)
        .await
        .inspect_err(|e| error!("{e}"))
    }

    async fn create_chat_with_message(&self, chat: Chat, message: Message) -> sqlx::Result<Chat> {
        let mut transaction = self.connection.begin().await?;

        let chat: Chat = sqlx::query_as(
            "INSERT INTO chats (id, user_id, name, created_at) VALUES (?, ?, ?, ?) RETURNING id, user_id, name, created_at",
        )
        .bind(chat.id)
        .bind(chat.user_id)
        .bind(chat.name)
        .bind(chat.created_at)
        .fetch_one(&mut *transaction)
        .await
        .inspect_err(|e| error!("{e}"))?;

        sqlx::query(
            "INSERT INTO messages (id, chat_id, role, content, visible, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(message.id)
        .bind(chat.id)
        .bind(message.role)
        .bind(message.content)
        .bind(message.visible)
        .bind(message.created_at)
        .execute(&mut *transaction)
        .await
        .inspect_err(|e| error!("{e}"))?;

        transaction.commit().await.inspect_err(|e| error!("{e}"))?;

        Ok(chat)
    }

    async fn list_chat_messages(&self, chat_id: Uuid, roles: &[&str]) -> sqlx::Result<Vec<Message>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, chat_id, role, content, visible, created_at FROM messages WHERE chat_id = ",
        );
        query.push_bind(chat_id).push(" AND role IN (");

        let mut separated = query.separated(", ");
        for role in roles {
            separated.push_bind(*role);
        }
        separated.push_unseparated(") ORDER BY created_at ASC, rowid ASC");

        query
            .build_query_as()
            .fetch_all(&**self.connection)
            .await
            .inspect_err(|e| error!("{e}"))
    }
}
