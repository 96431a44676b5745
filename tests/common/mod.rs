//! Shared fixtures for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chat_backend_api::api;
use chat_backend_api::core::services::{
    IndexedChatSearchService, MyChatService, TokenAuthenticator,
};
use chat_backend_api::infrastructure::auth::JwtTokenVerifier;
use chat_backend_api::infrastructure::database::DatabaseConnection;
use chat_backend_api::infrastructure::entities::ChatDocument;
use chat_backend_api::infrastructure::repositories::DbChatRepository;
use chat_backend_api::infrastructure::settings::Settings;
use chat_backend_api::infrastructure::traits::{
    ChatRepository, ChatSearchIndex, Claims, SearchError,
};
use chrono::{Duration, Utc};
use di::{Injectable, Ref, ServiceCollection, ServiceProvider, singleton_factory};
use di_axum::RouterServiceProviderExtensions;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret";

/// In-memory SQLite with migrations applied. A single connection keeps every query on the
/// same database.
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}

pub fn test_settings() -> Settings {
    Settings {
        database_url: "sqlite::memory:".to_owned(),
        jwt_secret: TEST_SECRET.to_owned(),
        bind_address: "127.0.0.1:0".to_owned(),
        meilisearch_url: "http://localhost:7700".to_owned(),
        meilisearch_api_key: None,
        meilisearch_chat_index: "chats".to_owned(),
        allowed_origins: Vec::new(),
    }
}

/// Stand-in for the search index. Tests populate it explicitly, independent of the database.
#[derive(Default)]
pub struct InMemoryChatIndex {
    documents: Mutex<Vec<(Uuid, ChatDocument)>>,
    last_limit: Mutex<Option<usize>>,
}

impl InMemoryChatIndex {
    pub fn index_chat(&self, user_id: Uuid, id: impl ToString, name: &str) {
        let mut documents = self.documents.lock().unwrap();
        let id = id.to_string();
        documents.retain(|(_, document)| document.id != id);
        documents.push((
            user_id,
            ChatDocument {
                id,
                name: name.to_owned(),
            },
        ));
    }

    pub fn last_limit(&self) -> Option<usize> {
        *self.last_limit.lock().unwrap()
    }
}

#[async_trait]
impl ChatSearchIndex for InMemoryChatIndex {
    async fn search_user_chats(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ChatDocument>, SearchError> {
        *self.last_limit.lock().unwrap() = Some(limit);

        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, document)| document.clone())
            .take(limit)
            .collect())
    }
}

/// Search index that is always unavailable.
pub struct FailingChatIndex;

pub const FAILING_INDEX_BODY: &str = "index `chats` not found";

#[async_trait]
impl ChatSearchIndex for FailingChatIndex {
    async fn search_user_chats(
        &self,
        _user_id: Uuid,
        _limit: usize,
    ) -> Result<Vec<ChatDocument>, SearchError> {
        Err(SearchError::Status {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: FAILING_INDEX_BODY.to_owned(),
        })
    }
}

pub fn create_test_provider(pool: SqlitePool, index: Ref<dyn ChatSearchIndex>) -> ServiceProvider {
    let settings = Ref::new(test_settings());
    let database = Ref::new(DatabaseConnection::from_pool(pool));

    ServiceCollection::new()
        .add(singleton_factory(move |_| settings.clone()))
        .add(singleton_factory(move |_| database.clone()))
        .add(singleton_factory(move |_| index.clone()))
        .add(JwtTokenVerifier::singleton())
        .add(DbChatRepository::scoped())
        .add(TokenAuthenticator::scoped())
        .add(MyChatService::scoped())
        .add(IndexedChatSearchService::scoped())
        .build_provider()
        .unwrap()
}

pub fn create_test_app(pool: SqlitePool, index: Ref<dyn ChatSearchIndex>) -> axum::Router {
    api::router().with_provider(create_test_provider(pool, index))
}

pub fn chat_repository(pool: SqlitePool) -> Ref<dyn ChatRepository> {
    let database = Ref::new(DatabaseConnection::from_pool(pool));

    ServiceCollection::new()
        .add(singleton_factory(move |_| database.clone()))
        .add(DbChatRepository::transient())
        .build_provider()
        .unwrap()
        .get_required::<dyn ChatRepository>()
}

pub fn token_with_subject(subject: &str, secret: &str, expires_in: Duration) -> String {
    let claims = Claims {
        sub: subject.to_owned(),
        exp: (Utc::now() + expires_in).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn token_for(user_id: Uuid) -> String {
    token_with_subject(&user_id.to_string(), TEST_SECRET, Duration::hours(1))
}

/// Sends the request and decodes the body as JSON (`Value::Null` for an empty body).
pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };

    (status, json)
}
