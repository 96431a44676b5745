//! GraphQL endpoint, backed by the search index rather than the database

use crate::core::errors::ChatError;
use crate::core::traits::{Authenticator, ChatSearchService};
use crate::infrastructure::entities::ChatDocument;
use async_graphql::http::GraphiQLSource;
use async_graphql::{
    Context, EmptyMutation, EmptySubscription, ErrorExtensions, Object, Schema, SimpleObject,
};
use axum::response::Html;
use axum::routing::get;
use axum::{Extension, Json, Router};
use di::Ref;
use di_axum::Inject;
use log::error;

pub type ChatSchema = Schema<Query, EmptyMutation, EmptySubscription>;

pub fn schema() -> ChatSchema {
    Schema::build(Query, EmptyMutation, EmptySubscription).finish()
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(graphiql).post(execute))
        .layer(Extension(schema()))
}

async fn execute(
    Inject(authenticator): Inject<dyn Authenticator>,
    Inject(search_service): Inject<dyn ChatSearchService>,
    Extension(schema): Extension<ChatSchema>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(
        schema
            .execute(request.data(authenticator).data(search_service))
            .await,
    )
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

#[derive(SimpleObject, Debug)]
#[graphql(name = "Chat")]
pub struct ChatObject {
    pub id: String,
    pub name: String,
}

impl From<ChatDocument> for ChatObject {
    fn from(document: ChatDocument) -> Self {
        ChatObject {
            id: document.id,
            name: document.name,
        }
    }
}

pub struct Query;

#[Object]
impl Query {
    /// Chats of the token's owner, as currently known to the search index.
    async fn list_chats(
        &self,
        ctx: &Context<'_>,
        access_token: String,
    ) -> async_graphql::Result<Vec<ChatObject>> {
        let authenticator = ctx.data::<Ref<dyn Authenticator>>()?;
        let search_service = ctx.data::<Ref<dyn ChatSearchService>>()?;

        let user_id = authenticator
            .authenticate(&access_token)
            .map_err(|e| e.extend())?;

        let chats = search_service
            .list_chats(user_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(chats.into_iter().map(ChatObject::from).collect())
    }
}

impl ErrorExtensions for ChatError {
    fn extend(&self) -> async_graphql::Error {
        let (code, message) = match self {
            ChatError::Unauthorized => ("UNAUTHORIZED", self.to_string()),
            ChatError::NotFound => ("NOT_FOUND", self.to_string()),
            ChatError::Database(_) | ChatError::Search(_) => {
                error!("{self}");
                ("INTERNAL", "Internal server error".to_owned())
            }
        };

        async_graphql::Error::new(message).extend_with(|_, extensions| extensions.set("code", code))
    }
}
