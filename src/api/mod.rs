use crate::core::errors::ChatError;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use log::error;
use serde_json::json;

pub mod chats;
pub mod graphql;

const BEARER_SCHEME: &str = "bearer";

/// Every endpoint of the service, before the DI provider is attached.
pub fn router() -> Router {
    Router::new()
        .nest("/chat", chats::router())
        .nest("/graphql", graphql::router())
}

/// The raw token from an `Authorization: Bearer <token>` header. Not yet verified.
#[derive(Debug)]
pub struct ExtractBearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for ExtractBearerToken
where
    S: Send + Sync,
{
    type Rejection = ChatError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, ChatError> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(ChatError::Unauthorized)?
            .to_str()
            .map_err(|_| ChatError::Unauthorized)?;

        // The scheme is case-insensitive.
        match value.trim().split_once(char::is_whitespace) {
            Some((scheme, token))
                if scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.trim().is_empty() =>
            {
                Ok(ExtractBearerToken(token.trim().to_owned()))
            }
            _ => Err(ChatError::Unauthorized),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = match &self {
            ChatError::Unauthorized => StatusCode::UNAUTHORIZED,
            ChatError::NotFound => StatusCode::NOT_FOUND,
            ChatError::Database(_) | ChatError::Search(_) => {
                error!("{self}");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "msg": "Internal server error" })),
                )
                    .into_response();
            }
        };

        (status, Json(json!({ "msg": self.to_string() }))).into_response()
    }
}
