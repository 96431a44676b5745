//! Meilisearch-backed chat index

use crate::infrastructure::entities::ChatDocument;
use crate::infrastructure::settings::Settings;
use crate::infrastructure::traits::{ChatSearchIndex, SearchError};
use async_trait::async_trait;
use di::{Ref, inject, injectable};
use log::error;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub struct MeilisearchChatIndex {
    client: reqwest::Client,
    search_url: String,
    api_key: Option<String>,
}

#[injectable(ChatSearchIndex)]
impl MeilisearchChatIndex {
    #[inject]
    pub fn create(settings: Ref<Settings>) -> MeilisearchChatIndex {
        MeilisearchChatIndex {
            client: reqwest::Client::new(),
            search_url: format!(
                "{}/indexes/{}/search",
                settings.meilisearch_url.trim_end_matches('/'),
                settings.meilisearch_chat_index
            ),
            api_key: settings.meilisearch_api_key.clone(),
        }
    }
}

#[derive(Serialize, Debug)]
struct SearchRequest {
    q: &'static str,
    filter: String,
    limit: usize,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    hits: Vec<ChatDocument>,
}

fn user_filter(user_id: Uuid) -> String {
    format!("user_id = '{user_id}'")
}

#[async_trait]
impl ChatSearchIndex for MeilisearchChatIndex {
    async fn search_user_chats(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ChatDocument>, SearchError> {
        let mut request = self.client.post(&self.search_url).json(&SearchRequest {
            q: "",
            filter: user_filter(user_id),
            limit,
        });

        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("chat search failed with {status}: {body}");
            return Err(SearchError::Status { status, body });
        }

        Ok(response.json::<SearchResponse>().await?.hits)
    }
}
