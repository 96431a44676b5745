//! Environment configuration

use anyhow::Context;
use std::env;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_MEILISEARCH_URL: &str = "http://localhost:7700";
const DEFAULT_CHAT_INDEX: &str = "chats";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_address: String,
    pub meilisearch_url: String,
    pub meilisearch_api_key: Option<String>,
    pub meilisearch_chat_index: String,
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Reads settings from the process environment, loading `.env` first if present.
    pub fn from_env() -> anyhow::Result<Settings> {
        dotenvy::dotenv().ok();

        Ok(Settings {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned()),
            meilisearch_url: env::var("MEILISEARCH_URL")
                .unwrap_or_else(|_| DEFAULT_MEILISEARCH_URL.to_owned()),
            meilisearch_api_key: env::var("MEILISEARCH_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            meilisearch_chat_index: env::var("MEILISEARCH_CHAT_INDEX")
                .unwrap_or_else(|_| DEFAULT_CHAT_INDEX.to_owned()),
            allowed_origins: parse_origins(
                &env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_owned()),
            ),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}
