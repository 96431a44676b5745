//! Chat backend: REST and GraphQL API

use chat_backend_api::api;
use chat_backend_api::core::services::{
    IndexedChatSearchService, MyChatService, TokenAuthenticator,
};
use chat_backend_api::infrastructure::auth::JwtTokenVerifier;
use chat_backend_api::infrastructure::database::DatabaseConnection;
use chat_backend_api::infrastructure::repositories::DbChatRepository;
use chat_backend_api::infrastructure::search::MeilisearchChatIndex;
use chat_backend_api::infrastructure::settings::Settings;

use anyhow::{Context, anyhow};
use axum::http::{HeaderValue, Method};
use di::{Injectable, Ref, ServiceCollection, singleton_factory};
use di_axum::RouterServiceProviderExtensions;
use log::{error, info};
use tokio::runtime::{Builder, Runtime};
use tower_http::cors::{Any, CorsLayer};

fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env()?;

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;

    runtime.block_on(web_server_task(settings))
}

async fn web_server_task(settings: Settings) -> anyhow::Result<()> {
    let database = Ref::new(
        DatabaseConnection::connect(&settings)
            .await
            .context("cannot open database")?,
    );

    let allowed_origins = settings
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .context("invalid CORS_ALLOWED_ORIGINS")?;
    let bind_address = settings.bind_address.clone();

    let settings = Ref::new(settings);
    let provider = ServiceCollection::new()
        .add(singleton_factory(move |_| settings.clone()))
        .add(singleton_factory(move |_| database.clone()))
        .add(JwtTokenVerifier::singleton())
        .add(MeilisearchChatIndex::singleton())
        .add(DbChatRepository::scoped())
        .add(TokenAuthenticator::scoped())
        .add(MyChatService::scoped())
        .add(IndexedChatSearchService::scoped())
        .build_provider()
        .map_err(|e| anyhow!("invalid service registrations: {e:?}"))?;

    let app = api::router()
        .layer(
            CorsLayer::new()
                .allow_headers(Any)
                .allow_methods([Method::GET, Method::POST, Method::PATCH])
                .allow_origin(allowed_origins),
        )
        .with_provider(provider);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Shutting down...");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("cannot listen for shutdown signal: {e}");
    }
}
