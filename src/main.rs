mod client;
mod config;
mod feed;
mod routes;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::FeedClient;
use crate::config::Config;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spotlight_news=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load("spotlight.toml")?;
    let feed_url = std::env::var("FEED_URL").unwrap_or_else(|_| config.feed_url.clone());
    info!("Serving feed from {}", feed_url);

    // Create app state
    let state = Arc::new(AppState {
        client: FeedClient::new(feed_url),
        site_title: config.site_title.clone(),
    });

    // Build router
    let app = Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server starting on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
