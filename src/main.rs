use anyhow::{Context, Result};
use axum::extract::Request;
use axum::{middleware, ServiceExt};
use std::sync::Arc;
use tower::Layer;
use tracing::info;

use locale_gateway::config::Config;
use locale_gateway::i18n::{TranslationSource, TranslationStore};
use locale_gateway::server::AppState;
use locale_gateway::{routing, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_gateway=info".parse()?),
        )
        .init();

    info!("Starting locale gateway");

    // Load configuration from environment
    let config = Arc::new(Config::from_env()?);

    // Pick the translation source: a remote endpoint wins over the directory
    let source = match &config.translations_url {
        Some(url) => TranslationSource::remote(url.clone())?,
        None => TranslationSource::directory(&config.locales_dir),
    };
    info!("Serving translations from {}", source.describe());

    let store = Arc::new(TranslationStore::new(source));

    // Warm the cache for every registered locale; failures are logged and
    // retried on demand by the per-request fallback chain
    info!("Warming translation cache");
    store.warm().await;

    let state = AppState {
        config: Arc::clone(&config),
        store,
    };

    // The locale middleware wraps the router itself: the URI rewrite has to
    // run before route matching
    let app = middleware::from_fn(routing::locale_routing).layer(server::router(state));

    let address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on {}", address);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .await
        .context("Server exited with an error")?;

    Ok(())
}
