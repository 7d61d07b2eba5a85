use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::embed::EmbedResolver;
use anyhow::{Context, Result};
use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;

pub mod cors;
pub mod routes_catalog;
pub mod routes_embed;

/// Shared application context.
///
/// Everything here is read-only after startup; handlers clone the `Arc`s.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub catalog: Arc<CatalogClient>,
    pub embed: Arc<EmbedResolver>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self {
            catalog: Arc::new(CatalogClient::new(&config.catalog)),
            embed: Arc::new(EmbedResolver::new(&config.embed)),
            config: Arc::new(config),
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = cors::cors_layer(&ctx.config.server);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/tmdb", routes_catalog::catalog_routes())
        .nest("/vidsrc", routes_embed::embed_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Welcome to the AnyVod API" }))
}

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let ctx = AppContext::new(config);
    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
