//! Action service server entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use action_api::{AppState, router as api_router};
use action_common::Config;
use action_core::{FollowService, LikeService, ShareService};
use action_db::cache::ActionCache;
use action_db::repositories::{FollowRepository, LikeRepository, ShareRepository};
use axum::Router;
use fred::prelude::*;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "action=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting action service...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = action_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    action_db::migrate(&db).await?;
    info!("Migrations completed");

    // Connect to Redis
    info!("Connecting to Redis...");
    let redis_config = fred::types::config::Config::from_url(&config.redis.url)?;
    let redis_client = fred::clients::Client::new(redis_config, None, None, None);
    redis_client.connect();
    redis_client.wait_for_connect().await?;
    let redis_client = Arc::new(redis_client);
    info!("Connected to Redis");

    let cache = ActionCache::with_ttl(
        redis_client,
        config.redis.prefix.clone(),
        Duration::from_secs(config.redis.ttl_secs.unsigned_abs()),
    );

    // Initialize repositories
    let db = Arc::new(db);
    let follow_repo = FollowRepository::with_cache(Arc::clone(&db), cache.clone());
    let like_repo = LikeRepository::with_cache(Arc::clone(&db), cache.clone());
    let share_repo = ShareRepository::with_cache(Arc::clone(&db), cache);

    // Initialize services
    let follow_service = FollowService::new(follow_repo);
    let like_service = LikeService::new(like_repo);
    let share_service = ShareService::new(share_repo);

    // Create app state
    let state = AppState {
        follow_service,
        like_service,
        share_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
