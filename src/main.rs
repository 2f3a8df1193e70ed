use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, Router};
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::Database;
use std::net::SocketAddr;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use artisan_gallery::{
    config::Config,
    handlers,
    session::{session_layer, RedisSessionStore},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artisan_gallery=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Artisan Gallery...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Connected to database");

    // Run migrations
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations completed");

    // Connect to Redis for sessions
    let redis_client = redis::Client::open(config.redis_url.as_str())?;
    let redis_conn = redis_client.get_connection_manager().await?;
    let session_store = RedisSessionStore::new(redis_conn);
    tracing::info!("Connected to Redis session store");

    tokio::fs::create_dir_all(&config.media_root)
        .await
        .with_context(|| format!("Could not create media root {}", config.media_root))?;

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .context("SERVER_HOST and SERVER_PORT must form a valid socket address")?;

    // Initialize application state
    let state = AppState::new(db, config);

    // Build application routes
    let app = create_router(state, session_store);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await?;

    Ok(())
}

fn create_router(state: AppState, session_store: RedisSessionStore) -> Router {
    let media_root = state.media.root().to_path_buf();
    let max_upload_bytes = state.config.max_upload_bytes;
    let sessions = session_layer(session_store, &state.config);

    Router::new()
        // HTML pages and JSON story endpoints
        .merge(handlers::routes().layer(sessions))

        // Static assets and uploaded images
        .nest_service("/static", ServeDir::new("static"))
        .nest_service("/media", ServeDir::new(media_root))

        // Middleware
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
