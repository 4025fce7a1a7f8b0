//! Blog Publishing Service - Main Application Entry Point
//!
//! This is a REST API server for a basic blogging platform. It provides
//! author registration and login, plus authenticated CRUD on blog posts
//! with ownership enforcement and soft deletion.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: Signed, time-limited identity tokens (HS256)
//!   carried in the `x-api-key` header
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;
mod state;
mod validators;

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::{services::token_service::TokenService, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    // The signing secret is fixed for the process lifetime
    let state = AppState {
        pool,
        tokens: TokenService::new(&config.jwt_secret, config.token_ttl_hours),
    };

    // Create authenticated routes (blog mutations)
    let authenticated_routes = Router::new()
        .route("/blogs", post(handlers::blogs::create_blog))
        .route("/blogs/{blog_id}", put(handlers::blogs::update_blog))
        .route(
            "/blogs/{blog_id}",
            delete(handlers::blogs::delete_blog_by_id),
        )
        .route("/blogs", delete(handlers::blogs::delete_blogs_by_query))
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    // Combine authenticated routes with public routes
    let app = Router::new()
        // Public routes (no authentication required)
        .route("/health", get(handlers::health::health_check))
        .route("/authors", post(handlers::authors::register_author))
        .route("/login", post(handlers::authors::login_author))
        .route("/blogs", get(handlers::blogs::list_blogs))
        // Merge authenticated routes
        .merge(authenticated_routes)
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Share state (pool + token service) with all handlers
        .with_state(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
