//! # Mailing API
//!
//! The web server of the mailing service. It exposes two REST
//! collections under `/v1/`: write-only `client` and full-CRUD
//! `notification`.
//!
//! ## Architecture
//!
//! - **Routes**: URL structure and allowed methods per collection
//! - **Handlers**: extract requests and call the core services
//! - **Middleware**: mapping of domain errors to HTTP responses
//! - **Config**: environment-driven server settings
//!
//! Business rules live in `mailing-core`; persistence in `mailing-db`.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::{Result, WrapErr};
use mailing_core::services::{client::ClientService, notification::NotificationService};
use mailing_db::{DbPool, PgStore};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// Handlers only see the services; which store backs them is decided
/// when the state is built.
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(ApiState::from_store(Arc::new(PgStore::new(db_pool))));
/// let app = build_router(state);
/// ```
#[derive(Clone)]
pub struct ApiState {
    pub clients: ClientService,
    pub notifications: NotificationService,
}

impl ApiState {
    pub fn new(clients: ClientService, notifications: NotificationService) -> Self {
        Self {
            clients,
            notifications,
        }
    }

    /// Wires every service to the same PostgreSQL store.
    pub fn from_store(store: Arc<PgStore>) -> Self {
        Self::new(
            ClientService::new(store.clone()),
            NotificationService::new(store.clone(), store.clone(), store),
        )
    }
}

/// Builds the application router with all routes and shared state attached
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Client endpoints
        .merge(routes::client::routes())
        // Notification endpoints
        .merge(routes::notification::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// Installs the global tracing subscriber, builds the router with CORS,
/// timeout and request tracing layers, and serves until the process is
/// stopped.
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::from_store(Arc::new(PgStore::new(db_pool))));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .wrap_err_with(|| format!("Invalid CORS origin: {origin}"))
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    let app = app
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
        .layer(TraceLayer::new_for_http());

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
