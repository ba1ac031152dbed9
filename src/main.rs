//! PlacementOps Backend
//!
//! REST backend for coordinating placement/internship outreach: roster
//! loading, per-student application links, a backend-described dynamic form,
//! and a password-gated operator dashboard. All persistence lives in an
//! external spreadsheet-automation backend reached over HTTP.

mod api;
mod auth;
mod config;
mod errors;
mod forms;
mod gateway;
mod models;
mod outreach;
mod registry;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use gateway::SheetGateway;
use outreach::Outreach;
use registry::HashRegistry;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<SheetGateway>,
    pub registry: Arc<HashRegistry>,
    pub outreach: Arc<Outreach>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gateway = Arc::new(SheetGateway::new(config.sheet_api_url.clone()));
        let registry = Arc::new(HashRegistry::new(gateway.clone()));
        let outreach = Arc::new(Outreach::new(
            gateway.clone(),
            registry.clone(),
            config.public_origin.clone(),
        ));
        Self {
            gateway,
            registry,
            outreach,
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting PlacementOps Backend");
    tracing::info!("Sheet API URL: {}", config.sheet_api_url);
    tracing::info!("Public origin: {}", config.public_origin);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.sheet_api_url.is_empty() {
        tracing::warn!("No sheet API URL configured (PLACEMENT_SHEET_API_URL). Remote calls will fail!");
    }
    if config.login_password.is_none() {
        tracing::warn!(
            "No operator password configured (PLACEMENT_LOGIN_PASSWORD). Dashboard gate is disabled!"
        );
    }

    let bind_addr = config.bind_addr;
    let state = AppState::new(config);

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let gate_enabled = state.config.login_password.is_some();

    let api_routes = Router::new()
        // Session gate
        .route("/auth", post(api::login))
        // Token mappings
        .route("/hash", post(api::get_or_create_hash))
        // Thin spreadsheet proxy
        .route("/sheets", get(api::sheets_get).post(api::sheets_post))
        // Public apply flow
        .route("/apply/{hash}", get(api::get_apply).post(api::submit_apply))
        // Operator dashboard
        .route("/dashboard/roster", post(api::load_roster))
        .route("/dashboard/roster/{company}", get(api::roster_snapshot))
        .route("/dashboard/send", post(api::send_invite))
        // Coordinator send-links utility (public, shares the dashboard handlers)
        .route("/send-links/roster", post(api::load_roster))
        .route("/send-links/send", post(api::send_invite));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        // Session gate classifies public vs. protected paths itself
        .layer(middleware::from_fn(move |req, next| {
            auth::session_gate_layer(gate_enabled, req, next)
        }))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
