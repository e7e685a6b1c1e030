//! Farm Advisor - Backend Server
//!
//! Serves crop recommendations, cultivation plans, irrigation advice and
//! weather to the farming dashboard, and fans changes out over in-process
//! live channels.

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
use services::{ChannelRegistry, CropAdvisorService, WeatherService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub advisor: CropAdvisorService,
    pub weather: WeatherService,
    pub realtime: ChannelRegistry,
}

impl AppState {
    /// Build the services described by `config`
    pub fn new(config: Config) -> Self {
        let realtime = ChannelRegistry::new(config.realtime.channel_capacity);
        let advisor = CropAdvisorService::new(&config.advisor, realtime.clone());
        let weather = WeatherService::new(&config.weather, realtime.clone());

        Self {
            config: Arc::new(config),
            advisor,
            weather,
            realtime,
        }
    }
}

/// Install the global tracing subscriber
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "farm_advisor_server=debug,farm_advisor_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root(State(state): State<AppState>) -> String {
    format!(
        "Farm Advisor API v{} ({})",
        env!("CARGO_PKG_VERSION"),
        state.config.environment
    )
}
