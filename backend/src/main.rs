//! Farm Advisor - Backend Server

use std::net::SocketAddr;

use farm_advisor_backend::{config::Config, create_app, init_tracing, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Farm Advisor Server");
    tracing::info!("Environment: {}", config.environment);

    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));

    // Create application state
    let state = AppState::new(config);
    tracing::info!(
        "Knowledge base loaded with {} crops",
        state.advisor.knowledge_base().len()
    );

    // Build application
    let app = create_app(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
