mod config;
mod routes;
mod services;
mod state;

use std::process::ExitCode;

use config::{RelayError, ServerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "relay stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), RelayError> {
    let config = ServerConfig::from_env()?;
    let state = state::AppState::new();
    let app = routes::app(state, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| RelayError::Bind { addr: addr.clone(), source })?;

    tracing::info!(port = config.port, static_dir = %config.static_dir.display(), "airboard relay listening");
    axum::serve(listener, app).await.map_err(RelayError::Serve)
}
