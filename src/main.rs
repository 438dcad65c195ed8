mod config;
mod routes;
mod services;
mod state;

use std::error::Error;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "layout-studio stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = config::ServerConfig::from_env()?;

    let store = services::store::FileLayoutStore::new(&config.layouts_dir);
    let state = state::AppState::new(store);

    if let Some(dir) = &config.static_dir {
        tracing::info!(dir = %dir.display(), "serving static assets");
    }
    let app = routes::app(state, config.static_dir.as_deref());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!(port = config.port, layouts_dir = %config.layouts_dir.display(), "layout-studio listening");
    axum::serve(listener, app).await?;
    Ok(())
}
