mod app;
mod config;
mod domain;
mod error;
mod logging;
mod pages;
mod routes;
mod services;

use anyhow::Result;
use std::sync::Arc;

use services::ProfileClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env)?;

    // Navigation path the page is opened at, e.g. /profile/<id>
    let path = std::env::args().nth(1).unwrap_or_else(|| "/profile".to_string());

    tracing::info!(
        env = ?settings.env,
        api_base_url = %settings.api_base_url,
        path = %path,
        "Starting profile page"
    );

    // Create profile service client
    let client = ProfileClient::new(
        &settings.api_base_url,
        settings.api_token.as_deref(),
        settings.api_timeout_seconds,
    )?;

    let state = app::AppState::new(settings.session_user.clone(), Arc::new(client), &path);

    app::run(&state, &path).await
}
