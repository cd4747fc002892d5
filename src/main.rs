use dotenvy::dotenv;
use lambda_runtime::{run, service_fn};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod common;
mod config;
mod infrastructure;
mod modules;
mod state;

use config::env::{EnvKey, EnvVars};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_current_span(false)
        .init();

    info!("Starting job submitter...");

    let region = EnvVars::from_process().get(EnvKey::Region).map(str::to_string);
    let state = state::AppState::from_aws(region).await;

    run(service_fn(|event| app::function_handler(&state, event)))
        .await
        .map_err(|e| anyhow::anyhow!("lambda runtime stopped: {}", e))
}
