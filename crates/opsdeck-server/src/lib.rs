mod args;
pub mod charts;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::ServerConfig;
use crate::state::AppState;

pub use args::Cli;

/// Resolve configuration (file, then environment, then flags), build the
/// shared state, and serve until shutdown.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ServerConfig::load_from(&cli.config)?;
    config.apply_env();
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let state = Arc::new(AppState::from_config(&config));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(
        bind = %config.bind,
        data_dir = %config.data_dir.display(),
        "opsdeck listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
