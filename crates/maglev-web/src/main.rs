//! maglev web server
//!
//! Run with: cargo run -p maglev-web -- --debug

use clap::Parser;
use maglev_common::AppConfig;
use maglev_web::cli::Cli;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    let default_filter = if config.server.debug {
        "maglev=debug,tower_http=debug,info"
    } else {
        "maglev=info,warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    info!("Starting maglev web server v{}", env!("CARGO_PKG_VERSION"));
    if config.server.debug {
        info!("Debug mode on");
    }

    let state = maglev_web::state::AppState::from_config(&config)?;
    let app = maglev_web::router::build_router(state);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
