use std::{net::SocketAddr, path::PathBuf, process::ExitCode, sync::Arc};

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wayfriend_server::{AppState, Overrides, ServerConfig, ServerError, build_router};

#[derive(Debug, Parser)]
#[command(name = "wayfriend-server", version, about = "Route step synthesis and backend proxy")]
struct Args {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long)]
    listen: Option<SocketAddr>,

    /// Base URL of the routing backend.
    #[arg(long, env = "BACKEND_URL")]
    backend_url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server terminated");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), ServerError> {
    let config = ServerConfig::load(args.config.as_deref())?.apply(Overrides {
        listen: args.listen,
        backend_url: args.backend_url,
    })?;

    let listen = config.listen;
    info!(
        %listen,
        backend = %config.backend_url,
        locale = %config.locale,
        "starting wayfriend server"
    );

    let app = build_router(Arc::new(AppState::new(config)?));
    let listener = TcpListener::bind(listen).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
