//! Development proxy entrypoint.

use clap::Parser;
use pasteprobe_proxy::{serve, ProxyConfig, ProxyState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "pasteprobe-proxy",
    about = "Serve a pastebin backend's API and viewer routes from one local origin",
    version
)]
struct Args {
    /// Listen address (can also be set via PASTEPROBE_PROXY_BIND)
    #[arg(short, long, env = "PASTEPROBE_PROXY_BIND")]
    bind: Option<SocketAddr>,

    /// Upstream origin (defaults to PASTEPROBE_SERVER or http://localhost:8787)
    #[arg(short, long, env = "PASTEPROBE_UPSTREAM")]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pasteprobe_proxy=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = ProxyConfig::from_env()
        .with_bind(args.bind)
        .with_upstream(args.upstream);
    let state = ProxyState::new(&config.upstream)?;

    if !config.bind.ip().is_loopback() {
        tracing::warn!(
            "Binding to non-localhost address: {} - upstream is reachable from the network",
            config.bind
        );
    }

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    let actual_addr = listener.local_addr().unwrap_or(config.bind);
    tracing::info!(
        "PasteProbe proxy running at http://{} -> {}",
        actual_addr,
        state.upstream()
    );

    serve(listener, state, shutdown_signal()).await?;
    tracing::info!("proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
