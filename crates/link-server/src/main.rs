//! Link-cable trade partner listening on a Unix socket.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use link_server::config::{parse_traffic_log, Config};
use link_server::LinkServer;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "link-server")]
#[command(about = "Scripted link-cable trade partner for an emulated handheld")]
struct Cli {
    /// Unix socket path (overrides LINK_SOCKET_PATH)
    #[arg(short, long)]
    socket: Option<PathBuf>,

    /// Prefix for raw per-connection byte dumps (overrides LINK_TRAFFIC_LOG)
    #[arg(long)]
    traffic_log: Option<String>,

    /// Do not write raw byte dumps
    #[arg(long, conflicts_with = "traffic_log")]
    no_traffic_log: bool,

    /// Maximum simultaneous connections (overrides LINK_MAX_CLIENTS)
    #[arg(short, long)]
    max_clients: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(socket) = &self.socket {
            config.socket_path = socket.clone();
        }
        if let Some(prefix) = &self.traffic_log {
            config.traffic_log = parse_traffic_log(prefix);
        }
        if self.no_traffic_log {
            config.traffic_log = None;
        }
        if let Some(max) = self.max_clients {
            config.max_clients = max;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = cli.apply(Config::from_env()?);

    info!(
        "starting link-server on {} (max_clients = {}, traffic log = {:?})",
        config.socket_path.display(),
        config.max_clients,
        config.traffic_log
    );

    let server = LinkServer::bind(config).context("binding link socket")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let server_task = tokio::spawn(server.run(shutdown_rx));

    wait_for_interrupt().await?;
    info!("interrupted, shutting down");

    let _ = shutdown_tx.send(true);
    server_task.await??;

    Ok(())
}

async fn wait_for_interrupt() -> Result<()> {
    let mut term = signal(SignalKind::terminate())?;

    tokio::select! {
        res = tokio::signal::ctrl_c() => res?,
        _ = term.recv() => {}
    }

    Ok(())
}
