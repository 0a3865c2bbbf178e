//! Unix-socket listener and top-level server wiring.
//!
//! This module:
//! - Listens on the configured socket path.
//! - Accepts new connections from emulator instances.
//! - Registers each one in the `ClientRegistry`, which assigns its id.
//! - Spawns, per connection:
//!   - a liveness monitor that closes and unregisters the client,
//!   - a `Trader` that runs the trade protocol over it.
//!
//! Connection tasks share nothing but the registry.

use std::io;
use std::path::PathBuf;

use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{oneshot, watch};
use tracing::{error, info, warn};

use crate::channel::ByteChannel;
use crate::config::Config;
use crate::error::ServerError;
use crate::trader::Trader;
use crate::traffic_log::TrafficLog;
use crate::types::{ClientId, ClientRegistry};

/// A bound, not yet running, link server.
#[derive(Debug)]
pub struct LinkServer {
    listener: UnixListener,
    socket_path: PathBuf,
    traffic_log: Option<PathBuf>,
    max_clients: usize,
    registry: ClientRegistry,
}

impl LinkServer {
    /// Bind the socket, replacing a stale socket file if one is left over.
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind(config: Config) -> Result<Self, ServerError> {
        Self::bind_with_registry(config, ClientRegistry::new())
    }

    pub fn bind_with_registry(
        config: Config,
        registry: ClientRegistry,
    ) -> Result<Self, ServerError> {
        if let Err(e) = std::fs::remove_file(&config.socket_path) {
            if e.kind() != io::ErrorKind::NotFound {
                return Err(e.into());
            }
        }

        let listener = UnixListener::bind(&config.socket_path)?;
        info!(path = %config.socket_path.display(), "listening for connections ...");

        Ok(LinkServer {
            listener,
            socket_path: config.socket_path,
            traffic_log: config.traffic_log,
            max_clients: config.max_clients,
            registry,
        })
    }

    pub fn registry(&self) -> ClientRegistry {
        self.registry.clone()
    }

    /// Accept connections until `shutdown` flips to `true` (or its sender
    /// goes away), then close every client and remove the socket file.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> Result<(), ServerError> {
        let result = loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break Ok(());
                    }
                }
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, _addr)) => self.admit(stream, &shutdown).await,
                        Err(e) => {
                            error!("accept: {}", e);
                            break Err(e.into());
                        }
                    }
                }
            }
        };

        info!("closing server ...");
        self.registry.close_all().await;

        if let Err(e) = std::fs::remove_file(&self.socket_path) {
            warn!(path = %self.socket_path.display(), "removing socket file: {}", e);
        }
        info!("server closed.");

        result
    }

    async fn admit(&self, stream: UnixStream, shutdown: &watch::Receiver<bool>) {
        info!("client connecting ...");

        let current_clients = self.registry.len().await;
        if current_clients >= self.max_clients {
            warn!(
                "rejecting connection: max_clients ({}) reached",
                self.max_clients
            );
            // Just drop the stream; the peer sees the connection close.
            return;
        }

        let (mut client, death) = self.registry.register(stream).await;
        let id = client.id();
        info!(client = %id, "client connected.");

        tokio::spawn(watch_liveness(
            self.registry.clone(),
            id,
            death,
            shutdown.clone(),
        ));

        if let Some(prefix) = &self.traffic_log {
            match TrafficLog::create(prefix, id).await {
                Ok(log) => client.attach_traffic_log(log),
                Err(e) => {
                    // Dropping the client fires its death signal.
                    error!(client = %id, "cannot open traffic log: {}", e);
                    return;
                }
            }
        }

        tokio::spawn(async move {
            Trader::new(client).run().await;
        });
    }
}

/// Wait until the server shuts down or the client dies, then close the
/// client and drop it from the registry.
async fn watch_liveness(
    registry: ClientRegistry,
    id: ClientId,
    death: oneshot::Receiver<()>,
    mut shutdown: watch::Receiver<bool>,
) {
    let shutting_down = async {
        while !*shutdown.borrow_and_update() {
            if shutdown.changed().await.is_err() {
                break;
            }
        }
    };

    tokio::select! {
        _ = shutting_down => info!(client = %id, "server shutting down"),
        _ = death => info!(client = %id, "client is dead."),
    }

    registry.close_and_remove(id).await;
}
