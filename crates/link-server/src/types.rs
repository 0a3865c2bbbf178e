//! Shared types for the link server.
//!
//! This module defines:
//! - `ClientId`: a lightweight handle for connected peers
//! - `ClientIdGenerator`: where those ids come from
//! - `ClientHandle`: what the registry keeps to close a peer remotely
//! - `ClientRegistry`: the only state shared between connection tasks

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::net::UnixStream;
use tokio::sync::{oneshot, Notify, RwLock};
use tracing::info;

use crate::client::LinkClient;

/// Identifier for a connected peer.
///
/// This is intentionally opaque; we just guarantee uniqueness
/// over the lifetime of the registry that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Hands out increasing `ClientId`s, starting at 1.
#[derive(Debug)]
pub struct ClientIdGenerator {
    next: AtomicU64,
}

impl ClientIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        ClientIdGenerator {
            next: AtomicU64::new(first),
        }
    }

    pub fn next_id(&self) -> ClientId {
        ClientId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ClientIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Remote control for one connected peer.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    id: ClientId,
    close: Arc<Notify>,
}

impl ClientHandle {
    pub(crate) fn new(id: ClientId, close: Arc<Notify>) -> Self {
        ClientHandle { id, close }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Force the client closed. A read or write parked on its socket
    /// fails, and the client is marked dead.
    pub fn close(&self) {
        info!(client = %self.id, "closing client");
        self.close.notify_one();
    }
}

/// Registry of connected peers.
///
/// - Key: `ClientId`
/// - Value: `ClientHandle` to close that peer.
///
/// Cloning is cheap; all clones share the same map and id generator.
#[derive(Debug, Clone)]
pub struct ClientRegistry {
    clients: Arc<RwLock<HashMap<ClientId, ClientHandle>>>,
    ids: Arc<ClientIdGenerator>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::with_id_generator(ClientIdGenerator::new())
    }

    pub fn with_id_generator(ids: ClientIdGenerator) -> Self {
        ClientRegistry {
            clients: Arc::new(RwLock::new(HashMap::new())),
            ids: Arc::new(ids),
        }
    }

    /// Wrap `stream` in a client, record it, and return the client along
    /// with the signal that fires once it dies (or is dropped).
    pub async fn register(&self, stream: UnixStream) -> (LinkClient, oneshot::Receiver<()>) {
        let id = self.ids.next_id();
        let close = Arc::new(Notify::new());
        let (death_tx, death_rx) = oneshot::channel();

        let client = LinkClient::new(id, stream, death_tx, close.clone());

        {
            let mut guard = self.clients.write().await;
            guard.insert(id, ClientHandle::new(id, close));
        }

        (client, death_rx)
    }

    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.clients.read().await.is_empty()
    }

    pub async fn contains(&self, id: ClientId) -> bool {
        self.clients.read().await.contains_key(&id)
    }

    /// Close the client and forget it. Unknown ids are ignored.
    pub async fn close_and_remove(&self, id: ClientId) {
        let handle = {
            let mut guard = self.clients.write().await;
            guard.remove(&id)
        };

        if let Some(handle) = handle {
            handle.close();
            info!(client = %id, "client removed");
        }
    }

    /// Close every registered client. Entries are removed by their
    /// liveness monitors.
    pub async fn close_all(&self) {
        info!("closing all clients ...");

        let guard = self.clients.read().await;
        for handle in guard.values() {
            handle.close();
        }

        info!("all clients closed.");
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}
