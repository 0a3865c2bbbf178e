//! Unix-socket implementation of [`ByteChannel`].

use std::io;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::UnixStream;
use tokio::sync::{oneshot, Notify};
use tracing::{debug, error, warn};

use crate::channel::{ByteChannel, NO_DATA};
use crate::traffic_log::TrafficLog;
use crate::types::ClientId;

/// One peer connected over the link socket.
///
/// Created by [`ClientRegistry::register`](crate::types::ClientRegistry::register).
/// Dropping the client, or its first transport failure, fires the death
/// signal handed out at registration.
#[derive(Debug)]
pub struct LinkClient {
    id: ClientId,
    reader: OwnedReadHalf,
    writer: OwnedWriteHalf,
    dead: bool,
    death: Option<oneshot::Sender<()>>,
    close: Arc<Notify>,
    traffic: Option<TrafficLog>,
}

impl LinkClient {
    pub(crate) fn new(
        id: ClientId,
        stream: UnixStream,
        death: oneshot::Sender<()>,
        close: Arc<Notify>,
    ) -> Self {
        let (reader, writer) = stream.into_split();

        LinkClient {
            id,
            reader,
            writer,
            dead: false,
            death: Some(death),
            close,
            traffic: None,
        }
    }

    /// Mirror every byte read and written into `log`.
    pub fn attach_traffic_log(&mut self, log: TrafficLog) {
        self.traffic = Some(log);
    }

    fn die(&mut self) {
        if self.dead {
            return;
        }

        self.dead = true;

        if let Some(death) = self.death.take() {
            let _ = death.send(());
        }
    }
}

fn closed_by_server() -> io::Error {
    io::Error::new(io::ErrorKind::ConnectionAborted, "closed by server")
}

impl ByteChannel for LinkClient {
    async fn read(&mut self) -> u8 {
        if self.dead {
            warn!(client = %self.id, "reading from dead connection");
            return NO_DATA;
        }

        let result = tokio::select! {
            r = self.reader.read_u8() => r,
            _ = self.close.notified() => Err(closed_by_server()),
        };

        match result {
            Ok(b) => {
                debug!(client = %self.id, byte = b, "recv");
                if let Some(log) = self.traffic.as_mut() {
                    log.record_inbound(b).await;
                }
                b
            }
            Err(e) => {
                error!(client = %self.id, "read: {}", e);
                self.die();
                NO_DATA
            }
        }
    }

    async fn write(&mut self, b: u8) {
        if self.dead {
            warn!(client = %self.id, "writing to dead connection");
            return;
        }

        let result = tokio::select! {
            r = self.writer.write_u8(b) => r,
            _ = self.close.notified() => Err(closed_by_server()),
        };

        match result {
            Ok(()) => {
                debug!(client = %self.id, byte = b, "send");
                if let Some(log) = self.traffic.as_mut() {
                    log.record_outbound(b).await;
                }
            }
            Err(e) => {
                error!(client = %self.id, "write: {}", e);
                self.die();
            }
        }
    }

    fn is_alive(&self) -> bool {
        !self.dead
    }

    fn id(&self) -> ClientId {
        self.id
    }
}
