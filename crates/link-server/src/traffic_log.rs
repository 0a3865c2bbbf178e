//! Raw per-connection byte dumps.
//!
//! Each connection gets two append-only files next to a common prefix:
//!
//! ```text
//! <prefix>_<id>_read.dat   bytes received from the peer
//! <prefix>_<id>_write.dat  bytes sent to the peer
//! ```
//!
//! The files are never read back by the server.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::types::ClientId;

#[derive(Debug)]
pub struct TrafficLog {
    inbound: File,
    outbound: File,
}

impl TrafficLog {
    /// Create (or truncate) both files for `id`.
    pub async fn create(prefix: &Path, id: ClientId) -> io::Result<Self> {
        if let Some(dir) = prefix.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await?;
        }

        let (read_path, write_path) = Self::paths(prefix, id);

        Ok(TrafficLog {
            inbound: File::create(read_path).await?,
            outbound: File::create(write_path).await?,
        })
    }

    /// Where the inbound and outbound dumps for `id` live.
    pub fn paths(prefix: &Path, id: ClientId) -> (PathBuf, PathBuf) {
        let base = format!("{}_{}", prefix.display(), id);
        (
            PathBuf::from(format!("{}_read.dat", base)),
            PathBuf::from(format!("{}_write.dat", base)),
        )
    }

    pub async fn record_inbound(&mut self, b: u8) {
        if let Err(e) = append(&mut self.inbound, b).await {
            warn!("traffic log (read): {}", e);
        }
    }

    pub async fn record_outbound(&mut self, b: u8) {
        if let Err(e) = append(&mut self.outbound, b).await {
            warn!("traffic log (write): {}", e);
        }
    }
}

async fn append(file: &mut File, b: u8) -> io::Result<()> {
    file.write_all(&[b]).await?;
    file.flush().await
}
