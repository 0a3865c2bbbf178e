//! Error types for the link server.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Binding, accepting or cleaning up the socket failed.
    #[error("socket: {0}")]
    Io(#[from] io::Error),

    /// An environment variable held an unusable value.
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidConfig {
        key: &'static str,
        value: String,
        reason: String,
    },
}
