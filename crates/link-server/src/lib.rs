//! link-server
//!
//! Scripted trade partner for a link-cable game, served over a Unix
//! socket. Each connected emulator gets its own trade session.

pub mod channel;
pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod stage;
pub mod trader;
pub mod traffic_log;
pub mod types;

pub use channel::{ByteChannel, NO_DATA};
pub use client::LinkClient;
pub use config::Config;
pub use error::ServerError;
pub use server::LinkServer;
pub use stage::{Stage, StageKind, Transition};
pub use trader::Trader;
pub use traffic_log::TrafficLog;
pub use types::{ClientHandle, ClientId, ClientIdGenerator, ClientRegistry};
