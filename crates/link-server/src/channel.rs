//! The byte-level view of a peer that the trade logic runs against.

use std::future::Future;

use crate::types::ClientId;

/// Value returned by [`ByteChannel::read`] once the channel has failed.
pub const NO_DATA: u8 = 0x00;

/// A full-duplex link to one peer, one byte at a time.
///
/// Transport failures never surface as errors: the channel marks itself
/// dead, reads return [`NO_DATA`] and writes are dropped. Callers poll
/// [`is_alive`](ByteChannel::is_alive) to notice.
pub trait ByteChannel {
    /// Wait for the next byte from the peer.
    fn read(&mut self) -> impl Future<Output = u8> + Send;

    /// Send one byte to the peer.
    fn write(&mut self, b: u8) -> impl Future<Output = ()> + Send;

    fn is_alive(&self) -> bool;

    fn id(&self) -> ClientId;
}
