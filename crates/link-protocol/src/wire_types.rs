//! Link-cable byte codes and fixed sequences.
//!
//! This module defines:
//! - the single-byte codes exchanged during the handshake and trade menu,
//! - the multi-byte sequences that mark phase boundaries,
//! - the constants of the patch list side channel.
//!
//! The patch list encode/decode logic lives in `patch_list`, the trade
//! block layout in `trade_codec`.

/// Sent by the side that clocks the link.
pub const LEAD: u8 = 0x01;

/// Sent by the clocked side. This trade partner always follows.
pub const FOLLOW: u8 = 0x02;

/// Both sides are in the link room.
pub const CONNECTED: u8 = 0x60;

/// Synchronization byte repeated at every phase boundary.
pub const PREAMBLE: u8 = 0xFD;

/// Trade menu: first party slot. Shares its value with [`CONNECTED`].
pub const SELECT_FIRST_SLOT: u8 = 0x60;

/// Trade menu: last party slot.
pub const SELECT_LAST_SLOT: u8 = 0x66;

pub const DEAL_REJECT: u8 = 0x61;
pub const DEAL_ACCEPT: u8 = 0x62;

/// Trade menu: the player backed out.
pub const CANCEL: u8 = 0x6F;

/// Ends the Connect phase; the random seed exchange follows.
pub const CONNECT_HANDSHAKE: [u8; 10] = [PREAMBLE; 10];

/// Ends the seed exchange; the trade block follows.
pub const SEED_HANDSHAKE: [u8; 9] = [PREAMBLE; 9];

/// Ends the trade block; the patch list follows.
pub const PATCH_LIST_HANDSHAKE: [u8; 13] = [
    PREAMBLE, PREAMBLE, PREAMBLE, PREAMBLE, PREAMBLE, PREAMBLE, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// The peer declined the offer.
pub const REJECT_PAIR: [u8; 2] = [DEAL_REJECT, 0x00];

/// The peer confirmed the trade.
pub const ACCEPT_PAIR: [u8; 2] = [DEAL_ACCEPT, 0x00];

/// Payload value the link reserves for "patch here". A payload byte with
/// this value is sent as [`PATCH_MARKER`] and listed in the patch list.
pub const SENTINEL: u8 = 0xFE;

/// Filler for neutralized payload bytes, and the patch list's
/// page-switch / end marker.
pub const PATCH_MARKER: u8 = 0xFF;

/// Number of payload bytes covered by the first patch list page.
pub const PATCH_PAGE_SIZE: usize = 0xFC;

/// Size of the patch list on the wire.
pub const PATCH_LIST_LEN: usize = 190;

/// True if `b` picks a party slot in the trade menu.
pub fn is_slot_selection(b: u8) -> bool {
    (SELECT_FIRST_SLOT..=SELECT_LAST_SLOT).contains(&b)
}
