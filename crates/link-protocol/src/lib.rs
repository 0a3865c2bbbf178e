//! link-protocol
//!
//! Wire-level encoding/decoding for the link-cable trade.
//!
//! This crate is responsible for turning the logical trade data
//! (`link_core::TradeBlock`) into the exact bytes the game expects, and
//! for the side channel that carries sentinel collisions.
//!
//! - [`wire_types`]  : byte codes and fixed handshake sequences
//! - [`patch_list`]  : 190-byte patch list codec
//! - [`trade_codec`] : fixed-layout trade block serializer

pub mod wire_types;
pub mod patch_list;
pub mod trade_codec;

pub use patch_list::{PatchError, PatchListData, PatchOffsets, MAX_PATCH_OFFSET};
pub use trade_codec::{
    decode_party_data, decode_trade_block, encode_party_data, encode_trade_block,
    patch_trade_block, PatchedTradeBlock, ProtocolError, PARTY_DATA_LEN, TRADE_BLOCK_LEN,
};
