//! Binary encoding/decoding of the trade block.
//!
//! Every field is written in declaration order, big-endian, with no
//! padding, so the block always serializes to [`TRADE_BLOCK_LEN`] bytes:
//!
//! ```text
//! TradeBlock
//! ----------
//! [0..11]     trainer name
//! [11]        party size
//! [12..19]    party members (6 species indices + 0xFF)
//! [19..283]   6 x PartyData (44 bytes each)
//! [283..349]  6 x original trainer name (11 bytes each)
//! [349..415]  6 x nickname (11 bytes each)
//!
//! PartyData
//! ---------
//! [0]      species
//! [1..3]   hp (u16 BE)
//! [3]      level
//! [4]      status
//! [5]      type 1
//! [6]      type 2
//! [7]      catch rate
//! [8..12]  moves
//! [12..14] original trainer id (u16 BE)
//! [14..17] experience (u24 BE)
//! [17..27] effort values (5 x u16 BE)
//! [27..29] individual values (u16 BE)
//! [29..33] move pp
//! [33]     level (again)
//! [34..44] stats (5 x u16 BE)
//! ```
//!
//! The outbound flow only needs [`patch_trade_block`]; decoding is here so
//! a peer's block can be inspected.

use bytes::{Buf, BufMut};
use link_core::{
    EffortValues, Name, PartyData, SpeciesType, Stats, StatusCondition, TradeBlock, NAME_LEN,
    PARTY_MEMBERS_LEN, PARTY_SLOTS,
};
use thiserror::Error;

use crate::patch_list::{PatchError, PatchListData, PatchOffsets};

/// Serialized size of one party record.
pub const PARTY_DATA_LEN: usize = 44;

/// Serialized size of a full trade block.
pub const TRADE_BLOCK_LEN: usize =
    NAME_LEN + 1 + PARTY_MEMBERS_LEN + PARTY_SLOTS * PARTY_DATA_LEN + 2 * PARTY_SLOTS * NAME_LEN;

/// Errors that can arise when encoding/decoding a trade block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Buffer too short for the fixed layout.
    #[error("buffer truncated: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// The encoder produced a block of the wrong size.
    #[error("trade block serialized to {actual} bytes, layout requires {expected}")]
    LayoutMismatch { expected: usize, actual: usize },

    /// The sentinel positions could not be expressed as a patch list.
    #[error("patch list: {0}")]
    Patch(#[from] PatchError),
}

/// A trade block ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedTradeBlock {
    /// Plain serialization.
    pub raw: Vec<u8>,
    /// `raw` with every sentinel replaced by the marker byte; this is what
    /// goes on the wire.
    pub patched: Vec<u8>,
    /// Where the sentinels were.
    pub offsets: PatchOffsets,
    /// `offsets` in wire form, sent after the trade block.
    pub patch_list: PatchListData,
}

// ============================================================================
// ENCODE
// ============================================================================

/// Encode a trade block.
///
/// The encoded bytes are appended to `out`.
pub fn encode_trade_block(block: &TradeBlock, out: &mut Vec<u8>) {
    out.reserve(TRADE_BLOCK_LEN);

    out.put_slice(block.trainer_name.as_bytes());
    out.put_u8(block.party_size);
    out.put_slice(&block.party_members);

    for member in &block.party {
        encode_party_data(member, out);
    }
    for name in &block.original_trainer_names {
        out.put_slice(name.as_bytes());
    }
    for name in &block.nicknames {
        out.put_slice(name.as_bytes());
    }
}

/// Encode one party record.
///
/// The encoded bytes are appended to `out`.
pub fn encode_party_data(p: &PartyData, out: &mut Vec<u8>) {
    out.put_u8(p.species);
    out.put_u16(p.hp);
    out.put_u8(p.level);
    out.put_u8(p.status.bits());
    out.put_u8(p.type1.as_u8());
    out.put_u8(p.type2.as_u8());
    out.put_u8(p.catch_rate);
    out.put_slice(&p.moves);
    out.put_u16(p.original_trainer_id);
    out.put_slice(&p.experience);
    put_stats(&p.effort_values.0, out);
    out.put_u16(p.individual_values);
    out.put_slice(&p.move_pp);
    out.put_u8(p.level_copy);
    put_stats(&p.stats, out);
}

/// Serialize `block`, neutralize sentinel collisions and build the
/// matching patch list.
pub fn patch_trade_block(block: &TradeBlock) -> Result<PatchedTradeBlock, ProtocolError> {
    let mut raw = Vec::with_capacity(TRADE_BLOCK_LEN);
    encode_trade_block(block, &mut raw);

    if raw.len() != TRADE_BLOCK_LEN {
        return Err(ProtocolError::LayoutMismatch {
            expected: TRADE_BLOCK_LEN,
            actual: raw.len(),
        });
    }

    let mut patched = raw.clone();
    let offsets = PatchOffsets::neutralize(&mut patched);
    let patch_list = offsets.encode()?;

    Ok(PatchedTradeBlock {
        raw,
        patched,
        offsets,
        patch_list,
    })
}

// ============================================================================
// DECODE
// ============================================================================

/// Decode a trade block. Bytes past [`TRADE_BLOCK_LEN`] are ignored.
pub fn decode_trade_block(bytes: &[u8]) -> Result<TradeBlock, ProtocolError> {
    check_len(bytes, TRADE_BLOCK_LEN)?;

    let mut buf = bytes;

    let trainer_name = get_name(&mut buf);
    let party_size = buf.get_u8();
    let mut party_members = [0u8; PARTY_MEMBERS_LEN];
    buf.copy_to_slice(&mut party_members);

    let mut party = [PartyData::default(); PARTY_SLOTS];
    for member in party.iter_mut() {
        *member = get_party_data(&mut buf);
    }

    let mut original_trainer_names = [Name::EMPTY; PARTY_SLOTS];
    for name in original_trainer_names.iter_mut() {
        *name = get_name(&mut buf);
    }

    let mut nicknames = [Name::EMPTY; PARTY_SLOTS];
    for name in nicknames.iter_mut() {
        *name = get_name(&mut buf);
    }

    Ok(TradeBlock {
        trainer_name,
        party_size,
        party_members,
        party,
        original_trainer_names,
        nicknames,
    })
}

/// Decode one party record. Bytes past [`PARTY_DATA_LEN`] are ignored.
pub fn decode_party_data(bytes: &[u8]) -> Result<PartyData, ProtocolError> {
    check_len(bytes, PARTY_DATA_LEN)?;
    let mut buf = bytes;
    Ok(get_party_data(&mut buf))
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn check_len(bytes: &[u8], expected: usize) -> Result<(), ProtocolError> {
    if bytes.len() < expected {
        return Err(ProtocolError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

fn put_stats(stats: &Stats, out: &mut Vec<u8>) {
    for value in stats.to_array() {
        out.put_u16(value);
    }
}

// Callers check the length up front; the getters below assume enough bytes.

fn get_stats(buf: &mut &[u8]) -> Stats {
    let mut values = [0u16; 5];
    for value in values.iter_mut() {
        *value = buf.get_u16();
    }
    Stats::from_array(values)
}

fn get_name(buf: &mut &[u8]) -> Name {
    let mut raw = [0u8; NAME_LEN];
    buf.copy_to_slice(&mut raw);
    Name(raw)
}

fn get_party_data(buf: &mut &[u8]) -> PartyData {
    let species = buf.get_u8();
    let hp = buf.get_u16();
    let level = buf.get_u8();
    let status = StatusCondition(buf.get_u8());
    let type1 = SpeciesType::from_u8(buf.get_u8());
    let type2 = SpeciesType::from_u8(buf.get_u8());
    let catch_rate = buf.get_u8();
    let mut moves = [0u8; 4];
    buf.copy_to_slice(&mut moves);
    let original_trainer_id = buf.get_u16();
    let mut experience = [0u8; 3];
    buf.copy_to_slice(&mut experience);
    let effort_values = EffortValues(get_stats(buf));
    let individual_values = buf.get_u16();
    let mut move_pp = [0u8; 4];
    buf.copy_to_slice(&mut move_pp);
    let level_copy = buf.get_u8();
    let stats = get_stats(buf);

    PartyData {
        species,
        hp,
        level,
        status,
        type1,
        type2,
        catch_rate,
        moves,
        original_trainer_id,
        experience,
        effort_values,
        individual_values,
        move_pp,
        level_copy,
        stats,
    }
}
