//! link-core
//!
//! Pure trade data model for the link-cable trade partner:
//! - in-game text encoding and fixed-width names
//! - status conditions and elemental types
//! - per-Pokémon party records and stats
//! - the trade block exchanged during a trade, plus the scripted offer

pub mod error;
pub mod text;
pub mod status;
pub mod species_type;
pub mod stats;
pub mod party;
pub mod trade_block;

pub use error::TextError;
pub use text::{decode_char, encode_char, Name, NAME_LEN, TEXT_TERMINATOR};
pub use status::StatusCondition;
pub use species_type::SpeciesType;
pub use stats::{EffortValues, Stats};
pub use party::PartyData;
pub use trade_block::{TradeBlock, PARTY_LIST_END, PARTY_MEMBERS_LEN, PARTY_SLOTS};
