//! Per-Pokémon party record.

use crate::species_type::SpeciesType;
use crate::stats::{EffortValues, Stats};
use crate::status::StatusCondition;

/// One party member as it appears in the trade block.
///
/// Field order matches the wire layout; the serializer in
/// `link-protocol` walks the fields top to bottom.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PartyData {
    /// Internal species index (not the Pokédex number).
    pub species: u8,
    pub hp: u16,
    pub level: u8,
    pub status: StatusCondition,
    pub type1: SpeciesType,
    pub type2: SpeciesType,
    pub catch_rate: u8,
    pub moves: [u8; 4],
    pub original_trainer_id: u16,
    /// 24-bit big-endian experience counter.
    pub experience: [u8; 3],
    pub effort_values: EffortValues,
    /// Packed individual values (4 bits per stat).
    pub individual_values: u16,
    pub move_pp: [u8; 4],
    /// The level is stored a second time here; the game reads both.
    pub level_copy: u8,
    pub stats: Stats,
}

impl PartyData {
    /// Experience counter as a number.
    pub fn experience_points(&self) -> u32 {
        let [hi, mid, lo] = self.experience;
        u32::from_be_bytes([0, hi, mid, lo])
    }
}
