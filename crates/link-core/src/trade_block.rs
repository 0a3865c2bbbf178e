//! The trade block: everything one side sends about its party.

use crate::party::PartyData;
use crate::species_type::SpeciesType;
use crate::stats::{EffortValues, Stats};
use crate::status::StatusCondition;
use crate::text::Name;

/// Number of party slots.
pub const PARTY_SLOTS: usize = 6;

/// Width of the party-member list: one species index per slot plus
/// the `0xFF` terminator.
pub const PARTY_MEMBERS_LEN: usize = PARTY_SLOTS + 1;

/// End of the party-member list.
pub const PARTY_LIST_END: u8 = 0xFF;

/// Full trade payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeBlock {
    pub trainer_name: Name,
    pub party_size: u8,
    /// Species index per occupied slot, terminated with `0xFF`.
    pub party_members: [u8; PARTY_MEMBERS_LEN],
    pub party: [PartyData; PARTY_SLOTS],
    pub original_trainer_names: [Name; PARTY_SLOTS],
    pub nicknames: [Name; PARTY_SLOTS],
}

impl Default for TradeBlock {
    fn default() -> Self {
        TradeBlock {
            trainer_name: Name::EMPTY,
            party_size: 0,
            party_members: [PARTY_LIST_END; PARTY_MEMBERS_LEN],
            party: [PartyData::default(); PARTY_SLOTS],
            original_trainer_names: [Name::EMPTY; PARTY_SLOTS],
            nicknames: [Name::EMPTY; PARTY_SLOTS],
        }
    }
}

impl TradeBlock {
    /// The fixed offer this trade partner always makes: a single
    /// level 5 Water-type Pokémon owned by trainer "A".
    ///
    /// Unused name bytes are filled with [`TEXT_TERMINATOR`](crate::TEXT_TERMINATOR) and unused
    /// member slots with `0xFF`, as a cartridge pads them. These bytes are
    /// never zero.
    pub fn scripted_offer() -> Self {
        const SPECIES: u8 = 0x85;

        let trainer = Name::from_text("A").unwrap_or_default();

        let mut block = TradeBlock {
            trainer_name: trainer,
            party_size: 1,
            ..TradeBlock::default()
        };

        block.party_members[0] = SPECIES;
        block.party[0] = PartyData {
            species: SPECIES,
            hp: 4,
            level: 5,
            status: StatusCondition::NONE,
            type1: SpeciesType::Water,
            type2: SpeciesType::Water,
            catch_rate: 255,
            moves: [0; 4],
            original_trainer_id: 1337,
            experience: [0x00, 0x00, 0xFF],
            effort_values: EffortValues::default(),
            individual_values: 0,
            move_pp: [0; 4],
            level_copy: 5,
            stats: Stats::new(10, 5, 5, 5, 5),
        };
        block.original_trainer_names[0] = trainer;
        block.nicknames[0] = trainer;

        block
    }

    /// Occupied party slots, in slot order.
    pub fn members(&self) -> impl Iterator<Item = &PartyData> {
        let count = usize::from(self.party_size).min(PARTY_SLOTS);
        self.party.iter().take(count)
    }
}
