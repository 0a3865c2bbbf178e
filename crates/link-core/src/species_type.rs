//! Elemental type of a species.

/// Elemental type, as encoded in the party record.
///
/// The code space has gaps (0x09..=0x13 are unused by the game), so any
/// byte outside the known set is kept as [`SpeciesType::Other`] rather
/// than rejected.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum SpeciesType {
    #[default]
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bird,
    Bug,
    Ghost,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Other(u8),
}

impl SpeciesType {
    /// Convert to the byte stored in the trade block.
    pub fn as_u8(self) -> u8 {
        match self {
            SpeciesType::Normal => 0x00,
            SpeciesType::Fighting => 0x01,
            SpeciesType::Flying => 0x02,
            SpeciesType::Poison => 0x03,
            SpeciesType::Ground => 0x04,
            SpeciesType::Rock => 0x05,
            SpeciesType::Bird => 0x06,
            SpeciesType::Bug => 0x07,
            SpeciesType::Ghost => 0x08,
            SpeciesType::Fire => 0x14,
            SpeciesType::Water => 0x15,
            SpeciesType::Grass => 0x16,
            SpeciesType::Electric => 0x17,
            SpeciesType::Psychic => 0x18,
            SpeciesType::Ice => 0x19,
            SpeciesType::Dragon => 0x1A,
            SpeciesType::Other(code) => code,
        }
    }

    /// Parse a trade block byte. Never fails.
    pub fn from_u8(code: u8) -> Self {
        match code {
            0x00 => SpeciesType::Normal,
            0x01 => SpeciesType::Fighting,
            0x02 => SpeciesType::Flying,
            0x03 => SpeciesType::Poison,
            0x04 => SpeciesType::Ground,
            0x05 => SpeciesType::Rock,
            0x06 => SpeciesType::Bird,
            0x07 => SpeciesType::Bug,
            0x08 => SpeciesType::Ghost,
            0x14 => SpeciesType::Fire,
            0x15 => SpeciesType::Water,
            0x16 => SpeciesType::Grass,
            0x17 => SpeciesType::Electric,
            0x18 => SpeciesType::Psychic,
            0x19 => SpeciesType::Ice,
            0x1A => SpeciesType::Dragon,
            other => SpeciesType::Other(other),
        }
    }
}
