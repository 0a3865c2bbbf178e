//! Battle stats and effort values.

/// The five computed battle stats.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
    pub special: u16,
}

impl Stats {
    pub fn new(hp: u16, attack: u16, defense: u16, speed: u16, special: u16) -> Self {
        Stats {
            hp,
            attack,
            defense,
            speed,
            special,
        }
    }

    /// Fields in trade block order.
    pub fn to_array(self) -> [u16; 5] {
        [self.hp, self.attack, self.defense, self.speed, self.special]
    }

    pub fn from_array(values: [u16; 5]) -> Self {
        let [hp, attack, defense, speed, special] = values;
        Stats::new(hp, attack, defense, speed, special)
    }
}

/// Effort value counters.
///
/// Same layout as [`Stats`] on the wire, but a distinct type so the two
/// can't be swapped by accident.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct EffortValues(pub Stats);
