//! Status condition bit flags.

/// Status condition of a party member.
///
/// Stored as raw bit flags; several conditions can be set at once, and
/// unknown bits coming from a peer are preserved as-is.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct StatusCondition(pub u8);

impl StatusCondition {
    pub const NONE: StatusCondition = StatusCondition(0x00);
    pub const ASLEEP: StatusCondition = StatusCondition(0x04);
    pub const POISONED: StatusCondition = StatusCondition(0x08);
    pub const BURNED: StatusCondition = StatusCondition(0x10);
    pub const FROZEN: StatusCondition = StatusCondition(0x20);
    pub const PARALYZED: StatusCondition = StatusCondition(0x40);

    /// Raw byte as it appears in the trade block.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// True if every flag in `other` is also set in `self`.
    pub fn contains(self, other: StatusCondition) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for StatusCondition {
    type Output = StatusCondition;

    fn bitor(self, rhs: StatusCondition) -> StatusCondition {
        StatusCondition(self.0 | rhs.0)
    }
}
