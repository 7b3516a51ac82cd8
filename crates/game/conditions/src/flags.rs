use bitflags::bitflags;

use crate::types::CombatType;

bitflags! {
    /// Behaviour flags carried by a condition.
    ///
    /// The numeric values are part of the wire format and must never change.
    /// Unknown bits read from the wire are retained so a round trip is exact.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ConditionFlags: u32 {
        const INFIGHT      = 1 << 0;
        const SLOW         = 1 << 1;
        const HASTE        = 1 << 2;
        const STRENGTHENED = 1 << 3;
        const MANASHIELD   = 1 << 4;
        const DRUNK        = 1 << 5;
        /// Infinite duration: `ticks` is never decremented.
        const PERSISTENT   = 1 << 6;
    }
}

bitflags! {
    /// Status icons shown to the client.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct IconType: u32 {
        const POISON       = 1 << 0;
        const BURN         = 1 << 1;
        const ENERGY       = 1 << 2;
        const DRUNK        = 1 << 3;
        const MANASHIELD   = 1 << 4;
        const PARALYZE     = 1 << 5;
        const HASTE        = 1 << 6;
        const SWORDS       = 1 << 7;
        const DROWNING     = 1 << 8;
        const FREEZING     = 1 << 9;
        const DAZZLED      = 1 << 10;
        const CURSED       = 1 << 11;
        const STRENGTHENED = 1 << 12;
        const BLEEDING     = 1 << 13;
    }
}

impl IconType {
    /// Icon shown for periodic damage of the given type.
    pub const fn for_combat(combat_type: CombatType) -> Self {
        match combat_type {
            CombatType::Earth => Self::POISON,
            CombatType::Fire => Self::BURN,
            CombatType::Energy => Self::ENERGY,
            CombatType::Drown => Self::DROWNING,
            CombatType::Ice => Self::FREEZING,
            CombatType::Holy => Self::DAZZLED,
            CombatType::Death => Self::CURSED,
            CombatType::Physical => Self::BLEEDING,
            _ => Self::empty(),
        }
    }
}
