//! Stamina and regeneration payloads.

use crate::creature::Creature;
use crate::types::PlayerStatType;

use super::damage::saturate;

/// Payload of PERIODIC_MOD_STAMINA.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModPeriodicStamina {
    /// Stamina delta per interval.
    pub value: i32,
}

impl ModPeriodicStamina {
    pub fn new(value: i32) -> Self {
        Self { value }
    }

    pub(crate) fn fire(&self, creature: &mut dyn Creature) {
        creature.change_stamina(self.value);
    }

    pub(crate) fn refresh(&mut self, add: &Self) -> bool {
        let changed = self.value != add.value;
        self.value = add.value;
        changed
    }
}

/// Payload of REGEN_HEALTH, REGEN_MANA and REGEN_SOUL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModRegen {
    /// Stat the percent part is taken from.
    pub stat: PlayerStatType,
    pub percent: i32,
    pub value: i32,
}

impl ModRegen {
    /// Flat regeneration per interval.
    pub fn flat(value: i32) -> Self {
        Self {
            stat: PlayerStatType::default(),
            percent: 0,
            value,
        }
    }

    /// Regeneration of `percent` of `stat` per interval.
    pub fn percent(stat: PlayerStatType, percent: i32) -> Self {
        Self {
            stat,
            percent,
            value: 0,
        }
    }

    /// Amount regenerated per interval on `creature`.
    pub fn amount(&self, creature: &dyn Creature) -> i32 {
        let base = i64::from(creature.stat(self.stat));
        saturate(i64::from(self.value) + base * i64::from(self.percent) / 100)
    }

    pub(crate) fn refresh(&mut self, add: &Self) -> bool {
        let changed = self != add;
        *self = add.clone();
        changed
    }
}
