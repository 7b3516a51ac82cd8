//! Reversible speed, stat and skill modifiers.
//!
//! Each modifier computes `delta = value + percent × base / 100` against the
//! creature's current base when it begins, applies it, and keeps the delta.
//! Ending applies `-delta`, so reversal is exact no matter what other
//! modifiers touched the same attribute in between.

use crate::creature::Creature;
use crate::types::{PlayerStatType, SkillType};

use super::damage::saturate;

fn scaled(value: i32, percent: i32, base: i32) -> i32 {
    saturate(i64::from(value) + i64::from(percent) * i64::from(base) / 100)
}

/// Payload of MOD_SPEED.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModSpeed {
    pub percent: i32,
    pub value: i32,

    /// Delta currently applied to the creature.
    pub delta: i32,
}

impl ModSpeed {
    pub fn new(percent: i32, value: i32) -> Self {
        Self {
            percent,
            value,
            delta: 0,
        }
    }

    pub(crate) fn begin(&mut self, creature: &mut dyn Creature) {
        self.delta = scaled(self.value, self.percent, creature.base_speed());
        creature.change_speed(self.delta);
    }

    pub(crate) fn end(&mut self, creature: &mut dyn Creature) {
        creature.change_speed(self.delta.saturating_neg());
        self.delta = 0;
    }

    pub(crate) fn refresh(&mut self, creature: &mut dyn Creature, add: &Self) -> bool {
        let previous = self.delta;
        self.end(creature);
        self.percent = add.percent;
        self.value = add.value;
        self.begin(creature);
        previous != self.delta
    }
}

/// Payload of MOD_STAT.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModStat {
    pub stat: PlayerStatType,
    pub percent: i32,
    pub value: i32,

    /// Delta currently applied to the creature.
    pub delta: i32,
}

impl ModStat {
    pub fn flat(stat: PlayerStatType, value: i32) -> Self {
        Self {
            stat,
            percent: 0,
            value,
            delta: 0,
        }
    }

    pub fn percent(stat: PlayerStatType, percent: i32) -> Self {
        Self {
            stat,
            percent,
            value: 0,
            delta: 0,
        }
    }

    pub(crate) fn begin(&mut self, creature: &mut dyn Creature) {
        self.delta = scaled(self.value, self.percent, creature.stat(self.stat));
        creature.change_stat(self.stat, self.delta);
    }

    pub(crate) fn end(&mut self, creature: &mut dyn Creature) {
        creature.change_stat(self.stat, self.delta.saturating_neg());
        self.delta = 0;
    }

    pub(crate) fn refresh(&mut self, creature: &mut dyn Creature, add: &Self) -> bool {
        let previous = (self.stat, self.delta);
        self.end(creature);
        self.stat = add.stat;
        self.percent = add.percent;
        self.value = add.value;
        self.begin(creature);
        previous != (self.stat, self.delta)
    }
}

/// Payload of MOD_SKILL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModSkill {
    pub skill: SkillType,
    pub percent: i32,
    pub value: i32,

    /// Delta currently applied to the creature.
    pub delta: i32,
}

impl ModSkill {
    pub fn flat(skill: SkillType, value: i32) -> Self {
        Self {
            skill,
            percent: 0,
            value,
            delta: 0,
        }
    }

    pub fn percent(skill: SkillType, percent: i32) -> Self {
        Self {
            skill,
            percent,
            value: 0,
            delta: 0,
        }
    }

    pub(crate) fn begin(&mut self, creature: &mut dyn Creature) {
        self.delta = scaled(self.value, self.percent, creature.skill(self.skill));
        creature.change_skill(self.skill, self.delta);
    }

    pub(crate) fn end(&mut self, creature: &mut dyn Creature) {
        creature.change_skill(self.skill, self.delta.saturating_neg());
        self.delta = 0;
    }

    pub(crate) fn refresh(&mut self, creature: &mut dyn Creature, add: &Self) -> bool {
        let previous = (self.skill, self.delta);
        self.end(creature);
        self.skill = add.skill;
        self.percent = add.percent;
        self.value = add.value;
        self.begin(creature);
        previous != (self.skill, self.delta)
    }
}
