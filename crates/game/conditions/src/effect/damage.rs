//! Periodic damage and heal rounds.
//!
//! A round's magnitude has two parts:
//!
//! ```text
//! amount = value + percent × max_health / 100 + taper
//! taper  = 2 × (total − sum) / (rounds − completed + 1)     (total ≠ 0)
//! taper  = total − sum                                      (final round)
//! ```
//!
//! The taper re-targets the remaining total every round, so the per-round
//! amount decreases linearly and integer remainders end up in the last round.

use tracing::trace;

use crate::creature::{CombatChange, Creature};
use crate::types::{CombatType, PlayerStatType};

use super::EffectContext;

/// Payload of PERIODIC_DAMAGE and PERIODIC_HEAL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModPeriodicDamage {
    /// Combat type of each round; `None` falls back to the condition's.
    pub combat_type: CombatType,
    /// Target sum of the taper across all rounds (0 = no taper).
    pub total: i32,
    /// Percent of max health added every round.
    pub percent: i32,
    /// Flat amount added every round.
    pub value: i32,
    /// Number of rounds before the effect retires (0 = unlimited).
    pub rounds: i32,

    /// Amount dealt so far.
    pub sum: i32,
    /// Rounds fired so far.
    pub round_completed: i32,
}

impl ModPeriodicDamage {
    pub fn new(combat_type: CombatType, total: i32, percent: i32, value: i32, rounds: i32) -> Self {
        Self {
            combat_type,
            total,
            percent,
            value,
            rounds,
            sum: 0,
            round_completed: 0,
        }
    }

    /// True once every configured round has fired.
    pub fn is_finished(&self) -> bool {
        self.rounds > 0 && self.round_completed >= self.rounds
    }

    /// Magnitude of the next round against a creature with `max_health`.
    ///
    /// Computed in `i64` and saturated into `i32`, so decoded progress that is
    /// out of range never overflows.
    pub fn next_amount(&self, max_health: i32) -> i32 {
        let mut amount =
            i64::from(self.value) + i64::from(self.percent) * i64::from(max_health) / 100;

        if self.total != 0 {
            let remaining = i64::from(self.total) - i64::from(self.sum);
            let rounds_left = i64::from(self.rounds) - i64::from(self.round_completed);
            amount += if rounds_left <= 1 {
                remaining
            } else {
                remaining * 2 / (rounds_left + 1)
            };
        }

        saturate(amount)
    }

    /// Fires one round. Returns `false` if the effect had already retired.
    pub(crate) fn fire_round(
        &mut self,
        creature: &mut dyn Creature,
        ctx: &EffectContext<'_>,
        healing: bool,
    ) -> bool {
        if self.is_finished() {
            return false;
        }

        let amount = self.next_amount(creature.stat(PlayerStatType::MaxHealth));
        self.sum = self.sum.saturating_add(amount);
        self.round_completed = self.round_completed.saturating_add(1);

        if amount != 0 {
            let combat_type = match self.combat_type {
                CombatType::None if healing => CombatType::Healing,
                CombatType::None => ctx.combat_type,
                other => other,
            };
            let signed = if healing { amount } else { amount.saturating_neg() };
            creature.apply_combat_change(&CombatChange::new(combat_type, signed, ctx));
        }

        trace!(
            condition = ctx.name,
            amount,
            round = self.round_completed,
            rounds = self.rounds,
            "periodic round"
        );
        true
    }

    /// Fresh application: adopts the incoming parameters and restarts progress.
    pub(crate) fn refresh(&mut self, add: &Self) -> bool {
        let progressed = self.sum != 0 || self.round_completed != 0;
        let changed = progressed
            || self.combat_type != add.combat_type
            || self.total != add.total
            || self.percent != add.percent
            || self.value != add.value
            || self.rounds != add.rounds;

        *self = Self::new(add.combat_type, add.total, add.percent, add.value, add.rounds);
        changed
    }
}

/// Narrows an `i64` intermediate, saturating at the `i32` bounds.
pub(crate) fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}
