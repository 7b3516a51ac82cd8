//! Conditions: named bundles of effects with a shared duration.
//!
//! A [`Condition`] owns its effects and drives the four lifecycle hooks across
//! them in list order. The state machine is strictly
//! `Inactive → Active → Ended`; hooks called out of order are refused and
//! logged instead of mutating the creature.
//!
//! # Duration
//!
//! `ticks` is the remaining duration. Conditions carrying
//! [`ConditionFlags::PERSISTENT`] never decrement it. A non-persistent
//! condition whose `ticks` is already 0 is expired: its next `on_tick`
//! returns `false` without firing anything.

mod error;
mod icon;
mod wire;

pub use error::ConditionError;

use strum::EnumCount;
use tracing::{debug, warn};

use crate::creature::Creature;
use crate::effect::{Effect, EffectContext, EffectType};
use crate::error::GameError;
use crate::flags::ConditionFlags;
use crate::types::{CombatSource, CombatType, ConditionEnd, MechanicType};

/// Lifecycle state of a condition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ConditionState {
    /// Constructed, not attached yet.
    #[default]
    Inactive,
    /// Attached and ticking.
    Active,
    /// `on_end` has run; the condition must be discarded or persisted.
    Ended,
}

/// A timed or persistent status-effect bundle attached to a creature.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    name: String,
    combat_type: CombatType,
    mechanic_type: MechanicType,
    source_id: u32,
    ticks: u32,
    flags: ConditionFlags,
    effects: Vec<Effect>,

    #[cfg_attr(feature = "serde", serde(skip))]
    combat_source: Option<CombatSource>,
    #[cfg_attr(feature = "serde", serde(skip))]
    state: ConditionState,
}

// Equality covers persisted fields only.
impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.combat_type == other.combat_type
            && self.mechanic_type == other.mechanic_type
            && self.source_id == other.source_id
            && self.ticks == other.ticks
            && self.flags == other.flags
            && self.effects == other.effects
    }
}

impl Condition {
    /// Creates an inert condition with no effects.
    pub fn new(
        name: impl Into<String>,
        ticks: u32,
        mechanic_type: MechanicType,
        combat_type: CombatType,
        source_id: u32,
        flags: ConditionFlags,
    ) -> Self {
        Self {
            name: name.into(),
            combat_type,
            mechanic_type,
            source_id,
            ticks,
            flags,
            effects: Vec::new(),
            combat_source: None,
            state: ConditionState::Inactive,
        }
    }

    // ===== accessors =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn combat_type(&self) -> CombatType {
        self.combat_type
    }

    pub fn set_combat_type(&mut self, combat_type: CombatType) {
        self.combat_type = combat_type;
    }

    pub fn mechanic_type(&self) -> MechanicType {
        self.mechanic_type
    }

    pub fn set_mechanic_type(&mut self, mechanic_type: MechanicType) {
        self.mechanic_type = mechanic_type;
    }

    pub fn source_id(&self) -> u32 {
        self.source_id
    }

    pub fn set_source_id(&mut self, source_id: u32) {
        self.source_id = source_id;
    }

    /// Remaining duration in ticks.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn set_ticks(&mut self, ticks: u32) {
        self.ticks = ticks;
    }

    pub fn flags(&self) -> ConditionFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: ConditionFlags) {
        self.flags = flags;
    }

    pub fn combat_source(&self) -> Option<&CombatSource> {
        self.combat_source.as_ref()
    }

    pub fn set_combat_source(&mut self, combat_source: Option<CombatSource>) {
        self.combat_source = combat_source;
    }

    pub fn state(&self) -> ConditionState {
        self.state
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// True iff the duration is infinite.
    pub fn is_persistent(&self) -> bool {
        self.flags.contains(ConditionFlags::PERSISTENT)
    }

    /// Appends an effect. Order is preserved and significant.
    ///
    /// Effects are begun together by [`Condition::on_begin`]; an effect added
    /// to an active condition only takes part in ticks, updates and `on_end`.
    pub fn add_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Context handed to effect hooks alongside the mutable effect list.
    fn split_effects(&mut self) -> (EffectContext<'_>, &mut [Effect]) {
        let ctx = EffectContext {
            name: &self.name,
            combat_type: self.combat_type,
            mechanic_type: self.mechanic_type,
            source_id: self.source_id,
            combat_source: self.combat_source.as_ref(),
        };
        (ctx, &mut self.effects)
    }

    fn expect_state(&self, expected: ConditionState) -> Result<(), ConditionError> {
        if self.state == expected {
            return Ok(());
        }
        Err(ConditionError::InvalidState {
            name: self.name.clone(),
            state: self.state,
            expected,
        })
    }

    fn refuse(&self, hook: &'static str, err: ConditionError) {
        warn!(
            condition = %self.name,
            hook,
            code = err.error_code(),
            error = %err,
            "condition hook refused"
        );
    }
}

// ============================================================================
// Lifecycle hooks
// ============================================================================

impl Condition {
    /// Attaches the condition to `creature`.
    ///
    /// Returns `false` if the creature is immune to the mechanic type or any
    /// effect rejects it. Effects begun before the rejection are ended again
    /// in reverse order, and dispels only run once every effect has accepted,
    /// so a refused condition leaves no trace.
    pub fn on_begin(&mut self, creature: &mut dyn Creature) -> bool {
        if let Err(err) = self.expect_state(ConditionState::Inactive) {
            self.refuse("on_begin", err);
            return false;
        }

        if self.mechanic_type != MechanicType::None && creature.is_immune(self.mechanic_type) {
            warn!(
                condition = %self.name,
                creature = %creature.id(),
                mechanic = %self.mechanic_type,
                "creature is immune"
            );
            return false;
        }

        let (ctx, effects) = self.split_effects();
        for index in 0..effects.len() {
            if effects[index].on_begin(creature, &ctx) {
                continue;
            }

            warn!(
                condition = ctx.name,
                creature = %creature.id(),
                effect = %effects[index].effect_type(),
                "effect rejected condition"
            );
            for begun in effects[..index].iter_mut().rev() {
                begun.on_end(creature, &ctx, ConditionEnd::Removed);
            }
            return false;
        }

        for effect in effects.iter() {
            effect.on_begin_accepted(creature);
        }

        self.state = ConditionState::Active;
        debug!(
            condition = %self.name,
            creature = %creature.id(),
            ticks = self.ticks,
            effects = self.effects.len(),
            "condition begin"
        );
        true
    }

    /// Advances the condition by `elapsed` ticks.
    ///
    /// Returns `false` once the duration has run out; the caller should then
    /// call [`Condition::on_end`] with [`ConditionEnd::Expired`].
    pub fn on_tick(&mut self, creature: &mut dyn Creature, elapsed: u32) -> bool {
        if let Err(err) = self.expect_state(ConditionState::Active) {
            self.refuse("on_tick", err);
            return false;
        }

        let step = if self.is_persistent() {
            elapsed
        } else {
            if self.ticks == 0 {
                return false;
            }
            let step = elapsed.min(self.ticks);
            self.ticks -= step;
            step
        };

        let (ctx, effects) = self.split_effects();
        for effect in effects.iter_mut() {
            effect.on_tick(creature, &ctx, step);
        }

        self.is_persistent() || self.ticks > 0
    }

    /// Merges a fresh application of the same condition into this one.
    ///
    /// Duration, flags and source are adopted from `add`. The n-th effect of
    /// each type is then updated from the n-th effect of that type in `add`;
    /// effects without a counterpart are left untouched.
    pub fn on_update(&mut self, creature: &mut dyn Creature, add: &Condition) -> bool {
        if let Err(err) = self.expect_state(ConditionState::Active) {
            self.refuse("on_update", err);
            return false;
        }

        let mut changed = self.ticks != add.ticks
            || self.flags != add.flags
            || self.source_id != add.source_id
            || self.combat_source != add.combat_source;
        self.ticks = add.ticks;
        self.flags = add.flags;
        self.source_id = add.source_id;
        self.combat_source.clone_from(&add.combat_source);

        let mut seen = [0usize; EffectType::COUNT];
        let (ctx, effects) = self.split_effects();
        for effect in effects.iter_mut() {
            let effect_type = effect.effect_type();
            let nth = seen[effect_type as usize];
            seen[effect_type as usize] += 1;

            let incoming = add
                .effects
                .iter()
                .filter(|e| e.effect_type() == effect_type)
                .nth(nth);
            if let Some(incoming) = incoming {
                changed |= effect.on_update(creature, &ctx, incoming);
            }
        }

        debug!(
            condition = %self.name,
            creature = %creature.id(),
            ticks = self.ticks,
            changed,
            "condition update"
        );
        changed
    }

    /// Detaches the condition, reverting every lasting mutation.
    pub fn on_end(&mut self, creature: &mut dyn Creature, reason: ConditionEnd) {
        if let Err(err) = self.expect_state(ConditionState::Active) {
            self.refuse("on_end", err);
            return;
        }

        let (ctx, effects) = self.split_effects();
        for effect in effects.iter_mut() {
            effect.on_end(creature, &ctx, reason);
        }

        self.state = ConditionState::Ended;
        debug!(
            condition = %self.name,
            creature = %creature.id(),
            %reason,
            "condition end"
        );
    }
}
