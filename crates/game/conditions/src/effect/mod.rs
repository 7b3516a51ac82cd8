//! Effects - the behaviour units a condition is built from.
//!
//! # Architecture
//!
//! Like the rest of the engine this module uses an **Enum + Struct hybrid**:
//! - Each payload is a struct in its own file (`ModSpeed`, `ModPeriodicDamage`, ...)
//!   with the begin/fire/end/refresh logic for that variant
//! - [`EffectKind`] wraps them; the variant is the type tag
//! - [`Effect`] adds the interval and the transient tick accumulator and
//!   dispatches the four lifecycle hooks
//!
//! Effects never hold a reference to their condition. Everything they need
//! to know about it (name, source, combat types) arrives through
//! [`EffectContext`] on each hook call.

mod appearance;
mod damage;
mod dispel;
mod kinds;
mod modifier;
mod resource;
mod trigger;
mod wire;

pub use appearance::{ModLight, ModShapeShift};
pub use damage::ModPeriodicDamage;
pub use dispel::ModDispel;
pub use kinds::{EffectKind, EffectType, ModEffect};
pub use modifier::{ModSkill, ModSpeed, ModStat};
pub use resource::{ModPeriodicStamina, ModRegen};
pub use trigger::ModPeriodicTrigger;

use tracing::{trace, warn};

use crate::condition::ConditionError;
use crate::creature::{Creature, ScriptEvent};
use crate::types::{
    CombatSource, CombatType, ConditionEnd, MechanicType, Outfit, PlayerStatType, SkillType,
};

/// Read-only view of the owning condition, passed into every effect hook.
#[derive(Clone, Copy, Debug)]
pub struct EffectContext<'a> {
    pub name: &'a str,
    pub combat_type: CombatType,
    pub mechanic_type: MechanicType,
    pub source_id: u32,
    pub combat_source: Option<&'a CombatSource>,
}

/// One effect inside a condition.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    kind: EffectKind,
    /// Ticks between periodic actions; 0 for begin/end-only effects.
    interval: u32,

    /// Ticks accumulated towards the next interval. Transient.
    #[cfg_attr(feature = "serde", serde(skip))]
    tick_count: u32,
}

// Equality covers persisted state only; the tick accumulator is ignored.
impl PartialEq for Effect {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.interval == other.interval
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl Effect {
    pub fn new(kind: EffectKind, interval: u32) -> Self {
        Self {
            kind,
            interval,
            tick_count: 0,
        }
    }

    pub fn periodic_heal(interval: u32, value: i32, rounds: i32) -> Self {
        let heal = ModPeriodicDamage::new(CombatType::Healing, 0, 0, value, rounds);
        Self::new(EffectKind::PeriodicHeal(heal), interval)
    }

    pub fn periodic_damage(
        interval: u32,
        combat_type: CombatType,
        total: i32,
        percent: i32,
        value: i32,
        rounds: i32,
    ) -> Self {
        let damage = ModPeriodicDamage::new(combat_type, total, percent, value, rounds);
        Self::new(EffectKind::PeriodicDamage(damage), interval)
    }

    pub fn mod_stamina(interval: u32, value: i32) -> Self {
        Self::new(
            EffectKind::PeriodicModStamina(ModPeriodicStamina::new(value)),
            interval,
        )
    }

    pub fn regen_health(interval: u32, value: i32) -> Self {
        Self::new(EffectKind::RegenHealth(ModRegen::flat(value)), interval)
    }

    pub fn regen_percent_health(interval: u32, stat: PlayerStatType, percent: i32) -> Self {
        Self::new(
            EffectKind::RegenHealth(ModRegen::percent(stat, percent)),
            interval,
        )
    }

    pub fn regen_mana(interval: u32, value: i32) -> Self {
        Self::new(EffectKind::RegenMana(ModRegen::flat(value)), interval)
    }

    pub fn regen_percent_mana(interval: u32, stat: PlayerStatType, percent: i32) -> Self {
        Self::new(
            EffectKind::RegenMana(ModRegen::percent(stat, percent)),
            interval,
        )
    }

    pub fn regen_soul(interval: u32, value: i32) -> Self {
        Self::new(EffectKind::RegenSoul(ModRegen::flat(value)), interval)
    }

    pub fn regen_percent_soul(interval: u32, stat: PlayerStatType, percent: i32) -> Self {
        Self::new(
            EffectKind::RegenSoul(ModRegen::percent(stat, percent)),
            interval,
        )
    }

    pub fn periodic_trigger(interval: u32, trigger_effect: Effect, max_count: u32) -> Self {
        Self::new(
            EffectKind::PeriodicTrigger(ModPeriodicTrigger::new(trigger_effect, max_count)),
            interval,
        )
    }

    pub fn mod_speed(percent: i32, value: i32) -> Self {
        Self::new(EffectKind::ModSpeed(ModSpeed::new(percent, value)), 0)
    }

    pub fn mod_stat(stat: PlayerStatType, value: i32) -> Self {
        Self::new(EffectKind::ModStat(ModStat::flat(stat, value)), 0)
    }

    pub fn mod_percent_stat(stat: PlayerStatType, percent: i32) -> Self {
        Self::new(EffectKind::ModStat(ModStat::percent(stat, percent)), 0)
    }

    pub fn mod_skill(skill: SkillType, value: i32) -> Self {
        Self::new(EffectKind::ModSkill(ModSkill::flat(skill, value)), 0)
    }

    pub fn mod_percent_skill(skill: SkillType, percent: i32) -> Self {
        Self::new(EffectKind::ModSkill(ModSkill::percent(skill, percent)), 0)
    }

    pub fn shapeshift(outfit: Outfit) -> Self {
        Self::new(EffectKind::ShapeShift(ModShapeShift::new(outfit)), 0)
    }

    pub fn light(level: u32, color: u32) -> Self {
        Self::new(EffectKind::Light(ModLight::new(level, color)), 0)
    }

    pub fn dispel(name: impl Into<String>) -> Self {
        Self::new(EffectKind::Dispel(ModDispel::new(name)), 0)
    }

    /// Script hook; with a non-zero interval the scripting layer also gets tick events.
    pub fn script(interval: u32) -> Self {
        Self::new(EffectKind::Script, interval)
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl Effect {
    pub fn effect_type(&self) -> EffectType {
        self.kind.effect_type()
    }

    pub fn kind(&self) -> &EffectKind {
        &self.kind
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    /// Checked typed access to the payload.
    ///
    /// Asking for a payload the effect does not carry is a caller bug and is
    /// reported as [`ConditionError::PayloadMismatch`].
    pub fn mod_effect<T: ModEffect>(&self) -> Result<&T, ConditionError> {
        T::from_kind(&self.kind).ok_or(ConditionError::PayloadMismatch {
            expected: T::NAME,
            found: self.effect_type(),
        })
    }

    /// Mutable variant of [`Effect::mod_effect`].
    pub fn mod_effect_mut<T: ModEffect>(&mut self) -> Result<&mut T, ConditionError> {
        let found = self.effect_type();
        T::from_kind_mut(&mut self.kind).ok_or(ConditionError::PayloadMismatch {
            expected: T::NAME,
            found,
        })
    }

    /// True once a self-retiring effect (finite periodic rounds, trigger) is spent.
    pub fn is_retired(&self) -> bool {
        match &self.kind {
            EffectKind::PeriodicHeal(m) | EffectKind::PeriodicDamage(m) => m.is_finished(),
            EffectKind::PeriodicTrigger(m) => m.is_finished(),
            _ => false,
        }
    }
}

// ============================================================================
// Lifecycle hooks
// ============================================================================

impl Effect {
    /// One-shot setup. Returns `false` if the effect rejects the creature.
    ///
    /// Instantaneous effects (DISPEL) do nothing here; they run in
    /// [`Effect::on_begin_accepted`] once the whole condition is accepted.
    pub fn on_begin(&mut self, creature: &mut dyn Creature, ctx: &EffectContext<'_>) -> bool {
        match &mut self.kind {
            EffectKind::ModSpeed(m) => m.begin(creature),
            EffectKind::ModStat(m) => m.begin(creature),
            EffectKind::ModSkill(m) => m.begin(creature),
            EffectKind::ShapeShift(m) => return m.begin(creature),
            EffectKind::Light(m) => m.begin(creature),
            EffectKind::Script => return creature.on_script_event(ScriptEvent::Begin, ctx),
            EffectKind::Dispel(_)
            | EffectKind::PeriodicHeal(_)
            | EffectKind::PeriodicDamage(_)
            | EffectKind::PeriodicModStamina(_)
            | EffectKind::RegenHealth(_)
            | EffectKind::RegenMana(_)
            | EffectKind::RegenSoul(_)
            | EffectKind::PeriodicTrigger(_) => {}
        }
        true
    }

    /// Runs instantaneous begin actions after every effect of the condition
    /// accepted the creature.
    pub fn on_begin_accepted(&self, creature: &mut dyn Creature) {
        if let EffectKind::Dispel(m) = &self.kind {
            m.apply(creature);
        }
    }

    /// Advances the accumulator by `ticks` and fires once per elapsed interval.
    ///
    /// Returns `false` once the effect has retired.
    pub fn on_tick(
        &mut self,
        creature: &mut dyn Creature,
        ctx: &EffectContext<'_>,
        ticks: u32,
    ) -> bool {
        if self.interval == 0 || self.is_retired() {
            return !self.is_retired();
        }

        self.tick_count = self.tick_count.saturating_add(ticks);
        while self.tick_count >= self.interval {
            self.tick_count -= self.interval;
            if !self.fire(creature, ctx) {
                self.tick_count = 0;
                break;
            }
        }

        !self.is_retired()
    }

    /// Reverts whatever `on_begin` applied.
    pub fn on_end(
        &mut self,
        creature: &mut dyn Creature,
        ctx: &EffectContext<'_>,
        reason: ConditionEnd,
    ) {
        match &mut self.kind {
            EffectKind::ModSpeed(m) => m.end(creature),
            EffectKind::ModStat(m) => m.end(creature),
            EffectKind::ModSkill(m) => m.end(creature),
            EffectKind::ShapeShift(m) => m.end(creature),
            EffectKind::Light(m) => m.end(creature),
            EffectKind::Script => {
                creature.on_script_event(ScriptEvent::End(reason), ctx);
            }
            _ => {}
        }
    }

    /// Merges a fresh application of the same effect type into this one.
    ///
    /// Returns whether anything observable changed.
    pub fn on_update(
        &mut self,
        creature: &mut dyn Creature,
        ctx: &EffectContext<'_>,
        add: &Effect,
    ) -> bool {
        if self.effect_type() != add.effect_type() {
            warn!(
                condition = ctx.name,
                existing = %self.effect_type(),
                incoming = %add.effect_type(),
                "effect update with mismatched type ignored"
            );
            return false;
        }

        let mut changed = self.interval != add.interval;
        self.interval = add.interval;

        changed |= match (&mut self.kind, &add.kind) {
            (EffectKind::PeriodicHeal(m), EffectKind::PeriodicHeal(a))
            | (EffectKind::PeriodicDamage(m), EffectKind::PeriodicDamage(a)) => {
                self.tick_count = 0;
                m.refresh(a)
            }
            (EffectKind::PeriodicModStamina(m), EffectKind::PeriodicModStamina(a)) => m.refresh(a),
            (EffectKind::RegenHealth(m), EffectKind::RegenHealth(a))
            | (EffectKind::RegenMana(m), EffectKind::RegenMana(a))
            | (EffectKind::RegenSoul(m), EffectKind::RegenSoul(a)) => m.refresh(a),
            (EffectKind::PeriodicTrigger(m), EffectKind::PeriodicTrigger(a)) => {
                self.tick_count = 0;
                m.refresh(a)
            }
            (EffectKind::ModSpeed(m), EffectKind::ModSpeed(a)) => m.refresh(creature, a),
            (EffectKind::ModStat(m), EffectKind::ModStat(a)) => m.refresh(creature, a),
            (EffectKind::ModSkill(m), EffectKind::ModSkill(a)) => m.refresh(creature, a),
            (EffectKind::ShapeShift(m), EffectKind::ShapeShift(a)) => m.refresh(creature, a),
            (EffectKind::Light(m), EffectKind::Light(a)) => m.refresh(creature, a),
            (EffectKind::Dispel(m), EffectKind::Dispel(a)) => {
                let changed = m.refresh(a);
                m.apply(creature) > 0 || changed
            }
            (EffectKind::Script, EffectKind::Script) => {
                creature.on_script_event(ScriptEvent::Update, ctx)
            }
            _ => false,
        };

        changed
    }

    /// Performs the effect's one-shot action. Returns `false` when nothing
    /// happened because the effect is spent or has no one-shot action.
    pub(crate) fn fire(&mut self, creature: &mut dyn Creature, ctx: &EffectContext<'_>) -> bool {
        match &mut self.kind {
            EffectKind::PeriodicHeal(m) => m.fire_round(creature, ctx, true),
            EffectKind::PeriodicDamage(m) => m.fire_round(creature, ctx, false),
            EffectKind::PeriodicModStamina(m) => {
                m.fire(creature);
                true
            }
            EffectKind::RegenHealth(m) => {
                let amount = m.amount(creature);
                creature.change_health(amount);
                true
            }
            EffectKind::RegenMana(m) => {
                let amount = m.amount(creature);
                creature.change_mana(amount);
                true
            }
            EffectKind::RegenSoul(m) => {
                let amount = m.amount(creature);
                creature.change_soul(amount);
                true
            }
            EffectKind::PeriodicTrigger(m) => m.fire(creature, ctx),
            EffectKind::Dispel(m) => {
                m.apply(creature);
                true
            }
            EffectKind::Script => {
                creature.on_script_event(ScriptEvent::Tick, ctx);
                true
            }
            kind @ (EffectKind::ModSpeed(_)
            | EffectKind::ModStat(_)
            | EffectKind::ModSkill(_)
            | EffectKind::ShapeShift(_)
            | EffectKind::Light(_)) => {
                trace!(
                    condition = ctx.name,
                    effect = %kind.effect_type(),
                    "effect has no one-shot action"
                );
                false
            }
        }
    }
}
