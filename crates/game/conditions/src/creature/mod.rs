//! Boundary between the condition engine and the creature model.
//!
//! The engine never owns a creature. Every lifecycle hook borrows one as
//! `&mut dyn Creature` for the duration of a single synchronous call and
//! only touches it through this trait.
//!
//! # Implementation Rules
//! 1. `change_*` methods apply a signed delta; effects undo their own deltas
//!    on end, so implementations must not clamp modifiers silently.
//! 2. `apply_combat_change` is the entry into the combat pipeline. It may
//!    apply resistances and return the amount actually applied.
//! 3. `dispel_conditions` is the only way an effect reaches other conditions
//!    on the same creature.

mod memory;

pub use memory::MemoryCreature;

use crate::effect::{EffectContext, ModDispel};
use crate::types::{
    CombatSource, CombatType, ConditionEnd, CreatureId, LightInfo, MechanicType, Outfit,
    PlayerStatType, SkillType,
};

/// Health change produced by a periodic damage or heal effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatChange {
    pub combat_type: CombatType,
    /// Signed health delta: negative for damage, positive for healing.
    pub amount: i32,
    /// Source id recorded on the owning condition.
    pub source_id: u32,
    /// Transient attribution, when the condition still knows it.
    pub source: Option<CombatSource>,
}

impl CombatChange {
    pub fn new(combat_type: CombatType, amount: i32, ctx: &EffectContext<'_>) -> Self {
        Self {
            combat_type,
            amount,
            source_id: ctx.source_id,
            source: ctx.combat_source.cloned(),
        }
    }

    pub fn is_damage(&self) -> bool {
        self.amount < 0
    }
}

/// Lifecycle notifications delivered to the scripting layer by SCRIPT effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScriptEvent {
    Begin,
    Tick,
    Update,
    End(ConditionEnd),
}

/// Creature operations required by condition effects.
pub trait Creature {
    fn id(&self) -> CreatureId;

    /// Whether conditions of this mechanic type are rejected outright.
    fn is_immune(&self, _mechanic: MechanicType) -> bool {
        false
    }

    /// Speed before any condition modifiers.
    fn base_speed(&self) -> i32;
    fn speed(&self) -> i32;
    fn change_speed(&mut self, delta: i32);

    fn stat(&self, stat: PlayerStatType) -> i32;
    fn change_stat(&mut self, stat: PlayerStatType, delta: i32);

    fn skill(&self, skill: SkillType) -> i32;
    fn change_skill(&mut self, skill: SkillType, delta: i32);

    fn health(&self) -> i32;
    fn change_health(&mut self, delta: i32);
    fn mana(&self) -> i32;
    fn change_mana(&mut self, delta: i32);
    fn soul(&self) -> i32;
    fn change_soul(&mut self, delta: i32);
    fn change_stamina(&mut self, delta: i32);

    fn outfit(&self) -> Outfit;
    fn set_outfit(&mut self, outfit: Outfit);

    /// Whether the creature may take another appearance right now.
    fn can_shapeshift(&self) -> bool {
        true
    }

    /// Current condition light override, if any.
    fn light(&self) -> Option<LightInfo>;
    /// Sets or clears the condition light override.
    fn set_light_override(&mut self, light: Option<LightInfo>);

    /// Routes a periodic damage/heal through the combat pipeline.
    ///
    /// Returns the health delta actually applied.
    fn apply_combat_change(&mut self, change: &CombatChange) -> i32;

    /// Removes every condition matched by `dispel`. Returns how many were removed.
    fn dispel_conditions(&mut self, dispel: &ModDispel) -> usize;

    /// Notifies the scripting layer. Returning `false` on [`ScriptEvent::Begin`]
    /// rejects the condition.
    fn on_script_event(&mut self, _event: ScriptEvent, _ctx: &EffectContext<'_>) -> bool {
        true
    }
}
