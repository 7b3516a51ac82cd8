//! Status-effect ("condition") engine for creatures on a game server.
//!
//! `game-conditions` owns the rules for timed and persistent modifiers:
//! how a [`Condition`] is attached to a creature, ticked, merged with a fresh
//! application of itself, ended, and persisted through the binary wire format
//! in [`stream`]. Everything the engine needs from the outside world goes
//! through the [`Creature`] trait.
//!
//! Lifecycle of a condition:
//!
//! ```text
//! factory ──► Inactive ──on_begin──► Active ──on_tick*/on_update*──► on_end ──► Ended
//! ```
pub mod condition;
pub mod config;
pub mod creature;
pub mod effect;
pub mod error;
pub mod factory;
pub mod flags;
pub mod stream;
pub mod types;

pub use condition::{Condition, ConditionError, ConditionState};
pub use config::ConditionConfig;
pub use creature::{CombatChange, Creature, MemoryCreature, ScriptEvent};
pub use effect::{
    Effect, EffectContext, EffectKind, EffectType, ModDispel, ModEffect, ModLight,
    ModPeriodicDamage, ModPeriodicStamina, ModPeriodicTrigger, ModRegen, ModShapeShift, ModSkill,
    ModSpeed, ModStat,
};
pub use error::{ErrorSeverity, GameError};
pub use factory::{
    ConditionId, create_condition, create_condition_from_stream, create_condition_from_stream_with,
    create_named_condition,
    create_period_average_damage_condition, create_period_damage_condition,
};
pub use flags::{ConditionFlags, IconType};
pub use stream::{PropStream, PropWriteStream, WireError};
pub use types::{
    CombatSource, CombatType, ConditionEnd, CreatureId, LightInfo, MechanicType, Outfit,
    PlayerStatType, SkillType,
};
