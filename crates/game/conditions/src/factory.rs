//! Stateless constructors for canonical conditions.
//!
//! Every function returns a fresh, inactive [`Condition`] owned by the
//! caller. Attaching the "same" condition to two creatures means calling the
//! factory twice (or cloning), never sharing one instance.

use tracing::warn;

use crate::condition::Condition;
use crate::config::ConditionConfig;
use crate::effect::Effect;
use crate::error::GameError;
use crate::flags::ConditionFlags;
use crate::stream::PropStream;
use crate::types::{CombatType, MechanicType};

/// Canonical condition templates known to the server.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ConditionId {
    Poison,
    Fire,
    Energy,
    Drown,
    Freezing,
    Dazzled,
    Cursed,
    Bleeding,
    Haste,
    Paralyze,
    Outfit,
    Light,
    Invisible,
    Drunk,
    Manashield,
    Infight,
    Regeneration,
    Soul,
    Exhausted,
    Muted,
}

impl ConditionId {
    /// Display name given to conditions built from this template.
    pub const fn condition_name(self) -> &'static str {
        match self {
            Self::Poison => "poisoned",
            Self::Fire => "burning",
            Self::Energy => "electrified",
            Self::Drown => "drowning",
            Self::Freezing => "freezing",
            Self::Dazzled => "dazzled",
            Self::Cursed => "cursed",
            Self::Bleeding => "bleeding",
            Self::Haste => "haste",
            Self::Paralyze => "paralyzed",
            Self::Outfit => "shapeshifted",
            Self::Light => "light",
            Self::Invisible => "invisible",
            Self::Drunk => "drunk",
            Self::Manashield => "magic shield",
            Self::Infight => "in fight",
            Self::Regeneration => "regeneration",
            Self::Soul => "soul regeneration",
            Self::Exhausted => "exhausted",
            Self::Muted => "muted",
        }
    }

    pub const fn combat_type(self) -> CombatType {
        match self {
            Self::Poison => CombatType::Earth,
            Self::Fire => CombatType::Fire,
            Self::Energy => CombatType::Energy,
            Self::Drown => CombatType::Drown,
            Self::Freezing => CombatType::Ice,
            Self::Dazzled => CombatType::Holy,
            Self::Cursed => CombatType::Death,
            Self::Bleeding => CombatType::Physical,
            _ => CombatType::None,
        }
    }

    pub const fn mechanic_type(self) -> MechanicType {
        match self {
            Self::Poison => MechanicType::Poison,
            Self::Fire => MechanicType::Fire,
            Self::Energy => MechanicType::Energy,
            Self::Drown => MechanicType::Drown,
            Self::Freezing => MechanicType::Freeze,
            Self::Dazzled => MechanicType::Dazzle,
            Self::Cursed => MechanicType::Curse,
            Self::Bleeding => MechanicType::Bleed,
            Self::Paralyze => MechanicType::Paralyze,
            Self::Outfit => MechanicType::Shapeshift,
            Self::Invisible => MechanicType::Invisible,
            Self::Drunk => MechanicType::Drunk,
            Self::Muted => MechanicType::Silence,
            _ => MechanicType::None,
        }
    }

    /// Flags every condition of this template carries.
    pub const fn default_flags(self) -> ConditionFlags {
        match self {
            Self::Haste => ConditionFlags::HASTE,
            Self::Paralyze => ConditionFlags::SLOW,
            Self::Drunk => ConditionFlags::DRUNK,
            Self::Manashield => ConditionFlags::MANASHIELD,
            Self::Infight => ConditionFlags::INFIGHT,
            _ => ConditionFlags::empty(),
        }
    }
}

/// Empty condition shell for a template. `flags` are added to the template's own.
pub fn create_condition(
    id: ConditionId,
    ticks: u32,
    source_id: u32,
    flags: ConditionFlags,
) -> Condition {
    Condition::new(
        id.condition_name(),
        ticks,
        id.mechanic_type(),
        id.combat_type(),
        source_id,
        id.default_flags() | flags,
    )
}

/// Named condition shell with no effects.
pub fn create_named_condition(
    name: impl Into<String>,
    ticks: u32,
    mechanic_type: MechanicType,
    combat_type: CombatType,
    source_id: u32,
    flags: ConditionFlags,
) -> Condition {
    Condition::new(name, ticks, mechanic_type, combat_type, source_id, flags)
}

/// Condition dealing a fixed `damage` every `interval` ticks, `rounds` times.
///
/// The duration is exactly long enough for every round to fire.
pub fn create_period_damage_condition(
    id: ConditionId,
    interval: u32,
    damage: i32,
    rounds: u32,
) -> Condition {
    let ticks = interval.saturating_mul(rounds);
    let rounds = i32::try_from(rounds).unwrap_or(i32::MAX);

    let mut condition = create_condition(id, ticks, 0, ConditionFlags::empty());
    condition.add_effect(Effect::periodic_damage(
        interval,
        id.combat_type(),
        0,
        0,
        damage,
        rounds,
    ));
    condition
}

/// Condition whose damage starts near `start_damage` and tapers linearly so
/// that all rounds together deal exactly `total`.
///
/// The round count is `max(1, ceil(2·total / start) − 1)`, which makes the
/// first round deal `start_damage` whenever the division is exact. Otherwise
/// the first round is `2·total / (rounds + 1)`, below `start_damage`:
/// `(70, 250)` deals 62, 53, 45, 36, 27, 18, 9.
pub fn create_period_average_damage_condition(
    id: ConditionId,
    interval: u32,
    start_damage: i32,
    total: i32,
) -> Condition {
    let rounds = average_rounds(start_damage, total);
    let ticks = interval.saturating_mul(rounds as u32);

    let mut condition = create_condition(id, ticks, 0, ConditionFlags::empty());
    condition.add_effect(Effect::periodic_damage(
        interval,
        id.combat_type(),
        total,
        0,
        0,
        rounds,
    ));
    condition
}

fn average_rounds(start_damage: i32, total: i32) -> i32 {
    if start_damage <= 0 || total <= 0 {
        return 1;
    }
    let start = i64::from(start_damage);
    let doubled = 2 * i64::from(total);
    let ceil = (doubled + start - 1) / start;
    (ceil - 1).clamp(1, i64::from(i32::MAX)) as i32
}

/// Reads a complete condition, or `None` if the input is malformed.
pub fn create_condition_from_stream(stream: &mut PropStream<'_>) -> Option<Condition> {
    create_condition_from_stream_with(stream, &ConditionConfig::default())
}

/// [`create_condition_from_stream`] with explicit limits.
pub fn create_condition_from_stream_with(
    stream: &mut PropStream<'_>,
    config: &ConditionConfig,
) -> Option<Condition> {
    let offset = stream.position();
    match Condition::unserialize_with(stream, config) {
        Ok(condition) => Some(condition),
        Err(err) => {
            warn!(offset, code = err.error_code(), error = %err, "discarding malformed condition");
            None
        }
    }
}
