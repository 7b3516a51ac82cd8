//! Effect kind enum and typed payload access.
//!
//! [`EffectKind`] is the closed set of effect variants. The variant *is* the
//! effect's type tag, so a payload can never disagree with its tag. Kinds that
//! share a payload shape (heal/damage, the three regenerations) reuse the same
//! struct.

use super::appearance::{ModLight, ModShapeShift};
use super::damage::ModPeriodicDamage;
use super::dispel::ModDispel;
use super::modifier::{ModSkill, ModSpeed, ModStat};
use super::resource::{ModPeriodicStamina, ModRegen};
use super::trigger::ModPeriodicTrigger;

/// Effect type tag.
///
/// The discriminant is the wire tag.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::FromRepr,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum EffectType {
    // periodic
    PeriodicHeal = 0,
    PeriodicDamage,
    PeriodicModStamina,
    RegenHealth,
    RegenMana,
    RegenSoul,
    PeriodicTrigger,

    // start/end
    ModSpeed,
    ModStat,
    ModSkill,
    ShapeShift,
    Light,
    Dispel,

    Script,
}

impl EffectType {
    /// Wire tag.
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

/// The effect variant together with its payload.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    // ========================================================================
    // Periodic
    // ========================================================================
    PeriodicHeal(ModPeriodicDamage),
    PeriodicDamage(ModPeriodicDamage),
    PeriodicModStamina(ModPeriodicStamina),
    RegenHealth(ModRegen),
    RegenMana(ModRegen),
    RegenSoul(ModRegen),
    PeriodicTrigger(ModPeriodicTrigger),

    // ========================================================================
    // Reversible modifiers
    // ========================================================================
    ModSpeed(ModSpeed),
    ModStat(ModStat),
    ModSkill(ModSkill),
    ShapeShift(ModShapeShift),
    Light(ModLight),

    // ========================================================================
    // Instantaneous / external
    // ========================================================================
    Dispel(ModDispel),
    /// Behaviour lives in the scripting layer; no payload.
    Script,
}

impl EffectKind {
    pub const fn effect_type(&self) -> EffectType {
        match self {
            Self::PeriodicHeal(_) => EffectType::PeriodicHeal,
            Self::PeriodicDamage(_) => EffectType::PeriodicDamage,
            Self::PeriodicModStamina(_) => EffectType::PeriodicModStamina,
            Self::RegenHealth(_) => EffectType::RegenHealth,
            Self::RegenMana(_) => EffectType::RegenMana,
            Self::RegenSoul(_) => EffectType::RegenSoul,
            Self::PeriodicTrigger(_) => EffectType::PeriodicTrigger,
            Self::ModSpeed(_) => EffectType::ModSpeed,
            Self::ModStat(_) => EffectType::ModStat,
            Self::ModSkill(_) => EffectType::ModSkill,
            Self::ShapeShift(_) => EffectType::ShapeShift,
            Self::Light(_) => EffectType::Light,
            Self::Dispel(_) => EffectType::Dispel,
            Self::Script => EffectType::Script,
        }
    }
}

/// Payload structs that can be borrowed out of an [`EffectKind`].
///
/// Used by [`Effect::mod_effect`](super::Effect::mod_effect) to give checked,
/// typed access to a payload.
pub trait ModEffect: Sized {
    /// Payload name reported in mismatch errors.
    const NAME: &'static str;

    fn from_kind(kind: &EffectKind) -> Option<&Self>;
    fn from_kind_mut(kind: &mut EffectKind) -> Option<&mut Self>;
}

macro_rules! impl_mod_effect {
    ($payload:ty, $name:literal, $($variant:ident),+) => {
        impl ModEffect for $payload {
            const NAME: &'static str = $name;

            fn from_kind(kind: &EffectKind) -> Option<&Self> {
                match kind {
                    $(EffectKind::$variant(payload))|+ => Some(payload),
                    _ => None,
                }
            }

            fn from_kind_mut(kind: &mut EffectKind) -> Option<&mut Self> {
                match kind {
                    $(EffectKind::$variant(payload))|+ => Some(payload),
                    _ => None,
                }
            }
        }
    };
}

impl_mod_effect!(
    ModPeriodicDamage,
    "ModPeriodicDamage",
    PeriodicHeal,
    PeriodicDamage
);
impl_mod_effect!(ModPeriodicStamina, "ModPeriodicStamina", PeriodicModStamina);
impl_mod_effect!(ModRegen, "ModRegen", RegenHealth, RegenMana, RegenSoul);
impl_mod_effect!(ModPeriodicTrigger, "ModPeriodicTrigger", PeriodicTrigger);
impl_mod_effect!(ModSpeed, "ModSpeed", ModSpeed);
impl_mod_effect!(ModStat, "ModStat", ModStat);
impl_mod_effect!(ModSkill, "ModSkill", ModSkill);
impl_mod_effect!(ModShapeShift, "ModShapeShift", ShapeShift);
impl_mod_effect!(ModLight, "ModLight", Light);
impl_mod_effect!(ModDispel, "ModDispel", Dispel);

#[cfg(test)]
mod tests {
    use super::*;
    use strum::EnumCount;

    #[test]
    fn tags_are_dense_and_stable() {
        for tag in 0..EffectType::COUNT as u8 {
            let effect_type = EffectType::from_repr(tag).expect("dense tags");
            assert_eq!(effect_type.tag(), tag);
        }
        assert_eq!(EffectType::from_repr(EffectType::COUNT as u8), None);
        assert_eq!(EffectType::PeriodicTrigger.tag(), 6);
        assert_eq!(EffectType::Script.tag(), 13);
    }
}
