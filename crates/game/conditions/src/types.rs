//! Shared value types referenced by conditions, effects and the creature boundary.
//!
//! Every enum here travels over the wire as a single `u8` tag equal to its
//! discriminant. Reordering variants is a breaking change to saved data.

use std::fmt;

/// Identifier of a creature in the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureId(pub u32);

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Damage/heal classification attributed to an effect.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::FromRepr,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum CombatType {
    #[default]
    None = 0,
    Physical,
    Energy,
    Earth,
    Fire,
    Undefined,
    LifeDrain,
    ManaDrain,
    Healing,
    Drown,
    Ice,
    Holy,
    Death,
}

impl CombatType {
    /// Wire tag.
    pub const fn tag(self) -> u8 {
        self as u8
    }

    pub const fn is_healing(self) -> bool {
        matches!(self, Self::Healing)
    }
}

/// Classification used for immunity and cure matching.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::FromRepr,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum MechanicType {
    #[default]
    None = 0,
    Poison,
    Fire,
    Energy,
    Drown,
    Freeze,
    Dazzle,
    Curse,
    Bleed,
    Paralyze,
    Drunk,
    Shapeshift,
    Invisible,
    Silence,
}

impl MechanicType {
    /// Wire tag.
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

/// Player attribute addressed by stat modifiers and percent regeneration.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::FromRepr,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum PlayerStatType {
    #[default]
    MaxHealth = 0,
    MaxMana,
    MaxSoul,
    MagicLevel,
}

impl PlayerStatType {
    /// Wire tag.
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

/// Player skill addressed by skill modifiers.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::FromRepr,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum SkillType {
    #[default]
    Fist = 0,
    Club,
    Sword,
    Axe,
    Distance,
    Shield,
    Fishing,
}

impl SkillType {
    /// Wire tag.
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

/// Why a condition is being ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ConditionEnd {
    /// Duration ran out.
    Expired,
    /// Removed explicitly by the server or a script.
    Removed,
    /// Removed by a dispel effect.
    Dispelled,
    /// The creature died.
    Death,
    /// Cured (potion, spell, protection zone).
    Cured,
}

/// Creature appearance tuple consumed by shapeshift effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outfit {
    pub look_type: u32,
    pub look_type_ex: u32,
    pub look_head: u32,
    pub look_body: u32,
    pub look_legs: u32,
    pub look_feet: u32,
    pub look_addons: u32,
}

impl Outfit {
    /// Outfit showing a creature look type with default colors.
    pub const fn look(look_type: u32) -> Self {
        Self {
            look_type,
            look_type_ex: 0,
            look_head: 0,
            look_body: 0,
            look_legs: 0,
            look_feet: 0,
            look_addons: 0,
        }
    }

    /// Outfit showing an item instead of a creature.
    pub const fn item(look_type_ex: u32) -> Self {
        Self {
            look_type: 0,
            look_type_ex,
            look_head: 0,
            look_body: 0,
            look_legs: 0,
            look_feet: 0,
            look_addons: 0,
        }
    }
}

/// Light emitted by a creature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightInfo {
    pub level: u32,
    pub color: u32,
}

impl LightInfo {
    pub const fn new(level: u32, color: u32) -> Self {
        Self { level, color }
    }
}

/// Who or what caused a condition.
///
/// Transient: never written to the wire, recomputed by the combat layer when
/// a saved condition is reattached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSource {
    /// Attacking creature, if the condition came from one.
    pub attacker: Option<CreatureId>,
    /// Item (rune, field, weapon) that delivered the condition.
    pub item_id: Option<u32>,
    /// Whether the source counts as an attack (drives in-fight/PvP rules).
    pub aggressive: bool,
}

impl CombatSource {
    pub fn from_attacker(attacker: CreatureId) -> Self {
        Self {
            attacker: Some(attacker),
            item_id: None,
            aggressive: true,
        }
    }

    pub fn with_item(mut self, item_id: u32) -> Self {
        self.item_id = Some(item_id);
        self
    }
}
