//! Appearance overrides: shapeshift and light.

use crate::creature::Creature;
use crate::types::{LightInfo, Outfit};

/// Payload of SHAPESHIFT.
#[derive(Clone, Debug, Default, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModShapeShift {
    pub look_type: u32,
    pub look_type_ex: u32,
    pub look_head: u32,
    pub look_body: u32,
    pub look_legs: u32,
    pub look_feet: u32,
    pub look_addons: u32,

    /// Appearance before the shapeshift began. Transient.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub previous: Option<Outfit>,
}

// Equality covers the persisted appearance only.
impl PartialEq for ModShapeShift {
    fn eq(&self, other: &Self) -> bool {
        self.outfit() == other.outfit()
    }
}

impl ModShapeShift {
    pub fn new(outfit: Outfit) -> Self {
        Self {
            look_type: outfit.look_type,
            look_type_ex: outfit.look_type_ex,
            look_head: outfit.look_head,
            look_body: outfit.look_body,
            look_legs: outfit.look_legs,
            look_feet: outfit.look_feet,
            look_addons: outfit.look_addons,
            previous: None,
        }
    }

    pub fn outfit(&self) -> Outfit {
        Outfit {
            look_type: self.look_type,
            look_type_ex: self.look_type_ex,
            look_head: self.look_head,
            look_body: self.look_body,
            look_legs: self.look_legs,
            look_feet: self.look_feet,
            look_addons: self.look_addons,
        }
    }

    pub(crate) fn begin(&mut self, creature: &mut dyn Creature) -> bool {
        if !creature.can_shapeshift() {
            return false;
        }
        self.previous = Some(creature.outfit());
        creature.set_outfit(self.outfit());
        true
    }

    pub(crate) fn end(&mut self, creature: &mut dyn Creature) {
        if let Some(previous) = self.previous.take() {
            creature.set_outfit(previous);
        }
    }

    /// Switches to the incoming appearance, keeping the original one for `end`.
    pub(crate) fn refresh(&mut self, creature: &mut dyn Creature, add: &Self) -> bool {
        let changed = self.outfit() != add.outfit();
        let previous = self.previous.take();
        *self = Self::new(add.outfit());
        self.previous = previous;
        if self.previous.is_some() {
            creature.set_outfit(self.outfit());
        }
        changed
    }
}

/// Payload of LIGHT.
#[derive(Clone, Debug, Default, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModLight {
    pub level: u32,
    pub color: u32,

    /// Whether this effect set the creature's light. Transient.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub applied: bool,
    /// Light override before this effect began. Transient.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub previous: Option<LightInfo>,
}

// Equality covers the persisted light only.
impl PartialEq for ModLight {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && self.color == other.color
    }
}

impl ModLight {
    pub fn new(level: u32, color: u32) -> Self {
        Self {
            level,
            color,
            applied: false,
            previous: None,
        }
    }

    pub fn light(&self) -> LightInfo {
        LightInfo::new(self.level, self.color)
    }

    pub(crate) fn begin(&mut self, creature: &mut dyn Creature) {
        self.previous = creature.light();
        self.applied = true;
        creature.set_light_override(Some(self.light()));
    }

    /// Restores the light seen at begin; a no-op if this effect never applied.
    pub(crate) fn end(&mut self, creature: &mut dyn Creature) {
        if std::mem::take(&mut self.applied) {
            creature.set_light_override(self.previous.take());
        }
    }

    pub(crate) fn refresh(&mut self, creature: &mut dyn Creature, add: &Self) -> bool {
        let changed = self != add;
        self.level = add.level;
        self.color = add.color;
        if self.applied {
            creature.set_light_override(Some(self.light()));
        }
        changed
    }
}
