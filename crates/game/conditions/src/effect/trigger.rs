use crate::creature::Creature;

use super::{Effect, EffectContext};

/// Payload of PERIODIC_TRIGGER: fires an owned nested effect up to `max_count` times.
///
/// The nested effect is boxed and owned; cloning the trigger deep-copies it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModPeriodicTrigger {
    pub effect: Box<Effect>,
    pub max_count: u32,

    /// Times the nested effect has fired.
    pub count: u32,
}

impl ModPeriodicTrigger {
    pub fn new(effect: Effect, max_count: u32) -> Self {
        Self {
            effect: Box::new(effect),
            max_count,
            count: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.count >= self.max_count
    }

    pub(crate) fn fire(&mut self, creature: &mut dyn Creature, ctx: &EffectContext<'_>) -> bool {
        if self.is_finished() {
            return false;
        }
        self.count += 1;
        self.effect.fire(creature, ctx);
        true
    }

    pub(crate) fn refresh(&mut self, add: &Self) -> bool {
        let changed = self.count != 0 || self.max_count != add.max_count || self.effect != add.effect;
        *self = Self::new((*add.effect).clone(), add.max_count);
        changed
    }
}
