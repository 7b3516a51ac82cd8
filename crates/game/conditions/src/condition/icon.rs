use crate::effect::EffectKind;
use crate::flags::{ConditionFlags, IconType};
use crate::types::{CombatType, MechanicType};

use super::Condition;

const FLAG_ICONS: [(ConditionFlags, IconType); 6] = [
    (ConditionFlags::INFIGHT, IconType::SWORDS),
    (ConditionFlags::SLOW, IconType::PARALYZE),
    (ConditionFlags::HASTE, IconType::HASTE),
    (ConditionFlags::STRENGTHENED, IconType::STRENGTHENED),
    (ConditionFlags::MANASHIELD, IconType::MANASHIELD),
    (ConditionFlags::DRUNK, IconType::DRUNK),
];

impl Condition {
    /// Status icons the client should show for this condition.
    ///
    /// Derived from the flags, the mechanic type and the effects; never stored.
    pub fn icon(&self) -> IconType {
        let mut icons = IconType::empty();

        for (flag, icon) in FLAG_ICONS {
            if self.flags.contains(flag) {
                icons |= icon;
            }
        }

        icons |= match self.mechanic_type {
            MechanicType::Paralyze => IconType::PARALYZE,
            MechanicType::Drunk => IconType::DRUNK,
            _ => IconType::empty(),
        };

        for effect in &self.effects {
            icons |= match effect.kind() {
                EffectKind::PeriodicDamage(damage) => {
                    let combat_type = match damage.combat_type {
                        CombatType::None => self.combat_type,
                        other => other,
                    };
                    IconType::for_combat(combat_type)
                }
                EffectKind::ModSpeed(speed) if speed.percent < 0 || speed.value < 0 => {
                    IconType::PARALYZE
                }
                EffectKind::ModSpeed(_) => IconType::HASTE,
                _ => IconType::empty(),
            };
        }

        icons
    }
}
