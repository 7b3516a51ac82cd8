//! Effect encoding.
//!
//! ```text
//! [type: u8][interval: u32][payload ...]
//! ```
//!
//! The payload layout depends on the type tag. Transient state (the tick
//! accumulator, a shapeshift's cached previous outfit) is never written.

use crate::config::ConditionConfig;
use crate::stream::{PropStream, PropWriteStream, WireError};

use super::{
    Effect, EffectKind, EffectType, ModDispel, ModLight, ModPeriodicDamage, ModPeriodicStamina,
    ModPeriodicTrigger, ModRegen, ModShapeShift, ModSkill, ModSpeed, ModStat,
};

impl Effect {
    /// Appends this effect to `out`. `depth` is the current periodic-trigger
    /// nesting level; nesting the reader would refuse is refused here too.
    pub fn write_to(
        &self,
        out: &mut PropWriteStream,
        config: &ConditionConfig,
        depth: usize,
    ) -> Result<(), WireError> {
        out.write_u8(self.effect_type().tag());
        out.write_u32(self.interval);

        match &self.kind {
            EffectKind::PeriodicHeal(m) | EffectKind::PeriodicDamage(m) => {
                out.write_u8(m.combat_type.tag());
                out.write_i32(m.total);
                out.write_i32(m.percent);
                out.write_i32(m.value);
                out.write_i32(m.rounds);
                out.write_i32(m.sum);
                out.write_i32(m.round_completed);
            }
            EffectKind::PeriodicModStamina(m) => out.write_i32(m.value),
            EffectKind::RegenHealth(m) | EffectKind::RegenMana(m) | EffectKind::RegenSoul(m) => {
                out.write_u8(m.stat.tag());
                out.write_i32(m.percent);
                out.write_i32(m.value);
            }
            EffectKind::PeriodicTrigger(m) => {
                if depth >= config.max_trigger_depth {
                    return Err(WireError::NestingTooDeep {
                        max: config.max_trigger_depth,
                    });
                }
                m.effect.write_to(out, config, depth + 1)?;
                out.write_u32(m.max_count);
                out.write_u32(m.count);
            }
            EffectKind::ModSpeed(m) => {
                out.write_i32(m.percent);
                out.write_i32(m.value);
                out.write_i32(m.delta);
            }
            EffectKind::ModStat(m) => {
                out.write_u8(m.stat.tag());
                out.write_i32(m.percent);
                out.write_i32(m.value);
                out.write_i32(m.delta);
            }
            EffectKind::ModSkill(m) => {
                out.write_u8(m.skill.tag());
                out.write_i32(m.percent);
                out.write_i32(m.value);
                out.write_i32(m.delta);
            }
            EffectKind::ShapeShift(m) => {
                let outfit = m.outfit();
                for field in [
                    outfit.look_type,
                    outfit.look_type_ex,
                    outfit.look_head,
                    outfit.look_body,
                    outfit.look_legs,
                    outfit.look_feet,
                    outfit.look_addons,
                ] {
                    out.write_u32(field);
                }
            }
            EffectKind::Light(m) => {
                out.write_u32(m.level);
                out.write_u32(m.color);
            }
            EffectKind::Dispel(m) => out.write_string(&m.name)?,
            EffectKind::Script => {}
        }

        Ok(())
    }

    /// Reads one effect. `depth` is the current periodic-trigger nesting level.
    pub fn read_from(
        stream: &mut PropStream<'_>,
        config: &ConditionConfig,
        depth: usize,
    ) -> Result<Self, WireError> {
        let tag = stream.read_u8()?;
        let effect_type = EffectType::from_repr(tag).ok_or(WireError::UnknownEffectType(tag))?;
        let interval = stream.read_u32()?;

        let kind = match effect_type {
            EffectType::PeriodicHeal => EffectKind::PeriodicHeal(read_damage(stream)?),
            EffectType::PeriodicDamage => EffectKind::PeriodicDamage(read_damage(stream)?),
            EffectType::PeriodicModStamina => {
                EffectKind::PeriodicModStamina(ModPeriodicStamina::new(stream.read_i32()?))
            }
            EffectType::RegenHealth => EffectKind::RegenHealth(read_regen(stream)?),
            EffectType::RegenMana => EffectKind::RegenMana(read_regen(stream)?),
            EffectType::RegenSoul => EffectKind::RegenSoul(read_regen(stream)?),
            EffectType::PeriodicTrigger => {
                if depth >= config.max_trigger_depth {
                    return Err(WireError::NestingTooDeep {
                        max: config.max_trigger_depth,
                    });
                }
                let nested = Effect::read_from(stream, config, depth + 1)?;
                let max_count = stream.read_u32()?;
                let count = stream.read_u32()?;
                let mut trigger = ModPeriodicTrigger::new(nested, max_count);
                trigger.count = count;
                EffectKind::PeriodicTrigger(trigger)
            }
            EffectType::ModSpeed => EffectKind::ModSpeed(ModSpeed {
                percent: stream.read_i32()?,
                value: stream.read_i32()?,
                delta: stream.read_i32()?,
            }),
            EffectType::ModStat => EffectKind::ModStat(ModStat {
                stat: stream.read_stat_type()?,
                percent: stream.read_i32()?,
                value: stream.read_i32()?,
                delta: stream.read_i32()?,
            }),
            EffectType::ModSkill => EffectKind::ModSkill(ModSkill {
                skill: stream.read_skill_type()?,
                percent: stream.read_i32()?,
                value: stream.read_i32()?,
                delta: stream.read_i32()?,
            }),
            EffectType::ShapeShift => EffectKind::ShapeShift(ModShapeShift {
                look_type: stream.read_u32()?,
                look_type_ex: stream.read_u32()?,
                look_head: stream.read_u32()?,
                look_body: stream.read_u32()?,
                look_legs: stream.read_u32()?,
                look_feet: stream.read_u32()?,
                look_addons: stream.read_u32()?,
                previous: None,
            }),
            EffectType::Light => {
                EffectKind::Light(ModLight::new(stream.read_u32()?, stream.read_u32()?))
            }
            EffectType::Dispel => EffectKind::Dispel(ModDispel::new(stream.read_string()?)),
            EffectType::Script => EffectKind::Script,
        };

        Ok(Effect::new(kind, interval))
    }
}

fn read_damage(stream: &mut PropStream<'_>) -> Result<ModPeriodicDamage, WireError> {
    Ok(ModPeriodicDamage {
        combat_type: stream.read_combat_type()?,
        total: stream.read_i32()?,
        percent: stream.read_i32()?,
        value: stream.read_i32()?,
        rounds: stream.read_i32()?,
        sum: stream.read_i32()?,
        round_completed: stream.read_i32()?,
    })
}

fn read_regen(stream: &mut PropStream<'_>) -> Result<ModRegen, WireError> {
    Ok(ModRegen {
        stat: stream.read_stat_type()?,
        percent: stream.read_i32()?,
        value: stream.read_i32()?,
    })
}
