//! Condition persistence layout.
//!
//! ```text
//! [name: u16 len + utf-8]
//! [combat_type: u8][mechanic_type: u8]
//! [source_id: u32][ticks: u32][flags: u32]
//! [effect_count: u32][effect ...]
//! ```
//!
//! There is no version tag; any change to this layout breaks saved data.

use tracing::trace;

use crate::config::ConditionConfig;
use crate::effect::Effect;
use crate::flags::ConditionFlags;
use crate::stream::{PropStream, PropWriteStream, WireError};

use super::Condition;

impl Condition {
    /// Appends the persisted fields to `out` with the default limits.
    pub fn serialize(&self, out: &mut PropWriteStream) -> Result<(), WireError> {
        self.serialize_with(out, &ConditionConfig::default())
    }

    /// Appends the persisted fields to `out`, refusing anything
    /// [`Condition::unserialize_with`] would refuse under the same `config`.
    ///
    /// On error `out` is left exactly as it was.
    pub fn serialize_with(
        &self,
        out: &mut PropWriteStream,
        config: &ConditionConfig,
    ) -> Result<(), WireError> {
        if self.effects.len() > config.max_effects {
            return Err(WireError::TooManyEffects {
                count: self.effects.len(),
                max: config.max_effects,
            });
        }

        let mut buf = PropWriteStream::new();
        buf.write_string(&self.name)?;
        buf.write_u8(self.combat_type.tag());
        buf.write_u8(self.mechanic_type.tag());
        buf.write_u32(self.source_id);
        buf.write_u32(self.ticks);
        buf.write_u32(self.flags.bits());

        let count = u32::try_from(self.effects.len()).map_err(|_| WireError::TooManyEffects {
            count: self.effects.len(),
            max: u32::MAX as usize,
        })?;
        buf.write_u32(count);
        for effect in &self.effects {
            effect.write_to(&mut buf, config, 0)?;
        }

        trace!(condition = %self.name, bytes = buf.len(), "condition serialized");
        out.append(buf);
        Ok(())
    }

    /// Reads a condition with the default limits.
    pub fn unserialize(stream: &mut PropStream<'_>) -> Result<Self, WireError> {
        Self::unserialize_with(stream, &ConditionConfig::default())
    }

    /// Reads a condition, refusing input that exceeds `config`.
    ///
    /// The result is a fresh, inactive condition; the combat source must be
    /// reattached by the caller. On error `stream` is left at the start of
    /// the record.
    pub fn unserialize_with(
        stream: &mut PropStream<'_>,
        config: &ConditionConfig,
    ) -> Result<Self, WireError> {
        let mut cursor = stream.clone();
        let condition = Self::read_record(&mut cursor, config)?;
        *stream = cursor;
        Ok(condition)
    }

    fn read_record(
        stream: &mut PropStream<'_>,
        config: &ConditionConfig,
    ) -> Result<Self, WireError> {
        let name = stream.read_string()?;
        let combat_type = stream.read_combat_type()?;
        let mechanic_type = stream.read_mechanic_type()?;
        let source_id = stream.read_u32()?;
        let ticks = stream.read_u32()?;
        let flags = ConditionFlags::from_bits_retain(stream.read_u32()?);

        let count = stream.read_u32()? as usize;
        if count > config.max_effects {
            return Err(WireError::TooManyEffects {
                count,
                max: config.max_effects,
            });
        }

        let mut condition = Condition::new(name, ticks, mechanic_type, combat_type, source_id, flags);
        condition.effects.reserve_exact(count);
        for _ in 0..count {
            condition.add_effect(Effect::read_from(stream, config, 0)?);
        }

        Ok(condition)
    }
}
