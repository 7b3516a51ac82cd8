//! Wire format errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors raised while reading or writing the condition wire format.
///
/// Reading stops at the first error; no partially decoded condition is ever
/// handed back to the caller.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WireError {
    /// Stream ended before a complete value could be read.
    #[error("unexpected end of stream at offset {offset} (needed {needed} bytes, {remaining} left)")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("unknown effect type tag {0}")]
    UnknownEffectType(u8),

    #[error("unknown combat type tag {0}")]
    UnknownCombatType(u8),

    #[error("unknown mechanic type tag {0}")]
    UnknownMechanicType(u8),

    #[error("unknown stat type tag {0}")]
    UnknownStatType(u8),

    #[error("unknown skill type tag {0}")]
    UnknownSkillType(u8),

    #[error("string at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    #[error("string of {len} bytes exceeds the maximum of {max}")]
    StringTooLong { len: usize, max: usize },

    #[error("effect count {count} exceeds the maximum of {max}")]
    TooManyEffects { count: usize, max: usize },

    #[error("periodic trigger nesting exceeds the maximum depth of {max}")]
    NestingTooDeep { max: usize },
}

impl GameError for WireError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnexpectedEof { .. } => "WIRE_UNEXPECTED_EOF",
            Self::UnknownEffectType(_) => "WIRE_UNKNOWN_EFFECT_TYPE",
            Self::UnknownCombatType(_) => "WIRE_UNKNOWN_COMBAT_TYPE",
            Self::UnknownMechanicType(_) => "WIRE_UNKNOWN_MECHANIC_TYPE",
            Self::UnknownStatType(_) => "WIRE_UNKNOWN_STAT_TYPE",
            Self::UnknownSkillType(_) => "WIRE_UNKNOWN_SKILL_TYPE",
            Self::InvalidUtf8 { .. } => "WIRE_INVALID_UTF8",
            Self::StringTooLong { .. } => "WIRE_STRING_TOO_LONG",
            Self::TooManyEffects { .. } => "WIRE_TOO_MANY_EFFECTS",
            Self::NestingTooDeep { .. } => "WIRE_NESTING_TOO_DEEP",
        }
    }
}
