//! Condition errors.

use crate::effect::EffectType;
use crate::error::{ErrorSeverity, GameError};

use super::ConditionState;

/// Errors raised by condition and effect operations that are not lifecycle hooks.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    /// A typed payload view was requested for the wrong effect variant.
    #[error("payload {expected} requested from {found} effect")]
    PayloadMismatch {
        expected: &'static str,
        found: EffectType,
    },

    /// A lifecycle hook was called out of order.
    #[error("condition `{name}` is {state}, expected {expected}")]
    InvalidState {
        name: String,
        state: ConditionState,
        expected: ConditionState,
    },
}

impl GameError for ConditionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PayloadMismatch { .. } | Self::InvalidState { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PayloadMismatch { .. } => "CONDITION_PAYLOAD_MISMATCH",
            Self::InvalidState { .. } => "CONDITION_INVALID_STATE",
        }
    }
}
