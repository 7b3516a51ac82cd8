//! Common error infrastructure for game-conditions.
//!
//! Domain-specific errors live next to the code that produces them:
//! [`WireError`](crate::stream::WireError) in the stream codec and
//! [`ConditionError`](crate::condition::ConditionError) in the condition
//! module. Both implement [`GameError`] so callers can classify them
//! uniformly.
//!
//! Lifecycle hooks never return errors. A rejected `on_begin` or an expired
//! `on_tick` is a normal outcome reported as `false`.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: truncated stream, unknown effect tag
    Validation,

    /// Programming contract violation inside the server.
    ///
    /// Examples: reading a payload as the wrong variant, ticking an ended condition
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all game-conditions errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who is at fault (input vs. caller)
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log fields and test assertions.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
