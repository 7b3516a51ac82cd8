/// Condition engine limits and tunable parameters.
///
/// The wire reader uses these to refuse hostile or corrupted input before
/// allocating for it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionConfig {
    /// Maximum number of effects accepted in one serialized condition.
    pub max_effects: usize,
    /// Maximum nesting depth of periodic-trigger effects.
    pub max_trigger_depth: usize,
}

impl ConditionConfig {
    // ===== hard limits of the wire format =====
    /// Strings are prefixed with a `u16` length.
    pub const MAX_NAME_LEN: usize = u16::MAX as usize;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_EFFECTS: usize = 64;
    pub const DEFAULT_MAX_TRIGGER_DEPTH: usize = 4;

    pub const fn new() -> Self {
        Self {
            max_effects: Self::DEFAULT_MAX_EFFECTS,
            max_trigger_depth: Self::DEFAULT_MAX_TRIGGER_DEPTH,
        }
    }

    pub fn with_max_effects(mut self, max_effects: usize) -> Self {
        self.max_effects = max_effects;
        self
    }

    pub fn with_max_trigger_depth(mut self, max_trigger_depth: usize) -> Self {
        self.max_trigger_depth = max_trigger_depth;
        self
    }
}

impl Default for ConditionConfig {
    fn default() -> Self {
        Self::new()
    }
}
