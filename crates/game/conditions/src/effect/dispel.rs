use tracing::debug;

use crate::creature::Creature;

/// Payload of DISPEL: removes conditions whose name matches.
///
/// A trailing `*` turns the name into a prefix match (`"magic*"` dispels
/// `"magic shield"` and `"magic light"`). Matching is ASCII case-insensitive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModDispel {
    pub name: String,
}

impl ModDispel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn matches(&self, condition_name: &str) -> bool {
        match self.name.strip_suffix('*') {
            Some(prefix) => condition_name
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix)),
            None => condition_name.eq_ignore_ascii_case(&self.name),
        }
    }

    pub(crate) fn apply(&self, creature: &mut dyn Creature) -> usize {
        let removed = creature.dispel_conditions(self);
        debug!(pattern = %self.name, removed, creature = %creature.id(), "dispel");
        removed
    }

    pub(crate) fn refresh(&mut self, add: &Self) -> bool {
        let changed = self.name != add.name;
        self.name.clone_from(&add.name);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_ignores_case() {
        let dispel = ModDispel::new("Poisoned");
        assert!(dispel.matches("poisoned"));
        assert!(!dispel.matches("poisoned badly"));
    }

    #[test]
    fn trailing_star_matches_prefix() {
        let dispel = ModDispel::new("magic*");
        assert!(dispel.matches("magic shield"));
        assert!(dispel.matches("MAGIC"));
        assert!(!dispel.matches("mag"));
        assert!(!dispel.matches("haste"));
    }
}
