//! In-memory creature used by tooling and tests.

use strum::EnumCount;

use super::{CombatChange, Creature, ScriptEvent};
use crate::effect::{EffectContext, ModDispel};
use crate::types::{CreatureId, LightInfo, MechanicType, Outfit, PlayerStatType, SkillType};

/// Plain-data creature that records everything the engine does to it.
///
/// Resources are clamped to `[0, max]` where the max is the matching
/// [`PlayerStatType`]; modifiers (speed, stats, skills) are not clamped so
/// that reversal is exact.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryCreature {
    pub id: CreatureId,
    pub base_speed: i32,
    pub speed: i32,
    pub health: i32,
    pub mana: i32,
    pub soul: i32,
    pub stamina: i32,
    stats: [i32; PlayerStatType::COUNT],
    skills: [i32; SkillType::COUNT],
    pub outfit: Outfit,
    pub light_override: Option<LightInfo>,
    pub immunities: Vec<MechanicType>,
    pub shapeshift_locked: bool,
    /// Names of conditions the owner considers attached; dispel removes from here.
    pub condition_names: Vec<String>,
    pub combat_log: Vec<CombatChange>,
    pub dispelled: Vec<String>,
    pub script_events: Vec<(String, ScriptEvent)>,
}

impl MemoryCreature {
    pub fn new(id: CreatureId) -> Self {
        let mut stats = [0; PlayerStatType::COUNT];
        stats[PlayerStatType::MaxHealth as usize] = 150;
        stats[PlayerStatType::MaxMana as usize] = 50;
        stats[PlayerStatType::MaxSoul as usize] = 100;

        Self {
            id,
            base_speed: 220,
            speed: 220,
            health: 150,
            mana: 50,
            soul: 100,
            stamina: 2520,
            stats,
            skills: [10; SkillType::COUNT],
            outfit: Outfit::look(128),
            light_override: None,
            immunities: Vec::new(),
            shapeshift_locked: false,
            condition_names: Vec::new(),
            combat_log: Vec::new(),
            dispelled: Vec::new(),
            script_events: Vec::new(),
        }
    }

    /// Builder: base and current speed.
    pub fn with_speed(mut self, speed: i32) -> Self {
        self.base_speed = speed;
        self.speed = speed;
        self
    }

    /// Builder: max and current health.
    pub fn with_health(mut self, health: i32) -> Self {
        self.stats[PlayerStatType::MaxHealth as usize] = health;
        self.health = health;
        self
    }

    /// Builder: max and current mana.
    pub fn with_mana(mut self, mana: i32) -> Self {
        self.stats[PlayerStatType::MaxMana as usize] = mana;
        self.mana = mana;
        self
    }

    /// Builder: immunity to a mechanic type.
    pub fn with_immunity(mut self, mechanic: MechanicType) -> Self {
        self.immunities.push(mechanic);
        self
    }

    pub fn set_stat(&mut self, stat: PlayerStatType, value: i32) {
        self.stats[stat as usize] = value;
    }

    pub fn set_skill(&mut self, skill: SkillType, value: i32) {
        self.skills[skill as usize] = value;
    }

    /// Sum of all damage taken through the combat pipeline.
    pub fn total_damage(&self) -> i32 {
        self.combat_log
            .iter()
            .filter(|c| c.is_damage())
            .fold(0, |total: i32, c| total.saturating_sub(c.amount))
    }

    /// Sum of all healing received through the combat pipeline.
    pub fn total_healing(&self) -> i32 {
        self.combat_log
            .iter()
            .filter(|c| !c.is_damage())
            .fold(0, |total: i32, c| total.saturating_add(c.amount))
    }

    fn clamp_resource(value: i32, max: i32) -> i32 {
        value.clamp(0, max.max(0))
    }
}

impl Creature for MemoryCreature {
    fn id(&self) -> CreatureId {
        self.id
    }

    fn is_immune(&self, mechanic: MechanicType) -> bool {
        self.immunities.contains(&mechanic)
    }

    fn base_speed(&self) -> i32 {
        self.base_speed
    }

    fn speed(&self) -> i32 {
        self.speed
    }

    fn change_speed(&mut self, delta: i32) {
        self.speed = self.speed.saturating_add(delta);
    }

    fn stat(&self, stat: PlayerStatType) -> i32 {
        self.stats[stat as usize]
    }

    fn change_stat(&mut self, stat: PlayerStatType, delta: i32) {
        self.stats[stat as usize] = self.stats[stat as usize].saturating_add(delta);
    }

    fn skill(&self, skill: SkillType) -> i32 {
        self.skills[skill as usize]
    }

    fn change_skill(&mut self, skill: SkillType, delta: i32) {
        self.skills[skill as usize] = self.skills[skill as usize].saturating_add(delta);
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn change_health(&mut self, delta: i32) {
        let max = self.stat(PlayerStatType::MaxHealth);
        self.health = Self::clamp_resource(self.health.saturating_add(delta), max);
    }

    fn mana(&self) -> i32 {
        self.mana
    }

    fn change_mana(&mut self, delta: i32) {
        let max = self.stat(PlayerStatType::MaxMana);
        self.mana = Self::clamp_resource(self.mana.saturating_add(delta), max);
    }

    fn soul(&self) -> i32 {
        self.soul
    }

    fn change_soul(&mut self, delta: i32) {
        let max = self.stat(PlayerStatType::MaxSoul);
        self.soul = Self::clamp_resource(self.soul.saturating_add(delta), max);
    }

    fn change_stamina(&mut self, delta: i32) {
        self.stamina = self.stamina.saturating_add(delta).max(0);
    }

    fn outfit(&self) -> Outfit {
        self.outfit
    }

    fn set_outfit(&mut self, outfit: Outfit) {
        self.outfit = outfit;
    }

    fn can_shapeshift(&self) -> bool {
        !self.shapeshift_locked
    }

    fn light(&self) -> Option<LightInfo> {
        self.light_override
    }

    fn set_light_override(&mut self, light: Option<LightInfo>) {
        self.light_override = light;
    }

    fn apply_combat_change(&mut self, change: &CombatChange) -> i32 {
        let before = self.health;
        self.change_health(change.amount);
        self.combat_log.push(change.clone());
        self.health - before
    }

    fn dispel_conditions(&mut self, dispel: &ModDispel) -> usize {
        let before = self.condition_names.len();
        let mut removed = Vec::new();
        self.condition_names.retain(|name| {
            let matched = dispel.matches(name);
            if matched {
                removed.push(name.clone());
            }
            !matched
        });
        self.dispelled.extend(removed);
        before - self.condition_names.len()
    }

    fn on_script_event(&mut self, event: ScriptEvent, ctx: &EffectContext<'_>) -> bool {
        self.script_events.push((ctx.name.to_string(), event));
        true
    }
}
