use game_conditions::{
    CombatChange, CombatSource, CombatType, Condition, ConditionEnd, ConditionFlags, ConditionId,
    ConditionState, Creature, CreatureId, Effect, EffectContext, LightInfo, MechanicType,
    MemoryCreature, ModDispel, ModPeriodicDamage, ModPeriodicTrigger, Outfit, PlayerStatType,
    ScriptEvent, SkillType, create_condition, create_named_condition,
    create_period_average_damage_condition, create_period_damage_condition,
};

fn creature() -> MemoryCreature {
    MemoryCreature::new(CreatureId(1)).with_health(1000)
}

/// Ticks `condition` by `step` until it reports expiry, returning damage per tick.
fn damage_per_tick(condition: &mut Condition, creature: &mut MemoryCreature, step: u32) -> Vec<i32> {
    let mut per_tick = Vec::new();
    loop {
        let before = creature.total_damage();
        let alive = condition.on_tick(creature, step);
        per_tick.push(creature.total_damage() - before);
        if !alive {
            return per_tick;
        }
    }
}

// ============================================================================
// Periodic damage
// ============================================================================

/// Fixed damage: 50 per interval for 4 rounds, nothing afterwards.
#[test]
fn period_damage_deals_fixed_rounds() {
    let mut creature = creature();
    let mut condition = create_period_damage_condition(ConditionId::Poison, 1000, 50, 4);

    assert!(condition.on_begin(&mut creature));
    let per_tick = damage_per_tick(&mut condition, &mut creature, 1000);

    assert_eq!(per_tick, vec![50, 50, 50, 50]);
    assert!(!condition.on_tick(&mut creature, 1000));
    assert_eq!(creature.total_damage(), 200);
    assert!(creature.combat_log.iter().all(|c| c.combat_type == CombatType::Earth));

    condition.on_end(&mut creature, ConditionEnd::Expired);
    assert_eq!(condition.state(), ConditionState::Ended);
}

/// Average damage: starts at the requested damage and sums to the total.
#[test]
fn period_average_damage_tapers_to_total() {
    let mut creature = creature();
    let mut condition = create_period_average_damage_condition(ConditionId::Fire, 1000, 100, 300);

    assert!(condition.on_begin(&mut creature));
    let per_tick = damage_per_tick(&mut condition, &mut creature, 1000);

    assert_eq!(per_tick[0], 100);
    assert_eq!(per_tick.iter().sum::<i32>(), 300);
    assert!(per_tick.windows(2).all(|w| w[0] >= w[1]));
}

/// Uneven totals start below the requested damage and put the remainder on
/// the final round.
#[test]
fn period_average_damage_absorbs_rounding() {
    let mut creature = creature();
    let mut condition = create_period_average_damage_condition(ConditionId::Fire, 500, 70, 250);

    condition.on_begin(&mut creature);
    let per_tick = damage_per_tick(&mut condition, &mut creature, 500);

    assert_eq!(per_tick, vec![62, 53, 45, 36, 27, 18, 9]);
    assert_eq!(per_tick.iter().sum::<i32>(), 250);
}

/// The most negative damage value neither panics nor wraps.
#[test]
fn extreme_damage_does_not_overflow() {
    let mut creature = creature();
    let mut condition = create_period_damage_condition(ConditionId::Fire, 1000, i32::MIN, 2);

    assert!(condition.on_begin(&mut creature));
    assert!(condition.on_tick(&mut creature, 1000));
    assert!(!condition.on_tick(&mut creature, 1000));

    assert_eq!(creature.combat_log.len(), 2);
    assert!(creature.combat_log.iter().all(|c| c.amount == i32::MAX));
}

/// One big tick that spans several intervals fires every round it covers.
#[test]
fn burst_tick_catches_up() {
    let mut creature = creature();
    let mut condition = create_period_damage_condition(ConditionId::Bleeding, 1000, 50, 4);

    condition.on_begin(&mut creature);
    assert!(condition.on_tick(&mut creature, 2500));
    assert_eq!(creature.total_damage(), 100);

    assert!(!condition.on_tick(&mut creature, 10_000));
    assert_eq!(creature.total_damage(), 200);
}

/// A fresh application resets progress instead of stacking.
#[test]
fn update_restarts_periodic_damage() {
    let mut creature = creature();
    let mut condition = create_period_damage_condition(ConditionId::Poison, 1000, 50, 4);
    condition.on_begin(&mut creature);
    condition.on_tick(&mut creature, 1000);
    condition.on_tick(&mut creature, 1000);

    let mut add = create_condition(ConditionId::Poison, 6000, 0, ConditionFlags::empty());
    add.add_effect(Effect::periodic_damage(1000, CombatType::Earth, 0, 0, 30, 6));
    assert!(condition.on_update(&mut creature, &add));

    let damage = condition.effects()[0]
        .mod_effect::<ModPeriodicDamage>()
        .expect("damage payload");
    assert_eq!(damage.round_completed, 0);
    assert_eq!(damage.sum, 0);
    assert_eq!(damage.rounds, 6);
    assert_eq!(damage.value, 30);
    assert_eq!(condition.ticks(), 6000);

    let per_tick = damage_per_tick(&mut condition, &mut creature, 1000);
    assert_eq!(per_tick, vec![30; 6]);
}

/// Damage carries the condition's source id and combat source.
#[test]
fn damage_is_attributed_to_source() {
    let mut creature = creature();
    let mut condition = create_period_damage_condition(ConditionId::Energy, 100, 5, 1);
    condition.set_source_id(42);
    condition.set_combat_source(Some(CombatSource::from_attacker(CreatureId(9)).with_item(2311)));

    condition.on_begin(&mut creature);
    condition.on_tick(&mut creature, 100);

    let change = &creature.combat_log[0];
    assert_eq!(change.source_id, 42);
    assert_eq!(change.source.as_ref().and_then(|s| s.attacker), Some(CreatureId(9)));
    assert_eq!(change.source.as_ref().and_then(|s| s.item_id), Some(2311));
}

// ============================================================================
// Reversible modifiers
// ============================================================================

/// Slow by half from base 200 and back, with another modifier in between.
#[test]
fn speed_modifier_reverts_exactly() {
    let mut creature = MemoryCreature::new(CreatureId(1)).with_speed(200);
    let mut slow = create_condition(ConditionId::Paralyze, 5000, 0, ConditionFlags::empty());
    slow.add_effect(Effect::mod_speed(-50, 0));

    assert!(slow.on_begin(&mut creature));
    assert_eq!(creature.speed, 100);

    let mut haste = create_condition(ConditionId::Haste, 5000, 0, ConditionFlags::empty());
    haste.add_effect(Effect::mod_speed(0, 40));
    haste.on_begin(&mut creature);
    assert_eq!(creature.speed, 140);

    slow.on_end(&mut creature, ConditionEnd::Cured);
    assert_eq!(creature.speed, 240);

    haste.on_end(&mut creature, ConditionEnd::Expired);
    assert_eq!(creature.speed, 200);
}

#[test]
fn stat_and_skill_buffs_revert() {
    let mut creature = creature();
    creature.set_skill(SkillType::Club, 60);
    let mut condition = create_named_condition(
        "strengthened",
        10_000,
        MechanicType::None,
        CombatType::None,
        0,
        ConditionFlags::STRENGTHENED,
    );
    condition.add_effect(Effect::mod_percent_stat(PlayerStatType::MaxHealth, 10));
    condition.add_effect(Effect::mod_skill(SkillType::Club, 5));
    condition.add_effect(Effect::mod_percent_skill(SkillType::Shield, 50));

    condition.on_begin(&mut creature);
    assert_eq!(creature.stat(PlayerStatType::MaxHealth), 1100);
    assert_eq!(creature.skill(SkillType::Club), 65);
    assert_eq!(creature.skill(SkillType::Shield), 15);

    condition.on_end(&mut creature, ConditionEnd::Removed);
    assert_eq!(creature.stat(PlayerStatType::MaxHealth), 1000);
    assert_eq!(creature.skill(SkillType::Club), 60);
    assert_eq!(creature.skill(SkillType::Shield), 10);
}

/// Ending one light condition hands the light back to the one beneath it.
#[test]
fn stacked_lights_unwind() {
    let mut creature = creature();
    let mut torch = create_condition(ConditionId::Light, 5000, 0, ConditionFlags::empty());
    torch.add_effect(Effect::light(6, 215));
    let mut spark = create_condition(ConditionId::Light, 5000, 0, ConditionFlags::empty());
    spark.add_effect(Effect::light(3, 100));

    torch.on_begin(&mut creature);
    spark.on_begin(&mut creature);
    assert_eq!(creature.light(), Some(LightInfo::new(3, 100)));

    spark.on_end(&mut creature, ConditionEnd::Expired);
    assert_eq!(creature.light(), Some(LightInfo::new(6, 215)));

    torch.on_end(&mut creature, ConditionEnd::Expired);
    assert_eq!(creature.light(), None);
}

#[test]
fn shapeshift_and_light_are_restored() {
    let mut creature = creature();
    let mut condition = create_condition(ConditionId::Outfit, 3000, 0, ConditionFlags::empty());
    condition.add_effect(Effect::shapeshift(Outfit::item(2160)));
    condition.add_effect(Effect::light(8, 215));

    condition.on_begin(&mut creature);
    assert_eq!(creature.outfit, Outfit::item(2160));
    assert!(creature.light_override.is_some());

    condition.on_end(&mut creature, ConditionEnd::Death);
    assert_eq!(creature.outfit, Outfit::look(128));
    assert_eq!(creature.light_override, None);
}

// ============================================================================
// Rejection
// ============================================================================

#[test]
fn immunity_rejects_without_side_effects() {
    let mut creature = creature().with_immunity(MechanicType::Paralyze);
    let mut condition = create_condition(ConditionId::Paralyze, 5000, 0, ConditionFlags::empty());
    condition.add_effect(Effect::mod_speed(-50, 0));

    assert!(!condition.on_begin(&mut creature));
    assert_eq!(creature.speed, 220);
    assert_eq!(condition.state(), ConditionState::Inactive);
}

#[test]
fn script_can_veto_begin() {
    struct Vetoing(MemoryCreature);

    impl Creature for Vetoing {
        fn id(&self) -> CreatureId {
            self.0.id
        }
        fn base_speed(&self) -> i32 {
            self.0.base_speed()
        }
        fn speed(&self) -> i32 {
            self.0.speed()
        }
        fn change_speed(&mut self, delta: i32) {
            self.0.change_speed(delta)
        }
        fn stat(&self, stat: PlayerStatType) -> i32 {
            self.0.stat(stat)
        }
        fn change_stat(&mut self, stat: PlayerStatType, delta: i32) {
            self.0.change_stat(stat, delta)
        }
        fn skill(&self, skill: SkillType) -> i32 {
            self.0.skill(skill)
        }
        fn change_skill(&mut self, skill: SkillType, delta: i32) {
            self.0.change_skill(skill, delta)
        }
        fn health(&self) -> i32 {
            self.0.health()
        }
        fn change_health(&mut self, delta: i32) {
            self.0.change_health(delta)
        }
        fn mana(&self) -> i32 {
            self.0.mana()
        }
        fn change_mana(&mut self, delta: i32) {
            self.0.change_mana(delta)
        }
        fn soul(&self) -> i32 {
            self.0.soul()
        }
        fn change_soul(&mut self, delta: i32) {
            self.0.change_soul(delta)
        }
        fn change_stamina(&mut self, delta: i32) {
            self.0.change_stamina(delta)
        }
        fn outfit(&self) -> Outfit {
            self.0.outfit()
        }
        fn set_outfit(&mut self, outfit: Outfit) {
            self.0.set_outfit(outfit)
        }
        fn light(&self) -> Option<LightInfo> {
            self.0.light()
        }
        fn set_light_override(&mut self, light: Option<LightInfo>) {
            self.0.set_light_override(light)
        }
        fn apply_combat_change(&mut self, change: &CombatChange) -> i32 {
            self.0.apply_combat_change(change)
        }
        fn dispel_conditions(&mut self, dispel: &ModDispel) -> usize {
            self.0.dispel_conditions(dispel)
        }
        fn on_script_event(&mut self, event: ScriptEvent, _ctx: &EffectContext<'_>) -> bool {
            event != ScriptEvent::Begin
        }
    }

    let mut creature = Vetoing(creature());
    let mut condition = create_condition(ConditionId::Haste, 1000, 0, ConditionFlags::empty());
    condition.add_effect(Effect::mod_speed(0, 100));
    condition.add_effect(Effect::script(0));

    assert!(!condition.on_begin(&mut creature));
    assert_eq!(creature.0.speed, 220);
}

// ============================================================================
// Triggers, dispel, regeneration, scripts
// ============================================================================

/// Clones own their nested effect: firing one never advances the other.
#[test]
fn trigger_clones_are_independent() {
    let mut creature = creature();
    let nested = Effect::periodic_damage(0, CombatType::Fire, 0, 0, 10, 0);
    let mut original = create_condition(ConditionId::Fire, 10_000, 0, ConditionFlags::empty());
    original.add_effect(Effect::periodic_trigger(1000, nested, 3));
    let mut copy = original.clone();

    original.on_begin(&mut creature);
    original.on_tick(&mut creature, 2000);

    let count = |c: &Condition| {
        c.effects()[0]
            .mod_effect::<ModPeriodicTrigger>()
            .expect("trigger payload")
            .count
    };
    assert_eq!(count(&original), 2);
    assert_eq!(count(&copy), 0);

    copy.on_begin(&mut creature);
    copy.on_tick(&mut creature, 5000);
    assert_eq!(count(&copy), 3);
    assert_eq!(count(&original), 2);
    assert_eq!(creature.total_damage(), 50);
}

#[test]
fn trigger_dispels_periodically() {
    let mut creature = creature();
    creature.condition_names = vec!["drunk".into(), "poisoned".into(), "paralyzed".into()];
    let mut condition = create_named_condition(
        "purity",
        10_000,
        MechanicType::None,
        CombatType::None,
        0,
        ConditionFlags::empty(),
    );
    condition.add_effect(Effect::periodic_trigger(1000, Effect::dispel("p*"), 1));

    condition.on_begin(&mut creature);
    condition.on_tick(&mut creature, 1000);

    assert_eq!(creature.condition_names, vec!["drunk".to_string()]);
    assert_eq!(creature.dispelled.len(), 2);
}

#[test]
fn dispel_applies_on_begin() {
    let mut creature = creature();
    creature.condition_names = vec!["burning".into(), "haste".into()];
    let mut condition = create_named_condition(
        "cleanse",
        1,
        MechanicType::None,
        CombatType::None,
        0,
        ConditionFlags::empty(),
    );
    condition.add_effect(Effect::dispel("BURNING"));

    assert!(condition.on_begin(&mut creature));

    assert_eq!(creature.dispelled, vec!["burning".to_string()]);
}

#[test]
fn regeneration_runs_for_the_whole_duration() {
    let mut creature = creature().with_mana(500);
    creature.health = 0;
    creature.mana = 0;
    creature.soul = 0;
    let mut condition =
        create_condition(ConditionId::Regeneration, 6000, 0, ConditionFlags::empty());
    condition.add_effect(Effect::regen_health(2000, 10));
    condition.add_effect(Effect::regen_percent_mana(3000, PlayerStatType::MaxMana, 2));
    condition.add_effect(Effect::regen_soul(6000, 1));
    condition.add_effect(Effect::mod_stamina(1000, 1));

    condition.on_begin(&mut creature);
    let stamina = creature.stamina;
    while condition.on_tick(&mut creature, 1000) {}

    assert_eq!(creature.health, 30);
    assert_eq!(creature.mana, 20);
    assert_eq!(creature.soul, 1);
    assert_eq!(creature.stamina, stamina + 6);
}

#[test]
fn heal_over_time() {
    let mut creature = creature();
    creature.health = 100;
    let mut condition = create_named_condition(
        "healing",
        3000,
        MechanicType::None,
        CombatType::Healing,
        0,
        ConditionFlags::empty(),
    );
    condition.add_effect(Effect::periodic_heal(1000, 100, 3));

    condition.on_begin(&mut creature);
    while condition.on_tick(&mut creature, 1000) {}

    assert_eq!(creature.health, 400);
    assert_eq!(creature.total_healing(), 300);
}

#[test]
fn script_events_cover_the_lifecycle() {
    let mut creature = creature();
    let mut condition = create_named_condition(
        "scripted",
        2000,
        MechanicType::None,
        CombatType::None,
        0,
        ConditionFlags::empty(),
    );
    condition.add_effect(Effect::script(1000));

    condition.on_begin(&mut creature);
    condition.on_tick(&mut creature, 1000);
    let again = condition.clone();
    condition.on_update(&mut creature, &again);
    condition.on_end(&mut creature, ConditionEnd::Dispelled);

    let events: Vec<ScriptEvent> = creature.script_events.iter().map(|(_, e)| *e).collect();
    assert_eq!(
        events,
        vec![
            ScriptEvent::Begin,
            ScriptEvent::Tick,
            ScriptEvent::Update,
            ScriptEvent::End(ConditionEnd::Dispelled),
        ]
    );
    assert!(creature.script_events.iter().all(|(name, _)| name == "scripted"));
}

// ============================================================================
// Duration
// ============================================================================

/// Persistence is the PERSISTENT flag alone; a zero duration without it is expired.
#[test]
fn persistence_rule() {
    let mut creature = creature();

    let mut infinite = create_condition(ConditionId::Infight, 0, 0, ConditionFlags::PERSISTENT);
    infinite.add_effect(Effect::regen_health(1000, 1));
    assert!(infinite.is_persistent());
    infinite.on_begin(&mut creature);
    assert!(infinite.on_tick(&mut creature, 1000));
    assert_eq!(infinite.ticks(), 0);

    let mut expired = create_condition(ConditionId::Infight, 0, 0, ConditionFlags::empty());
    assert!(!expired.is_persistent());
    expired.on_begin(&mut creature);
    assert!(!expired.on_tick(&mut creature, 1000));

    let long = create_condition(ConditionId::Infight, u32::MAX, 0, ConditionFlags::empty());
    assert!(!long.is_persistent());
}
