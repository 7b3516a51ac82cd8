use game_conditions::{
    CombatSource, CombatType, Condition, ConditionConfig, ConditionFlags, ConditionId, CreatureId,
    Effect, MechanicType, MemoryCreature, ModPeriodicDamage, Outfit, PlayerStatType, PropStream,
    PropWriteStream, SkillType, WireError, create_condition, create_condition_from_stream,
    create_condition_from_stream_with, create_named_condition, create_period_damage_condition,
};

fn encode(condition: &Condition) -> Vec<u8> {
    let mut out = PropWriteStream::new();
    condition.serialize(&mut out).expect("serialize");
    out.into_bytes()
}

/// A condition exercising every effect kind, in a deliberate order.
fn kitchen_sink() -> Condition {
    let mut condition = create_named_condition(
        "kitchen sink",
        12_345,
        MechanicType::Curse,
        CombatType::Death,
        77,
        ConditionFlags::INFIGHT | ConditionFlags::DRUNK,
    );
    condition.add_effect(Effect::script(500));
    condition.add_effect(Effect::periodic_damage(2000, CombatType::Death, 120, 2, 3, 4));
    condition.add_effect(Effect::periodic_heal(1000, 25, 2));
    condition.add_effect(Effect::mod_stamina(60_000, -1));
    condition.add_effect(Effect::regen_health(1000, 5));
    condition.add_effect(Effect::regen_percent_mana(1000, PlayerStatType::MaxMana, 3));
    condition.add_effect(Effect::regen_soul(3000, 1));
    condition.add_effect(Effect::periodic_trigger(
        750,
        Effect::periodic_damage(0, CombatType::Holy, 0, 0, 9, 0),
        4,
    ));
    condition.add_effect(Effect::mod_speed(-20, 5));
    condition.add_effect(Effect::mod_stat(PlayerStatType::MagicLevel, 2));
    condition.add_effect(Effect::mod_percent_skill(SkillType::Distance, 15));
    condition.add_effect(Effect::shapeshift(Outfit {
        look_type: 130,
        look_type_ex: 0,
        look_head: 78,
        look_body: 69,
        look_legs: 58,
        look_feet: 76,
        look_addons: 3,
    }));
    condition.add_effect(Effect::light(9, 215));
    condition.add_effect(Effect::dispel("poisoned"));
    condition
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn round_trip_preserves_every_persisted_field() {
    let condition = kitchen_sink();
    let bytes = encode(&condition);

    let mut stream = PropStream::new(&bytes);
    let decoded = Condition::unserialize(&mut stream).expect("unserialize");

    assert_eq!(decoded, condition);
    assert!(stream.is_empty());

    let types: Vec<_> = decoded.effects().iter().map(|e| e.effect_type()).collect();
    let expected: Vec<_> = condition.effects().iter().map(|e| e.effect_type()).collect();
    assert_eq!(types, expected);
}

/// Progress made while active survives; transient state does not.
#[test]
fn round_trip_mid_flight() {
    let mut creature = MemoryCreature::new(CreatureId(1)).with_health(1000);
    let mut condition = create_period_damage_condition(ConditionId::Cursed, 1000, 20, 5);
    condition.add_effect(Effect::mod_speed(-10, 0));
    condition.set_combat_source(Some(CombatSource::from_attacker(CreatureId(3))));
    condition.on_begin(&mut creature);
    condition.on_tick(&mut creature, 2400);

    let decoded = Condition::unserialize(&mut PropStream::new(&encode(&condition)))
        .expect("unserialize");

    assert_eq!(decoded, condition);
    assert_eq!(decoded.ticks(), 2600);
    assert_eq!(decoded.combat_source(), None);
    assert_eq!(decoded.state(), game_conditions::ConditionState::Inactive);

    let damage = decoded.effects()[0]
        .mod_effect::<ModPeriodicDamage>()
        .expect("damage payload");
    assert_eq!(damage.round_completed, 2);
    assert_eq!(damage.sum, 40);
    assert_eq!(decoded.effects()[0].tick_count(), 0);
}

/// Conditions are written back to back; each read consumes exactly its own bytes.
#[test]
fn consecutive_conditions_share_a_stream() {
    let first = kitchen_sink();
    let second = create_condition(ConditionId::Haste, 900, 1, ConditionFlags::PERSISTENT);

    let mut out = PropWriteStream::new();
    first.serialize(&mut out).expect("first");
    second.serialize(&mut out).expect("second");
    let bytes = out.into_bytes();

    let mut stream = PropStream::new(&bytes);
    assert_eq!(create_condition_from_stream(&mut stream), Some(first));
    assert_eq!(create_condition_from_stream(&mut stream), Some(second));
    assert!(stream.is_empty());
}

#[test]
fn unknown_flag_bits_survive() {
    let mut condition = create_condition(ConditionId::Light, 10, 0, ConditionFlags::empty());
    condition.set_flags(ConditionFlags::from_bits_retain(0x8000_0001));

    let decoded = Condition::unserialize(&mut PropStream::new(&encode(&condition)))
        .expect("unserialize");

    assert_eq!(decoded.flags().bits(), 0x8000_0001);
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn every_truncation_is_rejected() {
    let bytes = encode(&kitchen_sink());

    for len in 0..bytes.len() {
        let mut stream = PropStream::new(&bytes[..len]);
        let result = Condition::unserialize(&mut stream);
        assert!(
            matches!(result, Err(WireError::UnexpectedEof { .. })),
            "prefix of {len} bytes: {result:?}"
        );
    }
}

#[test]
fn unknown_effect_tag_is_rejected() {
    let mut condition = create_condition(ConditionId::Poison, 10, 0, ConditionFlags::empty());
    condition.add_effect(Effect::regen_health(1000, 1));
    let mut bytes = encode(&condition);

    // name "poisoned" (2 + 8) + two tags (2) + three u32 (12) + count (4)
    let effect_offset = 2 + 8 + 2 + 12 + 4;
    bytes[effect_offset] = 0x7F;

    let mut stream = PropStream::new(&bytes);
    assert_eq!(
        Condition::unserialize(&mut stream),
        Err(WireError::UnknownEffectType(0x7F))
    );
    assert_eq!(create_condition_from_stream(&mut PropStream::new(&bytes)), None);
}

#[test]
fn unknown_combat_and_mechanic_tags_are_rejected() {
    let bytes = encode(&create_condition(ConditionId::Fire, 10, 0, ConditionFlags::empty()));
    // name "burning" is 2 + 7 bytes
    let combat_offset = 9;

    let mut bad_combat = bytes.clone();
    bad_combat[combat_offset] = 200;
    assert_eq!(
        Condition::unserialize(&mut PropStream::new(&bad_combat)),
        Err(WireError::UnknownCombatType(200))
    );

    let mut bad_mechanic = bytes;
    bad_mechanic[combat_offset + 1] = 201;
    assert_eq!(
        Condition::unserialize(&mut PropStream::new(&bad_mechanic)),
        Err(WireError::UnknownMechanicType(201))
    );
}

#[test]
fn invalid_name_is_rejected() {
    let bytes = [0x02, 0x00, 0xFF, 0xFE];
    assert_eq!(
        Condition::unserialize(&mut PropStream::new(&bytes)),
        Err(WireError::InvalidUtf8 { offset: 0 })
    );
}

#[test]
fn limits_come_from_config() {
    let bytes = encode(&kitchen_sink());
    let strict = ConditionConfig::default().with_max_effects(3);

    let mut stream = PropStream::new(&bytes);
    assert!(create_condition_from_stream_with(&mut stream, &strict).is_none());

    let no_triggers = ConditionConfig::default().with_max_trigger_depth(0);
    assert_eq!(
        Condition::unserialize_with(&mut PropStream::new(&bytes), &no_triggers),
        Err(WireError::NestingTooDeep { max: 0 })
    );
}

fn nested_triggers(depth: usize) -> Condition {
    let mut effect = Effect::script(0);
    for _ in 0..depth {
        effect = Effect::periodic_trigger(100, effect, 1);
    }
    let mut condition = create_condition(ConditionId::Energy, 1000, 0, ConditionFlags::empty());
    condition.add_effect(effect);
    condition
}

/// Whatever the writer accepts, the reader accepts under the same limits.
#[test]
fn writer_refuses_what_reader_would() {
    let max = ConditionConfig::DEFAULT_MAX_TRIGGER_DEPTH;

    let deepest = nested_triggers(max);
    let decoded = Condition::unserialize(&mut PropStream::new(&encode(&deepest)));
    assert_eq!(decoded, Ok(deepest));

    let mut out = PropWriteStream::new();
    assert_eq!(
        nested_triggers(max + 1).serialize(&mut out),
        Err(WireError::NestingTooDeep { max })
    );
    assert!(out.is_empty());
}

/// A malformed record leaves the stream at the start of that record.
#[test]
fn malformed_record_keeps_stream_position() {
    let mut out = PropWriteStream::new();
    create_condition(ConditionId::Haste, 900, 1, ConditionFlags::empty())
        .serialize(&mut out)
        .expect("first");
    let first_len = out.len();
    kitchen_sink().serialize(&mut out).expect("second");
    let bytes = out.into_bytes();
    let truncated = &bytes[..bytes.len() - 1];

    let mut stream = PropStream::new(truncated);
    assert!(create_condition_from_stream(&mut stream).is_some());
    assert_eq!(stream.position(), first_len);

    assert!(create_condition_from_stream(&mut stream).is_none());
    assert_eq!(stream.position(), first_len);
}
