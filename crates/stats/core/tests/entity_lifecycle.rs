use stat_core::{
    Stat, StatCategory, StatCollection, StatConfig, StatId, StatModifiers, StatRepository,
};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

/// Entity Lifecycle Scenario
///
/// 1. Repository seeds templates, a level 5 hero is built from it
/// 2. Hero equips a sword (permanent) and drinks a potion (temporary)
/// 3. Hero takes damage, heals, and the buff wears off
/// 4. A level 6 set is merged with the hero in both directions
#[test]
fn hero_lifecycle() {
    let repository = StatRepository::new();
    let mut hero = StatCollection::from_repository(&repository, 5, true);

    assert_eq!(hero.len(), 21);
    assert!(approx(hero.stat_base_value(StatId::Health), 140.0));
    assert!(approx(hero.stat_base_value(StatId::Strength), 18.0));
    assert!(approx(hero.stat_base_value(StatId::Attack), 25.0));
    assert!(hero.validate_integrity().is_empty());

    // Equipment and buffs
    hero.add_permanent_modifier(StatId::Attack, StatModifiers::flat(15.0));
    hero.add_temporary_modifier(StatId::Attack, StatModifiers::percentage(0.5));
    // (25 + 15) × 1.5
    assert!(approx(hero.stat_value(StatId::Attack, &repository), 60.0));

    // Combat damage is applied to storage
    hero.modify_stat_value(StatId::Health, -126.0);
    assert!(approx(hero.stat_value(StatId::Health, &repository), 14.0));
    assert!(hero.critical().contains_key(&StatId::Health));

    hero.restore_stat_to_max(StatId::Health);
    assert!(approx(hero.stat_value(StatId::Health, &repository), 999.0));
    assert!(!hero.critical().contains_key(&StatId::Health));

    // Buff expires
    hero.clear_all_temporary_modifiers();
    assert!(approx(hero.stat_value(StatId::Attack, &repository), 40.0));
    assert_eq!(hero.combined_modifiers(StatId::Attack), StatModifiers::flat(15.0));

    // Level up: a non-overwriting merge keeps existing bases and skips modifiers
    let next_level = StatCollection::from_repository(&repository, 6, true);
    hero.copy_from(&next_level, false);
    assert!(approx(hero.stat_base_value(StatId::Attack), 25.0));

    let mut merged = next_level.clone();
    merged.copy_from(&hero, false);
    assert!(approx(merged.stat_base_value(StatId::Attack), 28.0));
    assert!(merged.combined_modifiers(StatId::Attack).is_neutral());
}

#[test]
fn collection_and_stat_modifiers_are_distinct_mechanisms() {
    let repository = StatRepository::new();
    let mut stats = StatCollection::new();
    stats.set_stat(StatId::Mana, repository.create_instance(StatId::Mana, None, None, None));

    // Live overlay: vanishes once removed.
    stats.add_temporary_modifier(StatId::Mana, StatModifiers::multiplier(2.0));
    assert!(approx(stats.stat_value(StatId::Mana, &repository), 200.0));
    stats.clear_temporary_modifiers(StatId::Mana);
    assert!(approx(stats.stat_value(StatId::Mana, &repository), 100.0));

    // One-shot application: stays after the fact.
    let boosted = stats
        .stored(StatId::Mana)
        .cloned()
        .map(|mana| mana.with_modifiers_applied(&StatModifiers::multiplier(2.0)));
    stats.set_stat(StatId::Mana, boosted.expect("mana is stored"));
    assert!(approx(stats.stat_value(StatId::Mana, &repository), 200.0));
    assert!(stats.combined_modifiers(StatId::Mana).is_neutral());
}

#[test]
fn isolated_repositories_do_not_share_state() {
    let mut custom = StatRepository::with_config(StatConfig::new().without_defaults());
    let default = StatRepository::new();

    custom
        .register(
            Stat::new(StatId::Luck, "Fortune", 3.0, 0.0, 7.0)
                .with_category(StatCategory::Tertiary),
        )
        .expect("fresh id");

    assert_eq!(custom.len(), 1);
    assert_eq!(default.get(StatId::Luck).name, "Luck");
    assert_eq!(custom.get(StatId::Luck).name, "Fortune");

    let stats = StatCollection::new();
    assert_eq!(stats.get_stat(StatId::Luck, &custom).max_value, 7.0);
    assert_eq!(stats.get_stat(StatId::Luck, &default).max_value, 999.0);
}

#[cfg(feature = "serde")]
#[test]
fn save_data_round_trip() {
    let repository = StatRepository::new();
    let mut hero = StatCollection::from_repository(&repository, 2, false);
    hero.add_permanent_modifier(StatId::Defense, StatModifiers::flat(4.0));
    hero.add_temporary_modifier(StatId::Speed, StatModifiers::multiplier(1.25));
    hero.modify_stat_value(StatId::Health, -33.0);

    let bytes = hero.to_bytes().expect("serialize");
    let restored = StatCollection::from_bytes(&bytes).expect("deserialize");
    assert_eq!(restored, hero);

    let json = serde_json::to_string(&hero).expect("json");
    let from_json: StatCollection = serde_json::from_str(&json).expect("json back");
    assert_eq!(from_json, hero);
}
