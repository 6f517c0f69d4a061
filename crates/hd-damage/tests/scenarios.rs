//! End-to-end attack scenarios: load, normalize, calculate, roll.

use hd_damage::{
    ActorContext, DamageCalculator, DeadlyBlowMode, ItemDescriptor, ResolutionOptions,
    RulesConfig, normalize_conditional_attacks,
};
use hd_dice::{HitLocationName, RngSource, RollType, ScriptedSource};

const ACTOR: &str = r#"{
    "name": "Nightblade",
    "strength": 15,
    "attacks": [
        {"id": "rapier", "name": "Rapier", "xmlid": "HKA", "dc": 6,
         "effect": {"killing": true}, "custom_adders": ["Blades"]},
        {"id": "kick", "name": "Kick", "xmlid": "STRIKE",
         "maneuver": {"dc_bonus": 2, "martial": true}}
    ],
    "extra_dc": [{"name": "+1 Martial DC", "dc": 1}],
    "weapon_masters": [{"name": "Weapon Master", "keyword": "blades", "damage_levels": 1}],
    "conditional_attacks": [
        {"id": "db", "name": "Deadly Blow", "xmlid": "DEADLYBLOW", "levels": 1}
    ]
}"#;

fn load_actor() -> ActorContext {
    let mut actor: ActorContext = serde_json::from_str(ACTOR).unwrap();
    normalize_conditional_attacks(&mut actor);
    actor
}

#[test]
fn rapier_with_everything() {
    let actor = load_actor();
    let rapier = actor.attacks[0].clone();
    let calc = DamageCalculator::new(RulesConfig::default().with_deadly_blow_mode(DeadlyBlowMode::Add));

    // 6 DC base, +3 STR, +3 Weapon Master, +3 Deadly Blow = 15 DC.
    let bundle = calc.calculate(&rapier, &actor, &ResolutionOptions::default());
    assert_eq!(bundle.dice_parts.dc(), 15.0);
    assert_eq!(calc.fully_qualified_effect_formula(&rapier, &actor, &ResolutionOptions::default()), "5d6K");

    let names: Vec<&str> = bundle.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Rapier", "Strength", "Weapon Master", "Deadly Blow"]);
}

#[test]
fn legacy_deadly_blow_reduces_damage() {
    let actor = load_actor();
    let rapier = actor.attacks[0].clone();
    let bundle = DamageCalculator::default().calculate(&rapier, &actor, &ResolutionOptions::default());
    assert_eq!(bundle.dice_parts.dc(), 9.0);
}

#[test]
fn martial_kick_gets_extra_dc() {
    let actor = load_actor();
    let kick = actor.attacks[1].clone();
    let options = ResolutionOptions {
        ignore_deadly_blow: true,
        ..ResolutionOptions::default()
    };
    let bundle = DamageCalculator::default().calculate(&kick, &actor, &options);
    // 3 DC of STR, +1 extra, +2 maneuver.
    assert_eq!(bundle.dice_parts.dc(), 6.0);
    assert_eq!(bundle.dice_parts.d6_count(), 6);
}

#[test]
fn missing_weapon_degrades_to_zero() {
    let sweep: ItemDescriptor = serde_json::from_str(
        r#"{"id": "sw", "name": "Weapon Sweep", "xmlid": "SWEEP",
            "maneuver": {"requires_weapon": true}}"#,
    )
    .unwrap();
    let bundle = DamageCalculator::default().calculate(&sweep, &ActorContext::default(), &ResolutionOptions::default());
    assert!(bundle.dice_parts.is_zero());
    assert!(bundle.tags.is_empty());
    assert!(bundle.base_attack_item.is_none());
}

#[tokio::test]
async fn roll_killing_attack_from_bundle() {
    let claws = ItemDescriptor::new("cl", "Claws", "RKA").killing().with_dc(5.0);
    let calc = DamageCalculator::new(RulesConfig::default().with_hit_locations(true));
    let mut roller = calc.roller_for_item(&claws, &ActorContext::default(), &ResolutionOptions::default(), None);

    // 1½d6: 4 and 5; stun multiplier ½d6: 3; location 3+4+3 = Chest, side 2.
    roller
        .roll(&mut ScriptedSource::new([4, 5, 3, 3, 4, 3, 2]))
        .await
        .unwrap();
    assert_eq!(roller.body_total().unwrap(), 7);
    assert_eq!(roller.stun_multiplier().unwrap(), 2);
    assert_eq!(roller.stun_total().unwrap(), 14);
    let location = roller.hit_location().unwrap().unwrap();
    assert_eq!(location.name, HitLocationName::Chest);
}

#[tokio::test]
async fn called_shot_keeps_location() {
    let punch = ItemDescriptor::new("p", "Punch", "HA");
    let actor = ActorContext::new("Brawler", 20.0);
    let calc = DamageCalculator::new(RulesConfig::default().with_hit_locations(true));
    let bundle = calc.calculate(&punch, &actor, &ResolutionOptions::default());
    let mut roller = calc.roller_for_bundle(&punch, &bundle, Some(HitLocationName::Head));
    assert_eq!(roller.roll_type(), Some(RollType::Normal));

    roller.roll(&mut RngSource::seeded(7)).await.unwrap();
    let location = roller.hit_location().unwrap().unwrap();
    assert_eq!(location.name, HitLocationName::Head);
    assert_eq!(roller.base_terms().unwrap()[0].len(), 4);
}

#[tokio::test]
async fn standard_effect_from_config() {
    let blast = ItemDescriptor::new("eb", "Energy Blast", "ENERGYBLAST").with_dc(6.0);
    let calc = DamageCalculator::new(RulesConfig::default().with_standard_effect(true));
    let mut roller = calc.roller_for_item(&blast, &ActorContext::default(), &ResolutionOptions::default(), None);
    roller.roll(&mut RngSource::seeded(1)).await.unwrap();
    assert!(roller.is_standard_effect());
    assert_eq!(roller.stun_total().unwrap(), 18);
    assert_eq!(roller.body_total().unwrap(), 6);
}
