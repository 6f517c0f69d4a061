//! Property tests for damage assembly.

use hd_damage::{
    ActorContext, DamageCalculator, EffectBonus, ItemDescriptor, ManeuverInfo, ResolutionOptions,
    RulesConfig,
};
use proptest::prelude::*;

fn actor_with_bonus(dc: f64) -> ActorContext {
    ActorContext {
        effect_bonuses: vec![EffectBonus {
            name: "Bonus".to_string(),
            dc,
            target: None,
        }],
        ..ActorContext::default()
    }
}

fn attack(dc: f64, killing: bool) -> ItemDescriptor {
    let item = ItemDescriptor::new("atk", "Attack", "ENERGYBLAST").with_dc(dc);
    if killing { item.killing() } else { item }
}

proptest! {
    #[test]
    fn doubling_limit_caps_at_twice_base(
        base in 0i32..=30,
        bonus in 0i32..=40,
        killing in any::<bool>(),
    ) {
        let calc = DamageCalculator::new(RulesConfig::default().with_double_damage_limit(true));
        let bundle = calc.calculate(
            &attack(f64::from(base), killing),
            &actor_with_bonus(f64::from(bonus)),
            &ResolutionOptions::default(),
        );
        let expected = f64::from(base + bonus.min(base));
        prop_assert_eq!(bundle.dice_parts.dc(), expected);
    }

    #[test]
    fn velocity_rides_above_the_cap(
        strength in 0i32..=12,
        bonus in 0i32..=20,
        velocity in 0i32..=60,
    ) {
        let move_by = ItemDescriptor::new("mb", "Move By", "MOVEBY").with_maneuver(ManeuverInfo {
            effect: "[NORMALDC] +v/10".to_string(),
            ..ManeuverInfo::default()
        });
        let actor = ActorContext {
            strength: f64::from(strength * 5),
            ..actor_with_bonus(f64::from(bonus))
        };
        let options = ResolutionOptions {
            velocity: f64::from(velocity),
            double_damage_limit: Some(true),
            ..ResolutionOptions::default()
        };
        let bundle = DamageCalculator::default().calculate(&move_by, &actor, &options);
        let expected = f64::from(strength + bonus.min(strength) + velocity / 10);
        prop_assert_eq!(bundle.dice_parts.dc(), expected);
    }

    #[test]
    fn total_never_negative(base in 0i32..=20, bonus in -40i32..=20, killing in any::<bool>()) {
        let bundle = DamageCalculator::default().calculate(
            &attack(f64::from(base), killing),
            &actor_with_bonus(f64::from(bonus)),
            &ResolutionOptions::default(),
        );
        prop_assert!(bundle.dice_parts.dc() >= 0.0);
        prop_assert!(bundle.dice_parts.d6_count() >= 0);
        prop_assert!(bundle.dice_parts.half_die_count() >= 0);
        prop_assert!(bundle.dice_parts.constant() >= 0);
        if base + bonus < 0 {
            prop_assert!(bundle.dice_parts.is_zero());
        }
    }

    #[test]
    fn calculation_leaves_inputs_untouched(base in 0i32..=20, bonus in -10i32..=10) {
        let item = attack(f64::from(base), false);
        let actor = actor_with_bonus(f64::from(bonus));
        let options = ResolutionOptions::default();
        let (item_before, actor_before) = (item.clone(), actor.clone());
        let _ = DamageCalculator::default().calculate(&item, &actor, &options);
        prop_assert_eq!(item, item_before);
        prop_assert_eq!(actor, actor_before);
    }
}
