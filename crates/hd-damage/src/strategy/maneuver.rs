//! Combat maneuvers: STR-based unarmed, or built on a weapon's dice.

use super::{AttackInput, AttackStrategy, BaseDice, Contribution};
use crate::error::{DamageError, DamageResult};
use crate::item::{Edition, ItemDescriptor};

/// Unarmed maneuvers use the attacker's STR as base dice; maneuvers with a
/// weapon use the weapon's dice and add STR on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManeuverStrategy;

impl AttackStrategy for ManeuverStrategy {
    fn compute_base_dice(&self, input: &AttackInput<'_>) -> DamageResult<BaseDice> {
        let requires_weapon = input
            .item
            .maneuver
            .as_ref()
            .is_some_and(|m| m.requires_weapon);

        match &input.options.weapon {
            Some(weapon) => Ok(BaseDice {
                item: weapon.clone(),
                dc: weapon.dc,
                label: weapon.name.clone(),
                strength_is_base: false,
            }),
            None if requires_weapon => Err(DamageError::MissingBaseAttack {
                attack: input.item.name.clone(),
                reason: "maneuver requires a weapon".to_string(),
            }),
            None => Ok(BaseDice {
                item: input.item.clone(),
                dc: input.strength_dc(),
                label: "Strength".to_string(),
                strength_is_base: true,
            }),
        }
    }

    fn compute_added_dice(&self, input: &AttackInput<'_>, base: &BaseDice) -> Vec<Contribution> {
        let mut added = Vec::new();

        if let Some(maneuver) = &input.item.maneuver {
            let killing = base.item.effect.killing || input.item.effect.killing;
            let dc = if killing && input.item.edition == Edition::Old {
                maneuver.dc_bonus / 2.0
            } else {
                maneuver.dc_bonus
            };
            added.push(Contribution::new(input.item.name.clone(), dc));
        }

        if !base.strength_is_base {
            added.push(Contribution::new("Strength", input.strength_dc()));
        }
        added
    }

    fn describe(&self, item: &ItemDescriptor) -> String {
        let bonus = item.maneuver.as_ref().map_or(0.0, |m| m.dc_bonus);
        format!("{}: maneuver adding {bonus:+} DC to strength or weapon", item.name)
    }
}
