//! Powers whose base dice are their own DC.

use super::{AttackInput, AttackStrategy, BaseDice, Contribution};
use crate::error::DamageResult;
use crate::item::ItemDescriptor;

/// A power with its own DC, optionally boosted by the attacker's STR
/// (hand-to-hand attacks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerStrategy {
    adds_strength: bool,
}

impl PowerStrategy {
    /// Damage comes from the power alone.
    pub fn direct() -> Self {
        Self {
            adds_strength: false,
        }
    }

    /// STR adds to the power's damage.
    pub fn strength_adding() -> Self {
        Self {
            adds_strength: true,
        }
    }
}

impl AttackStrategy for PowerStrategy {
    fn compute_base_dice(&self, input: &AttackInput<'_>) -> DamageResult<BaseDice> {
        Ok(BaseDice {
            item: input.item.clone(),
            dc: input.item.dc,
            label: input.item.name.clone(),
            strength_is_base: false,
        })
    }

    fn compute_added_dice(&self, input: &AttackInput<'_>, _base: &BaseDice) -> Vec<Contribution> {
        if self.adds_strength {
            vec![Contribution::new("Strength", input.strength_dc())]
        } else {
            Vec::new()
        }
    }

    fn describe(&self, item: &ItemDescriptor) -> String {
        if self.adds_strength {
            format!("{}: {} DC power plus strength", item.name, item.dc)
        } else {
            format!("{}: {} DC power", item.name, item.dc)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use crate::context::{ActorContext, ResolutionOptions};

    #[test]
    fn strength_adds_for_hand_to_hand() {
        let item = ItemDescriptor::new("ha", "Punch", "HA").with_dc(3.0);
        let actor = ActorContext::new("Brick", 20.0);
        let options = ResolutionOptions::default();
        let config = RulesConfig::default();
        let input = AttackInput {
            item: &item,
            context: &actor,
            options: &options,
            config: &config,
        };
        let strategy = PowerStrategy::strength_adding();
        let base = strategy.compute_base_dice(&input).unwrap();
        assert_eq!(base.dc, 3.0);
        assert!(!base.strength_is_base);
        assert_eq!(
            strategy.compute_added_dice(&input, &base),
            vec![Contribution::new("Strength", 4.0)]
        );
        assert!(PowerStrategy::direct()
            .compute_added_dice(&input, &base)
            .is_empty());
    }
}
