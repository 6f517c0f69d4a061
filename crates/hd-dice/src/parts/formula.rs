//! Rendering dice parts as effect formulas.

use super::DiceParts;

/// Render dice as a short effect formula such as `3d6`, `2½d6`, `1d6+1`,
/// `-1d6`, `+1` or `0`.
///
/// D6-1 dice render as extra dice followed by the matching subtraction,
/// so two full dice and one d6-1 read `3d6-1`.
pub fn dice_parts_to_effect_formula(parts: &DiceParts) -> String {
    let negative = parts.d6_count() < 0
        || parts.half_die_count() < 0
        || parts.d6_less1_die_count() < 0
        || parts.constant() < 0;
    let sign = if negative { '-' } else { '+' };

    let half = parts.half_die_count().unsigned_abs();
    let less1 = parts.d6_less1_die_count().unsigned_abs();
    let whole = parts.d6_count().unsigned_abs() + less1 + half / 2;
    let has_half = half % 2 == 1;
    let constant = parts.constant().unsigned_abs();

    let mut dice = String::new();
    if whole > 0 || has_half {
        if whole > 0 {
            dice.push_str(&whole.to_string());
        }
        if has_half {
            dice.push('½');
        }
        dice.push_str("d6");
        if less1 > 0 {
            dice.push_str(&format!("-{less1}"));
        }
    }

    match (dice.is_empty(), constant) {
        (true, 0) => "0".to_string(),
        (true, c) => format!("{sign}{c}"),
        (false, 0) if negative => format!("-{dice}"),
        (false, 0) => dice,
        (false, c) if negative => format!("-{dice}-{c}"),
        (false, c) => format!("{dice}+{c}"),
    }
}

/// The effect formula with a `K` suffix for killing damage.
pub fn dice_parts_to_fully_qualified_effect_formula(parts: &DiceParts, killing: bool) -> String {
    let formula = dice_parts_to_effect_formula(parts);
    if killing && !parts.is_zero() {
        format!("{formula}K")
    } else {
        formula
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::{AttackCostTier, dc_to_dice_parts};

    fn formula(tier: AttackCostTier, dc: f64) -> String {
        dice_parts_to_effect_formula(&dc_to_dice_parts(tier, dc))
    }

    #[test]
    fn whole_dice() {
        assert_eq!(formula(AttackCostTier::Five, 3.0), "3d6");
    }

    #[test]
    fn half_die() {
        assert_eq!(formula(AttackCostTier::Fifteen, 8.0), "2½d6");
        assert_eq!(formula(AttackCostTier::Fifteen, 2.0), "½d6");
    }

    #[test]
    fn pip() {
        assert_eq!(formula(AttackCostTier::Fifteen, 4.0), "1d6+1");
        assert_eq!(formula(AttackCostTier::Fifteen, 1.0), "+1");
        assert_eq!(formula(AttackCostTier::Five, 10.5), "10d6+1");
    }

    #[test]
    fn negative() {
        assert_eq!(formula(AttackCostTier::Five, -1.0), "-1d6");
        assert_eq!(formula(AttackCostTier::Fifteen, -1.0), "-1");
        assert_eq!(formula(AttackCostTier::Fifteen, -4.0), "-1d6-1");
    }

    #[test]
    fn zero() {
        assert_eq!(dice_parts_to_effect_formula(&DiceParts::ZERO), "0");
        assert_eq!(
            dice_parts_to_fully_qualified_effect_formula(&DiceParts::ZERO, true),
            "0"
        );
    }

    #[test]
    fn die_minus_one() {
        assert_eq!(dice_parts_to_effect_formula(&DiceParts::fixed(2, 1, 0, 0)), "3d6-1");
        assert_eq!(dice_parts_to_effect_formula(&DiceParts::fixed(0, 1, 0, 0)), "1d6-1");
    }

    #[test]
    fn killing_suffix() {
        let parts = dc_to_dice_parts(AttackCostTier::Fifteen, 6.0);
        assert_eq!(dice_parts_to_fully_qualified_effect_formula(&parts, true), "2d6K");
        assert_eq!(dice_parts_to_fully_qualified_effect_formula(&parts, false), "2d6");
    }

    #[test]
    fn display_matches_formula() {
        let parts = dc_to_dice_parts(AttackCostTier::Five, 4.0);
        assert_eq!(parts.to_string(), "4d6");
    }
}
