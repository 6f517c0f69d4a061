//! DC to dice conversion and DC-space aggregation.

use tracing::warn;

use super::{AttackCostTier, DiceParts};

/// Tolerance applied at the half-die and pip breakpoints.
///
/// Pinned to the published dice/DC table; not derived from the breakpoints.
pub const ROUNDING_EPSILON: f64 = 0.039;

/// Largest DC magnitude converted; anything beyond is clamped to it.
///
/// At the cheapest tier this is well under two thousand dice.
pub const MAX_DC: f64 = 1000.0;

/// Convert a (possibly fractional, possibly negative) DC into dice.
///
/// Never fails: a zero or non-finite DC yields [`DiceParts::ZERO`], and a
/// DC beyond [`MAX_DC`] in either direction is clamped to it.
pub fn dc_to_dice_parts(tier: AttackCostTier, dc: f64) -> DiceParts {
    if !dc.is_finite() || dc == 0.0 {
        return DiceParts::ZERO;
    }
    let dc = if dc.abs() > MAX_DC {
        warn!(dc, max = MAX_DC, "DC out of range; clamping");
        dc.clamp(-MAX_DC, MAX_DC)
    } else {
        dc
    };

    let sign = if dc < 0.0 { -1 } else { 1 };
    let dice_of_damage = dc.abs() * 5.0 / f64::from(tier.ap_per_die());
    let whole = dice_of_damage.floor();
    let frac = dice_of_damage - whole;

    let d6_count = sign * whole as i32;
    let half_die_count = if frac - tier.half_die_value() > -ROUNDING_EPSILON {
        sign
    } else {
        0
    };
    let constant = if half_die_count == 0 && frac - tier.pip_value() > -ROUNDING_EPSILON {
        sign
    } else {
        0
    };

    DiceParts::from_fields(dc, d6_count, 0, half_die_count, constant)
}

/// Add two dice representations by converting the sum of their DCs.
///
/// With `use_die_minus_one` any half die in the result is expressed as a
/// d6-1 instead.
pub fn add_dice_parts(
    tier: AttackCostTier,
    a: &DiceParts,
    b: &DiceParts,
    use_die_minus_one: bool,
) -> DiceParts {
    finish(dc_to_dice_parts(tier, a.dc() + b.dc()), use_die_minus_one)
}

/// Subtract `b` from `a` in DC space.
pub fn subtract_dice_parts(
    tier: AttackCostTier,
    a: &DiceParts,
    b: &DiceParts,
    use_die_minus_one: bool,
) -> DiceParts {
    finish(dc_to_dice_parts(tier, a.dc() - b.dc()), use_die_minus_one)
}

fn finish(parts: DiceParts, use_die_minus_one: bool) -> DiceParts {
    if use_die_minus_one {
        parts.with_die_minus_one()
    } else {
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(p: &DiceParts) -> (i32, i32, i32, i32) {
        (
            p.d6_count(),
            p.half_die_count(),
            p.d6_less1_die_count(),
            p.constant(),
        )
    }

    #[test]
    fn huge_dc_is_clamped() {
        let p = dc_to_dice_parts(AttackCostTier::Five, 1e300);
        assert_eq!(p.dc(), MAX_DC);
        assert_eq!(fields(&p), (1000, 0, 0, 0));

        let p = dc_to_dice_parts(AttackCostTier::Three, -1e12);
        assert_eq!(p.dc(), -MAX_DC);
        assert_eq!(p.d6_count(), -1666);
        assert_eq!(p.half_die_count(), -1);
    }

    #[test]
    fn normal_whole_dice() {
        let p = dc_to_dice_parts(AttackCostTier::Five, 6.0);
        assert_eq!(fields(&p), (6, 0, 0, 0));
        assert_eq!(p.dc(), 6.0);
    }

    #[test]
    fn normal_half_dc_gives_pip() {
        let p = dc_to_dice_parts(AttackCostTier::Five, 10.5);
        assert_eq!(fields(&p), (10, 0, 0, 1));
    }

    #[test]
    fn normal_near_half_die() {
        // frac 0.6 is exactly the half-die breakpoint.
        let p = dc_to_dice_parts(AttackCostTier::Five, 3.6);
        assert_eq!(fields(&p), (3, 1, 0, 0));
    }

    #[test]
    fn normal_small_fraction_dropped() {
        let p = dc_to_dice_parts(AttackCostTier::Five, 2.2);
        assert_eq!(fields(&p), (2, 0, 0, 0));
    }

    #[test]
    fn mental_table() {
        assert_eq!(fields(&dc_to_dice_parts(AttackCostTier::Ten, 1.0)), (0, 1, 0, 0));
        assert_eq!(fields(&dc_to_dice_parts(AttackCostTier::Ten, 2.0)), (1, 0, 0, 0));
        assert_eq!(fields(&dc_to_dice_parts(AttackCostTier::Ten, 5.0)), (2, 1, 0, 0));
    }

    #[test]
    fn killing_table() {
        let expected = [
            (1.0, (0, 0, 0, 1)),
            (2.0, (0, 1, 0, 0)),
            (3.0, (1, 0, 0, 0)),
            (4.0, (1, 0, 0, 1)),
            (5.0, (1, 1, 0, 0)),
            (6.0, (2, 0, 0, 0)),
            (12.0, (4, 0, 0, 0)),
            (13.0, (4, 0, 0, 1)),
            (14.0, (4, 1, 0, 0)),
        ];
        for (dc, want) in expected {
            assert_eq!(
                fields(&dc_to_dice_parts(AttackCostTier::Fifteen, dc)),
                want,
                "dc {dc}"
            );
        }
    }

    #[test]
    fn negative_dc_is_sign_symmetric() {
        let p = dc_to_dice_parts(AttackCostTier::Fifteen, -5.0);
        assert_eq!(fields(&p), (-1, -1, 0, 0));
        let p = dc_to_dice_parts(AttackCostTier::Five, -2.0);
        assert_eq!(fields(&p), (-2, 0, 0, 0));
    }

    #[test]
    fn zero_and_non_finite() {
        assert_eq!(dc_to_dice_parts(AttackCostTier::Five, 0.0), DiceParts::ZERO);
        assert_eq!(dc_to_dice_parts(AttackCostTier::Five, f64::NAN), DiceParts::ZERO);
        assert_eq!(
            dc_to_dice_parts(AttackCostTier::Five, f64::INFINITY),
            DiceParts::ZERO
        );
    }

    #[test]
    fn add_crosses_breakpoint() {
        // Field-wise, ½d6 + ½d6 would be two half dice; in DC space 2 + 2 = 4 DC = 1d6+1.
        let half = dc_to_dice_parts(AttackCostTier::Fifteen, 2.0);
        let sum = add_dice_parts(AttackCostTier::Fifteen, &half, &half, false);
        assert_eq!(fields(&sum), (1, 0, 0, 1));
        assert_eq!(sum.dc(), 4.0);
    }

    #[test]
    fn add_with_die_minus_one() {
        let a = dc_to_dice_parts(AttackCostTier::Fifteen, 3.0);
        let b = dc_to_dice_parts(AttackCostTier::Fifteen, 2.0);
        let sum = add_dice_parts(AttackCostTier::Fifteen, &a, &b, true);
        assert_eq!(fields(&sum), (1, 0, 1, 0));
    }

    #[test]
    fn subtract_below_zero() {
        let a = dc_to_dice_parts(AttackCostTier::Five, 2.0);
        let b = dc_to_dice_parts(AttackCostTier::Five, 3.0);
        let diff = subtract_dice_parts(AttackCostTier::Five, &a, &b, false);
        assert_eq!(diff.dc(), -1.0);
        assert_eq!(fields(&diff), (-1, 0, 0, 0));
    }
}
