//! Damage-class to dice conversion.
//!
//! A damage class (DC) is turned into a canonical [`DiceParts`] value by
//! [`dc_to_dice_parts`]. The conversion has rounding breakpoints, so two
//! dice representations are combined by adding their DCs and converting
//! again ([`add_dice_parts`], [`subtract_dice_parts`]), never field by field.

pub mod convert;
pub mod formula;

pub use convert::{
    MAX_DC, ROUNDING_EPSILON, add_dice_parts, dc_to_dice_parts, subtract_dice_parts,
};
pub use formula::{dice_parts_to_effect_formula, dice_parts_to_fully_qualified_effect_formula};

use serde::{Deserialize, Serialize};

/// Active points paid per die of effect.
///
/// Determines how many dice one DC buys and where the half-die and +1
/// breakpoints fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackCostTier {
    /// 5 AP per die: normal damage.
    Five,
    /// 10 AP per die: mental and no-normal-defense attacks.
    Ten,
    /// 15 AP per die: killing damage.
    Fifteen,
    /// 6 AP per die (killing family breakpoints).
    Six,
    /// 3 AP per die (killing family breakpoints).
    Three,
}

impl AttackCostTier {
    /// Look up the tier for an AP-per-die value. Returns `None` for costs the
    /// ruleset does not define, including the degenerate zero cost.
    pub fn from_ap_per_die(ap: u32) -> Option<Self> {
        match ap {
            5 => Some(Self::Five),
            10 => Some(Self::Ten),
            15 => Some(Self::Fifteen),
            6 => Some(Self::Six),
            3 => Some(Self::Three),
            _ => None,
        }
    }

    /// The conventional tier for an attack's effect type.
    pub fn for_effect(killing: bool, mental_or_nnd: bool) -> Self {
        if killing {
            Self::Fifteen
        } else if mental_or_nnd {
            Self::Ten
        } else {
            Self::Five
        }
    }

    /// Active points per die.
    pub fn ap_per_die(self) -> u32 {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::Fifteen => 15,
            Self::Six => 6,
            Self::Three => 3,
        }
    }

    /// Fraction of a die at which a half die is awarded.
    pub fn half_die_value(self) -> f64 {
        match self {
            Self::Five => 3.0 / 5.0,
            Self::Ten => 5.0 / 10.0,
            Self::Fifteen | Self::Six | Self::Three => 10.0 / 15.0,
        }
    }

    /// Fraction of a die at which a +1 is awarded.
    pub fn pip_value(self) -> f64 {
        match self {
            Self::Five => 2.0 / 5.0,
            Self::Ten => 3.0 / 10.0,
            Self::Fifteen | Self::Six | Self::Three => 5.0 / 15.0,
        }
    }
}

impl std::fmt::Display for AttackCostTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} AP/die", self.ap_per_die())
    }
}

/// A canonical dice representation of some number of damage classes.
///
/// Values come from [`dc_to_dice_parts`] or the aggregation functions; the
/// only other constructors are [`DiceParts::ZERO`] and [`DiceParts::fixed`].
/// All non-zero fields share the sign of `dc`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiceParts {
    dc: f64,
    d6_count: i32,
    d6_less1_die_count: i32,
    half_die_count: i32,
    constant: i32,
}

impl DiceParts {
    /// No damage at all.
    pub const ZERO: Self = Self {
        dc: 0.0,
        d6_count: 0,
        d6_less1_die_count: 0,
        half_die_count: 0,
        constant: 0,
    };

    pub(crate) fn from_fields(
        dc: f64,
        d6_count: i32,
        d6_less1_die_count: i32,
        half_die_count: i32,
        constant: i32,
    ) -> Self {
        Self {
            dc,
            d6_count,
            d6_less1_die_count,
            half_die_count,
            constant,
        }
    }

    /// Dice stated directly by an item that pays no AP per die.
    ///
    /// Such items have no meaningful DC, so `dc` is recorded as zero.
    pub fn fixed(d6_count: i32, d6_less1_die_count: i32, half_die_count: i32, constant: i32) -> Self {
        Self::from_fields(0.0, d6_count, d6_less1_die_count, half_die_count, constant)
    }

    /// Damage classes this value was converted from.
    pub fn dc(&self) -> f64 {
        self.dc
    }

    /// Number of whole d6.
    pub fn d6_count(&self) -> i32 {
        self.d6_count
    }

    /// Number of d6-1 dice.
    pub fn d6_less1_die_count(&self) -> i32 {
        self.d6_less1_die_count
    }

    /// Number of half dice.
    pub fn half_die_count(&self) -> i32 {
        self.half_die_count
    }

    /// The +1/-1 pip, or 0.
    pub fn constant(&self) -> i32 {
        self.constant
    }

    /// True when no dice and no pip are present.
    pub fn is_zero(&self) -> bool {
        self.d6_count == 0
            && self.d6_less1_die_count == 0
            && self.half_die_count == 0
            && self.constant == 0
    }

    /// Rebuild the DC implied by the discrete fields at the given tier.
    ///
    /// Half dice and d6-1 dice count at the tier's half-die fraction, the
    /// pip at its pip fraction. Matches `dc()` to within one rounding step.
    pub fn implied_dc(&self, tier: AttackCostTier) -> f64 {
        let dice = f64::from(self.d6_count)
            + f64::from(self.half_die_count + self.d6_less1_die_count) * tier.half_die_value()
            + f64::from(self.constant) * tier.pip_value();
        dice * f64::from(tier.ap_per_die()) / 5.0
    }

    /// The same expected value with the half die shown as a d6-1.
    pub(crate) fn with_die_minus_one(mut self) -> Self {
        self.d6_less1_die_count += self.half_die_count;
        self.half_die_count = 0;
        self
    }
}

impl Default for DiceParts {
    fn default() -> Self {
        Self::ZERO
    }
}

impl std::fmt::Display for DiceParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&dice_parts_to_effect_formula(self))
    }
}
