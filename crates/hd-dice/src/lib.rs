//! Damage-class dice for the HERO System.
//!
//! Converts damage classes into canonical dice ([`DiceParts`]), combines
//! them in DC space, and rolls dice expressions with [`HeroRoller`],
//! deriving BODY and STUN the way the ruleset's tables do.

pub mod error;
pub mod parts;
pub mod roller;

pub use error::{DiceError, DiceResult};
pub use parts::{
    AttackCostTier, DiceParts, MAX_DC, ROUNDING_EPSILON, add_dice_parts, dc_to_dice_parts,
    dice_parts_to_effect_formula, dice_parts_to_fully_qualified_effect_formula,
    subtract_dice_parts,
};
pub use roller::{
    DieFlavor, DieSource, ExpressionTerm, HeroRoller, HitLocation, HitLocationName, RngSource,
    RollTooltip, RollType, ScriptedSource, Side, Sign, TooltipDie, TooltipTerm,
};
