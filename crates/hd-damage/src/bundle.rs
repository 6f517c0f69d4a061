//! Calculation output: final dice plus an audit trail.

use hd_dice::{AttackCostTier, DiceParts, dc_to_dice_parts, dice_parts_to_effect_formula};
use serde::Serialize;

use crate::item::ItemDescriptor;

/// One contribution to an attack's damage, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    /// Signed dice the contribution is worth, e.g. `+1d6`.
    pub value: String,
    /// Source name.
    pub name: String,
    /// Longer description.
    pub title: String,
}

impl Tag {
    /// Create a tag.
    pub fn new(value: impl Into<String>, name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
            title: title.into(),
        }
    }

    /// Tag a DC contribution, showing the dice it converts to at `tier`.
    pub fn for_dc(tier: AttackCostTier, name: &str, dc: f64) -> Self {
        Self::new(
            signed_formula(&dc_to_dice_parts(tier, dc)),
            name,
            format!("{name}: {dc:+} DC"),
        )
    }
}

/// The effect formula with an explicit leading sign.
pub fn signed_formula(parts: &DiceParts) -> String {
    let formula = dice_parts_to_effect_formula(parts);
    if formula.starts_with(['+', '-']) || formula == "0" {
        formula
    } else {
        format!("+{formula}")
    }
}

/// Final dice for an attack with the tags explaining them, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DicePartsBundle {
    /// Final dice.
    pub dice_parts: DiceParts,
    /// Contributions in the order they were applied.
    pub tags: Vec<Tag>,
    /// The item whose dice formed the base (a weapon for weapon maneuvers).
    pub base_attack_item: Option<ItemDescriptor>,
}

impl DicePartsBundle {
    /// No dice, no tags, no base item.
    pub fn zero() -> Self {
        Self {
            dice_parts: DiceParts::ZERO,
            tags: Vec::new(),
            base_attack_item: None,
        }
    }
}
