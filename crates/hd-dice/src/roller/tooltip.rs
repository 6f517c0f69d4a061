//! Structured roll breakdowns for presentation layers.

use serde::Serialize;

use super::location::HitLocation;
use super::{RollType, TermOutcome};

/// One die inside a tooltip term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipDie {
    /// Face shown on the die (after any standard-effect override).
    pub raw: u32,
    /// Signed value after flavor conversion.
    pub base: i32,
    /// Roll-type derived value, where the roll type defines one.
    pub calculated: Option<i32>,
    /// The die shows its lowest face.
    pub is_min: bool,
    /// The die shows its highest face.
    pub is_max: bool,
}

/// One value term of the formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipTerm {
    /// Formula fragment, with its sign when negative.
    pub formula: String,
    /// Label attached to a constant.
    pub label: Option<String>,
    /// Dice making up the term; empty for constants.
    pub dice: Vec<TooltipDie>,
    /// Sum of base values.
    pub base_total: i32,
    /// Sum of calculated values, where defined.
    pub calculated_total: Option<i32>,
}

/// Full breakdown of a completed roll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollTooltip {
    /// Roll type the roller was configured with.
    pub roll_type: RollType,
    /// The whole formula.
    pub formula: String,
    /// Per-term breakdown in formula order.
    pub terms: Vec<TooltipTerm>,
    /// Sum of all base values.
    pub base_total: i32,
    /// Sum of all calculated values, where defined.
    pub calculated_total: Option<i32>,
    /// Stun multiplier sub-roll terms (killing rolls only).
    pub stun_multiplier_terms: Vec<TooltipTerm>,
    /// Final stun multiplier (killing rolls only).
    pub stun_multiplier: Option<i32>,
    /// Hit location, when tracked.
    pub hit_location: Option<HitLocation>,
}

pub(crate) fn term_tooltip(term: &TermOutcome, with_calculated: bool) -> TooltipTerm {
    let dice = term
        .raw
        .iter()
        .zip(&term.base)
        .enumerate()
        .map(|(i, (&raw, &base))| TooltipDie {
            raw,
            base,
            calculated: if with_calculated {
                term.calculated.get(i).copied()
            } else {
                None
            },
            is_min: raw == 1,
            is_max: raw == term.faces,
        })
        .collect();
    let formula = if term.sign < 0 {
        format!("-{}", term.formula)
    } else {
        term.formula.clone()
    };
    TooltipTerm {
        formula,
        label: term.label.clone(),
        dice,
        base_total: term.base.iter().sum(),
        calculated_total: with_calculated.then(|| term.calculated.iter().sum()),
    }
}
