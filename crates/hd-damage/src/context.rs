//! The fully resolved actor context and per-attack options.
//!
//! Everything the assembler reads about the attacker lives here; nothing is
//! looked up from global collections during a calculation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::item::ItemDescriptor;

/// A flat extra-DC bonus, applied to martial maneuvers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraDc {
    /// Source name.
    pub name: String,
    /// DC added.
    pub dc: f64,
}

/// Combat skill levels allocated to damage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatSkillLevel {
    /// Source name.
    pub name: String,
    /// Levels put into damage; two levels buy one DC.
    pub dc_levels: u32,
    /// Item ids the levels apply to. Empty means every attack.
    pub applies_to: Vec<String>,
}

impl CombatSkillLevel {
    /// Whether the levels apply to the item with this id.
    pub fn applies(&self, item_id: &str) -> bool {
        self.applies_to.is_empty() || self.applies_to.iter().any(|id| id == item_id)
    }
}

/// A flat DC modifier from an active effect.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectBonus {
    /// Effect name.
    pub name: String,
    /// DC added; may be negative.
    pub dc: f64,
    /// Item id targeted. `None` targets every attack.
    pub target: Option<String>,
}

/// The Weapon Master talent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponMaster {
    /// Talent name.
    pub name: String,
    /// Custom adder a weapon must carry to benefit.
    pub keyword: String,
    /// Damage levels bought; each adds 3 DC.
    pub damage_levels: u32,
}

/// A bonus that only applies under conditions (e.g. Deadly Blow).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionalAttack {
    /// Stable identifier, used by [`ResolutionOptions::conditional_attack_flags`].
    pub id: String,
    /// Display name.
    pub name: String,
    /// Kind identifier (`"DEADLYBLOW"`).
    pub xmlid: String,
    /// Levels bought.
    pub levels: u32,
    /// Per-attack enable flags, materialized at load time by
    /// [`crate::normalize_conditional_attacks`].
    pub targets: BTreeMap<String, bool>,
}

/// The attacker as seen by the damage calculation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorContext {
    /// Actor name.
    pub name: String,
    /// STR characteristic.
    pub strength: f64,
    /// Attacks the actor owns.
    pub attacks: Vec<ItemDescriptor>,
    /// Extra DC items.
    pub extra_dc: Vec<ExtraDc>,
    /// Combat skill levels.
    pub combat_skill_levels: Vec<CombatSkillLevel>,
    /// Active effect bonuses.
    pub effect_bonuses: Vec<EffectBonus>,
    /// Weapon Master talents.
    pub weapon_masters: Vec<WeaponMaster>,
    /// Conditional attack bonuses.
    pub conditional_attacks: Vec<ConditionalAttack>,
    /// Status names currently applied (e.g. `"underwater"`).
    pub statuses: Vec<String>,
}

impl ActorContext {
    /// A context with just a strength score.
    pub fn new(name: impl Into<String>, strength: f64) -> Self {
        Self {
            name: name.into(),
            strength,
            ..Self::default()
        }
    }

    /// Whether a status applies (case-insensitive).
    pub fn has_status(&self, status: &str) -> bool {
        self.statuses.iter().any(|s| s.eq_ignore_ascii_case(status))
    }
}

/// Choices made for one attack resolution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionOptions {
    /// Boostable charges spent.
    pub boostable_charges: u32,
    /// Velocity in meters per phase.
    pub velocity: f64,
    /// Haymaker combined with the attack.
    pub haymaker: Option<ItemDescriptor>,
    /// Weapon used with a maneuver.
    pub weapon: Option<ItemDescriptor>,
    /// Overrides for conditional attacks, keyed by conditional attack id.
    pub conditional_attack_flags: BTreeMap<String, bool>,
    /// STR to use instead of the actor's STR.
    pub effective_strength: Option<f64>,
    /// Skip deadly-blow style bonuses.
    pub ignore_deadly_blow: bool,
    /// Override the configured doubling limit.
    pub double_damage_limit: Option<bool>,
}
