//! Per-attack-kind strategies and their registry.
//!
//! Each strategy decides where an attack's base dice come from and which
//! kind-specific bonuses it earns. The assembler runs the shared pipeline
//! around them.

pub mod maneuver;
pub mod power;

pub use maneuver::ManeuverStrategy;
pub use power::PowerStrategy;

use std::collections::HashMap;

use crate::bundle::Tag;
use crate::config::RulesConfig;
use crate::context::{ActorContext, ResolutionOptions};
use crate::error::DamageResult;
use crate::item::ItemDescriptor;

/// Everything a strategy may read while resolving one attack.
#[derive(Debug, Clone, Copy)]
pub struct AttackInput<'a> {
    /// The attack being resolved.
    pub item: &'a ItemDescriptor,
    /// The attacker.
    pub context: &'a ActorContext,
    /// Per-attack choices.
    pub options: &'a ResolutionOptions,
    /// Optional rules.
    pub config: &'a RulesConfig,
}

impl AttackInput<'_> {
    /// STR used for this attack.
    pub fn effective_strength(&self) -> f64 {
        self.options
            .effective_strength
            .unwrap_or(self.context.strength)
    }

    /// DC from strength, five STR per DC.
    pub fn strength_dc(&self) -> f64 {
        self.effective_strength().max(0.0) / 5.0
    }
}

/// Where an attack's base dice come from.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseDice {
    /// The item whose costing governs the calculation.
    pub item: ItemDescriptor,
    /// Base DC.
    pub dc: f64,
    /// Tag describing the base.
    pub label: String,
    /// The base is the attacker's strength.
    pub strength_is_base: bool,
}

/// A DC bonus or penalty.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    /// Source name.
    pub name: String,
    /// DC added (negative to subtract).
    pub dc: f64,
}

impl Contribution {
    /// Create a contribution.
    pub fn new(name: impl Into<String>, dc: f64) -> Self {
        Self {
            name: name.into(),
            dc,
        }
    }
}

/// Attack-kind specific behavior.
pub trait AttackStrategy: std::fmt::Debug + Send + Sync {
    /// Decide the base dice.
    fn compute_base_dice(&self, input: &AttackInput<'_>) -> DamageResult<BaseDice>;

    /// Kind-specific bonuses, in the order they apply.
    fn compute_added_dice(&self, input: &AttackInput<'_>, base: &BaseDice) -> Vec<Contribution>;

    /// One-line description of how the attack's damage is built.
    fn describe(&self, item: &ItemDescriptor) -> String;

    /// Tag for the base dice.
    fn base_tag(&self, base: &BaseDice, formula: String) -> Tag {
        Tag::new(formula, base.label.clone(), format!("Base: {} DC", base.dc))
    }
}

/// Maps item kinds to strategies.
///
/// Lookup order: an exact kind registration, then the maneuver strategy for
/// items carrying maneuver details, then the direct power strategy.
#[derive(Debug)]
pub struct AttackRegistry {
    by_kind: HashMap<String, Box<dyn AttackStrategy>>,
    maneuver: Box<dyn AttackStrategy>,
    fallback: Box<dyn AttackStrategy>,
}

impl Default for AttackRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("HA", PowerStrategy::strength_adding());
        registry.register("HKA", PowerStrategy::strength_adding());
        registry
    }
}

impl AttackRegistry {
    /// A registry with only the maneuver and direct power strategies.
    pub fn empty() -> Self {
        Self {
            by_kind: HashMap::new(),
            maneuver: Box::new(ManeuverStrategy),
            fallback: Box::new(PowerStrategy::direct()),
        }
    }

    /// Register a strategy for an item kind, replacing any earlier one.
    pub fn register(&mut self, kind: &str, strategy: impl AttackStrategy + 'static) {
        self.by_kind
            .insert(kind.to_ascii_uppercase(), Box::new(strategy));
    }

    /// The strategy that resolves `item`.
    pub fn strategy_for(&self, item: &ItemDescriptor) -> &dyn AttackStrategy {
        if let Some(strategy) = self.by_kind.get(&item.xmlid.to_ascii_uppercase()) {
            strategy.as_ref()
        } else if item.is_maneuver() {
            self.maneuver.as_ref()
        } else {
            self.fallback.as_ref()
        }
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.by_kind.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}
