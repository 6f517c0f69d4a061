//! Damage contribution assembly for HERO System attacks.
//!
//! Takes an attack descriptor and its attacker's resolved context, finds the
//! base dice through a per-kind [`AttackStrategy`], folds in every bonus and
//! penalty in DC space, and applies the doubling limit. The result is a
//! [`DicePartsBundle`] whose tags explain each contribution, ready to render
//! as a formula or to load into an [`hd_dice::HeroRoller`].

pub mod assembler;
pub mod bundle;
pub mod config;
pub mod context;
pub mod error;
pub mod item;
pub mod normalize;
pub mod strategy;

pub use assembler::{
    DamageCalculator, calculate_dice_parts_for_item, get_effect_formula_from_item,
    get_fully_qualified_effect_formula_from_item, roller_for_item,
    try_calculate_dice_parts_for_item,
};
pub use bundle::{DicePartsBundle, Tag, signed_formula};
pub use config::{DeadlyBlowMode, RulesConfig};
pub use context::{
    ActorContext, CombatSkillLevel, ConditionalAttack, EffectBonus, ExtraDc, ResolutionOptions,
    WeaponMaster,
};
pub use error::{DamageError, DamageResult};
pub use item::{Edition, EffectFlags, FixedDice, ItemDescriptor, ManeuverInfo};
pub use normalize::normalize_conditional_attacks;
pub use strategy::{
    AttackInput, AttackRegistry, AttackStrategy, BaseDice, Contribution, ManeuverStrategy,
    PowerStrategy,
};
