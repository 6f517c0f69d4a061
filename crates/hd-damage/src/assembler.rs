//! Assembling an attack's final dice from all of its damage sources.
//!
//! The pipeline runs in a fixed order: base dice, added bonuses and
//! penalties, the doubling limit, velocity, and finally the clamp at zero.
//! Every non-zero contribution leaves a [`Tag`].

use std::sync::LazyLock;

use hd_dice::{
    AttackCostTier, DiceParts, HeroRoller, HitLocationName, MAX_DC, add_dice_parts,
    dc_to_dice_parts, dice_parts_to_effect_formula, dice_parts_to_fully_qualified_effect_formula,
    subtract_dice_parts,
};
use tracing::{debug, warn};

use crate::bundle::{DicePartsBundle, Tag, signed_formula};
use crate::config::{DeadlyBlowMode, RulesConfig};
use crate::context::{ActorContext, ResolutionOptions};
use crate::error::{DamageError, DamageResult};
use crate::item::{Edition, ItemDescriptor};
use crate::strategy::{AttackInput, AttackRegistry, Contribution};

static DEFAULT_REGISTRY: LazyLock<AttackRegistry> = LazyLock::new(AttackRegistry::default);

/// DC per level of Weapon Master damage and of Deadly Blow.
const DC_PER_DAMAGE_LEVEL: f64 = 3.0;

/// Running sum of contributions in DC space.
struct Accumulator {
    tier: AttackCostTier,
    total: DiceParts,
    tags: Vec<Tag>,
}

impl Accumulator {
    fn new(tier: AttackCostTier) -> Self {
        Self {
            tier,
            total: DiceParts::ZERO,
            tags: Vec::new(),
        }
    }

    fn add(&mut self, contribution: &Contribution) {
        if contribution.dc == 0.0 {
            return;
        }
        let parts = dc_to_dice_parts(self.tier, contribution.dc);
        self.total = add_dice_parts(self.tier, &self.total, &parts, false);
        self.tags
            .push(Tag::for_dc(self.tier, &contribution.name, contribution.dc));
    }

    fn subtract(&mut self, contribution: &Contribution) {
        if contribution.dc == 0.0 {
            return;
        }
        let parts = dc_to_dice_parts(self.tier, contribution.dc);
        self.total = subtract_dice_parts(self.tier, &self.total, &parts, false);
        self.tags
            .push(Tag::for_dc(self.tier, &contribution.name, -contribution.dc));
    }
}

/// Computes damage dice for attacks under one set of optional rules.
#[derive(Debug)]
pub struct DamageCalculator<'r> {
    registry: &'r AttackRegistry,
    config: RulesConfig,
}

impl Default for DamageCalculator<'static> {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}

impl DamageCalculator<'static> {
    /// A calculator using the built-in strategies.
    pub fn new(config: RulesConfig) -> Self {
        Self {
            registry: &DEFAULT_REGISTRY,
            config,
        }
    }
}

impl<'r> DamageCalculator<'r> {
    /// Use a custom strategy registry.
    pub fn with_registry<'n>(self, registry: &'n AttackRegistry) -> DamageCalculator<'n> {
        DamageCalculator {
            registry,
            config: self.config,
        }
    }

    /// The optional rules in force.
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Final dice for an attack. Bad input is logged and yields zero dice.
    pub fn calculate(
        &self,
        item: &ItemDescriptor,
        context: &ActorContext,
        options: &ResolutionOptions,
    ) -> DicePartsBundle {
        match self.try_calculate(item, context, options) {
            Ok(bundle) => bundle,
            Err(err) => {
                warn!(item = %item.name, error = %err, "damage calculation fell back to zero dice");
                DicePartsBundle::zero()
            }
        }
    }

    /// Final dice for an attack, reporting bad input as an error.
    pub fn try_calculate(
        &self,
        item: &ItemDescriptor,
        context: &ActorContext,
        options: &ResolutionOptions,
    ) -> DamageResult<DicePartsBundle> {
        validate(item)?;
        let input = AttackInput {
            item,
            context,
            options,
            config: &self.config,
        };
        let strategy = self.registry.strategy_for(item);
        let base = strategy.compute_base_dice(&input)?;
        validate(&base.item)?;

        // Zero-cost items roll the dice they state; DC modifiers have no
        // cost basis to convert through.
        if base.item.ap_per_die() == 0 {
            let parts = DiceParts::from(base.item.fixed_dice);
            debug!(item = %base.item.name, "zero-cost item uses its fixed dice");
            return Ok(DicePartsBundle {
                tags: vec![strategy.base_tag(&base, signed_formula(&parts))],
                dice_parts: parts,
                base_attack_item: Some(base.item),
            });
        }
        let tier = tier_of(&base.item)?;
        let use_die_minus_one = base.item.use_die_minus_one;

        let base_parts = dc_to_dice_parts(tier, base.dc);
        let mut tags = vec![strategy.base_tag(&base, dice_parts_to_effect_formula(&base_parts))];

        let mut added = Accumulator::new(tier);

        if item.is_martial() {
            for extra in &context.extra_dc {
                added.add(&Contribution::new(extra.name.clone(), extra.dc));
            }
        }

        for contribution in strategy.compute_added_dice(&input, &base) {
            added.add(&contribution);
        }

        if options.boostable_charges > 0 {
            let dc = options.boostable_charges.min(self.config.max_boostable_charges_dc);
            added.add(&Contribution::new("Boostable Charges", f64::from(dc)));
        }

        for csl in context.combat_skill_levels.iter().filter(|c| c.applies(&item.id)) {
            added.add(&Contribution::new(csl.name.clone(), csl_dc(csl.dc_levels, item)));
        }

        for bonus in &context.effect_bonuses {
            if bonus.target.as_ref().is_none_or(|target| *target == item.id) {
                added.add(&Contribution::new(bonus.name.clone(), bonus.dc));
            }
        }

        if let Some(haymaker) = &options.haymaker {
            let is_strike = item.xmlid.eq_ignore_ascii_case("STRIKE");
            if !item.is_maneuver() || is_strike {
                added.add(&Contribution::new(haymaker.name.clone(), haymaker.dc));
            } else {
                warn!(
                    attack = %item.name,
                    "Haymaker can only be combined with Strike or non-maneuver attacks; ignoring it"
                );
            }
        }

        for master in &context.weapon_masters {
            if item.has_custom_adder(&master.keyword) || base.item.has_custom_adder(&master.keyword) {
                added.add(&Contribution::new(
                    master.name.clone(),
                    f64::from(master.damage_levels) * DC_PER_DAMAGE_LEVEL,
                ));
            }
        }

        if !options.ignore_deadly_blow {
            self.apply_conditional_attacks(&mut added, item, context, options);
        }

        if context.has_status("underwater") {
            added.subtract(&Contribution::new("Underwater", self.config.underwater_penalty_dc));
        }

        // Velocity is kept out of the capped pool.
        let mut velocity = Accumulator::new(tier);
        if let Some(divisor) = item.velocity_divisor() {
            let dc = (options.velocity.max(0.0) / divisor).floor();
            velocity.add(&Contribution::new("Velocity", dc));
        }

        tags.append(&mut added.tags);

        let mut total = add_dice_parts(tier, &base_parts, &added.total, use_die_minus_one);

        let doubling_limit = options
            .double_damage_limit
            .unwrap_or(self.config.double_damage_limit);
        if doubling_limit && added.total.dc() > base_parts.dc() {
            let excess = dc_to_dice_parts(tier, added.total.dc() - base_parts.dc());
            total = subtract_dice_parts(tier, &total, &excess, use_die_minus_one);
            tags.push(Tag::new(
                signed_formula(&dc_to_dice_parts(tier, -excess.dc())),
                "Doubling limit",
                format!(
                    "Added damage capped at base {} DC: -{} DC",
                    base_parts.dc(),
                    excess.dc()
                ),
            ));
        }

        total = add_dice_parts(tier, &total, &velocity.total, use_die_minus_one);
        tags.append(&mut velocity.tags);

        if total.dc() < 0.0 {
            tags.push(Tag::new(
                "0",
                "Minimum damage",
                format!("Damage cannot be negative ({} DC)", total.dc()),
            ));
            total = DiceParts::ZERO;
        }

        debug!(
            attack = %item.name,
            dc = total.dc(),
            formula = %dice_parts_to_effect_formula(&total),
            "assembled damage"
        );
        Ok(DicePartsBundle {
            dice_parts: total,
            tags,
            base_attack_item: Some(base.item),
        })
    }

    fn apply_conditional_attacks(
        &self,
        added: &mut Accumulator,
        item: &ItemDescriptor,
        context: &ActorContext,
        options: &ResolutionOptions,
    ) {
        for conditional in &context.conditional_attacks {
            let enabled = options
                .conditional_attack_flags
                .get(&conditional.id)
                .or_else(|| conditional.targets.get(&item.id))
                .copied();
            let Some(enabled) = enabled else {
                warn!(
                    conditional = %conditional.name,
                    attack = %item.name,
                    "conditional attack has no flag for this attack (not normalized?); treating as off"
                );
                continue;
            };
            if !enabled {
                continue;
            }

            if !conditional.xmlid.eq_ignore_ascii_case("DEADLYBLOW") {
                let err = DamageError::UnknownConditionalAttack {
                    name: conditional.name.clone(),
                    kind: conditional.xmlid.clone(),
                };
                warn!(error = %err, "conditional attack contributes nothing");
                continue;
            }

            let contribution = Contribution::new(
                conditional.name.clone(),
                f64::from(conditional.levels) * DC_PER_DAMAGE_LEVEL,
            );
            match self.config.deadly_blow_mode {
                DeadlyBlowMode::Subtract => added.subtract(&contribution),
                DeadlyBlowMode::Add => added.add(&contribution),
            }
        }
    }

    /// The attack's effect formula, e.g. `2½d6`.
    pub fn effect_formula(
        &self,
        item: &ItemDescriptor,
        context: &ActorContext,
        options: &ResolutionOptions,
    ) -> String {
        dice_parts_to_effect_formula(&self.calculate(item, context, options).dice_parts)
    }

    /// The effect formula with a killing suffix, e.g. `2½d6K`.
    pub fn fully_qualified_effect_formula(
        &self,
        item: &ItemDescriptor,
        context: &ActorContext,
        options: &ResolutionOptions,
    ) -> String {
        let bundle = self.calculate(item, context, options);
        dice_parts_to_fully_qualified_effect_formula(&bundle.dice_parts, is_killing(item, &bundle))
    }

    /// A roller loaded with a bundle's dice under this calculator's rules.
    ///
    /// A called shot tracks hit location even when the rule is off.
    pub fn roller_for_bundle(
        &self,
        item: &ItemDescriptor,
        bundle: &DicePartsBundle,
        called_shot: Option<HitLocationName>,
    ) -> HeroRoller {
        let killing = is_killing(item, bundle);
        HeroRoller::new()
            .make_killing_roll(killing, self.config.stun_multiplier_die_minus_one)
            .make_normal_roll(!killing)
            .modify_to_standard_effect(self.config.standard_effect)
            .add_to_hit_location(self.config.hit_locations || called_shot.is_some(), called_shot)
            .add_dice_parts(&bundle.dice_parts)
    }

    /// Calculate an attack's dice and load them into a roller.
    pub fn roller_for_item(
        &self,
        item: &ItemDescriptor,
        context: &ActorContext,
        options: &ResolutionOptions,
        called_shot: Option<HitLocationName>,
    ) -> HeroRoller {
        let bundle = self.calculate(item, context, options);
        self.roller_for_bundle(item, &bundle, called_shot)
    }
}

fn is_killing(item: &ItemDescriptor, bundle: &DicePartsBundle) -> bool {
    item.effect.killing
        || bundle
            .base_attack_item
            .as_ref()
            .is_some_and(|base| base.effect.killing)
}

fn validate(item: &ItemDescriptor) -> DamageResult<()> {
    let invalid = |reason: &str| DamageError::InvalidDescriptor {
        item: item.name.clone(),
        reason: reason.to_string(),
    };
    if item.id.is_empty() && item.xmlid.is_empty() {
        return Err(DamageError::MissingBaseAttack {
            attack: item.name.clone(),
            reason: "descriptor has neither id nor kind".to_string(),
        });
    }
    if !item.dc.is_finite() {
        return Err(invalid("DC is not a finite number"));
    }
    if item.dc.abs() > MAX_DC {
        return Err(invalid(&format!("DC exceeds the supported {MAX_DC}")));
    }
    if !item.advantage_multiplier.is_finite() || item.advantage_multiplier <= 0.0 {
        return Err(invalid("advantage multiplier must be positive"));
    }
    Ok(())
}

fn tier_of(item: &ItemDescriptor) -> DamageResult<AttackCostTier> {
    let ap_per_die = item.ap_per_die();
    AttackCostTier::from_ap_per_die(ap_per_die).ok_or_else(|| DamageError::UnknownAttackCostTier {
        item: item.name.clone(),
        ap_per_die,
    })
}

/// Two combat skill levels buy one DC. Under the new edition that DC is
/// worth less on an advantaged power.
fn csl_dc(dc_levels: u32, item: &ItemDescriptor) -> f64 {
    let dc = f64::from(dc_levels / 2);
    match item.edition {
        Edition::New => dc / item.advantage_multiplier,
        Edition::Old => dc,
    }
}

/// Final dice for an attack under `config`, using the built-in strategies.
pub fn calculate_dice_parts_for_item(
    item: &ItemDescriptor,
    context: &ActorContext,
    options: &ResolutionOptions,
    config: &RulesConfig,
) -> DicePartsBundle {
    DamageCalculator::new(config.clone()).calculate(item, context, options)
}

/// A roller for an attack's final dice under `config`.
pub fn roller_for_item(
    item: &ItemDescriptor,
    context: &ActorContext,
    options: &ResolutionOptions,
    config: &RulesConfig,
) -> HeroRoller {
    DamageCalculator::new(config.clone()).roller_for_item(item, context, options, None)
}

/// Like [`calculate_dice_parts_for_item`], but reports bad input.
pub fn try_calculate_dice_parts_for_item(
    item: &ItemDescriptor,
    context: &ActorContext,
    options: &ResolutionOptions,
    config: &RulesConfig,
) -> DamageResult<DicePartsBundle> {
    DamageCalculator::new(config.clone()).try_calculate(item, context, options)
}

/// The attack's effect formula.
pub fn get_effect_formula_from_item(
    item: &ItemDescriptor,
    context: &ActorContext,
    options: &ResolutionOptions,
    config: &RulesConfig,
) -> String {
    DamageCalculator::new(config.clone()).effect_formula(item, context, options)
}

/// The attack's effect formula with a killing suffix.
pub fn get_fully_qualified_effect_formula_from_item(
    item: &ItemDescriptor,
    context: &ActorContext,
    options: &ResolutionOptions,
    config: &RulesConfig,
) -> String {
    DamageCalculator::new(config.clone()).fully_qualified_effect_formula(item, context, options)
}
