//! The HERO System dice roller.
//!
//! A [`HeroRoller`] is configured with builder calls, rolled exactly once
//! against a [`DieSource`], and then queried through accessors that check
//! the configured [`RollType`]:
//!
//! - **Normal**: dice are STUN; each die also yields 0, 1 or 2 BODY.
//! - **Killing**: dice are BODY; each die is multiplied by a rolled stun
//!   multiplier to give STUN.
//! - **Success, Adjustment, Entangle, Flash**: only the plain total exists.

pub mod location;
pub mod source;
pub mod term;
pub mod tooltip;

pub use location::{HitLocation, HitLocationName, Side};
pub use source::{DieSource, RngSource, ScriptedSource};
pub use term::{DieFlavor, ExpressionTerm, Sign};
pub use tooltip::{RollTooltip, TooltipDie, TooltipTerm};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DiceError, DiceResult};
use crate::parts::DiceParts;

/// What a roll measures, which decides its derived values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollType {
    /// A plain 3d6-style total.
    Success,
    /// Normal damage: STUN rolled, BODY counted per die.
    Normal,
    /// Killing damage: BODY rolled, STUN via multiplier.
    Killing,
    /// Adjustment powers (Aid, Drain, ...).
    Adjustment,
    /// Entangle BODY.
    Entangle,
    /// Flash segments.
    Flash,
}

impl std::fmt::Display for RollType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Success => "Success",
            Self::Normal => "Normal",
            Self::Killing => "Killing",
            Self::Adjustment => "Adjustment",
            Self::Entangle => "Entangle",
            Self::Flash => "Flash",
        };
        f.write_str(name)
    }
}

/// Per-term results of a completed roll.
#[derive(Debug, Clone)]
pub(crate) struct TermOutcome {
    pub(crate) formula: String,
    pub(crate) label: Option<String>,
    pub(crate) sign: i32,
    /// Sides per die; 0 for constants.
    pub(crate) faces: u32,
    pub(crate) raw: Vec<u32>,
    pub(crate) base: Vec<i32>,
    /// Empty when the roll type defines no calculated values.
    pub(crate) calculated: Vec<i32>,
}

#[derive(Debug, Clone)]
struct RollOutcome {
    terms: Vec<TermOutcome>,
    stun_multiplier: Option<i32>,
    stun_multiplier_terms: Vec<TermOutcome>,
    hit_location: Option<HitLocation>,
}

/// Hit-location tracking requested on a roller.
#[derive(Debug, Clone, Copy, Default)]
struct HitLocationRequest {
    enabled: bool,
    called: Option<HitLocationName>,
}

/// A single-use dice roller.
///
/// ```
/// use hd_dice::{HeroRoller, ScriptedSource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut roller = HeroRoller::new().make_normal_roll(true).add_dice(3);
/// roller.roll(&mut ScriptedSource::new([1, 6, 4])).await.unwrap();
/// assert_eq!(roller.stun_total().unwrap(), 11);
/// assert_eq!(roller.body_total().unwrap(), 3);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeroRoller {
    terms: Vec<ExpressionTerm>,
    roll_type: Option<RollType>,
    conflict: Option<DiceError>,
    standard_effect: bool,
    killing_die_minus_one: bool,
    stun_multiplier_levels: i32,
    hit_location: HitLocationRequest,
    outcome: Option<RollOutcome>,
}

impl HeroRoller {
    /// An unconfigured roller with no terms.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Roll type
    // ------------------------------------------------------------------

    fn set_roll_type(mut self, apply: bool, requested: RollType) -> Self {
        if !apply {
            return self;
        }
        match self.roll_type {
            None => self.roll_type = Some(requested),
            Some(existing) if existing != requested && self.conflict.is_none() => {
                self.conflict = Some(DiceError::RollTypeConflict {
                    existing,
                    requested,
                });
            }
            Some(_) => {}
        }
        self
    }

    /// Configure as a success roll when `apply` is true.
    pub fn make_success_roll(self, apply: bool) -> Self {
        self.set_roll_type(apply, RollType::Success)
    }

    /// Configure as normal damage when `apply` is true.
    pub fn make_normal_roll(self, apply: bool) -> Self {
        self.set_roll_type(apply, RollType::Normal)
    }

    /// Configure as killing damage when `apply` is true.
    ///
    /// The stun multiplier is rolled on ½d6, or on 1d6-1 (minimum 1) when
    /// `die_minus_one` is set.
    pub fn make_killing_roll(self, apply: bool, die_minus_one: bool) -> Self {
        let mut roller = self.set_roll_type(apply, RollType::Killing);
        if apply {
            roller.killing_die_minus_one = die_minus_one;
        }
        roller
    }

    /// Configure as an adjustment roll when `apply` is true.
    pub fn make_adjustment_roll(self, apply: bool) -> Self {
        self.set_roll_type(apply, RollType::Adjustment)
    }

    /// Configure as an entangle roll when `apply` is true.
    pub fn make_entangle_roll(self, apply: bool) -> Self {
        self.set_roll_type(apply, RollType::Entangle)
    }

    /// Configure as a flash roll when `apply` is true.
    pub fn make_flash_roll(self, apply: bool) -> Self {
        self.set_roll_type(apply, RollType::Flash)
    }

    // ------------------------------------------------------------------
    // Modifiers
    // ------------------------------------------------------------------

    /// Replace every die with its standard-effect face.
    pub fn modify_to_standard_effect(mut self, apply: bool) -> Self {
        if apply {
            self.standard_effect = true;
        }
        self
    }

    /// Add flat levels to a killing roll's stun multiplier.
    pub fn add_stun_multiplier(mut self, levels: i32) -> Self {
        self.stun_multiplier_levels += levels;
        self
    }

    /// Track hit location on normal and killing rolls.
    ///
    /// A `called` location replaces the rolled one; its multipliers still
    /// come from the table and the side is still rolled.
    pub fn add_to_hit_location(mut self, apply: bool, called: Option<HitLocationName>) -> Self {
        if apply {
            self.hit_location = HitLocationRequest {
                enabled: true,
                called,
            };
        }
        self
    }

    // ------------------------------------------------------------------
    // Terms
    // ------------------------------------------------------------------

    fn push_term(mut self, sign: Sign, term: ExpressionTerm) -> Self {
        if !self.terms.is_empty() || sign == Sign::Minus {
            self.terms.push(ExpressionTerm::Operator(sign));
        }
        self.terms.push(term);
        self
    }

    fn push_dice(self, count: i32, flavor: DieFlavor) -> Self {
        if count == 0 {
            return self;
        }
        let sign = if count < 0 { Sign::Minus } else { Sign::Plus };
        self.push_term(
            sign,
            ExpressionTerm::Dice {
                faces: 6,
                count: count.unsigned_abs(),
                flavor,
            },
        )
    }

    /// Add `count` d6; a negative count subtracts.
    pub fn add_dice(self, count: i32) -> Self {
        self.push_dice(count, DieFlavor::Full)
    }

    /// Add `count` half dice.
    pub fn add_half_dice(self, count: i32) -> Self {
        self.push_dice(count, DieFlavor::Half)
    }

    /// Add `count` d6-1 dice.
    pub fn add_die_minus_one(self, count: i32) -> Self {
        self.push_dice(count, DieFlavor::DieMinusOne)
    }

    /// Add `count` d6-1 dice that never roll below 1.
    pub fn add_die_minus_one_min1(self, count: i32) -> Self {
        self.push_dice(count, DieFlavor::DieMinusOneMin1)
    }

    /// Subtract `count` d6.
    pub fn sub_dice(self, count: u32) -> Self {
        if count == 0 {
            return self;
        }
        self.push_term(
            Sign::Minus,
            ExpressionTerm::Dice {
                faces: 6,
                count,
                flavor: DieFlavor::Full,
            },
        )
    }

    /// Add a flat number, optionally labelled. Zero is ignored.
    pub fn add_number(self, value: i32, label: Option<&str>) -> Self {
        if value == 0 {
            return self;
        }
        let sign = if value < 0 { Sign::Minus } else { Sign::Plus };
        self.push_term(
            sign,
            ExpressionTerm::Constant {
                value: value.unsigned_abs(),
                label: label.map(str::to_string),
            },
        )
    }

    /// Subtract a flat number.
    pub fn sub_number(self, value: u32) -> Self {
        if value == 0 {
            return self;
        }
        self.push_term(Sign::Minus, ExpressionTerm::Constant { value, label: None })
    }

    /// Append every part of a dice bundle.
    pub fn add_dice_parts(self, parts: &DiceParts) -> Self {
        self.add_dice(parts.d6_count())
            .add_half_dice(parts.half_die_count())
            .add_die_minus_one(parts.d6_less1_die_count())
            .add_number(parts.constant(), None)
    }

    // ------------------------------------------------------------------
    // Rolling
    // ------------------------------------------------------------------

    /// Roll every die once and derive the roll type's values.
    ///
    /// Nested sub-rolls (stun multiplier, then hit location) draw from the
    /// same source after the main dice, each awaiting its own draw in turn.
    pub async fn roll<S: DieSource>(&mut self, source: &mut S) -> DiceResult<()> {
        if self.outcome.is_some() {
            return Err(DiceError::AlreadyRolled);
        }
        if let Some(conflict) = &self.conflict {
            return Err(conflict.clone());
        }
        let roll_type = self.roll_type.ok_or(DiceError::NotConfigured)?;

        let raws = self.draw(source).await;

        let (stun_multiplier, stun_multiplier_terms) = if roll_type == RollType::Killing {
            let (multiplier, terms) = self.roll_stun_multiplier(source).await;
            (Some(multiplier), terms)
        } else {
            (None, Vec::new())
        };

        let hit_location = if self.hit_location.enabled
            && matches!(roll_type, RollType::Normal | RollType::Killing)
        {
            Some(
                self.roll_hit_location(source, roll_type == RollType::Killing)
                    .await,
            )
        } else {
            None
        };

        let terms = self.post_process(roll_type, &raws, stun_multiplier.unwrap_or(1));
        let outcome = RollOutcome {
            terms,
            stun_multiplier,
            stun_multiplier_terms,
            hit_location,
        };
        debug!(
            roll_type = %roll_type,
            formula = %self.formula(),
            base_total = total(&outcome.terms, |t| &t.base),
            "rolled"
        );
        self.outcome = Some(outcome);
        Ok(())
    }

    /// One batch draw for every die, with standard effect applied.
    async fn draw<S: DieSource>(&self, source: &mut S) -> Vec<Vec<u32>> {
        let faces: Vec<u32> = self
            .terms
            .iter()
            .flat_map(|term| match term {
                ExpressionTerm::Dice { faces, count, .. } => vec![*faces; *count as usize],
                _ => Vec::new(),
            })
            .collect();
        let mut drawn = source.roll_dice(&faces).await.into_iter();

        self.terms
            .iter()
            .map(|term| match term {
                ExpressionTerm::Dice { count, flavor, .. } => (0..*count)
                    .map(|_| {
                        let face = drawn.next().unwrap_or(1);
                        if self.standard_effect {
                            flavor.standard_effect_face()
                        } else {
                            face
                        }
                    })
                    .collect(),
                _ => Vec::new(),
            })
            .collect()
    }

    /// Sub-rolls are plain success rolls: draw, then post-process with no
    /// multiplier. They never recurse into further sub-rolls.
    async fn sub_roll<S: DieSource>(sub: &HeroRoller, source: &mut S) -> Vec<TermOutcome> {
        let raws = sub.draw(source).await;
        sub.post_process(RollType::Success, &raws, 1)
    }

    async fn roll_stun_multiplier<S: DieSource>(
        &self,
        source: &mut S,
    ) -> (i32, Vec<TermOutcome>) {
        let sub = HeroRoller::new()
            .make_success_roll(true)
            .modify_to_standard_effect(self.standard_effect);
        let sub = if self.killing_die_minus_one {
            sub.add_die_minus_one_min1(1)
        } else {
            sub.add_half_dice(1)
        };
        let terms = Self::sub_roll(&sub, source).await;
        let multiplier = (total(&terms, |t| &t.base) + self.stun_multiplier_levels).max(1);
        (multiplier, terms)
    }

    async fn roll_hit_location<S: DieSource>(
        &self,
        source: &mut S,
        killing: bool,
    ) -> HitLocation {
        let sub = HeroRoller::new()
            .make_success_roll(true)
            .add_dice(3)
            .add_dice(1);
        let terms = Self::sub_roll(&sub, source).await;
        let location_roll: i32 = terms.first().map(|t| t.base.iter().sum()).unwrap_or(0);
        let side_roll: i32 = terms.get(1).map(|t| t.base.iter().sum()).unwrap_or(0);

        let name = match self.hit_location.called {
            Some(called) => called,
            None => HitLocationName::from_roll(location_roll).unwrap_or_else(|| {
                warn!(location_roll, "hit location roll outside the table; using Chest");
                HitLocationName::Chest
            }),
        };
        HitLocation::new(name, side_roll, killing)
    }

    /// Turn raw faces into signed base values and the roll type's
    /// calculated values, die by die.
    fn post_process(
        &self,
        roll_type: RollType,
        raws: &[Vec<u32>],
        stun_multiplier: i32,
    ) -> Vec<TermOutcome> {
        let mut outcomes = Vec::new();
        let mut sign = Sign::Plus;
        let mut pending_operator = false;

        for (term, raw) in self.terms.iter().zip(raws) {
            let (faces, base, is_die, label) = match term {
                ExpressionTerm::Operator(op) => {
                    if pending_operator {
                        warn!(formula = %self.formula(), "consecutive operators; keeping the last");
                    }
                    sign = *op;
                    pending_operator = true;
                    continue;
                }
                ExpressionTerm::Dice { faces, flavor, .. } => {
                    let base = raw
                        .iter()
                        .map(|&face| {
                            let value = if self.standard_effect {
                                flavor.standard_effect_value()
                            } else {
                                flavor.base_value(face)
                            };
                            sign.factor() * value
                        })
                        .collect::<Vec<i32>>();
                    (*faces, base, true, None)
                }
                ExpressionTerm::Constant { value, label } => {
                    let magnitude = i32::try_from(*value).unwrap_or_else(|_| {
                        warn!(value, "constant exceeds i32::MAX; clamping");
                        i32::MAX
                    });
                    (0, vec![sign.factor() * magnitude], false, label.clone())
                }
            };

            let calculated = base
                .iter()
                .filter_map(|&value| calculate(roll_type, is_die, value, stun_multiplier))
                .collect();
            outcomes.push(TermOutcome {
                formula: term.formula(),
                label,
                sign: sign.factor(),
                faces,
                raw: raw.clone(),
                base,
                calculated,
            });
            sign = Sign::Plus;
            pending_operator = false;
        }

        if pending_operator {
            warn!(formula = %self.formula(), "trailing operator ignored");
        }
        outcomes
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The configured roll type, if any.
    pub fn roll_type(&self) -> Option<RollType> {
        self.roll_type
    }

    /// Whether standard effect is on.
    pub fn is_standard_effect(&self) -> bool {
        self.standard_effect
    }

    /// Whether `roll()` has completed.
    pub fn is_rolled(&self) -> bool {
        self.outcome.is_some()
    }

    /// The formula's terms in order.
    pub fn terms(&self) -> &[ExpressionTerm] {
        &self.terms
    }

    fn outcome(&self) -> DiceResult<&RollOutcome> {
        self.outcome.as_ref().ok_or(DiceError::NotRolled)
    }

    fn require(
        &self,
        accessor: &'static str,
        expected: &'static str,
        allowed: &[RollType],
    ) -> DiceResult<RollType> {
        let actual = self.roll_type.ok_or(DiceError::NotConfigured)?;
        if allowed.contains(&actual) {
            Ok(actual)
        } else {
            Err(DiceError::WrongRollType {
                accessor,
                expected,
                actual,
            })
        }
    }

    /// Faces shown, per value term.
    pub fn raw_terms(&self) -> DiceResult<Vec<Vec<u32>>> {
        Ok(self.outcome()?.terms.iter().map(|t| t.raw.clone()).collect())
    }

    /// Signed base values, per value term.
    pub fn base_terms(&self) -> DiceResult<Vec<Vec<i32>>> {
        Ok(self.outcome()?.terms.iter().map(|t| t.base.clone()).collect())
    }

    /// Sum of all base values.
    pub fn base_total(&self) -> DiceResult<i32> {
        Ok(total(&self.outcome()?.terms, |t| &t.base))
    }

    /// Roll-type derived values, per value term (normal and killing only).
    pub fn calculated_terms(&self) -> DiceResult<Vec<Vec<i32>>> {
        self.require(
            "calculated_terms",
            "Normal or Killing",
            &[RollType::Normal, RollType::Killing],
        )?;
        Ok(self
            .outcome()?
            .terms
            .iter()
            .map(|t| t.calculated.clone())
            .collect())
    }

    /// Sum of all calculated values (normal and killing only).
    pub fn calculated_total(&self) -> DiceResult<i32> {
        self.require(
            "calculated_total",
            "Normal or Killing",
            &[RollType::Normal, RollType::Killing],
        )?;
        Ok(total(&self.outcome()?.terms, |t| &t.calculated))
    }

    /// STUN: the base total of a normal roll, the calculated total of a
    /// killing roll.
    pub fn stun_total(&self) -> DiceResult<i32> {
        match self.require(
            "stun_total",
            "Normal or Killing",
            &[RollType::Normal, RollType::Killing],
        )? {
            RollType::Normal => self.base_total(),
            _ => self.calculated_total(),
        }
    }

    /// BODY: the calculated total of a normal roll, the base total of a
    /// killing roll.
    pub fn body_total(&self) -> DiceResult<i32> {
        match self.require(
            "body_total",
            "Normal or Killing",
            &[RollType::Normal, RollType::Killing],
        )? {
            RollType::Normal => self.calculated_total(),
            _ => self.base_total(),
        }
    }

    /// Total of a success roll.
    pub fn success_total(&self) -> DiceResult<i32> {
        self.require("success_total", "Success", &[RollType::Success])?;
        self.base_total()
    }

    /// Total of an entangle roll.
    pub fn entangle_total(&self) -> DiceResult<i32> {
        self.require("entangle_total", "Entangle", &[RollType::Entangle])?;
        self.base_total()
    }

    /// Total of an adjustment roll.
    pub fn adjustment_total(&self) -> DiceResult<i32> {
        self.require("adjustment_total", "Adjustment", &[RollType::Adjustment])?;
        self.base_total()
    }

    /// Total of a flash roll.
    pub fn flash_total(&self) -> DiceResult<i32> {
        self.require("flash_total", "Flash", &[RollType::Flash])?;
        self.base_total()
    }

    /// The stun multiplier of a killing roll.
    pub fn stun_multiplier(&self) -> DiceResult<i32> {
        self.require("stun_multiplier", "Killing", &[RollType::Killing])?;
        Ok(self.outcome()?.stun_multiplier.unwrap_or(1))
    }

    /// The hit location, if tracking was requested.
    pub fn hit_location(&self) -> DiceResult<Option<&HitLocation>> {
        Ok(self.outcome()?.hit_location.as_ref())
    }

    /// The formula as text, e.g. `3d6 + ½d6 - 1`.
    pub fn formula(&self) -> String {
        let mut out = String::new();
        for term in &self.terms {
            match term {
                ExpressionTerm::Operator(sign) if out.is_empty() => {
                    if *sign == Sign::Minus {
                        out.push('-');
                    }
                }
                ExpressionTerm::Operator(Sign::Plus) => out.push_str(" + "),
                ExpressionTerm::Operator(Sign::Minus) => out.push_str(" - "),
                other => out.push_str(&other.formula()),
            }
        }
        if out.is_empty() {
            out.push('0');
        }
        out
    }

    /// Per-term breakdown of the completed roll.
    pub fn tooltip(&self) -> DiceResult<RollTooltip> {
        let outcome = self.outcome()?;
        let roll_type = self.roll_type.ok_or(DiceError::NotConfigured)?;
        let with_calculated = matches!(roll_type, RollType::Normal | RollType::Killing);
        Ok(RollTooltip {
            roll_type,
            formula: self.formula(),
            terms: outcome
                .terms
                .iter()
                .map(|t| tooltip::term_tooltip(t, with_calculated))
                .collect(),
            base_total: total(&outcome.terms, |t| &t.base),
            calculated_total: with_calculated.then(|| total(&outcome.terms, |t| &t.calculated)),
            stun_multiplier_terms: outcome
                .stun_multiplier_terms
                .iter()
                .map(|t| tooltip::term_tooltip(t, false))
                .collect(),
            stun_multiplier: outcome.stun_multiplier,
            hit_location: outcome.hit_location.clone(),
        })
    }
}

fn total(terms: &[TermOutcome], values: impl Fn(&TermOutcome) -> &Vec<i32>) -> i32 {
    terms.iter().flat_map(|t| values(t).iter()).sum()
}

/// BODY counted for one normal-damage die.
fn normal_body(value: i32) -> i32 {
    let body = match value.abs() {
        0 | 1 => 0,
        6.. => 2,
        _ => 1,
    };
    value.signum() * body
}

fn calculate(roll_type: RollType, is_die: bool, base: i32, stun_multiplier: i32) -> Option<i32> {
    match roll_type {
        RollType::Normal if is_die => Some(normal_body(base)),
        // Flat pips add STUN but no BODY.
        RollType::Normal => Some(0),
        RollType::Killing => Some(base.saturating_mul(stun_multiplier)),
        RollType::Success | RollType::Adjustment | RollType::Entangle | RollType::Flash => None,
    }
}
