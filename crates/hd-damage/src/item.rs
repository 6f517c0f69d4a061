//! Read-only descriptions of attacks supplied by the item layer.

use hd_dice::{AttackCostTier, DiceParts};
use serde::{Deserialize, Serialize};

/// Ruleset edition an item was built under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    /// Fifth edition rules.
    Old,
    /// Sixth edition rules.
    #[default]
    New,
}

/// What kind of damage an attack does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectFlags {
    /// Normal damage.
    pub normal: bool,
    /// Killing damage.
    pub killing: bool,
    /// Mental attack.
    pub mental: bool,
    /// No normal defense.
    pub nnd: bool,
}

/// Combat-maneuver details carried by maneuver items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManeuverInfo {
    /// DC the maneuver adds to the attack.
    pub dc_bonus: f64,
    /// Martial arts maneuvers also receive extra-DC items.
    pub martial: bool,
    /// The maneuver cannot be used without a weapon.
    pub requires_weapon: bool,
    /// Effect text, e.g. `"[NORMALDC] +v/10"`.
    pub effect: String,
}

/// Dice stated directly by an item that pays no AP per die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedDice {
    /// Whole d6.
    pub d6: i32,
    /// D6-1 dice.
    pub d6_less1: i32,
    /// Half dice.
    pub half_die: i32,
    /// Flat pip.
    pub constant: i32,
}

impl From<FixedDice> for DiceParts {
    fn from(dice: FixedDice) -> Self {
        DiceParts::fixed(dice.d6, dice.d6_less1, dice.half_die, dice.constant)
    }
}

fn one() -> f64 {
    1.0
}

/// An attack, weapon, or maneuver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Kind identifier (e.g. `"HA"`, `"HKA"`, `"STRIKE"`).
    pub xmlid: String,
    /// AP per die; derived from the effect flags when absent.
    #[serde(default)]
    pub ap_per_die: Option<u32>,
    /// Damage type flags.
    #[serde(default)]
    pub effect: EffectFlags,
    /// The item's own damage classes.
    #[serde(default)]
    pub dc: f64,
    /// Ruleset edition.
    #[serde(default)]
    pub edition: Edition,
    /// `1 + advantages` on the power.
    #[serde(default = "one")]
    pub advantage_multiplier: f64,
    /// Present on combat maneuvers.
    #[serde(default)]
    pub maneuver: Option<ManeuverInfo>,
    /// Dice for zero-cost items.
    #[serde(default)]
    pub fixed_dice: FixedDice,
    /// Custom adder names on the item.
    #[serde(default)]
    pub custom_adders: Vec<String>,
    /// Show half dice as d6-1.
    #[serde(default)]
    pub use_die_minus_one: bool,
}

impl ItemDescriptor {
    /// A normal-damage item with no DC.
    pub fn new(id: impl Into<String>, name: impl Into<String>, xmlid: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            xmlid: xmlid.into(),
            ap_per_die: None,
            effect: EffectFlags {
                normal: true,
                ..EffectFlags::default()
            },
            dc: 0.0,
            edition: Edition::New,
            advantage_multiplier: 1.0,
            maneuver: None,
            fixed_dice: FixedDice::default(),
            custom_adders: Vec::new(),
            use_die_minus_one: false,
        }
    }

    /// Set the item's DC.
    pub fn with_dc(mut self, dc: f64) -> Self {
        self.dc = dc;
        self
    }

    /// Mark the item as doing killing damage.
    pub fn killing(mut self) -> Self {
        self.effect = EffectFlags {
            killing: true,
            ..EffectFlags::default()
        };
        self
    }

    /// Mark the item as a mental attack.
    pub fn mental(mut self) -> Self {
        self.effect.mental = true;
        self
    }

    /// Override the AP-per-die cost.
    pub fn with_ap_per_die(mut self, ap: u32) -> Self {
        self.ap_per_die = Some(ap);
        self
    }

    /// Set the edition.
    pub fn with_edition(mut self, edition: Edition) -> Self {
        self.edition = edition;
        self
    }

    /// Set the advantage multiplier.
    pub fn with_advantage_multiplier(mut self, multiplier: f64) -> Self {
        self.advantage_multiplier = multiplier;
        self
    }

    /// Attach maneuver details.
    pub fn with_maneuver(mut self, maneuver: ManeuverInfo) -> Self {
        self.maneuver = Some(maneuver);
        self
    }

    /// Add a custom adder.
    pub fn with_custom_adder(mut self, adder: impl Into<String>) -> Self {
        self.custom_adders.push(adder.into());
        self
    }

    /// Set the dice of a zero-cost item.
    pub fn with_fixed_dice(mut self, dice: FixedDice) -> Self {
        self.ap_per_die = Some(0);
        self.fixed_dice = dice;
        self
    }

    /// AP per die, falling back to the conventional cost for the effect.
    pub fn ap_per_die(&self) -> u32 {
        self.ap_per_die.unwrap_or_else(|| {
            AttackCostTier::for_effect(self.effect.killing, self.effect.mental || self.effect.nnd)
                .ap_per_die()
        })
    }

    /// Whether this item is a combat maneuver.
    pub fn is_maneuver(&self) -> bool {
        self.maneuver.is_some()
    }

    /// Whether this item is a martial-arts maneuver.
    pub fn is_martial(&self) -> bool {
        self.maneuver.as_ref().is_some_and(|m| m.martial)
    }

    /// Whether the item has a custom adder with this name (case-insensitive).
    pub fn has_custom_adder(&self, name: &str) -> bool {
        self.custom_adders
            .iter()
            .any(|adder| adder.eq_ignore_ascii_case(name))
    }

    /// The velocity divisor named by the maneuver's effect (`+v/10` gives 10).
    pub fn velocity_divisor(&self) -> Option<f64> {
        let effect = &self.maneuver.as_ref()?.effect;
        let lower = effect.to_lowercase();
        let start = lower.find("v/")? + 2;
        let digits: String = lower[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        digits.parse::<f64>().ok().filter(|d| *d > 0.0)
    }
}
