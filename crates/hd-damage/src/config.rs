//! Optional-rule configuration for damage assembly and rolling.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DamageResult;

/// How a deadly-blow bonus is combined with the rest of the added damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlyBlowMode {
    /// Legacy behavior: the deadly-blow DC is subtracted.
    #[default]
    Subtract,
    /// The deadly-blow DC is added like any other bonus.
    Add,
}

/// Campaign-level optional rules.
///
/// Every field has a default, so a JSON file only needs the rules it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Cap added damage classes at the base attack's own DC.
    pub double_damage_limit: bool,
    /// Roll hit locations for normal and killing attacks.
    pub hit_locations: bool,
    /// Use standard effect instead of rolling.
    pub standard_effect: bool,
    /// Roll killing stun multipliers on 1d6-1 instead of ½d6.
    pub stun_multiplier_die_minus_one: bool,
    /// How deadly-blow bonuses are combined.
    pub deadly_blow_mode: DeadlyBlowMode,
    /// DC lost while fighting underwater.
    pub underwater_penalty_dc: f64,
    /// Most DC boostable charges can add.
    pub max_boostable_charges_dc: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            double_damage_limit: false,
            hit_locations: false,
            standard_effect: false,
            stun_multiplier_die_minus_one: false,
            deadly_blow_mode: DeadlyBlowMode::Subtract,
            underwater_penalty_dc: 2.0,
            max_boostable_charges_dc: 4,
        }
    }
}

impl RulesConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> DamageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file.
    pub fn from_path(path: &Path) -> DamageResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Enable or disable the doubling limit.
    pub fn with_double_damage_limit(mut self, enabled: bool) -> Self {
        self.double_damage_limit = enabled;
        self
    }

    /// Enable or disable hit locations.
    pub fn with_hit_locations(mut self, enabled: bool) -> Self {
        self.hit_locations = enabled;
        self
    }

    /// Enable or disable standard effect.
    pub fn with_standard_effect(mut self, enabled: bool) -> Self {
        self.standard_effect = enabled;
        self
    }

    /// Choose the 1d6-1 stun multiplier.
    pub fn with_stun_multiplier_die_minus_one(mut self, enabled: bool) -> Self {
        self.stun_multiplier_die_minus_one = enabled;
        self
    }

    /// Set how deadly-blow bonuses combine.
    pub fn with_deadly_blow_mode(mut self, mode: DeadlyBlowMode) -> Self {
        self.deadly_blow_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config() {
        let cfg = RulesConfig::default();
        assert!(!cfg.double_damage_limit);
        assert!(!cfg.hit_locations);
        assert_eq!(cfg.deadly_blow_mode, DeadlyBlowMode::Subtract);
        assert_eq!(cfg.underwater_penalty_dc, 2.0);
        assert_eq!(cfg.max_boostable_charges_dc, 4);
    }

    #[test]
    fn builder_methods() {
        let cfg = RulesConfig::default()
            .with_double_damage_limit(true)
            .with_hit_locations(true)
            .with_deadly_blow_mode(DeadlyBlowMode::Add);
        assert!(cfg.double_damage_limit);
        assert!(cfg.hit_locations);
        assert_eq!(cfg.deadly_blow_mode, DeadlyBlowMode::Add);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = RulesConfig::from_json_str(r#"{"double_damage_limit": true, "deadly_blow_mode": "add"}"#)
            .unwrap();
        assert!(cfg.double_damage_limit);
        assert_eq!(cfg.deadly_blow_mode, DeadlyBlowMode::Add);
        assert_eq!(cfg.max_boostable_charges_dc, 4);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(RulesConfig::from_json_str("{not json").is_err());
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"hit_locations": true}}"#).unwrap();
        let cfg = RulesConfig::from_path(file.path()).unwrap();
        assert!(cfg.hit_locations);
    }
}
