//! Error types for damage assembly.

use thiserror::Error;

/// Result type for damage assembly.
pub type DamageResult<T> = Result<T, DamageError>;

/// Errors raised while assembling damage dice.
///
/// The public calculation entry points log these and fall back to zero
/// dice; only the `try_*` variants hand them to the caller.
#[derive(Debug, Error)]
pub enum DamageError {
    /// The attack needs a base item (such as a weapon) that was not supplied.
    #[error("{attack} has no base attack: {reason}")]
    MissingBaseAttack {
        /// Name of the attack being resolved.
        attack: String,
        /// What was missing.
        reason: String,
    },

    /// A descriptor carries values the calculation cannot use.
    #[error("invalid descriptor for {item}: {reason}")]
    InvalidDescriptor {
        /// Name of the offending item.
        item: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An item pays an AP-per-die cost the ruleset does not define.
    #[error("{item} has unrecognized attack cost of {ap_per_die} AP per die")]
    UnknownAttackCostTier {
        /// Name of the offending item.
        item: String,
        /// The unrecognized cost.
        ap_per_die: u32,
    },

    /// A conditional attack of a kind this engine does not handle.
    #[error("conditional attack {name} has unrecognized kind {kind}")]
    UnknownConditionalAttack {
        /// Name of the conditional attack.
        name: String,
        /// Its kind identifier.
        kind: String,
    },

    /// A rules configuration file could not be read.
    #[error("failed to read rules config: {0}")]
    Io(#[from] std::io::Error),

    /// A rules configuration or descriptor could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
