//! Error types for the dice engine.

use crate::roller::RollType;

/// Errors raised by the roller's type-guarded accessors and lifecycle checks.
///
/// The numeric conversion functions never fail; only the roller does.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// An accessor was called against a roller of a different roll type.
    #[error("{accessor} is not available on a {actual} roll (expected {expected})")]
    WrongRollType {
        /// The accessor that was invoked.
        accessor: &'static str,
        /// Human-readable list of roll types the accessor supports.
        expected: &'static str,
        /// The roll type the roller was configured with.
        actual: RollType,
    },

    /// A result accessor was called before `roll()`.
    #[error("the roll has not been made yet")]
    NotRolled,

    /// `roll()` was called a second time on the same roller.
    #[error("this roller has already been rolled; construct a new one")]
    AlreadyRolled,

    /// `roll()` was called without any `make_*_roll` call.
    #[error("no roll type was configured")]
    NotConfigured,

    /// Two different roll types were requested on the same roller.
    #[error("roll type already set to {existing}, cannot change to {requested}")]
    RollTypeConflict {
        /// The roll type set first.
        existing: RollType,
        /// The roll type requested afterwards.
        requested: RollType,
    },
}

/// Convenience result type for roller operations.
pub type DiceResult<T> = Result<T, DiceError>;
