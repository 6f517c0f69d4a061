//! Dice-expression terms.

use serde::{Deserialize, Serialize};

/// How the raw value of each die in a group is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieFlavor {
    /// The die's face value.
    Full,
    /// Half the face value, rounded up (a d3).
    Half,
    /// Face value minus one.
    DieMinusOne,
    /// Face value minus one, never below one.
    DieMinusOneMin1,
}

impl DieFlavor {
    /// Convert a raw face into this flavor's base value.
    pub fn base_value(self, raw: u32) -> i32 {
        let raw = raw as i32;
        match self {
            Self::Full => raw,
            Self::Half => (raw + 1) / 2,
            Self::DieMinusOne => raw - 1,
            Self::DieMinusOneMin1 => (raw - 1).max(1),
        }
    }

    /// The face every die shows under the standard effect rule.
    pub fn standard_effect_face(self) -> u32 {
        match self {
            Self::Half => 1,
            Self::Full | Self::DieMinusOne | Self::DieMinusOneMin1 => 3,
        }
    }

    /// The value every die counts for under the standard effect rule.
    ///
    /// The fixed face is the value: a d6-1 die counts 3, not 2.
    pub fn standard_effect_value(self) -> i32 {
        self.standard_effect_face() as i32
    }
}

/// Sign carried by an operator term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    /// Addition.
    Plus,
    /// Subtraction.
    Minus,
}

impl Sign {
    /// `1` or `-1`.
    pub fn factor(self) -> i32 {
        match self {
            Self::Plus => 1,
            Self::Minus => -1,
        }
    }
}

/// One term of a roll formula.
///
/// A formula is an ordered sequence of terms. Operators sit between value
/// terms; the first value term has no operator unless it is negated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpressionTerm {
    /// `count` dice with `faces` sides, read according to `flavor`.
    Dice {
        /// Sides per die.
        faces: u32,
        /// Number of dice.
        count: u32,
        /// How each face is interpreted.
        flavor: DieFlavor,
    },
    /// A flat number.
    Constant {
        /// Magnitude; the preceding operator supplies the sign.
        value: u32,
        /// Optional description shown in tooltips.
        label: Option<String>,
    },
    /// `+` or `-` applying to the following value term.
    Operator(Sign),
}

impl ExpressionTerm {
    /// The formula fragment for this term.
    pub fn formula(&self) -> String {
        match self {
            Self::Dice {
                faces,
                count,
                flavor,
            } => match (flavor, count) {
                (DieFlavor::Full, n) => format!("{n}d{faces}"),
                (DieFlavor::Half, 1) => format!("½d{faces}"),
                (DieFlavor::Half, n) => format!("{n}(½d{faces})"),
                (DieFlavor::DieMinusOne | DieFlavor::DieMinusOneMin1, 1) => format!("1d{faces}-1"),
                (DieFlavor::DieMinusOne | DieFlavor::DieMinusOneMin1, n) => {
                    format!("{n}(d{faces}-1)")
                }
            },
            Self::Constant { value, .. } => value.to_string(),
            Self::Operator(Sign::Plus) => "+".to_string(),
            Self::Operator(Sign::Minus) => "-".to_string(),
        }
    }
}
