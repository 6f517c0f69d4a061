//! The 3d6 hit-location table.

use serde::{Deserialize, Serialize};

/// A body location from the hit-location table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitLocationName {
    /// 3-5.
    Head,
    /// 6.
    Hand,
    /// 7-8.
    Arm,
    /// 9.
    Shoulder,
    /// 10-11.
    Chest,
    /// 12.
    Stomach,
    /// 13.
    Vitals,
    /// 14.
    Thigh,
    /// 15-16.
    Leg,
    /// 17-18.
    Foot,
}

impl HitLocationName {
    /// Look up the location for a 3d6 total. Returns `None` outside 3-18.
    pub fn from_roll(total: i32) -> Option<Self> {
        match total {
            3..=5 => Some(Self::Head),
            6 => Some(Self::Hand),
            7 | 8 => Some(Self::Arm),
            9 => Some(Self::Shoulder),
            10 | 11 => Some(Self::Chest),
            12 => Some(Self::Stomach),
            13 => Some(Self::Vitals),
            14 => Some(Self::Thigh),
            15 | 16 => Some(Self::Leg),
            17 | 18 => Some(Self::Foot),
            _ => None,
        }
    }

    /// Parse a location name, case-insensitively. Plurals are accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        let name = name.strip_suffix('s').unwrap_or(&name);
        match name {
            "head" => Some(Self::Head),
            "hand" => Some(Self::Hand),
            "arm" => Some(Self::Arm),
            "shoulder" => Some(Self::Shoulder),
            "chest" => Some(Self::Chest),
            "stomach" => Some(Self::Stomach),
            "vital" => Some(Self::Vitals),
            "thigh" => Some(Self::Thigh),
            "leg" => Some(Self::Leg),
            "foot" | "feet" => Some(Self::Foot),
            _ => None,
        }
    }

    /// Whether the location has a left and a right.
    pub fn is_sided(self) -> bool {
        matches!(
            self,
            Self::Hand | Self::Shoulder | Self::Arm | Self::Thigh | Self::Leg | Self::Foot
        )
    }

    /// STUN multiplier applied to killing damage (STUNx).
    pub fn killing_stun_multiplier(self) -> f64 {
        match self {
            Self::Head => 5.0,
            Self::Hand | Self::Foot => 1.0,
            Self::Arm | Self::Thigh | Self::Leg => 2.0,
            Self::Shoulder | Self::Chest => 3.0,
            Self::Stomach | Self::Vitals => 4.0,
        }
    }

    /// STUN multiplier applied to normal damage (N STUN).
    pub fn normal_stun_multiplier(self) -> f64 {
        match self {
            Self::Head => 2.0,
            Self::Hand | Self::Arm | Self::Leg | Self::Foot => 0.5,
            Self::Shoulder | Self::Chest | Self::Thigh => 1.0,
            Self::Stomach | Self::Vitals => 1.5,
        }
    }

    /// BODY multiplier (BODYx).
    pub fn body_multiplier(self) -> f64 {
        match self {
            Self::Head | Self::Vitals => 2.0,
            Self::Hand | Self::Arm | Self::Leg | Self::Foot => 0.5,
            Self::Shoulder | Self::Chest | Self::Stomach | Self::Thigh => 1.0,
        }
    }
}

impl std::fmt::Display for HitLocationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Head => "Head",
            Self::Hand => "Hand",
            Self::Arm => "Arm",
            Self::Shoulder => "Shoulder",
            Self::Chest => "Chest",
            Self::Stomach => "Stomach",
            Self::Vitals => "Vitals",
            Self::Thigh => "Thigh",
            Self::Leg => "Leg",
            Self::Foot => "Foot",
        };
        f.write_str(name)
    }
}

/// Which side of the body was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    /// Left side.
    Left,
    /// Right side.
    Right,
    /// The location has no side.
    #[default]
    #[serde(rename = "")]
    None,
}

impl Side {
    /// Read a 1d6 side roll: above 4 is the right side.
    pub fn from_roll(roll: i32) -> Self {
        if roll > 4 { Self::Right } else { Self::Left }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => f.write_str("Left"),
            Self::Right => f.write_str("Right"),
            Self::None => Ok(()),
        }
    }
}

/// A resolved hit location with its multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitLocation {
    /// The location hit.
    pub name: HitLocationName,
    /// The side hit, if the location is sided.
    pub side: Side,
    /// Display name including side, e.g. "Right Arm".
    pub full_name: String,
    /// STUN multiplier for the roll's damage type.
    pub stun_multiplier: f64,
    /// BODY multiplier.
    pub body_multiplier: f64,
}

impl HitLocation {
    /// Resolve a location. `side_roll` is ignored for unsided locations.
    pub fn new(name: HitLocationName, side_roll: i32, killing: bool) -> Self {
        let side = if name.is_sided() {
            Side::from_roll(side_roll)
        } else {
            Side::None
        };
        let full_name = match side {
            Side::None => name.to_string(),
            side => format!("{side} {name}"),
        };
        let stun_multiplier = if killing {
            name.killing_stun_multiplier()
        } else {
            name.normal_stun_multiplier()
        };
        Self {
            name,
            side,
            full_name,
            stun_multiplier,
            body_multiplier: name.body_multiplier(),
        }
    }
}
