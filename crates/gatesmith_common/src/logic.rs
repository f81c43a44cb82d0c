//! Two-state logic values with truth-table-based operators.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// A single binary signal level.
///
/// Serialized as the integers `0` and `1`. There is no unknown or
/// high-impedance state: an undriven input reads as [`Logic::Zero`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Logic {
    /// Logic low (0).
    #[default]
    Zero = 0,
    /// Logic high (1).
    One = 1,
}

/// Error returned when converting an integer other than 0 or 1 into [`Logic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid logic level {0}, expected 0 or 1")]
pub struct InvalidLogicLevel(pub u8);

impl Logic {
    /// Converts a boolean to a logic level (`true` is [`Logic::One`]).
    pub fn from_bool(b: bool) -> Self {
        if b {
            Logic::One
        } else {
            Logic::Zero
        }
    }

    /// Returns `true` for [`Logic::One`].
    pub fn is_high(self) -> bool {
        self == Logic::One
    }

    /// Converts a character to a [`Logic`] value. Accepts `'0'` and `'1'`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Logic::Zero),
            '1' => Some(Logic::One),
            _ => None,
        }
    }
}

impl From<bool> for Logic {
    fn from(b: bool) -> Self {
        Logic::from_bool(b)
    }
}

impl From<Logic> for u8 {
    fn from(l: Logic) -> u8 {
        l as u8
    }
}

impl TryFrom<u8> for Logic {
    type Error = InvalidLogicLevel;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Logic::Zero),
            1 => Ok(Logic::One),
            other => Err(InvalidLogicLevel(other)),
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logic::Zero => write!(f, "0"),
            Logic::One => write!(f, "1"),
        }
    }
}

impl BitAnd for Logic {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Logic::from_bool(self.is_high() && rhs.is_high())
    }
}

impl BitOr for Logic {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Logic::from_bool(self.is_high() || rhs.is_high())
    }
}

impl BitXor for Logic {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Logic::from_bool(self != rhs)
    }
}

/// `!0 = 1`, `!1 = 0`, i.e. `1 - state`.
impl Not for Logic {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Logic::Zero => Logic::One,
            Logic::One => Logic::Zero,
        }
    }
}
