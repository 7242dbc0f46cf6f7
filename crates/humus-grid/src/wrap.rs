//! Wrap reports for periodic lookups.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bitmask of the periodic boundaries a lookup crossed.
///
/// # Examples
///
/// ```
/// use humus_grid::WrapDirection;
///
/// let both = WrapDirection::X | WrapDirection::Y;
/// assert!(both.contains(WrapDirection::X));
/// assert!(!WrapDirection::NONE.contains(WrapDirection::Y));
/// assert!(WrapDirection::default().is_none());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WrapDirection(u8);

impl WrapDirection {
    /// No wrap occurred.
    pub const NONE: Self = Self(0);
    /// The X coordinate wrapped.
    pub const X: Self = Self(1);
    /// The Y coordinate wrapped.
    pub const Y: Self = Self(1 << 1);

    /// Returns `true` if every bit of `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    /// Returns `true` if no wrap occurred.
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Raw bits (`1` = X, `2` = Y).
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for WrapDirection {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for WrapDirection {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for WrapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.contains(Self::X), self.contains(Self::Y)) {
            (false, false) => write!(f, "none"),
            (true, false) => write!(f, "x"),
            (false, true) => write!(f, "y"),
            (true, true) => write!(f, "x|y"),
        }
    }
}
