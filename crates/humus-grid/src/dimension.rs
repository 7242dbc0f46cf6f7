//! Spatial dimensions and box faces.

use std::fmt;

/// One of the three spatial dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    /// Left to right.
    X,
    /// Front to back.
    Y,
    /// Top to bottom (depth).
    Z,
}

impl Dimension {
    /// All dimensions in X, Y, Z order.
    pub const ALL: [Dimension; 3] = [Dimension::X, Dimension::Y, Dimension::Z];

    /// Position of this dimension in `ALL`.
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::Y => write!(f, "Y"),
            Self::Z => write!(f, "Z"),
        }
    }
}

/// One of the six faces of a box, naming the direction of transfer to
/// the adjacent box on that side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    /// Towards lower X.
    NegX,
    /// Towards higher X.
    PosX,
    /// Towards lower Y.
    NegY,
    /// Towards higher Y.
    PosY,
    /// Towards lower Z.
    NegZ,
    /// Towards higher Z.
    PosZ,
}

impl Face {
    /// All faces, paired by dimension.
    pub const ALL: [Face; 6] = [
        Face::NegX,
        Face::PosX,
        Face::NegY,
        Face::PosY,
        Face::NegZ,
        Face::PosZ,
    ];

    /// Dimension this face is perpendicular to.
    pub fn dimension(self) -> Dimension {
        match self {
            Self::NegX | Self::PosX => Dimension::X,
            Self::NegY | Self::PosY => Dimension::Y,
            Self::NegZ | Self::PosZ => Dimension::Z,
        }
    }

    /// Returns `true` for the face on the higher-coordinate side.
    pub fn is_positive(self) -> bool {
        matches!(self, Self::PosX | Self::PosY | Self::PosZ)
    }

    /// The opposite face of the same dimension.
    ///
    /// ```
    /// use humus_grid::Face;
    ///
    /// assert_eq!(Face::PosX.reverse(), Face::NegX);
    /// assert_eq!(Face::NegZ.reverse(), Face::PosZ);
    /// ```
    pub fn reverse(self) -> Self {
        match self {
            Self::NegX => Self::PosX,
            Self::PosX => Self::NegX,
            Self::NegY => Self::PosY,
            Self::PosY => Self::NegY,
            Self::NegZ => Self::PosZ,
            Self::PosZ => Self::NegZ,
        }
    }

    /// Position of this face in `ALL`.
    pub fn index(self) -> usize {
        match self {
            Self::NegX => 0,
            Self::PosX => 1,
            Self::NegY => 2,
            Self::PosY => 3,
            Self::NegZ => 4,
            Self::PosZ => 5,
        }
    }

    /// Layer offset `(dx, dy, dz)` to the adjacent box.
    pub fn offset(self) -> (i64, i64, i64) {
        match self {
            Self::NegX => (-1, 0, 0),
            Self::PosX => (1, 0, 0),
            Self::NegY => (0, -1, 0),
            Self::PosY => (0, 1, 0),
            Self::NegZ => (0, 0, -1),
            Self::PosZ => (0, 0, 1),
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_positive() { '+' } else { '-' };
        write!(f, "{sign}{}", self.dimension())
    }
}
