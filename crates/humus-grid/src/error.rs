//! Error types for grid construction and lookups.

use crate::dimension::Dimension;
use humus_core::{BoxCoordinate, BoxIndex};
use std::fmt;

/// Errors arising from boundary-array construction or grid queries.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// Fewer than two boundaries: a dimension needs at least one layer.
    TooFewBoundaries {
        /// The dimension being built.
        dimension: Dimension,
        /// Number of boundaries supplied.
        count: usize,
    },
    /// A boundary position is NaN or infinite.
    NonFiniteBoundary {
        /// The dimension being built.
        dimension: Dimension,
        /// Position of the offending entry.
        position: usize,
    },
    /// Boundaries are not strictly increasing.
    NotIncreasing {
        /// The dimension being built.
        dimension: Dimension,
        /// Position of the first entry that is not above its predecessor.
        position: usize,
        /// The predecessor value.
        previous: f64,
        /// The offending value.
        value: f64,
    },
    /// A boundary array was handed to the wrong axis of a grid.
    DimensionMismatch {
        /// Axis the array was supplied for.
        expected: Dimension,
        /// Axis the array was built for.
        found: Dimension,
    },
    /// A 1-based layer index is outside `[1, layers]`.
    LayerOutOfRange {
        /// The dimension queried.
        dimension: Dimension,
        /// The offending layer index.
        layer: i64,
        /// Number of layers in that dimension.
        layers: u32,
    },
    /// A continuous position is outside the domain under
    /// [`LookupPolicy::Strict`](crate::LookupPolicy::Strict).
    PositionOutsideDomain {
        /// The dimension queried.
        dimension: Dimension,
        /// The offending position.
        value: f64,
        /// Lower domain bound.
        lower: f64,
        /// Upper domain bound.
        upper: f64,
    },
    /// A continuous position is NaN or infinite.
    NonFinitePosition {
        /// The dimension queried.
        dimension: Dimension,
    },
    /// A box coordinate is outside the grid.
    CoordinateOutOfRange {
        /// The offending coordinate.
        coord: BoxCoordinate,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// A linear box index is outside `[0, box_count)`.
    BoxOutOfRange {
        /// The offending index.
        index: BoxIndex,
        /// Number of boxes in the grid.
        count: usize,
    },
    /// The box count does not fit in `usize`.
    BoxCountOverflow,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewBoundaries { dimension, count } => {
                write!(f, "{dimension} needs at least 2 boundaries, got {count}")
            }
            Self::NonFiniteBoundary {
                dimension,
                position,
            } => write!(f, "{dimension} boundary {position} is not finite"),
            Self::NotIncreasing {
                dimension,
                position,
                previous,
                value,
            } => write!(
                f,
                "{dimension} boundary {position} ({value}) is not above its predecessor ({previous})"
            ),
            Self::DimensionMismatch { expected, found } => {
                write!(f, "expected a {expected} boundary array, got {found}")
            }
            Self::LayerOutOfRange {
                dimension,
                layer,
                layers,
            } => write!(f, "{dimension} layer {layer} out of range [1, {layers}]"),
            Self::PositionOutsideDomain {
                dimension,
                value,
                lower,
                upper,
            } => write!(
                f,
                "{dimension} position {value} outside domain [{lower}, {upper}]"
            ),
            Self::NonFinitePosition { dimension } => {
                write!(f, "{dimension} position is not finite")
            }
            Self::CoordinateOutOfRange { coord, bounds } => {
                write!(f, "box coordinate {coord} out of range: {bounds}")
            }
            Self::BoxOutOfRange { index, count } => {
                write!(f, "box index {index} out of range [0, {count})")
            }
            Self::BoxCountOverflow => write!(f, "box count overflows usize"),
        }
    }
}

impl std::error::Error for GridError {}
