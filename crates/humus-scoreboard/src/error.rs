//! Scoreboard, volume-object and coordinator error types.

use std::error::Error;
use std::fmt;

use humus_core::{
    BoxCoordinate, BoxIndex, CharacteristicId, CoordinatorInstanceId, DescriptorError,
    ScoreboardInstanceId, Stratum, VolumeObjectIndex,
};
use humus_grid::{Face, GridError};

use crate::config::ConfigError;

// ── ScoreboardError ────────────────────────────────────────────────

/// Errors from characteristic storage and cached geometry queries.
#[derive(Clone, Debug, PartialEq)]
pub enum ScoreboardError {
    /// A box index, coordinate or continuous position could not be
    /// resolved against the grid.
    Grid(GridError),
    /// A `CharacteristicId` that was never registered on this scoreboard.
    UnknownCharacteristic {
        /// The unrecognised id.
        id: CharacteristicId,
    },
    /// A descriptor failed validation at registration.
    InvalidDescriptor(DescriptorError),
    /// A characteristic with this name is already registered.
    DuplicateCharacteristic {
        /// The repeated name.
        name: String,
    },
    /// A descriptor was routed to a scoreboard of another stratum.
    WrongStratum {
        /// The characteristic name.
        name: String,
        /// Stratum of this scoreboard.
        expected: Stratum,
        /// Stratum named by the descriptor.
        found: Stratum,
    },
    /// A range fill whose lower corner lies above its upper corner.
    InvertedRange {
        /// Lower corner supplied.
        from: BoxCoordinate,
        /// Upper corner supplied.
        to: BoxCoordinate,
    },
    /// A volume-object index above the number of registered objects.
    UnknownVolumeObject {
        /// The offending index.
        index: VolumeObjectIndex,
        /// Number of registered objects.
        count: usize,
    },
    /// The volume-object set changed after the coincidence cache was
    /// sized for it.
    VolumeObjectsChanged {
        /// Object count the cache was built for.
        cached: usize,
        /// Object count now registered.
        current: usize,
    },
    /// The coincidence cache was filled for a different volume-object
    /// coordinator.
    ForeignVolumeObjects {
        /// Coordinator the cache was filled for.
        cached: CoordinatorInstanceId,
        /// Coordinator passed to the query.
        current: CoordinatorInstanceId,
    },
    /// A restriction query for two boxes that do not share `face`.
    NotAdjacent {
        /// Source box.
        from: BoxIndex,
        /// Destination box.
        to: BoxIndex,
        /// Face of `from` queried.
        face: Face,
    },
    /// Volume objects are registered but the coordinator has not been
    /// bound to this scoreboard.
    Unbound {
        /// This scoreboard.
        scoreboard: ScoreboardInstanceId,
    },
}

impl fmt::Display for ScoreboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::UnknownCharacteristic { id } => {
                write!(f, "unknown characteristic: {id}")
            }
            Self::InvalidDescriptor(e) => write!(f, "invalid descriptor: {e}"),
            Self::DuplicateCharacteristic { name } => {
                write!(f, "characteristic '{name}' is already registered")
            }
            Self::WrongStratum {
                name,
                expected,
                found,
            } => write!(
                f,
                "characteristic '{name}' belongs to stratum {found}, not {expected}"
            ),
            Self::InvertedRange { from, to } => {
                write!(f, "box range {from}..={to} is inverted")
            }
            Self::UnknownVolumeObject { index, count } => write!(
                f,
                "volume object {index} out of range: {count} objects registered"
            ),
            Self::VolumeObjectsChanged { cached, current } => write!(
                f,
                "coincidence cache sized for {cached} volume objects, {current} now registered"
            ),
            Self::ForeignVolumeObjects { cached, current } => write!(
                f,
                "coincidence cache belongs to coordinator {cached}, not coordinator {current}"
            ),
            Self::NotAdjacent { from, to, face } => {
                write!(f, "box {to} is not the {face} neighbour of box {from}")
            }
            Self::Unbound { scoreboard } => write!(
                f,
                "volume objects are not bound to scoreboard {scoreboard}"
            ),
        }
    }
}

impl Error for ScoreboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::InvalidDescriptor(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ScoreboardError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<DescriptorError> for ScoreboardError {
    fn from(e: DescriptorError) -> Self {
        Self::InvalidDescriptor(e)
    }
}

// ── VolumeError ────────────────────────────────────────────────────

/// Errors from volume-object registration and scoreboard binding.
#[derive(Clone, Debug, PartialEq)]
pub enum VolumeError {
    /// An object reported index `0`, which is reserved for the background.
    ReservedIndex,
    /// Objects must be registered with indices `1, 2, 3, ...` in order.
    NonSequential {
        /// The index the next object must carry.
        expected: VolumeObjectIndex,
        /// The index it carried.
        found: VolumeObjectIndex,
    },
    /// Registration attempted after the coordinator was bound.
    RegistrationClosed,
    /// The object shares volume with an already registered object and
    /// neither is nested in the other.
    OverlappingObjects {
        /// The object that was refused.
        index: VolumeObjectIndex,
        /// The registered object it overlaps.
        other: VolumeObjectIndex,
    },
    /// The coordinator is already bound to a different scoreboard.
    UnsupportedConfiguration {
        /// The scoreboard already bound.
        bound: ScoreboardInstanceId,
        /// The scoreboard that was refused.
        requested: ScoreboardInstanceId,
    },
    /// The objects in one box claim more than its whole volume.
    ProportionOverflow {
        /// The overfull box.
        index: BoxIndex,
        /// Sum of the raw proportions of top-level objects.
        total: f64,
    },
    /// A sampling resolution of zero.
    InvalidSampling,
    /// A scoreboard query made while building subsections failed.
    Scoreboard(ScoreboardError),
}

impl fmt::Display for VolumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservedIndex => {
                write!(f, "volume object index 0 is reserved for the background")
            }
            Self::NonSequential { expected, found } => write!(
                f,
                "volume object index {found} registered out of order, expected {expected}"
            ),
            Self::RegistrationClosed => {
                write!(f, "volume objects cannot be registered after binding")
            }
            Self::OverlappingObjects { index, other } => write!(
                f,
                "volume object {index} overlaps volume object {other} without nesting"
            ),
            Self::UnsupportedConfiguration { bound, requested } => write!(
                f,
                "unsupported configuration: already bound to scoreboard {bound}, \
                 cannot bind scoreboard {requested}"
            ),
            Self::ProportionOverflow { index, total } => write!(
                f,
                "volume objects claim {total} of box {index}, more than its volume"
            ),
            Self::InvalidSampling => write!(f, "sampling resolution must be at least 1"),
            Self::Scoreboard(e) => write!(f, "scoreboard: {e}"),
        }
    }
}

impl Error for VolumeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Scoreboard(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ScoreboardError> for VolumeError {
    fn from(e: ScoreboardError) -> Self {
        Self::Scoreboard(e)
    }
}

impl From<GridError> for VolumeError {
    fn from(e: GridError) -> Self {
        Self::Scoreboard(ScoreboardError::Grid(e))
    }
}

// ── CoordinatorError ───────────────────────────────────────────────

/// Errors from routed multi-stratum operations.
#[derive(Clone, Debug, PartialEq)]
pub enum CoordinatorError {
    /// No scoreboard was configured for this stratum.
    MissingStratum(Stratum),
    /// The scoreboard set failed validation.
    Config(ConfigError),
    /// The owning scoreboard rejected the operation.
    Scoreboard(ScoreboardError),
}

impl fmt::Display for CoordinatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStratum(s) => write!(f, "no scoreboard for stratum {s}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Scoreboard(e) => write!(f, "scoreboard: {e}"),
        }
    }
}

impl Error for CoordinatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Scoreboard(e) => Some(e),
            Self::MissingStratum(_) => None,
        }
    }
}

impl From<ConfigError> for CoordinatorError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ScoreboardError> for CoordinatorError {
    fn from(e: ScoreboardError) -> Self {
        Self::Scoreboard(e)
    }
}

impl From<GridError> for CoordinatorError {
    fn from(e: GridError) -> Self {
        Self::Scoreboard(ScoreboardError::Grid(e))
    }
}
