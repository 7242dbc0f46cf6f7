//! Strongly-typed identifiers for boxes, characteristics, and volume objects.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Linear, 0-based address of one box within a scoreboard.
///
/// Encodes a [`BoxCoordinate`] as
/// `x-1 + num_x*(y-1) + num_x*num_y*(z-1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxIndex(pub usize);

impl fmt::Display for BoxIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for BoxIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// 1-based `(x, y, z)` layer address of one box within a scoreboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxCoordinate {
    /// Layer index along X, starting at 1.
    pub x: u32,
    /// Layer index along Y, starting at 1.
    pub y: u32,
    /// Layer index along Z, starting at 1.
    pub z: u32,
}

impl BoxCoordinate {
    /// Build a coordinate from its three 1-based layer indices.
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for BoxCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Identifies a characteristic registered on a scoreboard.
///
/// Characteristics are assigned sequential slots in registration order;
/// `CharacteristicId(n)` is the n-th registered field of its scoreboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharacteristicId(pub u32);

impl fmt::Display for CharacteristicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CharacteristicId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Stable index of a volume object.
///
/// Index 0 is reserved for the background: the part of a box that lies
/// outside every registered object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VolumeObjectIndex(pub u32);

impl VolumeObjectIndex {
    /// The background sentinel ("no object").
    pub const BACKGROUND: Self = Self(0);

    /// Returns `true` for the background sentinel.
    pub fn is_background(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for VolumeObjectIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VolumeObjectIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Counter for unique [`ScoreboardInstanceId`] allocation.
static SCOREBOARD_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a scoreboard.
///
/// Allocated from a monotonic atomic counter via
/// [`ScoreboardInstanceId::next`]. Two scoreboards built from identical
/// boundaries still get different IDs. The volume-object coordinator
/// uses it to recognise the scoreboard it was bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScoreboardInstanceId(u64);

impl ScoreboardInstanceId {
    /// Allocate a fresh, unique instance ID.
    pub fn next() -> Self {
        Self(SCOREBOARD_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ScoreboardInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Counter for unique [`CoordinatorInstanceId`] allocation.
static COORDINATOR_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a volume-object coordinator.
///
/// A scoreboard's coincidence cache records the coordinator it was
/// filled for and refuses queries made with any other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordinatorInstanceId(u64);

impl CoordinatorInstanceId {
    /// Allocate a fresh, unique instance ID.
    pub fn next() -> Self {
        Self(COORDINATOR_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CoordinatorInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
