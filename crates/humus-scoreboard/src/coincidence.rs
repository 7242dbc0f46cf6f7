//! Lazily-allocated memo of coincident proportions.
//!
//! One slot per `(box, volume object)` pair, background included, laid
//! out box-major: slot `box * (objects + 1) + object`. `None` marks a
//! slot not yet computed. Slots are never invalidated; volume objects
//! are static once registered. The cache remembers which coordinator
//! it was filled for, so a second coordinator with the same number of
//! objects cannot read the first one's proportions.

use humus_core::{BoxIndex, CoordinatorInstanceId, VolumeObjectIndex};
use tracing::debug;

use crate::error::ScoreboardError;

/// Memoised coincident proportions for one scoreboard.
#[derive(Clone, Debug, Default)]
pub struct CoincidenceCache {
    slots: Vec<Option<f64>>,
    stride: usize,
    owner: Option<CoordinatorInstanceId>,
}

impl CoincidenceCache {
    /// An unallocated cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once [`ensure`](Self::ensure) has sized the cache.
    pub fn is_allocated(&self) -> bool {
        self.stride != 0
    }

    /// Number of volume objects the cache was sized for.
    pub fn object_count(&self) -> Option<usize> {
        self.is_allocated().then(|| self.stride - 1)
    }

    /// Coordinator the cache was filled for.
    pub fn owner(&self) -> Option<CoordinatorInstanceId> {
        self.owner
    }

    /// Allocate on first use for `owner`; afterwards check the same
    /// coordinator is asking and its object count still matches.
    pub fn ensure(
        &mut self,
        box_count: usize,
        owner: CoordinatorInstanceId,
        object_count: usize,
    ) -> Result<(), ScoreboardError> {
        match (self.owner, self.object_count()) {
            (Some(cached), _) if cached != owner => Err(ScoreboardError::ForeignVolumeObjects {
                cached,
                current: owner,
            }),
            (_, Some(cached)) if cached != object_count => {
                Err(ScoreboardError::VolumeObjectsChanged {
                    cached,
                    current: object_count,
                })
            }
            (_, Some(_)) => Ok(()),
            (_, None) => {
                self.stride = object_count + 1;
                self.slots = vec![None; box_count * self.stride];
                self.owner = Some(owner);
                debug!(
                    coordinator = %owner,
                    boxes = box_count,
                    objects = object_count,
                    slots = self.slots.len(),
                    "allocated coincidence cache"
                );
                Ok(())
            }
        }
    }

    fn slot(&self, index: BoxIndex, object: VolumeObjectIndex) -> usize {
        index.0 * self.stride + object.0 as usize
    }

    /// Cached proportion, if computed.
    ///
    /// Callers range-check `index` and `object` first.
    pub fn get(&self, index: BoxIndex, object: VolumeObjectIndex) -> Option<f64> {
        if !self.is_allocated() {
            return None;
        }
        self.slots.get(self.slot(index, object)).copied().flatten()
    }

    /// Store the proportions of every object for one box, background at
    /// position 0.
    pub fn fill_box(&mut self, index: BoxIndex, proportions: &[f64]) {
        debug_assert_eq!(proportions.len(), self.stride);
        let start = index.0 * self.stride;
        for (slot, &p) in self.slots[start..start + self.stride]
            .iter_mut()
            .zip(proportions)
        {
            *slot = Some(p);
        }
    }

    /// Number of computed slots.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
