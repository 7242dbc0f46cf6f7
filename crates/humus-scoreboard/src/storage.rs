//! Dense per-box storage for registered characteristics.
//!
//! [`CharacteristicStore`] keeps one `Vec<f64>` of length `box_count`
//! per characteristic, indexed by `CharacteristicId`, plus a name table
//! for lookup by name. Arrays are allocated and default-filled at
//! registration and never freed during a run.

use humus_core::{BoxIndex, CharacteristicDescriptor, CharacteristicId};
use humus_grid::GridError;
use indexmap::IndexMap;

use crate::error::ScoreboardError;

/// Aggregate statistics over every box of one characteristic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacteristicSummary {
    /// Smallest value.
    pub minimum: f64,
    /// Largest value.
    pub maximum: f64,
    /// Sum over all boxes.
    pub sum: f64,
    /// Arithmetic mean over all boxes.
    pub mean: f64,
}

/// Registered descriptors and their dense value arrays.
#[derive(Clone, Debug)]
pub struct CharacteristicStore {
    box_count: usize,
    descriptors: Vec<CharacteristicDescriptor>,
    values: Vec<Vec<f64>>,
    /// Maps name to id. Ids are dense, so `by_name[i]` is id `i`.
    by_name: IndexMap<String, CharacteristicId>,
}

impl CharacteristicStore {
    /// An empty store for a grid of `box_count` boxes.
    pub fn new(box_count: usize) -> Self {
        Self {
            box_count,
            descriptors: Vec::new(),
            values: Vec::new(),
            by_name: IndexMap::new(),
        }
    }

    /// Validate `descriptor`, allocate its array filled with the
    /// default, and assign the next id.
    ///
    /// The assigned id is also written to `descriptor.index` in the
    /// stored copy.
    pub fn register(
        &mut self,
        mut descriptor: CharacteristicDescriptor,
    ) -> Result<CharacteristicId, ScoreboardError> {
        descriptor.validate()?;
        if self.by_name.contains_key(&descriptor.name) {
            return Err(ScoreboardError::DuplicateCharacteristic {
                name: descriptor.name,
            });
        }
        let id = CharacteristicId(self.descriptors.len() as u32);
        descriptor.index = Some(id);
        self.values.push(vec![descriptor.default; self.box_count]);
        self.by_name.insert(descriptor.name.clone(), id);
        self.descriptors.push(descriptor);
        Ok(id)
    }

    /// Number of registered characteristics.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Number of boxes each array holds.
    pub fn box_count(&self) -> usize {
        self.box_count
    }

    /// Id registered under `name`.
    pub fn find(&self, name: &str) -> Option<CharacteristicId> {
        self.by_name.get(name).copied()
    }

    /// All descriptors in registration order.
    pub fn descriptors(&self) -> &[CharacteristicDescriptor] {
        &self.descriptors
    }

    /// Descriptor for a registered id.
    pub fn descriptor(&self, id: CharacteristicId) -> Result<&CharacteristicDescriptor, ScoreboardError> {
        self.descriptors
            .get(id.0 as usize)
            .ok_or(ScoreboardError::UnknownCharacteristic { id })
    }

    /// Whole-field read access.
    pub fn values(&self, id: CharacteristicId) -> Result<&[f64], ScoreboardError> {
        self.values
            .get(id.0 as usize)
            .map(Vec::as_slice)
            .ok_or(ScoreboardError::UnknownCharacteristic { id })
    }

    /// Whole-field write access.
    pub fn values_mut(&mut self, id: CharacteristicId) -> Result<&mut [f64], ScoreboardError> {
        self.values
            .get_mut(id.0 as usize)
            .map(Vec::as_mut_slice)
            .ok_or(ScoreboardError::UnknownCharacteristic { id })
    }

    fn check_box(&self, index: BoxIndex) -> Result<usize, ScoreboardError> {
        if index.0 >= self.box_count {
            return Err(GridError::BoxOutOfRange {
                index,
                count: self.box_count,
            }
            .into());
        }
        Ok(index.0)
    }

    /// Value of `id` in one box.
    pub fn get(&self, id: CharacteristicId, index: BoxIndex) -> Result<f64, ScoreboardError> {
        let i = self.check_box(index)?;
        Ok(self.values(id)?[i])
    }

    /// Overwrite the value of `id` in one box.
    pub fn set(
        &mut self,
        id: CharacteristicId,
        index: BoxIndex,
        value: f64,
    ) -> Result<(), ScoreboardError> {
        let i = self.check_box(index)?;
        self.values_mut(id)?[i] = value;
        Ok(())
    }

    /// Add `delta` to the value of `id` in one box, returning the new value.
    pub fn add(
        &mut self,
        id: CharacteristicId,
        index: BoxIndex,
        delta: f64,
    ) -> Result<f64, ScoreboardError> {
        let i = self.check_box(index)?;
        let slot = &mut self.values_mut(id)?[i];
        *slot += delta;
        Ok(*slot)
    }

    /// Overwrite every box of `id`.
    pub fn fill(&mut self, id: CharacteristicId, value: f64) -> Result<(), ScoreboardError> {
        self.values_mut(id)?.fill(value);
        Ok(())
    }

    /// Restore every box of `id` to its descriptor default.
    pub fn reset(&mut self, id: CharacteristicId) -> Result<(), ScoreboardError> {
        let default = self.descriptor(id)?.default;
        self.fill(id, default)
    }

    /// Minimum, maximum, sum and mean of `id` over all boxes.
    pub fn summary(&self, id: CharacteristicId) -> Result<CharacteristicSummary, ScoreboardError> {
        let values = self.values(id)?;
        let (minimum, maximum, sum) = values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(lo, hi, sum), &v| (lo.min(v), hi.max(v), sum + v),
        );
        Ok(CharacteristicSummary {
            minimum,
            maximum,
            sum,
            mean: sum / values.len().max(1) as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use humus_core::{DescriptorError, Stratum};

    fn nitrate() -> CharacteristicDescriptor {
        CharacteristicDescriptor::new("Nitrate Amount", Stratum::Soil)
    }

    #[test]
    fn register_assigns_dense_ids_and_fills_default() {
        let mut store = CharacteristicStore::new(4);
        let a = store.register(nitrate()).unwrap();
        let b = store
            .register(CharacteristicDescriptor::new("Water", Stratum::Soil).with_default(0.3))
            .unwrap();
        assert_eq!(a, CharacteristicId(0));
        assert_eq!(b, CharacteristicId(1));
        assert_eq!(store.values(b).unwrap(), &[0.3; 4]);
        assert_eq!(store.descriptor(b).unwrap().index, Some(b));
        assert_eq!(store.find("Water"), Some(b));
        assert_eq!(store.find("Phosphate"), None);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut store = CharacteristicStore::new(4);
        store.register(nitrate()).unwrap();
        assert!(matches!(
            store.register(nitrate()),
            Err(ScoreboardError::DuplicateCharacteristic { .. })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn invalid_descriptor_rejected() {
        let mut store = CharacteristicStore::new(4);
        let bad = nitrate().with_range(0.0, 1.0).with_default(2.0);
        assert!(matches!(
            store.register(bad),
            Err(ScoreboardError::InvalidDescriptor(
                DescriptorError::DefaultOutOfRange { .. }
            ))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn get_set_add() {
        let mut store = CharacteristicStore::new(4);
        let id = store.register(nitrate()).unwrap();
        store.set(id, BoxIndex(2), 5.0).unwrap();
        assert_eq!(store.add(id, BoxIndex(2), 2.0).unwrap(), 7.0);
        assert_eq!(store.get(id, BoxIndex(2)).unwrap(), 7.0);
        assert_eq!(store.get(id, BoxIndex(1)).unwrap(), 0.0);
    }

    #[test]
    fn out_of_range_box_and_unknown_id_fail() {
        let mut store = CharacteristicStore::new(4);
        let id = store.register(nitrate()).unwrap();
        assert!(matches!(
            store.get(id, BoxIndex(4)),
            Err(ScoreboardError::Grid(GridError::BoxOutOfRange { count: 4, .. }))
        ));
        assert_eq!(
            store.set(CharacteristicId(7), BoxIndex(0), 1.0),
            Err(ScoreboardError::UnknownCharacteristic {
                id: CharacteristicId(7)
            })
        );
    }

    #[test]
    fn fill_reset_and_summary() {
        let mut store = CharacteristicStore::new(4);
        let id = store.register(nitrate().with_default(1.0)).unwrap();
        store.fill(id, 3.0).unwrap();
        store.set(id, BoxIndex(0), -1.0).unwrap();
        let s = store.summary(id).unwrap();
        assert_eq!(s.minimum, -1.0);
        assert_eq!(s.maximum, 3.0);
        assert_eq!(s.sum, 8.0);
        assert_eq!(s.mean, 2.0);
        store.reset(id).unwrap();
        assert_eq!(store.values(id).unwrap(), &[1.0; 4]);
    }
}
