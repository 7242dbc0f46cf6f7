//! One stratum's box grid, characteristic storage and overlap caches.

use humus_core::{
    Aabb, BoxCoordinate, BoxIndex, CharacteristicDescriptor, CharacteristicId,
    ScoreboardInstanceId, SoilPoint, Stratum, VolumeObjectIndex,
};
use humus_grid::{BoundaryArray, BoxGrid, Dimension, Face, WrapDirection};
use tracing::{debug, info, trace, warn};

use crate::coincidence::CoincidenceCache;
use crate::config::{ConfigError, ScoreboardConfig};
use crate::error::ScoreboardError;
use crate::restriction::{RestrictionCache, TransferRestrictionData};
use crate::storage::{CharacteristicStore, CharacteristicSummary};
use crate::volumes::VolumeObjectCoordinator;

/// Per-box storage and geometry for one stratum.
///
/// A scoreboard owns its grid, one dense array per registered
/// characteristic, and two memo caches: coincident proportions and
/// transfer restrictions. Queries that need volume-object geometry take
/// the [`VolumeObjectCoordinator`] as an explicit borrow; passing `None`
/// (or a coordinator with no objects) selects the background-only fast
/// path.
///
/// # Examples
///
/// ```
/// use humus_core::{BoxIndex, CharacteristicDescriptor, Stratum, VolumeObjectIndex};
/// use humus_scoreboard::{Scoreboard, ScoreboardConfig};
///
/// let b = vec![0.0, 5.0, 10.0];
/// let config = ScoreboardConfig::new(Stratum::Soil, b.clone(), b.clone(), b);
/// let mut sb = Scoreboard::new(&config).unwrap();
///
/// let nitrate = sb
///     .register_characteristic(CharacteristicDescriptor::new("Nitrate Amount", Stratum::Soil))
///     .unwrap();
/// sb.set_characteristic_value(nitrate, 5.0, BoxIndex(3)).unwrap();
/// sb.add_characteristic_value(nitrate, 2.0, BoxIndex(3)).unwrap();
/// assert_eq!(sb.characteristic_value(nitrate, BoxIndex(3)).unwrap(), 7.0);
///
/// let p = sb
///     .coincident_proportion(BoxIndex(0), VolumeObjectIndex::BACKGROUND, None)
///     .unwrap();
/// assert_eq!(p, 1.0);
/// ```
///
/// Cloning yields a new instance with its own [`ScoreboardInstanceId`].
/// Field values and cached geometry are copied, but a coordinator bound
/// to the original does not serve the clone.
#[derive(Debug)]
pub struct Scoreboard {
    id: ScoreboardInstanceId,
    stratum: Stratum,
    grid: BoxGrid,
    store: CharacteristicStore,
    coincidence: CoincidenceCache,
    restrictions: RestrictionCache,
}

impl Clone for Scoreboard {
    fn clone(&self) -> Self {
        let id = ScoreboardInstanceId::next();
        debug!(scoreboard = %id, source = %self.id, "cloned scoreboard");
        Self {
            id,
            stratum: self.stratum,
            grid: self.grid.clone(),
            store: self.store.clone(),
            coincidence: self.coincidence.clone(),
            restrictions: self.restrictions.clone(),
        }
    }
}

impl Scoreboard {
    /// Build a scoreboard from validated configuration.
    pub fn new(config: &ScoreboardConfig) -> Result<Self, ConfigError> {
        let grid = config.build_grid()?;
        Ok(Self::from_grid(config.stratum, grid))
    }

    /// Build a scoreboard around an existing grid.
    pub fn from_grid(stratum: Stratum, grid: BoxGrid) -> Self {
        let id = ScoreboardInstanceId::next();
        info!(
            scoreboard = %id,
            stratum = %stratum,
            x = grid.num_x(),
            y = grid.num_y(),
            z = grid.num_z(),
            boxes = grid.box_count(),
            "created scoreboard"
        );
        Self {
            id,
            stratum,
            store: CharacteristicStore::new(grid.box_count()),
            grid,
            coincidence: CoincidenceCache::new(),
            restrictions: RestrictionCache::new(),
        }
    }

    /// Unique id of this instance.
    pub fn id(&self) -> ScoreboardInstanceId {
        self.id
    }

    /// Stratum this scoreboard discretises.
    pub fn stratum(&self) -> Stratum {
        self.stratum
    }

    /// The underlying grid.
    pub fn grid(&self) -> &BoxGrid {
        &self.grid
    }

    // ── Geometry ───────────────────────────────────────────────

    /// Boundary array for one dimension.
    pub fn boundary(&self, dimension: Dimension) -> &BoundaryArray {
        self.grid.boundary(dimension)
    }

    /// Number of X layers.
    pub fn num_x(&self) -> u32 {
        self.grid.num_x()
    }

    /// Number of Y layers.
    pub fn num_y(&self) -> u32 {
        self.grid.num_y()
    }

    /// Number of Z layers.
    pub fn num_z(&self) -> u32 {
        self.grid.num_z()
    }

    /// Total number of boxes.
    pub fn box_count(&self) -> usize {
        self.grid.box_count()
    }

    /// Every box index in ascending order.
    pub fn box_indices(&self) -> impl Iterator<Item = BoxIndex> {
        self.grid.box_indices()
    }

    /// Continuous extent of the whole scoreboard.
    pub fn bounds(&self) -> Aabb {
        self.grid.bounds()
    }

    /// Linear index of the 1-based box coordinate `(x, y, z)`.
    pub fn box_index(&self, x: u32, y: u32, z: u32) -> Result<BoxIndex, ScoreboardError> {
        Ok(self.grid.box_index(BoxCoordinate::new(x, y, z))?)
    }

    /// Linear index after wrapping X and Y modulo their layer counts.
    ///
    /// Z is never wrapped; an out-of-range Z is an error.
    pub fn box_index_wrapped(
        &self,
        x: i64,
        y: i64,
        z: i64,
    ) -> Result<(BoxIndex, WrapDirection), ScoreboardError> {
        Ok(self.grid.box_index_wrapped(x, y, z)?)
    }

    /// 1-based coordinate of a box.
    pub fn coordinate(&self, index: BoxIndex) -> Result<BoxCoordinate, ScoreboardError> {
        Ok(self.grid.coordinate(index)?)
    }

    /// 1-based X layer of a box.
    pub fn get_x(&self, index: BoxIndex) -> Result<u32, ScoreboardError> {
        Ok(self.grid.get_x(index)?)
    }

    /// 1-based Y layer of a box.
    pub fn get_y(&self, index: BoxIndex) -> Result<u32, ScoreboardError> {
        Ok(self.grid.get_y(index)?)
    }

    /// 1-based Z layer of a box.
    pub fn get_z(&self, index: BoxIndex) -> Result<u32, ScoreboardError> {
        Ok(self.grid.get_z(index)?)
    }

    /// Box containing a continuous point, with any periodic shift taken.
    pub fn find_box_by_soil_coordinate(
        &self,
        point: &SoilPoint,
    ) -> Result<(BoxCoordinate, WrapDirection), ScoreboardError> {
        Ok(self.grid.find_box(point)?)
    }

    /// Linear index of the box containing a continuous point.
    pub fn find_box_index_by_soil_coordinate(
        &self,
        point: &SoilPoint,
    ) -> Result<(BoxIndex, WrapDirection), ScoreboardError> {
        Ok(self.grid.find_box_index(point)?)
    }

    /// Continuous extent of one box.
    pub fn box_bounds(&self, index: BoxIndex) -> Result<Aabb, ScoreboardError> {
        Ok(self.grid.box_bounds(index)?)
    }

    /// Volume of one box.
    pub fn box_volume(&self, index: BoxIndex) -> Result<f64, ScoreboardError> {
        Ok(self.grid.box_volume(index)?)
    }

    /// The box across `face`, or `None` at a non-periodic edge.
    pub fn neighbour(
        &self,
        index: BoxIndex,
        face: Face,
    ) -> Result<Option<(BoxIndex, WrapDirection)>, ScoreboardError> {
        Ok(self.grid.neighbour(index, face)?)
    }

    // ── Characteristics ────────────────────────────────────────

    /// Register a characteristic, allocating its array filled with the
    /// descriptor default.
    pub fn register_characteristic(
        &mut self,
        descriptor: CharacteristicDescriptor,
    ) -> Result<CharacteristicId, ScoreboardError> {
        if descriptor.stratum != self.stratum {
            return Err(ScoreboardError::WrongStratum {
                name: descriptor.name,
                expected: self.stratum,
                found: descriptor.stratum,
            });
        }
        let name = descriptor.name.clone();
        let id = self.store.register(descriptor).inspect_err(|e| {
            warn!(scoreboard = %self.id, name = %name, error = %e, "rejected characteristic");
        })?;
        info!(
            scoreboard = %self.id,
            stratum = %self.stratum,
            characteristic = %id,
            name = %name,
            "registered characteristic"
        );
        Ok(id)
    }

    /// Number of registered characteristics.
    pub fn characteristic_count(&self) -> usize {
        self.store.len()
    }

    /// Id of the characteristic registered under `name`.
    pub fn find_characteristic(&self, name: &str) -> Option<CharacteristicId> {
        self.store.find(name)
    }

    /// Descriptor of a registered characteristic.
    pub fn descriptor(&self, id: CharacteristicId) -> Result<&CharacteristicDescriptor, ScoreboardError> {
        self.store.descriptor(id)
    }

    /// All registered descriptors in registration order.
    pub fn descriptors(&self) -> &[CharacteristicDescriptor] {
        self.store.descriptors()
    }

    /// Value of a characteristic in one box.
    pub fn characteristic_value(
        &self,
        id: CharacteristicId,
        index: BoxIndex,
    ) -> Result<f64, ScoreboardError> {
        self.store.get(id, index)
    }

    /// Overwrite a characteristic in one box.
    pub fn set_characteristic_value(
        &mut self,
        id: CharacteristicId,
        value: f64,
        index: BoxIndex,
    ) -> Result<(), ScoreboardError> {
        self.store.set(id, index, value)
    }

    /// Add to a characteristic in one box, returning the new value.
    pub fn add_characteristic_value(
        &mut self,
        id: CharacteristicId,
        delta: f64,
        index: BoxIndex,
    ) -> Result<f64, ScoreboardError> {
        self.store.add(id, index, delta)
    }

    /// Every box of a characteristic, indexed by `BoxIndex`.
    pub fn characteristic_values(&self, id: CharacteristicId) -> Result<&[f64], ScoreboardError> {
        self.store.values(id)
    }

    /// Mutable access to every box of a characteristic.
    pub fn characteristic_values_mut(
        &mut self,
        id: CharacteristicId,
    ) -> Result<&mut [f64], ScoreboardError> {
        self.store.values_mut(id)
    }

    /// Overwrite every box of a characteristic.
    pub fn fill_characteristic(
        &mut self,
        id: CharacteristicId,
        value: f64,
    ) -> Result<(), ScoreboardError> {
        self.store.fill(id, value)
    }

    /// Overwrite every box in the inclusive coordinate block `from..=to`.
    pub fn fill_characteristic_range(
        &mut self,
        id: CharacteristicId,
        value: f64,
        from: BoxCoordinate,
        to: BoxCoordinate,
    ) -> Result<(), ScoreboardError> {
        if from.x > to.x || from.y > to.y || from.z > to.z {
            return Err(ScoreboardError::InvertedRange { from, to });
        }
        self.grid.box_index(from)?;
        self.grid.box_index(to)?;
        let nx = self.grid.num_x() as usize;
        let row = (to.x - from.x + 1) as usize;
        let values = self.store.values_mut(id)?;
        for z in from.z..=to.z {
            for y in from.y..=to.y {
                let start = (from.x - 1) as usize
                    + nx * (y - 1) as usize
                    + nx * self.grid.num_y() as usize * (z - 1) as usize;
                values[start..start + row].fill(value);
            }
        }
        Ok(())
    }

    /// Restore a characteristic to its descriptor default everywhere.
    pub fn reset_characteristic(&mut self, id: CharacteristicId) -> Result<(), ScoreboardError> {
        self.store.reset(id)
    }

    /// Minimum, maximum, sum and mean of a characteristic.
    pub fn characteristic_summary(
        &self,
        id: CharacteristicId,
    ) -> Result<CharacteristicSummary, ScoreboardError> {
        self.store.summary(id)
    }

    /// Attribute a path segment's `length` to the box it starts in.
    ///
    /// Without `density` the stored amount is `length` itself.
    ///
    /// With `density` set, the stored amount is a length density of the
    /// start sub-box, not of the whole box:
    ///
    /// ```text
    /// amount = length / (box_volume * coincident_proportion(start_box, start_object))
    /// ```
    ///
    /// Without volume objects the proportion is `1` and this is the
    /// whole-box density. Once objects share the box the divisor shrinks
    /// to the part of the box `start_object` occupies (the background
    /// included), so the amount is larger than `length / box_volume`.
    /// An empty sub-box falls back to the whole box volume.
    ///
    /// Returns the box containing `end_point`, so callers can detect a
    /// box transition.
    #[allow(clippy::too_many_arguments)]
    pub fn add_characteristic_length(
        &mut self,
        id: CharacteristicId,
        length: f64,
        start_point: &SoilPoint,
        start_box: BoxIndex,
        start_object: VolumeObjectIndex,
        end_point: &SoilPoint,
        density: bool,
        volumes: Option<&VolumeObjectCoordinator>,
    ) -> Result<BoxIndex, ScoreboardError> {
        self.store.descriptor(id)?;
        self.grid.check_index(start_box)?;
        let (end_box, _) = self.grid.find_box_index(end_point)?;
        let amount = if density {
            let box_volume = self.grid.box_volume(start_box)?;
            let proportion = self.coincident_proportion(start_box, start_object, volumes)?;
            let sub_volume = box_volume * proportion;
            if sub_volume > 0.0 {
                length / sub_volume
            } else {
                warn!(
                    scoreboard = %self.id,
                    start = %start_point,
                    box_index = %start_box,
                    object = %start_object,
                    "segment starts in an empty sub-box; using whole box volume"
                );
                length / box_volume
            }
        } else {
            length
        };
        trace!(
            characteristic = %id,
            start = %start_point,
            end = %end_point,
            from_box = %start_box,
            to_box = %end_box,
            amount,
            "added characteristic length"
        );
        self.store.add(id, start_box, amount)?;
        Ok(end_box)
    }

    // ── Cached geometry ────────────────────────────────────────

    /// Fraction of a box's volume attributed to one volume object, or to
    /// the background for [`VolumeObjectIndex::BACKGROUND`].
    ///
    /// Nested objects claim their volume exclusively: an outer object's
    /// proportion excludes what its children occupy. Without volume
    /// objects the background proportion is `1` and no cache is
    /// allocated. Otherwise the first query for a box computes and
    /// stores every object's proportion for that box. The cache belongs
    /// to the first coordinator that fills it; queries passing another
    /// coordinator fail with [`ScoreboardError::ForeignVolumeObjects`].
    pub fn coincident_proportion(
        &mut self,
        index: BoxIndex,
        object: VolumeObjectIndex,
        volumes: Option<&VolumeObjectCoordinator>,
    ) -> Result<f64, ScoreboardError> {
        self.grid.check_index(index)?;
        let count = volumes.map_or(0, VolumeObjectCoordinator::len);
        if object.0 as usize > count {
            return Err(ScoreboardError::UnknownVolumeObject {
                index: object,
                count,
            });
        }
        let volumes = match volumes {
            Some(v) if !v.is_empty() => v,
            _ => return Ok(1.0),
        };
        self.coincidence
            .ensure(self.grid.box_count(), volumes.id(), count)?;
        if let Some(p) = self.coincidence.get(index, object) {
            return Ok(p);
        }
        let cell = self.grid.box_bounds(index)?;
        let proportions = volumes.exclusive_proportions(&cell);
        trace!(scoreboard = %self.id, box_index = %index, ?proportions, "computed coincidence");
        self.coincidence.fill_box(index, &proportions);
        Ok(proportions[object.0 as usize])
    }

    /// Whether quantities may cross `face` from box `from` into `to`.
    ///
    /// Without volume objects every crossing is unrestricted and no
    /// cache is touched. Otherwise `to` must be the `face` neighbour of
    /// `from` (periodic crossings included) and the coordinator must be
    /// bound to this scoreboard. The result is cached; when every
    /// contributing surface has direction-independent permeability the
    /// reverse crossing is cached in the same step.
    pub fn transfer_restriction(
        &mut self,
        from: BoxIndex,
        to: BoxIndex,
        face: Face,
        volumes: Option<&VolumeObjectCoordinator>,
    ) -> Result<TransferRestrictionData, ScoreboardError> {
        self.grid.check_index(from)?;
        self.grid.check_index(to)?;
        let volumes = match volumes {
            Some(v) if !v.is_empty() => v,
            _ => return Ok(TransferRestrictionData::Unrestricted),
        };
        match self.grid.neighbour(from, face)? {
            Some((nb, _)) if nb == to => {}
            _ => return Err(ScoreboardError::NotAdjacent { from, to, face }),
        }
        if volumes.bound_scoreboard() != Some(self.id) {
            return Err(ScoreboardError::Unbound {
                scoreboard: self.id,
            });
        }
        if let Some(data) = self.restrictions.get(from, to, face) {
            return Ok(data);
        }
        let (data, symmetric) = volumes.restriction_between(from, to, face);
        self.restrictions.insert(from, to, face, data);
        if symmetric {
            self.restrictions.insert_reverse(from, to, face, data);
        }
        debug!(
            scoreboard = %self.id,
            from = %from,
            to = %to,
            face = %face,
            ?data,
            symmetric,
            "computed transfer restriction"
        );
        Ok(data)
    }

    /// Number of computed coincidence slots.
    pub fn cached_coincidence_count(&self) -> usize {
        self.coincidence.filled()
    }

    /// Number of cached transfer restrictions.
    pub fn cached_restriction_count(&self) -> usize {
        self.restrictions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use humus_grid::{GridError, WrapConfig};

    fn two_cubed() -> Scoreboard {
        let b = vec![0.0, 5.0, 10.0];
        Scoreboard::new(&ScoreboardConfig::new(Stratum::Soil, b.clone(), b.clone(), b)).unwrap()
    }

    fn nitrate(sb: &mut Scoreboard) -> CharacteristicId {
        sb.register_characteristic(CharacteristicDescriptor::new("Nitrate Amount", Stratum::Soil))
            .unwrap()
    }

    // ── Indexing ────────────────────────────────────────────────

    #[test]
    fn corner_indices() {
        let sb = two_cubed();
        assert_eq!(sb.box_index(1, 1, 1).unwrap(), BoxIndex(0));
        assert_eq!(sb.box_index(2, 2, 2).unwrap(), BoxIndex(7));
        assert_eq!(sb.get_x(BoxIndex(5)).unwrap(), 2);
        assert_eq!(sb.get_y(BoxIndex(5)).unwrap(), 1);
        assert_eq!(sb.get_z(BoxIndex(5)).unwrap(), 2);
    }

    #[test]
    fn layer_zero_is_out_of_range() {
        assert!(matches!(
            two_cubed().box_index(0, 1, 1),
            Err(ScoreboardError::Grid(GridError::CoordinateOutOfRange { .. }))
        ));
    }

    #[test]
    fn point_resolves_to_box() {
        let sb = two_cubed();
        let (coord, wrap) = sb
            .find_box_by_soil_coordinate(&SoilPoint::new(7.0, 7.0, 7.0))
            .unwrap();
        assert_eq!(coord, BoxCoordinate::new(2, 2, 2));
        assert!(wrap.is_none());
    }

    #[test]
    fn wrapped_index_reports_direction() {
        let b = vec![0.0, 5.0, 10.0];
        let sb = Scoreboard::new(
            &ScoreboardConfig::new(Stratum::Soil, b.clone(), b.clone(), b).with_wrap(WrapConfig::XY),
        )
        .unwrap();
        let (index, wrap) = sb.box_index_wrapped(3, 0, 1).unwrap();
        assert_eq!(index, sb.box_index(1, 2, 1).unwrap());
        assert!(wrap.contains(WrapDirection::X));
        assert!(wrap.contains(WrapDirection::Y));
    }

    // ── Characteristics ─────────────────────────────────────────

    #[test]
    fn nitrate_lifecycle() {
        let mut sb = two_cubed();
        let id = nitrate(&mut sb);
        assert!(sb.characteristic_values(id).unwrap().iter().all(|&v| v == 0.0));
        sb.set_characteristic_value(id, 5.0, BoxIndex(3)).unwrap();
        assert_eq!(sb.add_characteristic_value(id, 2.0, BoxIndex(3)).unwrap(), 7.0);
        for index in sb.box_indices() {
            let expected = if index == BoxIndex(3) { 7.0 } else { 0.0 };
            assert_eq!(sb.characteristic_value(id, index).unwrap(), expected);
        }
        sb.fill_characteristic(id, 1.0).unwrap();
        assert_eq!(sb.characteristic_values(id).unwrap(), &[1.0; 8]);
    }

    #[test]
    fn wrong_stratum_rejected() {
        let mut sb = two_cubed();
        let err = sb
            .register_characteristic(CharacteristicDescriptor::new("Leaf Area", Stratum::Air))
            .unwrap_err();
        assert!(matches!(err, ScoreboardError::WrongStratum { .. }));
        assert_eq!(sb.characteristic_count(), 0);
    }

    #[test]
    fn range_fill_touches_only_the_block() {
        let mut sb = two_cubed();
        let id = nitrate(&mut sb);
        sb.fill_characteristic_range(id, 4.0, BoxCoordinate::new(2, 1, 1), BoxCoordinate::new(2, 2, 2))
            .unwrap();
        let filled: Vec<usize> = sb
            .box_indices()
            .filter(|&i| sb.characteristic_value(id, i).unwrap() == 4.0)
            .map(|i| i.0)
            .collect();
        assert_eq!(filled, vec![1, 3, 5, 7]);
    }

    #[test]
    fn range_fill_rejects_inverted_and_outside_blocks() {
        let mut sb = two_cubed();
        let id = nitrate(&mut sb);
        assert!(matches!(
            sb.fill_characteristic_range(id, 1.0, BoxCoordinate::new(2, 1, 1), BoxCoordinate::new(1, 1, 1)),
            Err(ScoreboardError::InvertedRange { .. })
        ));
        assert!(sb
            .fill_characteristic_range(id, 1.0, BoxCoordinate::new(1, 1, 1), BoxCoordinate::new(3, 1, 1))
            .is_err());
    }

    #[test]
    fn characteristic_length_goes_to_start_box() {
        let mut sb = two_cubed();
        let id = nitrate(&mut sb);
        let start = SoilPoint::new(4.0, 1.0, 1.0);
        let end = SoilPoint::new(6.0, 1.0, 1.0);
        let next = sb
            .add_characteristic_length(id, 2.0, &start, BoxIndex(0), VolumeObjectIndex::BACKGROUND, &end, false, None)
            .unwrap();
        assert_eq!(next, BoxIndex(1));
        assert_eq!(sb.characteristic_value(id, BoxIndex(0)).unwrap(), 2.0);
        assert_eq!(sb.characteristic_value(id, BoxIndex(1)).unwrap(), 0.0);
    }

    #[test]
    fn characteristic_length_density_divides_by_box_volume() {
        let mut sb = two_cubed();
        let id = nitrate(&mut sb);
        let p = SoilPoint::new(1.0, 1.0, 1.0);
        sb.add_characteristic_length(id, 250.0, &p, BoxIndex(0), VolumeObjectIndex::BACKGROUND, &p, true, None)
            .unwrap();
        assert_eq!(sb.characteristic_value(id, BoxIndex(0)).unwrap(), 2.0);
    }

    // ── Caches without objects ──────────────────────────────────

    #[test]
    fn background_fast_path_allocates_nothing() {
        let mut sb = two_cubed();
        for index in sb.box_indices().collect::<Vec<_>>() {
            assert_eq!(
                sb.coincident_proportion(index, VolumeObjectIndex::BACKGROUND, None)
                    .unwrap(),
                1.0
            );
        }
        assert_eq!(sb.cached_coincidence_count(), 0);
        assert!(matches!(
            sb.coincident_proportion(BoxIndex(0), VolumeObjectIndex(1), None),
            Err(ScoreboardError::UnknownVolumeObject { count: 0, .. })
        ));
    }

    #[test]
    fn restriction_fast_path_is_unrestricted() {
        let mut sb = two_cubed();
        let data = sb
            .transfer_restriction(BoxIndex(0), BoxIndex(1), Face::PosX, None)
            .unwrap();
        assert!(data.is_unrestricted());
        assert_eq!(sb.cached_restriction_count(), 0);
        assert!(sb
            .transfer_restriction(BoxIndex(0), BoxIndex(8), Face::PosX, None)
            .is_err());
    }

    // ── Identity ────────────────────────────────────────────────

    #[test]
    fn clone_is_a_new_instance() {
        let mut sb = two_cubed();
        let id = nitrate(&mut sb);
        sb.set_characteristic_value(id, 3.0, BoxIndex(5)).unwrap();
        let copy = sb.clone();
        assert_ne!(copy.id(), sb.id());
        assert_eq!(copy.characteristic_value(id, BoxIndex(5)).unwrap(), 3.0);
        assert_eq!(copy.box_count(), sb.box_count());
    }
}
