//! Ownership of volume objects and their per-box subsections.

use humus_core::{
    Aabb, BoxIndex, CoordinatorInstanceId, ScoreboardInstanceId, SoilPoint, VolumeObjectIndex,
};
use humus_grid::Face;
use humus_volume::{
    ContainmentGraph, FaceRestriction, FaceRestrictions, SamplingConfig, SegmentIntersection,
    Subsection, VolumeObject,
};
use smallvec::{smallvec, SmallVec};
use tracing::{debug, info, warn};

use crate::error::VolumeError;
use crate::restriction::TransferRestrictionData;
use crate::scoreboard::Scoreboard;

/// Raw proportions of top-level objects may exceed 1 by this much
/// through sampling error before a box counts as overfull.
const PROPORTION_TOLERANCE: f64 = 1e-9;

/// Subsections of one box: background first, then each intersecting
/// object in index order.
pub type BoxSubsections = SmallVec<[Subsection; 3]>;

/// Owns every volume object and, once bound to a scoreboard, the list
/// of subsections each of its boxes is divided into.
///
/// Objects are registered before binding with indices `1, 2, 3, ...`.
/// [`use_scoreboard`](Self::use_scoreboard) then runs once: a second
/// scoreboard is refused because subsections are stored per box and
/// are not qualified by stratum.
///
/// Objects may nest inside one another but must not otherwise share
/// volume; registration refuses a partial overlap.
#[derive(Debug)]
pub struct VolumeObjectCoordinator {
    id: CoordinatorInstanceId,
    objects: Vec<Box<dyn VolumeObject>>,
    containment: ContainmentGraph,
    sampling: SamplingConfig,
    bound: Option<ScoreboardInstanceId>,
    subsections: Vec<BoxSubsections>,
}

impl Default for VolumeObjectCoordinator {
    fn default() -> Self {
        Self {
            id: CoordinatorInstanceId::next(),
            objects: Vec::new(),
            containment: ContainmentGraph::default(),
            sampling: SamplingConfig::default(),
            bound: None,
            subsections: Vec::new(),
        }
    }
}

impl VolumeObjectCoordinator {
    /// An empty coordinator with default sampling.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty coordinator with custom sampling resolution.
    pub fn with_sampling(sampling: SamplingConfig) -> Result<Self, VolumeError> {
        if !sampling.is_valid() {
            return Err(VolumeError::InvalidSampling);
        }
        Ok(Self {
            sampling,
            ..Self::default()
        })
    }

    /// Unique id of this instance.
    pub fn id(&self) -> CoordinatorInstanceId {
        self.id
    }

    /// Sampling resolution passed to object geometry.
    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    /// Take ownership of an object.
    ///
    /// Its index must be the next in sequence, starting at 1, and it
    /// must either nest with or stay clear of every registered object.
    /// Registration closes once the coordinator is bound.
    pub fn register_volume_object(
        &mut self,
        object: Box<dyn VolumeObject>,
    ) -> Result<VolumeObjectIndex, VolumeError> {
        if self.bound.is_some() {
            return Err(VolumeError::RegistrationClosed);
        }
        let index = object.index();
        if index.is_background() {
            return Err(VolumeError::ReservedIndex);
        }
        let expected = VolumeObjectIndex(self.objects.len() as u32 + 1);
        if index != expected {
            return Err(VolumeError::NonSequential {
                expected,
                found: index,
            });
        }
        if let Some(other) =
            ContainmentGraph::first_overlap(&self.objects, object.as_ref(), &self.sampling)
        {
            warn!(object = %index, other = %other, "volume objects overlap without nesting");
            return Err(VolumeError::OverlappingObjects { index, other });
        }
        self.objects.push(object);
        self.containment = ContainmentGraph::build(&self.objects);
        info!(
            object = %index,
            parent = ?self.containment.parent_of(index),
            "registered volume object"
        );
        Ok(index)
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if no objects are registered.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The object with `index`; `None` for the background or an unknown
    /// index.
    pub fn get(&self, index: VolumeObjectIndex) -> Option<&dyn VolumeObject> {
        let slot = (index.0 as usize).checked_sub(1)?;
        self.objects.get(slot).map(|o| o.as_ref())
    }

    /// Every object in index order.
    pub fn objects(&self) -> impl Iterator<Item = &dyn VolumeObject> {
        self.objects.iter().map(|o| o.as_ref())
    }

    /// Nesting relation between the registered objects.
    pub fn containment(&self) -> &ContainmentGraph {
        &self.containment
    }

    /// The object directly enclosing `index`, if any.
    pub fn parent_of(&self, index: VolumeObjectIndex) -> Option<VolumeObjectIndex> {
        self.containment.parent_of(index)
    }

    /// The scoreboard this coordinator is bound to.
    pub fn bound_scoreboard(&self) -> Option<ScoreboardInstanceId> {
        self.bound
    }

    /// Build the subsections of every box of `scoreboard` and bind to it.
    ///
    /// Binding the same scoreboard again is a no-op. Any other
    /// scoreboard is refused with
    /// [`VolumeError::UnsupportedConfiguration`]. Fails with
    /// [`VolumeError::ProportionOverflow`] if the objects in some box
    /// together claim more than its volume.
    pub fn use_scoreboard(&mut self, scoreboard: &mut Scoreboard) -> Result<(), VolumeError> {
        let requested = scoreboard.id();
        if let Some(bound) = self.bound {
            if bound == requested {
                debug!(scoreboard = %requested, "volume objects already bound");
                return Ok(());
            }
            warn!(bound = %bound, requested = %requested, "refused second scoreboard");
            return Err(VolumeError::UnsupportedConfiguration { bound, requested });
        }

        let this = &*self;
        let mut per_box = Vec::with_capacity(scoreboard.box_count());
        let mut intersected = 0usize;
        for index in (0..scoreboard.box_count()).map(BoxIndex) {
            let cell = scoreboard.box_bounds(index)?;
            let claimed = this.claimed_proportion(&cell);
            if claimed > 1.0 + PROPORTION_TOLERANCE {
                warn!(box_index = %index, claimed, "volume objects overfill box");
                return Err(VolumeError::ProportionOverflow {
                    index,
                    total: claimed,
                });
            }
            let mut subs = BoxSubsections::new();
            let mut background = Subsection::background();
            background.coincident_proportion =
                scoreboard.coincident_proportion(index, VolumeObjectIndex::BACKGROUND, Some(this))?;
            subs.push(background);
            for object in this.objects() {
                let vo = object.index();
                let proportion = scoreboard.coincident_proportion(index, vo, Some(this))?;
                if proportion <= 0.0 {
                    continue;
                }
                let mut restrictions = FaceRestrictions::none();
                for face in Face::ALL {
                    restrictions.set(
                        face,
                        FaceRestriction {
                            blocked_fraction: object.face_blocked_fraction(&cell, face, &this.sampling),
                            permeability: object.surface_permeability(face),
                        },
                    );
                }
                subs.push(Subsection {
                    volume_object: vo,
                    coincident_proportion: proportion,
                    restrictions,
                });
            }
            if subs.len() > 1 {
                intersected += 1;
            }
            per_box.push(subs);
        }

        self.subsections = per_box;
        self.bound = Some(requested);
        info!(
            scoreboard = %requested,
            coordinator = %self.id,
            objects = self.objects.len(),
            boxes = self.subsections.len(),
            intersected,
            "bound volume objects to scoreboard"
        );
        Ok(())
    }

    /// Subsections of one box of the bound scoreboard.
    ///
    /// `None` before binding or for an index outside the grid.
    pub fn subsections(&self, index: BoxIndex) -> Option<&[Subsection]> {
        self.subsections.get(index.0).map(|s| s.as_slice())
    }

    /// The innermost object containing `point`, or `None` for the
    /// background.
    ///
    /// The most deeply nested candidate wins. A point on the surface
    /// shared by two touching objects belongs to the lower index.
    pub fn containing_volume_object(&self, point: &SoilPoint) -> Option<&dyn VolumeObject> {
        self.objects
            .iter()
            .filter(|o| o.contains(point))
            .map(|o| o.as_ref())
            .rev()
            .max_by_key(|o| self.containment.depth(o.index()))
    }

    /// Index of the innermost object containing `point`;
    /// [`VolumeObjectIndex::BACKGROUND`] if none does.
    pub fn containing_volume_object_index(&self, point: &SoilPoint) -> VolumeObjectIndex {
        self.containing_volume_object(point)
            .map_or(VolumeObjectIndex::BACKGROUND, |o| o.index())
    }

    /// Earliest crossing of the segment `from -> to` with any object.
    pub fn first_intersection(
        &self,
        from: &SoilPoint,
        to: &SoilPoint,
    ) -> Option<(VolumeObjectIndex, SegmentIntersection)> {
        self.objects
            .iter()
            .filter_map(|o| o.intersect_segment(from, to).map(|hit| (o.index(), hit)))
            .min_by(|a, b| a.1.parameter.total_cmp(&b.1.parameter))
    }

    /// Where the segment `from -> to` ends after deflecting off the
    /// first surface it meets. Returns `to` if nothing is hit.
    pub fn deflect_segment(&self, from: &SoilPoint, to: &SoilPoint) -> SoilPoint {
        match self.first_intersection(from, to) {
            Some((index, hit)) => match self.get(index) {
                Some(object) => object.deflect(from, to, &hit),
                None => *to,
            },
            None => *to,
        }
    }

    fn raw_proportions(&self, cell: &Aabb) -> SmallVec<[f64; 4]> {
        self.objects
            .iter()
            .map(|o| o.coincident_proportion(cell, &self.sampling))
            .collect()
    }

    /// Sum of the raw proportions of top-level objects in `cell`.
    pub fn claimed_proportion(&self, cell: &Aabb) -> f64 {
        self.raw_proportions(cell)
            .iter()
            .enumerate()
            .filter(|&(i, _)| self.containment.parent_of(VolumeObjectIndex(i as u32 + 1)).is_none())
            .map(|(_, p)| p)
            .sum()
    }

    /// Proportion of `cell` attributed to the background (position 0)
    /// and to each object (position `index`).
    ///
    /// Each object claims what it covers minus what its direct children
    /// cover, so the entries sum to 1 for well-nested geometry.
    pub fn exclusive_proportions(&self, cell: &Aabb) -> SmallVec<[f64; 4]> {
        let raw = self.raw_proportions(cell);
        let mut out: SmallVec<[f64; 4]> = smallvec![0.0; raw.len() + 1];
        let mut top_level = 0.0;
        for (slot, &p) in raw.iter().enumerate() {
            let index = VolumeObjectIndex(slot as u32 + 1);
            let children: f64 = self
                .containment
                .children_of(index)
                .map(|c| raw[c.0 as usize - 1])
                .sum();
            out[slot + 1] = (p - children).clamp(0.0, 1.0);
            if self.containment.parent_of(index).is_none() {
                top_level += p;
            }
        }
        out[0] = (1.0 - top_level).clamp(0.0, 1.0);
        out
    }

    /// Combine the face records of both boxes into one restriction.
    ///
    /// `from`'s records on `face` and `to`'s records on the reverse face
    /// describe the same surfaces; per object the larger blocked
    /// fraction wins. The flag reports whether every contributing
    /// surface is direction-independent.
    pub(crate) fn restriction_between(
        &self,
        from: BoxIndex,
        to: BoxIndex,
        face: Face,
    ) -> (TransferRestrictionData, bool) {
        let mut merged: SmallVec<[(VolumeObjectIndex, f64, Option<f64>); 4]> = SmallVec::new();
        let records = |index: BoxIndex, side: Face| {
            self.subsections(index)
                .unwrap_or_default()
                .iter()
                .filter(|s| !s.volume_object.is_background())
                .filter_map(move |s| s.restrictions.get(side).map(|r| (s.volume_object, *r)))
        };
        for (vo, r) in records(from, face) {
            merged.push((vo, r.blocked_fraction, r.permeability));
        }
        for (vo, r) in records(to, face.reverse()) {
            match merged.iter_mut().find(|(v, _, _)| *v == vo) {
                Some(entry) => entry.1 = entry.1.max(r.blocked_fraction),
                None => {
                    let permeability = self.get(vo).and_then(|o| o.surface_permeability(face));
                    merged.push((vo, r.blocked_fraction, permeability));
                }
            }
        }
        let contributions: SmallVec<[(f64, f64); 4]> = merged
            .iter()
            .map(|&(_, blocked, p)| (blocked, p.unwrap_or(0.0)))
            .collect();
        let symmetric = merged
            .iter()
            .all(|&(vo, _, _)| self.get(vo).is_some_and(|o| o.is_permeability_symmetric()));
        (
            TransferRestrictionData::from_contributions(&contributions),
            symmetric,
        )
    }
}
