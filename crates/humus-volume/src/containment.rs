//! Nesting relationships between registered volume objects.
//!
//! Objects may sit inside one another (a stone inside a pot). Each
//! object has at most one parent: the innermost object it is nested
//! within. Coincident volume is attributed to the innermost object, so
//! the graph decides how a box's volume is shared between nested
//! bodies.

use crate::sampling::SamplingConfig;
use crate::volume::VolumeObject;
use humus_core::{SoilPoint, VolumeObjectIndex};
use smallvec::SmallVec;

/// Parent links between volume objects, stored by slot (`index - 1`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainmentGraph {
    parent: Vec<Option<usize>>,
}

fn slot(index: VolumeObjectIndex) -> Option<usize> {
    (index.0 as usize).checked_sub(1)
}

fn index_of(slot: usize) -> VolumeObjectIndex {
    VolumeObjectIndex(slot as u32 + 1)
}

impl ContainmentGraph {
    /// A graph of `len` objects with no nesting.
    pub fn new(len: usize) -> Self {
        Self {
            parent: vec![None; len],
        }
    }

    /// Derive the graph from [`VolumeObject::is_within`].
    ///
    /// `objects[i]` must be the object with index `i + 1`. Two objects
    /// each within the other (identical bounds) nest the later one
    /// inside the earlier.
    pub fn build(objects: &[Box<dyn VolumeObject>]) -> Self {
        let mut graph = Self::new(objects.len());
        for (i, object) in objects.iter().enumerate() {
            let enclosing: SmallVec<[usize; 4]> = objects
                .iter()
                .enumerate()
                .filter(|&(j, other)| {
                    j != i
                        && object.is_within(other.as_ref())
                        && !(j > i && other.is_within(object.as_ref()))
                })
                .map(|(j, _)| j)
                .collect();
            if !enclosing.is_empty() {
                graph.parent[i] = Some(Self::innermost(objects, &enclosing));
            }
        }
        graph
    }

    /// The candidate slot nested within every other candidate.
    ///
    /// # Panics
    ///
    /// Panics if `candidates` is empty or has no consistent nesting
    /// order. Either indicates malformed setup geometry.
    pub fn innermost(objects: &[Box<dyn VolumeObject>], candidates: &[usize]) -> usize {
        // Latest first, matching the tie-break in `build`.
        let found = candidates.iter().rev().copied().find(|&c| {
            candidates
                .iter()
                .all(|&other| other == c || objects[c].is_within(objects[other].as_ref()))
        });
        match found {
            Some(c) => c,
            None => panic!(
                "volume objects {:?} overlap without a consistent nesting order",
                candidates.iter().map(|&c| index_of(c)).collect::<Vec<_>>()
            ),
        }
    }

    /// The first of `objects` that shares volume with `candidate`
    /// without either being nested in the other.
    ///
    /// Only the region where both bounds meet is sampled, on the
    /// coincidence grid of `sampling`. Objects that merely touch share
    /// no volume and do not count.
    pub fn first_overlap(
        objects: &[Box<dyn VolumeObject>],
        candidate: &dyn VolumeObject,
        sampling: &SamplingConfig,
    ) -> Option<VolumeObjectIndex> {
        let n = sampling.coincidence_samples_per_axis;
        objects
            .iter()
            .map(|o| o.as_ref())
            .filter(|other| !candidate.is_within(*other) && !other.is_within(candidate))
            .find(|other| {
                let Some(shared) = candidate.bounds().intersection(&other.bounds()) else {
                    return false;
                };
                SamplingConfig::midpoints(shared.min.x, shared.max.x, n).any(|x| {
                    SamplingConfig::midpoints(shared.min.y, shared.max.y, n).any(|y| {
                        SamplingConfig::midpoints(shared.min.z, shared.max.z, n).any(|z| {
                            let p = SoilPoint::new(x, y, z);
                            candidate.contains(&p) && other.contains(&p)
                        })
                    })
                })
            })
            .map(|other| other.index())
    }

    /// Number of objects tracked.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if the graph tracks no objects.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Record that `child` is nested directly inside `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either index is the background or out of range.
    pub fn set_parent(&mut self, child: VolumeObjectIndex, parent: VolumeObjectIndex) {
        let (c, p) = match (slot(child), slot(parent)) {
            (Some(c), Some(p)) if c < self.len() && p < self.len() => (c, p),
            _ => panic!(
                "cannot nest {child} in {parent}: graph only has {} objects",
                self.len()
            ),
        };
        self.parent[c] = Some(p);
    }

    /// The object directly enclosing `index`, if any.
    pub fn parent_of(&self, index: VolumeObjectIndex) -> Option<VolumeObjectIndex> {
        let s = slot(index)?;
        self.parent.get(s).copied().flatten().map(index_of)
    }

    /// Objects nested directly inside `index`. The background's
    /// children are the top-level objects.
    pub fn children_of(&self, index: VolumeObjectIndex) -> impl Iterator<Item = VolumeObjectIndex> + '_ {
        let want = slot(index);
        self.parent
            .iter()
            .enumerate()
            .filter(move |(_, p)| **p == want)
            .map(|(i, _)| index_of(i))
    }

    /// Nesting depth: 1 for top-level objects, 0 for the background.
    pub fn depth(&self, index: VolumeObjectIndex) -> usize {
        let mut depth = 0;
        let mut current = slot(index).filter(|&s| s < self.len());
        while let Some(s) = current {
            depth += 1;
            current = self.parent[s];
        }
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::SegmentIntersection;
    use humus_core::Aabb;

    #[derive(Debug)]
    struct Block(u32, Aabb);

    impl VolumeObject for Block {
        fn index(&self) -> VolumeObjectIndex {
            VolumeObjectIndex(self.0)
        }
        fn contains(&self, p: &SoilPoint) -> bool {
            self.1.contains_point(p)
        }
        fn bounds(&self) -> Aabb {
            self.1
        }
        fn intersect_segment(&self, _: &SoilPoint, _: &SoilPoint) -> Option<SegmentIntersection> {
            None
        }
    }

    fn cube(index: u32, lo: f64, hi: f64) -> Box<dyn VolumeObject> {
        Box::new(Block(
            index,
            Aabb::new(SoilPoint::new(lo, lo, lo), SoilPoint::new(hi, hi, hi)),
        ))
    }

    #[test]
    fn nested_cubes_form_a_chain() {
        let objects = vec![cube(1, 0.0, 10.0), cube(2, 2.0, 8.0), cube(3, 4.0, 6.0)];
        let g = ContainmentGraph::build(&objects);
        assert_eq!(g.parent_of(VolumeObjectIndex(1)), None);
        assert_eq!(g.parent_of(VolumeObjectIndex(2)), Some(VolumeObjectIndex(1)));
        assert_eq!(g.parent_of(VolumeObjectIndex(3)), Some(VolumeObjectIndex(2)));
        assert_eq!(g.depth(VolumeObjectIndex(3)), 3);
        assert_eq!(g.depth(VolumeObjectIndex::BACKGROUND), 0);
        let top: Vec<_> = g.children_of(VolumeObjectIndex::BACKGROUND).collect();
        assert_eq!(top, vec![VolumeObjectIndex(1)]);
    }

    #[test]
    fn disjoint_cubes_are_all_top_level() {
        let objects = vec![cube(1, 0.0, 1.0), cube(2, 2.0, 3.0)];
        let g = ContainmentGraph::build(&objects);
        assert_eq!(g.children_of(VolumeObjectIndex::BACKGROUND).count(), 2);
    }

    #[test]
    fn identical_bounds_nest_later_inside_earlier() {
        let objects = vec![cube(1, 0.0, 1.0), cube(2, 0.0, 1.0)];
        let g = ContainmentGraph::build(&objects);
        assert_eq!(g.parent_of(VolumeObjectIndex(1)), None);
        assert_eq!(g.parent_of(VolumeObjectIndex(2)), Some(VolumeObjectIndex(1)));
        assert_eq!(ContainmentGraph::innermost(&objects, &[0, 1]), 1);
    }

    #[test]
    fn set_parent_overrides() {
        let mut g = ContainmentGraph::new(2);
        g.set_parent(VolumeObjectIndex(2), VolumeObjectIndex(1));
        assert_eq!(g.parent_of(VolumeObjectIndex(2)), Some(VolumeObjectIndex(1)));
    }

    #[test]
    #[should_panic(expected = "cannot nest")]
    fn set_parent_rejects_background() {
        let mut g = ContainmentGraph::new(1);
        g.set_parent(VolumeObjectIndex(1), VolumeObjectIndex::BACKGROUND);
    }

    #[test]
    fn partial_overlap_is_found() {
        let objects = vec![cube(1, 0.0, 2.0)];
        let found = ContainmentGraph::first_overlap(
            &objects,
            cube(2, 1.0, 3.0).as_ref(),
            &SamplingConfig::default(),
        );
        assert_eq!(found, Some(VolumeObjectIndex(1)));
    }

    #[test]
    fn nested_and_touching_cubes_do_not_overlap() {
        let objects = vec![cube(1, 0.0, 10.0), cube(2, 10.0, 12.0)];
        let sampling = SamplingConfig::default();
        assert_eq!(
            ContainmentGraph::first_overlap(&objects, cube(3, 2.0, 8.0).as_ref(), &sampling),
            None
        );
        assert_eq!(
            ContainmentGraph::first_overlap(&objects, cube(3, 0.0, 10.0).as_ref(), &sampling),
            None
        );
        assert_eq!(
            ContainmentGraph::first_overlap(&objects[..1], cube(2, 10.0, 12.0).as_ref(), &sampling),
            None
        );
    }

    #[test]
    #[should_panic(expected = "consistent nesting order")]
    fn overlapping_siblings_have_no_innermost() {
        let objects = vec![cube(1, 0.0, 2.0), cube(2, 1.0, 3.0)];
        ContainmentGraph::innermost(&objects, &[0, 1]);
    }
}
