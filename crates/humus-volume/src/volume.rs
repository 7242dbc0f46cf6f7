//! The narrow geometry contract the engine requires of a volume object.

use crate::sampling::SamplingConfig;
use humus_core::{Aabb, SoilPoint, VolumeObjectIndex};
use humus_grid::{Dimension, Face};
use std::fmt;

/// Where a path segment first crosses a volume object's surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentIntersection {
    /// The crossing point.
    pub point: SoilPoint,
    /// Position along the segment, `0.0` at its start and `1.0` at its end.
    pub parameter: f64,
    /// Unit surface normal at the crossing, pointing out of the object.
    pub normal: SoilPoint,
}

/// A geometric body embedded in the simulated domain.
///
/// Implementors supply point containment, bounds, and segment
/// intersection. Coincident volume and face blocking have sampled
/// defaults built on [`contains`](Self::contains); shapes that can do
/// better should override them.
///
/// Objects are static once registered: every answer for a fixed input
/// must stay the same for the lifetime of a run, since the scoreboard
/// caches them without invalidation.
pub trait VolumeObject: fmt::Debug {
    /// Stable identifying index, `>= 1`. `0` is the background.
    fn index(&self) -> VolumeObjectIndex;

    /// Returns `true` if `point` is inside the object.
    fn contains(&self, point: &SoilPoint) -> bool;

    /// Smallest axis-aligned box enclosing the object.
    fn bounds(&self) -> Aabb;

    /// First crossing of the segment `from -> to` with the surface.
    fn intersect_segment(&self, from: &SoilPoint, to: &SoilPoint)
        -> Option<SegmentIntersection>;

    /// Returns `true` if this object is properly nested inside `other`.
    ///
    /// The default compares bounds.
    fn is_within(&self, other: &dyn VolumeObject) -> bool {
        self.index() != other.index() && other.bounds().contains_box(&self.bounds())
    }

    /// Fraction of `cell`'s volume inside the object, in `[0, 1]`.
    ///
    /// The default tests the midpoints of an `n x n x n` subdivision of
    /// the cell.
    fn coincident_proportion(&self, cell: &Aabb, sampling: &SamplingConfig) -> f64 {
        if cell.intersection(&self.bounds()).is_none() {
            return 0.0;
        }
        let n = sampling.coincidence_samples_per_axis;
        let mut inside = 0u64;
        for x in SamplingConfig::midpoints(cell.min.x, cell.max.x, n) {
            for y in SamplingConfig::midpoints(cell.min.y, cell.max.y, n) {
                for z in SamplingConfig::midpoints(cell.min.z, cell.max.z, n) {
                    if self.contains(&SoilPoint::new(x, y, z)) {
                        inside += 1;
                    }
                }
            }
        }
        inside as f64 / (n as u64).pow(3) as f64
    }

    /// Fraction of `cell`'s `face` across which the object's surface
    /// separates the cell from its neighbour, in `[0, 1]`.
    ///
    /// The default tests `n x n` point pairs straddling the face plane:
    /// a pair counts as blocked when exactly one of its points is inside
    /// the object.
    fn face_blocked_fraction(&self, cell: &Aabb, face: Face, sampling: &SamplingConfig) -> f64 {
        let dimension = face.dimension();
        let (lo, hi) = axis_range(cell, dimension);
        let plane = if face.is_positive() { hi } else { lo };
        let bounds = self.bounds();
        let (blo, bhi) = axis_range(&bounds, dimension);
        if plane < blo || plane > bhi {
            return 0.0;
        }
        let delta = (hi - lo).abs().max(f64::MIN_POSITIVE) * 1e-6;
        let (inner, outer) = if face.is_positive() {
            (plane - delta, plane + delta)
        } else {
            (plane + delta, plane - delta)
        };
        let (first, second) = match dimension {
            Dimension::X => (Dimension::Y, Dimension::Z),
            Dimension::Y => (Dimension::X, Dimension::Z),
            Dimension::Z => (Dimension::X, Dimension::Y),
        };
        let (ulo, uhi) = axis_range(cell, first);
        let (vlo, vhi) = axis_range(cell, second);
        let n = sampling.face_samples_per_axis;
        let mut blocked = 0u64;
        for u in SamplingConfig::midpoints(ulo, uhi, n) {
            for v in SamplingConfig::midpoints(vlo, vhi, n) {
                let p_in = compose(dimension, inner, u, v);
                let p_out = compose(dimension, outer, u, v);
                if self.contains(&p_in) != self.contains(&p_out) {
                    blocked += 1;
                }
            }
        }
        blocked as f64 / (n as u64).pow(2) as f64
    }

    /// Permeability of the surface to transfer in direction `crossing`.
    ///
    /// `None` means impermeable. The default is impermeable both ways.
    fn surface_permeability(&self, _crossing: Face) -> Option<f64> {
        None
    }

    /// Returns `true` if [`surface_permeability`](Self::surface_permeability)
    /// gives the same answer for a face and its reverse.
    fn is_permeability_symmetric(&self) -> bool {
        true
    }

    /// Where a path `from -> to` ends after being deflected at `hit`.
    ///
    /// The default slides the remainder of the segment along the
    /// surface by removing its component along the hit normal.
    fn deflect(&self, _from: &SoilPoint, to: &SoilPoint, hit: &SegmentIntersection) -> SoilPoint {
        let rx = to.x - hit.point.x;
        let ry = to.y - hit.point.y;
        let rz = to.z - hit.point.z;
        let n = hit.normal;
        let along = rx * n.x + ry * n.y + rz * n.z;
        SoilPoint::new(
            hit.point.x + rx - along * n.x,
            hit.point.y + ry - along * n.y,
            hit.point.z + rz - along * n.z,
        )
    }
}

fn axis_range(b: &Aabb, dimension: Dimension) -> (f64, f64) {
    match dimension {
        Dimension::X => (b.min.x, b.max.x),
        Dimension::Y => (b.min.y, b.max.y),
        Dimension::Z => (b.min.z, b.max.z),
    }
}

/// Build a point with `normal_value` on `normal` and `(u, v)` on the two
/// remaining axes in X, Y, Z order.
fn compose(normal: Dimension, normal_value: f64, u: f64, v: f64) -> SoilPoint {
    match normal {
        Dimension::X => SoilPoint::new(normal_value, u, v),
        Dimension::Y => SoilPoint::new(u, normal_value, v),
        Dimension::Z => SoilPoint::new(u, v, normal_value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Half-space `x < split` clipped to a large cube.
    #[derive(Debug)]
    struct Slab {
        index: u32,
        split: f64,
    }

    impl VolumeObject for Slab {
        fn index(&self) -> VolumeObjectIndex {
            VolumeObjectIndex(self.index)
        }

        fn contains(&self, p: &SoilPoint) -> bool {
            self.bounds().contains_point(p) && p.x < self.split
        }

        fn bounds(&self) -> Aabb {
            Aabb::new(
                SoilPoint::new(-100.0, -100.0, -100.0),
                SoilPoint::new(self.split, 100.0, 100.0),
            )
        }

        fn intersect_segment(
            &self,
            from: &SoilPoint,
            to: &SoilPoint,
        ) -> Option<SegmentIntersection> {
            if (from.x < self.split) == (to.x < self.split) {
                return None;
            }
            let t = (self.split - from.x) / (to.x - from.x);
            Some(SegmentIntersection {
                point: from.lerp(to, t),
                parameter: t,
                normal: SoilPoint::new(1.0, 0.0, 0.0),
            })
        }
    }

    fn cell(x0: f64, x1: f64) -> Aabb {
        Aabb::new(SoilPoint::new(x0, 0.0, 0.0), SoilPoint::new(x1, 1.0, 1.0))
    }

    #[test]
    fn sampled_proportion_of_half_covered_cell() {
        let slab = Slab { index: 1, split: 0.5 };
        let p = slab.coincident_proportion(&cell(0.0, 1.0), &SamplingConfig::default());
        assert_eq!(p, 0.5);
    }

    #[test]
    fn disjoint_cell_has_zero_proportion() {
        let slab = Slab { index: 1, split: 0.5 };
        let p = slab.coincident_proportion(&cell(2.0, 3.0), &SamplingConfig::default());
        assert_eq!(p, 0.0);
    }

    #[test]
    fn surface_on_face_blocks_that_face_only() {
        let slab = Slab { index: 1, split: 1.0 };
        let s = SamplingConfig::default();
        let c = cell(0.0, 1.0);
        assert_eq!(slab.face_blocked_fraction(&c, Face::PosX, &s), 1.0);
        assert_eq!(slab.face_blocked_fraction(&c, Face::NegX, &s), 0.0);
        assert_eq!(slab.face_blocked_fraction(&c, Face::PosY, &s), 0.0);
    }

    #[test]
    fn neighbour_sees_the_same_surface_from_the_other_side() {
        let slab = Slab { index: 1, split: 1.0 };
        let s = SamplingConfig::default();
        assert_eq!(slab.face_blocked_fraction(&cell(1.0, 2.0), Face::NegX, &s), 1.0);
    }

    #[test]
    fn deflect_slides_along_surface() {
        let slab = Slab { index: 1, split: 1.0 };
        let from = SoilPoint::new(0.0, 0.0, 0.0);
        let to = SoilPoint::new(2.0, 2.0, 0.0);
        let hit = slab.intersect_segment(&from, &to).unwrap();
        assert_eq!(hit.point, SoilPoint::new(1.0, 1.0, 0.0));
        assert_eq!(slab.deflect(&from, &to, &hit), SoilPoint::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn default_permeability_is_impermeable_and_symmetric() {
        let slab = Slab { index: 1, split: 1.0 };
        assert_eq!(slab.surface_permeability(Face::PosX), None);
        assert!(slab.is_permeability_symmetric());
    }
}
