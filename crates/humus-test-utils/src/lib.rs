//! Test utilities and reference shapes for Humus development.
//!
//! Provides [`Cuboid`], an axis-aligned [`VolumeObject`] with exact
//! overlap and face-blocking answers, and grid [`fixtures`] for
//! building scoreboards in tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use humus_core::{Aabb, SoilPoint, VolumeObjectIndex};
use humus_grid::{Dimension, Face};
use humus_volume::{SamplingConfig, SegmentIntersection, VolumeObject};

/// Plane coincidence tolerance for face blocking.
const PLANE_EPSILON: f64 = 1e-9;

fn axis(p: &SoilPoint, dimension: Dimension) -> f64 {
    match dimension {
        Dimension::X => p.x,
        Dimension::Y => p.y,
        Dimension::Z => p.z,
    }
}

fn others(dimension: Dimension) -> (Dimension, Dimension) {
    match dimension {
        Dimension::X => (Dimension::Y, Dimension::Z),
        Dimension::Y => (Dimension::X, Dimension::Z),
        Dimension::Z => (Dimension::X, Dimension::Y),
    }
}

fn overlap(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    (a1.min(b1) - a0.max(b0)).max(0.0)
}

/// An axis-aligned box-shaped volume object.
///
/// Coincident proportion and face blocking are computed exactly from
/// overlap volumes and areas. Surface permeability is set per crossing
/// direction and defaults to impermeable.
#[derive(Clone, Debug)]
pub struct Cuboid {
    pub index: VolumeObjectIndex,
    pub bounds: Aabb,
    pub permeability: [Option<f64>; 6],
}

impl Cuboid {
    pub fn new(index: u32, min: (f64, f64, f64), max: (f64, f64, f64)) -> Self {
        Self {
            index: VolumeObjectIndex(index),
            bounds: Aabb::new(
                SoilPoint::new(min.0, min.1, min.2),
                SoilPoint::new(max.0, max.1, max.2),
            ),
            permeability: [None; 6],
        }
    }

    /// Same permeability for every crossing direction.
    pub fn with_permeability(mut self, permeability: f64) -> Self {
        self.permeability = [Some(permeability); 6];
        self
    }

    /// Permeability for crossings in direction `face` only.
    pub fn with_face_permeability(mut self, face: Face, permeability: Option<f64>) -> Self {
        self.permeability[face.index()] = permeability;
        self
    }

    pub fn boxed(self) -> Box<dyn VolumeObject> {
        Box::new(self)
    }
}

impl VolumeObject for Cuboid {
    fn index(&self) -> VolumeObjectIndex {
        self.index
    }

    fn contains(&self, point: &SoilPoint) -> bool {
        self.bounds.contains_point(point)
    }

    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn intersect_segment(&self, from: &SoilPoint, to: &SoilPoint) -> Option<SegmentIntersection> {
        let mut best: Option<SegmentIntersection> = None;
        for face in Face::ALL {
            let d = face.dimension();
            let plane = if face.is_positive() {
                axis(&self.bounds.max, d)
            } else {
                axis(&self.bounds.min, d)
            };
            let delta = axis(to, d) - axis(from, d);
            if delta == 0.0 {
                continue;
            }
            let t = (plane - axis(from, d)) / delta;
            if !(0.0..=1.0).contains(&t) || best.is_some_and(|b| b.parameter <= t) {
                continue;
            }
            let point = from.lerp(to, t);
            let (u, v) = others(d);
            let on_face = [u, v].into_iter().all(|o| {
                let c = axis(&point, o);
                c >= axis(&self.bounds.min, o) && c <= axis(&self.bounds.max, o)
            });
            if !on_face {
                continue;
            }
            let (dx, dy, dz) = face.offset();
            best = Some(SegmentIntersection {
                point,
                parameter: t,
                normal: SoilPoint::new(dx as f64, dy as f64, dz as f64),
            });
        }
        best
    }

    fn coincident_proportion(&self, cell: &Aabb, _sampling: &SamplingConfig) -> f64 {
        match cell.intersection(&self.bounds) {
            Some(shared) => (shared.volume() / cell.volume()).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    fn face_blocked_fraction(&self, cell: &Aabb, face: Face, _sampling: &SamplingConfig) -> f64 {
        let d = face.dimension();
        let plane = if face.is_positive() {
            axis(&cell.max, d)
        } else {
            axis(&cell.min, d)
        };
        let scale = PLANE_EPSILON * (1.0 + plane.abs());
        let on_surface = (plane - axis(&self.bounds.min, d)).abs() <= scale
            || (plane - axis(&self.bounds.max, d)).abs() <= scale;
        if !on_surface {
            return 0.0;
        }
        let (u, v) = others(d);
        let span = |o: Dimension| {
            overlap(
                axis(&cell.min, o),
                axis(&cell.max, o),
                axis(&self.bounds.min, o),
                axis(&self.bounds.max, o),
            ) / (axis(&cell.max, o) - axis(&cell.min, o))
        };
        (span(u) * span(v)).clamp(0.0, 1.0)
    }

    fn surface_permeability(&self, crossing: Face) -> Option<f64> {
        self.permeability[crossing.index()]
    }

    fn is_permeability_symmetric(&self) -> bool {
        Face::ALL
            .into_iter()
            .all(|f| self.permeability[f.index()] == self.permeability[f.reverse().index()])
    }
}
