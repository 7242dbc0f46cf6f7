//! Continuous geometry values: points and axis-aligned boxes.

use std::fmt;

/// A point in continuous simulation space.
///
/// Units are those of the boundary positions the scoreboards were built
/// from (typically centimetres).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SoilPoint {
    /// Position along X.
    pub x: f64,
    /// Position along Y.
    pub y: f64,
    /// Position along Z (depth).
    pub z: f64,
}

impl SoilPoint {
    /// Build a point from its three components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Linear interpolation: `self + t * (other - self)`.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
            z: self.z + t * (other.z - self.z),
        }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Returns `true` if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl fmt::Display for SoilPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An axis-aligned box in continuous space, `min` to `max` inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Lower corner.
    pub min: SoilPoint,
    /// Upper corner.
    pub max: SoilPoint,
}

impl Aabb {
    /// Build a box from two corners. Components are not reordered.
    pub const fn new(min: SoilPoint, max: SoilPoint) -> Self {
        Self { min, max }
    }

    /// Extent along each axis.
    pub fn size(&self) -> SoilPoint {
        SoilPoint::new(
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }

    /// Enclosed volume.
    pub fn volume(&self) -> f64 {
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Geometric centre.
    pub fn centre(&self) -> SoilPoint {
        self.min.lerp(&self.max, 0.5)
    }

    /// Closed containment test for a point.
    pub fn contains_point(&self, p: &SoilPoint) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Returns `true` if `other` lies entirely inside `self`.
    pub fn contains_box(&self, other: &Aabb) -> bool {
        self.contains_point(&other.min) && self.contains_point(&other.max)
    }

    /// The overlapping region of two boxes, if it has positive volume.
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let min = SoilPoint::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = SoilPoint::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );
        if min.x < max.x && min.y < max.y && min.z < max.z {
            Some(Aabb { min, max })
        } else {
            None
        }
    }
}
