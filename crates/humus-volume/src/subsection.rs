//! Per-box subsections: one volume object's share of one box.

use humus_core::VolumeObjectIndex;
use humus_grid::Face;

/// How one face of a box is obstructed by one object's surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceRestriction {
    /// Fraction of the face area behind the surface, in `(0, 1]`.
    pub blocked_fraction: f64,
    /// Permeability for transfer out through this face; `None` means
    /// impermeable.
    pub permeability: Option<f64>,
}

/// The restricted faces of one subsection, at most one entry per face.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FaceRestrictions {
    faces: [Option<FaceRestriction>; 6],
}

impl FaceRestrictions {
    /// No restricted faces.
    pub fn none() -> Self {
        Self::default()
    }

    /// Record a restriction on `face`. A zero or negative fraction clears it.
    pub fn set(&mut self, face: Face, restriction: FaceRestriction) {
        self.faces[face.index()] = if restriction.blocked_fraction > 0.0 {
            Some(restriction)
        } else {
            None
        };
    }

    /// Restriction on `face`, if any.
    pub fn get(&self, face: Face) -> Option<&FaceRestriction> {
        self.faces[face.index()].as_ref()
    }

    /// Returns `true` if `face` carries a restriction.
    pub fn is_restricted(&self, face: Face) -> bool {
        self.faces[face.index()].is_some()
    }

    /// Returns `true` if no face is restricted.
    pub fn is_empty(&self) -> bool {
        self.faces.iter().all(Option::is_none)
    }

    /// Number of restricted faces.
    pub fn len(&self) -> usize {
        self.faces.iter().filter(|f| f.is_some()).count()
    }

    /// Restricted faces in [`Face::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Face, &FaceRestriction)> {
        Face::ALL
            .into_iter()
            .zip(self.faces.iter())
            .filter_map(|(face, r)| r.as_ref().map(|r| (face, r)))
    }
}

/// One volume object's share of one box.
///
/// Every box has an implicit background subsection; boxes crossed by
/// objects additionally carry one subsection per object. The
/// proportions of all subsections of a box sum to at most 1.
#[derive(Clone, Debug, PartialEq)]
pub struct Subsection {
    /// The object, or [`VolumeObjectIndex::BACKGROUND`].
    pub volume_object: VolumeObjectIndex,
    /// Fraction of the box volume attributed to the object.
    pub coincident_proportion: f64,
    /// Faces of the box obstructed by the object's surface.
    pub restrictions: FaceRestrictions,
}

impl Subsection {
    /// The background subsection of a box untouched by any object.
    pub fn background() -> Self {
        Self {
            volume_object: VolumeObjectIndex::BACKGROUND,
            coincident_proportion: 1.0,
            restrictions: FaceRestrictions::none(),
        }
    }
}
