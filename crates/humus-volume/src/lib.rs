//! Volume objects embedded in a Humus scoreboard.
//!
//! A volume object is a geometric body (a pot wall, a rock, a barrier
//! sheet) that occupies part of some boxes and obstructs, fully or
//! partially, transfer across their faces. The engine consumes objects
//! only through the narrow [`VolumeObject`] contract; the shapes
//! themselves live with the caller.
//!
//! - [`VolumeObject`]: containment, segment intersection and deflection,
//!   nesting, and sampled defaults for coincident volume and face
//!   blocking.
//! - [`Subsection`]: one object's share of one box, with its
//!   [`FaceRestrictions`].
//! - [`ContainmentGraph`]: the innermost-enclosing relation between
//!   registered objects.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod containment;
pub mod sampling;
pub mod subsection;
pub mod volume;

pub use containment::ContainmentGraph;
pub use sampling::SamplingConfig;
pub use subsection::{FaceRestriction, FaceRestrictions, Subsection};
pub use volume::{SegmentIntersection, VolumeObject};
