//! Core types for the Humus soil-grid engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace: typed
//! box and characteristic identifiers, strata, continuous geometry
//! values, and characteristic descriptors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod characteristic;
pub mod error;
pub mod geometry;
pub mod id;
pub mod stratum;

pub use characteristic::CharacteristicDescriptor;
pub use error::DescriptorError;
pub use geometry::{Aabb, SoilPoint};
pub use id::{
    BoxCoordinate, BoxIndex, CharacteristicId, CoordinatorInstanceId, ScoreboardInstanceId,
    VolumeObjectIndex,
};
pub use stratum::Stratum;
