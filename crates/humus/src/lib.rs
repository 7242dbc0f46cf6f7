//! Humus: box-grid scoreboards for 3-D soil simulation.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Humus sub-crates. For most users, adding `humus` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use humus::prelude::*;
//!
//! // A litter layer above a 2 x 2 x 3 soil column.
//! let xy = vec![0.0, 5.0, 10.0];
//! let mut coordinator = ScoreboardCoordinator::new(vec![
//!     ScoreboardConfig::new(Stratum::Litter, xy.clone(), xy.clone(), vec![-1.0, 0.0]),
//!     ScoreboardConfig::new(Stratum::Soil, xy.clone(), xy, vec![0.0, 1.0, 3.0, 6.0]),
//! ])
//! .unwrap();
//!
//! let nitrate = coordinator
//!     .register_characteristic(
//!         CharacteristicDescriptor::new("Nitrate Amount", Stratum::Soil).with_units("ug"),
//!     )
//!     .unwrap();
//!
//! let (index, _) = coordinator
//!     .find_box_index_by_soil_coordinate(&SoilPoint::new(7.0, 2.0, 2.0))
//!     .unwrap();
//! let soil = coordinator.get_scoreboard_mut(Stratum::Soil).unwrap();
//! soil.set_characteristic_value(nitrate, 12.5, index).unwrap();
//!
//! assert_eq!(index, BoxIndex(5));
//! assert_eq!(coordinator.total_scoreboard_measurement(Dimension::Z), 7.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `humus-core` | IDs, points and bounds, strata, characteristic descriptors |
//! | [`grid`] | `humus-grid` | Boundary arrays, box grids, faces and periodic wrap |
//! | [`volume`] | `humus-volume` | Volume-object trait, containment, subsections |
//! | [`scoreboard`] | `humus-scoreboard` | Scoreboards, overlap caches and coordinators |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`humus-core`).
///
/// Contains box and characteristic identifiers, [`types::SoilPoint`],
/// [`types::Aabb`], [`types::Stratum`], and
/// [`types::CharacteristicDescriptor`].
pub use humus_core as types;

/// Box-grid geometry (`humus-grid`).
///
/// [`grid::BoundaryArray`] partitions one dimension into layers;
/// [`grid::BoxGrid`] combines three of them into a linearly indexed grid
/// with optional periodic wrap in X and Y.
pub use humus_grid as grid;

/// Volume objects embedded in the domain (`humus-volume`).
///
/// The [`volume::VolumeObject`] trait is the main extension point for
/// user-defined geometry such as pots, stones or root barriers.
pub use humus_volume as volume;

/// Scoreboards and their coordinators (`humus-scoreboard`).
///
/// [`scoreboard::Scoreboard`] stores per-box characteristic values for one
/// stratum, [`scoreboard::ScoreboardCoordinator`] manages the strata
/// together and [`scoreboard::VolumeObjectCoordinator`] answers overlap
/// queries.
pub use humus_scoreboard as scoreboard;

/// Common imports for typical Humus usage.
///
/// ```rust
/// use humus::prelude::*;
/// ```
///
/// This imports the most frequently used types: identifiers, geometry,
/// configuration, the coordinators and the volume-object trait.
pub mod prelude {
    // Core types
    pub use humus_core::{
        Aabb, BoxIndex, CharacteristicDescriptor, CharacteristicId, SoilPoint, Stratum,
        VolumeObjectIndex,
    };

    // Grid
    pub use humus_grid::{Dimension, Face, LookupPolicy, WrapConfig, WrapDirection};

    // Volume objects
    pub use humus_volume::{SamplingConfig, SegmentIntersection, VolumeObject};

    // Scoreboards
    pub use humus_scoreboard::{
        Scoreboard, ScoreboardConfig, ScoreboardCoordinator, TransferRestrictionData,
        VolumeObjectCoordinator,
    };

    // Errors
    pub use humus_scoreboard::{ConfigError, CoordinatorError, ScoreboardError, VolumeError};
}
