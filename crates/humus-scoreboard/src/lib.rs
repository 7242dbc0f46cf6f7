//! Per-stratum scoreboards for the Humus soil-grid engine.
//!
//! A [`Scoreboard`] discretises one stratum into a non-uniform box grid
//! and stores one dense array per registered characteristic. It also
//! memoises two geometric facts supplied by the
//! [`VolumeObjectCoordinator`]:
//!
//! - the coincident proportion of each `(box, volume object)` pair, in a
//!   lazily allocated [`CoincidenceCache`];
//! - the [`TransferRestrictionData`] between adjacent boxes, in a
//!   [`RestrictionCache`] keyed by `(from, to, face)`.
//!
//! Geometry is static for the lifetime of a run, so neither cache is
//! ever invalidated. With no volume objects both queries take a fast
//! path that allocates nothing.
//!
//! The [`ScoreboardCoordinator`] owns one scoreboard per configured
//! stratum, routes registration and lookups, and combines extents of
//! vertically stacked strata.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coincidence;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod restriction;
pub mod scoreboard;
pub mod storage;
pub mod volumes;

pub use coincidence::CoincidenceCache;
pub use config::{validate_set, ConfigError, ScoreboardConfig};
pub use coordinator::{ScoreboardCoordinator, ViewDirection};
pub use error::{CoordinatorError, ScoreboardError, VolumeError};
pub use restriction::{RestrictionCache, TransferRestrictionData};
pub use scoreboard::Scoreboard;
pub use storage::{CharacteristicStore, CharacteristicSummary};
pub use volumes::{BoxSubsections, VolumeObjectCoordinator};
