//! Non-uniform 3D box grids for Humus scoreboards.
//!
//! A scoreboard discretises its stratum into boxes whose widths vary
//! per layer. This crate owns the pure geometry of that discretisation:
//!
//! - [`BoundaryArray`]: ordered layer boundaries along one dimension,
//!   resolving continuous positions to 1-based layer indices.
//! - [`BoxGrid`]: three boundary arrays composed into a linear
//!   [`BoxIndex`](humus_core::BoxIndex), with optional periodic wrap in
//!   X and Y.
//! - [`Face`] and [`WrapDirection`]: transfer directions between
//!   adjacent boxes and the wrap report of periodic lookups.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod dimension;
pub mod edge;
pub mod error;
pub mod grid;
pub mod wrap;

#[cfg(test)]
pub(crate) mod compliance;

pub use boundary::BoundaryArray;
pub use dimension::{Dimension, Face};
pub use edge::{LookupPolicy, WrapConfig};
pub use error::GridError;
pub use grid::BoxGrid;
pub use wrap::WrapDirection;
