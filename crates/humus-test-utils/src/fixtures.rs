//! Boundary and grid fixtures.
//!
//! - [`two_by_two`]: the 2x2x2 grid over `[0, 10]^3` with a split at 5.
//! - [`soil_profile`]: a non-uniform 4x3x5 soil column, finer near the
//!   surface.
//! - [`uniform_boundaries`]: equal-width layers for ad hoc grids.
//! - [`grid`]: a [`BoxGrid`] straight from a boundary triple, for
//!   scoreboards built with `Scoreboard::from_grid`.

use humus_grid::{BoundaryArray, BoxGrid, Dimension, WrapConfig};

/// `layers` equal-width layers from `lower` to `upper`, as built by
/// [`BoundaryArray::uniform`].
///
/// # Panics
///
/// Panics if `layers` is zero or `upper` does not exceed `lower`.
pub fn uniform_boundaries(lower: f64, upper: f64, layers: u32) -> Vec<f64> {
    BoundaryArray::uniform(Dimension::X, lower, upper, layers)
        .expect("valid uniform layers")
        .boundaries()
        .to_vec()
}

/// X, Y and Z boundaries `[0, 5, 10]`.
pub fn two_by_two() -> [Vec<f64>; 3] {
    let b = vec![0.0, 5.0, 10.0];
    [b.clone(), b.clone(), b]
}

/// X, Y and Z boundaries of a 4x3x5 column: 20 x 15 wide, 30 deep.
pub fn soil_profile() -> [Vec<f64>; 3] {
    [
        vec![0.0, 5.0, 10.0, 15.0, 20.0],
        vec![0.0, 5.0, 10.0, 15.0],
        vec![0.0, 1.0, 3.0, 6.0, 15.0, 30.0],
    ]
}

/// Build a grid from a boundary triple.
///
/// # Panics
///
/// Panics if the boundaries are invalid.
pub fn grid(boundaries: [Vec<f64>; 3], wrap: WrapConfig) -> BoxGrid {
    let [x, y, z] = boundaries;
    BoxGrid::new(
        BoundaryArray::new(Dimension::X, x).expect("valid X boundaries"),
        BoundaryArray::new(Dimension::Y, y).expect("valid Y boundaries"),
        BoundaryArray::new(Dimension::Z, z).expect("valid Z boundaries"),
        wrap,
    )
    .expect("valid grid")
}
