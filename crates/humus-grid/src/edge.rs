//! Domain edge handling for continuous lookups.

/// How a [`BoundaryArray`](crate::BoundaryArray) treats positions that
/// fall outside its outer bounds.
///
/// Upstream geometry (root tips, diffusing solute) works in continuous
/// space and can land marginally past a domain edge through rounding.
/// `Clamp` resolves such positions to the nearest edge layer; `Strict`
/// reports them as errors so conservation checks can catch them.
///
/// # Examples
///
/// ```
/// use humus_grid::{BoundaryArray, Dimension, LookupPolicy};
///
/// let clamp = BoundaryArray::new(Dimension::X, vec![0.0, 5.0, 10.0]).unwrap();
/// assert_eq!(clamp.find_layer_with(10.000001).unwrap(), 2);
///
/// let strict = clamp.with_policy(LookupPolicy::Strict);
/// assert!(strict.find_layer_with(10.000001).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LookupPolicy {
    /// Out-of-domain positions resolve to the nearest edge layer.
    #[default]
    Clamp,
    /// Out-of-domain positions are an error.
    Strict,
}

/// Which horizontal dimensions of a grid are periodic.
///
/// Z is never periodic: strata are stacked vertically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WrapConfig {
    /// Periodic along X.
    pub x: bool,
    /// Periodic along Y.
    pub y: bool,
}

impl WrapConfig {
    /// No periodic dimensions.
    pub const NONE: Self = Self { x: false, y: false };
    /// Periodic in both X and Y.
    pub const XY: Self = Self { x: true, y: true };
}
