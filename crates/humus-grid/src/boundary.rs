//! Ordered layer boundaries along one dimension.

use crate::dimension::Dimension;
use crate::edge::LookupPolicy;
use crate::error::GridError;
use tracing::trace;

/// Layer boundaries along one dimension of a scoreboard.
///
/// Built from a strictly increasing sequence of positions: the two outer
/// bounds plus every interior boundary. `n + 1` boundaries define `n`
/// layers, addressed by 1-based index. Layer `i` covers
/// `(boundaries[i-1], boundaries[i]]`, except layer 1 which also owns the
/// lower bound itself, so a position exactly on an interior boundary
/// resolves to the lower layer.
///
/// # Examples
///
/// ```
/// use humus_grid::{BoundaryArray, Dimension};
///
/// let depth = BoundaryArray::new(Dimension::Z, vec![0.0, 2.0, 5.0, 10.0]).unwrap();
/// assert_eq!(depth.layer_count(), 3);
/// assert_eq!(depth.thickness(), 10.0);
/// assert_eq!(depth.layer_width(2).unwrap(), 3.0);
///
/// assert_eq!(depth.find_layer_with(0.0).unwrap(), 1);
/// assert_eq!(depth.find_layer_with(2.0).unwrap(), 1);
/// assert_eq!(depth.find_layer_with(2.5).unwrap(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryArray {
    dimension: Dimension,
    boundaries: Vec<f64>,
    policy: LookupPolicy,
}

impl BoundaryArray {
    /// Build a boundary array with the default [`LookupPolicy::Clamp`].
    ///
    /// Returns an error if fewer than two boundaries are given, any is
    /// non-finite, or the sequence is not strictly increasing.
    pub fn new(dimension: Dimension, boundaries: Vec<f64>) -> Result<Self, GridError> {
        if boundaries.len() < 2 {
            return Err(GridError::TooFewBoundaries {
                dimension,
                count: boundaries.len(),
            });
        }
        if let Some(position) = boundaries.iter().position(|b| !b.is_finite()) {
            return Err(GridError::NonFiniteBoundary {
                dimension,
                position,
            });
        }
        for (i, pair) in boundaries.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(GridError::NotIncreasing {
                    dimension,
                    position: i + 1,
                    previous: pair[0],
                    value: pair[1],
                });
            }
        }
        if boundaries.len() - 1 > u32::MAX as usize {
            return Err(GridError::BoxCountOverflow);
        }
        Ok(Self {
            dimension,
            boundaries,
            policy: LookupPolicy::default(),
        })
    }

    /// Build `layers` equal-width layers from `lower` to `upper`.
    pub fn uniform(
        dimension: Dimension,
        lower: f64,
        upper: f64,
        layers: u32,
    ) -> Result<Self, GridError> {
        if layers == 0 {
            return Err(GridError::TooFewBoundaries {
                dimension,
                count: 1,
            });
        }
        let width = (upper - lower) / layers as f64;
        let mut boundaries: Vec<f64> = (0..layers).map(|i| lower + width * i as f64).collect();
        boundaries.push(upper);
        Self::new(dimension, boundaries)
    }

    /// Replace the out-of-domain lookup policy.
    pub fn with_policy(mut self, policy: LookupPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Dimension this array partitions.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Out-of-domain lookup policy.
    pub fn policy(&self) -> LookupPolicy {
        self.policy
    }

    /// All boundary positions, lowest first.
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Number of boundaries (`layers + 1`).
    pub fn boundary_count(&self) -> usize {
        self.boundaries.len()
    }

    /// Number of layers.
    pub fn layer_count(&self) -> u32 {
        (self.boundaries.len() - 1) as u32
    }

    /// Lowest boundary (left, front or top edge of the domain).
    pub fn lower_bound(&self) -> f64 {
        self.boundaries[0]
    }

    /// Highest boundary (right, back or bottom edge of the domain).
    pub fn upper_bound(&self) -> f64 {
        self.boundaries[self.boundaries.len() - 1]
    }

    /// Distance between the outer bounds.
    pub fn thickness(&self) -> f64 {
        self.upper_bound() - self.lower_bound()
    }

    fn check_layer(&self, layer: u32) -> Result<usize, GridError> {
        if layer == 0 || layer > self.layer_count() {
            return Err(GridError::LayerOutOfRange {
                dimension: self.dimension,
                layer: layer as i64,
                layers: self.layer_count(),
            });
        }
        Ok(layer as usize)
    }

    /// Lower boundary of a 1-based layer.
    pub fn layer_start(&self, layer: u32) -> Result<f64, GridError> {
        let i = self.check_layer(layer)?;
        Ok(self.boundaries[i - 1])
    }

    /// Upper boundary of a 1-based layer.
    pub fn layer_end(&self, layer: u32) -> Result<f64, GridError> {
        let i = self.check_layer(layer)?;
        Ok(self.boundaries[i])
    }

    /// Width of a 1-based layer.
    pub fn layer_width(&self, layer: u32) -> Result<f64, GridError> {
        let i = self.check_layer(layer)?;
        Ok(self.boundaries[i] - self.boundaries[i - 1])
    }

    /// Midpoint of a 1-based layer.
    pub fn layer_centre(&self, layer: u32) -> Result<f64, GridError> {
        let i = self.check_layer(layer)?;
        Ok(0.5 * (self.boundaries[i] + self.boundaries[i - 1]))
    }

    /// Returns `true` if `position` lies within the outer bounds.
    pub fn contains(&self, position: f64) -> bool {
        position >= self.lower_bound() && position <= self.upper_bound()
    }

    /// 1-based index of the layer containing `position`.
    ///
    /// A position on an interior boundary belongs to the lower layer.
    /// Positions outside the outer bounds resolve to the nearest edge
    /// layer under [`LookupPolicy::Clamp`] and fail with
    /// [`GridError::PositionOutsideDomain`] under
    /// [`LookupPolicy::Strict`].
    pub fn find_layer_with(&self, position: f64) -> Result<u32, GridError> {
        if !position.is_finite() {
            return Err(GridError::NonFinitePosition {
                dimension: self.dimension,
            });
        }
        let layers = self.layer_count();
        if !self.contains(position) {
            return match self.policy {
                LookupPolicy::Strict => Err(GridError::PositionOutsideDomain {
                    dimension: self.dimension,
                    value: position,
                    lower: self.lower_bound(),
                    upper: self.upper_bound(),
                }),
                LookupPolicy::Clamp => {
                    trace!(
                        dimension = %self.dimension,
                        position,
                        "position outside domain clamped to edge layer"
                    );
                    Ok(if position < self.lower_bound() { 1 } else { layers })
                }
            };
        }
        let interior = &self.boundaries[1..layers as usize];
        Ok(interior.partition_point(|&b| b < position) as u32 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn xs() -> BoundaryArray {
        BoundaryArray::new(Dimension::X, vec![0.0, 1.0, 3.0, 6.0, 10.0]).unwrap()
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn rejects_single_boundary() {
        let err = BoundaryArray::new(Dimension::X, vec![1.0]).unwrap_err();
        assert!(matches!(err, GridError::TooFewBoundaries { count: 1, .. }));
    }

    #[test]
    fn rejects_non_increasing() {
        let err = BoundaryArray::new(Dimension::Y, vec![0.0, 2.0, 2.0]).unwrap_err();
        assert!(matches!(err, GridError::NotIncreasing { position: 2, .. }));
    }

    #[test]
    fn rejects_nan() {
        let err = BoundaryArray::new(Dimension::Z, vec![0.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, GridError::NonFiniteBoundary { position: 1, .. }));
    }

    #[test]
    fn uniform_builds_equal_layers() {
        let b = BoundaryArray::uniform(Dimension::X, 0.0, 10.0, 2).unwrap();
        assert_eq!(b.boundaries(), &[0.0, 5.0, 10.0]);
        assert!(BoundaryArray::uniform(Dimension::X, 0.0, 10.0, 0).is_err());
    }

    // ── Layer geometry ──────────────────────────────────────────

    #[test]
    fn layer_geometry() {
        let b = xs();
        assert_eq!(b.boundary_count(), 5);
        assert_eq!(b.layer_count(), 4);
        assert_eq!(b.lower_bound(), 0.0);
        assert_eq!(b.upper_bound(), 10.0);
        assert_eq!(b.layer_start(3).unwrap(), 3.0);
        assert_eq!(b.layer_end(3).unwrap(), 6.0);
        assert_eq!(b.layer_width(4).unwrap(), 4.0);
        assert_eq!(b.layer_centre(2).unwrap(), 2.0);
    }

    #[test]
    fn layer_zero_and_past_end_are_errors() {
        let b = xs();
        assert!(b.layer_width(0).is_err());
        assert!(b.layer_start(5).is_err());
    }

    // ── Lookup ──────────────────────────────────────────────────

    #[test]
    fn interior_boundary_goes_to_lower_layer() {
        let b = xs();
        assert_eq!(b.find_layer_with(1.0).unwrap(), 1);
        assert_eq!(b.find_layer_with(3.0).unwrap(), 2);
        assert_eq!(b.find_layer_with(6.0).unwrap(), 3);
    }

    #[test]
    fn outer_bounds_resolve_to_edge_layers() {
        let b = xs();
        assert_eq!(b.find_layer_with(0.0).unwrap(), 1);
        assert_eq!(b.find_layer_with(10.0).unwrap(), 4);
    }

    #[test]
    fn clamp_absorbs_overshoot() {
        let b = xs();
        assert_eq!(b.find_layer_with(-1e-9).unwrap(), 1);
        assert_eq!(b.find_layer_with(10.0 + 1e-9).unwrap(), 4);
        assert_eq!(b.find_layer_with(1e6).unwrap(), 4);
    }

    #[test]
    fn strict_rejects_overshoot() {
        let b = xs().with_policy(LookupPolicy::Strict);
        assert!(matches!(
            b.find_layer_with(-0.5),
            Err(GridError::PositionOutsideDomain { .. })
        ));
        assert_eq!(b.find_layer_with(10.0).unwrap(), 4);
    }

    #[test]
    fn nan_position_is_an_error() {
        assert!(matches!(
            xs().find_layer_with(f64::NAN),
            Err(GridError::NonFinitePosition { .. })
        ));
    }

    #[test]
    fn single_layer_always_resolves_to_one() {
        let b = BoundaryArray::new(Dimension::Z, vec![0.0, 4.0]).unwrap();
        assert_eq!(b.find_layer_with(0.0).unwrap(), 1);
        assert_eq!(b.find_layer_with(4.0).unwrap(), 1);
        assert_eq!(b.find_layer_with(2.0).unwrap(), 1);
    }

    proptest! {
        #[test]
        fn found_layer_contains_position(p in 0.0f64..=10.0) {
            let b = xs();
            let layer = b.find_layer_with(p).unwrap();
            let start = b.layer_start(layer).unwrap();
            let end = b.layer_end(layer).unwrap();
            prop_assert!(p <= end);
            prop_assert!(p > start || (layer == 1 && p == start));
        }

        #[test]
        fn layer_centres_resolve_to_their_layer(
            widths in prop::collection::vec(0.1f64..5.0, 1..12)
        ) {
            let mut boundaries = vec![0.0];
            for w in &widths {
                let last = *boundaries.last().unwrap();
                boundaries.push(last + w);
            }
            let b = BoundaryArray::new(Dimension::X, boundaries).unwrap();
            for layer in 1..=b.layer_count() {
                prop_assert_eq!(b.find_layer_with(b.layer_centre(layer).unwrap()).unwrap(), layer);
            }
        }
    }
}
