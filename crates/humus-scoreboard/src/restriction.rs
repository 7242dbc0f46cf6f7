//! Transfer restriction between adjacent boxes.
//!
//! A restriction is derived from the face-blocking records of every
//! volume object whose surface lies on the shared face. Results are
//! memoised per `(from, to, face)`; the no-objects case never touches
//! the cache.

use std::collections::HashMap;

use humus_core::BoxIndex;
use humus_grid::Face;

/// Open fractions within this distance of 0 or 1 are treated as exact.
const OPEN_EPSILON: f64 = 1e-12;

/// Whether, and how freely, a quantity may cross from one box into an
/// adjacent one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransferRestrictionData {
    /// No surface lies on the face.
    Unrestricted,
    /// The face is wholly covered by impermeable surface.
    Blocked,
    /// The face is partly open, partly covered, or covered by a
    /// permeable surface.
    Permeable {
        /// Fraction of the face not covered by any surface, in `[0, 1)`.
        open_fraction: f64,
        /// Permeability of the covering surface, in `[0, 1]`. Where
        /// several surfaces overlap, the least permeable applies.
        permeability: f64,
    },
}

impl TransferRestrictionData {
    /// Fraction of an unrestricted transfer that gets through:
    /// `open + (1 - open) * permeability`.
    pub fn transfer_factor(&self) -> f64 {
        match *self {
            Self::Unrestricted => 1.0,
            Self::Blocked => 0.0,
            Self::Permeable {
                open_fraction,
                permeability,
            } => open_fraction + (1.0 - open_fraction) * permeability,
        }
    }

    /// Returns `true` for [`Blocked`](Self::Blocked).
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked)
    }

    /// Returns `true` for [`Unrestricted`](Self::Unrestricted).
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }

    /// Classify the combined effect of surfaces covering a face.
    ///
    /// Each contribution is `(blocked_fraction, permeability)`. Surfaces
    /// are assumed to cover independent parts of the face, so the open
    /// fraction is the product of their uncovered fractions.
    pub fn from_contributions(contributions: &[(f64, f64)]) -> Self {
        if contributions.is_empty() {
            return Self::Unrestricted;
        }
        let open_fraction: f64 = contributions
            .iter()
            .map(|&(blocked, _)| 1.0 - blocked.clamp(0.0, 1.0))
            .product();
        let permeability = contributions
            .iter()
            .map(|&(_, p)| p.clamp(0.0, 1.0))
            .fold(1.0, f64::min);
        if open_fraction >= 1.0 - OPEN_EPSILON {
            Self::Unrestricted
        } else if open_fraction <= OPEN_EPSILON && permeability == 0.0 {
            Self::Blocked
        } else {
            Self::Permeable {
                open_fraction: open_fraction.max(0.0),
                permeability,
            }
        }
    }
}

/// Memoised restrictions keyed by `(from, to, face)`.
#[derive(Clone, Debug, Default)]
pub struct RestrictionCache {
    entries: HashMap<(BoxIndex, BoxIndex, Face), TransferRestrictionData>,
}

impl RestrictionCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached restriction, if computed.
    pub fn get(&self, from: BoxIndex, to: BoxIndex, face: Face) -> Option<TransferRestrictionData> {
        self.entries.get(&(from, to, face)).copied()
    }

    /// Store a computed restriction.
    pub fn insert(&mut self, from: BoxIndex, to: BoxIndex, face: Face, data: TransferRestrictionData) {
        self.entries.insert((from, to, face), data);
    }

    /// Store `data` for the reverse crossing unless it is already known.
    pub fn insert_reverse(
        &mut self,
        from: BoxIndex,
        to: BoxIndex,
        face: Face,
        data: TransferRestrictionData,
    ) {
        self.entries.entry((to, from, face.reverse())).or_insert(data);
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_surface_is_unrestricted() {
        let r = TransferRestrictionData::from_contributions(&[]);
        assert!(r.is_unrestricted());
        assert_eq!(r.transfer_factor(), 1.0);
    }

    #[test]
    fn zero_coverage_is_unrestricted() {
        let r = TransferRestrictionData::from_contributions(&[(0.0, 0.0)]);
        assert!(r.is_unrestricted());
    }

    #[test]
    fn full_impermeable_cover_blocks() {
        let r = TransferRestrictionData::from_contributions(&[(1.0, 0.0)]);
        assert!(r.is_blocked());
        assert_eq!(r.transfer_factor(), 0.0);
    }

    #[test]
    fn full_permeable_cover_passes_permeability() {
        let r = TransferRestrictionData::from_contributions(&[(1.0, 0.25)]);
        assert_eq!(
            r,
            TransferRestrictionData::Permeable {
                open_fraction: 0.0,
                permeability: 0.25
            }
        );
        assert_eq!(r.transfer_factor(), 0.25);
    }

    #[test]
    fn partial_covers_multiply_and_least_permeable_wins() {
        let r = TransferRestrictionData::from_contributions(&[(0.5, 0.5), (0.5, 0.1)]);
        match r {
            TransferRestrictionData::Permeable {
                open_fraction,
                permeability,
            } => {
                assert_eq!(open_fraction, 0.25);
                assert_eq!(permeability, 0.1);
            }
            other => panic!("expected permeable, got {other:?}"),
        }
        assert!((r.transfer_factor() - (0.25 + 0.75 * 0.1)).abs() < 1e-12);
    }

    #[test]
    fn reverse_insert_keeps_existing_entry() {
        let mut cache = RestrictionCache::new();
        cache.insert(BoxIndex(1), BoxIndex(0), Face::NegX, TransferRestrictionData::Blocked);
        cache.insert_reverse(
            BoxIndex(0),
            BoxIndex(1),
            Face::PosX,
            TransferRestrictionData::Unrestricted,
        );
        assert_eq!(
            cache.get(BoxIndex(1), BoxIndex(0), Face::NegX),
            Some(TransferRestrictionData::Blocked)
        );
        cache.insert_reverse(
            BoxIndex(1),
            BoxIndex(2),
            Face::PosY,
            TransferRestrictionData::Blocked,
        );
        assert_eq!(
            cache.get(BoxIndex(2), BoxIndex(1), Face::NegY),
            Some(TransferRestrictionData::Blocked)
        );
        assert_eq!(cache.len(), 2);
    }
}
