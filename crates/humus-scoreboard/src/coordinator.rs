//! One scoreboard per stratum, with routed queries and combined extents.

use humus_core::{
    BoxCoordinate, BoxIndex, CharacteristicDescriptor, CharacteristicId, SoilPoint, Stratum,
};
use humus_grid::{Dimension, WrapDirection};
use indexmap::IndexMap;
use tracing::info;

use crate::config::{validate_set, ScoreboardConfig};
use crate::error::CoordinatorError;
use crate::scoreboard::Scoreboard;

/// A 2D projection of the domain for views and summaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewDirection {
    /// Looking along Y: X across, Z down.
    Front,
    /// Looking along X: Y across, Z down.
    Side,
    /// Looking down Z: X across, Y down.
    Top,
}

impl ViewDirection {
    /// The `(horizontal, vertical)` dimensions shown in this view.
    pub fn dimensions(self) -> (Dimension, Dimension) {
        match self {
            Self::Front => (Dimension::X, Dimension::Z),
            Self::Side => (Dimension::Y, Dimension::Z),
            Self::Top => (Dimension::X, Dimension::Y),
        }
    }
}

/// Owns the scoreboard of every configured stratum.
///
/// Strata share one horizontal domain and stack vertically, so X and Y
/// extents are taken from any scoreboard while Z extents combine.
#[derive(Debug)]
pub struct ScoreboardCoordinator {
    scoreboards: IndexMap<Stratum, Scoreboard>,
}

impl ScoreboardCoordinator {
    /// Validate the layout and build one scoreboard per configuration.
    pub fn new(configs: Vec<ScoreboardConfig>) -> Result<Self, CoordinatorError> {
        validate_set(&configs)?;
        let mut scoreboards = IndexMap::with_capacity(configs.len());
        for config in &configs {
            scoreboards.insert(config.stratum, Scoreboard::new(config)?);
        }
        info!(
            strata = ?scoreboards.keys().collect::<Vec<_>>(),
            "created scoreboard coordinator"
        );
        Ok(Self { scoreboards })
    }

    /// Configured strata in configuration order.
    pub fn strata(&self) -> impl Iterator<Item = Stratum> + '_ {
        self.scoreboards.keys().copied()
    }

    /// Scoreboard of `stratum`; `None` if that stratum is unused.
    pub fn get_scoreboard(&self, stratum: Stratum) -> Option<&Scoreboard> {
        self.scoreboards.get(&stratum)
    }

    /// Mutable scoreboard of `stratum`; `None` if that stratum is unused.
    pub fn get_scoreboard_mut(&mut self, stratum: Stratum) -> Option<&mut Scoreboard> {
        self.scoreboards.get_mut(&stratum)
    }

    fn scoreboard(&self, stratum: Stratum) -> Result<&Scoreboard, CoordinatorError> {
        self.get_scoreboard(stratum)
            .ok_or(CoordinatorError::MissingStratum(stratum))
    }

    /// Register a characteristic on the scoreboard of its stratum.
    pub fn register_characteristic(
        &mut self,
        descriptor: CharacteristicDescriptor,
    ) -> Result<CharacteristicId, CoordinatorError> {
        let stratum = descriptor.stratum;
        let scoreboard = self
            .get_scoreboard_mut(stratum)
            .ok_or(CoordinatorError::MissingStratum(stratum))?;
        Ok(scoreboard.register_characteristic(descriptor)?)
    }

    /// Box of the soil scoreboard containing `point`.
    pub fn find_box_by_soil_coordinate(
        &self,
        point: &SoilPoint,
    ) -> Result<(BoxCoordinate, WrapDirection), CoordinatorError> {
        self.find_box_in_stratum(Stratum::Soil, point)
    }

    /// Linear index of the soil box containing `point`.
    pub fn find_box_index_by_soil_coordinate(
        &self,
        point: &SoilPoint,
    ) -> Result<(BoxIndex, WrapDirection), CoordinatorError> {
        Ok(self
            .scoreboard(Stratum::Soil)?
            .find_box_index_by_soil_coordinate(point)?)
    }

    /// Box of `stratum`'s scoreboard containing `point`.
    pub fn find_box_in_stratum(
        &self,
        stratum: Stratum,
        point: &SoilPoint,
    ) -> Result<(BoxCoordinate, WrapDirection), CoordinatorError> {
        Ok(self
            .scoreboard(stratum)?
            .find_box_by_soil_coordinate(point)?)
    }

    /// First configured stratum whose depth range contains `point.z`.
    pub fn find_stratum_containing(&self, point: &SoilPoint) -> Option<Stratum> {
        self.scoreboards
            .iter()
            .find(|(_, sb)| sb.boundary(Dimension::Z).contains(point.z))
            .map(|(s, _)| *s)
    }

    fn reference(&self) -> &Scoreboard {
        // `new` rejects an empty set, so the map is never empty.
        &self.scoreboards[0]
    }

    /// Lowest and highest position of the combined domain along one
    /// dimension.
    pub fn bounds(&self, dimension: Dimension) -> (f64, f64) {
        match dimension {
            Dimension::X | Dimension::Y => {
                let b = self.reference().boundary(dimension);
                (b.lower_bound(), b.upper_bound())
            }
            Dimension::Z => self.scoreboards.values().fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(lo, hi), sb| {
                    let b = sb.boundary(Dimension::Z);
                    (lo.min(b.lower_bound()), hi.max(b.upper_bound()))
                },
            ),
        }
    }

    /// Horizontal then vertical bounds of the combined domain as seen
    /// in `view`.
    pub fn bounds_in_view(&self, view: ViewDirection) -> [(f64, f64); 2] {
        let (h, v) = view.dimensions();
        [self.bounds(h), self.bounds(v)]
    }

    /// Extent of the combined domain along one dimension: shared in X
    /// and Y, summed over strata in Z.
    pub fn total_scoreboard_measurement(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::X | Dimension::Y => self.reference().boundary(dimension).thickness(),
            Dimension::Z => self
                .scoreboards
                .values()
                .map(|sb| sb.boundary(Dimension::Z).thickness())
                .sum(),
        }
    }

    /// Boxes across all strata.
    pub fn total_box_count(&self) -> usize {
        self.scoreboards.values().map(Scoreboard::box_count).sum()
    }
}
