//! Scoreboard configuration, validation, and error types.
//!
//! [`ScoreboardConfig`] is the builder-input for one stratum's
//! scoreboard. [`validate_set`] checks a whole multi-stratum layout
//! before any scoreboard is built.

use std::error::Error;
use std::fmt;

use humus_core::Stratum;
use humus_grid::{BoundaryArray, BoxGrid, Dimension, GridError, LookupPolicy, WrapConfig};
use tracing::warn;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating scoreboard configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A stratum's boundaries do not form a valid grid.
    Grid {
        /// The stratum being configured.
        stratum: Stratum,
        /// The underlying failure.
        source: GridError,
    },
    /// A coordinator was given no scoreboards.
    NoStrata,
    /// Two configurations name the same stratum.
    DuplicateStratum(Stratum),
    /// Strata are stacked vertically over one horizontal domain, so X
    /// and Y boundaries must agree exactly.
    HorizontalMismatch {
        /// The stratum that disagrees.
        stratum: Stratum,
        /// The first configured stratum, used as reference.
        reference: Stratum,
        /// The disagreeing dimension.
        dimension: Dimension,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid { stratum, source } => write!(f, "stratum {stratum}: {source}"),
            Self::NoStrata => write!(f, "no scoreboards configured"),
            Self::DuplicateStratum(s) => write!(f, "stratum {s} configured twice"),
            Self::HorizontalMismatch {
                stratum,
                reference,
                dimension,
            } => write!(
                f,
                "stratum {stratum} {dimension} boundaries differ from stratum {reference}"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ── ScoreboardConfig ───────────────────────────────────────────────

/// Everything needed to build one stratum's scoreboard.
///
/// Boundary vectors list the outer bounds plus every interior layer
/// boundary, lowest first.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreboardConfig {
    /// Stratum this scoreboard discretises.
    pub stratum: Stratum,
    /// X layer boundaries.
    pub x: Vec<f64>,
    /// Y layer boundaries.
    pub y: Vec<f64>,
    /// Z layer boundaries (depth, increasing downwards).
    pub z: Vec<f64>,
    /// Periodic horizontal dimensions. Default: none.
    pub wrap: WrapConfig,
    /// Treatment of out-of-domain lookups. Default: clamp.
    pub lookup_policy: LookupPolicy,
}

impl ScoreboardConfig {
    /// A non-periodic, clamping configuration.
    pub fn new(stratum: Stratum, x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Self {
        Self {
            stratum,
            x,
            y,
            z,
            wrap: WrapConfig::NONE,
            lookup_policy: LookupPolicy::Clamp,
        }
    }

    /// Set the periodic dimensions.
    pub fn with_wrap(mut self, wrap: WrapConfig) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the out-of-domain lookup policy.
    pub fn with_lookup_policy(mut self, policy: LookupPolicy) -> Self {
        self.lookup_policy = policy;
        self
    }

    /// Boundaries configured for one dimension.
    pub fn boundaries(&self, dimension: Dimension) -> &[f64] {
        match dimension {
            Dimension::X => &self.x,
            Dimension::Y => &self.y,
            Dimension::Z => &self.z,
        }
    }

    /// Check that the boundaries form a valid grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build_grid().map(|_| ())
    }

    /// Build the box grid this configuration describes.
    pub fn build_grid(&self) -> Result<BoxGrid, ConfigError> {
        let axis = |dimension: Dimension| {
            BoundaryArray::new(dimension, self.boundaries(dimension).to_vec())
                .map(|b| b.with_policy(self.lookup_policy))
        };
        let build = || -> Result<BoxGrid, GridError> {
            BoxGrid::new(
                axis(Dimension::X)?,
                axis(Dimension::Y)?,
                axis(Dimension::Z)?,
                self.wrap,
            )
        };
        build().map_err(|source| {
            warn!(stratum = %self.stratum, error = %source, "rejected scoreboard boundaries");
            ConfigError::Grid {
                stratum: self.stratum,
                source,
            }
        })
    }
}

/// Validate a multi-stratum layout.
///
/// Requires at least one configuration, no stratum named twice, every
/// grid valid, and X/Y boundaries identical across strata.
pub fn validate_set(configs: &[ScoreboardConfig]) -> Result<(), ConfigError> {
    let first = configs.first().ok_or(ConfigError::NoStrata)?;
    for (i, config) in configs.iter().enumerate() {
        config.validate()?;
        if configs[..i].iter().any(|c| c.stratum == config.stratum) {
            warn!(stratum = %config.stratum, "stratum configured twice");
            return Err(ConfigError::DuplicateStratum(config.stratum));
        }
        for dimension in [Dimension::X, Dimension::Y] {
            if config.boundaries(dimension) != first.boundaries(dimension) {
                warn!(
                    stratum = %config.stratum,
                    reference = %first.stratum,
                    dimension = %dimension,
                    "horizontal boundaries differ across strata"
                );
                return Err(ConfigError::HorizontalMismatch {
                    stratum: config.stratum,
                    reference: first.stratum,
                    dimension,
                });
            }
        }
    }
    Ok(())
}
