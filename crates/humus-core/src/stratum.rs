//! Vertically stacked strata of the simulated domain.

use std::fmt;
use std::str::FromStr;

/// A named layer of the simulated domain with its own scoreboard.
///
/// Strata share the same horizontal (X/Y) extent and are stacked along
/// Z in declaration order: air above litter above soil.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stratum {
    /// Above-ground air column.
    Air,
    /// Surface litter layer.
    Litter,
    /// The soil volume proper.
    Soil,
}

impl Stratum {
    /// Every stratum, top to bottom.
    pub const ALL: [Stratum; 3] = [Stratum::Air, Stratum::Litter, Stratum::Soil];

    /// Lower-case name used in configuration and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Litter => "litter",
            Self::Soil => "soil",
        }
    }
}

impl fmt::Display for Stratum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing an unknown stratum name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownStratum(pub String);

impl fmt::Display for UnknownStratum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown stratum '{}'", self.0)
    }
}

impl std::error::Error for UnknownStratum {}

impl FromStr for Stratum {
    type Err = UnknownStratum;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stratum| stratum.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownStratum(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for stratum in Stratum::ALL {
            assert_eq!(stratum.name().parse::<Stratum>(), Ok(stratum));
        }
        assert_eq!("SOIL".parse::<Stratum>(), Ok(Stratum::Soil));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "bedrock".parse::<Stratum>().unwrap_err();
        assert_eq!(err, UnknownStratum("bedrock".into()));
    }
}
