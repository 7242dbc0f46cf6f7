//! Characteristic descriptors: schema metadata for per-box scalar fields.

use crate::error::DescriptorError;
use crate::id::CharacteristicId;
use crate::stratum::Stratum;

/// Schema for one named scalar field stored once per box.
///
/// Characteristics are registered once, by the process that owns the
/// field, and are never removed during a run. Registration assigns the
/// next free slot on the target scoreboard and records it in
/// [`index`](Self::index).
#[derive(Clone, Debug, PartialEq)]
pub struct CharacteristicDescriptor {
    /// Slot assigned at registration; `None` until registered.
    pub index: Option<CharacteristicId>,
    /// Unique name, e.g. `"Nitrate Amount"`.
    pub name: String,
    /// Short label for display.
    pub display_name: String,
    /// Unit annotation, e.g. `"ug"`.
    pub units: String,
    /// Lowest meaningful value.
    pub minimum: f64,
    /// Highest meaningful value.
    pub maximum: f64,
    /// Value every box holds after registration or reset.
    pub default: f64,
    /// Stratum whose scoreboard stores this field.
    pub stratum: Stratum,
    /// Shown in summaries and views.
    pub visible: bool,
    /// May be edited interactively.
    pub editable: bool,
    /// Written out when a run is saved.
    pub persisted: bool,
    /// The owning process keeps extra per-box data alongside the scalar.
    pub special_per_box_data: bool,
}

impl CharacteristicDescriptor {
    /// A visible, editable, persisted descriptor with range
    /// `[0, f64::MAX]` and default `0.0`.
    pub fn new(name: impl Into<String>, stratum: Stratum) -> Self {
        let name = name.into();
        Self {
            index: None,
            display_name: name.clone(),
            name,
            units: String::new(),
            minimum: 0.0,
            maximum: f64::MAX,
            default: 0.0,
            stratum,
            visible: true,
            editable: true,
            persisted: true,
            special_per_box_data: false,
        }
    }

    /// Set the unit annotation.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Set the value range.
    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, default: f64) -> Self {
        self.default = default;
        self
    }

    /// Check the numeric metadata is usable.
    ///
    /// Requires a non-empty name, finite default, `minimum <= maximum`,
    /// and `minimum <= default <= maximum`.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.name.trim().is_empty() {
            return Err(DescriptorError::EmptyName);
        }
        if !self.default.is_finite() || self.minimum.is_nan() || self.maximum.is_nan() {
            return Err(DescriptorError::NonFinite {
                name: self.name.clone(),
            });
        }
        if self.minimum > self.maximum {
            return Err(DescriptorError::InvertedRange {
                name: self.name.clone(),
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }
        if self.default < self.minimum || self.default > self.maximum {
            return Err(DescriptorError::DefaultOutOfRange {
                name: self.name.clone(),
                default: self.default,
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }
        Ok(())
    }
}
