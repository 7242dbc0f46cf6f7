//! Error types for core value validation.

use std::error::Error;
use std::fmt;

/// Errors from [`CharacteristicDescriptor::validate`](crate::CharacteristicDescriptor::validate).
#[derive(Clone, Debug, PartialEq)]
pub enum DescriptorError {
    /// The descriptor name is empty or whitespace.
    EmptyName,
    /// The default is not finite, or a bound is NaN.
    NonFinite {
        /// Name of the offending characteristic.
        name: String,
    },
    /// `minimum > maximum`.
    InvertedRange {
        /// Name of the offending characteristic.
        name: String,
        /// Declared minimum.
        minimum: f64,
        /// Declared maximum.
        maximum: f64,
    },
    /// The default lies outside `[minimum, maximum]`.
    DefaultOutOfRange {
        /// Name of the offending characteristic.
        name: String,
        /// Declared default.
        default: f64,
        /// Declared minimum.
        minimum: f64,
        /// Declared maximum.
        maximum: f64,
    },
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "characteristic name is empty"),
            Self::NonFinite { name } => {
                write!(f, "characteristic '{name}' has a non-finite default or NaN bound")
            }
            Self::InvertedRange {
                name,
                minimum,
                maximum,
            } => write!(
                f,
                "characteristic '{name}' has minimum {minimum} above maximum {maximum}"
            ),
            Self::DefaultOutOfRange {
                name,
                default,
                minimum,
                maximum,
            } => write!(
                f,
                "characteristic '{name}' default {default} outside [{minimum}, {maximum}]"
            ),
        }
    }
}

impl Error for DescriptorError {}
