//! Field metadata consumed by the synthesizer.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Maximum number of values a field instance may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// No upper bound, written as `-1` in field storage settings
    Unlimited,
    /// At most this many values (always at least one)
    Limited(u32),
}

impl Cardinality {
    /// Raw value used by field storage for "unlimited".
    pub const UNLIMITED: i64 = -1;
}

impl TryFrom<i64> for Cardinality {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            Self::UNLIMITED => Ok(Self::Unlimited),
            n if n >= 1 => u32::try_from(n)
                .map(Self::Limited)
                .map_err(|_| Error::ValidationError(format!("cardinality {n} is too large"))),
            n => Err(Error::ValidationError(format!(
                "cardinality must be -1 or a positive number, got {n}"
            ))),
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Unlimited => write!(f, "{}", Self::UNLIMITED),
            Cardinality::Limited(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawFieldDescriptor {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
    cardinality: i64,
    #[serde(default)]
    required: bool,
}

/// One field on a content bundle.
///
/// Fields are private so a descriptor cannot change after it passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    field_type: String,
    cardinality: Cardinality,
    required: bool,
}

impl FieldDescriptor {
    /// Creates a validated field descriptor.
    ///
    /// # Errors
    /// * `Error::ValidationError` if `name` is empty or `cardinality` is neither
    ///   `-1` nor positive
    pub fn new<N: Into<String>, T: Into<String>>(
        name: N,
        field_type: T,
        cardinality: i64,
        required: bool,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::ValidationError("field name must not be empty".to_string()));
        }
        let cardinality = Cardinality::try_from(cardinality).map_err(|e| match e {
            Error::ValidationError(msg) => Error::ValidationError(format!("field '{name}': {msg}")),
            other => other,
        })?;

        Ok(Self { name, field_type: field_type.into(), cardinality, required })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &str {
        &self.field_type
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

impl<'de> Deserialize<'de> for FieldDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawFieldDescriptor::deserialize(deserializer)?;
        Self::new(raw.name, raw.field_type, raw.cardinality, raw.required)
            .map_err(serde::de::Error::custom)
    }
}

/// Parses a list of field descriptors from JSON, falling back to YAML.
///
/// # Errors
/// * `Error::ValidationError` if the content is neither a valid JSON nor YAML list
///   of descriptors
pub fn parse_fields(content: &str) -> Result<Vec<FieldDescriptor>> {
    match serde_json::from_str(content) {
        Ok(fields) => Ok(fields),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ValidationError(format!("Invalid field list: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_display() {
        assert_eq!(Cardinality::Unlimited.to_string(), "-1");
        assert_eq!(Cardinality::Limited(3).to_string(), "3");
    }

    #[test]
    fn test_cardinality_rejects_zero_and_negative() {
        assert!(Cardinality::try_from(0).is_err());
        assert!(Cardinality::try_from(-2).is_err());
        assert_eq!(Cardinality::try_from(-1).unwrap(), Cardinality::Unlimited);
    }
}
