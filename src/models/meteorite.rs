use serde::{Deserialize, Deserializer};

use crate::error::{ProcessingError, Result};
use crate::utils::constants::UNKNOWN_MASS_LABEL;
use crate::utils::coordinates::parse_decimal_coordinate;

/// One landing record as published by the dataset endpoint.
///
/// Only the fields the loader stores are kept. Values are held as text
/// exactly as received so they can be written back verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeteoriteRecord {
    pub name: String,

    #[serde(default, deserialize_with = "text_or_number")]
    pub mass: Option<String>,

    #[serde(default, deserialize_with = "text_or_number")]
    pub reclat: Option<String>,

    #[serde(default, deserialize_with = "text_or_number")]
    pub reclong: Option<String>,
}

impl MeteoriteRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mass: None,
            reclat: None,
            reclong: None,
        }
    }

    pub fn with_mass(mut self, mass: impl Into<String>) -> Self {
        self.mass = Some(mass.into());
        self
    }

    pub fn with_coordinates(
        mut self,
        reclat: impl Into<String>,
        reclong: impl Into<String>,
    ) -> Self {
        self.reclat = Some(reclat.into());
        self.reclong = Some(reclong.into());
        self
    }

    /// Raw `(reclat, reclong)` text, or `None` if either is absent.
    pub fn coordinates(&self) -> Option<(&str, &str)> {
        match (&self.reclat, &self.reclong) {
            (Some(lat), Some(lon)) => Some((lat.as_str(), lon.as_str())),
            _ => None,
        }
    }

    /// Parse the coordinates into decimal degrees.
    ///
    /// Returns `Ok(None)` when a coordinate is missing and an error when one
    /// is present but not numeric. Non-finite values parse successfully.
    pub fn parsed_coordinates(&self) -> Result<Option<(f64, f64)>> {
        let Some((lat, lon)) = self.coordinates() else {
            return Ok(None);
        };

        let latitude = parse_decimal_coordinate(lat).ok_or_else(|| self.invalid("reclat", lat))?;
        let longitude =
            parse_decimal_coordinate(lon).ok_or_else(|| self.invalid("reclong", lon))?;

        Ok(Some((latitude, longitude)))
    }

    /// Build the row stored for this record once its coordinates are known.
    pub fn to_row(&self) -> Option<RegionRow> {
        let (reclat, reclong) = self.coordinates()?;
        Some(RegionRow {
            name: self.name.clone(),
            mass: self.mass.clone(),
            reclat: reclat.to_string(),
            reclong: reclong.to_string(),
        })
    }

    fn invalid(&self, field: &'static str, value: &str) -> ProcessingError {
        ProcessingError::InvalidCoordinate {
            name: self.name.clone(),
            field,
            value: value.to_string(),
        }
    }
}

/// A persisted `(name, mass, reclat, reclong)` tuple.
///
/// `mass` is `None` when the source record carried no mass; it is stored
/// as SQL `NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRow {
    pub name: String,
    pub mass: Option<String>,
    pub reclat: String,
    pub reclong: String,
}

impl RegionRow {
    pub fn mass_or_unknown(&self) -> &str {
        self.mass.as_deref().unwrap_or(UNKNOWN_MASS_LABEL)
    }
}

/// Accept a JSON string or number, keeping its text form.
fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }),
    )
}
