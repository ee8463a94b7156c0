use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::QueryError;

/// Where to look up the weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationQuery {
    /// Free-text place name, e.g. "London" or "Paris,FR".
    Place(String),
    /// Latitude/longitude in decimal degrees.
    Coordinates { lat: f64, lon: f64 },
}

impl LocationQuery {
    pub fn place(name: impl AsRef<str>) -> Result<Self, QueryError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(QueryError::EmptyPlace);
        }
        Ok(LocationQuery::Place(name.to_string()))
    }

    pub fn coordinates(lat: f64, lon: f64) -> Result<Self, QueryError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(QueryError::CoordinatesOutOfRange { lat, lon });
        }
        Ok(LocationQuery::Coordinates { lat, lon })
    }

    pub fn is_place(&self) -> bool {
        matches!(self, LocationQuery::Place(_))
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::Place(name) => f.write_str(name),
            LocationQuery::Coordinates { lat, lon } => write!(f, "{lat},{lon}"),
        }
    }
}

/// Textual condition plus the provider's icon code (e.g. "10d").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// "{place}, {country code}".
    pub location: String,
    pub temperature_c: i32,
    pub feels_like_c: i32,
    pub condition: Condition,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    /// `None` when the provider omits visibility for the station.
    pub visibility_km: Option<i64>,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

/// One 3-hour sample from the provider's forecast list.
#[derive(Debug, Clone, PartialEq)]
pub struct RawForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub temperature_c: f64,
    pub condition: Condition,
}

/// Min/max summary of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub min_temp_c: i32,
    pub max_temp_c: i32,
    /// Condition of the first sample seen for this date.
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub current: CurrentConditions,
    /// Chronological, at most five days, never includes today.
    pub forecast: Vec<DailyForecast>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_is_trimmed() {
        let q = LocationQuery::place("  London ").unwrap();
        assert_eq!(q, LocationQuery::Place("London".into()));
        assert!(q.is_place());
    }

    #[test]
    fn blank_place_rejected() {
        assert_eq!(LocationQuery::place("   ").unwrap_err(), QueryError::EmptyPlace);
    }

    #[test]
    fn coordinates_range_checked() {
        assert!(LocationQuery::coordinates(90.0, -180.0).is_ok());
        assert!(LocationQuery::coordinates(-33.87, 151.21).is_ok());
        assert!(matches!(
            LocationQuery::coordinates(90.5, 0.0),
            Err(QueryError::CoordinatesOutOfRange { .. })
        ));
        assert!(LocationQuery::coordinates(0.0, 180.1).is_err());
        assert!(LocationQuery::coordinates(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn display_forms() {
        let place = LocationQuery::place("Paris,FR").unwrap();
        assert_eq!(place.to_string(), "Paris,FR");

        let coords = LocationQuery::coordinates(51.5, -0.125).unwrap();
        assert_eq!(coords.to_string(), "51.5,-0.125");
        assert!(!coords.is_place());
    }
}
