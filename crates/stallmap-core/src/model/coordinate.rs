use serde::{Deserialize, Serialize};

use crate::errors::{InvalidCoordinate, StallError};
use crate::rules::validation;

/// A validated WGS84 position
///
/// The only constructors run the coordinate validator, so a `Coordinate`
/// value always satisfies latitude in [-90, 90] and longitude in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        validation::validate(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Parse the `latitude,longitude` exchange format
    ///
    /// Surrounding whitespace around the pair and around each number is
    /// ignored. Exactly two comma-separated fields are required.
    pub fn parse_pair(text: &str) -> Result<Self, StallError> {
        let invalid = |reason: &str| StallError::InvalidCoordinatePair {
            input: text.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = text.trim();
        if !trimmed.contains(',') {
            return Err(invalid("expected 'latitude,longitude'"));
        }

        let parts: Vec<&str> = trimmed.split(',').collect();
        if parts.len() != 2 {
            return Err(invalid("expected exactly two comma-separated values"));
        }

        let latitude: f64 = parts[0]
            .trim()
            .parse()
            .map_err(|_| invalid("latitude is not a number"))?;
        let longitude: f64 = parts[1]
            .trim()
            .parse()
            .map_err(|_| invalid("longitude is not a number"))?;

        Ok(Coordinate::new(latitude, longitude)?)
    }

    /// Render in the `latitude,longitude` exchange format (6 decimals)
    pub fn to_pair(&self) -> String {
        format!("{:.6},{:.6}", self.latitude, self.longitude)
    }

    /// Human-readable label, `"lat, lng"` with 6 decimals
    pub fn label(&self) -> String {
        format!("{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_uses_six_decimals() {
        let c = Coordinate::new(39.7035, 141.1438).unwrap();
        assert_eq!(c.label(), "39.703500, 141.143800");
        assert_eq!(c.to_pair(), "39.703500,141.143800");
    }

    #[test]
    fn test_parse_pair_accepts_whitespace() {
        let c = Coordinate::parse_pair("  39.7033 , 141.1436\n").unwrap();
        assert_eq!(c.latitude(), 39.7033);
        assert_eq!(c.longitude(), 141.1436);
    }

    #[test]
    fn test_parse_pair_round_trips_exchange_format() {
        let c = Coordinate::new(-33.868820, 151.209296).unwrap();
        let back = Coordinate::parse_pair(&c.to_pair()).unwrap();
        assert_eq!(back.label(), c.label());
    }

    #[test]
    fn test_parse_pair_rejects_malformed_input() {
        assert!(matches!(
            Coordinate::parse_pair("39.7 141.1"),
            Err(StallError::InvalidCoordinatePair { .. })
        ));
        assert!(matches!(
            Coordinate::parse_pair("1,2,3"),
            Err(StallError::InvalidCoordinatePair { .. })
        ));
        assert!(matches!(
            Coordinate::parse_pair("north,141.1"),
            Err(StallError::InvalidCoordinatePair { .. })
        ));
    }

    #[test]
    fn test_parse_pair_rejects_out_of_range() {
        assert!(matches!(
            Coordinate::parse_pair("95.0,10.0"),
            Err(StallError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Coordinate =
            serde_json::from_str(r#"{"latitude": 10.0, "longitude": 20.0}"#).unwrap();
        assert_eq!(ok.latitude(), 10.0);

        let bad = serde_json::from_str::<Coordinate>(r#"{"latitude": 100.0, "longitude": 20.0}"#);
        assert!(bad.is_err());
    }
}
