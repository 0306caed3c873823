use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinatesRepr")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

// Route files carry either `{"latitude": .., "longitude": ..}` or `[lat, lon]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CoordinatesRepr {
    Object { latitude: f64, longitude: f64 },
    Pair([f64; 2]),
}

#[derive(Debug, PartialEq)]
pub struct InvalidCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "coordinates out of range: latitude {}, longitude {}",
            self.latitude, self.longitude
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(InvalidCoordinates {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl TryFrom<CoordinatesRepr> for Coordinates {
    type Error = InvalidCoordinates;

    fn try_from(repr: CoordinatesRepr) -> Result<Self, Self::Error> {
        match repr {
            CoordinatesRepr::Object {
                latitude,
                longitude,
            } => Coordinates::new(latitude, longitude),
            CoordinatesRepr::Pair([latitude, longitude]) => Coordinates::new(latitude, longitude),
        }
    }
}

impl From<Coordinates> for geo_types::Point<f64> {
    fn from(coordinates: Coordinates) -> Self {
        geo_types::Point::new(coordinates.longitude, coordinates.latitude)
    }
}

impl From<Coordinates> for geo_types::Coord<f64> {
    fn from(coordinates: Coordinates) -> Self {
        geo_types::coord! { x: coordinates.longitude, y: coordinates.latitude }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
