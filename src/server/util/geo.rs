//! Spherical distance helpers for the tour location endpoints.

use std::str::FromStr;

use crate::server::error::AppError;

/// Earth radius in miles, used to convert search distances to radians.
pub const EARTH_RADIUS_MI: f64 = 3963.2;
/// Earth radius in kilometres, used to convert search distances to radians.
pub const EARTH_RADIUS_KM: f64 = 6378.1;
/// Earth radius in metres, used for point-to-point distances.
pub const EARTH_RADIUS_M: f64 = 6_378_100.0;

const METERS_TO_MILES: f64 = 0.000621371;
const METERS_TO_KILOMETERS: f64 = 0.001;

const LATLNG_FORMAT_MESSAGE: &str = "Please provide latitude and longitude in the format lat,lng.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl FromStr for LatLng {
    type Err = AppError;

    /// Parses `lat,lng`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::BadRequest(LATLNG_FORMAT_MESSAGE.to_string());

        let (lat, lng) = value.split_once(',').ok_or_else(invalid)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(invalid());
        }

        Ok(Self { lat, lng })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Miles,
    Kilometers,
}

impl DistanceUnit {
    /// Converts a search distance in this unit to radians on the earth's surface.
    pub fn to_radians(self, distance: f64) -> f64 {
        match self {
            Self::Miles => distance / EARTH_RADIUS_MI,
            Self::Kilometers => distance / EARTH_RADIUS_KM,
        }
    }

    /// Converts metres into this unit.
    pub fn from_meters(self, meters: f64) -> f64 {
        match self {
            Self::Miles => meters * METERS_TO_MILES,
            Self::Kilometers => meters * METERS_TO_KILOMETERS,
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "mi" => Ok(Self::Miles),
            "km" => Ok(Self::Kilometers),
            other => Err(AppError::BadRequest(format!(
                "Invalid unit: {}. Please use mi or km.",
                other
            ))),
        }
    }
}

/// Central angle between two points in radians (haversine).
pub fn central_angle(a: LatLng, b: LatLng) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = lat2 - lat1;
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin()
}

/// Distance between two points in metres.
pub fn distance_meters(a: LatLng, b: LatLng) -> f64 {
    central_angle(a, b) * EARTH_RADIUS_M
}
