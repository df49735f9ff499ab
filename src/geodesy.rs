//! Great-circle projection on a locally spherical Earth.
//!
//! The sphere's radius is the WGS84 ellipsoid radius at the origin latitude, optionally
//! raised by an elevation, which keeps short projections within centimeters of the
//! ellipsoidal solution.

#![allow(clippy::suboptimal_flops)]

use crate::error::check_latitude;
use crate::math::{
    asin, atan2, cos, degrees_to_radians, normalize_degrees_0_to_360, normalize_signed_degrees,
    radians_to_degrees, round_to, sin, sqrt,
};
use crate::{Error, Result};

/// WGS84 equatorial radius in meters.
pub const EQUATORIAL_RADIUS: f64 = 6_378_137.0;

/// WGS84 polar radius in meters.
pub const POLAR_RADIUS: f64 = 6_356_752.314_245;

/// Output precision of projected coordinates in degrees (about 0.1 m).
const COORDINATE_PRECISION: f64 = 1e-6;

/// Latitude and longitude in degrees, longitude normalized to (−180, 180].
///
/// # Example
/// ```
/// # use solar_almanac::GeoPoint;
/// let point = GeoPoint::new(10.0, 190.0).unwrap();
/// assert_eq!(point.longitude(), -170.0);
/// assert!(GeoPoint::new(90.5, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Creates a point, wrapping the longitude into (−180, 180].
    ///
    /// # Errors
    /// Returns `InvalidLatitude` outside [−90, 90] and `InvalidLongitude` if the
    /// longitude is not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        check_latitude(latitude)?;
        if !longitude.is_finite() {
            return Err(Error::invalid_longitude(longitude));
        }
        Ok(Self::from_validated(latitude, longitude))
    }

    pub(crate) fn from_validated(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude: normalize_signed_degrees(longitude),
        }
    }

    /// Gets the latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Gets the longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Radius of the WGS84 ellipsoid at a geodetic latitude, in meters.
///
/// # Example
/// ```
/// # use solar_almanac::geodesy::{earth_radius_at, EQUATORIAL_RADIUS, POLAR_RADIUS};
/// assert!((earth_radius_at(0.0) - EQUATORIAL_RADIUS).abs() < 1e-6);
/// assert!((earth_radius_at(90.0) - POLAR_RADIUS).abs() < 1e-6);
/// ```
#[must_use]
pub fn earth_radius_at(latitude: f64) -> f64 {
    let phi = degrees_to_radians(latitude);
    let (a, b) = (EQUATORIAL_RADIUS, POLAR_RADIUS);

    let a_cos = a * cos(phi);
    let b_sin = b * sin(phi);
    let numerator = (a * a_cos) * (a * a_cos) + (b * b_sin) * (b * b_sin);
    let denominator = a_cos * a_cos + b_sin * b_sin;
    sqrt(numerator / denominator)
}

/// Projects a point `distance` meters along the great circle leaving `origin` at
/// `azimuth` degrees (0 = north, clockwise).
///
/// `elevation` raises the sphere above the ellipsoid. The result is rounded to 1e−6°.
///
/// # Errors
/// Returns `InvalidProjection` if the distance, azimuth or elevation is not finite, or
/// if the elevation would put the sphere's radius at or below zero.
///
/// # Example
/// ```
/// # use solar_almanac::{geodesy, GeoPoint};
/// let origin = GeoPoint::new(0.0, 0.0).unwrap();
/// let east = geodesy::project_point(origin, 111_319.49, 90.0, None).unwrap();
/// assert!(east.latitude().abs() < 1e-6);
/// assert!((east.longitude() - 1.0).abs() < 1e-5);
/// ```
pub fn project_point(
    origin: GeoPoint,
    distance: f64,
    azimuth: f64,
    elevation: Option<f64>,
) -> Result<GeoPoint> {
    if !distance.is_finite() {
        return Err(Error::invalid_projection("distance must be finite"));
    }
    if !azimuth.is_finite() {
        return Err(Error::invalid_projection("azimuth must be finite"));
    }
    let radius = sphere_radius(origin.latitude, elevation)?;

    let angular_distance = distance / radius;
    let lat1 = degrees_to_radians(origin.latitude);
    let lon1 = degrees_to_radians(origin.longitude);
    let theta = degrees_to_radians(azimuth);

    let lat2 = asin(
        (sin(lat1) * cos(angular_distance)
            + cos(lat1) * sin(angular_distance) * cos(theta))
        .clamp(-1.0, 1.0),
    );
    let lon2 = lon1
        + atan2(
            sin(theta) * sin(angular_distance) * cos(lat1),
            cos(angular_distance) - sin(lat1) * sin(lat2),
        );

    let latitude = round_to(radians_to_degrees(lat2), COORDINATE_PRECISION);
    let longitude = round_to(
        normalize_signed_degrees(radians_to_degrees(lon2)),
        COORDINATE_PRECISION,
    );
    Ok(GeoPoint::from_validated(latitude.clamp(-90.0, 90.0), longitude))
}

/// Initial great-circle bearing from `from` to `to`, in [0, 360).
#[must_use]
pub fn initial_bearing(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = degrees_to_radians(from.latitude);
    let lat2 = degrees_to_radians(to.latitude);
    let d_lon = degrees_to_radians(to.longitude - from.longitude);

    let y = sin(d_lon) * cos(lat2);
    let x = cos(lat1) * sin(lat2) - sin(lat1) * cos(lat2) * cos(d_lon);
    normalize_degrees_0_to_360(radians_to_degrees(atan2(y, x)))
}

/// Great-circle distance in meters on the sphere [`project_point`] uses for `from`.
///
/// # Errors
/// Returns `InvalidProjection` for a non-finite or too negative elevation.
pub fn distance(from: GeoPoint, to: GeoPoint, elevation: Option<f64>) -> Result<f64> {
    let radius = sphere_radius(from.latitude, elevation)?;

    let lat1 = degrees_to_radians(from.latitude);
    let lat2 = degrees_to_radians(to.latitude);
    let d_lat = lat2 - lat1;
    let d_lon = degrees_to_radians(to.longitude - from.longitude);

    // haversine
    let a = sin(d_lat / 2.0) * sin(d_lat / 2.0)
        + cos(lat1) * cos(lat2) * sin(d_lon / 2.0) * sin(d_lon / 2.0);
    Ok(radius * 2.0 * atan2(sqrt(a), sqrt(1.0 - a)))
}

fn sphere_radius(latitude: f64, elevation: Option<f64>) -> Result<f64> {
    let elevation = elevation.unwrap_or(0.0);
    if !elevation.is_finite() {
        return Err(Error::invalid_projection("elevation must be finite"));
    }
    let radius = earth_radius_at(latitude) + elevation;
    if radius <= 0.0 {
        return Err(Error::invalid_projection("elevation is below the Earth's center"));
    }
    Ok(radius)
}
