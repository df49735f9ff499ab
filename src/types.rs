//! Core data types for solar position and rise/set calculations.

use crate::error::{check_coordinates, check_elevation, check_pressure, check_temperature};
use crate::geodesy::GeoPoint;
use crate::math::{acos, cos, degrees_to_radians, floor, radians_to_degrees, sin};
use crate::time::JulianDate;
use crate::{Error, Result};

/// Apparent radius of the sun's disk in degrees.
pub const SUN_RADIUS: f64 = 0.26667;

/// Standard atmospheric refraction at the horizon in degrees.
pub const STANDARD_REFRACTION: f64 = 0.5667;

/// Value reported for every rise/set/transit quantity on circumpolar days.
pub const NO_RISE_SET_SENTINEL: f64 = -99999.0;

/// Observer location on the Earth's surface.
///
/// # Example
/// ```
/// # use solar_almanac::Observer;
/// let golden = Observer::new(39.742476, -105.1786, 1830.14).unwrap();
/// assert_eq!(golden.latitude(), 39.742476);
/// assert!(Observer::new(91.0, 0.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    /// Geodetic latitude in degrees, positive north
    latitude: f64,
    /// Longitude in degrees, positive east of Greenwich
    longitude: f64,
    /// Elevation above sea level in meters
    elevation: f64,
}

impl Observer {
    /// Creates an observer.
    ///
    /// # Errors
    /// Returns `InvalidLatitude`, `InvalidLongitude` or `InvalidElevation` for
    /// out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        check_elevation(elevation)?;
        Ok(Self {
            latitude,
            longitude,
            elevation,
        })
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

    /// Gets the elevation in meters.
    #[must_use]
    pub const fn elevation(&self) -> f64 {
        self.elevation
    }

    /// The observer's horizontal position.
    #[must_use]
    pub fn point(&self) -> GeoPoint {
        GeoPoint::from_validated(self.latitude, self.longitude)
    }
}

/// Atmospheric conditions for refraction correction.
///
/// Refraction lifts the apparent sun by up to ~0.6° near the horizon.
///
/// # Example
/// ```
/// # use solar_almanac::Atmosphere;
/// let standard = Atmosphere::standard();
/// assert_eq!(standard.pressure(), 1013.25);
/// assert_eq!(standard.temperature(), 15.0);
///
/// let golden = Atmosphere::new(820.0, 11.0).unwrap();
/// assert_eq!(golden.refraction(), 0.5667);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    /// Annual average local pressure in millibars (hPa)
    pressure: f64,
    /// Annual average local temperature in degrees Celsius
    temperature: f64,
    /// Refraction at sunrise/sunset in degrees
    refraction: f64,
}

impl Atmosphere {
    /// Creates atmospheric conditions with the standard horizon refraction.
    ///
    /// # Errors
    /// Returns `InvalidPressure` or `InvalidTemperature` for out-of-range values.
    pub fn new(pressure: f64, temperature: f64) -> Result<Self> {
        check_pressure(pressure)?;
        check_temperature(temperature)?;
        Ok(Self {
            pressure,
            temperature,
            refraction: STANDARD_REFRACTION,
        })
    }

    /// Standard sea-level conditions: 1013.25 mbar and 15 °C.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            pressure: 1013.25,
            temperature: 15.0,
            refraction: STANDARD_REFRACTION,
        }
    }

    /// Returns the same conditions with a different horizon refraction in degrees.
    ///
    /// # Errors
    /// Returns `ComputationError` if the refraction is not finite.
    pub fn with_refraction(self, refraction: f64) -> Result<Self> {
        if !refraction.is_finite() {
            return Err(Error::computation_error("refraction must be finite"));
        }
        Ok(Self { refraction, ..self })
    }

    /// Gets the pressure in millibars.
    #[must_use]
    pub const fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Gets the temperature in degrees Celsius.
    #[must_use]
    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Gets the horizon refraction in degrees.
    #[must_use]
    pub const fn refraction(&self) -> f64 {
        self.refraction
    }

    /// Altitude of the sun's center at sunrise and sunset: −(sun radius + refraction).
    #[must_use]
    pub fn rise_set_altitude(&self) -> f64 {
        -(SUN_RADIUS + self.refraction)
    }
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self::standard()
    }
}

/// Location-independent part of the solar position (JD through equation of time).
///
/// All angles are in degrees; `r` is in astronomical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocentricPosition {
    pub(crate) julian_date: JulianDate,
    pub(crate) l: f64,
    pub(crate) b: f64,
    pub(crate) r: f64,
    pub(crate) theta: f64,
    pub(crate) beta: f64,
    pub(crate) delta_psi: f64,
    pub(crate) delta_epsilon: f64,
    pub(crate) epsilon0: f64,
    pub(crate) epsilon: f64,
    pub(crate) delta_tau: f64,
    pub(crate) lambda: f64,
    pub(crate) nu0: f64,
    pub(crate) nu: f64,
    pub(crate) alpha: f64,
    pub(crate) delta: f64,
    pub(crate) equation_of_time: f64,
}

impl GeocentricPosition {
    /// The Julian date this position was computed for.
    #[must_use]
    pub const fn julian_date(&self) -> JulianDate {
        self.julian_date
    }

    /// Earth heliocentric longitude L, in [0, 360).
    #[must_use]
    pub const fn heliocentric_longitude(&self) -> f64 {
        self.l
    }

    /// Earth heliocentric latitude B.
    #[must_use]
    pub const fn heliocentric_latitude(&self) -> f64 {
        self.b
    }

    /// Earth radius vector R in astronomical units.
    #[must_use]
    pub const fn radius_vector(&self) -> f64 {
        self.r
    }

    /// Geocentric longitude Θ.
    #[must_use]
    pub const fn geocentric_longitude(&self) -> f64 {
        self.theta
    }

    /// Geocentric latitude β.
    #[must_use]
    pub const fn geocentric_latitude(&self) -> f64 {
        self.beta
    }

    /// Nutation in longitude Δψ.
    #[must_use]
    pub const fn nutation_longitude(&self) -> f64 {
        self.delta_psi
    }

    /// Nutation in obliquity Δε.
    #[must_use]
    pub const fn nutation_obliquity(&self) -> f64 {
        self.delta_epsilon
    }

    /// Mean obliquity of the ecliptic ε0.
    #[must_use]
    pub const fn mean_obliquity(&self) -> f64 {
        self.epsilon0
    }

    /// True obliquity of the ecliptic ε.
    #[must_use]
    pub const fn true_obliquity(&self) -> f64 {
        self.epsilon
    }

    /// Aberration correction Δτ.
    #[must_use]
    pub const fn aberration_correction(&self) -> f64 {
        self.delta_tau
    }

    /// Apparent sun longitude λ.
    #[must_use]
    pub const fn apparent_longitude(&self) -> f64 {
        self.lambda
    }

    /// Mean sidereal time at Greenwich ν0.
    #[must_use]
    pub const fn mean_sidereal_time(&self) -> f64 {
        self.nu0
    }

    /// Apparent sidereal time at Greenwich ν.
    #[must_use]
    pub const fn apparent_sidereal_time(&self) -> f64 {
        self.nu
    }

    /// Geocentric right ascension α, in [0, 360).
    #[must_use]
    pub const fn right_ascension(&self) -> f64 {
        self.alpha
    }

    /// Geocentric declination δ.
    #[must_use]
    pub const fn declination(&self) -> f64 {
        self.delta
    }

    /// Equation of time in minutes, within [−20, 20].
    #[must_use]
    pub const fn equation_of_time(&self) -> f64 {
        self.equation_of_time
    }
}

/// Complete solar position for one observer and instant.
///
/// Uses two azimuth conventions: astronomers' (0° = south, increasing westward) and
/// navigators' (0° = north, increasing eastward). Zenith and elevation include
/// refraction when the sun is above the rise/set altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    pub(crate) geocentric: GeocentricPosition,
    pub(crate) hour_angle: f64,
    pub(crate) xi: f64,
    pub(crate) delta_alpha: f64,
    pub(crate) alpha_prime: f64,
    pub(crate) delta_prime: f64,
    pub(crate) h_prime: f64,
    pub(crate) e0: f64,
    pub(crate) delta_e: f64,
    pub(crate) e: f64,
    pub(crate) zenith: f64,
    pub(crate) azimuth_astronomical: f64,
    pub(crate) azimuth: f64,
}

impl SolarPosition {
    /// The location-independent intermediate values.
    #[must_use]
    pub const fn geocentric(&self) -> &GeocentricPosition {
        &self.geocentric
    }

    /// Observer local hour angle H, in [0, 360).
    #[must_use]
    pub const fn hour_angle(&self) -> f64 {
        self.hour_angle
    }

    /// Equatorial horizontal parallax of the sun ξ.
    #[must_use]
    pub const fn equatorial_horizontal_parallax(&self) -> f64 {
        self.xi
    }

    /// Parallax in right ascension Δα.
    #[must_use]
    pub const fn parallax_right_ascension(&self) -> f64 {
        self.delta_alpha
    }

    /// Topocentric right ascension α′.
    #[must_use]
    pub const fn topocentric_right_ascension(&self) -> f64 {
        self.alpha_prime
    }

    /// Topocentric declination δ′.
    #[must_use]
    pub const fn topocentric_declination(&self) -> f64 {
        self.delta_prime
    }

    /// Topocentric local hour angle H′.
    #[must_use]
    pub const fn topocentric_hour_angle(&self) -> f64 {
        self.h_prime
    }

    /// Topocentric elevation without refraction e0.
    #[must_use]
    pub const fn elevation_uncorrected(&self) -> f64 {
        self.e0
    }

    /// Refraction correction Δe applied to e0.
    #[must_use]
    pub const fn refraction_correction(&self) -> f64 {
        self.delta_e
    }

    /// Topocentric elevation angle e.
    #[must_use]
    pub const fn elevation_angle(&self) -> f64 {
        self.e
    }

    /// Topocentric zenith angle, 90° − e.
    #[must_use]
    pub const fn zenith_angle(&self) -> f64 {
        self.zenith
    }

    /// Astronomers' azimuth Γ (0° = south, increasing westward).
    #[must_use]
    pub const fn azimuth_astronomical(&self) -> f64 {
        self.azimuth_astronomical
    }

    /// Navigators' azimuth Φ (0° = north, increasing eastward).
    #[must_use]
    pub const fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Equation of time in minutes.
    #[must_use]
    pub const fn equation_of_time(&self) -> f64 {
        self.geocentric.equation_of_time
    }

    /// Checks if the sun is above the horizon.
    #[must_use]
    pub fn is_sun_up(&self) -> bool {
        self.e > 0.0
    }

    /// Angle of incidence on a tilted surface in degrees.
    ///
    /// `slope` is the surface tilt from horizontal; `azimuth_rotation` is the surface
    /// azimuth in the astronomers' convention (0° = facing south, positive westward).
    ///
    /// # Example
    /// ```
    /// # use solar_almanac::{spa, Atmosphere, Observer, time::JulianDate};
    /// let jd = JulianDate::from_utc(2003, 10, 17, 19, 30, 30.0, 67.0).unwrap();
    /// let observer = Observer::new(39.742476, -105.1786, 1830.14).unwrap();
    /// let atmosphere = Atmosphere::new(820.0, 11.0).unwrap();
    /// let position = spa::solar_position_from_julian(jd, &observer, atmosphere).unwrap();
    ///
    /// // a horizontal surface sees the sun at its zenith angle
    /// let flat = position.incidence_angle(0.0, 0.0);
    /// assert!((flat - position.zenith_angle()).abs() < 1e-9);
    /// ```
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn incidence_angle(&self, slope: f64, azimuth_rotation: f64) -> f64 {
        let zenith = degrees_to_radians(self.zenith);
        let slope = degrees_to_radians(slope);
        let relative_azimuth = degrees_to_radians(self.azimuth_astronomical - azimuth_rotation);

        let cos_incidence =
            cos(zenith) * cos(slope) + sin(slope) * sin(zenith) * cos(relative_azimuth);
        radians_to_degrees(acos(cos_incidence.clamp(-1.0, 1.0)))
    }
}

/// Hours since midnight UTC that can extend beyond a single day.
///
/// Used for rise/set times without the chrono dependency. Negative values fall on the
/// previous day, values of 24 or more on the next.
///
/// # Example
/// ```
/// # use solar_almanac::HoursUtc;
/// // 90 minutes past midnight of the following day
/// let (days, hours) = HoursUtc::from_hours(25.5).day_and_hours();
/// assert_eq!((days, hours), (1, 1.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoursUtc(f64);

impl HoursUtc {
    /// Wraps hours since 0 UT of the base date.
    #[must_use]
    pub const fn from_hours(hours: f64) -> Self {
        Self(hours)
    }

    /// Hours as given, possibly outside `[0, 24)`.
    #[must_use]
    pub const fn hours(&self) -> f64 {
        self.0
    }

    /// Splits into whole days relative to the base date and hours in `[0, 24)`.
    ///
    /// Non-finite values come back unchanged with a zero day offset.
    #[must_use]
    pub fn day_and_hours(&self) -> (i32, f64) {
        if !self.0.is_finite() {
            return (0, self.0);
        }

        let days = floor(self.0 / 24.0);
        let within = self.0 - days * 24.0;
        // division rounding can push the remainder just outside [0, 24)
        let (days, within) = if within >= 24.0 {
            (days + 1.0, within - 24.0)
        } else if within < 0.0 {
            (days - 1.0, within + 24.0)
        } else {
            (days, within)
        };

        let days = days.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32;
        (days, within)
    }
}

/// Which circumpolar condition prevented rise and set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolarCondition {
    /// The sun stays above the rise/set altitude all day.
    PolarDay,
    /// The sun stays below the rise/set altitude all day.
    PolarNight,
}

/// One rise, transit or set event: its time and the topocentric local hour angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunEvent<T> {
    /// When the event happens
    pub time: T,
    /// Local hour angle of the sun at the event, in [−180, 180] degrees
    pub hour_angle: f64,
}

/// Sunrise, transit and sunset for one day.
///
/// Circumpolar days carry no partial results: every accessor reports the absence
/// uniformly (`None` for times, [`NO_RISE_SET_SENTINEL`] for angles).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiseSetTransit<T> {
    /// The sun crosses the rise/set altitude twice.
    RegularDay {
        /// Sunrise
        sunrise: SunEvent<T>,
        /// Solar transit (local solar noon)
        transit: SunEvent<T>,
        /// Sunset
        sunset: SunEvent<T>,
        /// Sun altitude at transit in degrees
        transit_altitude: f64,
    },
    /// The sun never reaches the rise/set altitude on this day.
    Circumpolar(PolarCondition),
}

impl<T> RiseSetTransit<T> {
    /// Checks if this is a regular day with sunrise and sunset.
    pub const fn is_regular_day(&self) -> bool {
        matches!(self, Self::RegularDay { .. })
    }

    /// Checks if the sun neither rises nor sets on this day.
    pub const fn is_circumpolar(&self) -> bool {
        matches!(self, Self::Circumpolar(_))
    }

    /// The circumpolar condition, if any.
    pub const fn polar_condition(&self) -> Option<PolarCondition> {
        match self {
            Self::Circumpolar(condition) => Some(*condition),
            Self::RegularDay { .. } => None,
        }
    }

    /// Sunrise time.
    pub const fn sunrise(&self) -> Option<&T> {
        match self {
            Self::RegularDay { sunrise, .. } => Some(&sunrise.time),
            Self::Circumpolar(_) => None,
        }
    }

    /// Transit time.
    pub const fn transit(&self) -> Option<&T> {
        match self {
            Self::RegularDay { transit, .. } => Some(&transit.time),
            Self::Circumpolar(_) => None,
        }
    }

    /// Sunset time.
    pub const fn sunset(&self) -> Option<&T> {
        match self {
            Self::RegularDay { sunset, .. } => Some(&sunset.time),
            Self::Circumpolar(_) => None,
        }
    }

    /// Local hour angle at sunrise, or the sentinel.
    pub const fn sunrise_hour_angle(&self) -> f64 {
        match self {
            Self::RegularDay { sunrise, .. } => sunrise.hour_angle,
            Self::Circumpolar(_) => NO_RISE_SET_SENTINEL,
        }
    }

    /// Local hour angle at transit, or the sentinel.
    pub const fn transit_hour_angle(&self) -> f64 {
        match self {
            Self::RegularDay { transit, .. } => transit.hour_angle,
            Self::Circumpolar(_) => NO_RISE_SET_SENTINEL,
        }
    }

    /// Local hour angle at sunset, or the sentinel.
    pub const fn sunset_hour_angle(&self) -> f64 {
        match self {
            Self::RegularDay { sunset, .. } => sunset.hour_angle,
            Self::Circumpolar(_) => NO_RISE_SET_SENTINEL,
        }
    }

    /// Sun altitude at transit, or the sentinel.
    pub const fn transit_altitude(&self) -> f64 {
        match self {
            Self::RegularDay {
                transit_altitude, ..
            } => *transit_altitude,
            Self::Circumpolar(_) => NO_RISE_SET_SENTINEL,
        }
    }

    /// Converts every event time, keeping hour angles and altitude.
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> RiseSetTransit<U> {
        match self {
            Self::RegularDay {
                sunrise,
                transit,
                sunset,
                transit_altitude,
            } => RiseSetTransit::RegularDay {
                sunrise: SunEvent {
                    time: f(sunrise.time),
                    hour_angle: sunrise.hour_angle,
                },
                transit: SunEvent {
                    time: f(transit.time),
                    hour_angle: transit.hour_angle,
                },
                sunset: SunEvent {
                    time: f(sunset.time),
                    hour_angle: sunset.hour_angle,
                },
                transit_altitude,
            },
            Self::Circumpolar(condition) => RiseSetTransit::Circumpolar(condition),
        }
    }
}

impl RiseSetTransit<HoursUtc> {
    /// Sunrise in hours since 0 UT, or the sentinel.
    #[must_use]
    pub fn sunrise_hours(&self) -> f64 {
        self.sunrise().map_or(NO_RISE_SET_SENTINEL, HoursUtc::hours)
    }

    /// Transit in hours since 0 UT, or the sentinel.
    #[must_use]
    pub fn transit_hours(&self) -> f64 {
        self.transit().map_or(NO_RISE_SET_SENTINEL, HoursUtc::hours)
    }

    /// Sunset in hours since 0 UT, or the sentinel.
    #[must_use]
    pub fn sunset_hours(&self) -> f64 {
        self.sunset().map_or(NO_RISE_SET_SENTINEL, HoursUtc::hours)
    }
}
