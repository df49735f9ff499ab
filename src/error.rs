//! Errors for observer, atmosphere, time and projection inputs.
//!
//! Every constructor in the crate validates eagerly, so a value that exists is a value
//! the pipeline can use. The `check_*` functions are the shared validators.

use core::fmt;
use core::ops::RangeInclusive;

/// Crate-wide result type.
pub type Result<T> = core::result::Result<T, Error>;

/// Valid geodetic latitudes in degrees.
const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Valid observer longitudes in degrees.
const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Absolute zero in degrees Celsius.
const ABSOLUTE_ZERO: f64 = -273.15;

/// Why an input was rejected.
///
/// A circumpolar day or night is not an error; see [`crate::RiseSetTransit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Latitude outside [−90°, 90°] or not a number.
    InvalidLatitude {
        /// Rejected latitude in degrees.
        value: f64,
    },
    /// Longitude outside [−180°, 180°] or not a number.
    InvalidLongitude {
        /// Rejected longitude in degrees.
        value: f64,
    },
    /// Observer elevation that is not finite.
    InvalidElevation {
        /// Rejected elevation in meters.
        value: f64,
    },
    /// Pressure that is not a positive finite number.
    InvalidPressure {
        /// Rejected pressure in millibars.
        value: f64,
    },
    /// Temperature at or below absolute zero, or not finite.
    InvalidTemperature {
        /// Rejected temperature in degrees Celsius.
        value: f64,
    },
    /// Distance, azimuth or elevation that cannot be projected.
    InvalidProjection {
        /// Which projection input was rejected.
        message: &'static str,
    },
    /// Calendar fields, time corrections or chrono conversions out of range.
    InvalidDateTime {
        /// Which date/time input was rejected.
        message: &'static str,
    },
    /// An intermediate value left its physical domain.
    ComputationError {
        /// What went wrong.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(f, "latitude {value}° is outside [-90°, 90°]")
            }
            Self::InvalidLongitude { value } => {
                write!(f, "longitude {value}° is outside [-180°, 180°]")
            }
            Self::InvalidElevation { value } => write!(f, "elevation {value} m is not finite"),
            Self::InvalidPressure { value } => {
                write!(f, "pressure {value} mbar is not a positive number")
            }
            Self::InvalidTemperature { value } => {
                write!(f, "temperature {value}°C is not above absolute zero")
            }
            Self::InvalidProjection { message } => write!(f, "cannot project point: {message}"),
            Self::InvalidDateTime { message } => write!(f, "bad date/time: {message}"),
            Self::ComputationError { message } => write!(f, "calculation failed: {message}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Rejected latitude.
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Rejected longitude.
    #[must_use]
    pub const fn invalid_longitude(value: f64) -> Self {
        Self::InvalidLongitude { value }
    }

    /// Rejected elevation.
    #[must_use]
    pub const fn invalid_elevation(value: f64) -> Self {
        Self::InvalidElevation { value }
    }

    /// Rejected pressure.
    #[must_use]
    pub const fn invalid_pressure(value: f64) -> Self {
        Self::InvalidPressure { value }
    }

    /// Rejected temperature.
    #[must_use]
    pub const fn invalid_temperature(value: f64) -> Self {
        Self::InvalidTemperature { value }
    }

    /// Rejected projection input.
    #[must_use]
    pub const fn invalid_projection(message: &'static str) -> Self {
        Self::InvalidProjection { message }
    }

    /// Rejected date or time.
    #[must_use]
    pub const fn invalid_datetime(message: &'static str) -> Self {
        Self::InvalidDateTime { message }
    }

    /// Failed calculation.
    #[must_use]
    pub const fn computation_error(message: &'static str) -> Self {
        Self::ComputationError { message }
    }
}

const fn ensure(valid: bool, error: Error) -> Result<()> {
    if valid {
        Ok(())
    } else {
        Err(error)
    }
}

/// Checks a geodetic latitude.
///
/// # Errors
/// `InvalidLatitude` outside [−90°, 90°], including NaN.
pub fn check_latitude(latitude: f64) -> Result<()> {
    ensure(
        LATITUDE_RANGE.contains(&latitude),
        Error::invalid_latitude(latitude),
    )
}

/// Checks an observer longitude.
///
/// # Errors
/// `InvalidLongitude` outside [−180°, 180°], including NaN.
pub fn check_longitude(longitude: f64) -> Result<()> {
    ensure(
        LONGITUDE_RANGE.contains(&longitude),
        Error::invalid_longitude(longitude),
    )
}

/// Checks latitude, then longitude.
///
/// # Errors
/// The first failing check.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    check_latitude(latitude).and_then(|()| check_longitude(longitude))
}

/// Checks an elevation in meters. Any finite value is accepted.
///
/// # Errors
/// `InvalidElevation` for NaN or infinity.
pub const fn check_elevation(elevation: f64) -> Result<()> {
    ensure(elevation.is_finite(), Error::invalid_elevation(elevation))
}

/// Checks an annual mean pressure in millibars.
///
/// # Errors
/// `InvalidPressure` unless finite and positive.
pub const fn check_pressure(pressure: f64) -> Result<()> {
    ensure(
        pressure.is_finite() && pressure > 0.0,
        Error::invalid_pressure(pressure),
    )
}

/// Checks an annual mean temperature in degrees Celsius.
///
/// # Errors
/// `InvalidTemperature` unless finite and above absolute zero.
pub const fn check_temperature(temperature: f64) -> Result<()> {
    ensure(
        temperature.is_finite() && temperature > ABSOLUTE_ZERO,
        Error::invalid_temperature(temperature),
    )
}

/// Checks ΔT or ΔUT1 in seconds.
///
/// # Errors
/// `InvalidDateTime` for NaN or infinity.
pub const fn check_time_correction(seconds: f64) -> Result<()> {
    ensure(
        seconds.is_finite(),
        Error::invalid_datetime("time correction must be finite"),
    )
}
