//! # Solar Almanac
//!
//! Sun position, sunrise/sunset/transit times and local great-circle projection, based on
//! the NREL Solar Position Algorithm.

#![cfg_attr(not(feature = "std"), no_std)]
//!
//! The position pipeline follows Reda & Andreas (2003): heliocentric series for the
//! Earth, nutation, aberration and sidereal time, then observer parallax, atmospheric
//! refraction and azimuth. Stated uncertainty is ±0.0003° for the years −2000 to 6000.
//!
//! ΔT (TT − UT) comes either from the caller or from a quarterly table covering
//! 1973 through 2025; dates outside the table use the nearest entry.
//!
//! ## Features
//!
//! - `std` (default): native floating-point functions
//! - `chrono` (default): `DateTime<Tz>` based API, [`SolarSnapshot`] and time zone lookups
//! - `libm`: pure Rust math for `no_std` targets
//!
//! ```toml
//! # Pure numeric API for embedded targets
//! solar-almanac = { version = "0.1", default-features = false, features = ["libm"] }
//! ```
//!
//! ## Quick Start
//!
//! ### Position at a zoned instant
//! ```rust
//! # #[cfg(feature = "chrono")] {
//! use solar_almanac::{solar_position, time::TimeCorrections};
//! use chrono::DateTime;
//!
//! // Golden, Colorado
//! let datetime = "2003-10-17T12:30:30-07:00".parse::<DateTime<chrono::FixedOffset>>().unwrap();
//! let snapshot = solar_position(
//!     datetime,
//!     39.742476,  // latitude
//!     -105.1786,  // longitude
//!     1830.14,    // elevation (meters)
//!     11.0,       // temperature (°C)
//!     820.0,      // pressure (millibars)
//!     TimeCorrections::new(Some(67.0), 0.0).unwrap(),
//! )
//! .unwrap();
//!
//! let position = snapshot.position();
//! assert!((position.zenith_angle() - 50.111_622).abs() < 1e-5);
//! assert!((position.azimuth() - 194.340_241).abs() < 1e-5);
//! # }
//! ```
//!
//! ### Position from a Julian Day (no chrono)
//! ```rust
//! use solar_almanac::{spa, time::JulianDate, Atmosphere, Observer};
//!
//! // 2026-06-21 10:00:00 UTC in Vienna, ΔT 69 s
//! let jd = JulianDate::from_utc(2026, 6, 21, 10, 0, 0.0, 69.0).unwrap();
//! let observer = Observer::new(48.21, 16.37, 190.0).unwrap();
//! let position = spa::solar_position_from_julian(jd, &observer, Atmosphere::standard()).unwrap();
//!
//! assert!(position.is_sun_up());
//! ```
//!
//! ### Rise, set and transit
//! ```rust
//! use solar_almanac::{spa, Atmosphere, Observer, RiseSetTransit};
//!
//! let observer = Observer::new(48.21, 16.37, 190.0).unwrap();
//! let result =
//!     spa::rise_set_transit_utc(2026, 6, 21, &observer, Atmosphere::standard(), 69.0).unwrap();
//!
//! match result {
//!     RiseSetTransit::RegularDay { sunrise, sunset, .. } => {
//!         println!("Sunrise: {:.4} h UTC", sunrise.time.hours());
//!         println!("Sunset: {:.4} h UTC", sunset.time.hours());
//!     }
//!     RiseSetTransit::Circumpolar(condition) => println!("No sunrise/sunset: {condition:?}"),
//! }
//! ```
//!
//! ## Conventions
//!
//! Azimuths run clockwise from north in `[0°, 360°)`; the astronomers' azimuth of SPA
//! runs from south and is available separately. Zenith angle is measured from
//! straight up, elevation angle from the horizon. Longitudes are positive east.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of mathematical constants in tests
)]

// Public API exports
pub use crate::error::{Error, Result};
pub use crate::geodesy::{project_point, GeoPoint};
pub use crate::math::{normalize_degrees, normalize_signed_degrees};
#[cfg(feature = "chrono")]
pub use crate::snapshot::{
    rise_set_transit_at_local_date, solar_position, SolarSnapshot, TimeZoneLookup,
};
pub use crate::types::{
    Atmosphere, GeocentricPosition, HoursUtc, Observer, PolarCondition, RiseSetTransit,
    SolarPosition, SunEvent, NO_RISE_SET_SENTINEL, STANDARD_REFRACTION, SUN_RADIUS,
};

// Algorithm modules
pub mod geodesy;
pub mod spa;

// Core modules
pub mod error;
pub mod types;

#[cfg(feature = "chrono")]
pub mod snapshot;

// Internal modules
mod math;

// Public modules
pub mod time;
