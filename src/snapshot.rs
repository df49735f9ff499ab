//! Solar position snapshots: one observer, one instant, every derived quantity.
//!
//! A [`SolarSnapshot`] keeps its inputs next to the computed [`SolarPosition`] so it can
//! be shifted by whole days or asked for the day's rise/set/transit without repeating
//! them.

use crate::geodesy::GeoPoint;
use crate::spa;
use crate::time::{JulianDate, TimeCorrections};
use crate::types::{RiseSetTransit, SolarPosition};
use crate::{Atmosphere, Error, Observer, Result};
use chrono::{DateTime, Days, NaiveDate, TimeZone};

/// Immutable solar position for one observer at one instant.
///
/// # Example
/// ```
/// use solar_almanac::{time::TimeCorrections, Atmosphere, Observer, SolarSnapshot};
/// use chrono::{DateTime, FixedOffset};
///
/// let datetime = "2003-10-17T12:30:30-07:00".parse::<DateTime<FixedOffset>>().unwrap();
/// let snapshot = SolarSnapshot::new(
///     datetime,
///     Observer::new(39.742476, -105.1786, 1830.14).unwrap(),
///     Atmosphere::new(820.0, 11.0).unwrap(),
///     TimeCorrections::new(Some(67.0), 0.0).unwrap(),
/// )
/// .unwrap();
///
/// assert!((snapshot.position().elevation_angle() - 39.888378).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SolarSnapshot<Tz: TimeZone> {
    datetime: DateTime<Tz>,
    observer: Observer,
    atmosphere: Atmosphere,
    corrections: TimeCorrections,
    position: SolarPosition,
}

impl<Tz: TimeZone> SolarSnapshot<Tz> {
    /// Computes the full solar position for `datetime`.
    ///
    /// # Errors
    /// Returns error if the datetime cannot be converted to a Julian date.
    pub fn new(
        datetime: DateTime<Tz>,
        observer: Observer,
        atmosphere: Atmosphere,
        corrections: TimeCorrections,
    ) -> Result<Self> {
        let position = spa::solar_position(&datetime, &observer, atmosphere, corrections)?;
        Ok(Self {
            datetime,
            observer,
            atmosphere,
            corrections,
            position,
        })
    }

    /// The instant this snapshot was computed for.
    #[must_use]
    pub const fn datetime(&self) -> &DateTime<Tz> {
        &self.datetime
    }

    /// The observer.
    #[must_use]
    pub const fn observer(&self) -> &Observer {
        &self.observer
    }

    /// The atmospheric conditions.
    #[must_use]
    pub const fn atmosphere(&self) -> Atmosphere {
        self.atmosphere
    }

    /// The time corrections.
    #[must_use]
    pub const fn corrections(&self) -> TimeCorrections {
        self.corrections
    }

    /// The computed solar position.
    #[must_use]
    pub const fn position(&self) -> &SolarPosition {
        &self.position
    }

    /// The Julian date the position was computed for, with ΔT and ΔUT1 applied.
    #[must_use]
    pub const fn julian_date(&self) -> JulianDate {
        self.position.geocentric.julian_date
    }

    /// A new snapshot `days` calendar days later (or earlier when negative), keeping the
    /// local wall-clock time.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the shifted date is out of range or does not exist
    /// in the zone.
    pub fn plus_days(&self, days: i64) -> Result<Self> {
        let step = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.datetime.clone().checked_add_days(step)
        } else {
            self.datetime.clone().checked_sub_days(step)
        }
        .ok_or(Error::invalid_datetime("shifted date is out of range"))?;

        Self::new(shifted, self.observer, self.atmosphere, self.corrections)
    }

    /// Sunrise, transit and sunset on the snapshot's local calendar date.
    ///
    /// # Errors
    /// Returns error if ΔT cannot be resolved or an event time is out of range.
    pub fn rise_set_transit(&self) -> Result<RiseSetTransit<DateTime<Tz>>> {
        spa::rise_set_transit(
            &self.datetime,
            &self.observer,
            self.atmosphere,
            self.corrections,
        )
    }
}

/// Builds a [`SolarSnapshot`] from plain values.
///
/// `temperature` is in °C, `pressure` in millibars, `elevation` in meters.
///
/// # Errors
/// Returns an invalid-input error for out-of-range coordinates, non-finite values,
/// non-positive pressure or temperatures at or below absolute zero.
///
/// # Example
/// ```
/// use solar_almanac::{solar_position, time::TimeCorrections};
/// use chrono::{TimeZone, Utc};
///
/// let datetime = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
/// let snapshot = solar_position(
///     datetime, 48.21, 16.37, 190.0, 25.0, 1013.25, TimeCorrections::from_table(),
/// )
/// .unwrap();
/// assert!(snapshot.position().is_sun_up());
/// ```
#[allow(clippy::too_many_arguments)]
pub fn solar_position<Tz: TimeZone>(
    datetime: DateTime<Tz>,
    latitude: f64,
    longitude: f64,
    elevation: f64,
    temperature: f64,
    pressure: f64,
    corrections: TimeCorrections,
) -> Result<SolarSnapshot<Tz>> {
    let observer = Observer::new(latitude, longitude, elevation)?;
    let atmosphere = Atmosphere::new(pressure, temperature)?;
    SolarSnapshot::new(datetime, observer, atmosphere, corrections)
}

/// Resolves the time zone in effect at a location.
///
/// Any `Fn(GeoPoint) -> Option<Tz>` is a lookup, so a fixed zone is just a closure.
pub trait TimeZoneLookup {
    /// The zone type returned.
    type Zone: TimeZone;

    /// The zone at `point`, or `None` if unknown.
    fn zone_at(&self, point: GeoPoint) -> Option<Self::Zone>;
}

impl<F, Z> TimeZoneLookup for F
where
    F: Fn(GeoPoint) -> Option<Z>,
    Z: TimeZone,
{
    type Zone = Z;

    fn zone_at(&self, point: GeoPoint) -> Option<Z> {
        self(point)
    }
}

/// Sunrise, transit and sunset on a local calendar date, in the observer's own zone.
///
/// # Errors
/// Returns `InvalidDateTime` if the lookup knows no zone for the observer, plus the
/// errors of [`spa::rise_set_transit_for_date`].
///
/// # Example
/// ```
/// use solar_almanac::{
///     rise_set_transit_at_local_date, time::TimeCorrections, Atmosphere, GeoPoint, Observer,
/// };
/// use chrono::{FixedOffset, NaiveDate};
///
/// let denver = |_: GeoPoint| FixedOffset::west_opt(7 * 3600);
/// let result = rise_set_transit_at_local_date(
///     &denver,
///     NaiveDate::from_ymd_opt(2003, 10, 17).unwrap(),
///     &Observer::new(39.742476, -105.1786, 1830.14).unwrap(),
///     Atmosphere::standard(),
///     TimeCorrections::new(Some(67.0), 0.0).unwrap(),
/// )
/// .unwrap();
/// assert!(result.is_regular_day());
/// ```
pub fn rise_set_transit_at_local_date<L: TimeZoneLookup>(
    lookup: &L,
    date: NaiveDate,
    observer: &Observer,
    atmosphere: Atmosphere,
    corrections: TimeCorrections,
) -> Result<RiseSetTransit<DateTime<L::Zone>>> {
    let zone = lookup
        .zone_at(observer.point())
        .ok_or(Error::invalid_datetime("no time zone known for location"))?;
    spa::rise_set_transit_for_date(date, &zone, observer, atmosphere, corrections)
}
