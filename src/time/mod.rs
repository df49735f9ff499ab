//! Time-scale conversions for solar positioning.
//!
//! Calendar dates are turned into Julian Days (JD) with the Meeus algorithm used by
//! NREL SPA, then into the ephemeris scales (JDE, JCE, JME) using ΔT. ΔT comes either
//! from the caller or from the quarterly table in [`delta_t`].

#![allow(clippy::many_single_char_names)]

pub mod delta_t;

pub use delta_t::DeltaT;

use crate::error::check_time_correction;
use crate::math::trunc;
use crate::{Error, Result};
#[cfg(feature = "chrono")]
use chrono::{Datelike, TimeZone, Timelike};

/// Seconds per day (86,400)
pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Day Number for J2000.0 epoch (2000-01-01 12:00:00 TT)
const J2000_JDN: f64 = 2_451_545.0;

/// Last Julian Day before the Gregorian calendar correction applies.
const GREGORIAN_THRESHOLD_JD: f64 = 2_299_160.0;

/// Divisor used to turn days since J2000.0 into Julian centuries.
///
/// SPA divides by 36525 for both the mean and the ephemeris century. Some historical
/// tables divide the mean century by 35625 instead; that value is kept only so such
/// output can be reproduced and should not be used for new work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CenturyDivisor {
    /// 36525 days per Julian century.
    #[default]
    Standard,
    /// 35625 days, as found in some legacy tables.
    Legacy,
}

impl CenturyDivisor {
    /// Days per century for this divisor.
    #[must_use]
    pub const fn days(self) -> f64 {
        match self {
            Self::Standard => 36_525.0,
            Self::Legacy => 35_625.0,
        }
    }
}

/// Caller-supplied time-scale corrections.
///
/// `delta_t` overrides the ΔT table (TT − UT1, seconds); `delta_ut1` (UT1 − UTC,
/// seconds) is added to the civil time before conversion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeCorrections {
    delta_t: Option<f64>,
    delta_ut1: f64,
}

impl TimeCorrections {
    /// ΔT from the built-in table and ΔUT1 = 0.
    #[must_use]
    pub const fn from_table() -> Self {
        Self {
            delta_t: None,
            delta_ut1: 0.0,
        }
    }

    /// Creates corrections with an optional ΔT override and a ΔUT1 value.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if either value is not finite.
    ///
    /// # Example
    /// ```
    /// # use solar_almanac::time::TimeCorrections;
    /// let corrections = TimeCorrections::new(Some(67.0), 0.0).unwrap();
    /// assert_eq!(corrections.delta_t(), Some(67.0));
    /// ```
    pub fn new(delta_t: Option<f64>, delta_ut1: f64) -> Result<Self> {
        if let Some(value) = delta_t {
            check_time_correction(value)?;
        }
        check_time_correction(delta_ut1)?;
        Ok(Self { delta_t, delta_ut1 })
    }

    /// The ΔT override in seconds, if any.
    #[must_use]
    pub const fn delta_t(&self) -> Option<f64> {
        self.delta_t
    }

    /// ΔUT1 in seconds.
    #[must_use]
    pub const fn delta_ut1(&self) -> f64 {
        self.delta_ut1
    }

    /// Resolves ΔT for a calendar date: the override if present, otherwise the table.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` for an invalid calendar date.
    pub fn resolve_delta_t(&self, year: i32, month: u32, day: u32) -> Result<f64> {
        self.delta_t
            .map_or_else(|| DeltaT::for_calendar_date(year, month, day), Ok)
    }
}

/// An instant on the Julian Day scale together with the ΔT that applies to it.
///
/// The day number counts UT1. The ephemeris scales (JDE, JCE, JME) are derived on
/// demand by adding ΔT.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JulianDate {
    jd: f64,
    /// TT − UT1 in seconds.
    delta_t: f64,
}

impl JulianDate {
    /// Converts any zoned chrono `DateTime`. Only the instant matters, not the zone.
    ///
    /// A leap second is folded into the preceding second.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the year cannot be represented or `delta_t` is not
    /// finite.
    #[cfg(feature = "chrono")]
    pub fn from_datetime<Tz: TimeZone>(
        datetime: &chrono::DateTime<Tz>,
        delta_t: f64,
    ) -> Result<Self> {
        let utc = datetime.naive_utc();
        let nanos = utc.nanosecond().min(999_999_999);
        let second = f64::from(utc.second()) + f64::from(nanos) * 1e-9;
        Self::from_utc(
            utc.year(),
            utc.month(),
            utc.day(),
            utc.hour(),
            utc.minute(),
            second,
            delta_t,
        )
    }

    /// Builds the date from UTC calendar fields.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` when a field is out of range (see
    /// [`JulianDate::from_local`]) or `delta_t` is not finite.
    ///
    /// # Example
    /// ```
    /// # use solar_almanac::time::JulianDate;
    /// let jd = JulianDate::from_utc(2003, 10, 17, 19, 30, 30.0, 67.0).unwrap();
    /// assert!((jd.julian_date() - 2_452_930.312_847).abs() < 1e-6);
    /// ```
    pub fn from_utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
        delta_t: f64,
    ) -> Result<Self> {
        Self::from_local(year, month, day, hour, minute, second, 0.0, delta_t)
    }

    /// Builds the date from wall-clock fields and their offset from UTC in minutes,
    /// positive east of Greenwich (−420 for UTC−7).
    ///
    /// The day must exist in its month, the ten days dropped by the Gregorian reform in
    /// October 1582 are rejected, and the second must lie in `[0, 60)`.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` for any field out of range, or a non-finite offset or
    /// `delta_t`.
    ///
    /// # Example
    /// ```
    /// # use solar_almanac::time::JulianDate;
    /// let local = JulianDate::from_local(2003, 10, 17, 12, 30, 30.0, -420.0, 67.0).unwrap();
    /// let utc = JulianDate::from_utc(2003, 10, 17, 19, 30, 30.0, 67.0).unwrap();
    /// assert!((local.julian_date() - utc.julian_date()).abs() < 1e-9);
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn from_local(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
        utc_offset_minutes: f64,
        delta_t: f64,
    ) -> Result<Self> {
        validate_calendar_fields(year, month, day, hour, minute, second)?;
        check_time_correction(delta_t)?;
        if !utc_offset_minutes.is_finite() {
            return Err(Error::invalid_datetime("UTC offset must be finite"));
        }

        let day_fraction = (f64::from(hour) + (f64::from(minute) + second / 60.0) / 60.0) / 24.0;
        let day = f64::from(day) + day_fraction - utc_offset_minutes / 1440.0;
        Ok(Self {
            jd: meeus_julian_day(year, month, day),
            delta_t,
        })
    }

    /// Wraps an existing Julian Day number.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if either value is not finite.
    pub fn from_julian_day(jd: f64, delta_t: f64) -> Result<Self> {
        if !jd.is_finite() {
            return Err(Error::invalid_datetime("Julian day must be finite"));
        }
        check_time_correction(delta_t)?;
        Ok(Self { jd, delta_t })
    }

    /// Moves a UTC-based date onto UT1 by adding ΔUT1 (UT1 − UTC, seconds).
    #[must_use]
    pub const fn with_delta_ut1(self, delta_ut1: f64) -> Self {
        self.add_days(delta_ut1 / SECONDS_PER_DAY)
    }

    /// Same instant, different ΔT.
    #[must_use]
    pub const fn with_delta_t(self, delta_t: f64) -> Self {
        Self { delta_t, ..self }
    }

    /// Julian Day (UT1).
    #[must_use]
    pub const fn julian_date(&self) -> f64 {
        self.jd
    }

    /// ΔT in seconds.
    #[must_use]
    pub const fn delta_t(&self) -> f64 {
        self.delta_t
    }

    /// JDE = JD + ΔT / 86400
    #[must_use]
    pub const fn julian_ephemeris_day(&self) -> f64 {
        self.jd + self.delta_t / SECONDS_PER_DAY
    }

    /// JC = (JD − 2451545) / 36525
    #[must_use]
    pub const fn julian_century(&self) -> f64 {
        self.julian_century_with(CenturyDivisor::Standard)
    }

    /// JC with a selectable divisor.
    #[must_use]
    pub const fn julian_century_with(&self, divisor: CenturyDivisor) -> f64 {
        (self.jd - J2000_JDN) / divisor.days()
    }

    /// JCE = (JDE − 2451545) / 36525
    #[must_use]
    pub const fn julian_ephemeris_century(&self) -> f64 {
        (self.julian_ephemeris_day() - J2000_JDN) / CenturyDivisor::Standard.days()
    }

    /// JME = JCE / 10
    #[must_use]
    pub const fn julian_ephemeris_millennium(&self) -> f64 {
        self.julian_ephemeris_century() / 10.0
    }

    /// Shifts the date by a (possibly fractional) number of days, keeping ΔT.
    #[must_use]
    pub const fn add_days(self, days: f64) -> Self {
        Self {
            jd: self.jd + days,
            ..self
        }
    }
}

/// Meeus, "Astronomical Algorithms" ch. 7, with `day` carrying the day fraction.
fn meeus_julian_day(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month < 3 {
        (f64::from(year) - 1.0, f64::from(month) + 12.0)
    } else {
        (f64::from(year), f64::from(month))
    };

    let julian = trunc(365.25 * (y + 4716.0)) + trunc(30.6001 * (m + 1.0)) + day - 1524.5;
    if julian <= GREGORIAN_THRESHOLD_JD {
        return julian;
    }
    let a = trunc(y / 100.0);
    julian + 2.0 - a + trunc(a / 4.0)
}

fn validate_calendar_fields(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: f64,
) -> Result<()> {
    let month_length = days_in_month(year, month)?;
    let gregorian_gap = year == 1582 && month == 10 && (5..=14).contains(&day);
    let checks = [
        ((1..=month_length).contains(&day), "no such day in this month"),
        (!gregorian_gap, "day was skipped by the Gregorian reform"),
        (hour < 24, "hour must be below 24"),
        (minute < 60, "minute must be below 60"),
        ((0.0..60.0).contains(&second), "second must lie in [0, 60)"),
    ];
    match checks.into_iter().find(|&(valid, _)| !valid) {
        Some((_, message)) => Err(Error::invalid_datetime(message)),
        None => Ok(()),
    }
}

/// Julian calendar leap rule up to 1582, Gregorian afterwards.
const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year <= 1582 || year % 100 != 0 || year % 400 == 0)
}

pub(crate) const fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> Result<u32> {
    match month {
        2 => Ok(28 + u32::from(is_leap_year(year))),
        4 | 6 | 9 | 11 => Ok(30),
        1..=12 => Ok(31),
        _ => Err(Error::invalid_datetime("month must lie in 1..=12")),
    }
}

/// Zero-based day of the year (January 1st is 0).
pub(crate) fn ordinal0(year: i32, month: u32, day: u32) -> Result<u32> {
    if !(1..=days_in_month(year, month)?).contains(&day) {
        return Err(Error::invalid_datetime("no such day in this month"));
    }
    let mut before = 0;
    for earlier in 1..month {
        before += days_in_month(year, earlier)?;
    }
    Ok(before + day - 1)
}
