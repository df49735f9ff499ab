//! Quarterly ΔT (TT − UT1) table.
//!
//! Each entry covers one quarter of a year, starting at 1973.00. Values up to 2018.75
//! are sampled from the Morrison, Stephenson, Hohenkerk & Zawilski (2021) Table S15
//! spline; later quarters follow the IERS Bulletin A values of TT − UTC minus
//! UT1 − UTC. Lookups outside the table clamp to its first or last entry.

#![allow(clippy::unreadable_literal)]

use super::{days_in_year, ordinal0};
use crate::math::floor;
use crate::{Error, Result};
#[cfg(feature = "chrono")]
use chrono::Datelike;
use log::debug;

/// Year of the first table entry.
const FIRST_YEAR: i32 = 1973;

/// ΔT in seconds, four entries per year: Q1 (.00), Q2 (.25), Q3 (.50), Q4 (.75).
#[rustfmt::skip]
static QUARTERLY_DELTA_T: [f64; 212] = [
    43.15, 43.43, 43.70, 43.97, // 1973
    44.24, 44.51, 44.77, 45.03, // 1974
    45.28, 45.53, 45.78, 46.03, // 1975
    46.28, 46.53, 46.79, 47.04, // 1976
    47.29, 47.55, 47.81, 48.07, // 1977
    48.33, 48.59, 48.85, 49.11, // 1978
    49.37, 49.62, 49.87, 50.12, // 1979
    50.36, 50.60, 50.83, 51.06, // 1980
    51.28, 51.50, 51.71, 51.93, // 1981
    52.13, 52.34, 52.54, 52.74, // 1982
    52.94, 53.13, 53.32, 53.51, // 1983
    53.70, 53.88, 54.06, 54.23, // 1984
    54.39, 54.55, 54.70, 54.85, // 1985
    54.98, 55.11, 55.23, 55.35, // 1986
    55.46, 55.56, 55.67, 55.78, // 1987
    55.88, 56.00, 56.12, 56.24, // 1988
    56.37, 56.52, 56.67, 56.82, // 1989
    56.99, 57.16, 57.34, 57.52, // 1990
    57.70, 57.89, 58.08, 58.27, // 1991
    58.45, 58.64, 58.82, 59.01, // 1992
    59.19, 59.37, 59.55, 59.74, // 1993
    59.92, 60.11, 60.30, 60.48, // 1994
    60.68, 60.87, 61.07, 61.27, // 1995
    61.46, 61.66, 61.85, 62.04, // 1996
    62.23, 62.41, 62.58, 62.74, // 1997
    62.90, 63.04, 63.18, 63.31, // 1998
    63.42, 63.53, 63.63, 63.72, // 1999
    63.81, 63.89, 63.96, 64.02, // 2000
    64.08, 64.14, 64.19, 64.23, // 2001
    64.27, 64.31, 64.34, 64.38, // 2002
    64.41, 64.45, 64.48, 64.52, // 2003
    64.55, 64.59, 64.64, 64.68, // 2004
    64.73, 64.78, 64.83, 64.89, // 2005
    64.94, 65.00, 65.07, 65.13, // 2006
    65.20, 65.26, 65.33, 65.41, // 2007
    65.48, 65.55, 65.62, 65.70, // 2008
    65.77, 65.85, 65.92, 65.99, // 2009
    66.06, 66.13, 66.20, 66.27, // 2010
    66.33, 66.40, 66.47, 66.54, // 2011
    66.61, 66.68, 66.76, 66.84, // 2012
    66.92, 67.01, 67.10, 67.19, // 2013
    67.28, 67.38, 67.48, 67.58, // 2014
    67.69, 67.79, 67.90, 68.00, // 2015
    68.11, 68.22, 68.32, 68.43, // 2016
    68.53, 68.63, 68.73, 68.82, // 2017
    68.92, 69.00, 69.09, 69.17, // 2018
    69.22, 69.25, 69.29, 69.33, // 2019
    69.36, 69.39, 69.42, 69.39, // 2020
    69.36, 69.34, 69.33, 69.31, // 2021
    69.29, 69.27, 69.25, 69.22, // 2022
    69.20, 69.19, 69.19, 69.18, // 2023
    69.17, 69.16, 69.15, 69.14, // 2024
    69.13, 69.12, 69.11, 69.10, // 2025
];

/// ΔT lookup against the quarterly table.
///
/// The table is the only empirical input to the solar position pipeline. Callers who
/// need ΔT outside its range should pass an explicit override instead of relying on
/// the clamped boundary values.
pub struct DeltaT;

impl DeltaT {
    /// Looks up ΔT for a decimal year such as `2020.25`.
    ///
    /// The year is truncated to its quarter before lookup.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the year is not finite.
    ///
    /// # Example
    /// ```
    /// # use solar_almanac::time::DeltaT;
    /// let delta_t = DeltaT::lookup(2020.3).unwrap();
    /// assert_eq!(delta_t, DeltaT::lookup(2020.25).unwrap());
    /// assert!(delta_t > 69.0 && delta_t < 70.0);
    /// ```
    pub fn lookup(decimal_year: f64) -> Result<f64> {
        if !decimal_year.is_finite() {
            return Err(Error::invalid_datetime("year must be finite"));
        }
        let quarters_since_start = floor(decimal_year * 4.0) - f64::from(FIRST_YEAR) * 4.0;
        // saturating float-to-int cast keeps far-away years in range for the clamp
        Ok(entry(quarters_since_start as i64))
    }

    /// Looks up ΔT for a zero-based day of the year.
    ///
    /// The quarter is `floor((ordinal0 / days_in_year) / 0.25)`, so December 31st
    /// still belongs to the fourth quarter of its own year.
    #[must_use]
    pub fn for_ordinal(year: i32, ordinal0: u32, days_in_year: u32) -> f64 {
        let fraction = f64::from(ordinal0) / f64::from(days_in_year.max(1));
        let quarter = (floor(fraction / 0.25) as i64).clamp(0, 3);
        entry((i64::from(year) - i64::from(FIRST_YEAR)) * 4 + quarter)
    }

    /// Looks up ΔT for a calendar date.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the month or day is invalid.
    pub fn for_calendar_date(year: i32, month: u32, day: u32) -> Result<f64> {
        let ordinal = ordinal0(year, month, day)?;
        Ok(Self::for_ordinal(year, ordinal, days_in_year(year)))
    }

    /// Looks up ΔT for any chrono date-like value.
    ///
    /// # Example
    /// ```
    /// # use solar_almanac::time::DeltaT;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2003, 10, 17).unwrap();
    /// assert_eq!(
    ///     DeltaT::from_date_like(date),
    ///     DeltaT::for_calendar_date(2003, 10, 17).unwrap()
    /// );
    /// ```
    #[cfg(feature = "chrono")]
    #[allow(clippy::needless_pass_by_value)]
    pub fn from_date_like<D: Datelike>(date: D) -> f64 {
        let days = if date.with_ordinal(366).is_some() { 366 } else { 365 };
        Self::for_ordinal(date.year(), date.ordinal0(), days)
    }

    /// The first table value, used for every date before 1973.
    #[must_use]
    pub fn first_entry() -> f64 {
        QUARTERLY_DELTA_T[0]
    }

    /// The last table value, used for every date after the table ends.
    #[must_use]
    pub fn last_entry() -> f64 {
        QUARTERLY_DELTA_T[QUARTERLY_DELTA_T.len() - 1]
    }

    /// Decimal years covered by the table, inclusive.
    #[must_use]
    pub fn table_range() -> (f64, f64) {
        let last = f64::from(FIRST_YEAR) + (QUARTERLY_DELTA_T.len() - 1) as f64 / 4.0;
        (f64::from(FIRST_YEAR), last)
    }
}

fn entry(index: i64) -> f64 {
    let last = QUARTERLY_DELTA_T.len() - 1;
    let position = usize::try_from(index).unwrap_or(0).min(last);
    if usize::try_from(index) != Ok(position) {
        debug!("ΔT table index {index} outside 0..={last}, clamping to boundary value");
    }
    QUARTERLY_DELTA_T[position]
}
