//! Sunrise, solar transit and sunset (Reda & Andreas 2003, Appendix A.2).
//!
//! The solver evaluates the geocentric sun at 0h of the previous, current and next day,
//! interpolates right ascension and declination to each approximate event time, and
//! applies one correction step. Results are day fractions relative to 0 UT of the
//! requested calendar date.

use super::geocentric_position;
use crate::math::{
    acos, asin, cos, degrees_to_radians, limit_degrees_180, limit_degrees_180_pm, mul_add,
    normalize_degrees, normalize_to_unit_range, radians_to_degrees, sin,
};
use crate::time::{JulianDate, SECONDS_PER_DAY};
use crate::types::{HoursUtc, PolarCondition, RiseSetTransit, SunEvent};
use crate::{Atmosphere, Observer, Result};
use log::{debug, trace};

#[cfg(feature = "chrono")]
use crate::time::TimeCorrections;
#[cfg(feature = "chrono")]
use crate::Error;
#[cfg(feature = "chrono")]
use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, TimeZone, Utc};
#[cfg(feature = "chrono")]
use core::cmp::Ordering;

/// Sidereal rotation of the Earth in degrees per solar day.
const SIDEREAL_DEGREES_PER_DAY: f64 = 360.985647;

/// Day-to-day changes at least this large are treated as a 0°/360° wraparound.
const WRAPAROUND_THRESHOLD: f64 = 2.0;

/// Calculate sunrise, transit and sunset as hours since 0 UT of the given date.
///
/// Hours can be negative (previous UTC day) or exceed 24 (next UTC day). The sun's
/// center is taken to rise and set at the atmosphere's rise/set altitude.
///
/// # Errors
/// Returns error for an invalid calendar date or a non-finite ΔT.
///
/// # Example
/// ```
/// use solar_almanac::{spa, Atmosphere, Observer};
///
/// let observer = Observer::new(39.742476, -105.1786, 1830.14).unwrap();
/// let result = spa::rise_set_transit_utc(2003, 10, 17, &observer, Atmosphere::standard(), 67.0)
///     .unwrap();
///
/// // transit at 18:46:04.97 UTC (11:46:04.97 local)
/// assert!((result.transit_hours() - 18.7681).abs() < 1e-3);
/// ```
pub fn rise_set_transit_utc(
    year: i32,
    month: u32,
    day: u32,
    observer: &Observer,
    atmosphere: Atmosphere,
    delta_t: f64,
) -> Result<RiseSetTransit<HoursUtc>> {
    let jd_midnight = JulianDate::from_utc(year, month, day, 0, 0, 0.0, delta_t)?;
    let fractions = day_fractions(jd_midnight, observer, atmosphere.rise_set_altitude())?;
    Ok(fractions.map(|fraction| HoursUtc::from_hours(fraction * 24.0)))
}

/// Calculate sunrise, transit and sunset for the local calendar date of `date`.
///
/// Only the date and zone of `date` are used. Each event is placed on that local date,
/// matching the wall-clock times a local almanac would print.
///
/// # Errors
/// Returns error if ΔT cannot be resolved or an event time is out of chrono's range.
///
/// # Example
/// ```
/// use solar_almanac::{spa, time::TimeCorrections, Atmosphere, Observer};
/// use chrono::{DateTime, FixedOffset, Timelike};
///
/// let date = "2003-10-17T12:30:30-07:00".parse::<DateTime<FixedOffset>>().unwrap();
/// let observer = Observer::new(39.742476, -105.1786, 1830.14).unwrap();
/// let result = spa::rise_set_transit(
///     &date,
///     &observer,
///     Atmosphere::standard(),
///     TimeCorrections::new(Some(67.0), 0.0).unwrap(),
/// )
/// .unwrap();
///
/// let sunset = result.sunset().unwrap();
/// assert_eq!((sunset.hour(), sunset.minute()), (17, 20));
/// ```
#[cfg(feature = "chrono")]
pub fn rise_set_transit<Tz: TimeZone>(
    date: &DateTime<Tz>,
    observer: &Observer,
    atmosphere: Atmosphere,
    corrections: TimeCorrections,
) -> Result<RiseSetTransit<DateTime<Tz>>> {
    rise_set_transit_for_date(
        date.date_naive(),
        &date.timezone(),
        observer,
        atmosphere,
        corrections,
    )
}

/// Calculate sunrise, transit and sunset for a calendar date in a given zone.
///
/// ΔUT1 does not affect the result; ΔT is resolved for `date`.
///
/// # Errors
/// Returns error if ΔT cannot be resolved or an event time is out of chrono's range.
#[cfg(feature = "chrono")]
pub fn rise_set_transit_for_date<Tz: TimeZone>(
    date: NaiveDate,
    zone: &Tz,
    observer: &Observer,
    atmosphere: Atmosphere,
    corrections: TimeCorrections,
) -> Result<RiseSetTransit<DateTime<Tz>>> {
    let delta_t = corrections.resolve_delta_t(date.year(), date.month(), date.day())?;
    let jd_midnight =
        JulianDate::from_utc(date.year(), date.month(), date.day(), 0, 0, 0.0, delta_t)?;
    let fractions = day_fractions(jd_midnight, observer, atmosphere.rise_set_altitude())?;

    let utc_midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or(Error::invalid_datetime("date has no midnight"))?
        .and_utc();

    // map() cannot propagate errors, so convert the three events up front
    match fractions {
        RiseSetTransit::RegularDay {
            sunrise,
            transit,
            sunset,
            transit_altitude,
        } => {
            let place = |event: SunEvent<f64>| -> Result<SunEvent<DateTime<Tz>>> {
                Ok(SunEvent {
                    time: local_event_time(utc_midnight, event.time, zone, date)?,
                    hour_angle: event.hour_angle,
                })
            };
            Ok(RiseSetTransit::RegularDay {
                sunrise: place(sunrise)?,
                transit: place(transit)?,
                sunset: place(sunset)?,
                transit_altitude,
            })
        }
        RiseSetTransit::Circumpolar(condition) => Ok(RiseSetTransit::Circumpolar(condition)),
    }
}

/// Turns a day fraction after 0 UT into an instant on the local calendar date.
#[cfg(feature = "chrono")]
fn local_event_time<Tz: TimeZone>(
    utc_midnight: DateTime<Utc>,
    fraction: f64,
    zone: &Tz,
    local_date: NaiveDate,
) -> Result<DateTime<Tz>> {
    let out_of_range = || Error::invalid_datetime("event time is out of range");

    let millis = crate::math::round(fraction * SECONDS_PER_DAY * 1000.0) as i64;
    let instant = utc_midnight
        .checked_add_signed(TimeDelta::try_milliseconds(millis).ok_or_else(out_of_range)?)
        .ok_or_else(out_of_range)?;

    let one_day = TimeDelta::try_days(1).ok_or_else(out_of_range)?;
    let local = instant.with_timezone(zone);
    let local = match local.date_naive().cmp(&local_date) {
        Ordering::Less => local.checked_add_signed(one_day),
        Ordering::Greater => local.checked_sub_signed(one_day),
        Ordering::Equal => Some(local),
    };
    local.ok_or_else(out_of_range)
}

#[derive(Debug, Clone, Copy)]
struct AlphaDelta {
    alpha: f64,
    delta: f64,
}

/// Core solver: day fractions relative to `jd_midnight` (0 UT, carrying the day's ΔT).
fn day_fractions(
    jd_midnight: JulianDate,
    observer: &Observer,
    h0_prime: f64,
) -> Result<RiseSetTransit<f64>> {
    let latitude = observer.latitude();
    let longitude = observer.longitude();
    let delta_t = jd_midnight.delta_t();

    // A.2.1. Apparent sidereal time at Greenwich at 0 UT
    let nu = geocentric_position(jd_midnight)?.nu;

    // A.2.2. Geocentric α/δ at 0 TT of the previous, current and next day
    let day_zero = jd_midnight.with_delta_t(0.0);
    let mut alpha_deltas = [AlphaDelta {
        alpha: 0.0,
        delta: 0.0,
    }; 3];
    for (offset, alpha_delta) in (-1_i32..=1).zip(alpha_deltas.iter_mut()) {
        let geocentric = geocentric_position(day_zero.add_days(f64::from(offset)))?;
        *alpha_delta = AlphaDelta {
            alpha: geocentric.alpha,
            delta: geocentric.delta,
        };
    }

    // A.2.3. Approximate transit time
    let m0 = (alpha_deltas[1].alpha - longitude - nu) / 360.0;

    // A.2.4. Local hour angle at rise/set altitude
    let phi = degrees_to_radians(latitude);
    let delta0 = degrees_to_radians(alpha_deltas[1].delta);
    let argument = (sin(degrees_to_radians(h0_prime)) - sin(phi) * sin(delta0))
        / (cos(phi) * cos(delta0));
    if argument.is_nan() || argument.abs() > 1.0 {
        let condition = if argument < -1.0 {
            PolarCondition::PolarDay
        } else {
            PolarCondition::PolarNight
        };
        debug!(
            "no sunrise or sunset at latitude {latitude}: hour angle argument {argument}, {condition:?}"
        );
        return Ok(RiseSetTransit::Circumpolar(condition));
    }
    let h0 = limit_degrees_180(radians_to_degrees(acos(argument)));

    // A.2.5-A.2.6. Approximate transit, rise and set as day fractions
    let m = [
        normalize_to_unit_range(m0),
        normalize_to_unit_range(m0 - h0 / 360.0),
        normalize_to_unit_range(m0 + h0 / 360.0),
    ];

    // A.2.7-A.2.12. Sidereal time, interpolated α′/δ′, hour angle and altitude per event
    let mut h_prime = [0.0; 3];
    let mut altitude = [0.0; 3];
    let mut delta_prime = [0.0; 3];
    for i in 0..3 {
        let nu_i = mul_add(SIDEREAL_DEGREES_PER_DAY, m[i], nu);
        let n = m[i] + delta_t / SECONDS_PER_DAY;

        let alpha_prime = interpolate(alpha_deltas.map(|ad| ad.alpha), n);
        delta_prime[i] = interpolate(alpha_deltas.map(|ad| ad.delta), n);

        h_prime[i] = limit_degrees_180_pm(nu_i + longitude - alpha_prime);

        let delta_prime_rad = degrees_to_radians(delta_prime[i]);
        altitude[i] = radians_to_degrees(asin(mul_add(
            sin(phi),
            sin(delta_prime_rad),
            cos(phi) * cos(delta_prime_rad) * cos(degrees_to_radians(h_prime[i])),
        )));
    }
    trace!("m={m:?} H'={h_prime:?} h={altitude:?}");

    // A.2.13-A.2.15. Corrected transit, sunrise and sunset
    let transit = m[0] - h_prime[0] / 360.0;
    let rise_or_set = |i: usize| {
        m[i] + (altitude[i] - h0_prime)
            / (360.0
                * cos(degrees_to_radians(delta_prime[i]))
                * cos(phi)
                * sin(degrees_to_radians(h_prime[i])))
    };

    Ok(RiseSetTransit::RegularDay {
        sunrise: SunEvent {
            time: rise_or_set(1),
            hour_angle: h_prime[1],
        },
        transit: SunEvent {
            time: transit,
            hour_angle: h_prime[0],
        },
        sunset: SunEvent {
            time: rise_or_set(2),
            hour_angle: h_prime[2],
        },
        transit_altitude: altitude[0],
    })
}

/// Quadratic interpolation of a value tabulated at days −1, 0 and +1.
const fn interpolate(values: [f64; 3], n: f64) -> f64 {
    let mut a = values[1] - values[0];
    let mut b = values[2] - values[1];
    if a.abs() >= WRAPAROUND_THRESHOLD {
        a = normalize_degrees(a, 360.0);
    }
    if b.abs() >= WRAPAROUND_THRESHOLD {
        b = normalize_degrees(b, 360.0);
    }
    values[1] + n * (a + b + (b - a) * n) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NO_RISE_SET_SENTINEL;

    fn golden() -> Observer {
        Observer::new(39.742476, -105.1786, 1830.14).unwrap()
    }

    #[test]
    fn test_interpolate_plain() {
        assert!((interpolate([1.0, 2.0, 3.0], 0.5) - 2.5).abs() < 1e-12);
        assert!((interpolate([1.0, 2.0, 3.0], 0.0) - 2.0).abs() < 1e-12);
        // curvature: 1, 2, 4 -> a = 1, b = 2
        assert!((interpolate([1.0, 2.0, 4.0], 1.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_in_const_context() {
        const MIDPOINT: f64 = interpolate([359.0, 0.0, 1.0], 0.5);
        assert!((MIDPOINT - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_across_zero() {
        // right ascension wrapping from 359.5 to 0.5
        let value = interpolate([358.5, 359.5, 0.5], 0.5);
        assert!((value - 360.0).abs() < 1e-9, "{value}");
        let value = interpolate([359.5, 0.5, 1.5], 0.5);
        assert!((value - 1.0).abs() < 1e-9, "{value}");
    }

    #[test]
    fn test_reference_day_fractions() {
        let result =
            rise_set_transit_utc(2003, 10, 17, &golden(), Atmosphere::standard(), 67.0).unwrap();
        let hms = |h: f64, m: f64, s: f64| h + m / 60.0 + s / 3600.0;

        // 06:12:43, 11:46:04.97 and 17:20:19 at UTC-7
        assert!((result.sunrise_hours() - hms(13.0, 12.0, 43.0)).abs() < 1.0 / 3600.0);
        assert!((result.transit_hours() - hms(18.0, 46.0, 4.97)).abs() < 0.1 / 3600.0);
        // the sunset inside this UTC day is the one just after 0 UT
        assert!((result.sunset_hours() - hms(0.0, 20.0, 19.0)).abs() < 1.0 / 3600.0);

        assert!(result.transit_hour_angle().abs() < 0.1);
        assert!((result.sunrise_hour_angle() + 83.496).abs() < 1e-3);
        assert!((result.sunset_hour_angle() - 83.524).abs() < 1e-3);
        assert!((result.transit_altitude() - 40.9544).abs() < 1e-3);
    }

    #[test]
    fn test_circumpolar_summer_at_80_north() {
        let observer = Observer::new(80.0, 15.0, 0.0).unwrap();
        let result =
            rise_set_transit_utc(2024, 6, 20, &observer, Atmosphere::standard(), 69.0).unwrap();

        assert_eq!(result.polar_condition(), Some(PolarCondition::PolarDay));
        assert_eq!(result.sunrise_hours(), NO_RISE_SET_SENTINEL);
        assert_eq!(result.transit_hours(), NO_RISE_SET_SENTINEL);
        assert_eq!(result.sunset_hours(), NO_RISE_SET_SENTINEL);
        assert_eq!(result.transit_altitude(), NO_RISE_SET_SENTINEL);
    }

    #[test]
    fn test_circumpolar_winter_at_80_north() {
        let observer = Observer::new(80.0, 15.0, 0.0).unwrap();
        let result =
            rise_set_transit_utc(2024, 12, 21, &observer, Atmosphere::standard(), 69.0).unwrap();
        assert_eq!(result.polar_condition(), Some(PolarCondition::PolarNight));
    }

    #[test]
    fn test_invalid_date() {
        assert!(
            rise_set_transit_utc(2023, 2, 29, &golden(), Atmosphere::standard(), 69.0).is_err()
        );
        assert!(
            rise_set_transit_utc(2023, 2, 28, &golden(), Atmosphere::standard(), f64::NAN)
                .is_err()
        );
    }
}
