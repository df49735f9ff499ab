//! NREL Solar Position Algorithm (Reda & Andreas, 2003), valid for the years −2000 to
//! 6000 with an uncertainty of ±0.0003°.
//!
//! The pipeline is split in two: [`geocentric_position`] computes everything that depends
//! only on time (steps 3.1 to 3.8 plus the equation of time), and [`topocentric_position`]
//! adds the observer (steps 3.9 to 3.15). [`solar_position_from_julian`] runs both.
//!
//! I. Reda, A. Andreas, "Solar position algorithm for solar radiation applications",
//! Solar Energy 76(5), 577–589, 2004. <https://doi.org/10.1016/j.solener.2003.12.003>

#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::suboptimal_flops)]

use crate::math::{
    asin, atan, atan2, cos, degrees_to_radians, mul_add, normalize_degrees_0_to_360,
    polynomial, powi, radians_to_degrees, sin, tan,
};
#[cfg(feature = "chrono")]
use crate::time::TimeCorrections;
use crate::time::{CenturyDivisor, JulianDate};
use crate::types::{GeocentricPosition, SolarPosition};
use crate::{Atmosphere, Error, Observer, Result};
use log::trace;

pub mod coefficients;
mod rise_set;

pub use rise_set::rise_set_transit_utc;
#[cfg(feature = "chrono")]
pub use rise_set::{rise_set_transit, rise_set_transit_for_date};

use coefficients::{
    PeriodicTerm, NUTATION_COEFFS, OBLIQUITY_COEFFS, SUN_MEAN_LONGITUDE_COEFFS, TERMS_B,
    TERMS_L, TERMS_PE, TERMS_R, TERMS_Y,
};

#[cfg(feature = "chrono")]
use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Annual aberration, arcseconds at 1 AU.
const ABERRATION_CONSTANT: f64 = -20.4898;

/// Ratio of polar to equatorial Earth radius (1 − flattening).
const EARTH_FLATTENING_FACTOR: f64 = 0.99664719;

/// Equatorial Earth radius in meters used by the parallax terms.
const EARTH_RADIUS_METERS: f64 = 6378140.0;

/// Equatorial horizontal parallax of the sun at 1 AU, in arcseconds.
const SUN_PARALLAX_ARCSEC: f64 = 8.794;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Nutation amplitudes are tabulated in units of 0.0001″.
const NUTATION_SCALE: f64 = 36_000_000.0;

/// Calculate solar position for a timezone-aware datetime.
///
/// ΔT comes from `corrections` (or the table for the UTC calendar date) and ΔUT1 is
/// added to the civil time before conversion.
///
/// # Errors
/// Returns error if the date cannot be converted or a correction is not finite.
///
/// # Example
/// ```rust
/// use solar_almanac::{spa, time::TimeCorrections, Atmosphere, Observer};
/// use chrono::{DateTime, FixedOffset};
///
/// let datetime = "2003-10-17T12:30:30-07:00".parse::<DateTime<FixedOffset>>().unwrap();
/// let observer = Observer::new(39.742476, -105.1786, 1830.14).unwrap();
/// let position = spa::solar_position(
///     &datetime,
///     &observer,
///     Atmosphere::new(820.0, 11.0).unwrap(),
///     TimeCorrections::new(Some(67.0), 0.0).unwrap(),
/// ).unwrap();
///
/// assert!((position.azimuth() - 194.34024).abs() < 1e-4);
/// ```
#[cfg(feature = "chrono")]
pub fn solar_position<Tz: TimeZone>(
    datetime: &DateTime<Tz>,
    observer: &Observer,
    atmosphere: Atmosphere,
    corrections: TimeCorrections,
) -> Result<SolarPosition> {
    let jd = julian_date_for(datetime, corrections)?;
    solar_position_from_julian(jd, observer, atmosphere)
}

/// Builds the Julian date for a datetime with the given corrections applied.
#[cfg(feature = "chrono")]
pub(crate) fn julian_date_for<Tz: TimeZone>(
    datetime: &DateTime<Tz>,
    corrections: TimeCorrections,
) -> Result<JulianDate> {
    let utc_date = datetime.with_timezone(&Utc).date_naive();
    let delta_t =
        corrections.resolve_delta_t(utc_date.year(), utc_date.month(), utc_date.day())?;
    Ok(JulianDate::from_datetime(datetime, delta_t)?.with_delta_ut1(corrections.delta_ut1()))
}

/// Full topocentric position for a Julian date; the entry point without chrono.
///
/// # Errors
/// Returns `ComputationError` if the series evaluation yields a degenerate radius vector.
///
/// # Example
/// ```rust
/// use solar_almanac::{spa, time::JulianDate, Atmosphere, Observer};
///
/// let jd = JulianDate::from_utc(2003, 10, 17, 19, 30, 30.0, 67.0).unwrap();
/// let observer = Observer::new(39.742476, -105.1786, 1830.14).unwrap();
/// let position =
///     spa::solar_position_from_julian(jd, &observer, Atmosphere::new(820.0, 11.0).unwrap())
///         .unwrap();
///
/// assert!((position.zenith_angle() - 50.11162).abs() < 1e-4);
/// ```
pub fn solar_position_from_julian(
    jd: JulianDate,
    observer: &Observer,
    atmosphere: Atmosphere,
) -> Result<SolarPosition> {
    let geocentric = geocentric_position(jd)?;
    Ok(topocentric_position(&geocentric, observer, atmosphere))
}

/// Calculate the location-independent part of the solar position.
///
/// Use with [`topocentric_position`] for coordinate sweeps at a fixed instant.
///
/// # Errors
/// Returns `ComputationError` if the radius vector is not a positive finite number.
pub fn geocentric_position(jd: JulianDate) -> Result<GeocentricPosition> {
    geocentric_position_with_divisor(jd, CenturyDivisor::Standard)
}

/// Like [`geocentric_position`], with an explicit Julian century divisor for the mean
/// sidereal time.
///
/// # Errors
/// Returns `ComputationError` if the radius vector is not a positive finite number.
pub fn geocentric_position_with_divisor(
    jd: JulianDate,
    divisor: CenturyDivisor,
) -> Result<GeocentricPosition> {
    let jme = jd.julian_ephemeris_millennium();
    let jce = jd.julian_ephemeris_century();

    // 3.2. Earth heliocentric longitude, latitude and radius vector
    let l = normalize_degrees_0_to_360(radians_to_degrees(heliocentric_series(jme, TERMS_L)));
    let b = radians_to_degrees(heliocentric_series(jme, TERMS_B));
    let r = heliocentric_series(jme, TERMS_R);
    if !(r.is_finite() && r > 0.0) {
        return Err(Error::computation_error(
            "Earth radius vector is not positive",
        ));
    }

    // 3.2.5-3.2.6. Geocentric longitude and latitude
    let theta = normalize_degrees_0_to_360(l + 180.0);
    let beta = -b;
    trace!("jme={jme} L={l} B={b} R={r} theta={theta}");

    // 3.3. Nutation in longitude and obliquity
    let x = nutation_arguments(jce);
    let (delta_psi, delta_epsilon) = nutation(jce, &x);

    // 3.4. True obliquity of the ecliptic
    let epsilon0 = polynomial(&OBLIQUITY_COEFFS, jme / 10.0) / SECONDS_PER_HOUR;
    let epsilon = epsilon0 + delta_epsilon;
    trace!("delta_psi={delta_psi} delta_epsilon={delta_epsilon} epsilon={epsilon}");

    // 3.5-3.6. Aberration and apparent sun longitude
    let delta_tau = ABERRATION_CONSTANT / (SECONDS_PER_HOUR * r);
    let lambda = theta + delta_psi + delta_tau;

    // 3.7. Apparent sidereal time at Greenwich
    let jc = jd.julian_century_with(divisor);
    let nu0 = normalize_degrees_0_to_360(mul_add(
        powi(jc, 2),
        0.000387933 - jc / 38710000.0,
        mul_add(
            360.98564736629,
            jd.julian_date() - 2451545.0,
            280.46061837,
        ),
    ));
    let nu = mul_add(delta_psi, cos(degrees_to_radians(epsilon)), nu0);

    // 3.8. Geocentric right ascension and declination
    let beta_rad = degrees_to_radians(beta);
    let epsilon_rad = degrees_to_radians(epsilon);
    let lambda_rad = degrees_to_radians(lambda);
    let alpha = normalize_degrees_0_to_360(radians_to_degrees(atan2(
        mul_add(
            sin(lambda_rad),
            cos(epsilon_rad),
            -(tan(beta_rad) * sin(epsilon_rad)),
        ),
        cos(lambda_rad),
    )));
    let delta = radians_to_degrees(asin(mul_add(
        sin(beta_rad),
        cos(epsilon_rad),
        cos(beta_rad) * sin(epsilon_rad) * sin(lambda_rad),
    )));
    trace!("lambda={lambda} nu={nu} alpha={alpha} delta={delta}");

    let equation_of_time = equation_of_time(jme, alpha, delta_psi, epsilon);

    Ok(GeocentricPosition {
        julian_date: jd,
        l,
        b,
        r,
        theta,
        beta,
        delta_psi,
        delta_epsilon,
        epsilon0,
        epsilon,
        delta_tau,
        lambda,
        nu0,
        nu,
        alpha,
        delta,
        equation_of_time,
    })
}

/// Complete the solar position for an observer (steps 3.9 onwards).
///
/// Refraction is applied only while the uncorrected elevation is at or above the
/// atmosphere's rise/set altitude.
#[must_use]
pub fn topocentric_position(
    geocentric: &GeocentricPosition,
    observer: &Observer,
    atmosphere: Atmosphere,
) -> SolarPosition {
    let latitude = observer.latitude();
    let elevation = observer.elevation();

    // 3.9. Observer local hour angle
    let hour_angle =
        normalize_degrees_0_to_360(geocentric.nu + observer.longitude() - geocentric.alpha);
    let h = degrees_to_radians(hour_angle);

    // 3.10. Equatorial horizontal parallax
    let xi = SUN_PARALLAX_ARCSEC / (SECONDS_PER_HOUR * geocentric.r);
    let xi_rad = degrees_to_radians(xi);
    let phi = degrees_to_radians(latitude);
    let delta = degrees_to_radians(geocentric.delta);

    // 3.11. Parallax in right ascension and topocentric declination
    let u = atan(EARTH_FLATTENING_FACTOR * tan(phi));
    let y = mul_add(
        EARTH_FLATTENING_FACTOR,
        sin(u),
        (elevation / EARTH_RADIUS_METERS) * sin(phi),
    );
    let x = mul_add(elevation / EARTH_RADIUS_METERS, cos(phi), cos(u));

    let denominator = mul_add(-x * sin(xi_rad), cos(h), cos(delta));
    let delta_alpha_rad = atan2(-x * sin(xi_rad) * sin(h), denominator);
    let delta_prime = radians_to_degrees(atan2(
        mul_add(-y, sin(xi_rad), sin(delta)) * cos(delta_alpha_rad),
        denominator,
    ));
    let delta_alpha = radians_to_degrees(delta_alpha_rad);
    let alpha_prime = geocentric.alpha + delta_alpha;

    // 3.12. Topocentric local hour angle
    let h_prime = hour_angle - delta_alpha;
    let h_prime_rad = degrees_to_radians(h_prime);
    let delta_prime_rad = degrees_to_radians(delta_prime);

    // 3.13. Topocentric elevation and zenith
    let e0 = radians_to_degrees(asin(mul_add(
        sin(phi),
        sin(delta_prime_rad),
        cos(phi) * cos(delta_prime_rad) * cos(h_prime_rad),
    )));
    let delta_e = refraction_correction(e0, atmosphere);
    let e = e0 + delta_e;
    let zenith = 90.0 - e;

    // 3.14. Topocentric azimuth
    let azimuth_astronomical = normalize_degrees_0_to_360(radians_to_degrees(atan2(
        sin(h_prime_rad),
        cos(h_prime_rad) * sin(phi) - tan(delta_prime_rad) * cos(phi),
    )));
    let azimuth = normalize_degrees_0_to_360(azimuth_astronomical + 180.0);
    trace!("H'={h_prime} delta'={delta_prime} e0={e0} e={e} azimuth={azimuth}");

    SolarPosition {
        geocentric: *geocentric,
        hour_angle,
        xi,
        delta_alpha,
        alpha_prime,
        delta_prime,
        h_prime,
        e0,
        delta_e,
        e,
        zenith,
        azimuth_astronomical,
        azimuth,
    }
}

/// Evaluate one heliocentric series: Σ over sub-tables of JME^i · Σ A·cos(B + C·JME), / 1e8.
fn heliocentric_series(jme: f64, tables: &[&[PeriodicTerm]]) -> f64 {
    // at most six sub-tables (L0..L5)
    let mut sums = [0.0; 6];
    for (sum, table) in sums.iter_mut().zip(tables) {
        *sum = table
            .iter()
            .map(|term| term[0] * cos(mul_add(term[2], jme, term[1])))
            .sum();
    }
    polynomial(&sums[..tables.len()], jme) / 1e8
}

/// The five lunisolar arguments X0..X4 in degrees.
fn nutation_arguments(jce: f64) -> [f64; 5] {
    NUTATION_COEFFS.map(|coeffs| polynomial(&coeffs, jce))
}

/// Nutation in longitude (Δψ) and obliquity (Δε), in degrees.
fn nutation(jce: f64, x: &[f64; 5]) -> (f64, f64) {
    let mut delta_psi = 0.0;
    let mut delta_epsilon = 0.0;

    for (y_terms, pe_term) in TERMS_Y.iter().zip(TERMS_PE.iter()) {
        let argument = degrees_to_radians(
            x.iter()
                .zip(y_terms)
                .map(|(&x_j, &y_ij)| x_j * f64::from(y_ij))
                .sum(),
        );
        delta_psi += mul_add(pe_term[1], jce, pe_term[0]) * sin(argument);
        delta_epsilon += mul_add(pe_term[3], jce, pe_term[2]) * cos(argument);
    }

    (delta_psi / NUTATION_SCALE, delta_epsilon / NUTATION_SCALE)
}

/// Atmospheric refraction correction Δe in degrees for an uncorrected elevation e0.
fn refraction_correction(e0: f64, atmosphere: Atmosphere) -> f64 {
    if e0 < atmosphere.rise_set_altitude() {
        return 0.0;
    }
    (atmosphere.pressure() / 1010.0) * (283.0 / (273.0 + atmosphere.temperature())) * 1.02
        / (60.0 * tan(degrees_to_radians(e0 + 10.3 / (e0 + 5.11))))
}

/// Equation of time in minutes, wrapped into [−20, 20].
fn equation_of_time(jme: f64, alpha: f64, delta_psi: f64, epsilon: f64) -> f64 {
    let m = normalize_degrees_0_to_360(polynomial(&SUN_MEAN_LONGITUDE_COEFFS, jme));
    let minutes = 4.0
        * (m - 0.0057183 - alpha + delta_psi * cos(degrees_to_radians(epsilon)));

    if minutes < -20.0 {
        minutes + 1440.0
    } else if minutes > 20.0 {
        minutes - 1440.0
    } else {
        minutes
    }
}
