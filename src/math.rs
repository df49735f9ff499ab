//! Angle and float helpers shared by the solar position pipeline and geodesy.
//!
//! Trigonometric helpers dispatch to the native `f64` methods under `std` and to
//! `libm` otherwise, so the numeric core compiles for `no_std` targets.

#![allow(clippy::many_single_char_names)]

/// Converts degrees to radians.
#[inline]
pub const fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts radians to degrees.
#[inline]
pub const fn radians_to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Normalizes an angle into `[0, limit)`.
///
/// `limit` is usually 360; the rise/set interpolation also uses it with other periods.
/// Non-finite input is returned unchanged.
///
/// # Example
/// ```
/// use solar_almanac::normalize_degrees;
///
/// assert_eq!(normalize_degrees(370.0, 360.0), 10.0);
/// assert_eq!(normalize_degrees(-90.0, 360.0), 270.0);
/// assert_eq!(normalize_degrees(190.0, 180.0), 10.0);
/// ```
#[must_use]
pub const fn normalize_degrees(value: f64, limit: f64) -> f64 {
    let normalized = value % limit;
    let normalized = if normalized < 0.0 {
        normalized + limit
    } else {
        normalized
    };
    // a tiny negative remainder plus `limit` rounds up to `limit` itself
    if normalized >= limit {
        0.0
    } else {
        normalized
    }
}

/// Normalizes an angle into `[0, 360)`.
#[inline]
#[must_use]
pub const fn normalize_degrees_0_to_360(degrees: f64) -> f64 {
    normalize_degrees(degrees, 360.0)
}

/// Normalizes an angle into `(-180, 180]`, e.g. for longitudes.
///
/// # Example
/// ```
/// use solar_almanac::normalize_signed_degrees;
///
/// assert_eq!(normalize_signed_degrees(190.0), -170.0);
/// assert_eq!(normalize_signed_degrees(-180.0), 180.0);
/// assert_eq!(normalize_signed_degrees(540.0), 180.0);
/// ```
#[must_use]
pub const fn normalize_signed_degrees(degrees: f64) -> f64 {
    let normalized = normalize_degrees_0_to_360(degrees);
    if normalized > 180.0 {
        normalized - 360.0
    } else {
        normalized
    }
}

/// Limits an hour angle into `[-180, 180]` the way the rise/set solver expects.
pub fn limit_degrees_180_pm(degrees: f64) -> f64 {
    let normalized = degrees / 360.0;
    let limited = 360.0 * (normalized - floor(normalized));
    if limited < -180.0 {
        limited + 360.0
    } else if limited > 180.0 {
        limited - 360.0
    } else {
        limited
    }
}

/// Limits an angle into `[0, 180]`.
pub fn limit_degrees_180(degrees: f64) -> f64 {
    let normalized = degrees / 180.0;
    let limited = 180.0 * (normalized - floor(normalized));
    if limited < 0.0 {
        limited + 180.0
    } else {
        limited
    }
}

/// Normalizes a day fraction into `[0, 1)`.
pub fn normalize_to_unit_range(value: f64) -> f64 {
    let limited = value - floor(value);
    if limited < 0.0 {
        limited + 1.0
    } else {
        limited
    }
}

/// Rounds `value` to the nearest multiple of `step`.
pub fn round_to(value: f64, step: f64) -> f64 {
    round(value / step) * step
}

/// Evaluates `c[0] + c[1]·x + c[2]·x² + …` by Horner's rule. Empty input gives 0.
pub fn polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs
        .iter()
        .rev()
        .fold(0.0, |acc, &coefficient| mul_add(acc, x, coefficient))
}

/// Defines `f64` functions that call the inherent method under `std` and `libm`
/// otherwise. The first argument is the receiver.
macro_rules! float_fns {
    ($($name:ident($x:ident $(, $arg:ident)*) => $libm:ident;)+) => {
        $(
            #[inline]
            pub fn $name($x: f64 $(, $arg: f64)*) -> f64 {
                #[cfg(feature = "std")]
                return $x.$name($($arg),*);

                #[cfg(not(feature = "std"))]
                return libm::$libm($x $(, $arg)*);
            }
        )+
    };
}

float_fns! {
    sin(x) => sin;
    cos(x) => cos;
    tan(x) => tan;
    asin(x) => asin;
    acos(x) => acos;
    atan(x) => atan;
    atan2(y, x) => atan2;
    sqrt(x) => sqrt;
    floor(x) => floor;
    trunc(x) => trunc;
    round(x) => round;
    mul_add(x, a, b) => fma;
}

/// Integer power; `libm` has no `powi`, so the fallback goes through `pow`.
#[inline]
pub fn powi(x: f64, n: i32) -> f64 {
    #[cfg(feature = "std")]
    return x.powi(n);

    #[cfg(not(feature = "std"))]
    return libm::pow(x, f64::from(n));
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_angle_units() {
        assert!((degrees_to_radians(-270.0) + 1.5 * PI).abs() < EPSILON);
        assert!((radians_to_degrees(PI / 4.0) - 45.0).abs() < EPSILON);
        assert!((sin(degrees_to_radians(30.0)) - 0.5).abs() < EPSILON);
        assert!((radians_to_degrees(atan2(-1.0, -1.0)) + 135.0).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0, 360.0), 0.0);
        assert_eq!(normalize_degrees(360.0, 360.0), 0.0);
        assert_eq!(normalize_degrees(450.0, 360.0), 90.0);
        assert_eq!(normalize_degrees(-90.0, 360.0), 270.0);
        assert_eq!(normalize_degrees(-720.0, 360.0), 0.0);
        assert_eq!(normalize_degrees(-1e-20, 360.0), 0.0);
        assert_eq!(normalize_degrees(200.0, 180.0), 20.0);
        assert!(normalize_degrees(f64::NAN, 360.0).is_nan());
    }

    #[test]
    fn test_normalization_in_const_context() {
        const WRAPPED: f64 = normalize_degrees(-90.0, 360.0);
        const SIGNED: f64 = normalize_signed_degrees(350.0);
        assert_eq!(WRAPPED, 270.0);
        assert_eq!(SIGNED, -10.0);
    }

    #[test]
    fn test_normalize_signed_degrees() {
        assert_eq!(normalize_signed_degrees(0.0), 0.0);
        assert_eq!(normalize_signed_degrees(180.0), 180.0);
        assert_eq!(normalize_signed_degrees(-180.0), 180.0);
        assert_eq!(normalize_signed_degrees(181.0), -179.0);
        assert_eq!(normalize_signed_degrees(-190.0), 170.0);
        assert_eq!(normalize_signed_degrees(359.0), -1.0);
    }

    #[test]
    fn test_limit_degrees_180_pm() {
        assert!((limit_degrees_180_pm(190.0) + 170.0).abs() < EPSILON);
        assert!((limit_degrees_180_pm(-190.0) - 170.0).abs() < EPSILON);
        assert!((limit_degrees_180_pm(45.0) - 45.0).abs() < EPSILON);
        assert!((limit_degrees_180_pm(400.0) - 40.0).abs() < EPSILON);
    }

    #[test]
    fn test_limit_degrees_180() {
        assert!((limit_degrees_180(100.0) - 100.0).abs() < EPSILON);
        assert!((limit_degrees_180(190.0) - 10.0).abs() < EPSILON);
        assert!((limit_degrees_180(-10.0) - 170.0).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_to_unit_range() {
        assert!((normalize_to_unit_range(1.25) - 0.25).abs() < EPSILON);
        assert!((normalize_to_unit_range(-0.25) - 0.75).abs() < EPSILON);
        assert_eq!(normalize_to_unit_range(0.0), 0.0);
    }

    #[test]
    fn test_round_to() {
        assert!((round_to(12.345_678_9, 1e-6) - 12.345_679).abs() < 1e-12);
        assert!((round_to(-0.000_000_4, 1e-6)).abs() < 1e-12);
    }

    #[test]
    fn test_horner_evaluation() {
        assert_eq!(polynomial(&[], 7.0), 0.0);
        assert_eq!(polynomial(&[-4.0], 7.0), -4.0);
        // 1 - 2x + 0.5x³ at x = 2
        assert!((polynomial(&[1.0, -2.0, 0.0, 0.5], 2.0) - 1.0).abs() < EPSILON);
        assert!((powi(-1.5, 3) + 3.375).abs() < EPSILON);
        assert_eq!(trunc(-2.7), -2.0);
        assert_eq!(round(2.5), 3.0);
    }
}
