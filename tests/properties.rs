//! Property tests for angle normalization, projection and position determinism.

use proptest::prelude::*;
use solar_almanac::geodesy::{distance, initial_bearing};
use solar_almanac::{
    normalize_degrees, normalize_signed_degrees, project_point, spa, time::JulianDate,
    Atmosphere, GeoPoint, Observer,
};

proptest! {
    #[test]
    fn normalized_degrees_stay_in_range(value in -1.0e6_f64..1.0e6) {
        let normalized = normalize_degrees(value, 360.0);
        prop_assert!((0.0..360.0).contains(&normalized));
        prop_assert_eq!(normalize_degrees(normalized, 360.0), normalized);
    }

    #[test]
    fn signed_degrees_stay_in_range(value in -1.0e6_f64..1.0e6) {
        let normalized = normalize_signed_degrees(value);
        prop_assert!(normalized > -180.0 && normalized <= 180.0);
    }

    #[test]
    fn projection_there_and_back(
        latitude in -80.0_f64..80.0,
        longitude in -180.0_f64..180.0,
        meters in 1.0_f64..100_000.0,
        azimuth in 0.0_f64..360.0,
    ) {
        let origin = GeoPoint::new(latitude, longitude).unwrap();
        let target = project_point(origin, meters, azimuth, None).unwrap();

        // off the meridians and the equator the reverse course is not azimuth + 180
        let back_distance = distance(target, origin, None).unwrap();
        let back_azimuth = initial_bearing(target, origin);
        let back = project_point(target, back_distance, back_azimuth, None).unwrap();

        prop_assert!((back.latitude() - origin.latitude()).abs() < 2e-6);
        prop_assert!(normalize_signed_degrees(back.longitude() - origin.longitude()).abs() < 2e-6);
    }

    #[test]
    fn equator_projection_reverses_at_opposite_azimuth(
        longitude in -180.0_f64..180.0,
        meters in 1.0_f64..1_000_000.0,
        eastward in any::<bool>(),
    ) {
        let azimuth = if eastward { 90.0 } else { 270.0 };
        let origin = GeoPoint::new(0.0, longitude).unwrap();
        let target = project_point(origin, meters, azimuth, None).unwrap();
        prop_assert!(target.latitude().abs() < 1e-6);

        let back = project_point(target, meters, (azimuth + 180.0) % 360.0, None).unwrap();
        prop_assert!(back.latitude().abs() < 1e-6);
        prop_assert!(normalize_signed_degrees(back.longitude() - longitude).abs() < 2e-6);
    }

    #[test]
    fn meridian_projection_reverses_at_opposite_azimuth(
        latitude in -60.0_f64..60.0,
        longitude in -180.0_f64..180.0,
        meters in 1.0_f64..500_000.0,
        northward in any::<bool>(),
    ) {
        let azimuth = if northward { 0.0 } else { 180.0 };
        let origin = GeoPoint::new(latitude, longitude).unwrap();
        let target = project_point(origin, meters, azimuth, None).unwrap();
        prop_assert!(normalize_signed_degrees(target.longitude() - longitude).abs() < 2e-6);

        // the sphere radius follows the latitude, so measure the way back from the target
        let back_distance = distance(target, origin, None).unwrap();
        let back = project_point(target, back_distance, (azimuth + 180.0) % 360.0, None).unwrap();
        prop_assert!((back.latitude() - latitude).abs() < 2e-6);
        prop_assert!(normalize_signed_degrees(back.longitude() - longitude).abs() < 2e-6);
    }

    #[test]
    fn solar_position_is_deterministic_and_bounded(
        day_offset in 0.0_f64..36_525.0,
        latitude in -90.0_f64..=90.0,
        longitude in -180.0_f64..=180.0,
        elevation in -400.0_f64..5000.0,
    ) {
        // 1950-01-01 00:00 UT onwards
        let jd = JulianDate::from_julian_day(2_433_282.5 + day_offset, 69.0).unwrap();
        let observer = Observer::new(latitude, longitude, elevation).unwrap();

        let first = spa::solar_position_from_julian(jd, &observer, Atmosphere::standard()).unwrap();
        let second = spa::solar_position_from_julian(jd, &observer, Atmosphere::standard()).unwrap();

        prop_assert_eq!(first, second);
        prop_assert!((0.0..360.0).contains(&first.azimuth()));
        prop_assert!((0.0..=180.0).contains(&first.zenith_angle()));
        prop_assert!(first.equation_of_time().abs() < 20.0);
    }
}
