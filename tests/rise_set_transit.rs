//! Sunrise, transit and sunset through the numeric and the chrono API.

use solar_almanac::{
    spa, Atmosphere, HoursUtc, Observer, PolarCondition, RiseSetTransit, NO_RISE_SET_SENTINEL,
};

fn golden() -> Observer {
    Observer::new(39.742476, -105.1786, 1830.14).unwrap()
}

fn assert_hours(actual: f64, expected: f64, label: &str) {
    // one second
    assert!(
        (actual - expected).abs() < 1.0 / 3600.0,
        "{label}: {actual} h (expected {expected} h)"
    );
}

#[test]
fn test_golden_reference_day() {
    let result = spa::rise_set_transit_utc(2003, 10, 17, &golden(), Atmosphere::standard(), 67.0)
        .unwrap();

    // 06:12:43, 11:46:05 and 17:20:19 local time (UTC-7)
    assert_hours(result.sunrise_hours(), 13.212_067, "sunrise");
    assert_hours(result.transit_hours(), 18.768_045, "transit");
    // sunset falls after 0 UT, so it is reported early in the UTC day
    assert_hours(result.sunset_hours(), 0.338_667, "sunset");

    assert!((result.sunrise_hour_angle() + 83.496).abs() < 1e-3);
    assert!((result.sunset_hour_angle() - 83.524).abs() < 1e-3);
    assert!(result.transit_hour_angle().abs() < 0.1);
    assert!((result.transit_altitude() - 40.9544).abs() < 1e-3);
}

#[test]
fn test_vienna_summer_solstice() {
    let vienna = Observer::new(48.21, 16.37, 190.0).unwrap();
    let result =
        spa::rise_set_transit_utc(2026, 6, 21, &vienna, Atmosphere::standard(), 69.0).unwrap();

    let RiseSetTransit::RegularDay {
        sunrise,
        transit,
        sunset,
        transit_altitude,
    } = result
    else {
        panic!("Expected a regular day, got {result:?}");
    };

    assert_hours(sunrise.time.hours(), 2.898_529, "sunrise");
    assert_hours(transit.time.hours(), 10.938_794, "transit");
    assert_hours(sunset.time.hours(), 18.979_005, "sunset");
    assert!((transit_altitude - 65.2279).abs() < 1e-3);
    assert!(sunrise.time.hours() < transit.time.hours());
    assert!(transit.time.hours() < sunset.time.hours());
}

#[test]
fn test_polar_day_and_night() {
    let atmosphere = Atmosphere::standard();
    let north = Observer::new(80.0, 15.0, 0.0).unwrap();
    let south = Observer::new(-80.0, 0.0, 0.0).unwrap();

    let north_summer = spa::rise_set_transit_utc(2024, 6, 20, &north, atmosphere, 69.0).unwrap();
    assert_eq!(north_summer.polar_condition(), Some(PolarCondition::PolarDay));

    let north_winter = spa::rise_set_transit_utc(2024, 12, 21, &north, atmosphere, 69.0).unwrap();
    assert_eq!(north_winter.polar_condition(), Some(PolarCondition::PolarNight));

    let south_summer = spa::rise_set_transit_utc(2024, 12, 21, &south, atmosphere, 69.0).unwrap();
    assert_eq!(south_summer.polar_condition(), Some(PolarCondition::PolarDay));

    let south_winter = spa::rise_set_transit_utc(2024, 6, 21, &south, atmosphere, 69.0).unwrap();
    assert_eq!(south_winter.polar_condition(), Some(PolarCondition::PolarNight));

    // the equinox brings a regular day back even at 80°
    let equinox = spa::rise_set_transit_utc(2024, 3, 20, &north, atmosphere, 69.0).unwrap();
    assert!(equinox.is_regular_day());
}

#[test]
fn test_circumpolar_results_use_sentinel() {
    let north = Observer::new(80.0, 15.0, 0.0).unwrap();
    let result =
        spa::rise_set_transit_utc(2024, 6, 20, &north, Atmosphere::standard(), 69.0).unwrap();

    assert!(result.is_circumpolar());
    assert!(result.sunrise().is_none());
    for value in [
        result.sunrise_hours(),
        result.transit_hours(),
        result.sunset_hours(),
        result.sunrise_hour_angle(),
        result.transit_hour_angle(),
        result.sunset_hour_angle(),
        result.transit_altitude(),
    ] {
        assert_eq!(value, NO_RISE_SET_SENTINEL);
    }
}

#[test]
fn test_refraction_setting_moves_sunrise() {
    let standard =
        spa::rise_set_transit_utc(2003, 10, 17, &golden(), Atmosphere::standard(), 67.0).unwrap();
    let without = spa::rise_set_transit_utc(
        2003,
        10,
        17,
        &golden(),
        Atmosphere::standard().with_refraction(0.0).unwrap(),
        67.0,
    )
    .unwrap();

    // a lower apparent horizon means an earlier sunrise and a later sunset
    assert!(standard.sunrise_hours() < without.sunrise_hours());
    assert!(standard.sunset_hours() > without.sunset_hours());
    assert_hours(standard.transit_hours(), without.transit_hours(), "transit");
}

#[test]
fn test_invalid_inputs() {
    let atmosphere = Atmosphere::standard();
    assert!(spa::rise_set_transit_utc(2023, 2, 30, &golden(), atmosphere, 69.0).is_err());
    assert!(spa::rise_set_transit_utc(2023, 13, 1, &golden(), atmosphere, 69.0).is_err());
    assert!(spa::rise_set_transit_utc(2023, 6, 21, &golden(), atmosphere, f64::NAN).is_err());
}

#[test]
fn test_hours_utc_day_and_hours() {
    let (day, hours) = HoursUtc::from_hours(-1.5).day_and_hours();
    assert_eq!(day, -1);
    assert!((hours - 22.5).abs() < 1e-10);

    let (day, hours) = HoursUtc::from_hours(12.5).day_and_hours();
    assert_eq!(day, 0);
    assert!((hours - 12.5).abs() < 1e-10);
}

#[cfg(feature = "chrono")]
mod with_chrono {
    use super::*;
    use chrono::{
        offset::LocalResult, DateTime, FixedOffset, NaiveDate, TimeZone, Timelike, Utc,
    };
    use chrono_tz::{America::Denver, Tz, TZ_VARIANTS};
    use solar_almanac::{rise_set_transit_at_local_date, time::TimeCorrections, GeoPoint};

    fn millis_of_day<Tz: TimeZone>(time: &DateTime<Tz>) -> i64 {
        i64::from(time.num_seconds_from_midnight()) * 1000
            + i64::from(time.nanosecond() / 1_000_000)
    }

    #[test]
    fn test_golden_local_times() {
        let date = "2003-10-17T00:00:00-07:00"
            .parse::<DateTime<FixedOffset>>()
            .unwrap();
        let result = spa::rise_set_transit(
            &date,
            &golden(),
            Atmosphere::standard(),
            TimeCorrections::new(Some(67.0), 0.0).unwrap(),
        )
        .unwrap();

        let sunrise = result.sunrise().unwrap();
        let transit = result.transit().unwrap();
        let sunset = result.sunset().unwrap();

        assert_eq!((sunrise.hour(), sunrise.minute()), (6, 12));
        // 11:46:04.97 local
        let transit_millis = millis_of_day(transit);
        assert!(
            (transit_millis - 42_364_970).abs() < 100,
            "transit at {transit_millis} ms after midnight"
        );
        assert_eq!((sunset.hour(), sunset.minute()), (17, 20));
        for event in [sunrise, transit, sunset] {
            assert_eq!(event.date_naive(), date.date_naive());
        }
    }

    #[test]
    fn test_chrono_and_numeric_agree() {
        let zone = FixedOffset::west_opt(7 * 3600).unwrap();
        let date = NaiveDate::from_ymd_opt(2003, 10, 17).unwrap();
        let corrections = TimeCorrections::new(Some(67.0), 0.0).unwrap();
        let atmosphere = Atmosphere::standard();

        let local =
            spa::rise_set_transit_for_date(date, &zone, &golden(), atmosphere, corrections)
                .unwrap();
        let numeric = spa::rise_set_transit_utc(2003, 10, 17, &golden(), atmosphere, 67.0).unwrap();

        let utc_midnight = Utc.with_ymd_and_hms(2003, 10, 17, 0, 0, 0).unwrap();
        let hours_after_midnight = |event: &DateTime<FixedOffset>| {
            let seconds = (event.with_timezone(&Utc) - utc_midnight).num_milliseconds() as f64 / 1000.0;
            seconds.rem_euclid(86_400.0) / 3600.0
        };

        assert_hours(hours_after_midnight(local.sunrise().unwrap()), numeric.sunrise_hours(), "sunrise");
        assert_hours(hours_after_midnight(local.transit().unwrap()), numeric.transit_hours(), "transit");
        assert_hours(hours_after_midnight(local.sunset().unwrap()), numeric.sunset_hours(), "sunset");
        assert_eq!(local.sunrise_hour_angle(), numeric.sunrise_hour_angle());
    }

    #[test]
    fn test_denver_daylight_saving_time() {
        let lookup = |_: GeoPoint| Some(Denver);
        let result = rise_set_transit_at_local_date(
            &lookup,
            NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            &golden(),
            Atmosphere::standard(),
            TimeCorrections::new(Some(69.2), 0.0).unwrap(),
        )
        .unwrap();

        // MDT, UTC-6
        let sunrise = result.sunrise().unwrap();
        let transit = result.transit().unwrap();
        let sunset = result.sunset().unwrap();
        assert_eq!((sunrise.hour(), sunrise.minute()), (5, 38));
        assert_eq!((transit.hour(), transit.minute()), (13, 5));
        assert_eq!((sunset.hour(), sunset.minute()), (20, 32));
        assert_eq!(sunset.date_naive(), NaiveDate::from_ymd_opt(2024, 7, 4).unwrap());
    }

    #[test]
    fn test_polar_results_with_chrono() {
        let result = spa::rise_set_transit(
            &Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap(),
            &Observer::new(80.0, 15.0, 0.0).unwrap(),
            Atmosphere::standard(),
            TimeCorrections::from_table(),
        )
        .unwrap();

        assert_eq!(result.polar_condition(), Some(PolarCondition::PolarDay));
        assert!(result.transit().is_none());
        assert_eq!(result.transit_altitude(), NO_RISE_SET_SENTINEL);
    }

    fn find_date_with_missing_midnight() -> Option<DateTime<Tz>> {
        for tz in TZ_VARIANTS {
            for year in 2000..=2030 {
                for month in 1..=12 {
                    for day in 1..=31 {
                        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                            continue;
                        };

                        let midnight_local =
                            tz.from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap());
                        if !matches!(midnight_local, LocalResult::Single(_)) {
                            if let LocalResult::Single(midday) =
                                tz.from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
                            {
                                return Some(midday);
                            }
                        }
                    }
                }
            }
        }
        None
    }

    #[test]
    fn test_dates_without_local_midnight() {
        let datetime = find_date_with_missing_midnight()
            .expect("expected to find a timezone/day combination without midnight");

        // equatorial coordinates avoid polar day/night
        let result = spa::rise_set_transit(
            &datetime,
            &Observer::new(0.0, 0.0, 0.0).unwrap(),
            Atmosphere::standard(),
            TimeCorrections::from_table(),
        )
        .unwrap();

        assert!(result.is_regular_day());
    }
}
