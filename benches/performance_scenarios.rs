use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use solar_almanac::{Atmosphere, GeoPoint, Observer, project_point, spa, time::JulianDate};
use std::hint::black_box;

fn reference_instant() -> JulianDate {
    JulianDate::from_utc(2023, 6, 21, 12, 0, 0.0, 69.0).unwrap()
}

fn benchmark_single_calculation(c: &mut Criterion) {
    let jd = reference_instant();
    let observer = Observer::new(37.7749, -122.4194, 0.0).unwrap();
    let atmosphere = Atmosphere::new(1013.25, 15.0).unwrap();

    c.bench_function("spa_single", |b| {
        b.iter(|| {
            spa::solar_position_from_julian(
                black_box(jd),
                black_box(&observer),
                black_box(atmosphere),
            )
            .unwrap()
        })
    });

    c.bench_function("rise_set_transit_single", |b| {
        b.iter(|| {
            spa::rise_set_transit_utc(
                black_box(2023),
                black_box(6),
                black_box(21),
                black_box(&observer),
                black_box(atmosphere),
                black_box(69.0),
            )
            .unwrap()
        })
    });

    c.bench_function("project_point_single", |b| {
        let origin = observer.point();
        b.iter(|| {
            project_point(
                black_box(origin),
                black_box(25_000.0),
                black_box(63.0),
                black_box(None),
            )
            .unwrap()
        })
    });
}

fn benchmark_time_series_fixed_location(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_series_fixed_location");

    let observer = Observer::new(37.7749, -122.4194, 0.0).unwrap();
    let atmosphere = Atmosphere::standard();
    let start = reference_instant();

    for &count in &[1000, 5000, 25000] {
        group.throughput(Throughput::Elements(count));

        // hourly steps
        let instants: Vec<JulianDate> = (0..count)
            .map(|i| start.add_days(i as f64 / 24.0))
            .collect();

        group.bench_with_input(BenchmarkId::new("spa", count), &count, |b, _| {
            b.iter(|| {
                for &jd in &instants {
                    let _result =
                        spa::solar_position_from_julian(black_box(jd), &observer, atmosphere)
                            .unwrap();
                }
            })
        });
    }

    group.finish();
}

fn benchmark_coordinate_sweep_fixed_time(c: &mut Criterion) {
    let mut group = c.benchmark_group("coordinate_sweep_fixed_time");

    let jd = reference_instant();
    let atmosphere = Atmosphere::standard();

    for &grid_size in &[30, 70, 150] {
        let count = grid_size * grid_size;
        group.throughput(Throughput::Elements(count as u64));

        let observers: Vec<Observer> = (0..grid_size)
            .flat_map(|i| {
                (0..grid_size).map(move |j| {
                    let lat = 30.0 + (i as f64) * 0.1;
                    let lon = -120.0 + (j as f64) * 0.1;
                    Observer::new(lat, lon, 0.0).unwrap()
                })
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("full", format!("{grid_size}x{grid_size}")),
            &count,
            |b, _| {
                b.iter(|| {
                    for observer in &observers {
                        let _result =
                            spa::solar_position_from_julian(black_box(jd), observer, atmosphere)
                                .unwrap();
                    }
                })
            },
        );

        // the geocentric part depends on the instant only
        group.bench_with_input(
            BenchmarkId::new("shared_geocentric", format!("{grid_size}x{grid_size}")),
            &count,
            |b, _| {
                b.iter(|| {
                    let geocentric = spa::geocentric_position(black_box(jd)).unwrap();
                    for observer in &observers {
                        let _result = spa::topocentric_position(&geocentric, observer, atmosphere);
                    }
                })
            },
        );
    }

    group.finish();
}

fn benchmark_rise_set_year(c: &mut Criterion) {
    let mut group = c.benchmark_group("rise_set_year");

    let observer = Observer::new(48.21, 16.37, 190.0).unwrap();
    let atmosphere = Atmosphere::standard();
    let dates: Vec<(u32, u32)> = (1..=12)
        .flat_map(|month| (1..=28).map(move |day| (month, day)))
        .collect();
    group.throughput(Throughput::Elements(dates.len() as u64));

    group.bench_function("vienna_2023_days_1_to_28", |b| {
        b.iter(|| {
            for &(month, day) in &dates {
                let _result = spa::rise_set_transit_utc(
                    2023,
                    black_box(month),
                    black_box(day),
                    &observer,
                    atmosphere,
                    69.0,
                )
                .unwrap();
            }
        })
    });

    group.finish();
}

fn benchmark_projection_fan(c: &mut Criterion) {
    let origin = GeoPoint::new(39.742476, -105.1786).unwrap();
    let azimuths: Vec<f64> = (0..360).map(f64::from).collect();

    c.bench_function("project_point_fan_360", |b| {
        b.iter(|| {
            for &azimuth in &azimuths {
                let _result =
                    project_point(origin, black_box(10_000.0), azimuth, Some(1830.14)).unwrap();
            }
        })
    });
}

criterion_group!(
    benches,
    benchmark_single_calculation,
    benchmark_time_series_fixed_location,
    benchmark_coordinate_sweep_fixed_time,
    benchmark_rise_set_year,
    benchmark_projection_fan
);

criterion_main!(benches);
