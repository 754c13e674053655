// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::*;

use ephemeris_core::chebyshev;
use ephemeris_core::constants::J2000;
use ephemeris_core::houses::{self, HouseSystem};
use ephemeris_core::sidereal;
use ephemeris_core::time;

fn time_scales(c: &mut Criterion) {
    c.bench_function("ut_to_tt", |b| {
        b.iter(|| time::ut_to_tt(black_box(J2000)).unwrap())
    });

    c.bench_function("tt_to_ut", |b| {
        b.iter(|| time::tt_to_ut(black_box(J2000)).unwrap())
    });

    c.bench_function("delta_t_seconds", |b| {
        b.iter(|| time::delta_t_seconds(black_box(J2000)).unwrap())
    });
}

fn chebyshev_evaluator(c: &mut Criterion) {
    let coeffs: Vec<f64> = (0..20).map(|i| 1.0 / (i as f64 + 1.0)).collect();

    c.bench_function("chebyshev::evaluate_both (20 coeffs)", |b| {
        b.iter(|| chebyshev::evaluate_both(black_box(0.37), black_box(&coeffs)).unwrap())
    });
}

fn sidereal_time(c: &mut Criterion) {
    c.bench_function("gmst_hours", |b| {
        b.iter(|| sidereal::gmst_hours(black_box(J2000), black_box(J2000)))
    });

    c.bench_function("gast_hours", |b| {
        b.iter(|| sidereal::gast_hours(black_box(J2000), black_box(J2000)))
    });
}

fn house_systems(c: &mut Criterion) {
    let armc = 1.2_f64;
    let obliquity = 23.439281_f64.to_radians();
    let latitude = 0.6_f64;

    c.bench_function("houses::compute (Placidus)", |b| {
        b.iter(|| houses::compute(black_box(HouseSystem::Placidus), armc, obliquity, latitude).unwrap())
    });

    c.bench_function("houses::compute (WholeSign)", |b| {
        b.iter(|| houses::compute(black_box(HouseSystem::WholeSign), armc, obliquity, latitude).unwrap())
    });
}

criterion_group!(benches, time_scales, chebyshev_evaluator, sidereal_time, house_systems);
criterion_main!(benches);
