// Benchmark of the per-tick geometry: calendar rebuilds and hand angles.
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mandala::{compute_hand_angles, year_grid, Locale, MandalaConfig, TimeOfDay};
use mandala_layout::face::ClockFace;

fn layout_benchmarks(c: &mut Criterion) {
    let config = MandalaConfig::default();
    let locale = Locale::english();
    let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

    c.bench_function("year_grid_build", |b| {
        b.iter(|| {
            let grid = year_grid(black_box(&config), &locale, black_box(today));
            black_box(grid);
        });
    });

    c.bench_function("hand_angles_full_day", |b| {
        b.iter(|| {
            for seconds in (0..86_400).step_by(37) {
                let time = TimeOfDay::from_seconds_of_day(black_box(seconds));
                black_box(compute_hand_angles(time, &config.hands));
            }
        });
    });

    c.bench_function("clock_face_build", |b| {
        b.iter(|| black_box(ClockFace::build(black_box(&config.face))));
    });
}

criterion_group!(benches, layout_benchmarks);
criterion_main!(benches);
