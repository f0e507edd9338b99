use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polekit_designer::snap::build_snap_points;
use polekit_designer::{nearest_snap, Point, Pole, PoleId, ProfileCatalog};

fn poles(count: u64) -> Vec<Pole> {
    let profile = ProfileCatalog::default().resolve("circular").unwrap_or_else(|e| panic!("{e}"));
    (0..count)
        .map(|i| Pole::new(PoleId(i + 1), profile.clone(), Point::new(i as f64 * 25.0, 0.0), 6.0))
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_snap_points");
    for count in [10u64, 100, 1000] {
        let poles = poles(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &poles, |b, poles| {
            b.iter(|| build_snap_points(black_box(poles), 750.0, 50.0, 50.0, 0.25, 1920.0))
        });
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let points = build_snap_points(&poles(1000), 750.0, 50.0, 50.0, 0.25, 1920.0);
    c.bench_function("nearest_snap_1000_poles", |b| {
        b.iter(|| nearest_snap(black_box(&Point::new(5012.0, 744.0)), &points, 30.0))
    });
}

criterion_group!(benches, bench_build, bench_nearest);
criterion_main!(benches);
