//! Criterion benchmarks for diagram construction.
//! Focus sizes: sites in {10, 100, 1000, 5000}.
//! Results land under target/criterion by default.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use voronoi::dcel::finish;
use voronoi::sample::{random_lattice_sites, random_sites};
use voronoi::sweep::Sweep;
use voronoi::{build_diagram, Bounds, GeomCfg};

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_diagram");
    let bounds = Bounds::square(100.0);
    let cfg = GeomCfg::default();
    for &n in &[10usize, 100, 1000, 5000] {
        group.bench_with_input(BenchmarkId::new("uniform", n), &n, |b, &n| {
            b.iter_batched(
                || random_sites(n, 100.0, 43),
                |sites| {
                    let _d = build_diagram(&sites, bounds, cfg).unwrap();
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("lattice", n), &n, |b, &n| {
            b.iter_batched(
                || random_lattice_sites(n, 100, 44),
                |sites| {
                    let _d = build_diagram(&sites, bounds, cfg).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("phases");
    let bounds = Bounds::square(100.0);
    let cfg = GeomCfg::default();
    for &n in &[100usize, 1000] {
        let sites = random_sites(n, 100.0, 45);
        group.bench_with_input(BenchmarkId::new("sweep", n), &sites, |b, sites| {
            b.iter(|| Sweep::new(sites, &bounds, &cfg).run())
        });
        let traced = Sweep::new(&sites, &bounds, &cfg).run();
        group.bench_with_input(BenchmarkId::new("finish", n), &sites, |b, sites| {
            b.iter(|| finish(&traced.edges, sites, &bounds, &cfg))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_phases);
criterion_main!(benches);
