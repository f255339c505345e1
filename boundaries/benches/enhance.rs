//! Benchmarks for link derivation.
//!
//! Run with: cargo bench --bench enhance

use boundaries::{overpass_query_land_only, BoundaryDescriptor, FileFormat, Links};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Build a synthetic catalog with alternating land/maritime entries.
fn synthetic_catalog(size: usize) -> Vec<BoundaryDescriptor> {
    (0..size)
        .map(|i| {
            let tag = if i % 2 == 0 { "l" } else { "m" };
            BoundaryDescriptor::new("LU", 6, (100_000 + i).to_string(), format!("commune_{}", i), tag)
        })
        .collect()
}

fn bench_single(c: &mut Criterion) {
    let links = Links::default();
    let boundary = BoundaryDescriptor::new("AD", 2, "9407", "andorra", "l");

    c.bench_function("format_link_geojson", |b| {
        b.iter(|| links.format_link(black_box(&boundary), FileFormat::GeoJson))
    });

    c.bench_function("enhance_single", |b| {
        b.iter(|| links.enhance(black_box(&boundary)))
    });

    c.bench_function("overpass_query_land_only", |b| {
        b.iter(|| overpass_query_land_only(2, black_box("AD")))
    });
}

fn bench_catalog(c: &mut Criterion) {
    let links = Links::default();
    let mut group = c.benchmark_group("enhance_all");

    for size in [100, 1_000, 10_000] {
        let catalog = synthetic_catalog(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter(|| links.enhance_all(black_box(catalog)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single, bench_catalog);
criterion_main!(benches);
