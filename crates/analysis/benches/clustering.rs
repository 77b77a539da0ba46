//! DBSCAN clustering benchmarks over synthetic sighting scatters.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use wildtrack_analysis::cluster::{dbscan, DbscanParams};

/// Deterministic scatter: `blobs` dense groups plus background noise.
fn synthetic_scatter(blobs: usize, per_blob: usize, noise: usize) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(blobs * per_blob + noise);
    let mut state: u64 = 0x5eed;
    let mut next = move || {
        // xorshift64, mapped into [0, 1)
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    };

    for b in 0..blobs {
        let cx = -150.0 + b as f64 * (300.0 / blobs as f64);
        let cy = -60.0 + b as f64 * (120.0 / blobs as f64);
        for _ in 0..per_blob {
            points.push((cx + next() * 0.6 - 0.3, cy + next() * 0.6 - 0.3));
        }
    }
    for _ in 0..noise {
        points.push((next() * 360.0 - 180.0, next() * 170.0 - 85.0));
    }
    points
}

fn bench_dbscan(c: &mut Criterion) {
    let params = DbscanParams::default();

    for n in [500, 2000] {
        let points = synthetic_scatter(8, n / 10, n / 5);
        c.bench_function(&format!("dbscan_{}_points", points.len()), |b| {
            b.iter(|| dbscan(black_box(&points), black_box(&params)))
        });
    }
}

criterion_group!(benches, bench_dbscan);
criterion_main!(benches);
