//! Criterion benchmarks for the pullback engine.
//!
//! Covers: single-polygon pullback, advancing generations of the binary
//! rabbit, and the forward-map consistency check.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use lamina_branch::{BranchBuilder, BranchRegion, BranchSpec};
use lamina_core::{Chord, CircularFraction, Polygon};
use lamina_pullback::engine::{maps_onto, pull_back, Lamination};

fn binary(text: &str) -> CircularFraction {
    CircularFraction::parse_trusted(2, text)
}

fn rabbit() -> (Polygon, Vec<BranchRegion>) {
    let lower = binary("_001");
    let chord = Chord::new(lower.clone(), binary("1_010"));
    let branches = BranchBuilder::new(2).build([BranchSpec::new(chord, [lower])]);
    let triangle = Polygon::new(vec![binary("_001"), binary("_010"), binary("_100")]);
    (triangle, branches)
}

fn bench_pull_back(c: &mut Criterion) {
    let (triangle, branches) = rabbit();
    c.bench_function("pull_back_triangle", |b| {
        b.iter(|| pull_back(black_box(&triangle), black_box(&branches)))
    });
}

fn bench_generations(c: &mut Criterion) {
    let (triangle, branches) = rabbit();
    let start = Lamination::new(vec![triangle], branches);

    let mut group = c.benchmark_group("advance");
    for depth in [2usize, 4, 6] {
        let ready = (0..depth).fold(start.clone(), |l, _| l.advance());
        group.bench_with_input(BenchmarkId::from_parameter(depth), &ready, |b, l| {
            b.iter(|| black_box(l).advance())
        });
    }
    group.finish();
}

fn bench_maps_onto(c: &mut Criterion) {
    let (triangle, branches) = rabbit();
    let start = Lamination::new(vec![triangle], branches);
    let parent = (0..4).fold(start, |l, _| l.advance());
    let child = parent.advance();

    c.bench_function("maps_onto_gen5", |b| {
        b.iter(|| maps_onto(black_box(child.leaves()), black_box(parent.leaves())))
    });
}

criterion_group!(benches, bench_pull_back, bench_generations, bench_maps_onto);
criterion_main!(benches);
