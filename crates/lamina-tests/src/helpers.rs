//! Shared builders for scenario and property tests.

use lamina_branch::{BranchBuilder, BranchRegion, BranchSpec};
use lamina_core::{Chord, CircularFraction, Polygon};
use lamina_pullback::engine::iterates;

/// Parser for one base; panics on bad text.
pub fn parser(base: u32) -> impl Fn(&str) -> CircularFraction {
    move |text| CircularFraction::parse_trusted(base, text)
}

/// Polygon through the given points.
pub fn polygon(points: impl IntoIterator<Item = CircularFraction>) -> Polygon {
    Polygon::new(points.into_iter().collect())
}

/// Spec claiming one endpoint of `chord`.
pub fn spec(chord: &Chord, claimed: &CircularFraction) -> BranchSpec {
    BranchSpec::new(chord.clone(), [claimed.clone()])
}

/// First `n` generations, each rendered with `render`.
pub fn take_generations(
    leaves: Vec<Polygon>,
    branches: Vec<BranchRegion>,
    n: usize,
    render: impl Fn(&Polygon) -> String,
) -> Vec<Vec<String>> {
    iterates(leaves, branches)
        .take(n)
        .map(|generation| generation.iter().map(&render).collect())
        .collect()
}

/// Same as [`take_generations`] with digit text, sorted within each
/// generation.
pub fn take_sorted(leaves: Vec<Polygon>, branches: Vec<BranchRegion>, n: usize) -> Vec<Vec<String>> {
    take_generations(leaves, branches, n, Polygon::to_string)
        .into_iter()
        .map(|mut generation| {
            generation.sort();
            generation
        })
        .collect()
}

/// Every base-`base` fraction with `len` exact digits, and every cycle of
/// `len` digits.
pub fn sample_points(base: u32, len: u32) -> Vec<CircularFraction> {
    let mut points = Vec::new();
    for n in 0..base.pow(len) {
        let mut digits = Vec::with_capacity(len as usize);
        let mut rest = n;
        for _ in 0..len {
            digits.push(rest % base);
            rest /= base;
        }
        points.push(CircularFraction::from_digits(base, &digits, &[]).unwrap());
        points.push(CircularFraction::from_digits(base, &[], &digits).unwrap());
    }
    points
}

/// Branches of the binary rabbit: the critical diameter from 1/7 to 9/14.
pub fn rabbit_branches() -> Vec<BranchRegion> {
    let binary = parser(2);
    let chord = Chord::new(binary("_001"), binary("1_010"));
    BranchBuilder::new(2).build([spec(&chord, chord.lower())])
}

/// The period-3 triangle {1/7, 2/7, 4/7}.
pub fn rabbit_triangle() -> Polygon {
    let binary = parser(2);
    polygon([binary("_001"), binary("_010"), binary("_100")])
}

/// The four nested quintary specs: three narrow chords and a wide one whose
/// outer side holds one of them.
pub fn quintary_specs() -> Vec<BranchSpec> {
    let quintary = parser(5);
    let a = quintary("0_033");
    let b = quintary("_033");
    let c = quintary("1_330");
    let d = quintary("_200");
    let e = quintary("3_002");
    let f = quintary("_303");
    let g = quintary("_330");
    let h = quintary("4_303");

    vec![
        spec(&Chord::new(b, c.clone()), &c),
        spec(&Chord::new(d, e.clone()), &e),
        spec(&Chord::new(g, h.clone()), &h),
        spec(&Chord::new(a.clone(), f), &a),
    ]
}
