//! Test utilities for Ganita integration tests.
//!
//! Random corpora are seeded so failures reproduce.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Relative tolerance in units of `f32::EPSILON`.
pub const TOLERANCE_EPSILONS: f32 = 16.0;

/// Iterations per randomized property.
pub const ITERATIONS: usize = 256;

/// Deterministic generator.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// `16 * EPSILON * max(|a|, |b|)`
pub fn tolerance(a: f32, b: f32) -> f32 {
    TOLERANCE_EPSILONS * f32::EPSILON * a.abs().max(b.abs())
}

/// Relative comparison for a single float.
pub fn assert_close(got: f32, want: f32, what: &str) {
    assert!(
        got == want || (got - want).abs() <= tolerance(got, want),
        "{}: got {}, want {}",
        what,
        got,
        want
    );
}

/// Lane-wise relative comparison.
pub fn assert_lanes_close(got: [f32; 4], want: [f32; 4], what: &str) {
    for i in 0..4 {
        assert_close(got[i], want[i], &format!("{} lane {}", what, i));
    }
}

/// Lane-wise comparison against an absolute bound `16 * EPSILON * scale[i]`.
///
/// For results that may cancel, pass the magnitude of the summed terms.
pub fn assert_lanes_near(got: [f32; 4], want: [f32; 4], scale: [f32; 4], what: &str) {
    for i in 0..4 {
        let bound = TOLERANCE_EPSILONS * f32::EPSILON * scale[i];
        assert!(
            (got[i] - want[i]).abs() <= bound,
            "{} lane {}: got {}, want {} (bound {})",
            what,
            i,
            got[i],
            want[i],
            bound
        );
    }
}

/// Entry-wise comparison with an absolute tolerance.
pub fn assert_rows_near(got: [[f32; 4]; 4], want: [[f32; 4]; 4], eps: f32, what: &str) {
    for (r, (g, w)) in got.iter().zip(want.iter()).enumerate() {
        for c in 0..4 {
            assert!(
                (g[c] - w[c]).abs() <= eps,
                "{} [{}][{}]: got {}, want {}",
                what,
                r,
                c,
                g[c],
                w[c]
            );
        }
    }
}

/// Four lanes in `[-10, 10)`.
pub fn random_lanes(rng: &mut StdRng) -> [f32; 4] {
    [
        rng.random_range(-10.0..10.0),
        rng.random_range(-10.0..10.0),
        rng.random_range(-10.0..10.0),
        rng.random_range(-10.0..10.0),
    ]
}

/// Four lanes in `[0.01, 100)`.
pub fn random_positive_lanes(rng: &mut StdRng) -> [f32; 4] {
    [
        rng.random_range(0.01..100.0),
        rng.random_range(0.01..100.0),
        rng.random_range(0.01..100.0),
        rng.random_range(0.01..100.0),
    ]
}

/// Random rows in `[-10, 10)`.
pub fn random_rows(rng: &mut StdRng) -> [[f32; 4]; 4] {
    [
        random_lanes(rng),
        random_lanes(rng),
        random_lanes(rng),
        random_lanes(rng),
    ]
}

/// Strictly diagonally dominant rows, so the matrix is invertible with a
/// small condition number.
pub fn random_well_conditioned(rng: &mut StdRng) -> [[f32; 4]; 4] {
    let mut rows = [[0.0f32; 4]; 4];
    for (i, row) in rows.iter_mut().enumerate() {
        for value in row.iter_mut() {
            *value = rng.random_range(-1.0..1.0);
        }
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        row[i] = sign * rng.random_range(4.0..8.0);
    }
    rows
}

/// Unit axis that is never close to zero length.
pub fn random_axis(rng: &mut StdRng) -> [f32; 3] {
    loop {
        let axis: [f32; 3] = [
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        ];
        let len = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
        if len > 0.1 {
            return [axis[0] / len, axis[1] / len, axis[2] / len];
        }
    }
}

/// Reference 4x4 product in f64, using the row-basis convention
/// (`a * b` applies `b` first).
pub fn reference_mul(a: [[f32; 4]; 4], b: [[f32; 4]; 4]) -> [[f32; 4]; 4] {
    let mut out = [[0.0f32; 4]; 4];
    for r in 0..4 {
        for c in 0..4 {
            let mut acc = 0.0f64;
            for k in 0..4 {
                acc += b[r][k] as f64 * a[k][c] as f64;
            }
            out[r][c] = acc as f32;
        }
    }
    out
}

/// Largest absolute entry.
pub fn max_abs(rows: [[f32; 4]; 4]) -> f32 {
    rows.iter()
        .flat_map(|r| r.iter())
        .fold(0.0f32, |m, v| m.max(v.abs()))
}
